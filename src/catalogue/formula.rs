//! Spreadsheet cell formulas

/// Quote a string literal for use inside a formula
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Render a `=HYPERLINK(url; label)` formula.
///
/// Arguments are separated with `;`, which the target spreadsheet's locale
/// expects when values are entered as if typed by a user.
pub fn hyperlink(url: &str, label: &str) -> String {
    format!("=HYPERLINK({}; {})", quote(url), quote(label))
}

/// Detail page of a single module version
pub fn module_detail_url(base_url: &str, module_id: i64, module_version: i64) -> String {
    format!("{}?number={}&version={}", base_url, module_id, module_version)
}

/// Combined module list of a study program.
///
/// The id is prefixed with `'`, which is what the published sheets have
/// always linked to.
pub fn program_catalogue_url(base_url: &str, program_id: i64) -> String {
    format!("{}?id='{}", base_url, program_id)
}

/// Title cell of a program sheet, linking to the program's module list
pub fn program_title_link(base_url: &str, program_id: i64, sheet_name: &str) -> String {
    hyperlink(
        &program_catalogue_url(base_url, program_id),
        &format!("Moses: Modulliste {}", sheet_name),
    )
}

/// Module label linking to the module's detail page
pub fn module_link(base_url: &str, module_id: i64, module_version: i64, title: &str) -> String {
    hyperlink(&module_detail_url(base_url, module_id, module_version), title)
}
