//! API Constants for the Google Sheets v4 API

/// Spreadsheets collection endpoint
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Read/write access to the user's spreadsheets and their properties
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Values are parsed as if typed into the UI, so formulas are evaluated
pub const VALUE_INPUT_USER_ENTERED: &str = "USER_ENTERED";

pub mod headers {
    pub const CONTENT_TYPE_JSON: &str = "application/json";
    pub const USER_AGENT: &str = "module-catalogue/0.1";
}

/// Spreadsheet metadata endpoint
pub fn spreadsheet_endpoint(base_url: &str, spreadsheet_id: &str) -> String {
    format!("{}/{}", base_url, spreadsheet_id)
}

/// Batch update endpoint (structural changes such as duplicating sheets)
pub fn batch_update_endpoint(base_url: &str, spreadsheet_id: &str) -> String {
    format!("{}/{}:batchUpdate", base_url, spreadsheet_id)
}

/// Values append endpoint for an A1 range
pub fn append_endpoint(base_url: &str, spreadsheet_id: &str, range: &str) -> String {
    format!(
        "{}/{}/values/{}:append",
        base_url,
        spreadsheet_id,
        urlencoding::encode(range)
    )
}

/// A1 notation for a cell on a named sheet.
///
/// Names that aren't plain identifiers are single-quoted, with embedded
/// quotes doubled.
pub fn a1_range(sheet_name: &str, cell: &str) -> String {
    let plain = !sheet_name.is_empty()
        && sheet_name.chars().all(|c| c.is_alphanumeric() || c == '_');
    if plain {
        format!("{}!{}", sheet_name, cell)
    } else {
        format!("'{}'!{}", sheet_name.replace('\'', "''"), cell)
    }
}
