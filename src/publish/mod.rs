//! Publishing catalogues into the spreadsheet
//!
//! Each program gets its own copy of the template sheet, a title link and its
//! catalogue. The three calls are independent; a failure aborts the run and
//! leaves whatever was already created in place. Rerunning after a partial
//! run duplicates sheets again.

pub mod dry_run;

use anyhow::{Context, Result};

use crate::api::SheetsApi;
use crate::api::constants::a1_range;
use crate::api::models::DuplicateSheetRequest;
use crate::catalogue::{Catalogue, build_catalogue, formula};
use crate::config::Config;
use crate::db::models::Program;
use crate::db::{LabelStyle, ModuleSource};

/// Number of trailing degree characters appended to the program title
const DEGREE_SUFFIX_CHARS: usize = 8;

/// Sheet name of a program: its title followed by the end of its degree
pub fn sheet_name(program: &Program) -> String {
    let chars: Vec<char> = program.degree.chars().collect();
    let start = chars.len().saturating_sub(DEGREE_SUFFIX_CHARS);
    let suffix: String = chars[start..].iter().collect();
    format!("{}{}", program.title, suffix)
}

/// Summary of a publishing run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub sheets: Vec<String>,
    pub rows_written: usize,
}

impl PublishReport {
    pub fn programs_published(&self) -> usize {
        self.sheets.len()
    }
}

pub struct Publisher<A: SheetsApi> {
    api: A,
    template_sheet_id: i64,
    title_cell: String,
    catalogue_cell: String,
    program_base_url: String,
}

impl<A: SheetsApi> Publisher<A> {
    pub fn new(api: A, config: &Config) -> Self {
        Self {
            api,
            template_sheet_id: config.template_sheet_id,
            title_cell: config.title_cell.clone(),
            catalogue_cell: config.catalogue_cell.clone(),
            program_base_url: config.program_base_url.clone(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Create and fill the sheet of one program
    pub async fn publish_program(
        &self,
        program: &Program,
        insert_index: i64,
        catalogue: &Catalogue,
    ) -> Result<String> {
        let name = sheet_name(program);
        log::info!(
            "Publishing program {} as '{}' at index {} ({} rows)",
            program.id,
            name,
            insert_index,
            catalogue.len()
        );

        self.api
            .duplicate_sheet(DuplicateSheetRequest {
                source_sheet_id: self.template_sheet_id,
                insert_sheet_index: insert_index,
                new_sheet_id: program.id,
                new_sheet_name: name.clone(),
            })
            .await
            .with_context(|| format!("Failed to create sheet '{}'", name))?;

        let title = formula::program_title_link(&self.program_base_url, program.id, &name);
        self.api
            .append_values(
                &a1_range(&name, &self.title_cell),
                vec![vec![serde_json::Value::from(title)]],
            )
            .await
            .with_context(|| format!("Failed to write title of sheet '{}'", name))?;

        self.api
            .append_values(&a1_range(&name, &self.catalogue_cell), catalogue.to_values())
            .await
            .with_context(|| format!("Failed to write catalogue of sheet '{}'", name))?;

        Ok(name)
    }

    /// Publish the given programs, or all of them, in database order.
    ///
    /// Every sheet is inserted at the sheet count read once up front, so each
    /// new sheet lands in front of the ones created before it. `on_published`
    /// is called with (position, total, sheet name) after each program.
    pub async fn publish_all<F>(
        &self,
        source: &ModuleSource,
        only_program: Option<i64>,
        mut on_published: F,
    ) -> Result<PublishReport>
    where
        F: FnMut(usize, usize, &str),
    {
        let spreadsheet = self.api.get_spreadsheet().await?;
        if spreadsheet.find_sheet_by_id(self.template_sheet_id).is_none() {
            log::warn!(
                "Template sheet {} not found in spreadsheet metadata",
                self.template_sheet_id
            );
        }
        let insert_index = spreadsheet.sheet_count() as i64;

        let programs = select_programs(source.list_programs().await?, only_program)?;

        let mut report = PublishReport::default();
        for (i, program) in programs.iter().enumerate() {
            let rows = source.module_rows(program.id, LabelStyle::Hyperlink).await?;
            let catalogue = build_catalogue(&rows);

            let name = self.publish_program(program, insert_index, &catalogue).await?;
            on_published(i + 1, programs.len(), &name);
            report.rows_written += catalogue.len();
            report.sheets.push(name);
        }

        log::info!(
            "Published {} programs, {} catalogue rows",
            report.programs_published(),
            report.rows_written
        );
        Ok(report)
    }
}

/// Narrow the program list to a single id when requested
pub fn select_programs(programs: Vec<Program>, only_program: Option<i64>) -> Result<Vec<Program>> {
    match only_program {
        None => Ok(programs),
        Some(id) => {
            let selected: Vec<Program> = programs.into_iter().filter(|p| p.id == id).collect();
            if selected.is_empty() {
                anyhow::bail!("Study program {} not found", id);
            }
            Ok(selected)
        }
    }
}
