//! Stand-in for the Sheets API that only logs what would be sent

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

use crate::api::SheetsApi;
use crate::api::models::{
    AppendValuesResponse, DuplicateSheetRequest, Sheet, SheetProperties, Spreadsheet,
    UpdateValuesResponse,
};

pub struct DryRunSheets {
    spreadsheet_id: String,
    template_sheet_id: i64,
    created: Mutex<Vec<String>>,
}

impl DryRunSheets {
    pub fn new(spreadsheet_id: impl Into<String>, template_sheet_id: i64) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            template_sheet_id,
            created: Mutex::new(Vec::new()),
        }
    }

    /// Names of the sheets that would have been created
    pub fn created_sheets(&self) -> Vec<String> {
        self.created.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SheetsApi for DryRunSheets {
    async fn get_spreadsheet(&self) -> anyhow::Result<Spreadsheet> {
        Ok(Spreadsheet {
            spreadsheet_id: self.spreadsheet_id.clone(),
            sheets: vec![Sheet {
                properties: SheetProperties {
                    sheet_id: self.template_sheet_id,
                    title: "template".to_string(),
                    index: 0,
                },
            }],
        })
    }

    async fn duplicate_sheet(&self, request: DuplicateSheetRequest) -> anyhow::Result<()> {
        log::info!(
            "[dry run] duplicate sheet {} as '{}' (id {}) at index {}",
            request.source_sheet_id,
            request.new_sheet_name,
            request.new_sheet_id,
            request.insert_sheet_index
        );
        self.created
            .lock()
            .map_err(|_| anyhow::anyhow!("Dry run state lock poisoned"))?
            .push(request.new_sheet_name);
        Ok(())
    }

    async fn append_values(
        &self,
        range: &str,
        values: Vec<Vec<Value>>,
    ) -> anyhow::Result<AppendValuesResponse> {
        log::info!("[dry run] append {} rows at {}", values.len(), range);
        Ok(AppendValuesResponse {
            table_range: None,
            updates: Some(UpdateValuesResponse {
                updated_range: Some(range.to_string()),
                updated_rows: Some(values.len() as i64),
                updated_cells: Some(values.iter().map(|r| r.len() as i64).sum()),
            }),
        })
    }
}
