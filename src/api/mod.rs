//! Google Sheets API access
//!
//! Only the three calls publishing needs: spreadsheet metadata, sheet
//! duplication and appending values. [`SheetsApi`] is the seam the publisher
//! depends on; [`SheetsClient`] implements it over HTTP.

pub mod client;
pub mod constants;
pub mod models;

use async_trait::async_trait;
use serde_json::Value;

pub use client::SheetsClient;
pub use models::{AppendValuesResponse, DuplicateSheetRequest, Spreadsheet};

#[async_trait]
pub trait SheetsApi: Send + Sync {
    /// Metadata of the target spreadsheet, including its sheets
    async fn get_spreadsheet(&self) -> anyhow::Result<Spreadsheet>;

    /// Duplicate a sheet via `batchUpdate`
    async fn duplicate_sheet(&self, request: DuplicateSheetRequest) -> anyhow::Result<()>;

    /// Append rows at an A1 range, entered as if typed by a user
    async fn append_values(
        &self,
        range: &str,
        values: Vec<Vec<Value>>,
    ) -> anyhow::Result<AppendValuesResponse>;
}
