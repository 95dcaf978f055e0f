use super::constants::{self, headers};
use super::models::{
    AppendValuesResponse, BatchUpdateRequest, DuplicateSheetRequest, Request, Spreadsheet,
    ValueRange,
};
use super::SheetsApi;
use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Google Sheets v4 client bound to one spreadsheet
#[derive(Clone)]
pub struct SheetsClient {
    base_url: String,
    spreadsheet_id: String,
    http_client: reqwest::Client,
    access_token: String,
}

impl SheetsClient {
    pub fn new(
        base_url: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(headers::USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_custom_client(
            base_url,
            spreadsheet_id,
            access_token,
            http_client,
        ))
    }

    /// Create a new client with custom HTTP client configuration
    pub fn with_custom_client(
        base_url: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        access_token: impl Into<String>,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            spreadsheet_id: spreadsheet_id.into(),
            http_client,
            access_token: access_token.into(),
        }
    }

    /// Turn a non-success response into an error carrying the body
    async fn check(response: reqwest::Response, what: &str) -> anyhow::Result<reqwest::Response> {
        let status = response.status();
        log::debug!("{} status: {}", what, status);

        if status.is_success() {
            Ok(response)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("{} failed with HTTP {}: {}", what, status, error_text)
        }
    }
}

#[async_trait]
impl SheetsApi for SheetsClient {
    async fn get_spreadsheet(&self) -> anyhow::Result<Spreadsheet> {
        let url = constants::spreadsheet_endpoint(&self.base_url, &self.spreadsheet_id);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .header("Accept", headers::CONTENT_TYPE_JSON)
            .query(&[("fields", "spreadsheetId,sheets.properties")])
            .send()
            .await
            .context("Failed to fetch spreadsheet metadata")?;

        let response = Self::check(response, "Get spreadsheet").await?;
        response
            .json()
            .await
            .context("Failed to parse spreadsheet metadata")
    }

    async fn duplicate_sheet(&self, request: DuplicateSheetRequest) -> anyhow::Result<()> {
        let url = constants::batch_update_endpoint(&self.base_url, &self.spreadsheet_id);
        let name = request.new_sheet_name.clone();
        let body = BatchUpdateRequest {
            requests: vec![Request::DuplicateSheet(request)],
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to send duplicate request for sheet '{}'", name))?;

        Self::check(response, "Duplicate sheet").await?;
        log::info!("Created sheet '{}'", name);
        Ok(())
    }

    async fn append_values(
        &self,
        range: &str,
        values: Vec<Vec<Value>>,
    ) -> anyhow::Result<AppendValuesResponse> {
        let url = constants::append_endpoint(&self.base_url, &self.spreadsheet_id, range);
        let row_count = values.len();
        let body = ValueRange { values };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .query(&[("valueInputOption", constants::VALUE_INPUT_USER_ENTERED)])
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to append values to {}", range))?;

        let response = Self::check(response, "Append values").await?;
        log::debug!("Appended {} rows to {}", row_count, range);
        response
            .json()
            .await
            .context("Failed to parse append response")
    }
}
