//! Sheets HTTP client requests against a local stand-in for the Sheets API

mod common;

use anyhow::Context;
use axum::http::Method;
use common::{FakeEndpoint, local_http_client};
use module_catalogue::api::constants::a1_range;
use module_catalogue::api::{DuplicateSheetRequest, SheetsApi, SheetsClient};
use module_catalogue::auth::{FileTokenStore, TokenStore};
use module_catalogue::config::Config;
use serde_json::{Value, json};

fn client(endpoint: &FakeEndpoint) -> SheetsClient {
    SheetsClient::with_custom_client(
        endpoint.base_url.clone(),
        "sheet-1",
        "test-token",
        local_http_client(),
    )
}

#[tokio::test]
async fn test_get_spreadsheet() {
    let endpoint = FakeEndpoint::start(
        200,
        r#"{"spreadsheetId": "sheet-1", "sheets": [
            {"properties": {"sheetId": 0, "title": "Übersicht", "index": 0}},
            {"properties": {"sheetId": 1822551224, "title": "Vorlage", "index": 1}}
        ]}"#,
    )
    .await;

    let spreadsheet = client(&endpoint).get_spreadsheet().await.unwrap();
    assert_eq!(spreadsheet.sheet_count(), 2);
    assert!(spreadsheet.find_sheet_by_id(1822551224).is_some());

    let request = endpoint.single_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/sheet-1");
    assert!(request.query.starts_with("fields="));
    assert_eq!(request.authorization.as_deref(), Some("Bearer test-token"));
}

#[tokio::test]
async fn test_duplicate_sheet_sends_batch_update() {
    let endpoint = FakeEndpoint::start(200, r#"{"spreadsheetId": "sheet-1", "replies": [{}]}"#).await;

    client(&endpoint)
        .duplicate_sheet(DuplicateSheetRequest {
            source_sheet_id: 1822551224,
            insert_sheet_index: 3,
            new_sheet_id: 31,
            new_sheet_name: "Informatik Science".to_string(),
        })
        .await
        .unwrap();

    let request = endpoint.single_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/sheet-1:batchUpdate");
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(
        body,
        json!({
            "requests": [{
                "duplicateSheet": {
                    "sourceSheetId": 1822551224,
                    "insertSheetIndex": 3,
                    "newSheetId": 31,
                    "newSheetName": "Informatik Science"
                }
            }]
        })
    );
}

#[tokio::test]
async fn test_append_values_user_entered() {
    let endpoint = FakeEndpoint::start(
        200,
        r#"{"spreadsheetId": "sheet-1", "updates": {"updatedRange": "'Informatik Science'!I4:P5", "updatedRows": 2}}"#,
    )
    .await;
    let values = vec![
        vec![json!("1: Pflichtbereich\n[aus Informatik]")],
        vec![json!(""), json!(1), json!("=HYPERLINK(\"u\"; \"Compilerbau\")")],
    ];

    let response = client(&endpoint)
        .append_values(&a1_range("Informatik Science", "I4"), values.clone())
        .await
        .unwrap();
    assert_eq!(response.updates.and_then(|u| u.updated_rows), Some(2));

    let request = endpoint.single_request();
    assert_eq!(request.method, Method::POST);
    assert!(
        request
            .path
            .ends_with("/values/%27Informatik%20Science%27%21I4:append"),
        "unexpected path {}",
        request.path
    );
    assert_eq!(request.query, "valueInputOption=USER_ENTERED");
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, json!({ "values": values }));
}

#[tokio::test]
async fn test_server_error_carries_body() {
    let endpoint = FakeEndpoint::start(
        500,
        r#"{"error": {"code": 500, "message": "Internal error encountered."}}"#,
    )
    .await;

    let err = client(&endpoint)
        .append_values("Informatik!K2", vec![vec![json!("x")]])
        .await
        .unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("500"), "{}", message);
    assert!(message.contains("Internal error encountered."), "{}", message);
}

#[tokio::test]
async fn test_duplicate_rejected_is_an_error() {
    let endpoint = FakeEndpoint::start(
        400,
        r#"{"error": {"code": 400, "message": "A sheet with the name \"Informatik\" already exists."}}"#,
    )
    .await;

    let err = client(&endpoint)
        .duplicate_sheet(DuplicateSheetRequest {
            source_sheet_id: 1,
            insert_sheet_index: 0,
            new_sheet_id: 31,
            new_sheet_name: "Informatik".to_string(),
        })
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("already exists"));
}

#[tokio::test]
#[ignore] // Requires MODULE_CATALOGUE_SPREADSHEET_ID and a token from `auth login`
async fn test_get_configured_spreadsheet() -> anyhow::Result<()> {
    let config = Config::load(None).await?;
    config.validate_for_publish()?;

    let token = FileTokenStore::new(config.token_cache_path.clone())
        .load()?
        .context("No cached token, run `module-catalogue auth login` first")?;
    let client = SheetsClient::new(
        config.sheets_base_url.clone(),
        config.spreadsheet_id.clone(),
        token.access_token,
    )?;

    let spreadsheet = client.get_spreadsheet().await?;
    assert!(spreadsheet.find_sheet_by_id(config.template_sheet_id).is_some());
    Ok(())
}
