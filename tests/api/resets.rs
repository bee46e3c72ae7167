use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, method, path},
    Match, Mock, Request, ResponseTemplate,
};

use crate::helpers::{notion_query_response, TestApp};

/// Matches the query body asking for the single most recent entry by `Date`.
struct MostRecentQueryMatcher;

impl Match for MostRecentQueryMatcher {
    fn matches(&self, request: &Request) -> bool {
        let body: Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return false,
        };
        body["sorts"][0]["property"] == "Date"
            && body["sorts"][0]["direction"] == "descending"
            && body["page_size"] == 1
    }
}

#[tokio::test]
async fn latest_reset_ok() -> Result<()> {
    let app = TestApp::spawn().await?;

    let page = json!({
        "id": "reset-42",
        "properties": {
            "Name": {
                "type": "title",
                "title": [{ "plain_text": "Monday Reset", "text": { "content": "Monday Reset" } }]
            },
            "Biggest Win": {
                "type": "rich_text",
                "rich_text": [{ "plain_text": "Shipped the gateway" }]
            },
            "Reflection": {
                "type": "rich_text",
                "rich_text": [{ "plain_text": "Slow start, strong finish." }]
            },
            "Date": { "type": "date", "date": { "start": "2026-08-24" } }
        }
    });

    Mock::given(path(app.resets_query_path()))
        .and(method("POST"))
        .and(MostRecentQueryMatcher)
        .respond_with(notion_query_response(json!([page])))
        .expect(1)
        .mount(&app.notion_server)
        .await;

    let res = app.get_latest_reset().await?;
    assert_eq!(
        res.status(),
        StatusCode::OK,
        "Wrong response StatusCode: {}",
        res.status()
    );

    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({
            "item": {
                "id": "reset-42",
                "title": "Monday Reset",
                "biggestWin": "Shipped the gateway",
                "reflection": "Slow start, strong finish."
            }
        })
    );

    Ok(())
}

#[tokio::test]
async fn latest_reset_applies_defaults_for_sparse_pages() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path(app.resets_query_path()))
        .and(method("POST"))
        .respond_with(notion_query_response(json!([{ "id": "reset-1", "properties": {} }])))
        .expect(1)
        .mount(&app.notion_server)
        .await;

    let res = app.get_latest_reset().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(
        body["item"],
        json!({
            "id": "reset-1",
            "title": "Untitled Reset",
            "biggestWin": "Not specified.",
            "reflection": "No reflection recorded."
        })
    );

    Ok(())
}

#[tokio::test]
async fn latest_reset_without_entries_yields_null_item() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path(app.resets_query_path()))
        .and(method("POST"))
        .respond_with(notion_query_response(json!([])))
        .expect(1)
        .mount(&app.notion_server)
        .await;

    let res = app.get_latest_reset().await?;
    assert_eq!(
        res.status(),
        StatusCode::OK,
        "An empty database should not be an error"
    );

    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({
            "item": null,
            "message": "No daily reset entries found."
        })
    );

    Ok(())
}

#[tokio::test]
async fn latest_reset_without_configured_database_500() -> Result<()> {
    let app = TestApp::spawn_with(|config| {
        config.notion_config.collections.daily_resets = None;
    })
    .await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.notion_server)
        .await;

    let res = app.get_latest_reset().await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = res.json().await?;
    assert_eq!(body["error"]["message"], "Server configuration error.");

    Ok(())
}
