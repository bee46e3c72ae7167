use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{matchers::any, Mock, ResponseTemplate};

use crate::helpers::TestApp;

const EXPECTED_REPLY: &str = "The chat assistant is not available yet.";

#[tokio::test]
async fn chat_returns_the_canned_reply() -> Result<()> {
    let app = TestApp::spawn().await?;

    // The chat endpoint never talks to Notion.
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.notion_server)
        .await;

    let res = app
        .post_chat(&json!({ "message": "What should I do today?" }))
        .await?;

    assert_eq!(
        res.status(),
        StatusCode::OK,
        "Wrong response StatusCode: {}",
        res.status()
    );

    let body: Value = res.json().await?;
    assert_eq!(body, json!({ "reply": EXPECTED_REPLY }));

    Ok(())
}

#[tokio::test]
async fn chat_tolerates_absent_or_malformed_bodies() -> Result<()> {
    let app = TestApp::spawn().await?;

    let cases = [
        (None, "no body"),
        (Some("definitely not json"), "malformed body"),
        (Some(r#"{"unrelated": true}"#), "unrelated json"),
    ];

    for (raw_body, description) in cases {
        let mut req = app
            .http_client
            .post(format!("http://{}/chat", app.addr));
        if let Some(raw_body) = raw_body {
            req = req.body(raw_body);
        }
        let res = req.send().await?;

        assert_eq!(
            res.status(),
            StatusCode::OK,
            "Expected a canned reply for: {description}"
        );

        let body: Value = res.json().await?;
        assert_eq!(
            body,
            json!({ "reply": EXPECTED_REPLY }),
            "Wrong reply for: {description}"
        );
    }

    Ok(())
}
