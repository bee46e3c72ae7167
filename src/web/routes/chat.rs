use axum::{body::Bytes, Json};
use serde_json::{json, Value};
use tracing::debug;

use crate::web::data::ChatBody;

const CANNED_REPLY: &str = "The chat assistant is not available yet.";

/// Fallback chat endpoint. Has no failure path: any body, including none at
/// all, gets the canned reply.
#[tracing::instrument(name = "Chat fallback", skip(body))]
pub async fn reply(body: Bytes) -> Json<Value> {
    let body: ChatBody = serde_json::from_slice(&body).unwrap_or_default();
    if let Some(message) = body.message {
        debug!("{:<20} - {}", "Chat message:", message);
    }

    Json(json!({ "reply": CANNED_REPLY }))
}
