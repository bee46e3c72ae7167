use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    notion::types::QueryRequest,
    web::{
        data::{DailyResetRecord, PROP_DATE},
        Collection, Error, RemoteOp, WebResult,
    },
    AppState,
};

const NO_RESETS_MESSAGE: &str = "No daily reset entries found.";

/// Fetches the single most recent entry by its date property. An empty
/// collection is not an error, the caller gets an explicit `null` item.
#[tracing::instrument(name = "Fetching the latest daily reset", skip(app_state))]
pub async fn latest(State(app_state): State<AppState>) -> WebResult<Json<Value>> {
    let db_id = app_state
        .collections
        .get(Collection::DailyResets)
        .ok_or(Error::CollectionNotConfigured(Collection::DailyResets))?;

    let pages = app_state
        .notion_client
        .query_database(db_id, &QueryRequest::most_recent(PROP_DATE))
        .await
        .map_err(|source| Error::Remote {
            op: RemoteOp::FetchDailyReset,
            source,
        })?;

    let response = match pages.first() {
        Some(page) => json!({ "item": DailyResetRecord::from_page(page) }),
        None => json!({ "item": null, "message": NO_RESETS_MESSAGE }),
    };

    Ok(Json(response))
}
