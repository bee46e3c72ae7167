use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    notion::types::QueryRequest,
    web::{
        data::{
            ArchiveSubscriptionBody, DataParsingError, SubscriptionRecord, UpdateSubscriptionBody,
        },
        Collection, Error, RemoteOp, WebResult,
    },
    AppState,
};

const DEFAULT_ARCHIVE_REASON: &str = "No reason provided";

#[tracing::instrument(name = "Listing subscriptions", skip(app_state))]
pub async fn list(State(app_state): State<AppState>) -> WebResult<Json<Value>> {
    let db_id = app_state
        .collections
        .get(Collection::Subscriptions)
        .ok_or(Error::CollectionNotConfigured(Collection::Subscriptions))?;

    let pages = app_state
        .notion_client
        .query_database(db_id, &QueryRequest::default())
        .await
        .map_err(|source| Error::Remote {
            op: RemoteOp::FetchSubscriptions,
            source,
        })?;

    let items: Vec<SubscriptionRecord> =
        pages.iter().map(SubscriptionRecord::from_page).collect();

    Ok(Json(json!({ "items": items })))
}

/// Applies the recognized subset of `updates` to the page and echoes that
/// subset back. Repeating the same request issues another remote call, there
/// is no deduplication.
#[tracing::instrument(
    name = "Updating a subscription",
    skip(app_state, body),
    fields(page_id = %id)
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateSubscriptionBody>,
) -> WebResult<Json<Value>> {
    let updates = body.updates.ok_or(DataParsingError::UpdatesMissing)?;
    let properties = updates.to_properties()?;

    app_state
        .notion_client
        .update_page(&id, &properties)
        .await
        .map_err(|source| Error::Remote {
            op: RemoteOp::UpdateSubscription,
            source,
        })?;

    Ok(Json(json!({ "success": true, "id": id, "updates": updates })))
}

/// Soft delete: flips the `archived` flag on the page and nothing else.
#[tracing::instrument(
    name = "Archiving a subscription",
    skip(app_state, body),
    fields(page_id = %id)
)]
pub async fn archive(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> WebResult<Json<Value>> {
    // DELETE bodies are frequently absent, tolerate malformed ones as well.
    let body: ArchiveSubscriptionBody = serde_json::from_slice(&body).unwrap_or_default();
    let reason = body
        .reason
        .unwrap_or_else(|| DEFAULT_ARCHIVE_REASON.to_owned());

    app_state
        .notion_client
        .archive_page(&id)
        .await
        .map_err(|source| Error::Remote {
            op: RemoteOp::ArchiveSubscription,
            source,
        })?;

    // TODO: persist the reason once the subscriptions database grows a
    // "Cancellation Reason" property. Until then it is only logged here and
    // echoed back to the caller.
    info!("{:<20} - {}", "Archive reason:", reason);

    Ok(Json(json!({ "success": true, "id": id, "reason": reason })))
}
