use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    web::{
        data::{CreateTaskBody, TaskTitle},
        Collection, Error, RemoteOp, WebResult,
    },
    AppState,
};

#[tracing::instrument(name = "Creating a task", skip(app_state, body))]
pub async fn create(
    State(app_state): State<AppState>,
    Json(body): Json<CreateTaskBody>,
) -> WebResult<Json<Value>> {
    let db_id = app_state
        .collections
        .get(Collection::Tasks)
        .ok_or(Error::CollectionNotConfigured(Collection::Tasks))?;

    // An absent title and an empty one get the same fixed message.
    let title = TaskTitle::parse(body.title.unwrap_or_default())?;

    app_state
        .notion_client
        .create_page(db_id, &title.to_properties())
        .await
        .map_err(|source| Error::Remote {
            op: RemoteOp::CreateTask,
            source,
        })?;

    Ok(Json(json!({ "success": true, "title": title.as_ref() })))
}
