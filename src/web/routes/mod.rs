//! Contains all the routes that this application can handle.

mod chat;
mod resets;
mod subscriptions;
mod tasks;

use crate::AppState;

use axum::{
    http::StatusCode,
    routing::{get, patch, post},
    Router,
};

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/subscriptions", get(subscriptions::list))
        .route(
            "/subscriptions/{id}",
            patch(subscriptions::update).delete(subscriptions::archive),
        )
        .route("/tasks", post(tasks::create))
        .route("/resets", get(resets::latest))
        .route("/chat", post(chat::reply))
        .route("/health-check", get(health_check))
        .with_state(app_state)
}
