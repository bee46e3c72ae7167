//! A small HTTP gateway in front of a Notion workspace.
//!
//! Three Notion databases back the REST surface: subscriptions, tasks and a
//! "daily reset" journal. Every endpoint validates its input, translates it
//! onto Notion's property schema and issues exactly one remote call; nothing
//! is cached or persisted locally.

pub mod app;
pub mod config;
mod error;
pub mod notion;
pub mod web;

pub use app::{App, AppState};
pub use error::{Error, Result};
pub use notion::NotionClient;
pub use web::serve;

use tracing_subscriber::EnvFilter;

/// Initializes a tracing subscriber for local development.
/// Defaults to the `debug` level when `RUST_LOG` is not set.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .without_time()
        .init();
}

/// Initializes a tracing subscriber for production.
/// Defaults to the `info` level when `RUST_LOG` is not set.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
