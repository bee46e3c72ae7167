use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use crate::notion;

pub type WebResult<T> = core::result::Result<T, Error>;

/// One of the three configured Notion databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum Collection {
    #[strum(serialize = "subscriptions")]
    Subscriptions,
    #[strum(serialize = "tasks")]
    Tasks,
    #[strum(serialize = "daily resets")]
    DailyResets,
}

/// The remote operation a handler was performing when it failed.
/// `Display` output ends up in the generic client message, keep it caller-friendly.
#[derive(Debug, Clone, Copy, derive_more::Display)]
pub enum RemoteOp {
    #[display("fetch subscriptions")]
    FetchSubscriptions,
    #[display("create task")]
    CreateTask,
    #[display("fetch daily reset")]
    FetchDailyReset,
    #[display("update subscription")]
    UpdateSubscription,
    #[display("archive subscription")]
    ArchiveSubscription,
}

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("notion database id for the '{}' collection is not configured", .0.as_ref())]
    CollectionNotConfigured(Collection),

    #[error("data parsing error: {0}")]
    DataParsing(#[from] super::data::DataParsingError),

    #[error("failed to {op}: {source}")]
    Remote {
        op: RemoteOp,
        source: notion::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::CollectionNotConfigured(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ConfigurationError)
            }
            Error::DataParsing(data_er) => {
                (StatusCode::BAD_REQUEST, InvalidInput(data_er.to_string()))
            }
            Error::Remote { op, .. } => (StatusCode::INTERNAL_SERVER_ERROR, RemoteFail(*op)),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// What the caller gets to see. The underlying cause stays in server logs.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("{_0}")]
    InvalidInput(String),
    #[display("Failed to {_0}.")]
    RemoteFail(RemoteOp),
    #[display("Server configuration error.")]
    ConfigurationError,
    #[display("Service Error!")]
    ServiceError,
}
