use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::song::SongError;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::response::MessageResponse;

/// Errors a handler can answer with. The message is what the client sees;
/// store details are logged, never returned.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify a service failure for the client, logging the detail.
    pub fn from_song(err: SongError, not_found: &'static str, failed: &'static str) -> Self {
        match err {
            SongError::NotFound => {
                info!(code = err.code(), "{}", not_found);
                ApiError::NotFound(not_found)
            }
            SongError::Internal(_) => Self::failed(err, failed),
        }
    }

    /// For operations that have no not-found outcome: any failure is a 500.
    pub fn failed(err: SongError, failed: &'static str) -> Self {
        error!(code = err.code(), error = %err, "{}", failed);
        ApiError::Internal(failed)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        MessageResponse::new(self.status(), self.to_string()).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        warn!(error = %err, "failed to decode request body");
        ApiError::BadRequest("Invalid request body".into())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        warn!(error = %rejection.body_text(), "failed to parse query string");
        ApiError::BadRequest("Invalid query string".into())
    }
}
