use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Envelope for responses that carry no data: a human readable message and
/// the numeric status repeated in the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    pub status: u16,
}

impl MessageResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { message: message.into(), status: status.as_u16() }
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
