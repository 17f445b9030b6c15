//! API error type and its JSON rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Message is required")]
    MissingMessage,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingMessage | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message_text() {
        assert_eq!(ApiError::MissingMessage.to_string(), "Message is required");
        assert_eq!(ApiError::MissingMessage.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_body_status() {
        let response = ApiError::InvalidBody("expected string".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
