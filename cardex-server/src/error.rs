//! Error handling for the cardex server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cardex::CardexError;
use thiserror::Error;

pub use crate::api::dto::ErrorResponse;

/// Body text returned when the upload has no `image` file.
pub const MISSING_IMAGE_MESSAGE: &str = "No image file provided";

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// The request carried no `image` file part
    #[error("No image file provided")]
    MissingImage,

    /// Bad request error
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Upload exceeds the configured body limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Failure anywhere in the extraction pipeline
    #[error("{0}")]
    Extraction(#[from] CardexError),
}

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::MissingImage | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::MissingImage => "missing_image",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::PayloadTooLarge(_) => "payload_too_large",
            ServerError::Extraction(e) => e.kind(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_response = match &self {
            ServerError::MissingImage => ErrorResponse {
                error: MISSING_IMAGE_MESSAGE.to_string(),
                message: None,
                details: None,
            },
            _ => ErrorResponse {
                error: self.error_type().to_string(),
                message: Some(self.to_string()),
                details: None,
            },
        };

        if status.is_server_error() {
            tracing::error!(error_type = self.error_type(), "Request failed: {}", self);
        }

        (status, Json(error_response)).into_response()
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Helper function to create a bad request error
pub fn bad_request(message: &str) -> ServerError {
    ServerError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    async fn body_json(error: ServerError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_image_has_exact_body() {
        let (status, body) = body_json(ServerError::MissingImage).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No image file provided" }));
    }

    #[tokio::test]
    async fn extraction_errors_are_server_errors() {
        let (status, body) = body_json(ServerError::from(CardexError::Upstream {
            status: 401,
            message: "Invalid API Key".to_string(),
        }))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "upstream_error");
        assert_eq!(body["message"], "Inference API returned 401: Invalid API Key");
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = bad_request("stream ended early");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type(), "bad_request");
    }
}
