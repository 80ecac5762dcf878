use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart form accepted by `POST /extract-data`
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ExtractForm {
    /// Treatment-card image (any image type; JPEG assumed when undeclared)
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

/// Health response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always "OK" when the server answers
    pub status: String,

    /// Server version
    pub version: String,

    /// Inference provider name
    pub provider: String,

    /// Model requested from the provider
    pub model: String,

    /// Whether extractions are written to the output file
    pub output_persistence: bool,
}

/// Error response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type, or the full message for a missing upload
    pub error: String,

    /// Error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Additional error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
