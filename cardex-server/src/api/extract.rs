//! Card extraction endpoint

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::Json,
};
use cardex::extraction::ExtractionResult;
use tracing::{debug, info};

use crate::{
    api::dto::{ErrorResponse, ExtractForm},
    error::{ServerError, ServerResult, bad_request},
    state::AppState,
};

/// Multipart field carrying the card image
pub const IMAGE_FIELD: &str = "image";

/// An uploaded file part
#[derive(Debug)]
struct ImageUpload {
    file_name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

/// Extract treatment-card fields from an uploaded image
#[utoipa::path(
    post,
    path = "/extract-data",
    tag = "extraction",
    request_body(content = ExtractForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Fields read from the card", body = serde_json::Value),
        (status = 400, description = "No image file provided", body = ErrorResponse),
        (status = 413, description = "Upload exceeds the configured body limit"),
        (status = 500, description = "Inference or model output failure", body = ErrorResponse)
    )
)]
pub async fn extract_data(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Json<ExtractionResult>> {
    // A body that is not multipart at all cannot carry the file either
    let Ok(mut multipart) = multipart else {
        return Err(ServerError::MissingImage);
    };

    let upload = read_image(&mut multipart)
        .await?
        .ok_or(ServerError::MissingImage)?;

    info!(
        file_name = %upload.file_name,
        content_type = upload.content_type.as_deref().unwrap_or("-"),
        bytes = upload.bytes.len(),
        "Received card image"
    );

    let result = state
        .extractor
        .extract(&upload.bytes, upload.content_type.as_deref())
        .await?;

    Ok(Json(result))
}

/// Find the first `image` part that is a file (has a filename).
///
/// A stream that breaks before such a part is found is treated as carrying no
/// image. Oversized bodies are still reported as such.
async fn read_image(multipart: &mut Multipart) -> ServerResult<Option<ImageUpload>> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                return Err(multipart_error(e));
            }
            Err(e) => {
                debug!("Multipart stream ended without an image: {}", e.body_text());
                return Ok(None);
            }
        };

        let is_image_file = field.name() == Some(IMAGE_FIELD) && field.file_name().is_some();
        if !is_image_file {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        return Ok(Some(ImageUpload {
            file_name,
            content_type,
            bytes,
        }));
    }
}

fn multipart_error(err: MultipartError) -> ServerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::PayloadTooLarge(err.body_text())
    } else {
        bad_request(&err.body_text())
    }
}
