//! API implementation for the cardex HTTP server

use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    response::Json,
    routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

pub mod dto;
pub mod extract;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(extract::extract_data, health_check),
    components(schemas(dto::ExtractForm, dto::HealthResponse, dto::ErrorResponse)),
    tags(
        (name = "extraction", description = "Treatment-card field extraction"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "Cardex Extraction API",
        version = "1.0.0",
        description = "Upload a treatment-card image and receive the fields a hosted vision-language model read from it, as a JSON object.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the main router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_request_size;

    let api_router = Router::new()
        .route("/extract-data", post(extract::extract_data))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    let swagger_router = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new().merge(api_router).merge(swagger_router)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health", body = dto::HealthResponse)
    )
)]
async fn health_check(State(state): State<Arc<AppState>>) -> Json<dto::HealthResponse> {
    let client = state.extractor.client();

    Json(dto::HealthResponse {
        status: "OK".to_string(),
        version: cardex::VERSION.to_string(),
        provider: client.name().to_string(),
        model: client.model().to_string(),
        output_persistence: state.extractor.output().is_some(),
    })
}
