//! HTTP route definitions

use crate::api::handlers;
use crate::api::models::*;
use crate::api::text_handlers;
use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lexiflow Gateway API",
        description = "AI-text detection, text generation and summarization backed by Gemini.",
        license(name = "MIT"),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        text_handlers::detect,
        text_handlers::generate,
        text_handlers::summarize,
        handlers::health_check,
    ),
    components(schemas(
        DetectionRequest,
        DetectionResult,
        GenerationRequest,
        GenerationResult,
        SummaryRequest,
        SummaryResult,
        ErrorBody,
        HealthResponse,
    )),
    tags(
        (name = "Detection", description = "AI-written text detection"),
        (name = "Generation", description = "Prompted text generation"),
        (name = "Summarization", description = "Text summarization"),
        (name = "Health", description = "Health and monitoring endpoints"),
    )
)]
pub struct ApiDoc;

/// Permissive CORS: any origin, `POST`/`OPTIONS`, `Content-Type`.
/// `OPTIONS` requests are answered here with an empty 200.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

/// Create the main application router
pub fn create_router(state: Arc<crate::AppState>) -> Router {
    let api_routes = Router::new()
        .route("/detect", post(text_handlers::detect))
        .route("/generate", post(text_handlers::generate))
        .route("/summarize", post(text_handlers::summarize));

    Router::new()
        // Health check endpoint
        .route("/health", get(handlers::health_check))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        // Add shared state
        .with_state(state)
        .layer(cors_layer())
        // Add tracing layer
        .layer(TraceLayer::new_for_http())
}
