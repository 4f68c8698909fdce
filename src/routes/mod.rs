use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_header, UuidRequestId},
    models::Language,
    services::RecommendationService,
};

pub mod favorites;
pub mod form;
pub mod recommendations;

/// Shared state handed to every handler
pub struct AppState {
    pub service: RecommendationService,
    /// Metadata language when a request does not name one
    pub default_language: Language,
}

impl AppState {
    pub fn new(service: RecommendationService, default_language: Language) -> Self {
        Self {
            service,
            default_language,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id_header(), UuidRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(PropagateRequestIdLayer::new(request_id_header())),
        )
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/form", get(form::form_options))
        .route(
            "/recommendations",
            get(recommendations::last).post(recommendations::recommend),
        )
        .route("/favorites", get(favorites::list).post(favorites::add))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
