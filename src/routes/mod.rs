use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::providers::{MetadataProvider, RatingsProvider},
};

pub mod catalog;
pub mod recommendations;
pub mod titles;

/// Shared application state
///
/// `ratings` is `None` when no ratings credential is configured.
pub struct AppState {
    pub metadata: Arc<dyn MetadataProvider>,
    pub ratings: Option<Arc<dyn RatingsProvider>>,
}

impl AppState {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        ratings: Option<Arc<dyn RatingsProvider>>,
    ) -> Self {
        Self { metadata, ratings }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(Arc::new(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/catalog", get(catalog::catalog))
        .route("/titles/search", get(titles::search))
        .route("/recommendations", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
