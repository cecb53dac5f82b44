use axum::Json;
use serde::Serialize;

use crate::models::{Genre, StreamingService, GENRES, REGIONS, STREAMING_SERVICES};

/// Options a client can offer for selection
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub services: &'static [StreamingService],
    pub genres: &'static [Genre],
    pub regions: &'static [&'static str],
}

/// Handler for the catalog endpoint
pub async fn catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        services: STREAMING_SERVICES,
        genres: GENRES,
        regions: REGIONS,
    })
}
