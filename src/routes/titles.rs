use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{error::AppResult, models::Candidate, routes::AppState, services::title_search};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(rename = "match")]
    pub best_match: Option<Candidate>,
}

/// Handler for title search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    let best_match = title_search::search_title(state.metadata.clone(), &params.q).await?;
    Ok(Json(SearchResponse { best_match }))
}
