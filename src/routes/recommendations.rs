use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{
        preferences::{
            UserPreferences, DEFAULT_MIN_SECONDARY_RATING, DEFAULT_REGION, DEFAULT_RESULT_COUNT,
            MAX_RESULT_COUNT,
        },
        streaming_service::supported_region,
        Candidate, FilterCriteria, Genre, StreamingService,
    },
    routes::AppState,
    services::{links::ReferenceLinks, recommendations},
};

pub const NO_MATCHES_WARNING: &str =
    "No matches found. Try selecting fewer services or lowering the IMDb minimum.";
pub const RATINGS_DISABLED_WARNING: &str =
    "IMDb minimum not applied: no OMDb key is configured.";
pub const PLACEHOLDER_WARNING: &str =
    "Rotten Tomatoes and Letterboxd minimums are placeholders and were not applied.";

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub liked_titles: Vec<String>,
    /// Service display names, e.g. "Netflix"
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// Genre display name; omitted means any genre
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub min_secondary_rating: Option<f64>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub min_rotten_tomatoes: Option<u8>,
    #[serde(default)]
    pub min_letterboxd: Option<f64>,
}

/// A ranked recommendation with its outbound links
#[derive(Debug, Serialize)]
pub struct RecommendationView {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub links: ReferenceLinks,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub results: Vec<RecommendationView>,
    pub warnings: Vec<String>,
}

impl RecommendationRequest {
    /// Validates the request and resolves display names to catalog ids
    pub fn into_preferences(self) -> AppResult<(UserPreferences, Vec<&'static str>)> {
        let mut services: Vec<&'static StreamingService> = Vec::new();
        for name in &self.services {
            let service = StreamingService::by_name(name).ok_or_else(|| {
                AppError::InvalidInput(format!("Unknown streaming service: {}", name))
            })?;
            if !services.contains(&service) {
                services.push(service);
            }
        }

        let region = match self.region.as_deref() {
            Some(code) => supported_region(code)
                .ok_or_else(|| AppError::InvalidInput(format!("Unsupported region: {}", code)))?,
            None => DEFAULT_REGION,
        };

        let genre_id = match self.genre.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(name) if name.eq_ignore_ascii_case("(any)") => None,
            Some(name) => Some(
                Genre::by_name(name)
                    .ok_or_else(|| AppError::InvalidInput(format!("Unknown genre: {}", name)))?
                    .genre_id,
            ),
        };

        let min_secondary_rating = self
            .min_secondary_rating
            .unwrap_or(DEFAULT_MIN_SECONDARY_RATING);
        if !(0.0..=10.0).contains(&min_secondary_rating) {
            return Err(AppError::InvalidInput(
                "min_secondary_rating must be between 0 and 10".to_string(),
            ));
        }

        let limit = self.count.unwrap_or(DEFAULT_RESULT_COUNT);
        if limit == 0 || limit > MAX_RESULT_COUNT {
            return Err(AppError::InvalidInput(format!(
                "count must be between 1 and {}",
                MAX_RESULT_COUNT
            )));
        }

        let criteria = FilterCriteria {
            provider_ids: services.iter().map(|s| s.provider_id).collect(),
            region: region.to_string(),
            genre_id,
            min_secondary_rating,
            limit,
        };

        let mut preferences = UserPreferences::new(criteria);
        for title in &self.liked_titles {
            preferences.add_liked_title(title);
        }

        let names = services.iter().map(|s| s.name).collect();
        Ok((preferences, names))
    }

    fn uses_placeholder_thresholds(&self) -> bool {
        self.min_rotten_tomatoes.is_some() || self.min_letterboxd.is_some()
    }
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let placeholders = request.uses_placeholder_thresholds();
    let (preferences, service_names) = request.into_preferences()?;

    tracing::info!(
        request_id = %request_id,
        liked = preferences.liked_titles.len(),
        services = ?service_names,
        "Processing recommendation request"
    );

    let ranked = recommendations::get_recommendations(
        state.metadata.clone(),
        state.ratings.clone(),
        &preferences,
    )
    .await?;

    let mut warnings = Vec::new();
    if ranked.is_empty() {
        warnings.push(NO_MATCHES_WARNING.to_string());
    }
    if state.ratings.is_none() {
        warnings.push(RATINGS_DISABLED_WARNING.to_string());
    }
    if placeholders {
        warnings.push(PLACEHOLDER_WARNING.to_string());
    }

    let results = ranked
        .into_iter()
        .map(|candidate| RecommendationView {
            links: ReferenceLinks::for_title(&candidate.title, &service_names),
            candidate,
        })
        .collect::<Vec<_>>();

    tracing::info!(
        request_id = %request_id,
        results = results.len(),
        warnings = warnings.len(),
        "Recommendations completed"
    );

    Ok(Json(RecommendationResponse { results, warnings }))
}
