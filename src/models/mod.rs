use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub mod candidate;
pub mod preferences;
pub mod streaming_service;

pub use candidate::Candidate;
pub use preferences::FilterCriteria;
pub use streaming_service::{Genre, StreamingService, GENRES, REGIONS, STREAMING_SERVICES};

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw movie record as returned by TMDB search, recommendation and discover endpoints
///
/// Every field is optional: upstream records are routinely incomplete, and the
/// candidate builder decides what is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiMovie {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

/// One page of a paged TMDB listing
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPage {
    #[serde(default)]
    pub results: Vec<ApiMovie>,
}

/// Response from GET /movie/{id}/external_ids
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExternalIds {
    #[serde(default)]
    pub imdb_id: Option<String>,
}

impl ExternalIds {
    /// IMDB id when present and non-empty
    pub fn imdb(&self) -> Option<&str> {
        self.imdb_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Response from GET /movie/{id}/watch/providers
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiWatchProviders {
    #[serde(default)]
    pub results: HashMap<String, ApiRegionProviders>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiRegionProviders {
    #[serde(default)]
    pub flatrate: Option<Vec<ApiProvider>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiProvider {
    #[serde(default)]
    pub provider_id: Option<i64>,
}

/// Flatrate (subscription) provider ids offering a title, per region code
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegionalAvailability {
    pub regions: HashMap<String, HashSet<i64>>,
}

impl RegionalAvailability {
    /// Whether any provider in `region` is one of `selected`
    pub fn available_on_any(&self, region: &str, selected: &HashSet<i64>) -> bool {
        self.regions
            .get(region)
            .map(|ids| !ids.is_disjoint(selected))
            .unwrap_or(false)
    }
}

impl From<ApiWatchProviders> for RegionalAvailability {
    fn from(response: ApiWatchProviders) -> Self {
        let regions = response
            .results
            .into_iter()
            .map(|(region, providers)| {
                let ids = providers
                    .flatrate
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|p| p.provider_id)
                    .collect();
                (region, ids)
            })
            .collect();

        Self { regions }
    }
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Lookup response from OMDb (`?i=<imdb id>`)
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbTitle {
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
}

impl OmdbTitle {
    /// Parsed IMDb rating; `None` for failed lookups and "N/A"
    pub fn rating(&self) -> Option<f64> {
        if self.response.as_deref() != Some("True") {
            return None;
        }
        self.imdb_rating.as_deref().and_then(parse_rating)
    }
}

/// Parses a rating field, treating blanks, "N/A" and non-numeric text as absent
pub fn parse_rating(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "N/A" {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
