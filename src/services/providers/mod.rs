//! Upstream data provider abstraction
//!
//! The metadata provider (TMDB) supplies search, recommendations, discovery and
//! availability. The ratings provider (OMDb) is optional and only enriches candidates.

use crate::{
    error::AppResult,
    models::{ApiMovie, ExternalIds, RegionalAvailability},
};

pub mod omdb;
pub mod tmdb;

pub use omdb::OmdbProvider;
pub use tmdb::TmdbProvider;

/// Minimum vote count for discovery results; fewer votes make ratings too noisy
pub const MIN_VOTE_COUNT: u32 = 150;

/// Arguments of a discovery listing
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverQuery {
    pub region: String,
    pub genre_id: Option<i64>,
    /// Provider ids, sorted and deduplicated
    pub provider_ids: Vec<i64>,
    pub pages: u32,
}

impl DiscoverQuery {
    pub fn new(region: &str, genre_id: Option<i64>, provider_ids: &[i64], pages: u32) -> Self {
        let mut provider_ids = provider_ids.to_vec();
        provider_ids.sort_unstable();
        provider_ids.dedup();

        Self {
            region: region.to_string(),
            genre_id,
            provider_ids,
            pages,
        }
    }

    /// Query parameters for one page, leaving out absent optional constraints
    pub fn params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("sort_by", "popularity.desc".to_string()),
            ("watch_region", self.region.clone()),
            ("include_adult", "false".to_string()),
            ("vote_count.gte", MIN_VOTE_COUNT.to_string()),
            ("page", page.to_string()),
        ];

        if !self.provider_ids.is_empty() {
            let joined = self
                .provider_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join("|");
            params.push(("with_watch_providers", joined));
        }

        if let Some(genre_id) = self.genre_id {
            params.push(("with_genres", genre_id.to_string()));
        }

        params
    }
}

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Best (first-ranked) match for a free-text title, if any
    async fn search_by_title(&self, title: &str) -> AppResult<Option<ApiMovie>>;

    /// Cross-reference identifiers for a catalog id
    async fn external_ids(&self, movie_id: i64) -> AppResult<ExternalIds>;

    /// Flatrate providers per region for a catalog id
    async fn watch_providers(&self, movie_id: i64) -> AppResult<RegionalAvailability>;

    /// Related titles, `pages` pages concatenated in provider order
    async fn recommendations_for(&self, movie_id: i64, pages: u32) -> AppResult<Vec<ApiMovie>>;

    /// Popularity-sorted discovery listing, pages concatenated in order
    async fn discover(&self, query: &DiscoverQuery) -> AppResult<Vec<ApiMovie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Trait for supplemental rating providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingsProvider: Send + Sync {
    /// Rating (0-10) for an IMDB id; `Ok(None)` when the provider has no usable value
    async fn lookup_rating(&self, imdb_id: &str) -> AppResult<Option<f64>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
