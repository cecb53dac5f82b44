//! OMDb ratings provider
//!
//! Looks up the IMDb rating for an IMDB id. Only constructed when an OMDb key is
//! configured; its absence disables rating enrichment and the rating filter.
use crate::{
    cached,
    cache::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::OmdbTitle,
    services::providers::RatingsProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const RATING_CACHE_TTL: u64 = 3600; // 1 hour

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Cache,
}

impl OmdbProvider {
    pub fn new(
        cache: Cache,
        api_key: String,
        api_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            cache,
        })
    }

    async fn fetch_rating(&self, imdb_id: &str) -> AppResult<Option<f64>> {
        let url = format!("{}/", self.api_url.trim_end_matches('/'));
        let response = self
            .http_client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str()), ("i", imdb_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "OMDb returned status {} for {}",
                response.status(),
                imdb_id
            )));
        }

        let title: OmdbTitle = response.json().await?;
        let rating = title.rating();

        tracing::debug!(
            imdb_id = %imdb_id,
            rating = ?rating,
            provider = "omdb",
            "Rating fetched"
        );

        Ok(rating)
    }
}

#[async_trait::async_trait]
impl RatingsProvider for OmdbProvider {
    async fn lookup_rating(&self, imdb_id: &str) -> AppResult<Option<f64>> {
        cached!(
            self.cache,
            CacheKey::Rating(imdb_id.to_string()),
            RATING_CACHE_TTL,
            self.fetch_rating(imdb_id)
        )
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
