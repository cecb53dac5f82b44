//! TMDB metadata provider
//!
//! API Flow:
//! 1. Liked titles: /search/movie → first result
//! 2. Candidates: /movie/{id}/recommendations and /discover/movie, paged
//! 3. Enrichment and filtering: /movie/{id}/external_ids, /movie/{id}/watch/providers
//!
//! Authentication is the `api_key` query parameter. The key is checked per call so a
//! missing key surfaces as a configuration error instead of preventing startup.
use crate::{
    cached,
    cache::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{ApiMovie, ApiPage, ApiWatchProviders, ExternalIds, RegionalAvailability},
    services::providers::{DiscoverQuery, MetadataProvider},
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;

const LOOKUP_CACHE_TTL: u64 = 3600; // 1 hour
const LISTING_CACHE_TTL: u64 = 1800; // 30 minutes

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    cache: Cache,
}

impl TmdbProvider {
    pub fn new(
        cache: Cache,
        api_key: Option<String>,
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

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("Missing TMDB_API_KEY env var.".to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let api_key = self.api_key()?;
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .query(&[("api_key", api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "TMDB {} returned status {}: {}",
                path, status, body
            )));
        }

        Ok(response.json().await?)
    }

    async fn fetch_search(&self, title: &str) -> AppResult<Option<ApiMovie>> {
        let params = [
            ("query", title.to_string()),
            ("include_adult", "false".to_string()),
        ];
        let page: ApiPage = self.get_json("/search/movie", &params).await?;
        let hit = page.results.into_iter().next();

        tracing::info!(
            query = %title,
            found = hit.is_some(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(hit)
    }

    async fn fetch_external_ids(&self, movie_id: i64) -> AppResult<ExternalIds> {
        self.get_json(&format!("/movie/{}/external_ids", movie_id), &[])
            .await
    }

    async fn fetch_watch_providers(&self, movie_id: i64) -> AppResult<RegionalAvailability> {
        let response: ApiWatchProviders = self
            .get_json(&format!("/movie/{}/watch/providers", movie_id), &[])
            .await?;
        let availability = RegionalAvailability::from(response);

        tracing::debug!(
            movie_id,
            regions = availability.regions.len(),
            provider = "tmdb",
            "Watch providers fetched"
        );

        Ok(availability)
    }

    async fn fetch_recommendations(&self, movie_id: i64, pages: u32) -> AppResult<Vec<ApiMovie>> {
        let path = format!("/movie/{}/recommendations", movie_id);
        let mut movies = Vec::new();

        for page in 1..=pages {
            let data: ApiPage = self.get_json(&path, &[("page", page.to_string())]).await?;
            movies.extend(data.results);
        }

        tracing::info!(
            movie_id,
            pages,
            results = movies.len(),
            provider = "tmdb",
            "Recommendations fetched"
        );

        Ok(movies)
    }

    async fn fetch_discover(&self, query: &DiscoverQuery) -> AppResult<Vec<ApiMovie>> {
        let mut movies = Vec::new();

        for page in 1..=query.pages {
            let data: ApiPage = self.get_json("/discover/movie", &query.params(page)).await?;
            movies.extend(data.results);
        }

        tracing::info!(
            region = %query.region,
            genre_id = ?query.genre_id,
            providers = ?query.provider_ids,
            results = movies.len(),
            provider = "tmdb",
            "Discovery fetched"
        );

        Ok(movies)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_by_title(&self, title: &str) -> AppResult<Option<ApiMovie>> {
        cached!(
            self.cache,
            CacheKey::TitleSearch(title.to_string()),
            LOOKUP_CACHE_TTL,
            self.fetch_search(title)
        )
    }

    async fn external_ids(&self, movie_id: i64) -> AppResult<ExternalIds> {
        cached!(
            self.cache,
            CacheKey::ExternalIds(movie_id),
            LOOKUP_CACHE_TTL,
            self.fetch_external_ids(movie_id)
        )
    }

    async fn watch_providers(&self, movie_id: i64) -> AppResult<RegionalAvailability> {
        cached!(
            self.cache,
            CacheKey::WatchProviders(movie_id),
            LOOKUP_CACHE_TTL,
            self.fetch_watch_providers(movie_id)
        )
    }

    async fn recommendations_for(&self, movie_id: i64, pages: u32) -> AppResult<Vec<ApiMovie>> {
        cached!(
            self.cache,
            CacheKey::Recommendations { movie_id, pages },
            LISTING_CACHE_TTL,
            self.fetch_recommendations(movie_id, pages)
        )
    }

    async fn discover(&self, query: &DiscoverQuery) -> AppResult<Vec<ApiMovie>> {
        cached!(
            self.cache,
            CacheKey::Discover {
                region: query.region.clone(),
                genre_id: query.genre_id,
                provider_ids: query.provider_ids.clone(),
                pages: query.pages,
            },
            LISTING_CACHE_TTL,
            self.fetch_discover(query)
        )
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
