use std::sync::Arc;
use std::time::Duration;

use reelpick::{
    cache::Cache,
    config::Config,
    routes::{create_router, AppState},
    services::providers::{MetadataProvider, OmdbProvider, RatingsProvider, TmdbProvider},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reelpick=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let timeout = Duration::from_secs(config.http_timeout_secs);

    let cache = if config.cache_enabled {
        Cache::new()
    } else {
        Cache::disabled()
    };

    if config.tmdb_key().is_none() {
        tracing::warn!("TMDB_API_KEY is not set; metadata requests will fail until it is");
    }

    let metadata: Arc<dyn MetadataProvider> = Arc::new(TmdbProvider::new(
        cache.clone(),
        config.tmdb_key().map(str::to_string),
        config.tmdb_api_url.clone(),
        timeout,
    )?);

    let ratings: Option<Arc<dyn RatingsProvider>> = match config.omdb_key() {
        Some(key) => {
            let provider: Arc<dyn RatingsProvider> = Arc::new(OmdbProvider::new(
                cache.clone(),
                key.to_string(),
                config.omdb_api_url.clone(),
                timeout,
            )?);
            Some(provider)
        }
        None => {
            tracing::info!("OMDB_API_KEY is not set; secondary ratings disabled");
            None
        }
    };

    let app = create_router(AppState::new(metadata, ratings));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
