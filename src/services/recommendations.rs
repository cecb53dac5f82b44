use std::sync::Arc;
use std::time::Instant;

use crate::{
    error::AppResult,
    models::{candidate::LIKE_BONUS, preferences::UserPreferences, ApiMovie, Candidate},
    services::{
        candidates::CandidateBuilder,
        filter::AvailabilityFilter,
        pool::CandidatePool,
        providers::{DiscoverQuery, MetadataProvider, RatingsProvider},
        ranker,
    },
};

/// Recommendation pages fetched per liked title
pub const RECOMMENDATION_PAGES: u32 = 2;

/// Discovery pages fetched per run
pub const DISCOVER_PAGES: u32 = 3;

/// Generates ranked watch recommendations
///
/// 1. Resolve liked titles to catalog ids (titles without a match are skipped)
/// 2. Pool each liked title's recommendations with the like bonus
/// 3. Pool a broad discovery listing without bonus to fill gaps
/// 4. Drop candidates unavailable on the selected services or rated too low
/// 5. Rank by score and keep the requested number
///
/// Upstream calls are made one at a time. Failed searches, listings and availability
/// lookups abort the run; failed rating lookups only leave the rating empty.
pub async fn get_recommendations(
    metadata: Arc<dyn MetadataProvider>,
    ratings: Option<Arc<dyn RatingsProvider>>,
    preferences: &UserPreferences,
) -> AppResult<Vec<Candidate>> {
    let start = Instant::now();
    let criteria = &preferences.criteria;
    let ratings_configured = ratings.is_some();
    let builder = CandidateBuilder::new(metadata.clone(), ratings);

    tracing::info!(
        metadata = metadata.name(),
        liked = preferences.liked_titles.len(),
        services = criteria.provider_ids.len(),
        region = %criteria.region,
        genre_id = ?criteria.genre_id,
        ratings_configured,
        "Starting recommendation run"
    );

    // 1. Resolve liked titles
    let mut liked_ids = Vec::new();
    for title in &preferences.liked_titles {
        match metadata.search_by_title(title).await? {
            Some(hit) => match hit.id {
                Some(id) => liked_ids.push(id),
                None => tracing::warn!(title = %title, "Search hit without an id"),
            },
            None => tracing::info!(title = %title, "No catalog match for liked title"),
        }
    }

    let mut pool = CandidatePool::new();

    // 2. Personalized candidates
    for movie_id in &liked_ids {
        let movies = metadata
            .recommendations_for(*movie_id, RECOMMENDATION_PAGES)
            .await?;
        add_to_pool(&mut pool, &builder, movies, LIKE_BONUS).await;
    }

    let personalized = pool.len();

    // 3. Broad discovery
    let query = DiscoverQuery::new(
        &criteria.region,
        criteria.genre_id,
        &criteria.sorted_provider_ids(),
        DISCOVER_PAGES,
    );
    let discovered = metadata.discover(&query).await?;
    add_to_pool(&mut pool, &builder, discovered, 0.0).await;

    tracing::info!(
        resolved_likes = liked_ids.len(),
        personalized,
        pooled = pool.len(),
        "Candidate pool built"
    );

    // 4. Filter
    let filter = AvailabilityFilter::new(metadata, ratings_configured);
    let kept = filter.apply(pool.into_candidates(), criteria).await?;

    // 5. Rank
    let ranked = ranker::rank(kept, criteria.limit);

    tracing::info!(
        results = ranked.len(),
        processing_time_ms = start.elapsed().as_millis(),
        "Recommendation run completed"
    );

    Ok(ranked)
}

async fn add_to_pool(
    pool: &mut CandidatePool,
    builder: &CandidateBuilder,
    movies: Vec<ApiMovie>,
    like_bonus: f64,
) {
    for movie in movies {
        if let Some(candidate) = builder.build(movie, like_bonus).await {
            pool.insert(candidate);
        }
    }
}
