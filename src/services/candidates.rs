use std::sync::Arc;

use crate::{
    models::{candidate, ApiMovie, Candidate},
    services::providers::{MetadataProvider, RatingsProvider},
};

/// Turns raw metadata records into scored candidates
///
/// Secondary ratings are looked up only when a ratings provider is present. Whether the
/// lookup is attempted is decided by that presence; whether it succeeded only affects
/// the value, never the outcome of the build.
#[derive(Clone)]
pub struct CandidateBuilder {
    metadata: Arc<dyn MetadataProvider>,
    ratings: Option<Arc<dyn RatingsProvider>>,
}

impl CandidateBuilder {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        ratings: Option<Arc<dyn RatingsProvider>>,
    ) -> Self {
        Self { metadata, ratings }
    }

    /// Builds a candidate, or `None` when the record lacks an id or title
    pub async fn build(&self, movie: ApiMovie, like_bonus: f64) -> Option<Candidate> {
        if !candidate::is_usable(&movie) {
            tracing::debug!(id = ?movie.id, "Skipping record without id or title");
            return None;
        }

        let secondary = match movie.id {
            Some(id) => self.secondary_rating(id).await,
            None => None,
        };

        Candidate::from_record(movie, like_bonus, secondary)
    }

    /// Best-effort rating lookup; every failure degrades to `None`
    async fn secondary_rating(&self, movie_id: i64) -> Option<f64> {
        let ratings = self.ratings.as_ref()?;

        let external = match self.metadata.external_ids(movie_id).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(movie_id, error = %e, "External id lookup failed");
                return None;
            }
        };
        let imdb_id = external.imdb()?;

        match ratings.lookup_rating(imdb_id).await {
            Ok(rating) => rating,
            Err(e) => {
                tracing::warn!(
                    movie_id,
                    imdb_id = %imdb_id,
                    provider = ratings.name(),
                    error = %e,
                    "Rating lookup failed"
                );
                None
            }
        }
    }
}
