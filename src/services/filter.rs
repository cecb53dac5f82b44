use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Candidate, FilterCriteria},
    services::providers::MetadataProvider,
};

/// Drops candidates that are unavailable on the selected services or rated too low
///
/// Availability is only checked when services were selected. The rating floor only
/// applies when a ratings provider is configured and the candidate actually has a
/// secondary rating; missing data never removes a candidate.
pub struct AvailabilityFilter {
    metadata: Arc<dyn MetadataProvider>,
    ratings_configured: bool,
}

impl AvailabilityFilter {
    pub fn new(metadata: Arc<dyn MetadataProvider>, ratings_configured: bool) -> Self {
        Self {
            metadata,
            ratings_configured,
        }
    }

    pub async fn apply(
        &self,
        candidates: Vec<Candidate>,
        criteria: &FilterCriteria,
    ) -> AppResult<Vec<Candidate>> {
        let total = candidates.len();
        let mut unavailable = 0;
        let mut below_minimum = 0;
        let mut kept = Vec::with_capacity(total);

        for candidate in candidates {
            if !self.is_available(&candidate, criteria).await? {
                unavailable += 1;
                continue;
            }

            if self.below_rating_minimum(&candidate, criteria) {
                below_minimum += 1;
                continue;
            }

            kept.push(candidate);
        }

        tracing::info!(
            total,
            kept = kept.len(),
            unavailable,
            below_minimum,
            region = %criteria.region,
            "Candidates filtered"
        );

        Ok(kept)
    }

    async fn is_available(
        &self,
        candidate: &Candidate,
        criteria: &FilterCriteria,
    ) -> AppResult<bool> {
        if criteria.provider_ids.is_empty() {
            return Ok(true);
        }

        let availability = self.metadata.watch_providers(candidate.id).await?;
        Ok(availability.available_on_any(&criteria.region, &criteria.provider_ids))
    }

    fn below_rating_minimum(&self, candidate: &Candidate, criteria: &FilterCriteria) -> bool {
        self.ratings_configured
            && candidate
                .secondary_rating
                .is_some_and(|rating| rating < criteria.min_secondary_rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{parse_rating, RegionalAvailability};
    use crate::services::providers::MockMetadataProvider;
    use std::collections::{HashMap, HashSet};

    fn candidate(id: i64, secondary_rating: Option<f64>) -> Candidate {
        Candidate {
            id,
            title: format!("Movie {}", id),
            year: None,
            overview: String::new(),
            poster_url: None,
            primary_rating: Some(7.0),
            secondary_rating,
            score: 7.0,
        }
    }

    fn availability(region: &str, ids: &[i64]) -> RegionalAvailability {
        RegionalAvailability {
            regions: HashMap::from([(region.to_string(), ids.iter().copied().collect())]),
        }
    }

    fn criteria(provider_ids: &[i64]) -> FilterCriteria {
        FilterCriteria {
            provider_ids: provider_ids.iter().copied().collect::<HashSet<_>>(),
            region: "US".to_string(),
            min_secondary_rating: 6.5,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_no_selected_services_keeps_everything() {
        let mut metadata = MockMetadataProvider::new();
        metadata.expect_watch_providers().times(0);

        let filter = AvailabilityFilter::new(Arc::new(metadata), false);
        let input = vec![candidate(1, None), candidate(2, None), candidate(3, None)];
        let kept = filter.apply(input.clone(), &criteria(&[])).await.unwrap();

        assert_eq!(kept, input);
    }

    #[tokio::test]
    async fn test_keeps_titles_on_selected_services() {
        let mut metadata = MockMetadataProvider::new();
        metadata
            .expect_watch_providers()
            .returning(|id| match id {
                1 => Ok(availability("US", &[8, 15])),
                2 => Ok(availability("US", &[337])),
                _ => Ok(availability("GB", &[8])),
            });

        let filter = AvailabilityFilter::new(Arc::new(metadata), false);
        let input = vec![candidate(1, None), candidate(2, None), candidate(3, None)];
        let kept = filter.apply(input, &criteria(&[8, 9])).await.unwrap();

        let ids: Vec<i64> = kept.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn test_watch_provider_failure_propagates() {
        let mut metadata = MockMetadataProvider::new();
        metadata
            .expect_watch_providers()
            .returning(|_| Err(AppError::Upstream("status 503".to_string())));

        let filter = AvailabilityFilter::new(Arc::new(metadata), false);
        let result = filter.apply(vec![candidate(1, None)], &criteria(&[8])).await;

        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_rating_floor_applies_when_configured() {
        let metadata = MockMetadataProvider::new();
        let filter = AvailabilityFilter::new(Arc::new(metadata), true);

        let input = vec![
            candidate(1, Some(5.9)),
            candidate(2, Some(6.5)),
            candidate(3, Some(8.0)),
            candidate(4, None),
        ];
        let kept = filter.apply(input, &criteria(&[])).await.unwrap();

        let ids: Vec<i64> = kept.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn test_rating_floor_ignored_without_ratings_provider() {
        let metadata = MockMetadataProvider::new();
        let filter = AvailabilityFilter::new(Arc::new(metadata), false);

        let input = vec![candidate(1, Some(1.0)), candidate(2, Some(3.0))];
        let kept = filter.apply(input.clone(), &criteria(&[])).await.unwrap();

        assert_eq!(kept, input);
    }

    #[tokio::test]
    async fn test_not_available_rating_is_never_rejected() {
        let metadata = MockMetadataProvider::new();
        let filter = AvailabilityFilter::new(Arc::new(metadata), true);

        let rating = parse_rating("N/A");
        assert_eq!(rating, None);

        let input = vec![candidate(1, rating)];
        let strict = FilterCriteria {
            min_secondary_rating: 10.0,
            ..criteria(&[])
        };
        let kept = filter.apply(input.clone(), &strict).await.unwrap();

        assert_eq!(kept, input);
    }
}
