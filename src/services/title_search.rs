use crate::{
    error::{AppError, AppResult},
    models::Candidate,
    services::providers::MetadataProvider,
};
use std::sync::Arc;

/// Service function for title lookup
///
/// Resolves a free-text title to its best catalog match, normalized the same way as a
/// recommendation (no like bonus, no rating enrichment).
pub async fn search_title(
    provider: Arc<dyn MetadataProvider>,
    query: &str,
) -> AppResult<Option<Candidate>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let hit = provider.search_by_title(query).await?;
    Ok(hit.and_then(|movie| Candidate::from_record(movie, 0.0, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApiMovie;
    use crate::services::providers::MockMetadataProvider;

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_search_by_title().times(0);

        let result = search_title(Arc::new(provider), "   ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_query_is_trimmed_and_hit_normalized() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_search_by_title()
            .withf(|q| q.to_string() == "Heat")
            .returning(|_| {
                Ok(Some(ApiMovie {
                    id: Some(949),
                    title: Some("Heat".to_string()),
                    release_date: Some("1995-12-15".to_string()),
                    vote_average: Some(7.9),
                    ..Default::default()
                }))
            });

        let hit = search_title(Arc::new(provider), "  Heat ").await.unwrap().unwrap();
        assert_eq!(hit.id, 949);
        assert_eq!(hit.year, Some(1995));
    }

    #[tokio::test]
    async fn test_no_match() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_search_by_title().returning(|_| Ok(None));

        let hit = search_title(Arc::new(provider), "zzzz").await.unwrap();
        assert_eq!(hit, None);
    }
}
