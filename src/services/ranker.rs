use std::cmp::Ordering;

use crate::models::Candidate;

/// Orders candidates by score (highest first) and keeps the top `limit`
///
/// Equal scores are ordered by ascending id so results are reproducible.
pub fn rank(mut candidates: Vec<Candidate>, limit: usize) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    candidates.truncate(limit);
    candidates
}
