use std::collections::HashMap;

use crate::models::Candidate;

/// Candidates from every source, at most one per movie id
///
/// A duplicate replaces the stored candidate only when it scores strictly higher, and
/// then replaces it whole. Since the rule keeps the maximum, the final contents do not
/// depend on the order in which sources are merged.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: HashMap<i64, Candidate>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a candidate; returns true when the pool changed
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        match self.candidates.get(&candidate.id) {
            Some(existing) if candidate.score <= existing.score => false,
            _ => {
                self.candidates.insert(candidate.id, candidate);
                true
            }
        }
    }

    pub fn extend<I: IntoIterator<Item = Candidate>>(&mut self, candidates: I) {
        for candidate in candidates {
            self.insert(candidate);
        }
    }

    pub fn get(&self, id: i64) -> Option<&Candidate> {
        self.candidates.get(&id)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Pooled candidates in ascending id order
    pub fn into_candidates(self) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = self.candidates.into_values().collect();
        candidates.sort_by_key(|c| c.id);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: i64, title: &str, score: f64) -> Candidate {
        Candidate {
            id,
            title: title.to_string(),
            year: None,
            overview: String::new(),
            poster_url: None,
            primary_rating: None,
            secondary_rating: None,
            score,
        }
    }

    fn permutations(items: &[Candidate]) -> Vec<Vec<Candidate>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head.clone());
                out.push(tail);
            }
        }
        out
    }

    #[test]
    fn test_higher_score_wins_in_either_order() {
        let low = candidate(42, "From discovery", 6.0);
        let high = candidate(42, "From a liked title", 7.5);

        let mut forward = CandidatePool::new();
        forward.insert(low.clone());
        forward.insert(high.clone());

        let mut backward = CandidatePool::new();
        backward.insert(high.clone());
        backward.insert(low);

        assert_eq!(forward.len(), 1);
        assert_eq!(forward.get(42), Some(&high));
        assert_eq!(backward.get(42), Some(&high));
    }

    #[test]
    fn test_equal_score_keeps_first() {
        let mut pool = CandidatePool::new();
        assert!(pool.insert(candidate(7, "First", 5.0)));
        assert!(!pool.insert(candidate(7, "Second", 5.0)));
        assert_eq!(pool.get(7).unwrap().title, "First");
    }

    #[test]
    fn test_replacement_is_whole_record() {
        let mut pool = CandidatePool::new();
        let mut rated = candidate(3, "Rated", 5.0);
        rated.secondary_rating = Some(8.0);
        rated.year = Some(1999);
        pool.insert(rated);

        let bare = candidate(3, "Bare", 6.0);
        pool.insert(bare.clone());

        assert_eq!(pool.get(3), Some(&bare));
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let items = vec![
            candidate(1, "A", 6.0),
            candidate(1, "A liked", 7.25),
            candidate(2, "B", 5.5),
            candidate(2, "B", 5.5),
            candidate(3, "C", 8.0),
            candidate(3, "C liked", 9.25),
        ];

        let expected = {
            let mut pool = CandidatePool::new();
            pool.extend(items.clone());
            pool.into_candidates()
        };

        for order in permutations(&items) {
            let mut pool = CandidatePool::new();
            pool.extend(order);
            assert_eq!(pool.into_candidates(), expected);
        }

        assert_eq!(expected.len(), 3);
        assert_eq!(expected[0].score, 7.25);
        assert_eq!(expected[2].score, 9.25);
    }

    #[test]
    fn test_into_candidates_is_sorted_by_id() {
        let mut pool = CandidatePool::new();
        pool.extend(vec![
            candidate(30, "C", 1.0),
            candidate(10, "A", 1.0),
            candidate(20, "B", 1.0),
        ]);
        let ids: Vec<i64> = pool.into_candidates().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }
}
