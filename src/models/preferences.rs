use std::collections::HashSet;

pub const DEFAULT_REGION: &str = "US";
pub const DEFAULT_MIN_SECONDARY_RATING: f64 = 6.5;
pub const DEFAULT_RESULT_COUNT: usize = 12;
pub const MAX_RESULT_COUNT: usize = 30;

/// Filtering and ranking knobs for one recommendation run
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Selected TMDB provider ids; empty means no availability restriction
    pub provider_ids: HashSet<i64>,
    /// Region whose availability is checked, e.g. "US"
    pub region: String,
    /// Optional genre restriction for discovery
    pub genre_id: Option<i64>,
    /// Titles with a secondary rating below this are dropped
    pub min_secondary_rating: f64,
    /// Maximum number of results returned
    pub limit: usize,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            provider_ids: HashSet::new(),
            region: DEFAULT_REGION.to_string(),
            genre_id: None,
            min_secondary_rating: DEFAULT_MIN_SECONDARY_RATING,
            limit: DEFAULT_RESULT_COUNT,
        }
    }
}

impl FilterCriteria {
    /// Selected provider ids in ascending order, for stable upstream queries
    pub fn sorted_provider_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.provider_ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Everything the pipeline needs from the user for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPreferences {
    /// Free-text titles the user likes, in the order they were added
    pub liked_titles: Vec<String>,
    pub criteria: FilterCriteria,
}

impl UserPreferences {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            liked_titles: Vec::new(),
            criteria,
        }
    }

    /// Adds a liked title, ignoring blanks and exact duplicates
    pub fn add_liked_title(&mut self, title: &str) {
        let title = title.trim();
        if title.is_empty() || self.liked_titles.iter().any(|t| t == title) {
            return;
        }
        self.liked_titles.push(title.to_string());
    }
}
