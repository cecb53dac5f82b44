use serde::{Deserialize, Serialize};

use super::ApiMovie;

pub const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w342";

/// Score boost for titles found through a liked title's recommendations
pub const LIKE_BONUS: f64 = 1.25;

/// Score boost for having any secondary rating, whatever its value
pub const QUALITY_BONUS: f64 = 0.25;

/// A recommendable movie, normalized from a raw TMDB record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub id: i64,
    pub title: String,
    pub year: Option<i32>,
    pub overview: String,
    pub poster_url: Option<String>,
    /// TMDB vote average (0-10)
    pub primary_rating: Option<f64>,
    /// IMDb rating via OMDb (0-10)
    pub secondary_rating: Option<f64>,
    /// Ranking value; never sent to clients
    #[serde(skip_serializing, default)]
    pub score: f64,
}

impl Candidate {
    /// Builds a candidate from a raw record
    ///
    /// Returns `None` when the record has no usable id or title. Malformed dates and
    /// missing optional fields never fail the conversion.
    pub fn from_record(
        movie: ApiMovie,
        like_bonus: f64,
        secondary_rating: Option<f64>,
    ) -> Option<Self> {
        let id = usable_id(&movie)?;
        let title = movie.title.filter(|t| !t.is_empty())?;

        let year = movie.release_date.as_deref().and_then(parse_year);
        let poster_url = movie
            .poster_path
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", POSTER_BASE, p));
        let score = compute_score(movie.vote_average, like_bonus, secondary_rating.is_some());

        Some(Self {
            id,
            title,
            year,
            overview: movie.overview.unwrap_or_default(),
            poster_url,
            primary_rating: movie.vote_average,
            secondary_rating,
            score,
        })
    }
}

/// Whether a raw record can become a candidate at all
pub fn is_usable(movie: &ApiMovie) -> bool {
    usable_id(movie).is_some() && movie.title.as_deref().is_some_and(|t| !t.is_empty())
}

fn usable_id(movie: &ApiMovie) -> Option<i64> {
    movie.id.filter(|id| *id != 0)
}

/// Relevance score: primary rating (0 when absent) + like bonus + quality bonus
pub fn compute_score(primary_rating: Option<f64>, like_bonus: f64, has_secondary: bool) -> f64 {
    let quality = if has_secondary { QUALITY_BONUS } else { 0.0 };
    primary_rating.unwrap_or(0.0) + like_bonus + quality
}

/// Leading four-digit year of a `YYYY-MM-DD` style date
pub fn parse_year(release_date: &str) -> Option<i32> {
    let prefix = release_date.get(..4)?;
    if !prefix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heat() -> ApiMovie {
        ApiMovie {
            id: Some(1),
            title: Some("Heat".to_string()),
            release_date: Some("1995-12-15".to_string()),
            overview: None,
            poster_path: Some("/x.jpg".to_string()),
            vote_average: Some(7.8),
        }
    }

    #[test]
    fn test_heat_with_like_bonus() {
        let candidate = Candidate::from_record(heat(), LIKE_BONUS, None).unwrap();

        assert_eq!(candidate.id, 1);
        assert_eq!(candidate.year, Some(1995));
        assert!((candidate.score - 9.05).abs() < 1e-9);
        assert_eq!(candidate.secondary_rating, None);
        assert_eq!(
            candidate.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w342/x.jpg")
        );
        assert_eq!(candidate.overview, "");
    }

    #[test]
    fn test_score_formula() {
        let cases = vec![
            (Some(7.8), LIKE_BONUS, None),
            (Some(7.8), 0.0, Some(8.1)),
            (None, LIKE_BONUS, Some(2.0)),
            (None, 0.0, None),
            (Some(10.0), LIKE_BONUS, Some(0.0)),
        ];

        for (vote, bonus, secondary) in cases {
            let movie = ApiMovie {
                vote_average: vote,
                ..heat()
            };
            let candidate = Candidate::from_record(movie, bonus, secondary).unwrap();
            let expected =
                vote.unwrap_or(0.0) + bonus + if secondary.is_some() { 0.25 } else { 0.0 };
            assert_eq!(candidate.score, expected);
        }
    }

    #[test]
    fn test_missing_id_or_title_is_rejected() {
        let no_id = ApiMovie { id: None, ..heat() };
        let zero_id = ApiMovie { id: Some(0), ..heat() };
        let no_title = ApiMovie {
            title: None,
            ..heat()
        };
        let empty_title = ApiMovie {
            title: Some(String::new()),
            ..heat()
        };

        for movie in [no_id, zero_id, no_title, empty_title] {
            assert!(!is_usable(&movie));
            assert_eq!(Candidate::from_record(movie, 0.0, None), None);
        }
        assert!(is_usable(&heat()));
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("1995-12-15"), Some(1995));
        assert_eq!(parse_year("2024"), Some(2024));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("199"), None);
        assert_eq!(parse_year("TBA-01-01"), None);
        assert_eq!(parse_year("19é5"), None);
    }

    #[test]
    fn test_malformed_date_leaves_year_absent() {
        let movie = ApiMovie {
            release_date: Some("unknown".to_string()),
            ..heat()
        };
        let candidate = Candidate::from_record(movie, 0.0, None).unwrap();
        assert_eq!(candidate.year, None);
    }

    #[test]
    fn test_missing_poster_path() {
        let movie = ApiMovie {
            poster_path: None,
            ..heat()
        };
        let candidate = Candidate::from_record(movie, 0.0, None).unwrap();
        assert_eq!(candidate.poster_url, None);
    }

    #[test]
    fn test_score_is_not_serialized() {
        let candidate = Candidate::from_record(heat(), LIKE_BONUS, None).unwrap();
        let json = serde_json::to_value(&candidate).unwrap();
        assert!(json.get("score").is_none());
        assert_eq!(json["title"], "Heat");
    }
}
