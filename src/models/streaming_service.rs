use serde::Serialize;

/// A subscription service users can select, keyed by its TMDB provider id
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StreamingService {
    pub name: &'static str,
    pub provider_id: i64,
}

/// A TMDB movie genre
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Genre {
    pub name: &'static str,
    pub genre_id: i64,
}

/// Mainstream services offered for selection
pub const STREAMING_SERVICES: &[StreamingService] = &[
    StreamingService { name: "Netflix", provider_id: 8 },
    StreamingService { name: "Hulu", provider_id: 15 },
    StreamingService { name: "Prime Video", provider_id: 9 },
    StreamingService { name: "Disney+", provider_id: 337 },
    StreamingService { name: "Max", provider_id: 1899 },
    StreamingService { name: "Apple TV+", provider_id: 350 },
    StreamingService { name: "Paramount+", provider_id: 531 },
    StreamingService { name: "Peacock", provider_id: 386 },
];

pub const GENRES: &[Genre] = &[
    Genre { name: "Action", genre_id: 28 },
    Genre { name: "Comedy", genre_id: 35 },
    Genre { name: "Drama", genre_id: 18 },
    Genre { name: "Horror", genre_id: 27 },
    Genre { name: "Romance", genre_id: 10749 },
    Genre { name: "Sci-Fi", genre_id: 878 },
    Genre { name: "Thriller", genre_id: 53 },
    Genre { name: "Animation", genre_id: 16 },
    Genre { name: "Documentary", genre_id: 99 },
];

pub const REGIONS: &[&str] = &["US", "CA", "GB", "AU"];

impl StreamingService {
    /// Looks up a service by display name, ignoring case
    pub fn by_name(name: &str) -> Option<&'static StreamingService> {
        let name = name.trim();
        STREAMING_SERVICES
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

impl Genre {
    /// Looks up a genre by display name, ignoring case
    pub fn by_name(name: &str) -> Option<&'static Genre> {
        let name = name.trim();
        GENRES.iter().find(|g| g.name.eq_ignore_ascii_case(name))
    }
}

/// Normalizes a region code, returning it only if supported
pub fn supported_region(code: &str) -> Option<&'static str> {
    let code = code.trim();
    REGIONS
        .iter()
        .copied()
        .find(|r| r.eq_ignore_ascii_case(code))
}
