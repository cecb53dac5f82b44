use serde::Serialize;

const SEARCH_BASE: &str = "https://www.google.com/search?q=";

/// Search-engine link for a free-text query
pub fn google_link(query: &str) -> String {
    format!("{}{}", SEARCH_BASE, urlencoding::encode(query))
}

/// Outbound links shown next to a recommendation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReferenceLinks {
    pub imdb_search: String,
    pub where_to_watch: String,
}

impl ReferenceLinks {
    /// `services` are the selected service names; the alphabetically first one is used
    pub fn for_title(title: &str, services: &[&str]) -> Self {
        let where_to_watch = match services.iter().min() {
            Some(service) => google_link(&format!("{} watch on {}", title, service)),
            None => google_link(&format!("{} where to watch", title)),
        };

        Self {
            imdb_search: google_link(&format!("{} imdb", title)),
            where_to_watch,
        }
    }
}
