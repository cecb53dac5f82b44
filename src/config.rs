use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key; required by every metadata call but checked lazily
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// OMDb API key; without it secondary ratings are never looked up
    #[serde(default)]
    pub omdb_api_key: Option<String>,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Timeout applied to every upstream request
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Disables the in-memory response cache when false
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_omdb_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_http_timeout_secs() -> u64 {
    20
}

fn default_cache_enabled() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// TMDB key, treating a blank value as unset
    pub fn tmdb_key(&self) -> Option<&str> {
        non_blank(self.tmdb_api_key.as_deref())
    }

    /// OMDb key, treating a blank value as unset
    pub fn omdb_key(&self) -> Option<&str> {
        non_blank(self.omdb_api_key.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(vars: Vec<(&str, &str)>) -> Config {
        envy::from_iter(
            vars.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = parse(vec![]);
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.omdb_api_url, "https://www.omdbapi.com");
        assert_eq!(config.http_timeout_secs, 20);
        assert!(config.cache_enabled);
        assert_eq!(config.port, 3000);
        assert_eq!(config.tmdb_key(), None);
        assert_eq!(config.omdb_key(), None);
    }

    #[test]
    fn test_blank_keys_are_treated_as_missing() {
        let config = parse(vec![("TMDB_API_KEY", "  "), ("OMDB_API_KEY", "")]);
        assert_eq!(config.tmdb_key(), None);
        assert_eq!(config.omdb_key(), None);
    }

    #[test]
    fn test_keys_are_read() {
        let config = parse(vec![
            ("TMDB_API_KEY", "tmdb-key"),
            ("OMDB_API_KEY", "omdb-key"),
            ("CACHE_ENABLED", "false"),
        ]);
        assert_eq!(config.tmdb_key(), Some("tmdb-key"));
        assert_eq!(config.omdb_key(), Some("omdb-key"));
        assert!(!config.cache_enabled);
    }
}
