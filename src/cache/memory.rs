use moka::Expiry;
use std::fmt::Display;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{AppError, AppResult};

/// Cache key covering the full argument tuple of each upstream call
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    TitleSearch(String),
    ExternalIds(i64),
    WatchProviders(i64),
    Recommendations {
        movie_id: i64,
        pages: u32,
    },
    Discover {
        region: String,
        genre_id: Option<i64>,
        provider_ids: Vec<i64>,
        pages: u32,
    },
    Rating(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::TitleSearch(query) => write!(f, "search:{}", query),
            CacheKey::ExternalIds(id) => write!(f, "extids:{}", id),
            CacheKey::WatchProviders(id) => write!(f, "providers:{}", id),
            CacheKey::Recommendations { movie_id, pages } => {
                write!(f, "recs:{}:{}", movie_id, pages)
            }
            CacheKey::Discover {
                region,
                genre_id,
                provider_ids,
                pages,
            } => {
                let genre = genre_id.map(|g| g.to_string()).unwrap_or_default();
                let providers = provider_ids
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join("|");
                write!(f, "discover:{}:{}:{}:{}", region, genre, providers, pages)
            }
            CacheKey::Rating(imdb_id) => write!(f, "rating:{}", imdb_id),
        }
    }
}

/// Upper bound on stored responses
pub const DEFAULT_MAX_CAPACITY: u64 = 10_000;

#[derive(Clone)]
struct CacheEntry {
    value: Arc<str>,
    ttl: Duration,
}

/// Expires each entry after the ttl it was stored with
struct PerEntryTtl;

impl Expiry<String, CacheEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-memory response cache with per-entry time-to-live
///
/// Backed by a bounded `moka` cache. Values are stored as JSON so any serde type can
/// share one cache. A disabled cache never stores anything, which lets callers bypass
/// it without changing code paths.
#[derive(Clone)]
pub struct Cache {
    entries: moka::sync::Cache<String, CacheEntry>,
    enabled: bool,
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    pub fn with_capacity(max_capacity: u64) -> Self {
        let entries = moka::sync::Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self {
            entries,
            enabled: true,
        }
    }

    /// A cache that misses on every read and ignores every write
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::with_capacity(0)
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Retrieves a value from the cache by key
    ///
    /// Returns `None` on a miss or when the entry has expired.
    pub fn get_from_cache<T: serde::de::DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> AppResult<Option<T>> {
        if !self.enabled {
            return Ok(None);
        }

        match self.entries.get(&key.to_string()) {
            Some(entry) => {
                let data = serde_json::from_str(&entry.value).map_err(|e| {
                    AppError::Internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    /// Stores a value for `ttl` seconds
    ///
    /// Serialization failures are logged and the value is simply not cached.
    pub fn set_in_cache<T: serde::Serialize>(&self, key: &CacheKey, value: &T, ttl: u64) {
        if !self.enabled {
            return;
        }

        let json = match serde_json::to_string(value) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, "Cache serialization error");
                return;
            }
        };

        let entry = CacheEntry {
            value: Arc::from(json),
            ttl: Duration::from_secs(ttl),
        };
        self.entries.insert(key.to_string(), entry);
    }

    /// Number of live entries after pending expirations and evictions are applied
    pub fn len(&self) -> usize {
        self.entries.run_pending_tasks();
        self.entries.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
