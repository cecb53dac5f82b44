/// Serves a value from the in-memory cache, computing and storing it on a miss.
///
/// # Arguments
/// * `$cache`: The cache instance. It must have `get_from_cache` and `set_in_cache` methods.
/// * `$key`: The key to use for caching the value.
/// * `$ttl`: The time-to-live for the cached value in seconds.
/// * `$block`: A future producing `AppResult<T>`, awaited only on a miss.
///
/// Errors from the block propagate and are never cached.
///
/// # Example
/// ```rust,ignore
/// let results = cached!(self.cache, CacheKey::ExternalIds(id), 3600, async move {
///     self.fetch_external_ids(id).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        if let Some(cached) = $cache.get_from_cache(&key)? {
            tracing::debug!(key = %key, "Cache hit");
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_cache(&key, &value, $ttl);
            Ok(value)
        }
    }};
}
