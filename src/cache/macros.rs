/// Memoizes an async computation in the in-memory cache.
///
/// Returns the cached value when present. Otherwise awaits `$block`, stores
/// the result under `$key` and returns it. Errors from the lookup or from the
/// block are propagated with `?`, so the macro must be used inside a function
/// returning `AppResult`.
///
/// # Arguments
/// * `$cache`: a [`Cache`](crate::cache::Cache) or reference to one.
/// * `$key`: the [`CacheKey`](crate::cache::CacheKey) to store the value under.
/// * `$block`: a future resolving to `AppResult<T>` where `T` round-trips through serde.
///
/// # Example
/// ```rust,ignore
/// let suggestions = cached!(state.cache, key, async {
///     Ok(compute_suggestions())
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_from_cache(&$key).await? {
            tracing::debug!(key = %$key, "Cache hit");
            Ok(cached)
        } else {
            tracing::debug!(key = %$key, "Cache miss");
            let value = $block.await?;
            $cache.set(&$key, &value).await;
            Ok(value)
        }
    }};
}
