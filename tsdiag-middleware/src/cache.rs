use std::sync::Arc;

use moka::sync::Cache;
use tsdiag_core::{CacheConfig, DiagError, SeriesSource, SourceKey, TimeSeries};

/// Memoizes [`SeriesSource::load`] by [`SourceKey`].
///
/// The key embeds the source's content fingerprint, so a changed source misses
/// on its own. Failed loads are not cached. The cache belongs to whoever
/// builds the wrapper; nothing is shared globally.
pub struct CachingSource {
    inner: Arc<dyn SeriesSource>,
    cache: Cache<SourceKey, Arc<TimeSeries>>,
}

impl CachingSource {
    /// Wrap `inner` with a cache sized and aged by `cfg`.
    pub fn new(inner: Arc<dyn SeriesSource>, cfg: &CacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(cfg.max_capacity);
        if let Some(ttl) = cfg.ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            inner,
            cache: builder.build(),
        }
    }

    /// Load through the cache without copying the series.
    ///
    /// # Errors
    /// Whatever the wrapped source's `key` or `load` returns.
    pub fn load_shared(&self) -> Result<Arc<TimeSeries>, DiagError> {
        let key = self.inner.key()?;
        if let Some(hit) = self.cache.get(&key) {
            #[cfg(feature = "tracing")]
            tracing::debug!(key = %key, "series cache hit");
            return Ok(hit);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(key = %key, source = self.inner.name(), "series cache miss");

        self.cache
            .try_get_with(key, || self.inner.load().map(Arc::new))
            .map_err(|e| (*e).clone())
    }

    /// Whether a series is cached under `key`.
    #[must_use]
    pub fn contains(&self, key: &SourceKey) -> bool {
        self.cache.contains_key(key)
    }

    /// Drop the entry for `key`, if any.
    pub fn invalidate(&self, key: &SourceKey) {
        self.cache.invalidate(key);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl SeriesSource for CachingSource {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn key(&self) -> Result<SourceKey, DiagError> {
        self.inner.key()
    }

    fn load(&self) -> Result<TimeSeries, DiagError> {
        self.load_shared().map(|s| (*s).clone())
    }
}
