//! The shared image cache
//!
//! Every glyph and extra image is decoded once per process. The cache maps
//! asset URLs to decoded handles and never evicts: entries are immutable once
//! written, and writing the same URL twice stores an equivalent image, so any
//! number of in-flight layout rebuilds can read and fill it at the same time.
//!
//! Failed decodes are not remembered. A glyph that was missing on one rebuild
//! is asked for again on the next one.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use parking_lot::{Mutex, RwLock};

use crate::traits::AssetLoader;
use crate::types::ImageHandle;

/// URL to decoded image, append-only
pub struct ImageCache {
    entries: RwLock<HashMap<String, ImageHandle>>,
    metrics: Mutex<CacheMetrics>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            metrics: Mutex::new(CacheMetrics::default()),
        }
    }

    /// Look up a decoded image, counting the hit or miss
    pub fn get(&self, url: &str) -> Option<ImageHandle> {
        let found = self.entries.read().get(url).cloned();
        let mut metrics = self.metrics.lock();
        metrics.requests += 1;
        if found.is_some() {
            metrics.hits += 1;
        } else {
            metrics.misses += 1;
        }
        found
    }

    /// Look up without touching the metrics
    pub fn peek(&self, url: &str) -> Option<ImageHandle> {
        self.entries.read().get(url).cloned()
    }

    /// Store a decoded image
    ///
    /// The first write for a URL wins; later writes hand back the stored
    /// handle so concurrent decodes of the same asset converge on one image.
    pub fn insert(&self, url: impl Into<String>, image: ImageHandle) -> ImageHandle {
        let mut entries = self.entries.write();
        Arc::clone(entries.entry(url.into()).or_insert(image))
    }

    /// Resolve `url` through the cache
    ///
    /// A cached image resolves immediately. Otherwise the loader starts a
    /// decode right away and the returned future stores the result when it
    /// lands. `None` means the asset is unavailable.
    pub fn resolve(
        self: &Arc<Self>,
        loader: &dyn AssetLoader,
        url: &str,
    ) -> BoxFuture<'static, Option<ImageHandle>> {
        if let Some(image) = self.get(url) {
            return future::ready(Some(image)).boxed();
        }

        log::debug!("ImageCache: miss for {url}, loading via {}", loader.name());
        let pending = loader.load(url);
        let cache = Arc::clone(self);
        let url = url.to_owned();

        async move {
            match pending.await {
                Some(image) => Some(cache.insert(url, image)),
                None => {
                    cache.metrics.lock().failures += 1;
                    log::debug!("ImageCache: {url} unavailable");
                    None
                },
            }
        }
        .boxed()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.read().contains_key(url)
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.metrics.lock().clone()
    }

    pub fn hit_rate(&self) -> f64 {
        self.metrics.lock().hit_rate()
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("entries", &self.len())
            .field("metrics", &self.metrics())
            .finish()
    }
}

/// Shared cache handle, one per process
pub type SharedImageCache = Arc<ImageCache>;

/// Counters for cache lookups and decode outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    pub requests: u64,
    pub hits: u64,
    pub misses: u64,
    /// Decodes that resolved to "unavailable"
    pub failures: u64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.hits as f64 / self.requests as f64
        }
    }
}
