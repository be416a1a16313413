//! The layout engine: text in, published glyph placements out
//!
//! Every rebuild takes a fresh generation number the moment it is requested.
//! Glyph images are resolved concurrently through the shared cache, and when
//! they have all landed the rebuild checks whether it is still the newest one.
//! If another rebuild was requested in the meantime the result is dropped
//! whole. Published output therefore always follows the order inputs arrived
//! in, never the order image decodes happen to finish.
//!
//! ```ignore
//! let engine = LayoutEngine::new(loader);
//! engine.output().subscribe(|out| canvas.redraw(out));
//!
//! // Typing fast: only the last rebuild publishes
//! let a = engine.rebuild(LayoutRequest::new("W", "impact", 120.0, 4.0));
//! let b = engine.rebuild(LayoutRequest::new("Wo", "impact", 120.0, 4.0));
//! futures::join!(a, b);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{self, join_all, BoxFuture, FutureExt};
use parking_lot::Mutex;

use memetext_core::types::{LayoutOutput, LayoutRequest};
use memetext_core::{AssetLoader, ImageCache, LayoutConfig, SharedImageCache, Store};

use crate::glyph::{glyph_slots, GlyphSlot};
use crate::place::{place_glyphs, LineMetrics};

/// A pending rebuild, to be awaited (or spawned) by the caller
///
/// Output stays marked as loading until a rebuild commits or clears. Dropping
/// the newest rebuild unfinished lets the next [`LayoutEngine::update`] with
/// the same request start it again.
pub type Rebuild = BoxFuture<'static, RebuildOutcome>;

/// How a rebuild ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// Text or font was empty; output cleared without loading anything
    Cleared { generation: u64 },
    /// Result published
    Committed { generation: u64, placements: usize },
    /// A newer rebuild started first; result dropped
    Discarded { generation: u64 },
}

impl RebuildOutcome {
    pub fn generation(&self) -> u64 {
        match *self {
            RebuildOutcome::Cleared { generation }
            | RebuildOutcome::Committed { generation, .. }
            | RebuildOutcome::Discarded { generation } => generation,
        }
    }

    pub fn is_discarded(&self) -> bool {
        matches!(self, RebuildOutcome::Discarded { .. })
    }
}

struct EngineInner {
    loader: Arc<dyn AssetLoader>,
    cache: SharedImageCache,
    config: LayoutConfig,
    generation: AtomicU64,
    last_request: Mutex<Option<LayoutRequest>>,
    output: Store<LayoutOutput>,
}

/// Glyph layout engine for one text layer
///
/// Cheap to clone; clones drive the same generation counter and publish to
/// the same output store.
#[derive(Clone)]
pub struct LayoutEngine {
    inner: Arc<EngineInner>,
}

impl LayoutEngine {
    /// Engine with its own cache and default configuration
    pub fn new(loader: Arc<dyn AssetLoader>) -> Self {
        Self::with_cache(loader, Arc::new(ImageCache::new()), LayoutConfig::default())
    }

    /// Engine sharing `cache` with other engines
    pub fn with_cache(
        loader: Arc<dyn AssetLoader>,
        cache: SharedImageCache,
        config: LayoutConfig,
    ) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                loader,
                cache,
                config,
                generation: AtomicU64::new(0),
                last_request: Mutex::new(None),
                output: Store::new(LayoutOutput::default()),
            }),
        }
    }

    /// The published result; subscribe here to redraw
    pub fn output(&self) -> &Store<LayoutOutput> {
        &self.inner.output
    }

    pub fn cache(&self) -> &SharedImageCache {
        &self.inner.cache
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.inner.config
    }

    /// Generation of the most recently requested rebuild
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    /// The inputs of the most recently requested rebuild
    pub fn last_request(&self) -> Option<LayoutRequest> {
        self.inner.last_request.lock().clone()
    }

    /// Rebuild only if the inputs changed since the last request
    ///
    /// The first call always rebuilds, so wiring this to an input source
    /// gives the eager initial layout for free. Dropping the newest rebuild
    /// before it finishes forgets its request, so the same inputs rebuild
    /// again instead of leaving the output loading.
    pub fn update(&self, request: LayoutRequest) -> Option<Rebuild> {
        if self.inner.last_request.lock().as_ref() == Some(&request) {
            return None;
        }
        Some(self.rebuild(request))
    }

    /// Start a rebuild for `request`
    ///
    /// The generation is taken and all glyph loads are issued before this
    /// returns, so calling order decides which rebuild wins, regardless of
    /// when the returned futures are polled. Blank requests clear the output
    /// synchronously and never touch the loader.
    pub fn rebuild(&self, request: LayoutRequest) -> Rebuild {
        let inner = &self.inner;
        let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *inner.last_request.lock() = Some(request.clone());

        if request.is_blank() {
            log::debug!("LayoutEngine: rebuild #{generation} cleared (empty text or font)");
            inner.output.modify(|out| {
                let changed = !out.placements.is_empty() || out.is_loading;
                out.placements.clear();
                out.is_loading = false;
                changed
            });
            return future::ready(RebuildOutcome::Cleared { generation }).boxed();
        }

        log::debug!(
            "LayoutEngine: rebuild #{generation} for {} chars of {:?} at {}px",
            request.text.chars().count(),
            request.font_id,
            request.font_size
        );

        inner.output.modify(|out| !std::mem::replace(&mut out.is_loading, true));

        let slots = glyph_slots(&inner.config.paths, &request.font_id, &request.text);
        let lookups: Vec<_> = slots
            .iter()
            .map(|(_, slot)| match slot {
                GlyphSlot::Asset(url) => inner.cache.resolve(inner.loader.as_ref(), url),
                GlyphSlot::Gap | GlyphSlot::Skip => future::ready(None).boxed(),
            })
            .collect();

        let inner = Arc::clone(inner);
        let mut guard = AbandonGuard {
            inner: Arc::clone(&inner),
            generation,
            finished: false,
        };
        async move {
            let images = join_all(lookups).await;
            guard.finished = true;

            let current = inner.generation.load(Ordering::SeqCst);
            if current != generation {
                log::debug!("LayoutEngine: rebuild #{generation} discarded, #{current} is newer");
                return RebuildOutcome::Discarded { generation };
            }

            let metrics = LineMetrics {
                font_size: request.font_size,
                spacing: request.spacing,
                space_ratio: inner.config.space_ratio,
            };
            let placements = place_glyphs(&slots, &images, metrics);
            let count = placements.len();

            inner.output.update(|out| {
                out.placements = placements;
                out.is_loading = false;
            });
            log::debug!("LayoutEngine: rebuild #{generation} committed {count} glyphs");

            RebuildOutcome::Committed {
                generation,
                placements: count,
            }
        }
        .boxed()
    }
}

/// Forgets the last request when the newest rebuild is dropped unfinished
struct AbandonGuard {
    inner: Arc<EngineInner>,
    generation: u64,
    finished: bool,
}

impl Drop for AbandonGuard {
    fn drop(&mut self) {
        if !self.finished && self.inner.generation.load(Ordering::SeqCst) == self.generation {
            log::debug!("LayoutEngine: rebuild #{} dropped before finishing", self.generation);
            *self.inner.last_request.lock() = None;
        }
    }
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("loader", &self.inner.loader.name())
            .field("generation", &self.generation())
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use memetext_core::types::{Bitmap, ImageHandle};

    /// Every glyph is 50x100
    struct HalfWidthLoader;

    impl AssetLoader for HalfWidthLoader {
        fn name(&self) -> &'static str {
            "half-width"
        }

        fn load(&self, _url: &str) -> BoxFuture<'static, Option<ImageHandle>> {
            future::ready(Some(Arc::new(Bitmap::transparent(50, 100)))).boxed()
        }
    }

    fn engine() -> LayoutEngine {
        LayoutEngine::new(Arc::new(HalfWidthLoader))
    }

    #[test]
    fn commit_publishes_placements() {
        let engine = engine();
        let outcome = block_on(engine.rebuild(LayoutRequest::new("Ab", "f", 120.0, 4.0)));

        assert_eq!(
            outcome,
            RebuildOutcome::Committed {
                generation: 1,
                placements: 2
            }
        );
        let out = engine.output().get();
        assert!(!out.is_loading);
        assert_eq!(out.placements[1].x, 64.0);
    }

    #[test]
    fn loading_flag_is_raised_until_commit() {
        let engine = engine();
        let pending = engine.rebuild(LayoutRequest::new("A", "f", 10.0, 0.0));
        assert!(engine.output().get().is_loading);
        block_on(pending);
        assert!(!engine.output().get().is_loading);
    }

    #[test]
    fn blank_request_clears_synchronously() {
        let engine = engine();
        block_on(engine.rebuild(LayoutRequest::new("A", "f", 10.0, 0.0)));
        assert_eq!(engine.output().get().placements.len(), 1);

        let cleared = engine.rebuild(LayoutRequest::new("", "f", 10.0, 0.0));
        assert!(engine.output().get().placements.is_empty());
        assert_eq!(block_on(cleared), RebuildOutcome::Cleared { generation: 2 });
    }

    #[test]
    fn update_skips_unchanged_inputs() {
        let engine = engine();
        let request = LayoutRequest::new("A", "f", 10.0, 0.0);

        let first = engine.update(request.clone());
        assert!(first.is_some());
        assert!(engine.update(request.clone()).is_none());

        let bigger = LayoutRequest {
            font_size: 20.0,
            ..request
        };
        assert!(engine.update(bigger.clone()).is_some());
        assert_eq!(engine.last_request(), Some(bigger));
        assert_eq!(engine.generation(), 2);
    }

    #[test]
    fn outcome_generation() {
        assert_eq!(RebuildOutcome::Discarded { generation: 3 }.generation(), 3);
        assert!(RebuildOutcome::Discarded { generation: 3 }.is_discarded());
        assert!(!RebuildOutcome::Cleared { generation: 1 }.is_discarded());
    }
}
