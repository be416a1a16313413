//! Layout engine behaviour against an in-memory glyph loader
//!
//! Covers glyph counting and ordering, missing glyphs, gaps, cache reuse and
//! the generation check that keeps stale rebuilds from publishing.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use memetext_core::types::{Bitmap, ImageHandle, LayoutRequest};
use memetext_core::{AssetLoader, ImageCache, LayoutConfig};
use memetext_layout::{LayoutEngine, RebuildOutcome};

/// Serves every glyph URL as a 50x100 image unless told otherwise
#[derive(Default)]
struct FakeLoader {
    calls: AtomicUsize,
    missing: HashSet<String>,
    sizes: HashMap<String, (u32, u32)>,
    delays: HashMap<String, Duration>,
}

impl FakeLoader {
    fn missing(mut self, url: &str) -> Self {
        self.missing.insert(url.to_string());
        self
    }

    fn size(mut self, url: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(url.to_string(), (width, height));
        self
    }

    /// Delay every glyph of `font`
    fn slow_font(mut self, font: &str, delay: Duration) -> Self {
        self.delays.insert(font.to_string(), delay);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AssetLoader for FakeLoader {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn load(&self, url: &str) -> BoxFuture<'static, Option<ImageHandle>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let font = url.split('/').nth(2).unwrap_or_default();
        let delay = self.delays.get(font).copied();
        let image = if self.missing.contains(url) {
            None
        } else {
            let (w, h) = self.sizes.get(url).copied().unwrap_or((50, 100));
            Some(Arc::new(Bitmap::transparent(w, h)))
        };

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            image
        }
        .boxed()
    }
}

fn engine_with(loader: FakeLoader) -> (LayoutEngine, Arc<FakeLoader>) {
    let loader = Arc::new(loader);
    let engine = LayoutEngine::new(loader.clone());
    (engine, loader)
}

fn request(text: &str, font_size: f32, spacing: f32) -> LayoutRequest {
    LayoutRequest::new(text, "impact", font_size, spacing)
}

fn count_non_blank(text: &str) -> usize {
    text.chars().filter(|c| *c != ' ').count()
}

#[tokio::test]
async fn complete_font_places_every_non_blank_char_in_order() {
    for text in ["WoW", "Hello World", "a-b-c 123", "  ZZ  top  ", "x"] {
        let (engine, _) = engine_with(FakeLoader::default());
        engine.rebuild(request(text, 120.0, 4.0)).await;

        let placements = engine.output().get().placements;
        assert_eq!(placements.len(), count_non_blank(text), "{text:?}");

        let expected: Vec<char> = text.chars().filter(|c| *c != ' ').collect();
        let placed: Vec<char> = placements
            .iter()
            .map(|p| p.key.split_once('-').map(|(_, c)| c).unwrap_or_default())
            .map(|c| c.chars().next().unwrap_or_default())
            .collect();
        assert_eq!(placed, expected, "{text:?}");

        for pair in placements.windows(2) {
            assert!(pair[1].x > pair[0].x, "x must increase in {text:?}");
        }
    }
}

#[tokio::test]
async fn missing_glyph_is_skipped_not_gapped() {
    let (engine, _) = engine_with(FakeLoader::default().missing("/letters/impact/Q.png"));

    let outcome = engine.rebuild(request("QA", 120.0, 4.0)).await;

    assert_eq!(
        outcome,
        RebuildOutcome::Committed {
            generation: 1,
            placements: 1
        }
    );
    let placements = engine.output().get().placements;
    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0].x, 0.0);
    assert_eq!(placements[0].key, "1-A");
}

#[tokio::test]
async fn space_advances_by_fixed_fraction_of_font_size() {
    for font_size in [60.0_f32, 120.0] {
        let (engine, loader) = engine_with(FakeLoader::default());
        engine.rebuild(request(" A", font_size, 4.0)).await;

        let placements = engine.output().get().placements;
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].x, 0.4 * font_size);
        assert_eq!(loader.calls(), 1, "spaces never hit the loader");
    }
}

#[tokio::test]
async fn glyph_width_keeps_aspect_ratio() {
    let (engine, _) = engine_with(FakeLoader::default().size("/letters/impact/_m.png", 150, 100));

    engine.rebuild(request("mA", 60.0, 2.0)).await;

    let placements = engine.output().get().placements;
    assert_eq!((placements[0].width, placements[0].height), (90.0, 60.0));
    assert_eq!(placements[1].x, 92.0);
    assert_eq!(placements[1].width, 30.0);
}

#[tokio::test]
async fn unsupported_characters_are_dropped_silently() {
    let (engine, loader) = engine_with(FakeLoader::default());

    engine.rebuild(request("¡Hé!", 100.0, 0.0)).await;

    let placements = engine.output().get().placements;
    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0].key, "1-H");
    assert_eq!(placements[0].x, 0.0);
    assert_eq!(loader.calls(), 1);
}

#[tokio::test]
async fn all_glyph_loads_start_before_the_first_await() {
    let (engine, loader) = engine_with(FakeLoader::default());

    let pending = engine.rebuild(request("ABC D", 10.0, 0.0));
    assert_eq!(loader.calls(), 4);

    pending.await;
    assert_eq!(engine.output().get().placements.len(), 4);
}

#[tokio::test]
async fn warm_cache_gives_identical_layout() {
    let (engine, loader) =
        engine_with(FakeLoader::default().size("/letters/impact/W.png", 80, 100));

    engine.rebuild(request("WoW", 120.0, 4.0)).await;
    let first = engine.output().get().placements;
    let calls_after_first = loader.calls();

    engine.rebuild(request("WoW", 120.0, 4.0)).await;
    let second = engine.output().get().placements;

    assert_eq!(loader.calls(), calls_after_first, "second pass served from cache");
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!((a.x, a.y, a.width, a.height), (b.x, b.y, b.width, b.height));
        assert_eq!(a.key, b.key);
        assert!(Arc::ptr_eq(&a.image, &b.image));
    }
}

#[tokio::test]
async fn stale_rebuild_finishing_last_is_discarded() {
    let (engine, _) = engine_with(FakeLoader::default());

    let first = engine.rebuild(request("A", 120.0, 4.0));
    let second = engine.rebuild(request("AB", 120.0, 4.0));

    // Drive the newer rebuild to completion before the older one
    let second = second.await;
    let first = first.await;

    assert_eq!(
        second,
        RebuildOutcome::Committed {
            generation: 2,
            placements: 2
        }
    );
    assert_eq!(first, RebuildOutcome::Discarded { generation: 1 });

    let keys: Vec<_> = engine
        .output()
        .get()
        .placements
        .into_iter()
        .map(|p| p.key)
        .collect();
    assert_eq!(keys, vec!["0-A", "1-B"]);
}

#[tokio::test(start_paused = true)]
async fn slow_decode_never_overwrites_newer_input() {
    let (engine, _) = engine_with(
        FakeLoader::default()
            .slow_font("slow", Duration::from_millis(500))
            .slow_font("impact", Duration::from_millis(10)),
    );

    let committed = Arc::new(Mutex::new(Vec::new()));
    let sink = committed.clone();
    engine.output().subscribe(move |out| {
        if !out.is_loading {
            if let Ok(mut seen) = sink.lock() {
                seen.push(out.placements.len());
            }
        }
    });

    let old = engine.rebuild(LayoutRequest::new("A", "slow", 120.0, 4.0));
    let new = engine.rebuild(request("AB", 120.0, 4.0));
    let (old, new) = tokio::join!(old, new);

    assert!(old.is_discarded());
    assert!(!new.is_discarded());
    assert_eq!(*committed.lock().unwrap_or_else(|e| e.into_inner()), vec![2]);
    assert!(!engine.output().get().is_loading);
}

#[tokio::test]
async fn clearing_supersedes_in_flight_rebuild() {
    let (engine, loader) = engine_with(FakeLoader::default());

    let pending = engine.rebuild(request("AB", 120.0, 4.0));
    let clear = engine.rebuild(request("", 120.0, 4.0));
    let calls = loader.calls();

    assert_eq!(clear.await, RebuildOutcome::Cleared { generation: 2 });
    assert!(pending.await.is_discarded());

    let out = engine.output().get();
    assert!(out.placements.is_empty());
    assert!(!out.is_loading);
    assert_eq!(loader.calls(), calls, "blank requests load nothing");
}

#[tokio::test]
async fn engines_share_one_cache() {
    let loader = Arc::new(FakeLoader::default());
    let cache = Arc::new(ImageCache::new());
    let main = LayoutEngine::with_cache(loader.clone(), cache.clone(), LayoutConfig::default());
    let sub = LayoutEngine::with_cache(loader.clone(), cache.clone(), LayoutConfig::default());

    main.rebuild(request("WO", 120.0, 4.0)).await;
    sub.rebuild(request("WOW", 60.0, 2.0)).await;

    assert_eq!(loader.calls(), 2, "W and O decoded once each");
    assert_eq!(cache.len(), 2);
    assert_eq!(sub.output().get().placements[0].height, 60.0);
}

#[tokio::test]
async fn dropped_rebuild_is_reissued_for_the_same_request() {
    let (engine, _) = engine_with(FakeLoader::default());

    let first = engine.update(request("AB", 120.0, 4.0));
    assert!(engine.update(request("AB", 120.0, 4.0)).is_none(), "still in flight");
    drop(first);
    assert!(engine.output().get().is_loading);

    let retry = engine.update(request("AB", 120.0, 4.0));
    let outcome = retry.expect("dropped request must rebuild").await;

    assert_eq!(
        outcome,
        RebuildOutcome::Committed {
            generation: 2,
            placements: 2
        }
    );
    assert!(!engine.output().get().is_loading);
    assert!(engine.update(request("AB", 120.0, 4.0)).is_none());
}
