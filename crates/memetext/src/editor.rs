//! The editor: two text layers, a layer stack, and a canvas

use std::sync::Arc;

use futures::future::{join_all, BoxFuture, FutureExt};
use parking_lot::Mutex;

use memetext_core::types::LayoutOutput;
use memetext_core::{
    AssetLoader, AssetPaths, ImageCache, LayoutConfig, SharedImageCache, Store, StoreView,
};
use memetext_layers::{LayerId, LayerModel};
use memetext_layout::{LayoutEngine, Rebuild, RebuildOutcome};

use crate::plan::{paint_items, PaintPlan};
use crate::settings::{Background, CanvasSettings, TextSettings};

/// Settings of one caption plus the engine that lays it out
///
/// Setters are the only way to change the settings: each one writes the store,
/// then hands back the rebuild when the layout inputs actually changed. The
/// caller drives it. Everyone else gets a read-only [`StoreView`].
#[derive(Debug, Clone)]
pub struct TextLayer {
    settings: Store<TextSettings>,
    engine: LayoutEngine,
}

impl TextLayer {
    fn new(settings: TextSettings, engine: LayoutEngine) -> Self {
        Self {
            settings: Store::new(settings),
            engine,
        }
    }

    pub fn settings(&self) -> StoreView<TextSettings> {
        self.settings.view()
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn output(&self) -> LayoutOutput {
        self.engine.output().get()
    }

    pub fn set_text(&self, text: impl Into<String>) -> Option<Rebuild> {
        let text = text.into();
        self.edit(|s| s.text = text)
    }

    pub fn set_font(&self, font_id: impl Into<String>) -> Option<Rebuild> {
        let font_id = font_id.into();
        self.edit(|s| s.font_id = font_id)
    }

    pub fn set_font_size(&self, font_size: f32) -> Option<Rebuild> {
        self.edit(|s| s.font_size = font_size)
    }

    pub fn set_spacing(&self, spacing: f32) -> Option<Rebuild> {
        self.edit(|s| s.spacing = spacing)
    }

    /// Replace all four settings at once
    pub fn set(&self, settings: TextSettings) -> Option<Rebuild> {
        self.edit(|s| *s = settings)
    }

    /// Lay out the current settings if they differ from the last layout
    pub fn refresh(&self) -> Option<Rebuild> {
        self.engine.update(self.settings.read(TextSettings::request))
    }

    fn edit(&self, f: impl FnOnce(&mut TextSettings)) -> Option<Rebuild> {
        let request = self.settings.update(|s| {
            f(s);
            s.request()
        });
        self.engine.update(request)
    }
}

/// Rebuilds the editor started on its own, held until a caller drives them
#[derive(Clone, Default)]
struct PendingRebuilds(Arc<Mutex<Vec<Rebuild>>>);

impl PendingRebuilds {
    fn push(&self, rebuild: Option<Rebuild>) {
        self.0.lock().extend(rebuild);
    }

    fn take(&self) -> Vec<Rebuild> {
        std::mem::take(&mut *self.0.lock())
    }
}

impl std::fmt::Debug for PendingRebuilds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PendingRebuilds").field(&self.0.lock().len()).finish()
    }
}

/// Everything behind one meme canvas
///
/// Both text layers share one image cache, so a glyph used by both captions
/// is decoded once. Creating an editor starts laying out the default
/// captions right away; [`Editor::refresh`] drives those first rebuilds.
#[derive(Debug, Clone)]
pub struct Editor {
    main: TextLayer,
    sub: TextLayer,
    layers: LayerModel,
    canvas: Store<CanvasSettings>,
    cache: SharedImageCache,
    paths: AssetPaths,
    pending: PendingRebuilds,
}

impl Editor {
    /// Editor with default captions, frame and layout configuration
    pub fn new(loader: Arc<dyn AssetLoader>) -> Self {
        Self::with_config(loader, LayoutConfig::default())
    }

    pub fn with_config(loader: Arc<dyn AssetLoader>, config: LayoutConfig) -> Self {
        let cache: SharedImageCache = Arc::new(ImageCache::new());
        let paths = config.paths.clone();
        let engine = || LayoutEngine::with_cache(loader.clone(), cache.clone(), config.clone());

        let main = TextLayer::new(TextSettings::main_default(), engine());
        let sub = TextLayer::new(TextSettings::sub_default(), engine());

        let pending = PendingRebuilds::default();
        pending.push(main.refresh());
        pending.push(sub.refresh());

        Self {
            main,
            sub,
            layers: LayerModel::with_paths(loader.clone(), paths.clone()),
            canvas: Store::new(CanvasSettings::default()),
            cache,
            paths,
            pending,
        }
    }

    pub fn main_text(&self) -> &TextLayer {
        &self.main
    }

    pub fn sub_text(&self) -> &TextLayer {
        &self.sub
    }

    /// The text layer behind a reserved id
    pub fn text_layer(&self, id: &LayerId) -> Option<&TextLayer> {
        match id {
            LayerId::MainText => Some(&self.main),
            LayerId::SubText => Some(&self.sub),
            LayerId::Extra(_) => None,
        }
    }

    pub fn layers(&self) -> &LayerModel {
        &self.layers
    }

    pub fn canvas(&self) -> &Store<CanvasSettings> {
        &self.canvas
    }

    pub fn cache(&self) -> &SharedImageCache {
        &self.cache
    }

    pub fn set_frame(&self, frame: Option<String>) {
        self.canvas.update(|c| c.frame = frame);
    }

    pub fn set_background(&self, background: Background) {
        self.canvas.update(|c| c.background = background);
    }

    pub fn frame_url(&self) -> Option<String> {
        self.canvas
            .read(|c| c.frame.as_deref().map(|f| self.paths.frame_url(f)))
    }

    /// Lay out both captions from their current settings
    ///
    /// Also drives the rebuilds started when the editor was created. Resolves
    /// to the outcome of each rebuild that ran; a caption whose settings did
    /// not change since its last layout is skipped.
    pub fn refresh(&self) -> BoxFuture<'static, Vec<RebuildOutcome>> {
        let mut pending = self.pending.take();
        pending.extend([self.main.refresh(), self.sub.refresh()].into_iter().flatten());
        join_all(pending).boxed()
    }

    /// Snapshot of what the canvas should draw right now
    pub fn paint_plan(&self) -> PaintPlan {
        let state = self.layers.snapshot();
        let canvas = self.canvas.get();
        PaintPlan {
            background: canvas.background,
            frame_url: canvas.frame.as_deref().map(|f| self.paths.frame_url(f)),
            items: paint_items(&state, &self.main.output(), &self.sub.output()),
            selected: state.selected,
        }
    }
}
