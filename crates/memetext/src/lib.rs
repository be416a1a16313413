//! memetext - a meme text editor engine built on bitmap fonts
//!
//! Captions are drawn with fonts that are folders of pre-rendered glyph
//! images, stacked with decorative images on a framed canvas. This crate ties
//! the pieces together:
//!
//! - [`Editor`] owns the two captions, the layer stack and the canvas settings
//! - [`PaintPlan`] is what a renderer draws, back to front
//!
//! # Example
//!
//! ```ignore
//! use memetext::prelude::*;
//!
//! let editor = Editor::new(Arc::new(FsAssetLoader::from_env()));
//! editor.refresh().await;
//!
//! if let Some(rebuild) = editor.main_text().set_text("Much wow") {
//!     rebuild.await;
//! }
//! let extra = editor.layers().add_extra("star.png");
//! extra.load.await;
//!
//! for item in editor.paint_plan().items {
//!     draw(item);
//! }
//! ```
//!
//! # Feature Flags
//!
//! - `fs` (default): filesystem asset loader and asset discovery

pub mod editor;
pub mod plan;
pub mod settings;

pub use editor::{Editor, TextLayer};
pub use plan::{paint_items, PaintItem, PaintPlan};
pub use settings::{Background, CanvasSettings, TextSettings};

pub use memetext_core::{cache, config, error, store, traits, types};
pub use memetext_layers as layers;
pub use memetext_layout as layout;

#[cfg(feature = "fs")]
pub use memetext_assets as assets;

/// Common imports for typical usage
pub mod prelude {
    pub use memetext_core::{
        error::{MemeError, Result},
        traits::AssetLoader,
        types::{GlyphPlacement, ImageHandle, LayoutOutput, LayoutRequest},
        Store,
    };
    pub use memetext_layers::{LayerId, LayerModel};
    pub use memetext_layout::{LayoutEngine, RebuildOutcome};

    #[cfg(feature = "fs")]
    pub use memetext_assets::{discover, AssetCatalog, FsAssetLoader};

    pub use crate::{Background, Editor, PaintItem, PaintPlan, TextSettings};
}
