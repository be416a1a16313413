//! Memetext Core: the shared vocabulary of the editor
//!
//! Text goes in as characters and comes out as positioned bitmap glyphs sitting
//! on a canvas next to user-added image layers. This crate holds the pieces
//! every other memetext crate agrees on:
//!
//! - [`types`] - bitmaps, glyph placements, layout requests and outputs
//! - [`traits::AssetLoader`] - the boundary where URLs become decoded images
//! - [`cache::ImageCache`] - the shared, append-only URL to image map
//! - [`store::Store`] - the observable single source of truth for UI state
//! - [`config`] - asset URL prefixes, layout constants, environment overrides
//! - [`error`] - the error types used at the crate boundaries
//!
//! ## A loader in five lines
//!
//! ```rust
//! use futures::future::{self, BoxFuture, FutureExt};
//! use memetext_core::traits::AssetLoader;
//! use memetext_core::types::ImageHandle;
//!
//! struct NothingLoader;
//!
//! impl AssetLoader for NothingLoader {
//!     fn name(&self) -> &'static str {
//!         "nothing"
//!     }
//!
//!     fn load(&self, _url: &str) -> BoxFuture<'static, Option<ImageHandle>> {
//!         future::ready(None).boxed()
//!     }
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod store;
pub mod traits;

pub use cache::{ImageCache, SharedImageCache};
pub use config::{AssetPaths, LayoutConfig};
pub use error::{MemeError, Result};
pub use store::{Store, StoreView, SubscriptionId};
pub use traits::AssetLoader;

/// The data structures shared by the layout engine, the layer model and the renderer
pub mod types {
    use std::sync::Arc;

    use crate::error::ConfigError;

    /// How pixels are arranged in the bitmap
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BitmapFormat {
        Rgba8,
        Rgb8,
        Gray8,
    }

    impl BitmapFormat {
        pub fn bytes_per_pixel(self) -> usize {
            match self {
                BitmapFormat::Rgba8 => 4,
                BitmapFormat::Rgb8 => 3,
                BitmapFormat::Gray8 => 1,
            }
        }
    }

    /// A decoded image: one glyph of a bitmap font, a frame, or an extra
    #[derive(Debug, Clone, PartialEq)]
    pub struct Bitmap {
        pub width: u32,
        pub height: u32,
        pub format: BitmapFormat,
        pub data: Vec<u8>,
    }

    impl Bitmap {
        /// A fully transparent RGBA bitmap of the given size
        pub fn transparent(width: u32, height: u32) -> Self {
            let len = width as usize * height as usize * BitmapFormat::Rgba8.bytes_per_pixel();
            Self {
                width,
                height,
                format: BitmapFormat::Rgba8,
                data: vec![0; len],
            }
        }

        /// Width over height, or `None` for a zero-height image
        pub fn aspect_ratio(&self) -> Option<f32> {
            if self.height == 0 {
                None
            } else {
                Some(self.width as f32 / self.height as f32)
            }
        }
    }

    /// Shared handle to a decoded image
    ///
    /// Handles are cheap to clone and never mutated after decoding, so the
    /// same glyph can sit in many layout results at once.
    pub type ImageHandle = Arc<Bitmap>;

    /// One glyph image, scaled and positioned on the text line
    #[derive(Debug, Clone, PartialEq)]
    pub struct GlyphPlacement {
        pub image: ImageHandle,
        pub x: f32,
        pub y: f32,
        pub width: f32,
        pub height: f32,
        /// `<char index>-<char>`, unique within one layout result
        pub key: String,
    }

    /// The four inputs of a layout rebuild, sampled together
    #[derive(Debug, Clone, PartialEq)]
    pub struct LayoutRequest {
        pub text: String,
        pub font_id: String,
        pub font_size: f32,
        pub spacing: f32,
    }

    impl LayoutRequest {
        pub fn new(
            text: impl Into<String>,
            font_id: impl Into<String>,
            font_size: f32,
            spacing: f32,
        ) -> Self {
            Self {
                text: text.into(),
                font_id: font_id.into(),
                font_size,
                spacing,
            }
        }

        /// Nothing to lay out: no text or no font
        pub fn is_blank(&self) -> bool {
            self.text.is_empty() || self.font_id.is_empty()
        }

        /// Check the numeric inputs coming from untrusted sources (CLI, settings files)
        pub fn validate(&self) -> std::result::Result<(), ConfigError> {
            if !self.font_size.is_finite() || self.font_size <= 0.0 {
                return Err(ConfigError::InvalidFontSize(self.font_size));
            }
            if !self.spacing.is_finite() || self.spacing < 0.0 {
                return Err(ConfigError::InvalidSpacing(self.spacing));
            }
            Ok(())
        }
    }

    /// What the layout engine publishes
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct LayoutOutput {
        pub placements: Vec<GlyphPlacement>,
        pub is_loading: bool,
    }

    impl LayoutOutput {
        /// Horizontal extent of the placed glyphs
        pub fn advance_width(&self) -> f32 {
            self.placements
                .iter()
                .map(|p| p.x + p.width)
                .fold(0.0, f32::max)
        }

        pub fn is_empty(&self) -> bool {
            self.placements.is_empty()
        }
    }
}
