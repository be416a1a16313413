//! Bitmap glyph layout for memetext
//!
//! Fonts here are not outlines but folders of pre-rendered PNG glyphs. Laying
//! out a line means three steps:
//!
//! 1. **Map** - each character becomes a glyph URL, a gap, or nothing ([`glyph`])
//! 2. **Resolve** - every glyph URL is loaded through the shared image cache, concurrently
//! 3. **Place** - glyphs are scaled to the font size and lined up left to right ([`place`])
//!
//! [`LayoutEngine`] wraps the three steps with generation tracking so that
//! only the newest request ever reaches the output.

pub mod engine;
pub mod glyph;
pub mod place;

pub use engine::{LayoutEngine, Rebuild, RebuildOutcome};
pub use glyph::{glyph_name, glyph_slot, GlyphSlot};
pub use place::{place_glyphs, LineMetrics};
