//! Which image draws which character
//!
//! Bitmap fonts are folders of PNG files, one per character. Upper and lower
//! case letters need different file names on case-insensitive filesystems, so
//! lowercase glyphs carry a leading underscore:
//!
//! | char      | file        |
//! |-----------|-------------|
//! | `A`..`Z`  | `A.png`     |
//! | `a`..`z`  | `_a.png`    |
//! | `0`..`9`  | `0.png`     |
//! | `-`       | `-.png`     |
//! | `' '`     | (gap)       |
//!
//! Everything else has no glyph and is dropped.

use memetext_core::AssetPaths;

/// What one input character turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphSlot {
    /// A space: advances the cursor, draws nothing
    Gap,
    /// An image to resolve
    Asset(String),
    /// No glyph exists for this character
    Skip,
}

impl GlyphSlot {
    pub fn url(&self) -> Option<&str> {
        match self {
            GlyphSlot::Asset(url) => Some(url),
            _ => None,
        }
    }
}

/// File stem of the glyph image for `ch`, if the font format has one
pub fn glyph_name(ch: char) -> Option<String> {
    match ch {
        '-' | '0'..='9' | 'A'..='Z' => Some(ch.to_string()),
        'a'..='z' => Some(format!("_{ch}")),
        _ => None,
    }
}

/// Classify one character of `font_id`
pub fn glyph_slot(paths: &AssetPaths, font_id: &str, ch: char) -> GlyphSlot {
    if ch == ' ' {
        return GlyphSlot::Gap;
    }
    match glyph_name(ch) {
        Some(name) => GlyphSlot::Asset(paths.glyph_url(font_id, &name)),
        None => GlyphSlot::Skip,
    }
}

/// Classify every character of `text`, in order
pub fn glyph_slots(paths: &AssetPaths, font_id: &str, text: &str) -> Vec<(char, GlyphSlot)> {
    text.chars()
        .map(|ch| (ch, glyph_slot(paths, font_id, ch)))
        .collect()
}
