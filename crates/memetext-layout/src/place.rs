//! Simple left-to-right placement of resolved glyph images

use memetext_core::types::{GlyphPlacement, ImageHandle};

use crate::glyph::GlyphSlot;

/// Line metrics for one placement pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Height every glyph is scaled to
    pub font_size: f32,
    /// Extra room after every drawn glyph
    pub spacing: f32,
    /// Space width as a fraction of `font_size`
    pub space_ratio: f32,
}

/// Position glyph images along one line
///
/// `slots` and `images` run in parallel, one entry per input character.
/// Gaps advance the cursor by `space_ratio * font_size`. Characters without
/// an image (no glyph, or the asset was unavailable) are skipped and do not
/// move the cursor. Each image is scaled to `font_size` tall, keeping its
/// aspect ratio, and the cursor moves past it by its width plus `spacing`.
pub fn place_glyphs(
    slots: &[(char, GlyphSlot)],
    images: &[Option<ImageHandle>],
    metrics: LineMetrics,
) -> Vec<GlyphPlacement> {
    let mut placements = Vec::with_capacity(images.iter().flatten().count());
    let mut x = 0.0;
    let height = metrics.font_size;

    for (index, ((ch, slot), image)) in slots.iter().zip(images).enumerate() {
        if *slot == GlyphSlot::Gap {
            x += height * metrics.space_ratio;
            continue;
        }

        let Some(image) = image else {
            continue;
        };

        let Some(aspect) = image.aspect_ratio() else {
            log::warn!("Skipping zero-height glyph image for {ch:?}");
            continue;
        };

        let width = height * aspect;
        placements.push(GlyphPlacement {
            image: image.clone(),
            x,
            y: 0.0,
            width,
            height,
            key: format!("{index}-{ch}"),
        });
        x += width + metrics.spacing;
    }

    placements
}
