//! Paint plan: what the canvas draws, back to front

use memetext_core::types::{GlyphPlacement, ImageHandle, LayoutOutput};
use memetext_layers::{LayerId, LayerState};

use crate::settings::Background;

/// One thing to draw
#[derive(Debug, Clone, PartialEq)]
pub enum PaintItem {
    /// A text layer's placed glyphs, possibly none
    Text {
        layer: LayerId,
        placements: Vec<GlyphPlacement>,
    },
    /// A loaded extra image
    Image {
        id: LayerId,
        image: ImageHandle,
        positioned: bool,
    },
}

impl PaintItem {
    pub fn layer_id(&self) -> LayerId {
        match self {
            PaintItem::Text { layer, .. } => *layer,
            PaintItem::Image { id, .. } => *id,
        }
    }
}

/// Everything needed to draw one frame of the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct PaintPlan {
    pub background: Background,
    /// Frame image URL, drawn under every layer
    pub frame_url: Option<String>,
    /// Back to front
    pub items: Vec<PaintItem>,
    pub selected: Option<LayerId>,
}

/// Walk the z-order, resolving text layers to their layout output
///
/// Extras whose image has not loaded are left out.
pub fn paint_items(state: &LayerState, main: &LayoutOutput, sub: &LayoutOutput) -> Vec<PaintItem> {
    state
        .paint_order()
        .filter_map(|(id, extra)| match id {
            LayerId::MainText => Some(PaintItem::Text {
                layer: id,
                placements: main.placements.clone(),
            }),
            LayerId::SubText => Some(PaintItem::Text {
                layer: id,
                placements: sub.placements.clone(),
            }),
            LayerId::Extra(_) => {
                let layer = extra?;
                let image = layer.image.clone()?;
                Some(PaintItem::Image {
                    id,
                    image,
                    positioned: layer.positioned,
                })
            },
        })
        .collect()
}
