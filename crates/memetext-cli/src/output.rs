//! JSON shapes printed by the CLI

use serde::Serialize;

use memetext::types::{GlyphPlacement, LayoutOutput};
use memetext::{Background, PaintItem, PaintPlan};

#[derive(Debug, Serialize)]
pub struct PlacementJson {
    pub key: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&GlyphPlacement> for PlacementJson {
    fn from(p: &GlyphPlacement) -> Self {
        Self {
            key: p.key.clone(),
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
        }
    }
}

fn placements_json(placements: &[GlyphPlacement]) -> Vec<PlacementJson> {
    placements.iter().map(PlacementJson::from).collect()
}

#[derive(Debug, Serialize)]
pub struct LayoutJson {
    pub text: String,
    pub font: String,
    pub font_size: f32,
    pub spacing: f32,
    pub advance_width: f32,
    pub placements: Vec<PlacementJson>,
}

impl LayoutJson {
    pub fn new(
        text: &str,
        font: &str,
        font_size: f32,
        spacing: f32,
        output: &LayoutOutput,
    ) -> Self {
        Self {
            text: text.to_string(),
            font: font.to_string(),
            font_size,
            spacing,
            advance_width: output.advance_width(),
            placements: placements_json(&output.placements),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemJson {
    Text {
        layer: String,
        placements: Vec<PlacementJson>,
    },
    Image {
        id: String,
        width: u32,
        height: u32,
        positioned: bool,
    },
}

impl From<&PaintItem> for ItemJson {
    fn from(item: &PaintItem) -> Self {
        match item {
            PaintItem::Text { layer, placements } => ItemJson::Text {
                layer: layer.to_string(),
                placements: placements_json(placements),
            },
            PaintItem::Image {
                id,
                image,
                positioned,
            } => ItemJson::Image {
                id: id.to_string(),
                width: image.width,
                height: image.height,
                positioned: *positioned,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanJson {
    pub background: String,
    pub frame: Option<String>,
    pub selected: Option<String>,
    pub items: Vec<ItemJson>,
}

impl From<&PaintPlan> for PlanJson {
    fn from(plan: &PaintPlan) -> Self {
        Self {
            background: background_css(plan.background),
            frame: plan.frame_url.clone(),
            selected: plan.selected.map(|id| id.to_string()),
            items: plan.items.iter().map(ItemJson::from).collect(),
        }
    }
}

pub fn background_css(background: Background) -> String {
    match background {
        Background::Transparent => "transparent".into(),
        Background::Solid([r, g, b, a]) => format!("#{r:02x}{g:02x}{b:02x}{a:02x}"),
    }
}
