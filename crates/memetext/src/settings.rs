//! Editor settings with the defaults a fresh canvas starts from

use memetext_core::types::LayoutRequest;

pub const DEFAULT_FONT: &str = "freebooter-purple";
pub const DEFAULT_FRAME: &str = "bfa.png";

/// What the user typed and how it should look
#[derive(Debug, Clone, PartialEq)]
pub struct TextSettings {
    pub text: String,
    pub font_id: String,
    pub font_size: f32,
    pub spacing: f32,
}

impl TextSettings {
    /// Main caption: "WoW" at 120
    pub fn main_default() -> Self {
        Self {
            text: "WoW".into(),
            font_id: DEFAULT_FONT.into(),
            font_size: 120.0,
            spacing: 4.0,
        }
    }

    /// Sub caption: empty, half size
    pub fn sub_default() -> Self {
        Self {
            text: String::new(),
            font_id: DEFAULT_FONT.into(),
            font_size: 60.0,
            spacing: 2.0,
        }
    }

    pub fn request(&self) -> LayoutRequest {
        LayoutRequest::new(&self.text, &self.font_id, self.font_size, self.spacing)
    }
}

/// Canvas background fill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Background {
    #[default]
    Transparent,
    /// Straight RGBA
    Solid([u8; 4]),
}

impl Background {
    /// Parse `transparent` or a `#rrggbb` / `#rrggbbaa` hex colour
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Some(Background::Transparent);
        }
        let hex = s.strip_prefix('#')?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return None;
        }
        let mut rgba = [0, 0, 0, 255];
        for (i, slot) in rgba.iter_mut().enumerate().take(hex.len() / 2) {
            *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(Background::Solid(rgba))
    }
}

/// Frame and background of the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSettings {
    /// File name under the frames prefix, `None` for no frame
    pub frame: Option<String>,
    pub background: Background,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            frame: Some(DEFAULT_FRAME.into()),
            background: Background::Transparent,
        }
    }
}
