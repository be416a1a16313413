//! Asset URL layout and layout constants
//!
//! Assets live under three URL prefixes:
//!
//! - `/letters/<font>/<glyph>.png` - one folder per bitmap font
//! - `/extras/<file>` - decorative images users drop on the canvas
//! - `/frames/<file>` - background frames
//!
//! Loaders that read from disk map those URLs onto an asset root directory.
//! The root defaults to `public` and can be moved with the `MEMETEXT_ASSET_ROOT`
//! environment variable:
//!
//! ```bash
//! MEMETEXT_ASSET_ROOT=/srv/memetext/public ./my_app
//! ```

use std::path::PathBuf;
use std::sync::OnceLock;

/// Default directory the filesystem loader reads from
pub const DEFAULT_ASSET_ROOT: &str = "public";

/// Environment variable overriding [`DEFAULT_ASSET_ROOT`]
pub const ASSET_ROOT_ENV: &str = "MEMETEXT_ASSET_ROOT";

/// Width of a space, as a fraction of the font size
pub const DEFAULT_SPACE_RATIO: f32 = 0.4;

static ASSET_ROOT: OnceLock<PathBuf> = OnceLock::new();

/// The asset root, read from the environment on first call
pub fn asset_root() -> PathBuf {
    ASSET_ROOT
        .get_or_init(|| match std::env::var(ASSET_ROOT_ENV) {
            Ok(val) if !val.trim().is_empty() => {
                log::info!("Memetext asset root set to {val} via {ASSET_ROOT_ENV}");
                PathBuf::from(val)
            },
            _ => PathBuf::from(DEFAULT_ASSET_ROOT),
        })
        .clone()
}

/// URL prefixes for the three asset families
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub letters: String,
    pub extras: String,
    pub frames: String,
}

impl AssetPaths {
    /// URL of an extra image
    pub fn extra_url(&self, filename: &str) -> String {
        format!("{}/{filename}", self.extras)
    }

    /// URL of a background frame
    pub fn frame_url(&self, filename: &str) -> String {
        format!("{}/{filename}", self.frames)
    }

    /// URL of one glyph image of a bitmap font
    pub fn glyph_url(&self, font_id: &str, glyph_name: &str) -> String {
        format!("{}/{font_id}/{glyph_name}.png", self.letters)
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            letters: "/letters".into(),
            extras: "/extras".into(),
            frames: "/frames".into(),
        }
    }
}

/// Knobs of the glyph layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// A space advances the cursor by `space_ratio * font_size`
    pub space_ratio: f32,
    pub paths: AssetPaths,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            space_ratio: DEFAULT_SPACE_RATIO,
            paths: AssetPaths::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_urls() {
        let paths = AssetPaths::default();
        assert_eq!(paths.extra_url("star.png"), "/extras/star.png");
        assert_eq!(paths.frame_url("bfa.png"), "/frames/bfa.png");
        assert_eq!(
            paths.glyph_url("freebooter-purple", "_a"),
            "/letters/freebooter-purple/_a.png"
        );
    }

    #[test]
    fn default_space_ratio() {
        assert_eq!(LayoutConfig::default().space_ratio, 0.4);
    }

    #[test]
    fn asset_root_is_stable() {
        assert_eq!(asset_root(), asset_root());
    }
}
