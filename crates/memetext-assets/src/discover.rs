//! What is available under an asset root
//!
//! Fonts are the folders of `letters/`, frames and extras are the image files
//! of `frames/` and `extras/`. Everything is returned sorted so pickers list
//! assets in a stable order.

use std::path::Path;

use serde::Serialize;
use walkdir::WalkDir;

use memetext_core::error::{AssetError, ConfigError};
use memetext_core::Result;

/// File extensions accepted as frames and extras
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Everything a picker can offer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetCatalog {
    pub fonts: Vec<String>,
    pub frames: Vec<String>,
    pub extras: Vec<String>,
}

impl AssetCatalog {
    pub fn has_font(&self, font_id: &str) -> bool {
        self.fonts.iter().any(|f| f == font_id)
    }

    pub fn has_frame(&self, filename: &str) -> bool {
        self.frames.iter().any(|f| f == filename)
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty() && self.frames.is_empty() && self.extras.is_empty()
    }
}

/// List fonts, frames and extras under `root`
///
/// A missing `letters/`, `frames/` or `extras/` folder gives an empty list; a
/// missing root is an error.
pub fn discover(root: &Path) -> Result<AssetCatalog> {
    if !root.is_dir() {
        return Err(ConfigError::MissingAssetRoot(root.to_path_buf()).into());
    }

    let catalog = AssetCatalog {
        fonts: list_entries(&root.join("letters"), |entry| entry.file_type().is_dir())?,
        frames: list_entries(&root.join("frames"), is_image_file)?,
        extras: list_entries(&root.join("extras"), is_image_file)?,
    };
    log::debug!(
        "Discovered {} fonts, {} frames, {} extras under {}",
        catalog.fonts.len(),
        catalog.frames.len(),
        catalog.extras.len(),
        root.display()
    );
    Ok(catalog)
}

/// Whether `name` carries one of [`IMAGE_EXTENSIONS`], ignoring case
pub fn is_image_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

fn is_image_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() && entry.file_name().to_str().is_some_and(is_image_name)
}

fn list_entries(dir: &Path, keep: impl Fn(&walkdir::DirEntry) -> bool) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| AssetError::Discovery {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        if entry.file_name().to_string_lossy().starts_with('.') || !keep(&entry) {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_string()),
            None => log::warn!("Skipping non UTF-8 asset name {}", entry.path().display()),
        }
    }
    names.sort();
    Ok(names)
}
