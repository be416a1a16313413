//! Subcommand implementations

pub mod compose;
pub mod info;
pub mod layout;

use std::path::PathBuf;

use anyhow::{bail, Result};
use memetext::assets::{discover, AssetCatalog};
use memetext::config::asset_root;

use crate::cli::RootArg;

/// The asset root from `--root`, the environment, or the default
pub fn resolve_root(arg: &RootArg) -> PathBuf {
    arg.root.clone().unwrap_or_else(asset_root)
}

/// Discover assets and make sure `font` is one of them
pub fn catalog_with_font(root: &std::path::Path, font: &str) -> Result<AssetCatalog> {
    let catalog = discover(root)?;
    if !catalog.has_font(font) {
        bail!(
            "Unknown font '{font}' under {} (available: {})",
            root.display(),
            if catalog.fonts.is_empty() {
                "none".to_string()
            } else {
                catalog.fonts.join(", ")
            }
        );
    }
    Ok(catalog)
}

/// Single-threaded runtime; all the work is file reads and decodes
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
