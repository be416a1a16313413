//! Error types for memetext
//!
//! The layout engine and the layer model never fail: missing glyphs, stale
//! rebuilds and unknown layer ids all degrade to "nothing rendered". Errors
//! only exist at the edges, where files are read, images decoded and user
//! input parsed.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MemeError>;

/// Main error type for memetext
#[derive(Debug, Error)]
pub enum MemeError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid layer id: {0}")]
    InvalidLayerId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

/// Asset loading errors
///
/// Loaders log these and hand the engine an "unavailable" sentinel instead.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset url escapes the asset root: {0}")]
    OutsideRoot(String),

    #[error("Failed to read {url}: {source}")]
    Read {
        url: String,
        source: std::io::Error,
    },

    #[error("Failed to decode {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("Failed to list {}: {reason}", path.display())]
    Discovery { path: PathBuf, reason: String },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Font size must be a positive number, got {0}")]
    InvalidFontSize(f32),

    #[error("Spacing must be zero or more, got {0}")]
    InvalidSpacing(f32),

    #[error("Asset root does not exist: {}", .0.display())]
    MissingAssetRoot(PathBuf),
}
