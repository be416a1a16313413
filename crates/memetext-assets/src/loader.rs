//! Loading asset URLs from a directory on disk

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use memetext_core::config::asset_root;
use memetext_core::error::AssetError;
use memetext_core::types::{Bitmap, BitmapFormat, ImageHandle};
use memetext_core::AssetLoader;

/// Serves asset URLs from files under `root`
///
/// `/letters/impact/A.png` is read from `<root>/letters/impact/A.png`.
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Loader rooted at `MEMETEXT_ASSET_ROOT`, or `public`
    pub fn from_env() -> Self {
        Self::new(asset_root())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `url`
    ///
    /// URLs that climb out of the root (`..`) or name an absolute path after
    /// the leading slash are rejected.
    pub fn resolve_path(&self, url: &str) -> Result<PathBuf, AssetError> {
        let relative = Path::new(url.trim_start_matches('/'));
        if relative.as_os_str().is_empty() {
            return Err(AssetError::NotFound(url.to_string()));
        }
        if url.contains('\\')
            || !relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(AssetError::OutsideRoot(url.to_string()));
        }
        Ok(self.root.join(relative))
    }

    /// Read and decode `url`, reporting why it failed
    pub async fn try_load(&self, url: &str) -> Result<Bitmap, AssetError> {
        let path = self.resolve_path(url)?;
        let bytes = tokio::fs::read(&path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(url.to_string())
            } else {
                AssetError::Read {
                    url: url.to_string(),
                    source,
                }
            }
        })?;
        decode_bitmap(url, &bytes)
    }
}

impl AssetLoader for FsAssetLoader {
    fn name(&self) -> &'static str {
        "fs"
    }

    fn load(&self, url: &str) -> BoxFuture<'static, Option<ImageHandle>> {
        let loader = self.clone();
        let url = url.to_string();
        async move {
            match loader.try_load(&url).await {
                Ok(bitmap) => {
                    log::debug!("Loaded {url} ({}x{})", bitmap.width, bitmap.height);
                    Some(Arc::new(bitmap))
                },
                Err(AssetError::NotFound(_)) => {
                    log::debug!("No asset at {url}");
                    None
                },
                Err(e) => {
                    log::warn!("{e}");
                    None
                },
            }
        }
        .boxed()
    }
}

/// Decode PNG, JPEG or WebP bytes into an RGBA bitmap
pub fn decode_bitmap(url: &str, bytes: &[u8]) -> Result<Bitmap, AssetError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| AssetError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let rgba = decoded.to_rgba8();
    Ok(Bitmap {
        width: rgba.width(),
        height: rgba.height(),
        format: BitmapFormat::Rgba8,
        data: rgba.into_raw(),
    })
}
