//! The contract between the editor and whatever decodes its images
//!
//! The layout engine and the layer model never touch files, HTTP or image
//! codecs. They ask an [`AssetLoader`] for a URL and get back either a decoded
//! image or nothing. Swapping the loader swaps the environment: the filesystem
//! loader in `memetext-assets` for the CLI, an in-memory fake for tests.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::types::ImageHandle;

/// Turns asset URLs into decoded images
///
/// ```ignore
/// struct MyLoader;
///
/// impl AssetLoader for MyLoader {
///     fn name(&self) -> &'static str {
///         "my-loader"
///     }
///
///     fn load(&self, url: &str) -> BoxFuture<'static, Option<ImageHandle>> {
///         let url = url.to_owned();
///         async move {
///             // Fetch and decode, None when the asset does not exist
///             decode(&url).await.ok()
///         }
///         .boxed()
///     }
/// }
/// ```
pub trait AssetLoader: Send + Sync {
    /// Used in logs
    fn name(&self) -> &'static str;

    /// Start decoding `url`
    ///
    /// Resolves to `None` when the asset is missing or cannot be decoded.
    /// Failures are never errors here: a missing glyph is simply skipped.
    fn load(&self, url: &str) -> BoxFuture<'static, Option<ImageHandle>>;
}

impl<T: AssetLoader + ?Sized> AssetLoader for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn load(&self, url: &str) -> BoxFuture<'static, Option<ImageHandle>> {
        (**self).load(url)
    }
}
