//! Assets on disk for memetext
//!
//! [`FsAssetLoader`] turns asset URLs into decoded bitmaps read from an asset
//! root, and [`discover`] lists the fonts, frames and extras found there.

pub mod discover;
pub mod loader;

pub use discover::{discover, is_image_name, AssetCatalog, IMAGE_EXTENSIONS};
pub use loader::{decode_bitmap, FsAssetLoader};
