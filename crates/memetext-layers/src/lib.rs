//! Canvas layers for memetext
//!
//! The canvas always has two text layers. Users stack any number of extra
//! images on top, reorder them, and remove them again. All of that lives in a
//! single [`LayerState`] inside a [`memetext_core::Store`]; [`LayerModel`] is
//! the set of operations that mutate it.

pub mod id;
pub mod model;
pub mod state;

pub use id::LayerId;
pub use model::{AddedExtra, ExtraLoad, LayerModel};
pub use state::{InvariantViolation, Layer, LayerState};
