//! The layer list the canvas paints from

use std::collections::HashSet;

use memetext_core::types::ImageHandle;
use thiserror::Error;

use crate::id::LayerId;

/// A user-added image layer
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub source_url: String,
    /// Unset until the image finishes loading
    pub image: Option<ImageHandle>,
    /// Set once the canvas has given the layer its initial position
    pub positioned: bool,
}

impl Layer {
    pub fn new(id: LayerId, source_url: impl Into<String>) -> Self {
        Self {
            id,
            source_url: source_url.into(),
            image: None,
            positioned: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }
}

/// Extras, paint order and selection
///
/// `z_order` runs bottom to front and always holds both text layers plus
/// exactly the ids in `extras`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerState {
    pub extras: Vec<Layer>,
    pub z_order: Vec<LayerId>,
    pub selected: Option<LayerId>,
}

impl Default for LayerState {
    fn default() -> Self {
        Self {
            extras: Vec::new(),
            z_order: vec![LayerId::MainText, LayerId::SubText],
            selected: None,
        }
    }
}

impl LayerState {
    pub fn extra(&self, id: &LayerId) -> Option<&Layer> {
        self.extras.iter().find(|layer| layer.id == *id)
    }

    pub fn extra_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.extras.iter_mut().find(|layer| layer.id == *id)
    }

    /// Index of `id` in paint order, 0 being the bottom
    pub fn position(&self, id: &LayerId) -> Option<usize> {
        self.z_order.iter().position(|existing| existing == id)
    }

    pub fn contains(&self, id: &LayerId) -> bool {
        self.position(id).is_some()
    }

    pub fn topmost(&self) -> Option<&LayerId> {
        self.z_order.last()
    }

    /// Layers from bottom to front, extras resolved to their entries
    pub fn paint_order(&self) -> impl Iterator<Item = (LayerId, Option<&Layer>)> + '_ {
        self.z_order.iter().map(move |id| (*id, self.extra(id)))
    }

    /// First broken invariant, if any
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for reserved in [LayerId::MainText, LayerId::SubText] {
            let count = self.z_order.iter().filter(|id| **id == reserved).count();
            if count != 1 {
                return Err(InvariantViolation::ReservedCount { id: reserved, count });
            }
        }

        let mut seen = HashSet::new();
        for id in &self.z_order {
            if !seen.insert(*id) {
                return Err(InvariantViolation::Duplicate(*id));
            }
            if id.is_extra() && self.extra(id).is_none() {
                return Err(InvariantViolation::OrphanInZOrder(*id));
            }
        }

        let mut stored = HashSet::new();
        for layer in &self.extras {
            if !layer.id.is_extra() || !stored.insert(layer.id) {
                return Err(InvariantViolation::BadExtra(layer.id));
            }
            if !seen.contains(&layer.id) {
                return Err(InvariantViolation::MissingFromZOrder(layer.id));
            }
        }

        if let Some(selected) = self.selected {
            if !seen.contains(&selected) {
                return Err(InvariantViolation::DanglingSelection(selected));
            }
        }

        Ok(())
    }
}

/// A broken layer-state invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{id} appears {count} times in the z-order")]
    ReservedCount { id: LayerId, count: usize },

    #[error("{0} appears more than once in the z-order")]
    Duplicate(LayerId),

    #[error("{0} is in the z-order but has no extra entry")]
    OrphanInZOrder(LayerId),

    #[error("{0} is stored as an extra but is not a unique extra id")]
    BadExtra(LayerId),

    #[error("{0} is stored as an extra but missing from the z-order")]
    MissingFromZOrder(LayerId),

    #[error("selection {0} is not in the z-order")]
    DanglingSelection(LayerId),
}
