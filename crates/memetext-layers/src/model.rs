//! Operations on the shared layer state
//!
//! [`LayerModel`] is the only way the UI changes layers. Every operation goes
//! through the canonical [`Store`], so the canvas and the layer panel both see
//! it. Operations given an id that is not there do nothing: a delete button
//! pressed twice is not an error.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use memetext_core::{AssetLoader, AssetPaths, Store};

use crate::id::LayerId;
use crate::state::{Layer, LayerState};

/// Completion of an extra's image load
///
/// Resolves to `true` when the image landed on a stored layer, `false` when
/// the load failed or the layer was removed first.
pub type ExtraLoad = BoxFuture<'static, bool>;

/// Result of [`LayerModel::add_extra`]
#[must_use = "the image load only runs when the future is awaited or spawned"]
pub struct AddedExtra {
    pub id: LayerId,
    pub load: ExtraLoad,
}

impl std::fmt::Debug for AddedExtra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddedExtra").field("id", &self.id).finish()
    }
}

/// Layer operations over the shared store
#[derive(Clone)]
pub struct LayerModel {
    store: Store<LayerState>,
    loader: Arc<dyn AssetLoader>,
    paths: AssetPaths,
    next_extra: Arc<AtomicU64>,
}

impl LayerModel {
    pub fn new(loader: Arc<dyn AssetLoader>) -> Self {
        Self::with_paths(loader, AssetPaths::default())
    }

    pub fn with_paths(loader: Arc<dyn AssetLoader>, paths: AssetPaths) -> Self {
        Self {
            store: Store::new(LayerState::default()),
            loader,
            paths,
            next_extra: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The canonical state; subscribe here to repaint
    pub fn store(&self) -> &Store<LayerState> {
        &self.store
    }

    pub fn snapshot(&self) -> LayerState {
        self.store.get()
    }

    /// Add an image layer on top of everything and select it
    ///
    /// The layer exists (without an image) as soon as this returns. The
    /// returned load future writes the decoded image into the stored layer,
    /// found again by id, so listeners see the change.
    pub fn add_extra(&self, filename: &str) -> AddedExtra {
        let id = LayerId::Extra(self.next_extra.fetch_add(1, Ordering::SeqCst) + 1);
        let url = self.paths.extra_url(filename);

        self.store.update(|state| {
            state.extras.push(Layer::new(id, url.clone()));
            state.z_order.push(id);
            state.selected = Some(id);
        });
        log::debug!("LayerModel: added {id} from {url}");

        let pending = self.loader.load(&url);
        let store = self.store.clone();
        let load = async move {
            let Some(image) = pending.await else {
                log::warn!("LayerModel: image for {id} ({url}) is unavailable");
                return false;
            };

            let attached = store.modify(|state| match state.extra_mut(&id) {
                Some(layer) => {
                    layer.image = Some(image);
                    true
                },
                None => false,
            });
            if !attached {
                log::debug!("LayerModel: {id} was removed before its image arrived");
            }
            attached
        }
        .boxed();

        AddedExtra { id, load }
    }

    /// Remove an extra, its z-order slot, and the selection if it pointed there
    ///
    /// Returns whether anything changed. Text layers cannot be removed.
    pub fn remove_extra(&self, id: &LayerId) -> bool {
        if id.is_reserved() {
            return false;
        }
        self.store.modify(|state| {
            let before = (state.extras.len(), state.z_order.len());
            state.extras.retain(|layer| layer.id != *id);
            state.z_order.retain(|existing| existing != id);
            let mut changed = before != (state.extras.len(), state.z_order.len());
            if state.selected == Some(*id) {
                state.selected = None;
                changed = true;
            }
            changed
        })
    }

    /// Swap `id` with the layer just above it
    pub fn move_item_up(&self, id: &LayerId) -> bool {
        self.store.modify(|state| match state.position(id) {
            Some(i) if i + 1 < state.z_order.len() => {
                state.z_order.swap(i, i + 1);
                true
            },
            _ => false,
        })
    }

    /// Swap `id` with the layer just below it
    pub fn move_item_down(&self, id: &LayerId) -> bool {
        self.store.modify(|state| match state.position(id) {
            Some(i) if i > 0 => {
                state.z_order.swap(i, i - 1);
                true
            },
            _ => false,
        })
    }

    /// Select a layer that is on the canvas
    pub fn select(&self, id: &LayerId) -> bool {
        self.store.modify(|state| {
            if state.contains(id) && state.selected != Some(*id) {
                state.selected = Some(*id);
                true
            } else {
                false
            }
        })
    }

    pub fn clear_selection(&self) -> bool {
        self.store.modify(|state| state.selected.take().is_some())
    }

    /// Record that the canvas has placed an extra for the first time
    pub fn mark_positioned(&self, id: &LayerId) -> bool {
        self.store.modify(|state| match state.extra_mut(id) {
            Some(layer) if !layer.positioned => {
                layer.positioned = true;
                true
            },
            _ => false,
        })
    }
}

impl std::fmt::Debug for LayerModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerModel")
            .field("store", &self.store)
            .field("loader", &self.loader.name())
            .field("next_extra", &self.next_extra.load(Ordering::SeqCst))
            .finish()
    }
}
