//! Observable state: one source of truth, many watchers
//!
//! The canvas renderer and every UI panel look at the same layer list and the
//! same layout results. A [`Store`] owns that state and tells its listeners
//! after every mutation. Cloning a store clones the handle, not the data, so a
//! mutation made through any clone reaches every listener. Mutating a detached
//! copy of the state is exactly the bug this type exists to prevent.
//!
//! ```
//! use memetext_core::Store;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let store = Store::new(0u32);
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = seen.clone();
//! store.subscribe(move |value: &u32| counter.store(*value as usize, Ordering::SeqCst));
//!
//! store.clone().update(|value| *value += 7);
//! assert_eq!(seen.load(Ordering::SeqCst), 7);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

/// Handle returned by [`Store::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    state: RwLock<T>,
    listeners: Mutex<Vec<(SubscriptionId, Listener<T>)>>,
    next_id: AtomicU64,
}

/// Shared, observable state cell
pub struct Store<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    pub fn new(state: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(state),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Snapshot of the current state
    pub fn get(&self) -> T {
        self.inner.state.read().clone()
    }

    /// Borrow the current state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.state.read())
    }

    /// Mutate the state, then notify every listener
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = {
            let mut state = self.inner.state.write();
            f(&mut state)
        };
        self.notify();
        result
    }

    /// Mutate the state and notify only when `f` reports a change
    pub fn modify(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let changed = {
            let mut state = self.inner.state.write();
            f(&mut state)
        };
        if changed {
            self.notify();
        }
        changed
    }

    /// Replace the whole state
    pub fn set(&self, value: T) {
        self.update(|state| *state = value);
    }

    /// Register a listener called with the new state after every change
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener, returning whether it was registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// Whether both handles point at the same state
    pub fn same_store(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // Listeners run on a snapshot with no lock held, so a listener may
    // mutate the store (or subscribe) without deadlocking.
    fn notify(&self) {
        let listeners: Vec<Listener<T>> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        if listeners.is_empty() {
            return;
        }

        let snapshot = self.get();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl<T: Clone + Default + Send + Sync + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// A handle that can watch this store but not change it
    pub fn view(&self) -> StoreView<T> {
        StoreView {
            store: self.clone(),
        }
    }
}

/// Read and subscribe access to a [`Store`] owned elsewhere
///
/// Handed out where writes must go through the owner, so the owner can react
/// to every change (a caption's settings and its layout engine, for one).
pub struct StoreView<T> {
    store: Store<T>,
}

impl<T> Clone for StoreView<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> StoreView<T> {
    pub fn get(&self) -> T {
        self.store.get()
    }

    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.store.read(f)
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Whether this view watches `store`
    pub fn views(&self, store: &Store<T>) -> bool {
        self.store.same_store(store)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for StoreView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StoreView").field(&self.store).finish()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.inner.state.read())
            .field("listeners", &self.inner.listeners.lock().len())
            .finish()
    }
}
