//! One-time bootstrap effects per store instance.

use parking_lot::Mutex;
use std::collections::HashSet;

use crate::store::StoreHandle;

/// Set of bootstrap markers owned by a single store.
///
/// Markers are never reset. A fresh store starts with an empty set.
#[derive(Debug, Default)]
pub struct BootstrapMarkers {
    fired: Mutex<HashSet<String>>,
}

impl BootstrapMarkers {
    /// Set `key`. Returns `true` if it was not set before.
    pub fn mark(&self, key: &str) -> bool {
        self.fired.lock().insert(key.to_string())
    }

    pub fn is_marked(&self, key: &str) -> bool {
        self.fired.lock().contains(key)
    }
}

/// Run `effect` the first time `key` is initialised against `store`.
///
/// Later calls for the same store and key are no-ops, regardless of which
/// coordinator makes them. Returns whether the effect ran.
pub fn on_init<F>(store: &dyn StoreHandle, key: &str, effect: F) -> bool
where
    F: FnOnce(),
{
    if !store.bootstrap_markers().mark(key) {
        tracing::trace!(store = %store.id(), key, "Bootstrap already ran");
        return false;
    }
    tracing::debug!(store = %store.id(), key, "Running bootstrap");
    effect();
    true
}
