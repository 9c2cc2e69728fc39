//! Reducers injected into a running store.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::store::SharedReducer;

/// Mapping from reducer name to reducer, owned by one store.
///
/// The first registration of a name wins; entries are never replaced.
#[derive(Default)]
pub struct ModuleRegistry {
    reducers: RwLock<BTreeMap<String, SharedReducer>>,
}

impl ModuleRegistry {
    pub fn contains(&self, name: &str) -> bool {
        self.reducers.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.reducers.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.reducers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.read().is_empty()
    }

    pub fn get(&self, name: &str) -> Option<SharedReducer> {
        self.reducers.read().get(name).cloned()
    }

    /// Insert unless `name` is taken. Returns whether it was inserted.
    pub(crate) fn insert_if_absent(&self, name: &str, reducer: SharedReducer) -> bool {
        let mut reducers = self.reducers.write();
        if reducers.contains_key(name) {
            return false;
        }
        reducers.insert(name.to_string(), reducer);
        true
    }

    pub(crate) fn snapshot(&self) -> Vec<(String, SharedReducer)> {
        self.reducers
            .read()
            .iter()
            .map(|(name, reducer)| (name.clone(), Arc::clone(reducer)))
            .collect()
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("reducers", &self.names())
            .finish()
    }
}
