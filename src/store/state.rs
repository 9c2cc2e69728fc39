//! Store state container with runtime reducer recomposition.

use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

use crate::action::Action;
use crate::logic::{BootstrapMarkers, LogicMiddleware};
use crate::registry::ModuleRegistry;
use crate::store::handle::{StoreHandle, StoreId};
use crate::store::reducer::{CombinedReducer, Reducer, SharedReducer};

/// Action dispatched once when a store is built.
pub const INIT: &str = "@@store/INIT";

/// Action dispatched after the root reducer is recombined.
pub const REPLACE: &str = "@@store/REPLACE";

/// Observer receiving every action after it has been reduced.
pub type Listener = Arc<dyn Fn(&Action) + Send + Sync>;

/// Application store.
///
/// Cloning is cheap and yields another handle to the same store: the same
/// state, registry and bootstrap markers.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    id: StoreId,
    state: RwLock<Value>,
    /// Reducers given at build time.
    static_reducers: Vec<(String, SharedReducer)>,
    /// Reducers injected after startup.
    registry: ModuleRegistry,
    root: RwLock<Arc<CombinedReducer>>,
    listeners: RwLock<Vec<Listener>>,
    logic: Option<LogicMiddleware>,
    markers: BootstrapMarkers,
}

/// Builder for [`Store`].
#[derive(Default)]
pub struct StoreBuilder {
    reducers: Vec<(String, SharedReducer)>,
    initial_state: Option<Value>,
    logic: Option<LogicMiddleware>,
}

impl StoreBuilder {
    /// Add a reducer present from startup.
    pub fn reducer(mut self, name: impl Into<String>, reducer: impl Reducer) -> Self {
        let reducer: SharedReducer = Arc::new(reducer);
        self.reducers.push((name.into(), reducer));
        self
    }

    /// Preloaded state. Defaults to an empty object.
    pub fn initial_state(mut self, state: Value) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Install the logic middleware.
    pub fn logic(mut self, middleware: LogicMiddleware) -> Self {
        self.logic = Some(middleware);
        self
    }

    pub fn build(self) -> Store {
        let root = CombinedReducer::new(self.reducers.clone());
        let state = self
            .initial_state
            .unwrap_or_else(|| Value::Object(Default::default()));

        let store = Store {
            inner: Arc::new(StoreInner {
                id: StoreId::new(),
                state: RwLock::new(state),
                static_reducers: self.reducers,
                registry: ModuleRegistry::default(),
                root: RwLock::new(Arc::new(root)),
                listeners: RwLock::new(Vec::new()),
                logic: self.logic,
                markers: BootstrapMarkers::default(),
            }),
        };

        store.reduce_and_notify(Action::new(INIT));
        tracing::debug!(store = %store.id(), "Store created");

        if let Some(logic) = &store.inner.logic {
            logic.attach(&store);
        }

        store
    }
}

impl Store {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    pub fn id(&self) -> StoreId {
        self.inner.id
    }

    /// Dispatch an action.
    ///
    /// The logic middleware sees the action first, then the root reducer
    /// applies it and subscribers are notified. Asynchronous work started by
    /// the action continues after this returns.
    pub fn dispatch(&self, action: Action) {
        tracing::trace!(store = %self.id(), kind = %action.kind, "Dispatch");
        match &self.inner.logic {
            Some(logic) => {
                let handle: Arc<dyn StoreHandle> = Arc::new(self.clone());
                logic.handle(handle, action, |action| self.reduce_and_notify(action));
            }
            None => self.reduce_and_notify(action),
        }
    }

    /// Snapshot of the current state.
    pub fn get_state(&self) -> Value {
        self.inner.state.read().clone()
    }

    /// Register an observer for reduced actions.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&Action) + Send + Sync + 'static,
    {
        self.inner.listeners.write().push(Arc::new(listener));
    }

    /// Rebuild the root reducer from startup and injected reducers.
    ///
    /// Dispatches [`REPLACE`] so newly added reducers seed their slice before
    /// this returns.
    pub fn replace_reducers(&self) {
        {
            // Snapshot under the root lock so a concurrent rebuild from an
            // older snapshot cannot overwrite this one.
            let mut root = self.inner.root.write();
            let mut slices = self.inner.static_reducers.clone();
            for (name, reducer) in self.inner.registry.snapshot() {
                if !slices.iter().any(|(existing, _)| existing == &name) {
                    slices.push((name, reducer));
                }
            }
            let combined = CombinedReducer::new(slices);
            tracing::debug!(
                store = %self.id(),
                reducers = combined.len(),
                "Root reducer recombined"
            );
            *root = Arc::new(combined);
        }
        self.reduce_and_notify(Action::new(REPLACE));
    }

    /// Reducers injected after startup.
    pub fn registry(&self) -> &ModuleRegistry {
        &self.inner.registry
    }

    /// Whether a reducer with `name` is already part of the root reducer.
    pub fn has_reducer(&self, name: &str) -> bool {
        self.inner
            .static_reducers
            .iter()
            .any(|(existing, _)| existing == name)
            || self.inner.registry.contains(name)
    }

    /// Names of the reducers injected after startup, sorted.
    pub fn injected_reducer_names(&self) -> Vec<String> {
        self.inner.registry.names()
    }

    pub fn logic_middleware(&self) -> Option<&LogicMiddleware> {
        self.inner.logic.as_ref()
    }

    pub fn bootstrap_markers(&self) -> &BootstrapMarkers {
        &self.inner.markers
    }

    fn reduce_and_notify(&self, action: Action) {
        let root = Arc::clone(&*self.inner.root.read());
        {
            let mut state = self.inner.state.write();
            let current = std::mem::take(&mut *state);
            *state = root.reduce(current, &action);
        }

        let listeners = self.inner.listeners.read().clone();
        for listener in listeners {
            listener(&action);
        }
    }
}

impl StoreHandle for Store {
    fn id(&self) -> StoreId {
        Store::id(self)
    }

    fn dispatch(&self, action: Action) {
        Store::dispatch(self, action)
    }

    fn get_state(&self) -> Value {
        Store::get_state(self)
    }

    fn bootstrap_markers(&self) -> &BootstrapMarkers {
        Store::bootstrap_markers(self)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("id", &self.inner.id)
            .field("root", &**self.inner.root.read())
            .field("has_logic", &self.inner.logic.is_some())
            .finish()
    }
}
