//! Injection of reducers and logic into a running store.

use std::collections::HashSet;
use std::sync::Arc;

use crate::logic::{Logic, LogicMiddleware};
use crate::registry::error::RegistryError;
use crate::store::{Reducer, SharedReducer, Store};

/// Verify the store can accept injected modules.
///
/// Dispatch, state access and reducer recomposition are part of [`Store`]
/// itself; the logic middleware is the one optional piece.
pub fn check_store(store: &Store) -> Result<&LogicMiddleware, RegistryError> {
    store
        .logic_middleware()
        .ok_or_else(|| RegistryError::InvalidStore {
            message: "store must be built with a logic middleware".to_string(),
        })
}

/// Injects reducers into one store.
#[derive(Debug, Clone)]
pub struct ReducerInjector {
    store: Store,
}

impl ReducerInjector {
    /// Register `reducer` under `name` and recombine the root reducer.
    ///
    /// A name that is already registered is left alone.
    pub fn inject(&self, name: &str, reducer: impl Reducer) -> Result<(), RegistryError> {
        self.inject_shared(name, Arc::new(reducer))
    }

    pub fn inject_shared(&self, name: &str, reducer: SharedReducer) -> Result<(), RegistryError> {
        validate_reducer_name(name)?;

        if self.store.has_reducer(name) {
            tracing::debug!(store = %self.store.id(), reducer = name, "Reducer already registered");
            return Ok(());
        }
        if !self.store.registry().insert_if_absent(name, reducer) {
            return Ok(());
        }

        tracing::debug!(store = %self.store.id(), reducer = name, "Reducer injected");
        self.store.replace_reducers();
        Ok(())
    }
}

/// Injects logic descriptors into one store.
#[derive(Debug, Clone)]
pub struct LogicInjector {
    store: Store,
    middleware: LogicMiddleware,
}

impl LogicInjector {
    /// Install `logic`. Descriptors already installed are skipped.
    pub fn inject(&self, logic: Vec<Arc<Logic>>) -> Result<(), RegistryError> {
        validate_logic(&logic)?;
        let added = self.middleware.add_logic(&self.store, logic);
        tracing::debug!(store = %self.store.id(), added, "Logic injected");
        Ok(())
    }
}

/// Both injectors bound to one store.
#[derive(Debug, Clone)]
pub struct Injectors {
    reducer: ReducerInjector,
    logic: LogicInjector,
}

impl Injectors {
    pub fn inject_reducer(&self, name: &str, reducer: impl Reducer) -> Result<(), RegistryError> {
        self.reducer.inject(name, reducer)
    }

    pub fn inject_logic(&self, logic: Vec<Arc<Logic>>) -> Result<(), RegistryError> {
        self.logic.inject(logic)
    }
}

/// Injectors scoped to `store`.
pub fn get_injectors(store: &Store) -> Result<Injectors, RegistryError> {
    Ok(Injectors {
        reducer: inject_async_reducer(store)?,
        logic: inject_async_logic(store)?,
    })
}

pub fn inject_async_reducer(store: &Store) -> Result<ReducerInjector, RegistryError> {
    check_store(store)?;
    Ok(ReducerInjector {
        store: store.clone(),
    })
}

pub fn inject_async_logic(store: &Store) -> Result<LogicInjector, RegistryError> {
    let middleware = check_store(store)?.clone();
    Ok(LogicInjector {
        store: store.clone(),
        middleware,
    })
}

fn validate_reducer_name(name: &str) -> Result<(), RegistryError> {
    if name.trim().is_empty() {
        return Err(RegistryError::InvalidReducerName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Reject a batch of descriptors in which a name appears twice.
pub(crate) fn validate_logic(logic: &[Arc<Logic>]) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for entry in logic {
        if !seen.insert(entry.name()) {
            return Err(RegistryError::InvalidLogic {
                message: format!(
                    "logic '{}' appears more than once in one injection",
                    entry.name()
                ),
            });
        }
    }
    Ok(())
}
