//! Reducers and root reducer composition.

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::action::Action;

/// Transforms one state slice based on an action.
///
/// A reducer receives `Value::Null` when its slice does not exist yet and
/// must answer with its initial state. It should be a pure function:
/// (State, Action) -> State.
pub trait Reducer: Send + Sync + 'static {
    fn reduce(&self, state: Value, action: &Action) -> Value;
}

impl<F> Reducer for F
where
    F: Fn(Value, &Action) -> Value + Send + Sync + 'static,
{
    fn reduce(&self, state: Value, action: &Action) -> Value {
        self(state, action)
    }
}

/// Shared, type-erased reducer.
pub type SharedReducer = Arc<dyn Reducer>;

/// Root state-transition function built from named slice reducers.
///
/// Each reducer owns the top-level key matching its name. Keys without a
/// reducer are carried through untouched so preloaded state survives until
/// its reducer is injected.
#[derive(Clone, Default)]
pub struct CombinedReducer {
    slices: Vec<(String, SharedReducer)>,
}

impl CombinedReducer {
    pub fn new(slices: Vec<(String, SharedReducer)>) -> Self {
        Self { slices }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slices.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn reduce(&self, state: Value, action: &Action) -> Value {
        let mut root = match state {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (name, reducer) in &self.slices {
            let slice = root.remove(name).unwrap_or(Value::Null);
            root.insert(name.clone(), reducer.reduce(slice, action));
        }
        Value::Object(root)
    }
}

impl std::fmt::Debug for CombinedReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("slices", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
