//! Minimal store shape consumed by the logic coordinator.

use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::action::Action;
use crate::logic::BootstrapMarkers;

/// Stable identity token for a store instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreId(Uuid);

impl StoreId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StoreId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the logic coordinator needs from a store.
///
/// [`crate::store::Store`] implements it; tests may supply lighter doubles.
pub trait StoreHandle: Send + Sync + 'static {
    fn id(&self) -> StoreId;

    fn dispatch(&self, action: Action);

    fn get_state(&self) -> Value;

    /// One-time markers owned by this store instance.
    fn bootstrap_markers(&self) -> &BootstrapMarkers;
}
