//! Module registry: reducers and logic injected after startup.
//!
//! Registration is idempotent. Re-injecting a reducer name or a logic
//! descriptor that is already live changes nothing, so feature modules can
//! inject themselves every time they are composed.

mod error;
mod injectors;
mod modules;

pub use error::RegistryError;
pub use injectors::{
    check_store, get_injectors, inject_async_logic, inject_async_reducer, Injectors,
    LogicInjector, ReducerInjector,
};
pub use modules::ModuleRegistry;

pub(crate) use injectors::validate_logic;
