//! Runtime for composing application stores after startup.
//!
//! - [`store`]: the action bus and state container.
//! - [`registry`]: idempotent injection of reducers and logic.
//! - [`logic`]: the coordinator running asynchronous work per action kind,
//!   with cancellation and latest-wins resolution.
//! - [`home`]: the repository listing feature built on top of them.

pub mod action;
pub mod config;
pub mod fetch;
pub mod home;
pub mod logging;
pub mod logic;
pub mod registry;
pub mod store;

pub use action::{Action, ActionError};
pub use logic::{Dependencies, Logic, LogicMiddleware};
pub use registry::{get_injectors, Injectors, RegistryError};
pub use store::{Store, StoreHandle};
