//! Logic coordination: descriptors, the coordinating middleware and the
//! once-per-store bootstrap guard.
//!
//! # Invocation lifecycle
//!
//! ```text
//! Idle ──trigger──→ Running ──settle──→ Idle (terminal event)
//!                      │
//!                      ├──cancel kind──→ Cancelled (result discarded)
//!                      └──newer trigger (latest)──→ Superseded (result discarded)
//! ```

mod bootstrap;
mod descriptor;
mod middleware;
mod slot;

pub use bootstrap::{on_init, BootstrapMarkers};
pub use descriptor::{Dependencies, Logic, LogicBuilder, ProcessContext, ProcessFuture};
pub use middleware::LogicMiddleware;
pub use slot::Generation;
