//! The store: action bus, state container and reducer recomposition.
//!
//! ```text
//! dispatch ──→ logic middleware ──→ root reducer ──→ subscribers
//!                    │                                    
//!                    └──→ process (async) ──→ dispatch(terminal)
//! ```

mod handle;
mod reducer;
mod state;

pub use handle::{StoreHandle, StoreId};
pub use reducer::{CombinedReducer, Reducer, SharedReducer};
pub use state::{Listener, Store, StoreBuilder, INIT, REPLACE};
