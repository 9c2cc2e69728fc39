//! Repository listing feature: browse the repositories of a user.
//!
//! The feature is composed into a running store on demand with
//! [`install`], which injects its reducers and logic.

mod actions;
mod constants;
mod logic;
mod reducer;
mod selectors;

pub use actions::{change_username, load_repos, location_change, repo_loading_error, repos_loaded};
pub use constants::{
    CHANGE_USERNAME, LOAD_REPOS, LOAD_REPOS_ERROR, LOAD_REPOS_SUCCESS, LOCATION_CHANGE,
};
pub use logic::{logic, on_logic_init, repos_logic, repos_url, HomeError, REPOS_LOGIC};
pub use reducer::{global_initial_state, global_reducer, home_initial_state, home_reducer};
pub use selectors::{
    select_current_user, select_error, select_loading, select_repos, select_username,
};

use crate::registry::{Injectors, RegistryError};

/// Inject the `home` and `global` reducers.
pub fn inject_reducers(injectors: &Injectors) -> Result<(), RegistryError> {
    injectors.inject_reducer("home", home_reducer)?;
    injectors.inject_reducer("global", global_reducer)
}

/// Inject reducers and logic. Safe to call repeatedly.
pub fn install(injectors: &Injectors, base_url: &str) -> Result<(), RegistryError> {
    inject_reducers(injectors)?;
    injectors.inject_logic(logic(base_url)?)
}
