//! Action kinds used by the repository listing feature.

pub const LOAD_REPOS: &str = "app/LOAD_REPOS";
pub const LOAD_REPOS_SUCCESS: &str = "app/LOAD_REPOS_SUCCESS";
pub const LOAD_REPOS_ERROR: &str = "app/LOAD_REPOS_ERROR";
pub const CHANGE_USERNAME: &str = "home/CHANGE_USERNAME";

/// Route change, emitted by the router outside this crate.
pub const LOCATION_CHANGE: &str = "router/LOCATION_CHANGE";
