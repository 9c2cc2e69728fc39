//! Action creators.

use serde_json::{json, Value};

use crate::action::{Action, ActionError};
use crate::home::constants::{
    CHANGE_USERNAME, LOAD_REPOS, LOAD_REPOS_ERROR, LOAD_REPOS_SUCCESS, LOCATION_CHANGE,
};

/// Start loading the repositories of the current username.
pub fn load_repos() -> Action {
    Action::new(LOAD_REPOS)
}

/// Repositories arrived for `username`.
pub fn repos_loaded(repos: Value, username: &str) -> Action {
    Action::with_payload(
        LOAD_REPOS_SUCCESS,
        json!({ "repos": repos, "username": username }),
    )
}

/// Loading failed with `error`.
pub fn repo_loading_error(error: ActionError) -> Action {
    Action::failure(LOAD_REPOS_ERROR, error)
}

pub fn change_username(name: &str) -> Action {
    Action::with_payload(CHANGE_USERNAME, json!({ "name": name }))
}

pub fn location_change(pathname: &str) -> Action {
    Action::with_payload(LOCATION_CHANGE, json!({ "pathname": pathname }))
}
