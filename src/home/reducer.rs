//! Reducers for the `home` and `global` slices.

use serde_json::{json, Value};

use crate::action::Action;
use crate::home::constants::{CHANGE_USERNAME, LOAD_REPOS, LOAD_REPOS_ERROR, LOAD_REPOS_SUCCESS};

pub fn home_initial_state() -> Value {
    json!({ "username": "" })
}

pub fn global_initial_state() -> Value {
    json!({
        "loading": false,
        "error": false,
        "current_user": false,
        "user_data": { "repositories": false },
    })
}

/// Owns the username being browsed. `@` characters are dropped.
pub fn home_reducer(state: Value, action: &Action) -> Value {
    let mut state = if !state.is_object() {
        home_initial_state()
    } else {
        state
    };

    if action.is(CHANGE_USERNAME) {
        let name = action
            .field("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .replace('@', "");
        state["username"] = Value::String(name);
    }
    state
}

/// Owns loading flags, the last error and the fetched repositories.
pub fn global_reducer(state: Value, action: &Action) -> Value {
    let mut state = if !state.is_object() {
        global_initial_state()
    } else {
        state
    };

    match action.kind.as_str() {
        LOAD_REPOS => {
            state["loading"] = json!(true);
            state["error"] = json!(false);
            state["user_data"]["repositories"] = json!(false);
        }
        LOAD_REPOS_SUCCESS => {
            state["loading"] = json!(false);
            state["user_data"]["repositories"] =
                action.field("repos").cloned().unwrap_or(Value::Null);
            state["current_user"] = action.field("username").cloned().unwrap_or(Value::Null);
        }
        LOAD_REPOS_ERROR => {
            let message = action
                .error
                .as_ref()
                .map(|error| error.message())
                .unwrap_or_else(|| "Unknown error".to_string());
            state["loading"] = json!(false);
            state["error"] = json!(message);
        }
        _ => {}
    }
    state
}
