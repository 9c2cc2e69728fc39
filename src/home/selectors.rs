//! Read helpers over the root state.

use serde_json::Value;

pub fn select_username(state: &Value) -> String {
    state["home"]["username"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

pub fn select_loading(state: &Value) -> bool {
    state["global"]["loading"].as_bool().unwrap_or(false)
}

/// Error message of the last failed load.
pub fn select_error(state: &Value) -> Option<String> {
    state["global"]["error"].as_str().map(str::to_string)
}

/// Repositories of the last successful load.
pub fn select_repos(state: &Value) -> Option<&Vec<Value>> {
    state["global"]["user_data"]["repositories"].as_array()
}

pub fn select_current_user(state: &Value) -> Option<&str> {
    state["global"]["current_user"].as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn selectors_tolerate_missing_slices() {
        let state = json!({});
        assert_eq!(select_username(&state), "");
        assert!(!select_loading(&state));
        assert_eq!(select_error(&state), None);
        assert_eq!(select_repos(&state), None);
        assert_eq!(select_current_user(&state), None);
    }

    #[test]
    fn selectors_read_values() {
        let state = json!({
            "home": { "username": "jeffbski" },
            "global": {
                "loading": true,
                "error": "Not Found",
                "current_user": "jeffbski",
                "user_data": { "repositories": [{ "name": "a" }] },
            },
        });
        assert_eq!(select_username(&state), "jeffbski");
        assert!(select_loading(&state));
        assert_eq!(select_error(&state).as_deref(), Some("Not Found"));
        assert_eq!(select_repos(&state).map(Vec::len), Some(1));
        assert_eq!(select_current_user(&state), Some("jeffbski"));
    }
}
