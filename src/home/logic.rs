//! Repository loading logic.

use reqwest::Url;
use std::sync::Arc;
use thiserror::Error;

use crate::home::actions::{load_repos, repo_loading_error, repos_loaded};
use crate::home::constants::{LOAD_REPOS, LOCATION_CHANGE};
use crate::home::selectors::select_username;
use crate::logic::{on_init, Logic};
use crate::registry::RegistryError;
use crate::store::StoreHandle;

pub const REPOS_LOGIC: &str = "home/repos";

const BOOTSTRAP_KEY: &str = "home/initial-load";

#[derive(Debug, Error)]
pub enum HomeError {
    #[error("No username selected")]
    MissingUsername,

    #[error("Invalid service base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

/// Repositories endpoint for `username`.
///
/// The username is percent-encoded as a single path segment.
pub fn repos_url(base_url: &str, username: &str) -> Result<Url, HomeError> {
    let invalid = |message: String| HomeError::InvalidBaseUrl {
        url: base_url.to_string(),
        message,
    };
    let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(["users", username, "repos"]);
    url.set_query(Some("type=all&sort=updated"));
    Ok(url)
}

/// Loads the repositories of the username in state.
///
/// Cancelled by a route change; when several loads overlap only the last
/// one reports.
pub fn repos_logic(base_url: &str) -> Result<Arc<Logic>, RegistryError> {
    let base_url = base_url.to_string();
    Logic::builder(REPOS_LOGIC, LOAD_REPOS)
        .cancel_kind(LOCATION_CHANGE)
        .latest()
        .fail_with(repo_loading_error)
        .process(move |ctx| {
            let username = select_username(&ctx.state);
            let request = if username.is_empty() {
                Err(HomeError::MissingUsername)
            } else {
                repos_url(&base_url, &username).map(|url| ctx.fetch(url.as_str()))
            };
            async move {
                let repos = request?.await?;
                Ok::<_, anyhow::Error>(repos_loaded(repos, &username))
            }
        })
        .on_init(on_logic_init)
        .build()
}

/// Dispatch the initial load, once per store.
pub fn on_logic_init(store: &dyn StoreHandle) {
    on_init(store, BOOTSTRAP_KEY, || store.dispatch(load_repos()));
}

/// Every logic descriptor of the feature.
pub fn logic(base_url: &str) -> Result<Vec<Arc<Logic>>, RegistryError> {
    Ok(vec![repos_logic(base_url)?])
}
