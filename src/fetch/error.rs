use thiserror::Error;

/// Errors surfaced by the fetch capability.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-success HTTP status. The message is the reason phrase, e.g.
    /// "Not Found".
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid JSON from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("No fetch capability configured")]
    Unavailable,
}

impl FetchError {
    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
