//! Actions flowing through the store.
//!
//! An [`Action`] is a tagged record: a `kind` discriminator plus a JSON
//! payload. Failure terminal events additionally carry the original error
//! object in [`ActionError`], so observers can downcast to the concrete
//! error type instead of parsing a message.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A dispatched event. Immutable once dispatched.
#[derive(Debug, Clone)]
pub struct Action {
    pub kind: String,
    pub payload: Value,
    pub error: Option<ActionError>,
}

impl Action {
    /// Create an action with a `null` payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Value::Null,
            error: None,
        }
    }

    /// Create an action carrying `payload`.
    pub fn with_payload(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
            error: None,
        }
    }

    /// Create a failure action carrying `error`.
    pub fn failure(kind: impl Into<String>, error: ActionError) -> Self {
        Self {
            kind: kind.into(),
            payload: Value::Null,
            error: Some(error),
        }
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Look up a top-level payload field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

/// Error object attached to a failure action.
///
/// Cloning shares the same underlying error.
#[derive(Clone)]
pub struct ActionError(Arc<anyhow::Error>);

impl ActionError {
    pub fn new(error: anyhow::Error) -> Self {
        Self(Arc::new(error))
    }

    /// The message of the outermost error.
    pub fn message(&self) -> String {
        self.0.to_string()
    }

    /// Downcast to the concrete error the process failed with.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.0.downcast_ref::<E>()
    }

    pub fn inner(&self) -> &anyhow::Error {
        &self.0
    }
}

impl fmt::Debug for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl<E> From<E> for ActionError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(anyhow::Error::new(error))
    }
}
