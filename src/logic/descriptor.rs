//! Logic descriptors: what to run for which action kind.

use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::action::{Action, ActionError};
use crate::fetch::{Fetch, FetchFuture, Unavailable};
use crate::registry::RegistryError;
use crate::store::StoreHandle;

/// Future returned by an asynchronous process.
pub type ProcessFuture = Pin<Box<dyn Future<Output = Result<Action, anyhow::Error>> + Send>>;

type AsyncProcess = Arc<dyn Fn(ProcessContext) -> ProcessFuture + Send + Sync>;
type SyncProcess = Arc<dyn Fn(ProcessContext) -> Result<Action, anyhow::Error> + Send + Sync>;
type FailFn = Arc<dyn Fn(ActionError) -> Action + Send + Sync>;
type InitFn = Arc<dyn Fn(&dyn StoreHandle) + Send + Sync>;

#[derive(Clone)]
pub(crate) enum Process {
    /// Settles inside `dispatch`.
    Sync(SyncProcess),
    /// Runs on the tokio runtime.
    Async(AsyncProcess),
}

/// Capabilities injected into every process.
#[derive(Clone)]
pub struct Dependencies {
    pub fetch: Arc<dyn Fetch>,
}

impl Dependencies {
    pub fn new(fetch: Arc<dyn Fetch>) -> Self {
        Self { fetch }
    }
}

impl Default for Dependencies {
    /// Dependencies whose fetch always fails with `FetchError::Unavailable`.
    fn default() -> Self {
        Self {
            fetch: Arc::new(Unavailable),
        }
    }
}

impl fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependencies").finish_non_exhaustive()
    }
}

/// Input handed to a process.
#[derive(Clone)]
pub struct ProcessContext {
    /// The trigger action.
    pub action: Action,
    /// State snapshot taken right after the trigger was reduced.
    pub state: Value,
    pub deps: Arc<Dependencies>,
}

impl ProcessContext {
    /// Call the injected fetch capability.
    pub fn fetch(&self, url: &str) -> FetchFuture {
        self.deps.fetch.fetch(url)
    }
}

/// Declares an operation started by one action kind.
///
/// Descriptors are identified by name: installing a second descriptor with
/// an installed name is a no-op.
pub struct Logic {
    name: String,
    trigger_kind: String,
    cancel_kind: Option<String>,
    latest: bool,
    process: Process,
    fail: Option<FailFn>,
    init: Option<InitFn>,
}

impl Logic {
    pub fn builder(name: impl Into<String>, trigger_kind: impl Into<String>) -> LogicBuilder {
        LogicBuilder {
            name: name.into(),
            trigger_kind: trigger_kind.into(),
            cancel_kind: None,
            latest: false,
            process: None,
            fail: None,
            init: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trigger_kind(&self) -> &str {
        &self.trigger_kind
    }

    pub fn cancel_kind(&self) -> Option<&str> {
        self.cancel_kind.as_deref()
    }

    pub fn is_latest(&self) -> bool {
        self.latest
    }

    pub(crate) fn process(&self) -> &Process {
        &self.process
    }

    /// Build the failure terminal event for `error`.
    pub fn failure_action(&self, error: ActionError) -> Action {
        match &self.fail {
            Some(fail) => fail(error),
            None => Action::failure(format!("{}_FAILED", self.trigger_kind), error),
        }
    }

    /// Run the init hook, if any, against `store`.
    pub(crate) fn run_init(&self, store: &dyn StoreHandle) {
        if let Some(init) = &self.init {
            init(store);
        }
    }
}

impl fmt::Debug for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logic")
            .field("name", &self.name)
            .field("trigger_kind", &self.trigger_kind)
            .field("cancel_kind", &self.cancel_kind)
            .field("latest", &self.latest)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Logic`].
pub struct LogicBuilder {
    name: String,
    trigger_kind: String,
    cancel_kind: Option<String>,
    latest: bool,
    process: Option<Process>,
    fail: Option<FailFn>,
    init: Option<InitFn>,
}

impl LogicBuilder {
    /// Abort in-flight invocations when `kind` is dispatched.
    pub fn cancel_kind(mut self, kind: impl Into<String>) -> Self {
        self.cancel_kind = Some(kind.into());
        self
    }

    /// Only the most recent invocation may emit a terminal event.
    pub fn latest(mut self) -> Self {
        self.latest = true;
        self
    }

    /// Constructor for the failure terminal event.
    pub fn fail_with<F>(mut self, fail: F) -> Self
    where
        F: Fn(ActionError) -> Action + Send + Sync + 'static,
    {
        self.fail = Some(Arc::new(fail));
        self
    }

    /// Asynchronous process resolving to the success terminal event.
    pub fn process<F, Fut, E>(mut self, process: F) -> Self
    where
        F: Fn(ProcessContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Action, E>> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        let process: AsyncProcess = Arc::new(move |ctx: ProcessContext| -> ProcessFuture {
            let pending = process(ctx);
            Box::pin(async move { pending.await.map_err(Into::into) })
        });
        self.process = Some(Process::Async(process));
        self
    }

    /// Process that settles immediately.
    pub fn process_sync<F, E>(mut self, process: F) -> Self
    where
        F: Fn(ProcessContext) -> Result<Action, E> + Send + Sync + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        let process: SyncProcess =
            Arc::new(move |ctx: ProcessContext| -> Result<Action, anyhow::Error> {
                process(ctx).map_err(Into::into)
            });
        self.process = Some(Process::Sync(process));
        self
    }

    /// Hook run whenever this descriptor is attached to a store.
    ///
    /// May run more than once per store; use [`crate::logic::on_init`] for
    /// one-time effects.
    pub fn on_init<F>(mut self, init: F) -> Self
    where
        F: Fn(&dyn StoreHandle) + Send + Sync + 'static,
    {
        self.init = Some(Arc::new(init));
        self
    }

    /// Validate and finish the descriptor.
    pub fn build(self) -> Result<Arc<Logic>, RegistryError> {
        if self.name.trim().is_empty() {
            return Err(RegistryError::InvalidLogic {
                message: "logic name must be a non-empty string".to_string(),
            });
        }
        if self.trigger_kind.trim().is_empty() {
            return Err(RegistryError::InvalidLogic {
                message: format!("logic '{}' needs a non-empty trigger kind", self.name),
            });
        }
        if self.cancel_kind.as_deref() == Some(self.trigger_kind.as_str()) {
            return Err(RegistryError::InvalidLogic {
                message: format!(
                    "logic '{}' cannot be cancelled by its own trigger kind",
                    self.name
                ),
            });
        }
        let Some(process) = self.process else {
            return Err(RegistryError::InvalidLogic {
                message: format!("logic '{}' has no process", self.name),
            });
        };

        Ok(Arc::new(Logic {
            name: self.name,
            trigger_kind: self.trigger_kind,
            cancel_kind: self.cancel_kind,
            latest: self.latest,
            process,
            fail: self.fail,
            init: self.init,
        }))
    }
}
