//! Logic coordinator.
//!
//! Sits in front of the root reducer. For every dispatched action it makes
//! the cancel and supersede decisions synchronously, forwards the action
//! downstream, then starts the processes the action triggered. Terminal
//! events re-enter the store through `dispatch`.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::action::{Action, ActionError};
use crate::logic::descriptor::{Dependencies, Logic, Process, ProcessContext};
use crate::logic::slot::{Generation, InFlightSlot, Settlement};
use crate::registry::{validate_logic, RegistryError};
use crate::store::{StoreHandle, StoreId};

/// Runs logic descriptors against the actions of the stores it serves.
///
/// Cloning yields another handle to the same coordinator. In-flight work is
/// tracked per store, so one coordinator may serve several stores.
#[derive(Clone)]
pub struct LogicMiddleware {
    inner: Arc<Inner>,
}

/// In-flight slots are scoped per store and descriptor.
type SlotKey = (StoreId, String);

struct Inner {
    logic: RwLock<Vec<Arc<Logic>>>,
    slots: Mutex<HashMap<SlotKey, InFlightSlot>>,
    deps: Arc<Dependencies>,
    in_flight: AtomicUsize,
    idle: Notify,
}

impl LogicMiddleware {
    /// Create a coordinator with an initial set of descriptors.
    ///
    /// Fails with [`RegistryError::InvalidLogic`] when two descriptors share
    /// a name, the same check injection applies.
    pub fn new(logic: Vec<Arc<Logic>>, deps: Dependencies) -> Result<Self, RegistryError> {
        validate_logic(&logic)?;

        Ok(Self {
            inner: Arc::new(Inner {
                logic: RwLock::new(logic),
                slots: Mutex::new(HashMap::new()),
                deps: Arc::new(deps),
                in_flight: AtomicUsize::new(0),
                idle: Notify::new(),
            }),
        })
    }

    /// Names of the installed descriptors, in installation order.
    pub fn logic_names(&self) -> Vec<String> {
        self.inner
            .logic
            .read()
            .iter()
            .map(|logic| logic.name().to_string())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner
            .logic
            .read()
            .iter()
            .any(|logic| logic.name() == name)
    }

    /// Invocations of `name` that have started but not settled, across all
    /// stores.
    pub fn in_flight_for(&self, name: &str) -> usize {
        self.inner
            .slots
            .lock()
            .iter()
            .filter(|((_, logic), _)| logic == name)
            .map(|(_, slot)| slot.running())
            .sum()
    }

    /// Invocations of any descriptor that have started but not settled.
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    /// Run the init hooks of every installed descriptor against `store`.
    pub fn attach(&self, store: &dyn StoreHandle) {
        let logic = self.inner.logic.read().clone();
        tracing::debug!(store = %store.id(), logic = logic.len(), "Logic attached");
        for entry in logic {
            entry.run_init(store);
        }
    }

    /// Install descriptors not yet present. Returns how many were added.
    ///
    /// Init hooks of the newly added descriptors run against `store`.
    pub fn add_logic(&self, store: &dyn StoreHandle, logic: Vec<Arc<Logic>>) -> usize {
        let added: Vec<Arc<Logic>> = {
            let mut installed = self.inner.logic.write();
            let mut added = Vec::new();
            for entry in logic {
                if installed.iter().any(|existing| existing.name() == entry.name()) {
                    tracing::debug!(logic = %entry.name(), "Logic already installed, skipping");
                    continue;
                }
                installed.push(Arc::clone(&entry));
                added.push(entry);
            }
            added
        };

        for entry in &added {
            tracing::debug!(
                store = %store.id(),
                logic = %entry.name(),
                trigger = %entry.trigger_kind(),
                "Logic installed"
            );
            entry.run_init(store);
        }
        added.len()
    }

    /// Observe `action`, forward it through `next`, then start triggered work.
    pub fn handle<F>(&self, store: Arc<dyn StoreHandle>, action: Action, next: F)
    where
        F: FnOnce(Action),
    {
        let logic = self.inner.logic.read().clone();
        let store_id = store.id();
        let mut started: Vec<(Arc<Logic>, Generation)> = Vec::new();
        {
            let mut slots = self.inner.slots.lock();
            for entry in &logic {
                if entry.cancel_kind() == Some(action.kind.as_str()) {
                    let key = (store_id, entry.name().to_string());
                    if let Some(slot) = slots.get_mut(&key) {
                        let running = slot.cancel();
                        if running > 0 {
                            tracing::debug!(
                                store = %store_id,
                                logic = %entry.name(),
                                cancel = %action.kind,
                                running,
                                "In-flight logic cancelled"
                            );
                        }
                    }
                }
                if entry.trigger_kind() == action.kind {
                    let slot = slots
                        .entry((store_id, entry.name().to_string()))
                        .or_default();
                    if entry.is_latest() && !slot.is_idle() {
                        tracing::debug!(
                            logic = %entry.name(),
                            superseded = slot.running(),
                            "Superseding in-flight logic"
                        );
                    }
                    let generation = slot.start();
                    started.push((Arc::clone(entry), generation));
                }
            }
        }
        self.inner.in_flight.fetch_add(started.len(), Ordering::SeqCst);

        if started.is_empty() {
            next(action);
            return;
        }

        next(action.clone());

        let state = store.get_state();
        for (entry, generation) in started {
            tracing::trace!(
                logic = %entry.name(),
                generation,
                "Logic triggered"
            );
            let ctx = ProcessContext {
                action: action.clone(),
                state: state.clone(),
                deps: Arc::clone(&self.inner.deps),
            };
            self.run(Arc::clone(&store), entry, generation, ctx);
        }
    }

    /// Wait until no invocation is in flight.
    pub async fn when_complete(&self) {
        loop {
            // Enable before checking the counter so a settle between the check
            // and the await is not lost.
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.inner.in_flight.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }

    fn run(
        &self,
        store: Arc<dyn StoreHandle>,
        logic: Arc<Logic>,
        generation: Generation,
        ctx: ProcessContext,
    ) {
        match logic.process() {
            Process::Sync(process) => {
                let outcome = process(ctx);
                self.settle(store.as_ref(), &logic, generation, outcome);
            }
            Process::Async(process) => {
                let runtime = match tokio::runtime::Handle::try_current() {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        tracing::warn!(
                            logic = %logic.name(),
                            error = %err,
                            "No async runtime for logic process"
                        );
                        let outcome = Err(anyhow::anyhow!("no async runtime available: {err}"));
                        self.settle(store.as_ref(), &logic, generation, outcome);
                        return;
                    }
                };

                let pending = process(ctx);
                let this = self.clone();
                let worker = runtime.clone();
                runtime.spawn(async move {
                    // A panicking process still settles, as a failure.
                    let outcome = match worker.spawn(pending).await {
                        Ok(outcome) => outcome,
                        Err(err) => Err(anyhow::anyhow!("logic process aborted: {err}")),
                    };
                    this.settle(store.as_ref(), &logic, generation, outcome);
                });
            }
        }
    }

    fn settle(
        &self,
        store: &dyn StoreHandle,
        logic: &Logic,
        generation: Generation,
        outcome: Result<Action, anyhow::Error>,
    ) {
        let key = (store.id(), logic.name().to_string());
        let settlement = {
            let mut slots = self.inner.slots.lock();
            match slots.get_mut(&key) {
                Some(slot) => {
                    let settlement = slot.settle(generation, logic.is_latest());
                    if slot.is_idle() {
                        slots.remove(&key);
                    }
                    settlement
                }
                None => Settlement::Cancelled,
            }
        };

        match settlement {
            Settlement::Emit => match outcome {
                Ok(action) => {
                    tracing::debug!(
                        logic = %logic.name(),
                        generation,
                        kind = %action.kind,
                        "Logic succeeded"
                    );
                    store.dispatch(action);
                }
                Err(err) => {
                    tracing::warn!(
                        logic = %logic.name(),
                        generation,
                        error = %err,
                        "Logic failed"
                    );
                    store.dispatch(logic.failure_action(ActionError::new(err)));
                }
            },
            Settlement::Cancelled => {
                tracing::trace!(logic = %logic.name(), generation, "Discarding cancelled result");
            }
            Settlement::Superseded => {
                tracing::trace!(logic = %logic.name(), generation, "Discarding superseded result");
            }
        }

        if self.inner.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}

impl std::fmt::Debug for LogicMiddleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogicMiddleware")
            .field("logic", &self.logic_names())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}
