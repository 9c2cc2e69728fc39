//! Shared test utilities: store doubles, fetch doubles and a mock server.

#![allow(dead_code, unused_imports)]

pub mod mock_server;

use hotlogic::action::Action;
use hotlogic::fetch::{Fetch, FetchError, FetchFuture};
use hotlogic::logic::{BootstrapMarkers, LogicMiddleware};
use hotlogic::store::{StoreHandle, StoreId};
use hotlogic::Store;
use parking_lot::{Mutex, RwLock};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Store double that records dispatched actions instead of reducing them.
#[derive(Default)]
pub struct RecordingStore {
    id: StoreId,
    state: RwLock<Value>,
    dispatched: Mutex<Vec<Action>>,
    markers: BootstrapMarkers,
}

impl RecordingStore {
    pub fn with_state(state: Value) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(state),
            ..Self::default()
        })
    }

    pub fn set_state(&self, state: Value) {
        *self.state.write() = state;
    }

    pub fn dispatched(&self) -> Vec<Action> {
        self.dispatched.lock().clone()
    }
}

impl StoreHandle for RecordingStore {
    fn id(&self) -> StoreId {
        self.id
    }

    fn dispatch(&self, action: Action) {
        self.dispatched.lock().push(action);
    }

    fn get_state(&self) -> Value {
        self.state.read().clone()
    }

    fn bootstrap_markers(&self) -> &BootstrapMarkers {
        &self.markers
    }
}

/// Actions forwarded downstream by the middleware.
#[derive(Clone, Default)]
pub struct Downstream(Arc<Mutex<Vec<Action>>>);

impl Downstream {
    pub fn kinds(&self) -> Vec<String> {
        self.0.lock().iter().map(|a| a.kind.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn push(&self, action: Action) {
        self.0.lock().push(action);
    }
}

/// Feed `action` through `middleware` with `store`, recording downstream.
pub fn send(
    middleware: &LogicMiddleware,
    store: &Arc<RecordingStore>,
    downstream: &Downstream,
    action: Action,
) {
    let handle: Arc<dyn StoreHandle> = store.clone();
    let sink = downstream.clone();
    middleware.handle(handle, action, move |action| sink.push(action));
}

/// Record every action a real store reduces.
pub fn record(store: &Store) -> Arc<Mutex<Vec<Action>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.subscribe(move |action| sink.lock().push(action.clone()));
    seen
}

pub fn kinds(actions: &[Action]) -> Vec<String> {
    actions.iter().map(|a| a.kind.clone()).collect()
}

/// State with `home.username` set.
pub fn home_state(username: &str) -> Value {
    json!({ "home": { "username": username } })
}

/// Fetch resolving to `[url]` after `delay`.
pub fn echo_url_after(delay: Duration) -> Arc<dyn Fetch> {
    Arc::new(move |url: &str| -> FetchFuture {
        let url = url.to_string();
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(json!([url]))
        })
    })
}

/// Fetch resolving to `value` immediately.
pub fn resolves_to(value: Value) -> Arc<dyn Fetch> {
    Arc::new(move |_url: &str| -> FetchFuture {
        let value = value.clone();
        Box::pin(async move { Ok(value) })
    })
}

/// Fetch failing with a 404 "Not Found".
pub fn not_found() -> Arc<dyn Fetch> {
    Arc::new(|_url: &str| -> FetchFuture {
        Box::pin(async {
            Err(FetchError::Status {
                status: 404,
                message: "Not Found".to_string(),
            })
        })
    })
}

/// Fetch that records the URLs it was asked for.
pub struct CountingFetch {
    pub calls: AtomicUsize,
    pub urls: Mutex<Vec<String>>,
    pub delay: Duration,
}

impl CountingFetch {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
            delay,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetch for CountingFetch {
    fn fetch(&self, url: &str) -> FetchFuture {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().push(url.to_string());
        let delay = self.delay;
        let url = url.to_string();
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(json!([url]))
        })
    }
}
