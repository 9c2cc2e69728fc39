mod common;

use common::{home_state, kinds, record, RecordingStore};
use hotlogic::home::{self, on_logic_init, LOAD_REPOS};
use hotlogic::logic::{on_init, Dependencies, LogicMiddleware};
use hotlogic::registry::get_injectors;
use hotlogic::store::StoreHandle;
use hotlogic::Store;
use std::sync::Arc;

const BASE: &str = "https://api.github.com";

#[test]
fn only_runs_once_for_the_same_store() {
    let store = RecordingStore::with_state(home_state("jeffbski"));
    on_logic_init(store.as_ref());
    on_logic_init(store.as_ref());
    on_logic_init(store.as_ref());

    let dispatched = store.dispatched();
    assert_eq!(dispatched.len(), 1);
    assert_eq!(dispatched[0].kind, LOAD_REPOS);
}

#[test]
fn runs_again_for_a_different_store() {
    let first = RecordingStore::with_state(home_state("jeffbski"));
    let second = RecordingStore::with_state(home_state("jeffbski"));
    on_logic_init(first.as_ref());
    on_logic_init(second.as_ref());

    assert_eq!(first.dispatched().len(), 1);
    assert_eq!(second.dispatched().len(), 1);
    assert_ne!(first.id(), second.id());
}

#[test]
fn guard_counts_effects_across_many_stores() {
    let stores: Vec<Arc<RecordingStore>> = (0..4)
        .map(|_| RecordingStore::with_state(home_state("x")))
        .collect();
    let mut ran = 0;
    for _ in 0..3 {
        for store in &stores {
            if on_init(store.as_ref(), "count", || {}) {
                ran += 1;
            }
        }
    }
    assert_eq!(ran, stores.len());
}

#[tokio::test]
async fn two_coordinators_on_one_store_share_the_marker() {
    let store = RecordingStore::with_state(home_state("jeffbski"));
    let first = LogicMiddleware::new(home::logic(BASE).unwrap(), Dependencies::default()).unwrap();
    let second = LogicMiddleware::new(home::logic(BASE).unwrap(), Dependencies::default()).unwrap();

    first.attach(store.as_ref());
    second.attach(store.as_ref());
    first.attach(store.as_ref());

    assert_eq!(kinds(&store.dispatched()), vec![LOAD_REPOS]);
}

#[tokio::test]
async fn injecting_logic_twice_bootstraps_once() {
    let middleware = LogicMiddleware::new(Vec::new(), Dependencies::default()).unwrap();
    let store = Store::builder().logic(middleware.clone()).build();
    let seen = record(&store);
    let injectors = get_injectors(&store).unwrap();

    home::install(&injectors, BASE).unwrap();
    home::install(&injectors, BASE).unwrap();
    middleware.when_complete().await;

    let loads = seen
        .lock()
        .iter()
        .filter(|action| action.is(LOAD_REPOS))
        .count();
    assert_eq!(loads, 1);
}

#[tokio::test]
async fn store_built_with_logic_bootstraps_on_build() {
    let middleware = LogicMiddleware::new(home::logic(BASE).unwrap(), Dependencies::default()).unwrap();
    let store = Store::builder()
        .reducer("home", home::home_reducer)
        .reducer("global", home::global_reducer)
        .logic(middleware.clone())
        .build();
    middleware.when_complete().await;

    assert!(store.bootstrap_markers().is_marked("home/initial-load"));
    // No username is set, so the bootstrap load fails.
    assert_eq!(
        home::select_error(&store.get_state()).as_deref(),
        Some("No username selected")
    );
}
