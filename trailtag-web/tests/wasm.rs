//! Browser-only storage tests; run against a headless browser with
//! `wasm-pack test --headless --chrome trailtag-web`.
#![cfg(target_arch = "wasm32")]

use trailtag_web::trail::{ProgressStorage, ProgressStore, WebProgressStorage};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_round_trips_raw_values() {
    let storage = WebProgressStorage;
    storage.set("trailtag.test", r#"{"a":true}"#).unwrap();
    assert_eq!(
        storage.get("trailtag.test").unwrap().as_deref(),
        Some(r#"{"a":true}"#)
    );
    storage.remove("trailtag.test").unwrap();
    assert_eq!(storage.get("trailtag.test").unwrap(), None);
}

#[wasm_bindgen_test]
fn progress_store_persists_through_local_storage() {
    let mut store = ProgressStore::load(WebProgressStorage).unwrap();
    store.reset_all().unwrap();
    store.unlock("old-oak").unwrap();

    let mut reloaded = ProgressStore::load(WebProgressStorage).unwrap();
    assert!(reloaded.is_unlocked("old-oak"));

    reloaded.reset_all().unwrap();
}
