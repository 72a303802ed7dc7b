//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

use std::time::Duration;

use memory_match_core::{
    Action, BEST_RESULT_KEY, BestResult, BestResultStore, KeyValueStorage, Pair, PersistentBest,
    Scheduler,
};
use memory_match_web::{BrowserStorage, TimerScheduler};
use wasm_bindgen_test::*;
use yew::Callback;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn best_result_survives_in_local_storage() {
    let mut storage = BrowserStorage::local();
    assert!(storage.is_available());
    storage.set_item(BEST_RESULT_KEY, "").unwrap();

    let mut store = PersistentBest::new(storage);
    assert_eq!(store.load(), None);

    store.save(BestResult::new(9, 41));
    assert_eq!(PersistentBest::new(BrowserStorage::local()).load(), Some(BestResult::new(9, 41)));
    assert_eq!(
        BrowserStorage::local().get_item(BEST_RESULT_KEY).unwrap().as_deref(),
        Some(r#"{"moves":9,"seconds":41}"#)
    );
}

#[wasm_bindgen_test]
fn cancelled_timeouts_are_not_released() {
    let mut scheduler = TimerScheduler::new(Callback::from(|_| ()), Callback::from(|()| ()));
    let pair = Pair::new(0, 1);
    let first = scheduler.after(Duration::from_secs(60), Action::Shake(pair));
    let second = scheduler.after(Duration::from_secs(60), Action::Conceal(pair));
    assert_ne!(first, second);
    assert_eq!(scheduler.pending_count(), 2);

    scheduler.cancel_all();

    assert_eq!(scheduler.pending_count(), 0);
    assert!(!scheduler.release(first));
}

#[wasm_bindgen_test]
fn ticking_can_be_stopped() {
    let mut scheduler = TimerScheduler::new(Callback::from(|_| ()), Callback::from(|()| ()));
    scheduler.start_ticking(Duration::from_secs(1));
    assert!(scheduler.is_ticking());
    scheduler.stop_ticking();
    assert!(!scheduler.is_ticking());
}
