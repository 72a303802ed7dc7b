//! Browser timers behind the game's scheduler.

use std::collections::HashMap;
use std::time::Duration;

use gloo::timers::callback::{Interval, Timeout};
use memory_match_core::{Action, ActionHandle, Fired, Scheduler};
use yew::Callback;

/// Schedules with `setTimeout`/`setInterval`. Dropping a timer cancels it, so forgetting the
/// handles is all cancellation takes.
pub struct TimerScheduler {
    next_handle: u64,
    pending: HashMap<ActionHandle, Timeout>,
    ticker: Option<Interval>,
    on_fire: Callback<Fired>,
    on_tick: Callback<()>,
}

impl TimerScheduler {
    pub fn new(on_fire: Callback<Fired>, on_tick: Callback<()>) -> Self {
        Self {
            next_handle: 0,
            pending: HashMap::new(),
            ticker: None,
            on_fire,
            on_tick,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl Scheduler for TimerScheduler {
    fn after(&mut self, delay: Duration, action: Action) -> ActionHandle {
        let handle = ActionHandle::new(self.next_handle);
        self.next_handle += 1;

        let on_fire = self.on_fire.clone();
        let timeout = Timeout::new(millis(delay), move || on_fire.emit(Fired { handle, action }));
        self.pending.insert(handle, timeout);
        handle
    }

    fn release(&mut self, handle: ActionHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::trace!("cancelling {} pending timeouts", self.pending.len());
        }
        self.pending.clear();
    }

    fn start_ticking(&mut self, period: Duration) {
        let on_tick = self.on_tick.clone();
        let period = millis(period).max(1);
        self.ticker = Some(Interval::new(period, move || on_tick.emit(())));
    }

    fn stop_ticking(&mut self) {
        self.ticker = None;
    }

    fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }
}
