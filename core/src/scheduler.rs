use alloc::collections::BTreeMap;
use core::time::Duration;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Delayed follow-up of a mismatched pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Wiggle both cards, they stay face up.
    Shake(Pair),
    /// Turn both cards back down and release the board.
    Conceal(Pair),
}

/// Identifies one scheduled action. Handles are never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionHandle(u64);

impl ActionHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

/// What a scheduler hands back to the game once a delay has run out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fired {
    pub handle: ActionHandle,
    pub action: Action,
}

/// Delayed and periodic re-entry into the game.
///
/// Implementations deliver fired actions to [`Game::fire`] and ticks to [`Game::tick`].
pub trait Scheduler {
    /// Queues `action` to fire once after `delay`.
    fn after(&mut self, delay: Duration, action: Action) -> ActionHandle;

    /// Forgets a handle whose action has fired, `false` when it was cancelled meanwhile.
    fn release(&mut self, handle: ActionHandle) -> bool;

    /// Drops every pending action, none of them may be delivered afterwards.
    fn cancel_all(&mut self);

    fn start_ticking(&mut self, period: Duration);

    fn stop_ticking(&mut self);

    fn is_ticking(&self) -> bool;
}

/// Something that came due on a [`VirtualScheduler`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Due {
    Action(Fired),
    Tick,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Ticker {
    period: Duration,
    next: Duration,
}

const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Scheduler on a fake clock that only moves when asked to.
#[derive(Clone, Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_handle: u64,
    queue: BTreeMap<(Duration, ActionHandle), Action>,
    pending: HashSet<ActionHandle>,
    ticker: Option<Ticker>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Removes and returns the earliest event due no later than `until`, moving the clock to
    /// it. Actions due at the same instant as a tick come first.
    pub fn pop_due(&mut self, until: Duration) -> Option<Due> {
        let next_action = self.queue.first_key_value().map(|(&(at, _), _)| at);
        let next_tick = self.ticker.map(|ticker| ticker.next);

        match (next_action, next_tick) {
            (Some(at), tick) if at <= until && tick.is_none_or(|tick| at <= tick) => {
                let ((at, handle), action) = self.queue.pop_first()?;
                self.now = self.now.max(at);
                Some(Due::Action(Fired { handle, action }))
            }
            (_, Some(at)) if at <= until => {
                if let Some(ticker) = self.ticker.as_mut() {
                    ticker.next += ticker.period;
                }
                self.now = self.now.max(at);
                Some(Due::Tick)
            }
            _ => None,
        }
    }

    /// Moves the clock forward without delivering anything.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for VirtualScheduler {
    fn after(&mut self, delay: Duration, action: Action) -> ActionHandle {
        let handle = ActionHandle::new(self.next_handle);
        self.next_handle += 1;
        self.queue.insert((self.now + delay, handle), action);
        self.pending.insert(handle);
        handle
    }

    fn release(&mut self, handle: ActionHandle) -> bool {
        self.pending.remove(&handle)
    }

    fn cancel_all(&mut self) {
        self.queue.clear();
        self.pending.clear();
    }

    /// A zero `period` ticks every millisecond instead, the clock has to move between ticks.
    fn start_ticking(&mut self, period: Duration) {
        let period = period.max(MIN_TICK_PERIOD);
        self.ticker = Some(Ticker {
            period,
            next: self.now + period,
        });
    }

    fn stop_ticking(&mut self) {
        self.ticker = None;
    }

    fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const PAIR: Pair = Pair::new(0, 1);

    fn drain(scheduler: &mut VirtualScheduler, until: Duration) -> Vec<Due> {
        core::iter::from_fn(|| scheduler.pop_due(until)).collect()
    }

    #[test]
    fn actions_come_due_in_time_order() {
        let mut scheduler = VirtualScheduler::new();
        let late = scheduler.after(Duration::from_millis(1000), Action::Conceal(PAIR));
        let early = scheduler.after(Duration::from_millis(350), Action::Shake(PAIR));

        assert!(drain(&mut scheduler, Duration::from_millis(349)).is_empty());
        assert_eq!(
            drain(&mut scheduler, Duration::from_millis(1000)),
            [
                Due::Action(Fired {
                    handle: early,
                    action: Action::Shake(PAIR),
                }),
                Due::Action(Fired {
                    handle: late,
                    action: Action::Conceal(PAIR),
                }),
            ]
        );
        assert_eq!(scheduler.now(), Duration::from_millis(1000));
    }

    #[test]
    fn cancelled_actions_never_come_due() {
        let mut scheduler = VirtualScheduler::new();
        let handle = scheduler.after(Duration::from_millis(10), Action::Shake(PAIR));

        scheduler.cancel_all();

        assert!(drain(&mut scheduler, Duration::from_secs(5)).is_empty());
        assert!(!scheduler.release(handle));
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn release_reports_whether_still_pending() {
        let mut scheduler = VirtualScheduler::new();
        let handle = scheduler.after(Duration::ZERO, Action::Conceal(PAIR));

        assert!(scheduler.release(handle));
        assert!(!scheduler.release(handle));
    }

    #[test]
    fn ticks_repeat_until_stopped() {
        let mut scheduler = VirtualScheduler::new();
        scheduler.start_ticking(Duration::from_secs(1));

        let ticks = drain(&mut scheduler, Duration::from_millis(3500));
        assert_eq!(ticks, [Due::Tick, Due::Tick, Due::Tick]);

        scheduler.stop_ticking();
        assert!(!scheduler.is_ticking());
        assert!(drain(&mut scheduler, Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn zero_period_still_moves_the_clock() {
        let mut scheduler = VirtualScheduler::new();
        scheduler.start_ticking(Duration::ZERO);

        let ticks = drain(&mut scheduler, Duration::from_millis(3));

        assert_eq!(ticks, [Due::Tick, Due::Tick, Due::Tick]);
        assert_eq!(scheduler.now(), Duration::from_millis(3));
    }

    #[test]
    fn actions_before_ticks_at_the_same_instant() {
        let mut scheduler = VirtualScheduler::new();
        scheduler.start_ticking(Duration::from_secs(1));
        let handle = scheduler.after(Duration::from_secs(1), Action::Conceal(PAIR));

        assert_eq!(
            drain(&mut scheduler, Duration::from_secs(1)),
            [
                Due::Action(Fired {
                    handle,
                    action: Action::Conceal(PAIR),
                }),
                Due::Tick,
            ]
        );
    }
}
