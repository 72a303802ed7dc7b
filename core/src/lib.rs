#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use scheduler::*;
pub use snapshot::*;
pub use state::*;
pub use store::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod scheduler;
mod snapshot;
mod state;
mod store;
mod types;

/// Largest deck a game can be configured with.
pub const MAX_PAIRS: PairCount = 64;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub pairs: PairCount,
    /// Delay between a mismatch and both cards shaking.
    pub shake_delay_ms: u32,
    /// Delay between a mismatch and both cards turning back down, not counted from the shake.
    pub conceal_delay_ms: u32,
    pub tick_ms: u32,
}

impl GameConfig {
    pub const fn new_unchecked(pairs: PairCount) -> Self {
        Self {
            pairs,
            shake_delay_ms: 350,
            conceal_delay_ms: 1000,
            tick_ms: 1000,
        }
    }

    pub fn new(pairs: PairCount) -> Self {
        Self::new_unchecked(pairs).normalized()
    }

    /// Clamps `pairs` to `1..=MAX_PAIRS` and keeps the tick period above zero.
    pub fn normalized(self) -> Self {
        Self {
            pairs: self.pairs.clamp(1, MAX_PAIRS),
            tick_ms: self.tick_ms.max(1),
            ..self
        }
    }

    /// Fills a `rows` by `columns` board, a lone leftover cell stays empty.
    pub fn for_board(rows: u8, columns: u8) -> Self {
        let cells = u16::from(rows) * u16::from(columns);
        Self::new(cells / 2)
    }

    pub const fn total_cards(&self) -> usize {
        self.pairs as usize * 2
    }

    pub const fn delay_for(&self, action: Action) -> Duration {
        let millis = match action {
            Action::Shake(_) => self.shake_delay_ms,
            Action::Conceal(_) => self.conceal_delay_ms,
        };
        Duration::from_millis(millis as u64)
    }

    pub const fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms as u64)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(8)
    }
}
