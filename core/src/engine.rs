use core::time::Duration;

use crate::*;

/// A running game together with its timers, its best-result store and its deck source.
///
/// Every entry point runs to completion before the next one, invalid input is absorbed as
/// [`Outcome::Ignored`].
#[derive(Clone, Debug)]
pub struct Game<S, B> {
    config: GameConfig,
    state: GameState,
    scheduler: S,
    store: B,
    generator: ShuffledDeckGenerator<Entropy>,
}

impl<S: Scheduler, B: BestResultStore> Game<S, B> {
    pub fn new(config: GameConfig, scheduler: S, mut store: B, entropy: Entropy) -> Self {
        let config = config.normalized();
        let best = store.load();
        let mut generator = ShuffledDeckGenerator::new(entropy);
        let state = GameState::new(generator.generate(config.pairs), best);
        log::debug!("new game with {} pairs, best: {:?}", config.pairs, best);

        Self {
            config,
            state,
            scheduler,
            store,
            generator,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state)
    }

    /// Deals a fresh deck of `pairs` pairs. Pending actions are cancelled before anything
    /// else, the best result survives.
    pub fn new_game(&mut self, pairs: PairCount) {
        self.halt();
        self.config.pairs = GameConfig::new(pairs).pairs;
        let deck = self.generator.generate(self.config.pairs);
        self.state = GameState::new(deck, self.state.best());
        log::debug!("new game with {} pairs", self.config.pairs);
    }

    /// Starts over with the same number of pairs.
    pub fn reset_game(&mut self) {
        self.new_game(self.config.pairs);
    }

    pub fn flip(&mut self, index: usize) -> Outcome {
        self.apply(Event::Flip(index))
    }

    pub fn tick(&mut self) -> Outcome {
        self.apply(Event::Tick)
    }

    /// Delivers an action the scheduler has fired. Actions cancelled in the meantime are
    /// dropped here, even if their delivery was already under way.
    pub fn fire(&mut self, fired: Fired) -> Outcome {
        if !self.scheduler.release(fired.handle) {
            log::trace!("dropping cancelled {:?}", fired);
            return Outcome::Ignored;
        }
        self.apply(fired.action.into())
    }

    /// Cancels every pending action and the clock, for when the game goes away.
    pub fn shutdown(&mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        self.scheduler.cancel_all();
        self.scheduler.stop_ticking();
    }

    fn apply(&mut self, event: Event) -> Outcome {
        let Transition { outcome, effects } = self.state.apply(event);
        for effect in effects {
            self.perform(effect);
        }
        outcome
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::Schedule(action) => {
                let delay = self.config.delay_for(action);
                let handle = self.scheduler.after(delay, action);
                log::trace!("scheduled {:?} as {:?} in {:?}", action, handle, delay);
            }
            Effect::StartClock => self.scheduler.start_ticking(self.config.tick_period()),
            Effect::StopClock => {
                self.scheduler.stop_ticking();
                log::debug!(
                    "completed in {} moves and {}s",
                    self.state.moves(),
                    self.state.seconds()
                );
            }
            Effect::SaveBest(result) => {
                log::debug!("new best result: {:?}", result);
                self.store.save(result);
            }
        }
    }
}

impl<B: BestResultStore> Game<VirtualScheduler, B> {
    /// Moves the fake clock forward by `by`, delivering everything that comes due on the way.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(due) = self.scheduler.pop_due(until) {
            match due {
                Due::Action(fired) => self.fire(fired),
                Due::Tick => self.tick(),
            };
        }
        self.scheduler.set_now(until);
    }
}
