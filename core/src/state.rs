use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - Idle -> Running, on the first flip
/// - Running -> Complete, once every card is matched
///
/// A new deck always starts over at Idle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Idle,
    Running,
    Complete,
}

impl GameStatus {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Input to [`GameState::apply`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Flip(usize),
    Shake(Pair),
    Conceal(Pair),
    Tick,
}

impl From<Action> for Event {
    fn from(action: Action) -> Self {
        match action {
            Action::Shake(pair) => Self::Shake(pair),
            Action::Conceal(pair) => Self::Conceal(pair),
        }
    }
}

/// Work a transition leaves for whoever owns the timers and the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Schedule(Action),
    StartClock,
    StopClock,
    SaveBest(BestResult),
}

pub type Effects = SmallVec<[Effect; 4]>;

/// Outcome of applying an event
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Event rejected or stale, nothing changed
    Ignored,
    /// First card of a pair turned up
    Revealed,
    Matched,
    /// Second card did not match, the pair stays up until concealed
    Mismatched,
    /// Last pair matched
    Completed,
    Shaken,
    Concealed,
    Ticked,
}

impl Outcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub outcome: Outcome,
    pub effects: Effects,
}

impl Transition {
    fn ignored() -> Self {
        Self::with(Outcome::Ignored)
    }

    fn with(outcome: Outcome) -> Self {
        Self {
            outcome,
            effects: SmallVec::new(),
        }
    }
}

/// Everything a round of the game consists of, without any notion of time or storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    cards: Vec<Card>,
    selection: SmallVec<[usize; 2]>,
    processing: bool,
    status: GameStatus,
    moves: Counter,
    seconds: Counter,
    best: Option<BestResult>,
    new_record: bool,
}

impl GameState {
    pub fn new(deck: Deck, best: Option<BestResult>) -> Self {
        Self {
            cards: deck.into_cards(),
            selection: SmallVec::new(),
            processing: false,
            status: GameStatus::Idle,
            moves: 0,
            seconds: 0,
            best,
            new_record: false,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_at(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn moves(&self) -> Counter {
        self.moves
    }

    pub fn seconds(&self) -> Counter {
        self.seconds
    }

    pub fn best(&self) -> Option<BestResult> {
        self.best
    }

    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub fn total_pairs(&self) -> Counter {
        (self.cards.len() / 2) as Counter
    }

    pub fn matched_pairs(&self) -> Counter {
        (self.cards.iter().filter(|card| card.is_matched).count() / 2) as Counter
    }

    /// Checks whether a flip at `index` would be accepted.
    pub fn check_flippable(&self, index: usize) -> Result<()> {
        if self.processing {
            return Err(GameError::Busy);
        }
        let card = self.cards.get(index).ok_or(GameError::InvalidIndex)?;
        if card.is_matched {
            Err(GameError::AlreadyMatched)
        } else if card.is_flipped {
            Err(GameError::AlreadyRevealed)
        } else {
            Ok(())
        }
    }

    pub fn apply(&mut self, event: Event) -> Transition {
        match event {
            Event::Flip(index) => self.flip(index),
            Event::Shake(pair) => self.shake(pair),
            Event::Conceal(pair) => self.conceal(pair),
            Event::Tick => self.tick(),
        }
    }

    fn flip(&mut self, index: usize) -> Transition {
        if self.check_flippable(index).is_err() {
            return Transition::ignored();
        }

        let mut transition = Transition::with(Outcome::Revealed);
        if self.status == GameStatus::Idle {
            self.status = GameStatus::Running;
            transition.effects.push(Effect::StartClock);
        }

        let card = &mut self.cards[index];
        card.is_flipped = true;
        card.is_shaking = false;
        self.selection.push(index);

        let &[first, second] = self.selection.as_slice() else {
            return transition;
        };
        self.processing = true;
        self.resolve(Pair::new(first, second), &mut transition);
        transition
    }

    fn resolve(&mut self, pair: Pair, transition: &mut Transition) {
        self.moves += 1;

        if self.cards[pair.first].value != self.cards[pair.second].value {
            transition.outcome = Outcome::Mismatched;
            transition.effects.push(Effect::Schedule(Action::Shake(pair)));
            transition.effects.push(Effect::Schedule(Action::Conceal(pair)));
            return;
        }

        for index in [pair.first, pair.second] {
            let card = &mut self.cards[index];
            card.is_matched = true;
            card.is_flipped = true;
            card.is_shaking = false;
        }
        self.selection.clear();
        self.processing = false;
        transition.outcome = Outcome::Matched;

        if self.cards.iter().all(|card| card.is_matched) {
            self.complete(transition);
        }
    }

    fn complete(&mut self, transition: &mut Transition) {
        self.status = GameStatus::Complete;
        transition.outcome = Outcome::Completed;
        transition.effects.push(Effect::StopClock);

        let candidate = BestResult::new(self.moves, self.seconds);
        if candidate.beats(self.best.as_ref()) {
            self.best = Some(candidate);
            self.new_record = true;
            transition.effects.push(Effect::SaveBest(candidate));
        }
    }

    /// Whether `pair` is the unresolved mismatch currently holding the board.
    fn is_pending(&self, pair: Pair) -> bool {
        self.processing && self.selection.as_slice() == [pair.first, pair.second]
    }

    fn shake(&mut self, pair: Pair) -> Transition {
        if !self.is_pending(pair) {
            return Transition::ignored();
        }
        for index in [pair.first, pair.second] {
            self.cards[index].is_shaking = true;
        }
        Transition::with(Outcome::Shaken)
    }

    fn conceal(&mut self, pair: Pair) -> Transition {
        if !self.is_pending(pair) {
            return Transition::ignored();
        }
        for index in [pair.first, pair.second] {
            let card = &mut self.cards[index];
            card.is_flipped = false;
            card.is_shaking = false;
        }
        self.selection.clear();
        self.processing = false;
        Transition::with(Outcome::Concealed)
    }

    fn tick(&mut self) -> Transition {
        if !self.status.is_running() {
            return Transition::ignored();
        }
        self.seconds += 1;
        Transition::with(Outcome::Ticked)
    }
}
