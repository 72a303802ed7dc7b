use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::Serialize;

use crate::types::rounded_percent;
use crate::*;

/// Read-only view of a game for the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub cards: Vec<Card>,
    pub moves: Counter,
    pub seconds: Counter,
    pub best: Option<BestResult>,
    pub status: GameStatus,
    pub is_new_record: bool,
    /// Cards cannot be flipped while a pair is resolving.
    pub is_processing: bool,
    pub matched_pairs: Counter,
    pub total_pairs: Counter,
    pub progress_percent: Counter,
    /// Matched pairs per move, absent before the first move.
    pub accuracy: Option<Counter>,
    pub message: String,
}

impl Snapshot {
    pub fn of(state: &GameState) -> Self {
        let matched_pairs = state.matched_pairs();
        let total_pairs = state.total_pairs();
        let accuracy = (state.moves() > 0).then(|| rounded_percent(matched_pairs, state.moves()));

        Self {
            cards: state.cards().to_vec(),
            moves: state.moves(),
            seconds: state.seconds(),
            best: state.best(),
            status: state.status(),
            is_new_record: state.is_new_record(),
            is_processing: state.is_processing(),
            matched_pairs,
            total_pairs,
            progress_percent: rounded_percent(matched_pairs, total_pairs),
            accuracy,
            message: status_message(state, accuracy),
        }
    }
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self::of(state)
    }
}

fn status_message(state: &GameState, accuracy: Option<Counter>) -> String {
    let moves = state.moves();
    let time = format_time(state.seconds());

    if state.status().is_complete() {
        return if state.is_new_record() {
            format!("New personal best! {moves} moves in {time}.")
        } else {
            format!("Great job! Completed in {moves} moves and {time}.")
        };
    }

    let matched = state.matched_pairs();
    if matched > 0 {
        let total = state.total_pairs();
        return match accuracy {
            Some(accuracy) => {
                format!("Nice! {matched} of {total} pairs found • {accuracy}% accuracy.")
            }
            None => format!("Nice! {matched} of {total} pairs found."),
        };
    }

    String::from("Flip cards to find all matching pairs.")
}
