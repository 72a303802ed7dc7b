use alloc::string::String;
use thiserror::Error;

/// Reasons a flip is rejected. These never reach the player, a rejected flip is a no-op.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card index")]
    InvalidIndex,
    #[error("Card is already face up")]
    AlreadyRevealed,
    #[error("Card is already matched")]
    AlreadyMatched,
    #[error("A pair is still being resolved, no new flips are accepted")]
    Busy,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend is unavailable")]
    Unavailable,
    #[error("Storage backend failed: {0}")]
    Backend(String),
    #[error("Stored record is malformed")]
    Malformed(#[from] serde_json::Error),
}
