use crate::roster::MAX_PETS;
use std::path::PathBuf;

/// Errors raised by roster mutations, the fight engine and the opponent pool.
///
/// Every variant is reported at the offending call; a failed roster operation
/// leaves the roster exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("[{action}]: no pet in team at index {index}")]
    InvalidIndex { action: &'static str, index: usize },

    #[error("[COMBINE]: trying to combine different pets ({expected} and {found})")]
    NameMismatch { expected: String, found: String },

    #[error("[COMBINE]: same source and destination ({index})")]
    SameIndex { index: usize },

    #[error("[ADD]: team already holds {} pets", MAX_PETS)]
    RosterFull,

    #[error("[{action}]: team is in a fight, reset it first")]
    InFight { action: &'static str },

    #[error("no saved opponent at or before turn {turn}")]
    NoOpponentAvailable { turn: u32 },

    #[error("malformed serialized team: {0}")]
    MalformedSerializedState(String),

    #[error("fight did not terminate after {rounds} micro-rounds")]
    NonTerminatingFight { rounds: usize },

    #[error("I/O error on opponent store {}", .path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArenaError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        ArenaError::MalformedSerializedState(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ArenaError>;
