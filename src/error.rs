//! Error types for tracker operations.

use thiserror::Error;

/// Rejected user input. The update that produced it is ignored and the
/// previously displayed state stays as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("no monster at row {0}")]
    UnknownRow(usize),

    #[error("unknown monster {0:?}")]
    UnknownMonster(String),

    #[error("could not parse death time {0:?}")]
    DeathTime(String),

    #[error("coordinate {0:?} is not a number")]
    Coordinate(String),

    #[error("monster {0:?} appears twice in the catalog")]
    DuplicateMonster(String),

    #[error("monster {name:?} has min respawn {min} above max respawn {max}")]
    InvertedDelay { name: String, min: u32, max: u32 },
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("stored data under {key:?} is corrupt")]
    StorageCorrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

impl TrackerError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, TrackerError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
