use thiserror::Error;

use crate::arcade::minigame::MinigameId;

/// Errors that can arise while running the game corner or touching its save data.
#[derive(Debug, Error)]
pub enum ArcadeError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Raw minigame index outside the registered set.
    #[error("invalid minigame id: {0}")]
    InvalidId(usize),

    /// A play request arrived while another session was still running.
    #[error("session already in progress for {0}")]
    SessionInProgress(MinigameId),

    /// `tick` was called with no active session.
    #[error("no active session")]
    NoActiveSession,

    /// Rejected configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ArcadeResult<T> = Result<T, ArcadeError>;
