use std::path::PathBuf;
use thiserror::Error;

use crate::game::GameState;

/// Message surfaced when a reset is attempted mid-round
pub const RESET_WHILE_ACTIVE: &str = "Cannot reset while game is active";

/// Rejected game operations. Starting while busy is ignored rather than
/// reported, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cannot reset while game is active (state: {state:?})")]
    ResetWhileActive { state: GameState },
}

impl GameError {
    /// Text shown to the player
    pub fn user_message(&self) -> &'static str {
        match self {
            GameError::ResetWhileActive { .. } => RESET_WHILE_ACTIVE,
        }
    }
}

/// Failures of the host application around the game core
#[derive(Debug, Error)]
pub enum AppError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("logger already initialised: {0}")]
    Logging(#[from] log::SetLoggerError),
}
