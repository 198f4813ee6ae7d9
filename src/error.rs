use crate::game::RunStatus;
use std::path::PathBuf;
use thiserror::Error;

/// Misuse of the game controller's state machine.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("cannot {action} while the game is {status}")]
    InvalidTransition { action: &'static str, status: RunStatus },
    #[error("a snake needs at least one segment")]
    EmptySnake,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("palette entry `{field}` is not a #RRGGBB color: {value:?}")]
    Color { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("failed to write snapshot")]
    Io(#[from] std::io::Error),
    #[error("failed to encode snapshot")]
    Json(#[from] serde_json::Error),
}
