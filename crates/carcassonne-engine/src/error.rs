//! Engine error types.

use crate::protocol::GameId;
use carcassonne_core::GameError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("Invalid value {value:?} for {name}")]
    InvalidSetting { name: &'static str, value: String },

    #[error("Cannot prepare log directory: {0}")]
    LogDirectory(#[source] io::Error),

    #[error("Cannot start worker: {0}")]
    WorkerSpawn(#[source] io::Error),

    #[error("Game {0} not found")]
    GameNotFound(GameId),

    #[error("Worker is no longer running")]
    WorkerUnavailable,

    #[error(transparent)]
    Game(#[from] GameError),
}
