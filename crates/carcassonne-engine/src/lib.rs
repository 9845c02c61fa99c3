//! Carcassonne game engine host.
//!
//! Runs many independent games on a fixed pool of worker threads and serves
//! batched "legal moves" and "play turn" requests against them.
//!
//! # Modules
//!
//! - [`engine`]: Game registry, worker pool and batch API
//! - [`protocol`]: Batch request and response types
//! - [`config`]: Engine configuration from the environment
//! - [`logger`]: Append-only per-game event log

pub mod config;
pub mod engine;
pub mod error;
pub mod logger;
pub mod protocol;
mod worker;

pub use config::EngineConfig;
pub use engine::GameEngine;
pub use error::EngineError;
pub use logger::GameLogger;
pub use protocol::{
    GameId, GetLegalMovesRequest, GetLegalMovesResponse, PlayTurnRequest, PlayTurnResponse,
};
