//! Carcassonne - a tile-placement board game engine
//!
//! This crate provides the core game logic, including:
//! - Grid positions and the 12-point tile edge geometry
//! - The base-game tile catalog and seeded decks
//! - Board placement rules and feature connectivity
//! - Scoring of completed and unfinished features
//! - Player state and the turn state machine
//!
//! # Architecture
//!
//! The core is single-threaded and free of I/O. Hosting many games at once,
//! batching requests and event logging live in `carcassonne-engine`.
//!
//! # Modules
//!
//! - [`position`]: Grid coordinates and their `"x,y"` text form
//! - [`side`]: Tile sides and perimeter connection points
//! - [`tile`]: Tiles, their features and rotations
//! - [`tiletemplates`] / [`tileset`]: The tile catalog and decks
//! - [`features`]: Union-find over terrain segments
//! - [`scoring`]: Point values and majority settlement
//! - [`board`]: Placement legality and settlement on placement
//! - [`moves`]: Legal move enumeration
//! - [`player`]: Player state
//! - [`game`]: Game state machine

pub mod actions;
pub mod board;
pub mod bot;
pub mod features;
pub mod game;
pub mod moves;
pub mod player;
pub mod position;
pub mod scoring;
pub mod side;
pub mod tile;
pub mod tileset;
pub mod tiletemplates;

// Re-export commonly used types
pub use actions::{GameEvent, LegalMove, Meeple, PlacedTile, TilePlacement};
pub use board::Board;
pub use bot::Bot;
pub use features::{FeatureGraph, FeatureGroup, SegmentId};
pub use game::{Game, GameConfig, GameError, GamePhase, GameSnapshot};
pub use moves::LegalMoveGenerator;
pub use player::{Player, PlayerId, TilePlacer, DEFAULT_MEEPLE_COUNT};
pub use position::{ParsePositionError, Position};
pub use scoring::{ScoreReport, ScoringPolicy};
pub use side::{Points, Side};
pub use tile::{Feature, FeatureKind, Terrain, Tile};
pub use tileset::{Deck, TileSet};
