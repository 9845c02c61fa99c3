//! Moves players can make and the events that result from them.
//!
//! This module defines the placement values passed between the board, the
//! players and the engine, plus the events a game reports after each turn.

use crate::player::PlayerId;
use crate::position::Position;
use crate::scoring::ScoreReport;
use crate::tile::Tile;
use serde::{Deserialize, Serialize};

/// A tile in a chosen orientation at a chosen cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePlacement {
    pub tile: Tile,
    pub position: Position,
}

/// A complete move: tile placement plus an optional token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegalMove {
    pub tile: Tile,
    pub position: Position,
    /// Index of the tile feature the token goes on, if any
    pub meeple: Option<usize>,
}

impl LegalMove {
    pub fn new(placement: TilePlacement, meeple: Option<usize>) -> Self {
        Self {
            tile: placement.tile,
            position: placement.position,
            meeple,
        }
    }

    /// The same placement without a token
    pub fn without_meeple(&self) -> Self {
        Self {
            meeple: None,
            ..self.clone()
        }
    }
}

/// A token standing on one feature of a placed tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meeple {
    pub feature: usize,
    pub owner: PlayerId,
}

/// A tile on the board, or about to be put there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub tile: Tile,
    pub position: Position,
    pub meeple: Option<Meeple>,
    /// Who placed it; `None` for the starting tile
    pub player: Option<PlayerId>,
}

impl PlacedTile {
    /// A tile placed at the origin by nobody
    pub fn starting(tile: Tile) -> Self {
        Self {
            tile,
            position: Position::ORIGIN,
            meeple: None,
            player: None,
        }
    }

    /// The tile a player puts down when making `mv`
    pub fn from_move(mv: &LegalMove, player: PlayerId) -> Self {
        Self {
            tile: mv.tile.clone(),
            position: mv.position,
            meeple: mv.meeple.map(|feature| Meeple {
                feature,
                owner: player,
            }),
            player: Some(player),
        }
    }

    pub fn has_meeple(&self) -> bool {
        self.meeple.is_some()
    }
}

/// Events that occur as a result of a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum GameEvent {
    /// A tile went on the board
    TilePlaced { player: PlayerId, tile: PlacedTile },

    /// Features settled as a consequence of a placement or of the game ending
    FeaturesScored {
        /// `None` for the end-of-game pass over every open feature
        trigger: Option<Position>,
        report: ScoreReport,
    },

    /// A drawn tile had nowhere to go and left the game
    TileDiscarded { tile: Tile },

    /// The deck ran out
    GameFinished { scores: Vec<u32> },
}

