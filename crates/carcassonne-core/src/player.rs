//! Player state and the transactional placement wrapper.
//!
//! This module contains:
//! - Player struct with identity, token pool and score
//! - The `TilePlacer` capability a player places tiles through

use crate::actions::PlacedTile;
use crate::game::GameError;
use crate::scoring::ScoreReport;
use serde::{Deserialize, Serialize};

/// Player identifier (0-based seat index)
pub type PlayerId = u8;

/// Tokens each player starts with
pub const DEFAULT_MEEPLE_COUNT: u8 = 7;

/// Anything a player can put a tile down on
///
/// The board is the real implementation; tests substitute stubs.
pub trait TilePlacer {
    fn place_tile(&mut self, tile: PlacedTile) -> Result<ScoreReport, GameError>;
}

/// A single player's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    meeples: u8,
    score: u32,
}

impl Player {
    /// Create a new player with the default token pool
    pub fn new(id: PlayerId) -> Self {
        Self::with_meeples(id, DEFAULT_MEEPLE_COUNT)
    }

    pub fn with_meeples(id: PlayerId, meeples: u8) -> Self {
        Self {
            id,
            meeples,
            score: 0,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn meeple_count(&self) -> u8 {
        self.meeples
    }

    pub fn set_meeple_count(&mut self, meeples: u8) {
        self.meeples = meeples;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn has_meeples(&self) -> bool {
        self.meeples > 0
    }

    /// Credit this player's share of a settlement
    pub fn apply_report(&mut self, report: &ScoreReport) {
        self.score += report.points_for(self.id);
        self.meeples = self.meeples.saturating_add(report.meeples_for(self.id));
    }

    /// Put a tile down through `board`, paying for the token if one is placed
    ///
    /// Fails with `NoMeepleAvailable` before touching the board when a token
    /// is requested from an empty pool. On any error the pool and score are
    /// left as they were. On success only this player's share of the report is
    /// applied; the caller distributes the rest.
    pub fn place_tile<B: TilePlacer + ?Sized>(
        &mut self,
        board: &mut B,
        tile: PlacedTile,
    ) -> Result<ScoreReport, GameError> {
        let uses_meeple = tile.has_meeple();
        if uses_meeple && !self.has_meeples() {
            return Err(GameError::NoMeepleAvailable);
        }

        let report = board.place_tile(tile)?;

        if uses_meeple {
            self.meeples -= 1;
        }
        self.apply_report(&report);
        Ok(report)
    }
}
