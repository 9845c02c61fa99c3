//! Core game state machine.
//!
//! This module contains the main `Game` struct: deck, current tile, players
//! and turn sequencing from the starting tile to the final scoring pass.

use crate::actions::{GameEvent, LegalMove, PlacedTile};
use crate::board::Board;
use crate::moves::LegalMoveGenerator;
use crate::player::{Player, PlayerId, DEFAULT_MEEPLE_COUNT};
use crate::scoring::{ScoreReport, ScoringPolicy};
use crate::tile::Tile;
use crate::tileset::{Deck, TileSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest supported table
const MIN_PLAYERS: u8 = 1;

/// Largest supported table
const MAX_PLAYERS: u8 = 6;

/// Errors that can occur when placing tiles or playing turns
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Board is already holding its maximum number of tiles")]
    CapacityExceeded,

    #[error("Tile cannot be placed at this position")]
    InvalidPosition,

    #[error("Token cannot be placed on that feature")]
    InvalidMeeplePlacement,

    #[error("No meeples available")]
    NoMeepleAvailable,

    #[error("Move does not use the current tile")]
    WrongTile,

    #[error("Game is over")]
    GameFinished,

    #[error("Unsupported player count {0}")]
    InvalidPlayerCount(u8),
}

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the current player to place the current tile
    AwaitingMove,
    /// Deck exhausted and final scoring done
    Finished,
}

/// Table setup for a new game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_count: u8,
    pub meeples_per_player: u8,
    pub scoring: ScoringPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            meeples_per_player: DEFAULT_MEEPLE_COUNT,
            scoring: ScoringPolicy::default(),
        }
    }
}

/// The complete game state
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: Vec<Player>,
    deck: Deck,
    /// Tile awaiting placement; `None` once the game is over
    current_tile: Option<Tile>,
    /// Index into `players`
    current_player: usize,
    /// Turns played so far
    turn: u32,
    phase: GamePhase,
}

impl Game {
    /// Create a game over a deck shuffled with `seed`
    pub fn new(tile_set: &TileSet, seed: u64, config: &GameConfig) -> Result<Self, GameError> {
        Self::new_from_deck(Deck::shuffled(tile_set, seed), config)
    }

    /// Create a game dealing from `deck` as given
    ///
    /// The starting tile goes on the origin and the first placeable tile is
    /// drawn as the current tile.
    pub fn new_from_deck(deck: Deck, config: &GameConfig) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&config.player_count) {
            return Err(GameError::InvalidPlayerCount(config.player_count));
        }

        let players = (0..config.player_count)
            .map(|id| Player::with_meeples(id, config.meeples_per_player))
            .collect();

        let mut board = Board::with_policy(deck.remaining() + 1, config.scoring.clone());
        board.place_tile(PlacedTile::starting(deck.starting_tile.clone()))?;

        let mut game = Self {
            board,
            players,
            deck,
            current_tile: None,
            current_player: 0,
            turn: 0,
            phase: GamePhase::AwaitingMove,
        };
        game.draw_next();
        Ok(game)
    }

    // ==================== Queries ====================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_tile(&self) -> Option<&Tile> {
        self.current_tile.as_ref()
    }

    pub fn current_player(&self) -> PlayerId {
        self.players[self.current_player].id()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    pub fn remaining_tiles(&self) -> usize {
        self.deck.remaining()
    }

    pub fn scores(&self) -> Vec<u32> {
        self.players.iter().map(Player::score).collect()
    }

    /// Every legal move of `tile` for the player whose turn it is
    pub fn legal_moves(&self, tile: &Tile) -> Vec<LegalMove> {
        if self.is_finished() {
            return Vec::new();
        }
        LegalMoveGenerator::new(&self.board, &self.players[self.current_player]).generate(tile)
    }

    /// Serializable view of the game
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            current_tile: self.current_tile.clone(),
            current_player: self.current_player(),
            turn: self.turn,
            remaining_tiles: self.deck.remaining(),
            players: self.players.clone(),
            tiles: self.board.tiles().cloned().collect(),
        }
    }

    // ==================== Turn Flow ====================

    /// Play the current tile for the current player
    ///
    /// On success the turn passes to the next player and the next placeable
    /// tile is drawn. On error nothing changes.
    pub fn play_turn(&mut self, mv: LegalMove) -> Result<Vec<GameEvent>, GameError> {
        if self.is_finished() {
            return Err(GameError::GameFinished);
        }
        let current = self.current_tile.as_ref().ok_or(GameError::GameFinished)?;
        if !current.is_rotation_of(&mv.tile) {
            return Err(GameError::WrongTile);
        }

        let player_id = self.current_player();
        let placed = PlacedTile::from_move(&mv, player_id);
        let report =
            self.players[self.current_player].place_tile(&mut self.board, placed.clone())?;

        let mut events = vec![GameEvent::TilePlaced {
            player: player_id,
            tile: placed,
        }];
        if !report.is_empty() {
            self.distribute(&report, Some(player_id));
            events.push(GameEvent::FeaturesScored {
                trigger: Some(mv.position),
                report,
            });
        }

        self.current_player = (self.current_player + 1) % self.players.len();
        self.turn += 1;
        events.extend(self.draw_next());
        Ok(events)
    }

    /// Credit a report to every player except `skip`
    fn distribute(&mut self, report: &ScoreReport, skip: Option<PlayerId>) {
        for player in &mut self.players {
            if Some(player.id()) != skip {
                player.apply_report(report);
            }
        }
    }

    /// Draw until a placeable tile turns up, finishing the game if none does
    fn draw_next(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        loop {
            match self.deck.draw() {
                Some(tile) if self.board.has_valid_placement(&tile) => {
                    self.current_tile = Some(tile);
                    return events;
                }
                Some(tile) => events.push(GameEvent::TileDiscarded { tile }),
                None => {
                    events.extend(self.finish());
                    return events;
                }
            }
        }
    }

    fn finish(&mut self) -> Vec<GameEvent> {
        self.current_tile = None;
        self.phase = GamePhase::Finished;

        let report = self.board.score_final();
        self.distribute(&report, None);

        let mut events = Vec::new();
        if !report.is_empty() {
            events.push(GameEvent::FeaturesScored {
                trigger: None,
                report,
            });
        }
        events.push(GameEvent::GameFinished {
            scores: self.scores(),
        });
        events
    }
}

/// Read-only view of a game handed to callers outside the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub current_tile: Option<Tile>,
    pub current_player: PlayerId,
    pub turn: u32,
    pub remaining_tiles: usize,
    pub players: Vec<Player>,
    /// Placed tiles in placement order
    pub tiles: Vec<PlacedTile>,
}

impl GameSnapshot {
    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::tiletemplates;
    use pretty_assertions::assert_eq;

    fn ordered_game(tiles: Vec<Tile>) -> Game {
        let set = TileSet {
            starting_tile: tiletemplates::starting_tile(),
            tiles,
        };
        Game::new_from_deck(Deck::ordered(&set), &GameConfig::default()).unwrap()
    }

    fn city_cap() -> Tile {
        tiletemplates::single_city_edge_no_roads().rotate(2)
    }

    #[test]
    fn test_new_game_places_starting_tile_and_draws() {
        let game = ordered_game(vec![tiletemplates::straight_road(), city_cap()]);
        assert_eq!(game.board().tile_count(), 1);
        assert_eq!(game.current_tile(), Some(&tiletemplates::straight_road()));
        assert_eq!(game.remaining_tiles(), 1);
        assert_eq!(game.current_player(), 0);
        assert_eq!(game.phase(), GamePhase::AwaitingMove);
    }

    #[test]
    fn test_invalid_player_count() {
        let config = GameConfig {
            player_count: 0,
            ..GameConfig::default()
        };
        let err = Game::new(&TileSet::standard(), 1, &config).unwrap_err();
        assert_eq!(err, GameError::InvalidPlayerCount(0));
    }

    #[test]
    fn test_play_turn_advances_player_and_tile() {
        let mut game = ordered_game(vec![tiletemplates::straight_road(), city_cap()]);
        let mv = LegalMove {
            tile: tiletemplates::straight_road(),
            position: Position::new(1, 0),
            meeple: Some(0),
        };

        let events = game.play_turn(mv).unwrap();
        assert!(matches!(events[0], GameEvent::TilePlaced { player: 0, .. }));
        assert_eq!(game.current_player(), 1);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.current_tile(), Some(&city_cap()));
        assert_eq!(game.players()[0].meeple_count(), DEFAULT_MEEPLE_COUNT - 1);
    }

    #[test]
    fn test_wrong_tile_rejected() {
        let mut game = ordered_game(vec![tiletemplates::straight_road()]);
        let mv = LegalMove {
            tile: city_cap(),
            position: Position::new(0, 1),
            meeple: None,
        };
        assert_eq!(game.play_turn(mv), Err(GameError::WrongTile));
        assert_eq!(game.board().tile_count(), 1);
    }

    #[test]
    fn test_illegal_move_leaves_game_untouched() {
        let mut game = ordered_game(vec![tiletemplates::straight_road()]);
        let before = game.snapshot();
        let mv = LegalMove {
            tile: tiletemplates::straight_road(),
            position: Position::new(0, 1),
            meeple: None,
        };
        assert_eq!(game.play_turn(mv), Err(GameError::InvalidPosition));
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_unplaceable_tile_is_discarded() {
        let mut game = ordered_game(vec![
            city_cap(),
            tiletemplates::four_city_edges_connected_shield(),
            tiletemplates::straight_road(),
        ]);
        let mv = LegalMove {
            tile: city_cap(),
            position: Position::new(0, 1),
            meeple: None,
        };

        let events = game.play_turn(mv).unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::TileDiscarded { .. })));
        assert_eq!(game.current_tile(), Some(&tiletemplates::straight_road()));
    }

    #[test]
    fn test_last_turn_finishes_with_final_scoring() {
        let mut game = ordered_game(vec![tiletemplates::straight_road()]);
        let mv = LegalMove {
            tile: tiletemplates::straight_road(),
            position: Position::new(1, 0),
            meeple: Some(0),
        };

        let events = game.play_turn(mv).unwrap();
        assert!(game.is_finished());
        assert_eq!(game.current_tile(), None);
        // open road over two tiles
        assert_eq!(game.scores(), vec![2, 0]);
        assert_eq!(game.players()[0].meeple_count(), DEFAULT_MEEPLE_COUNT);
        assert!(matches!(
            events.last(),
            Some(GameEvent::GameFinished { scores }) if scores == &vec![2, 0]
        ));

        let again = LegalMove {
            tile: tiletemplates::straight_road(),
            position: Position::new(2, 0),
            meeple: None,
        };
        assert_eq!(game.play_turn(again), Err(GameError::GameFinished));
        assert!(game.legal_moves(&tiletemplates::straight_road()).is_empty());
    }

    #[test]
    fn test_closing_city_scores_the_owner_not_the_mover() {
        let mut game = ordered_game(vec![
            tiletemplates::two_city_edges_up_and_down_connected(),
            city_cap(),
            tiletemplates::straight_road(),
        ]);

        // player 0 extends the starting city upward and claims it
        game.play_turn(LegalMove {
            tile: tiletemplates::two_city_edges_up_and_down_connected(),
            position: Position::new(0, 1),
            meeple: Some(0),
        })
        .unwrap();

        // player 1 closes it
        game.play_turn(LegalMove {
            tile: city_cap(),
            position: Position::new(0, 2),
            meeple: None,
        })
        .unwrap();

        assert_eq!(game.scores(), vec![6, 0]);
        assert_eq!(game.players()[0].meeple_count(), DEFAULT_MEEPLE_COUNT);
    }

    #[test]
    fn test_same_seed_same_game() {
        let set = TileSet::standard();
        let a = Game::new(&set, 42, &GameConfig::default()).unwrap();
        let b = Game::new(&set, 42, &GameConfig::default()).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.deck, b.deck);
    }

    #[test]
    fn test_snapshot_serializes() {
        let game = Game::new(&TileSet::standard(), 7, &GameConfig::default()).unwrap();
        let json = game.snapshot().to_json().unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, game.snapshot());
    }
}
