//! Random-play bot used to drive whole games.
//!
//! The bot only ever chooses among moves the game has already validated, so
//! any move it returns can be played as-is.

use crate::actions::LegalMove;
use crate::game::Game;
use rand::prelude::*;

/// A bot that picks uniformly among the legal moves
pub struct Bot {
    rng: StdRng,
}

impl Bot {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Bot whose choices are reproducible for a given seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick one of `moves`, or `None` when there are none
    pub fn choose_move(&mut self, moves: &[LegalMove]) -> Option<LegalMove> {
        moves.choose(&mut self.rng).cloned()
    }

    /// Pick a move for the current player of `game`
    pub fn choose_for(&mut self, game: &Game) -> Option<LegalMove> {
        let tile = game.current_tile()?;
        let moves = game.legal_moves(tile);
        self.choose_move(&moves)
    }
}

impl Default for Bot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use crate::tileset::TileSet;

    #[test]
    fn test_empty_moves() {
        let mut bot = Bot::with_seed(1);
        assert_eq!(bot.choose_move(&[]), None);
    }

    #[test]
    fn test_bot_chooses_legal_move() {
        let game = Game::new(&TileSet::standard(), 3, &GameConfig::default()).unwrap();
        let tile = game.current_tile().unwrap();
        let moves = game.legal_moves(tile);

        let mut bot = Bot::with_seed(3);
        let chosen = bot.choose_for(&game).unwrap();
        assert!(moves.contains(&chosen));
    }

    #[test]
    fn test_same_seed_same_choices() {
        let game = Game::new(&TileSet::standard(), 5, &GameConfig::default()).unwrap();
        let mut a = Bot::with_seed(9);
        let mut b = Bot::with_seed(9);
        for _ in 0..5 {
            assert_eq!(a.choose_for(&game), b.choose_for(&game));
        }
    }
}
