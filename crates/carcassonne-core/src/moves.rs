//! Enumerating every legal move for a tile, tokens included.

use crate::actions::LegalMove;
use crate::board::Board;
use crate::player::Player;
use crate::tile::Tile;

/// Expands board placements into full moves for one player
pub struct LegalMoveGenerator<'a> {
    board: &'a Board,
    player: &'a Player,
}

impl<'a> LegalMoveGenerator<'a> {
    pub fn new(board: &'a Board, player: &'a Player) -> Self {
        Self { board, player }
    }

    /// Every (rotation, position, token) combination for `tile`
    ///
    /// Placements come rotation-major in the board's candidate order. Each is
    /// followed by its token options: none first, then one per feature of the
    /// tile whose future group is still unclaimed, in feature order. Token
    /// options are only offered while the player has a token to spend.
    pub fn generate(&self, tile: &Tile) -> Vec<LegalMove> {
        let mut moves = Vec::new();
        for placement in self.board.get_legal_moves_for(tile) {
            let claimable: Vec<usize> = if self.player.has_meeples() {
                (0..placement.tile.features().len())
                    .filter(|&feature| {
                        self.board
                            .is_claimable(&placement.tile, placement.position, feature)
                    })
                    .collect()
            } else {
                Vec::new()
            };

            moves.push(LegalMove::new(placement.clone(), None));
            moves.extend(
                claimable
                    .into_iter()
                    .map(|feature| LegalMove::new(placement.clone(), Some(feature))),
            );
        }
        moves
    }
}
