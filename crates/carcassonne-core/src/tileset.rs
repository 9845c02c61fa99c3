//! Tile sets and the draw deck built from them.

use crate::tile::Tile;
use crate::tiletemplates::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A starting tile plus the tiles that make up the draw pile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSet {
    pub starting_tile: Tile,
    pub tiles: Vec<Tile>,
}

impl TileSet {
    /// The 72-tile base game (starting tile plus 71 drawable tiles)
    pub fn standard() -> Self {
        let counts: [(fn() -> Tile, usize); 24] = [
            (monastery_with_single_road, 2),
            (monastery_without_roads, 4),
            (four_city_edges_connected_shield, 1),
            (single_city_edge_straight_roads, 3),
            (single_city_edge_no_roads, 5),
            (two_city_edges_up_and_down_connected_shield, 2),
            (two_city_edges_up_and_down_connected, 1),
            (two_city_edges_not_connected, 3),
            (two_city_edges_corner_not_connected, 2),
            (single_city_edge_right_road_turn, 3),
            (single_city_edge_left_road_turn, 3),
            (single_city_edge_cross_road, 3),
            (two_city_edges_corner_connected_shield, 2),
            (two_city_edges_corner_connected, 3),
            (two_city_edges_corner_connected_road_turn_shield, 2),
            (two_city_edges_corner_connected_road_turn, 3),
            (three_city_edges_connected_shield, 1),
            (three_city_edges_connected, 3),
            (three_city_edges_connected_road_shield, 2),
            (three_city_edges_connected_road, 1),
            (straight_road, 8),
            (road_curve, 9),
            (t_cross_road, 4),
            (x_cross_road, 1),
        ];

        let tiles = counts
            .iter()
            .flat_map(|(template, count)| std::iter::repeat_with(template).take(*count))
            .collect();

        Self {
            starting_tile: starting_tile(),
            tiles,
        }
    }

    /// A set holding `count` copies of one tile, also used as its starting tile
    pub fn uniform(tile: Tile, count: usize) -> Self {
        Self {
            starting_tile: tile.clone(),
            tiles: vec![tile; count],
        }
    }
}

/// Remaining tiles to draw, consumed front to back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub starting_tile: Tile,
    tiles: VecDeque<Tile>,
}

impl Deck {
    /// A deck that deals the tile set in its listed order
    pub fn ordered(tile_set: &TileSet) -> Self {
        Self {
            starting_tile: tile_set.starting_tile.clone(),
            tiles: tile_set.tiles.iter().cloned().collect(),
        }
    }

    /// A deck shuffled by a generator seeded for this deck alone
    pub fn shuffled(tile_set: &TileSet, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tiles = tile_set.tiles.clone();
        tiles.shuffle(&mut rng);
        Self {
            starting_tile: tile_set.starting_tile.clone(),
            tiles: tiles.into(),
        }
    }

    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tile_set_size() {
        let set = TileSet::standard();
        assert_eq!(set.tiles.len(), 71);
        assert_eq!(set.starting_tile, starting_tile());
    }

    #[test]
    fn test_same_seed_same_order() {
        let set = TileSet::standard();
        let a = Deck::shuffled(&set, 42);
        let b = Deck::shuffled(&set, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_order() {
        let set = TileSet::standard();
        let a = Deck::shuffled(&set, 1);
        let b = Deck::shuffled(&set, 2);
        assert_ne!(a, b);
        assert_eq!(a.remaining(), b.remaining());
    }

    #[test]
    fn test_ordered_deck_draws_front_to_back() {
        let set = TileSet {
            starting_tile: starting_tile(),
            tiles: vec![straight_road(), road_curve()],
        };
        let mut deck = Deck::ordered(&set);
        assert_eq!(deck.draw(), Some(straight_road()));
        assert_eq!(deck.draw(), Some(road_curve()));
        assert_eq!(deck.draw(), None);
        assert!(deck.is_empty());
    }
}
