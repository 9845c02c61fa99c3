//! The base-game tile shapes, in catalog orientation.
//!
//! Every template lists cities first, then roads, then monasteries, then
//! fields. Fields split by a road are separate segments.

use crate::side::Points;
use crate::tile::{Feature, Tile};

/// City on top, straight road from left to right. Also the starting tile.
pub fn single_city_edge_straight_roads() -> Tile {
    Tile::new(vec![
        Feature::city(Points::TOP_EDGE),
        Feature::road(Points::RIGHT | Points::LEFT),
        Feature::field(Points::RIGHT_TOP | Points::LEFT_TOP),
        Feature::field(Points::RIGHT_BOTTOM | Points::BOTTOM_EDGE | Points::LEFT_BOTTOM),
    ])
}

/// The tile every game starts from
pub fn starting_tile() -> Tile {
    single_city_edge_straight_roads()
}

pub fn monastery_with_single_road() -> Tile {
    Tile::new(vec![
        Feature::road(Points::BOTTOM),
        Feature::monastery(),
        Feature::field(
            Points::TOP_EDGE
                | Points::RIGHT_EDGE
                | Points::BOTTOM_RIGHT
                | Points::BOTTOM_LEFT
                | Points::LEFT_EDGE,
        ),
    ])
}

pub fn monastery_without_roads() -> Tile {
    Tile::new(vec![Feature::monastery(), Feature::field(Points::ALL)])
}

pub fn four_city_edges_connected_shield() -> Tile {
    Tile::new(vec![Feature::city_with_shield(Points::ALL)])
}

pub fn single_city_edge_no_roads() -> Tile {
    Tile::new(vec![
        Feature::city(Points::TOP_EDGE),
        Feature::field(Points::RIGHT_EDGE | Points::BOTTOM_EDGE | Points::LEFT_EDGE),
    ])
}

fn two_city_edges_up_and_down(shield: bool) -> Tile {
    let city = Points::TOP_EDGE | Points::BOTTOM_EDGE;
    Tile::new(vec![
        if shield {
            Feature::city_with_shield(city)
        } else {
            Feature::city(city)
        },
        Feature::field(Points::RIGHT_EDGE),
        Feature::field(Points::LEFT_EDGE),
    ])
}

/// City running from the top side to the bottom side, with a shield
pub fn two_city_edges_up_and_down_connected_shield() -> Tile {
    two_city_edges_up_and_down(true)
}

pub fn two_city_edges_up_and_down_connected() -> Tile {
    two_city_edges_up_and_down(false)
}

/// Two separate cities on opposite sides
pub fn two_city_edges_not_connected() -> Tile {
    Tile::new(vec![
        Feature::city(Points::LEFT_EDGE),
        Feature::city(Points::RIGHT_EDGE),
        Feature::field(Points::TOP_EDGE | Points::BOTTOM_EDGE),
    ])
}

/// Two separate cities on neighboring sides
pub fn two_city_edges_corner_not_connected() -> Tile {
    Tile::new(vec![
        Feature::city(Points::TOP_EDGE),
        Feature::city(Points::LEFT_EDGE),
        Feature::field(Points::RIGHT_EDGE | Points::BOTTOM_EDGE),
    ])
}

/// City on top, road bending from the right side to the bottom
pub fn single_city_edge_right_road_turn() -> Tile {
    Tile::new(vec![
        Feature::city(Points::TOP_EDGE),
        Feature::road(Points::RIGHT | Points::BOTTOM),
        Feature::field(Points::RIGHT_BOTTOM | Points::BOTTOM_RIGHT),
        Feature::field(Points::RIGHT_TOP | Points::BOTTOM_LEFT | Points::LEFT_EDGE),
    ])
}

/// City on top, road bending from the left side to the bottom
pub fn single_city_edge_left_road_turn() -> Tile {
    Tile::new(vec![
        Feature::city(Points::TOP_EDGE),
        Feature::road(Points::BOTTOM | Points::LEFT),
        Feature::field(Points::BOTTOM_LEFT | Points::LEFT_BOTTOM),
        Feature::field(Points::RIGHT_EDGE | Points::BOTTOM_RIGHT | Points::LEFT_TOP),
    ])
}

/// City on top, three roads ending at a crossing
pub fn single_city_edge_cross_road() -> Tile {
    Tile::new(vec![
        Feature::city(Points::TOP_EDGE),
        Feature::road(Points::RIGHT),
        Feature::road(Points::BOTTOM),
        Feature::road(Points::LEFT),
        Feature::field(Points::RIGHT_TOP | Points::LEFT_TOP),
        Feature::field(Points::RIGHT_BOTTOM | Points::BOTTOM_RIGHT),
        Feature::field(Points::BOTTOM_LEFT | Points::LEFT_BOTTOM),
    ])
}

fn two_city_edges_corner(shield: bool) -> Tile {
    let city = Points::TOP_EDGE | Points::LEFT_EDGE;
    Tile::new(vec![
        if shield {
            Feature::city_with_shield(city)
        } else {
            Feature::city(city)
        },
        Feature::field(Points::RIGHT_EDGE | Points::BOTTOM_EDGE),
    ])
}

pub fn two_city_edges_corner_connected_shield() -> Tile {
    two_city_edges_corner(true)
}

pub fn two_city_edges_corner_connected() -> Tile {
    two_city_edges_corner(false)
}

fn two_city_edges_corner_road(shield: bool) -> Tile {
    let city = Points::TOP_EDGE | Points::LEFT_EDGE;
    Tile::new(vec![
        if shield {
            Feature::city_with_shield(city)
        } else {
            Feature::city(city)
        },
        Feature::road(Points::RIGHT | Points::BOTTOM),
        Feature::field(Points::RIGHT_BOTTOM | Points::BOTTOM_RIGHT),
        Feature::field(Points::RIGHT_TOP | Points::BOTTOM_LEFT),
    ])
}

pub fn two_city_edges_corner_connected_road_turn_shield() -> Tile {
    two_city_edges_corner_road(true)
}

pub fn two_city_edges_corner_connected_road_turn() -> Tile {
    two_city_edges_corner_road(false)
}

fn three_city_edges(shield: bool) -> Tile {
    let city = Points::TOP_EDGE | Points::RIGHT_EDGE | Points::LEFT_EDGE;
    Tile::new(vec![
        if shield {
            Feature::city_with_shield(city)
        } else {
            Feature::city(city)
        },
        Feature::field(Points::BOTTOM_EDGE),
    ])
}

pub fn three_city_edges_connected_shield() -> Tile {
    three_city_edges(true)
}

pub fn three_city_edges_connected() -> Tile {
    three_city_edges(false)
}

fn three_city_edges_road(shield: bool) -> Tile {
    let city = Points::TOP_EDGE | Points::RIGHT_EDGE | Points::LEFT_EDGE;
    Tile::new(vec![
        if shield {
            Feature::city_with_shield(city)
        } else {
            Feature::city(city)
        },
        Feature::road(Points::BOTTOM),
        Feature::field(Points::BOTTOM_RIGHT),
        Feature::field(Points::BOTTOM_LEFT),
    ])
}

pub fn three_city_edges_connected_road_shield() -> Tile {
    three_city_edges_road(true)
}

pub fn three_city_edges_connected_road() -> Tile {
    three_city_edges_road(false)
}

/// Road running from the left side to the right side
pub fn straight_road() -> Tile {
    Tile::new(vec![
        Feature::road(Points::RIGHT | Points::LEFT),
        Feature::field(Points::TOP_EDGE | Points::RIGHT_TOP | Points::LEFT_TOP),
        Feature::field(Points::RIGHT_BOTTOM | Points::BOTTOM_EDGE | Points::LEFT_BOTTOM),
    ])
}

/// Road bending from the bottom side to the left side
pub fn road_curve() -> Tile {
    Tile::new(vec![
        Feature::road(Points::BOTTOM | Points::LEFT),
        Feature::field(Points::BOTTOM_LEFT | Points::LEFT_BOTTOM),
        Feature::field(
            Points::TOP_EDGE | Points::RIGHT_EDGE | Points::BOTTOM_RIGHT | Points::LEFT_TOP,
        ),
    ])
}

/// Three roads ending at a crossing, no road on top
pub fn t_cross_road() -> Tile {
    Tile::new(vec![
        Feature::road(Points::RIGHT),
        Feature::road(Points::BOTTOM),
        Feature::road(Points::LEFT),
        Feature::field(Points::TOP_EDGE | Points::RIGHT_TOP | Points::LEFT_TOP),
        Feature::field(Points::RIGHT_BOTTOM | Points::BOTTOM_RIGHT),
        Feature::field(Points::BOTTOM_LEFT | Points::LEFT_BOTTOM),
    ])
}

pub fn x_cross_road() -> Tile {
    Tile::new(vec![
        Feature::road(Points::TOP),
        Feature::road(Points::RIGHT),
        Feature::road(Points::BOTTOM),
        Feature::road(Points::LEFT),
        Feature::field(Points::TOP_RIGHT | Points::RIGHT_TOP),
        Feature::field(Points::RIGHT_BOTTOM | Points::BOTTOM_RIGHT),
        Feature::field(Points::BOTTOM_LEFT | Points::LEFT_BOTTOM),
        Feature::field(Points::LEFT_TOP | Points::TOP_LEFT),
    ])
}
