//! Tile sides and perimeter connection points.
//!
//! Each tile side carries three connection points, read clockwise:
//!
//! ```text
//!        TOP_LEFT  TOP  TOP_RIGHT
//!  LEFT_TOP                      RIGHT_TOP
//!  LEFT                          RIGHT
//!  LEFT_BOTTOM                   RIGHT_BOTTOM
//!     BOTTOM_LEFT BOTTOM BOTTOM_RIGHT
//! ```
//!
//! A city covers all three points of a side, a road covers the centre point
//! and fields cover whatever is left. Point `(side, k)` of one tile touches
//! point `(side.opposite(), 2 - k)` of the tile across that side.

use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// One of the four sides of a square tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// All sides in clockwise order starting from the top
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    const fn index(self) -> u32 {
        match self {
            Side::Top => 0,
            Side::Right => 1,
            Side::Bottom => 2,
            Side::Left => 3,
        }
    }

    /// The side a neighboring tile presents to this one
    pub const fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }
}

const POINT_COUNT: u32 = 12;
const ALL_BITS: u16 = (1 << POINT_COUNT) - 1;

const fn point(index: u32) -> Points {
    Points(1 << index)
}

/// A set of perimeter connection points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Points(u16);

impl Points {
    pub const NONE: Points = Points(0);
    pub const ALL: Points = Points(ALL_BITS);

    pub const TOP_LEFT: Points = point(0);
    pub const TOP: Points = point(1);
    pub const TOP_RIGHT: Points = point(2);
    pub const RIGHT_TOP: Points = point(3);
    pub const RIGHT: Points = point(4);
    pub const RIGHT_BOTTOM: Points = point(5);
    pub const BOTTOM_RIGHT: Points = point(6);
    pub const BOTTOM: Points = point(7);
    pub const BOTTOM_LEFT: Points = point(8);
    pub const LEFT_BOTTOM: Points = point(9);
    pub const LEFT: Points = point(10);
    pub const LEFT_TOP: Points = point(11);

    /// Every point on the top side
    pub const TOP_EDGE: Points = Points(0b111);
    pub const RIGHT_EDGE: Points = Points(0b111 << 3);
    pub const BOTTOM_EDGE: Points = Points(0b111 << 6);
    pub const LEFT_EDGE: Points = Points(0b111 << 9);

    /// Every point on the given side
    pub const fn edge(side: Side) -> Points {
        Points(0b111 << (3 * side.index()))
    }

    /// Centre point of the given side
    pub const fn center(side: Side) -> Points {
        point(3 * side.index() + 1)
    }

    /// The `k`-th point (clockwise, `0..3`) of a side
    pub const fn at(side: Side, k: u32) -> Points {
        point(3 * side.index() + k)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Points) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub const fn intersects(self, other: Points) -> bool {
        self.0 & other.0 != 0
    }

    /// Rotate clockwise by a number of quarter turns
    pub const fn rotate(self, quarter_turns: u32) -> Points {
        let shift = 3 * (quarter_turns % 4);
        let bits = self.0 as u32;
        let rotated = (bits << shift) | (bits >> (POINT_COUNT - shift));
        Points((rotated as u16) & ALL_BITS)
    }

    /// Points one step away along the tile perimeter, in either direction
    pub const fn perimeter_neighbors(self) -> Points {
        let bits = self.0 as u32;
        let cw = (bits << 1) | (bits >> (POINT_COUNT - 1));
        let ccw = (bits >> 1) | (bits << (POINT_COUNT - 1));
        Points(((cw | ccw) as u16) & ALL_BITS)
    }

    /// Sides whose centre point is in this set
    pub fn sides(self) -> impl Iterator<Item = Side> {
        Side::ALL
            .into_iter()
            .filter(move |side| self.contains(Points::center(*side)))
    }
}

impl BitOr for Points {
    type Output = Points;

    fn bitor(self, rhs: Points) -> Points {
        Points(self.0 | rhs.0)
    }
}

impl BitOrAssign for Points {
    fn bitor_assign(&mut self, rhs: Points) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Points {
    type Output = Points;

    fn bitand(self, rhs: Points) -> Points {
        Points(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_moves_edge_clockwise() {
        assert_eq!(Points::TOP_EDGE.rotate(1), Points::RIGHT_EDGE);
        assert_eq!(Points::LEFT_EDGE.rotate(1), Points::TOP_EDGE);
        assert_eq!(Points::TOP.rotate(2), Points::BOTTOM);
        assert_eq!(Points::LEFT_TOP.rotate(3), Points::BOTTOM_LEFT);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        let mask = Points::TOP_EDGE | Points::RIGHT | Points::BOTTOM_LEFT;
        assert_eq!(mask.rotate(4), mask);
        assert_eq!(mask.rotate(1).rotate(3), mask);
    }

    #[test]
    fn test_facing_points_mirror_across_side() {
        // the top-left half of a tile touches the bottom-left half of the tile above it
        assert_eq!(Points::at(Side::Top, 0), Points::TOP_LEFT);
        assert_eq!(Points::at(Side::Bottom, 2), Points::BOTTOM_LEFT);
        assert_eq!(Points::at(Side::Right, 0), Points::RIGHT_TOP);
        assert_eq!(Points::at(Side::Left, 2), Points::LEFT_TOP);
    }

    #[test]
    fn test_perimeter_neighbors_wrap_around() {
        let around = Points::TOP_LEFT.perimeter_neighbors();
        assert_eq!(around, Points::TOP | Points::LEFT_TOP);
    }

    #[test]
    fn test_sides_reads_centre_points() {
        let mask = Points::TOP_EDGE | Points::LEFT | Points::BOTTOM_RIGHT;
        let sides: Vec<Side> = mask.sides().collect();
        assert_eq!(sides, vec![Side::Top, Side::Left]);
    }
}
