//! Square grid coordinates for the board.
//!
//! The grid is unbounded in every direction. `y` grows upward, so the tile
//! at `(0, 1)` sits directly above the starting tile.
//!
//! Positions have a compact text form, `"x,y"` (for example `"-31,-5"`),
//! which is also their serde representation so they can key JSON maps.

use crate::side::Side;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A cell on the board grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    x: i16,
    y: i16,
}

impl Position {
    /// The cell the starting tile is placed on
    pub const ORIGIN: Position = Position::new(0, 0);

    /// Create a new position
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub const fn x(&self) -> i16 {
        self.x
    }

    pub const fn y(&self) -> i16 {
        self.y
    }

    /// The cell across the given side of this one
    ///
    /// `None` at the edge of the coordinate range, where there is no such cell.
    pub fn neighbor(&self, side: Side) -> Option<Position> {
        let (dx, dy) = match side {
            Side::Top => (0, 1),
            Side::Right => (1, 0),
            Side::Bottom => (0, -1),
            Side::Left => (-1, 0),
        };
        self.offset(dx, dy)
    }

    /// The existing edge-sharing neighbors, in `Side::ALL` order
    pub fn neighbors(&self) -> impl Iterator<Item = Position> {
        let origin = *self;
        Side::ALL
            .into_iter()
            .filter_map(move |side| origin.neighbor(side))
    }

    /// The existing cells around this one (edge and corner neighbors)
    ///
    /// Always eight cells except at the edge of the coordinate range.
    pub fn surrounding(&self) -> impl Iterator<Item = Position> {
        const RING: [(i16, i16); 8] = [
            (-1, 1),
            (0, 1),
            (1, 1),
            (1, 0),
            (1, -1),
            (0, -1),
            (-1, -1),
            (-1, 0),
        ];
        let origin = *self;
        RING.into_iter()
            .filter_map(move |(dx, dy)| origin.offset(dx, dy))
    }

    fn offset(&self, dx: i16, dy: i16) -> Option<Position> {
        Some(Position::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
        ))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Failure to read a position from its `"x,y"` text form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePositionError {
    #[error("expected two comma-separated coordinates, got {0:?}")]
    Malformed(String),

    #[error("invalid coordinate {0:?}")]
    InvalidCoordinate(String),
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| ParsePositionError::Malformed(s.to_string()))?;
        let parse = |part: &str| {
            part.parse::<i16>()
                .map_err(|_| ParsePositionError::InvalidCoordinate(part.to_string()))
        };
        Ok(Position::new(parse(x)?, parse(y)?))
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_positive_coords() {
        assert_eq!(Position::new(1, 3).to_string(), "1,3");
    }

    #[test]
    fn test_format_negative_coords() {
        assert_eq!(Position::new(-31, -5).to_string(), "-31,-5");
    }

    #[test]
    fn test_parse_negative_coords() {
        let pos: Position = "-31,-5".parse().unwrap();
        assert_eq!(pos.x(), -31);
        assert_eq!(pos.y(), -5);
    }

    #[test]
    fn test_text_round_trip() {
        for pos in [
            Position::ORIGIN,
            Position::new(7, -2),
            Position::new(i16::MIN, i16::MAX),
        ] {
            let parsed: Position = pos.to_string().parse().unwrap();
            assert_eq!(parsed, pos);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "12".parse::<Position>(),
            Err(ParsePositionError::Malformed(_))
        ));
        assert!(matches!(
            "1,y".parse::<Position>(),
            Err(ParsePositionError::InvalidCoordinate(_))
        ));
        assert!(" 1,2".parse::<Position>().is_err());
    }

    #[test]
    fn test_serde_uses_text_form() {
        let json = serde_json::to_string(&Position::new(-4, 9)).unwrap();
        assert_eq!(json, "\"-4,9\"");
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Position::new(-4, 9));
    }

    #[test]
    fn test_neighbor_directions() {
        let pos = Position::new(2, 2);
        assert_eq!(pos.neighbor(Side::Top), Some(Position::new(2, 3)));
        assert_eq!(pos.neighbor(Side::Right), Some(Position::new(3, 2)));
        assert_eq!(pos.neighbor(Side::Bottom), Some(Position::new(2, 1)));
        assert_eq!(pos.neighbor(Side::Left), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_no_neighbor_past_the_coordinate_range() {
        let corner = Position::new(i16::MAX, i16::MIN);
        assert_eq!(corner.neighbor(Side::Right), None);
        assert_eq!(corner.neighbor(Side::Bottom), None);
        assert_eq!(corner.neighbor(Side::Left), Some(Position::new(i16::MAX - 1, i16::MIN)));
        assert_eq!(corner.neighbors().count(), 2);
        assert_eq!(corner.surrounding().count(), 3);
    }

    #[test]
    fn test_surrounding_has_eight_distinct_cells() {
        let pos = Position::new(0, 0);
        let cells: std::collections::HashSet<_> = pos.surrounding().collect();
        assert_eq!(cells.len(), 8);
        assert!(!cells.contains(&pos));
    }
}
