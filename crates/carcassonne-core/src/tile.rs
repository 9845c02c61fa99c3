//! Tile shapes: the terrain features printed on a tile and how they rotate.
//!
//! A tile is a plain value. Rotating produces a new tile and never touches
//! the catalog entry it came from. Feature order is stable across rotations,
//! so a feature index identifies the same segment in every orientation.

use crate::side::{Points, Side};
use serde::{Deserialize, Serialize};

/// Kind of terrain a feature segment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureKind {
    City,
    Road,
    Monastery,
    Field,
}

impl FeatureKind {
    /// Whether groups of this kind close once every edge is matched
    pub fn closes_by_edges(&self) -> bool {
        matches!(self, FeatureKind::City | FeatureKind::Road)
    }
}

/// One terrain segment printed on a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feature {
    pub kind: FeatureKind,
    /// Perimeter points covered by this segment (empty for monasteries)
    pub points: Points,
    /// City coat of arms
    pub shield: bool,
}

impl Feature {
    pub fn city(points: Points) -> Self {
        Self {
            kind: FeatureKind::City,
            points,
            shield: false,
        }
    }

    pub fn city_with_shield(points: Points) -> Self {
        Self {
            kind: FeatureKind::City,
            points,
            shield: true,
        }
    }

    pub fn road(points: Points) -> Self {
        Self {
            kind: FeatureKind::Road,
            points,
            shield: false,
        }
    }

    pub fn field(points: Points) -> Self {
        Self {
            kind: FeatureKind::Field,
            points,
            shield: false,
        }
    }

    pub fn monastery() -> Self {
        Self {
            kind: FeatureKind::Monastery,
            points: Points::NONE,
            shield: false,
        }
    }

    /// Number of tile sides this segment reaches
    pub fn edge_count(&self) -> u32 {
        self.points.sides().count() as u32
    }

    fn rotate(&self, quarter_turns: u32) -> Self {
        Self {
            points: self.points.rotate(quarter_turns),
            ..*self
        }
    }
}

/// Terrain presented along one tile side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    City,
    Road,
    Field,
}

/// A tile in a particular orientation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    features: Vec<Feature>,
    /// Quarter turns clockwise from the catalog orientation (0-3)
    rotation: u8,
}

impl Tile {
    /// Create a tile in catalog orientation
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            rotation: 0,
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// A copy of this tile turned clockwise by `quarter_turns`
    pub fn rotate(&self, quarter_turns: u8) -> Tile {
        let turns = u32::from(quarter_turns % 4);
        Tile {
            features: self.features.iter().map(|f| f.rotate(turns)).collect(),
            rotation: (self.rotation + quarter_turns % 4) % 4,
        }
    }

    /// All four orientations, starting with this one
    pub fn rotations(&self) -> [Tile; 4] {
        [self.rotate(0), self.rotate(1), self.rotate(2), self.rotate(3)]
    }

    /// Whether `other` is this tile in some orientation
    pub fn is_rotation_of(&self, other: &Tile) -> bool {
        (0..4).any(|turns| self.rotate(turns).features == other.features)
    }

    /// Index of the feature covering the given point, if any
    pub fn feature_at(&self, point: Points) -> Option<usize> {
        self.features.iter().position(|f| f.points.contains(point))
    }

    /// Terrain shown along a side
    pub fn edge(&self, side: Side) -> Terrain {
        match self
            .feature_at(Points::center(side))
            .map(|index| self.features[index].kind)
        {
            Some(FeatureKind::City) => Terrain::City,
            Some(FeatureKind::Road) => Terrain::Road,
            _ => Terrain::Field,
        }
    }

    /// Indices of the city segments a field segment borders on this tile
    pub fn cities_bordering(&self, field: usize) -> impl Iterator<Item = usize> + '_ {
        let reach = self
            .features
            .get(field)
            .map(|f| f.points.perimeter_neighbors())
            .unwrap_or(Points::NONE);
        self.features
            .iter()
            .enumerate()
            .filter(move |(_, f)| f.kind == FeatureKind::City && f.points.intersects(reach))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiletemplates;

    #[test]
    fn test_rotation_cycles_edges() {
        let tile = tiletemplates::single_city_edge_no_roads();
        assert_eq!(tile.edge(Side::Top), Terrain::City);

        let turned = tile.rotate(1);
        assert_eq!(turned.edge(Side::Right), Terrain::City);
        assert_eq!(turned.edge(Side::Top), Terrain::Field);
        assert_eq!(turned.rotation(), 1);

        let back = turned.rotate(3);
        assert_eq!(back, tile);
    }

    #[test]
    fn test_rotate_does_not_mutate_original() {
        let tile = tiletemplates::monastery_with_single_road();
        let _ = tile.rotate(2);
        assert_eq!(tile.edge(Side::Bottom), Terrain::Road);
        assert_eq!(tile.rotation(), 0);
    }

    #[test]
    fn test_is_rotation_of() {
        let tile = tiletemplates::road_curve();
        assert!(tile.is_rotation_of(&tile.rotate(3)));
        assert!(!tile.is_rotation_of(&tiletemplates::straight_road()));
    }

    #[test]
    fn test_road_edges_on_starting_tile() {
        let tile = tiletemplates::starting_tile();
        assert_eq!(tile.edge(Side::Top), Terrain::City);
        assert_eq!(tile.edge(Side::Right), Terrain::Road);
        assert_eq!(tile.edge(Side::Bottom), Terrain::Field);
        assert_eq!(tile.edge(Side::Left), Terrain::Road);
    }

    #[test]
    fn test_connected_city_runs_up_and_down() {
        for tile in [
            tiletemplates::two_city_edges_up_and_down_connected(),
            tiletemplates::two_city_edges_up_and_down_connected_shield(),
        ] {
            assert_eq!(tile.edge(Side::Top), Terrain::City);
            assert_eq!(tile.edge(Side::Bottom), Terrain::City);
            assert_eq!(tile.edge(Side::Right), Terrain::Field);
            assert_eq!(tile.edge(Side::Left), Terrain::Field);
        }
    }

    #[test]
    fn test_field_borders_only_cities_it_touches() {
        let tile = tiletemplates::starting_tile();
        let city = tile.feature_at(Points::TOP).unwrap();
        let north_field = tile.feature_at(Points::RIGHT_TOP).unwrap();
        let south_field = tile.feature_at(Points::BOTTOM).unwrap();

        assert_eq!(tile.cities_bordering(north_field).collect::<Vec<_>>(), vec![city]);
        assert_eq!(tile.cities_bordering(south_field).count(), 0);
    }

    #[test]
    fn test_field_between_two_cities_borders_both() {
        let tile = tiletemplates::two_city_edges_not_connected();
        let field = tile.feature_at(Points::TOP).unwrap();
        assert_eq!(tile.cities_bordering(field).count(), 2);
    }
}
