//! Turning settled features into points and returned tokens.

use crate::features::{Claim, FeatureGroup};
use crate::player::PlayerId;
use crate::tile::FeatureKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Points awarded and tokens handed back, grouped by player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub received_points: BTreeMap<PlayerId, u32>,
    pub returned_meeples: BTreeMap<PlayerId, u8>,
}

impl ScoreReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.received_points.is_empty() && self.returned_meeples.is_empty()
    }

    pub fn points_for(&self, player: PlayerId) -> u32 {
        self.received_points.get(&player).copied().unwrap_or(0)
    }

    pub fn meeples_for(&self, player: PlayerId) -> u8 {
        self.returned_meeples.get(&player).copied().unwrap_or(0)
    }

    pub fn add_points(&mut self, player: PlayerId, points: u32) {
        *self.received_points.entry(player).or_insert(0) += points;
    }

    pub fn add_meeples(&mut self, player: PlayerId, count: u8) {
        *self.returned_meeples.entry(player).or_insert(0) += count;
    }

    /// Fold another report into this one
    pub fn join(&mut self, other: &ScoreReport) {
        for (&player, &points) in &other.received_points {
            self.add_points(player, points);
        }
        for (&player, &count) in &other.returned_meeples {
            self.add_meeples(player, count);
        }
    }
}

/// Point values for every feature kind
///
/// Field scoring in particular differs between rule editions, so every
/// constant can be overridden from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub road_per_tile: u32,
    pub closed_city_per_tile: u32,
    pub open_city_per_tile: u32,
    pub closed_city_per_shield: u32,
    pub open_city_per_shield: u32,
    /// Per tile counted for a monastery (itself and each occupied neighbor)
    pub monastery_per_tile: u32,
    pub field_per_closed_city: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            road_per_tile: 1,
            closed_city_per_tile: 2,
            open_city_per_tile: 1,
            closed_city_per_shield: 2,
            open_city_per_shield: 1,
            monastery_per_tile: 1,
            field_per_closed_city: 3,
        }
    }
}

impl ScoringPolicy {
    /// Value of a road or city group
    ///
    /// `closed` distinguishes mid-game completion from end-of-game scoring of
    /// an unfinished feature. Monasteries and fields need board context and
    /// are valued by the board through [`Self::monastery`] and [`Self::field`].
    pub fn edge_feature(&self, group: &FeatureGroup, closed: bool) -> u32 {
        let tiles = group.tile_count();
        match group.kind {
            FeatureKind::Road => tiles * self.road_per_tile,
            FeatureKind::City if closed => {
                tiles * self.closed_city_per_tile + group.shields * self.closed_city_per_shield
            }
            FeatureKind::City => {
                tiles * self.open_city_per_tile + group.shields * self.open_city_per_shield
            }
            FeatureKind::Monastery | FeatureKind::Field => 0,
        }
    }

    /// Value of a monastery with `occupied_neighbors` of its 8 surrounding cells filled
    pub fn monastery(&self, occupied_neighbors: u32) -> u32 {
        (1 + occupied_neighbors.min(8)) * self.monastery_per_tile
    }

    /// Value of a field bordering `closed_cities` distinct completed cities
    pub fn field(&self, closed_cities: u32) -> u32 {
        closed_cities * self.field_per_closed_city
    }
}

/// Award `points` to the majority holders among `claims` and return every token
///
/// Every player holding the largest number of tokens receives the full value.
/// Unclaimed features award nothing.
pub fn settle(claims: &[Claim], points: u32) -> ScoreReport {
    let mut report = ScoreReport::new();

    let mut counts: BTreeMap<PlayerId, u8> = BTreeMap::new();
    for claim in claims {
        *counts.entry(claim.owner).or_insert(0) += 1;
    }

    let Some(&majority) = counts.values().max() else {
        return report;
    };

    for (&player, &count) in &counts {
        if count == majority && points > 0 {
            report.add_points(player, points);
        }
        report.add_meeples(player, count);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::SegmentRef;
    use crate::position::Position;
    use pretty_assertions::assert_eq;

    fn claim(owner: PlayerId) -> Claim {
        Claim {
            owner,
            position: Position::ORIGIN,
        }
    }

    fn city_group(tiles: i16, shields: u32) -> FeatureGroup {
        FeatureGroup {
            kind: FeatureKind::City,
            members: (0..tiles)
                .map(|x| SegmentRef {
                    position: Position::new(x, 0),
                    feature: 0,
                })
                .collect(),
            open_edges: 0,
            shields,
            claims: Vec::new(),
            scored: false,
        }
    }

    #[test]
    fn test_single_owner_takes_all() {
        let report = settle(&[claim(0)], 4);
        assert_eq!(report.points_for(0), 4);
        assert_eq!(report.meeples_for(0), 1);
    }

    #[test]
    fn test_tie_pays_every_majority_holder_in_full() {
        let report = settle(&[claim(0), claim(1), claim(2), claim(2)], 10);
        assert_eq!(report.points_for(2), 10);
        assert_eq!(report.points_for(0), 0);
        assert_eq!(report.points_for(1), 0);
        // minority tokens still come home
        assert_eq!(report.meeples_for(0), 1);
        assert_eq!(report.meeples_for(1), 1);
        assert_eq!(report.meeples_for(2), 2);

        let tie = settle(&[claim(0), claim(1)], 6);
        assert_eq!(tie.points_for(0), 6);
        assert_eq!(tie.points_for(1), 6);
    }

    #[test]
    fn test_unclaimed_feature_awards_nothing() {
        assert!(settle(&[], 12).is_empty());
    }

    #[test]
    fn test_city_values() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.edge_feature(&city_group(2, 0), true), 4);
        assert_eq!(policy.edge_feature(&city_group(3, 1), true), 8);
        assert_eq!(policy.edge_feature(&city_group(3, 1), false), 4);
    }

    #[test]
    fn test_monastery_and_field_values() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.monastery(8), 9);
        assert_eq!(policy.monastery(3), 4);
        assert_eq!(policy.field(2), 6);
    }

    #[test]
    fn test_join_adds_up() {
        let mut a = settle(&[claim(0)], 3);
        let b = settle(&[claim(0), claim(1)], 2);
        a.join(&b);
        assert_eq!(a.points_for(0), 5);
        assert_eq!(a.points_for(1), 2);
        assert_eq!(a.meeples_for(0), 2);
    }
}
