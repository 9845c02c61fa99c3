//! The board: placed tiles, placement legality and feature settlement.
//!
//! This module contains:
//! - Placement validation (capacity, adjacency, edge terrain, token targets)
//! - Enumeration of legal tile placements
//! - Feature merging on placement and scoring of features that close
//! - The end-of-game pass over every feature still open

use crate::actions::{PlacedTile, TilePlacement};
use crate::features::{Claim, FeatureGraph, FeatureGroup, SegmentId};
use crate::game::GameError;
use crate::player::TilePlacer;
use crate::position::Position;
use crate::scoring::{self, ScoreReport, ScoringPolicy};
use crate::side::{Points, Side};
use crate::tile::{FeatureKind, Tile};
use crate::tileset::TileSet;
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone)]
struct Cell {
    placed: PlacedTile,
    /// Arena id of feature 0; feature `i` lives at `first_segment.offset(i)`
    first_segment: SegmentId,
}

/// The complete game board
#[derive(Debug, Clone)]
pub struct Board {
    /// Placed tiles in placement order
    cells: Vec<Cell>,
    /// Index into `cells` by position
    index: HashMap<Position, usize>,
    /// Maximum number of tiles the board accepts
    capacity: usize,
    features: FeatureGraph,
    /// Every monastery segment on the board
    monasteries: Vec<(Position, SegmentId)>,
    policy: ScoringPolicy,
}

impl Board {
    /// Create an empty board accepting at most `capacity` tiles
    pub fn new(capacity: usize) -> Self {
        Self::with_policy(capacity, ScoringPolicy::default())
    }

    /// Create an empty board with custom point values
    pub fn with_policy(capacity: usize, policy: ScoringPolicy) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            capacity,
            features: FeatureGraph::new(),
            monasteries: Vec::new(),
            policy,
        }
    }

    /// Create a board sized for a tile set with its starting tile already down
    pub fn from_tile_set(tile_set: &TileSet) -> Self {
        Self::from_tile_set_with_policy(tile_set, ScoringPolicy::default())
    }

    pub fn from_tile_set_with_policy(tile_set: &TileSet, policy: ScoringPolicy) -> Self {
        let mut board = Self::with_policy(tile_set.tiles.len() + 1, policy);
        board.insert(PlacedTile::starting(tile_set.starting_tile.clone()));
        board
    }

    // ==================== Query Methods ====================

    pub fn tile_count(&self) -> usize {
        self.cells.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Placed tiles in the order they were put down
    pub fn tiles(&self) -> impl Iterator<Item = &PlacedTile> {
        self.cells.iter().map(|cell| &cell.placed)
    }

    pub fn get_tile_at(&self, position: Position) -> Option<&PlacedTile> {
        self.cell(position).map(|cell| &cell.placed)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.index.contains_key(&position)
    }

    /// The group a feature of a placed tile belongs to
    pub fn feature_group(&self, position: Position, feature: usize) -> Option<&FeatureGroup> {
        self.segment(position, feature)
            .map(|segment| self.features.group(segment))
    }

    fn cell(&self, position: Position) -> Option<&Cell> {
        self.index.get(&position).map(|&i| &self.cells[i])
    }

    fn segment(&self, position: Position, feature: usize) -> Option<SegmentId> {
        let cell = self.cell(position)?;
        (feature < cell.placed.tile.features().len()).then(|| cell.first_segment.offset(feature))
    }

    fn occupied_around(&self, position: Position) -> u32 {
        position
            .surrounding()
            .filter(|p| self.is_occupied(*p))
            .count() as u32
    }

    // ==================== Validation Methods ====================

    /// Empty cells touching at least one placed tile, each listed once
    ///
    /// Order follows placement order, then `Side::ALL` around each tile.
    pub fn candidate_positions(&self) -> Vec<Position> {
        if self.cells.is_empty() {
            return vec![Position::ORIGIN];
        }

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for cell in &self.cells {
            for neighbor in cell.placed.position.neighbors() {
                if !self.is_occupied(neighbor) && seen.insert(neighbor) {
                    candidates.push(neighbor);
                }
            }
        }
        candidates
    }

    /// Check that a tile may go at a position, ignoring tokens and capacity
    fn check_position(&self, tile: &Tile, position: Position) -> Result<(), GameError> {
        if self.is_occupied(position) {
            return Err(GameError::InvalidPosition);
        }
        // the very first tile needs no neighbor
        if self.cells.is_empty() {
            return Ok(());
        }

        let mut has_neighbor = false;
        for side in Side::ALL {
            if let Some(neighbor) = position.neighbor(side).and_then(|p| self.get_tile_at(p)) {
                has_neighbor = true;
                if tile.edge(side) != neighbor.tile.edge(side.opposite()) {
                    return Err(GameError::InvalidPosition);
                }
            }
        }

        if has_neighbor {
            Ok(())
        } else {
            Err(GameError::InvalidPosition)
        }
    }

    /// Segments on neighboring tiles that a feature would join across edges
    fn neighbor_segments(
        &self,
        tile: &Tile,
        position: Position,
        feature: usize,
    ) -> Vec<(Side, SegmentId)> {
        let Some(points) = tile.feature(feature).map(|f| f.points) else {
            return Vec::new();
        };

        let mut joined = Vec::new();
        for side in Side::ALL {
            let Some(cell) = position.neighbor(side).and_then(|p| self.cell(p)) else {
                continue;
            };
            for k in 0..3 {
                if !points.contains(Points::at(side, k)) {
                    continue;
                }
                let facing = Points::at(side.opposite(), 2 - k);
                if let Some(theirs) = cell.placed.tile.feature_at(facing) {
                    let segment = cell.first_segment.offset(theirs);
                    if !joined.contains(&(side, segment)) {
                        joined.push((side, segment));
                    }
                }
            }
        }
        joined
    }

    /// Whether a token may go on `feature` if the tile were placed here
    ///
    /// The feature must exist and no group it would join may already hold a
    /// token.
    pub fn is_claimable(&self, tile: &Tile, position: Position, feature: usize) -> bool {
        tile.feature(feature).is_some()
            && self
                .neighbor_segments(tile, position, feature)
                .iter()
                .all(|(_, segment)| !self.features.group(*segment).is_claimed())
    }

    fn check_placement(&self, placed: &PlacedTile) -> Result<(), GameError> {
        if self.tile_count() >= self.capacity {
            return Err(GameError::CapacityExceeded);
        }
        self.check_position(&placed.tile, placed.position)?;
        if let Some(meeple) = placed.meeple {
            if !self.is_claimable(&placed.tile, placed.position, meeple.feature) {
                return Err(GameError::InvalidMeeplePlacement);
            }
        }
        Ok(())
    }

    /// Whether `place_tile` would accept this tile
    pub fn can_be_placed(&self, placed: &PlacedTile) -> bool {
        self.check_placement(placed).is_ok()
    }

    /// Every orientation and cell where the tile fits, rotation-major
    pub fn get_legal_moves_for(&self, tile: &Tile) -> Vec<TilePlacement> {
        let candidates = self.candidate_positions();
        let mut moves = Vec::new();
        for rotated in tile.rotations() {
            for &position in &candidates {
                if self.check_position(&rotated, position).is_ok() {
                    moves.push(TilePlacement {
                        tile: rotated.clone(),
                        position,
                    });
                }
            }
        }
        moves
    }

    /// Whether the tile fits anywhere in any orientation
    pub fn has_valid_placement(&self, tile: &Tile) -> bool {
        let candidates = self.candidate_positions();
        tile.rotations().iter().any(|rotated| {
            candidates
                .iter()
                .any(|&position| self.check_position(rotated, position).is_ok())
        })
    }

    // ==================== Mutation Methods ====================

    /// Put a tile down and settle every feature it completes
    ///
    /// Nothing changes when an error is returned.
    pub fn place_tile(&mut self, placed: PlacedTile) -> Result<ScoreReport, GameError> {
        self.check_placement(&placed)?;
        Ok(self.insert(placed))
    }

    /// Insert an already validated tile
    fn insert(&mut self, placed: PlacedTile) -> ScoreReport {
        let position = placed.position;
        let tile = placed.tile.clone();

        // register the tile's own segments
        let first_segment = self.features.next_segment();
        for (i, feature) in tile.features().iter().enumerate() {
            let segment = self.features.add_segment(position, i, feature);
            if feature.kind == FeatureKind::Monastery {
                self.monasteries.push((position, segment));
            }
        }
        if let Some(meeple) = placed.meeple {
            self.features.claim(
                first_segment.offset(meeple.feature),
                Claim {
                    owner: meeple.owner,
                    position,
                },
            );
        }

        // merge with every neighbor across shared edges
        for i in 0..tile.features().len() {
            let own = first_segment.offset(i);
            for (_, theirs) in self.neighbor_segments(&tile, position, i) {
                if self.features.group(theirs).kind == tile.features()[i].kind {
                    self.features.join_across_edge(own, theirs);
                }
            }
        }

        self.index.insert(position, self.cells.len());
        self.cells.push(Cell {
            placed,
            first_segment,
        });

        self.settle_closed(&tile, position, first_segment)
    }

    /// Score cities and roads closed by the tile at `position`, and monasteries it surrounds
    fn settle_closed(&mut self, tile: &Tile, position: Position, first_segment: SegmentId) -> ScoreReport {
        let mut report = ScoreReport::new();

        let mut roots = BTreeSet::new();
        for (i, feature) in tile.features().iter().enumerate() {
            if feature.kind.closes_by_edges() {
                roots.insert(self.features.find(first_segment.offset(i)));
            }
        }
        for root in roots {
            let group = self.features.group(root);
            if group.is_closed() && !group.scored {
                let points = self.policy.edge_feature(group, true);
                report.join(&self.settle_group(root, points));
            }
        }

        let mut around: Vec<Position> = position.surrounding().collect();
        around.push(position);
        let ready: Vec<SegmentId> = self
            .monasteries
            .iter()
            .filter(|(at, segment)| {
                around.contains(at)
                    && !self.features.group(*segment).scored
                    && self.occupied_around(*at) == 8
            })
            .map(|(_, segment)| *segment)
            .collect();
        for segment in ready {
            let points = self.policy.monastery(8);
            report.join(&self.settle_group(segment, points));
        }

        report
    }

    /// Pay out one group and lift its tokens off the board
    fn settle_group(&mut self, segment: SegmentId, points: u32) -> ScoreReport {
        let claims = self.features.settle(segment);
        for claim in &claims {
            if let Some(&i) = self.index.get(&claim.position) {
                self.cells[i].placed.meeple = None;
            }
        }
        scoring::settle(&claims, points)
    }

    /// Settle every feature that has not scored yet, as at the end of a game
    pub fn score_final(&mut self) -> ScoreReport {
        let mut report = ScoreReport::new();

        let pending: Vec<(SegmentId, u32)> = self
            .features
            .roots()
            .filter(|root| !self.features.group(*root).scored)
            .map(|root| (root, self.final_value(root)))
            .collect();

        for (root, points) in pending {
            report.join(&self.settle_group(root, points));
        }
        report
    }

    fn final_value(&self, root: SegmentId) -> u32 {
        let group = self.features.group(root);
        match group.kind {
            FeatureKind::City | FeatureKind::Road => {
                self.policy.edge_feature(group, group.is_closed())
            }
            FeatureKind::Monastery => {
                let at = group.members[0].position;
                self.policy.monastery(self.occupied_around(at))
            }
            FeatureKind::Field => self.policy.field(self.closed_cities_bordering(group)),
        }
    }

    /// Distinct completed cities a field group borders
    fn closed_cities_bordering(&self, field: &FeatureGroup) -> u32 {
        let mut cities = BTreeSet::new();
        for member in &field.members {
            let Some(cell) = self.cell(member.position) else {
                continue;
            };
            for city in cell.placed.tile.cities_bordering(member.feature) {
                let root = self.features.root(cell.first_segment.offset(city));
                if self.features.group(root).is_closed() {
                    cities.insert(root);
                }
            }
        }
        cities.len() as u32
    }
}

impl TilePlacer for Board {
    fn place_tile(&mut self, tile: PlacedTile) -> Result<ScoreReport, GameError> {
        Board::place_tile(self, tile)
    }
}
