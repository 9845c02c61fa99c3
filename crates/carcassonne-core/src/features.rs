//! Connectivity of terrain segments across placed tiles.
//!
//! Every feature segment of every placed tile gets a slot in an arena and is
//! addressed by a stable [`SegmentId`]. Segments that join across tile edges
//! are merged with a union-find (union by size, path compression); the
//! representative slot of each set carries the [`FeatureGroup`] bookkeeping.

use crate::player::PlayerId;
use crate::position::Position;
use crate::tile::{Feature, FeatureKind};
use serde::{Deserialize, Serialize};

/// Arena index of one segment on one placed tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(u32);

impl SegmentId {
    fn index(self) -> usize {
        self.0 as usize
    }

    /// The id of the `offset`-th segment registered after this one
    pub fn offset(self, offset: usize) -> SegmentId {
        SegmentId(self.0 + offset as u32)
    }
}

/// Where a segment lives on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentRef {
    pub position: Position,
    pub feature: usize,
}

/// A token standing on some segment of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    pub owner: PlayerId,
    pub position: Position,
}

/// Bookkeeping for one connected feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureGroup {
    pub kind: FeatureKind,
    pub members: Vec<SegmentRef>,
    /// Tile edges of the group not yet matched by a neighbor
    pub open_edges: u32,
    pub shields: u32,
    pub claims: Vec<Claim>,
    /// Set once the group has been settled and may not score again
    pub scored: bool,
}

impl FeatureGroup {
    /// Number of distinct tiles the group spans
    pub fn tile_count(&self) -> u32 {
        let mut positions: Vec<Position> = self.members.iter().map(|m| m.position).collect();
        positions.sort_unstable();
        positions.dedup();
        positions.len() as u32
    }

    /// Closed by edge matching; monastery closure is decided by the board
    pub fn is_closed(&self) -> bool {
        self.kind.closes_by_edges() && self.open_edges == 0
    }

    pub fn is_claimed(&self) -> bool {
        !self.claims.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: u32,
    size: u32,
}

/// Union-find over every segment on the board
#[derive(Debug, Clone, Default)]
pub struct FeatureGraph {
    nodes: Vec<Node>,
    /// Populated only at set representatives
    groups: Vec<Option<FeatureGroup>>,
}

impl FeatureGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next registered segment will receive
    pub fn next_segment(&self) -> SegmentId {
        SegmentId(self.nodes.len() as u32)
    }

    /// Register a segment as its own one-member group
    pub fn add_segment(&mut self, position: Position, index: usize, feature: &Feature) -> SegmentId {
        let id = SegmentId(self.nodes.len() as u32);
        self.nodes.push(Node {
            parent: id.0,
            size: 1,
        });
        self.groups.push(Some(FeatureGroup {
            kind: feature.kind,
            members: vec![SegmentRef {
                position,
                feature: index,
            }],
            open_edges: if feature.kind.closes_by_edges() {
                feature.edge_count()
            } else {
                0
            },
            shields: u32::from(feature.shield),
            claims: Vec::new(),
            scored: false,
        }));
        id
    }

    /// Representative of a segment's group, without compressing paths
    pub fn root(&self, id: SegmentId) -> SegmentId {
        let mut current = id.0;
        while self.nodes[current as usize].parent != current {
            current = self.nodes[current as usize].parent;
        }
        SegmentId(current)
    }

    /// Representative of a segment's group, compressing the path walked
    pub fn find(&mut self, id: SegmentId) -> SegmentId {
        let root = self.root(id);
        let mut current = id.0;
        while current != root.0 {
            let next = self.nodes[current as usize].parent;
            self.nodes[current as usize].parent = root.0;
            current = next;
        }
        root
    }

    pub fn group(&self, id: SegmentId) -> &FeatureGroup {
        let root = self.root(id);
        self.groups[root.index()]
            .as_ref()
            .unwrap_or_else(|| unreachable!("representative {root:?} has no group"))
    }

    fn group_mut(&mut self, id: SegmentId) -> &mut FeatureGroup {
        let root = self.find(id);
        self.groups[root.index()]
            .as_mut()
            .unwrap_or_else(|| unreachable!("representative {root:?} has no group"))
    }

    /// Merge two groups, returning the surviving representative
    pub fn union(&mut self, a: SegmentId, b: SegmentId) -> SegmentId {
        let (a, b) = (self.find(a), self.find(b));
        if a == b {
            return a;
        }

        let (big, small) = if self.nodes[a.index()].size >= self.nodes[b.index()].size {
            (a, b)
        } else {
            (b, a)
        };
        self.nodes[small.index()].parent = big.0;
        self.nodes[big.index()].size += self.nodes[small.index()].size;

        if let Some(absorbed) = self.groups[small.index()].take() {
            let survivor = self.group_mut(big);
            survivor.members.extend(absorbed.members);
            survivor.open_edges += absorbed.open_edges;
            survivor.shields += absorbed.shields;
            survivor.claims.extend(absorbed.claims);
            survivor.scored |= absorbed.scored;
        }
        big
    }

    /// Join two segments that meet across a shared tile edge
    ///
    /// For cities and roads the shared edge stops being open on both sides.
    pub fn join_across_edge(&mut self, a: SegmentId, b: SegmentId) -> SegmentId {
        let root = self.union(a, b);
        let group = self.group_mut(root);
        if group.kind.closes_by_edges() {
            group.open_edges = group.open_edges.saturating_sub(2);
        }
        root
    }

    pub fn claim(&mut self, id: SegmentId, claim: Claim) {
        self.group_mut(id).claims.push(claim);
    }

    /// Mark a group settled and hand back the tokens standing on it
    pub fn settle(&mut self, id: SegmentId) -> Vec<Claim> {
        let group = self.group_mut(id);
        group.scored = true;
        std::mem::take(&mut group.claims)
    }

    /// Representatives of every group, in arena order
    pub fn roots(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, group)| group.is_some())
            .map(|(index, _)| SegmentId(index as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::side::Points;

    fn city(points: Points) -> Feature {
        Feature::city(points)
    }

    #[test]
    fn test_new_segment_counts_its_edges() {
        let mut graph = FeatureGraph::new();
        let id = graph.add_segment(
            Position::ORIGIN,
            0,
            &city(Points::TOP_EDGE | Points::LEFT_EDGE),
        );
        assert_eq!(graph.group(id).open_edges, 2);
        assert_eq!(graph.group(id).tile_count(), 1);
        assert!(!graph.group(id).is_closed());
    }

    #[test]
    fn test_join_across_edge_closes_two_tile_city() {
        let mut graph = FeatureGraph::new();
        let a = graph.add_segment(Position::ORIGIN, 0, &city(Points::TOP_EDGE));
        let b = graph.add_segment(Position::new(0, 1), 0, &city(Points::BOTTOM_EDGE));

        let root = graph.join_across_edge(a, b);
        assert_eq!(graph.find(a), root);
        assert_eq!(graph.find(b), root);
        assert!(graph.group(a).is_closed());
        assert_eq!(graph.group(b).tile_count(), 2);
        assert_eq!(graph.roots().count(), 1);
    }

    #[test]
    fn test_union_sums_shields_and_claims() {
        let mut graph = FeatureGraph::new();
        let a = graph.add_segment(Position::ORIGIN, 0, &Feature::city_with_shield(Points::ALL));
        let b = graph.add_segment(Position::new(1, 0), 0, &Feature::city_with_shield(Points::ALL));
        graph.claim(
            a,
            Claim {
                owner: 1,
                position: Position::ORIGIN,
            },
        );

        graph.join_across_edge(a, b);
        let group = graph.group(b);
        assert_eq!(group.shields, 2);
        assert_eq!(group.open_edges, 6);
        assert_eq!(group.claims.len(), 1);
    }

    #[test]
    fn test_joining_same_group_twice_still_closes_edge() {
        let mut graph = FeatureGraph::new();
        let a = graph.add_segment(Position::ORIGIN, 0, &Feature::road(Points::TOP | Points::RIGHT));
        let b = graph.add_segment(Position::new(0, 1), 0, &Feature::road(Points::BOTTOM | Points::RIGHT));
        graph.join_across_edge(a, b);
        assert_eq!(graph.group(a).open_edges, 2);

        // a loop reconnecting the same road
        graph.join_across_edge(b, a);
        assert_eq!(graph.group(a).open_edges, 0);
    }

    #[test]
    fn test_settle_returns_claims_once() {
        let mut graph = FeatureGraph::new();
        let a = graph.add_segment(Position::ORIGIN, 0, &Feature::monastery());
        graph.claim(
            a,
            Claim {
                owner: 0,
                position: Position::ORIGIN,
            },
        );
        assert_eq!(graph.settle(a).len(), 1);
        assert!(graph.settle(a).is_empty());
        assert!(graph.group(a).scored);
    }
}
