//! Road-level connectivity.
//!
//! Nodes of the relation are roads, not points: two roads are adjacent
//! when they geometrically touch or share a coordinate.  On a valid
//! network every contact is a shared vertex, but the crossing test is kept
//! alongside the coordinate test so reachability degrades gracefully on
//! geometry that is touching within float noise rather than exactly.
//!
//! Traversal is an explicit-stack DFS — reachability must not be bounded
//! by call-stack depth on large networks.

use geo::{Line, Point};

use rp_core::geom::{self, SegmentCrossing};
use rp_network::Road;

/// Undirected adjacency between the roads of one network snapshot,
/// indexed by position in the originating slice.
pub struct RoadAdjacency {
    adj: Vec<Vec<usize>>,
}

impl RoadAdjacency {
    /// Build the O(R²) pairwise adjacency for `roads`.
    pub fn build(roads: &[Road]) -> Self {
        let mut adj = vec![Vec::new(); roads.len()];
        for i in 0..roads.len() {
            for j in (i + 1)..roads.len() {
                if touches(&roads[i], &roads[j]) {
                    adj[i].push(j);
                    adj[j].push(i);
                }
            }
        }
        Self { adj }
    }

    /// Roads reachable from `start`, as a flag per road index.
    pub fn reachable(&self, start: usize) -> Vec<bool> {
        let mut visited = vec![false; self.adj.len()];
        let mut stack = vec![start];
        while let Some(i) = stack.pop() {
            if visited[i] {
                continue;
            }
            visited[i] = true;
            for &next in &self.adj[i] {
                if !visited[next] {
                    stack.push(next);
                }
            }
        }
        visited
    }
}

fn touches(a: &Road, b: &Road) -> bool {
    if !matches!(geom::crossing(&a.line, &b.line), SegmentCrossing::None) {
        return true;
    }
    shares_coord(&a.line, &b.line)
}

fn shares_coord(a: &Line<f64>, b: &Line<f64>) -> bool {
    let (a0, a1) = (a.start_point(), a.end_point());
    let (b0, b1) = (b.start_point(), b.end_point());
    geom::near(a0, b0) || geom::near(a0, b1) || geom::near(a1, b0) || geom::near(a1, b1)
}

/// Index of the first road containing `p` (within the tight geometric
/// epsilon, not any UX snap tolerance).
pub fn road_containing(roads: &[Road], p: Point<f64>) -> Option<usize> {
    roads.iter().position(|r| geom::on_segment(p, &r.line))
}

/// Index of the first segment containing `p`, over bare lines.
pub(crate) fn segment_containing(lines: &[Line<f64>], p: Point<f64>) -> Option<usize> {
    lines.iter().position(|l| geom::on_segment(p, l))
}

/// `true` if `p1` and `p2` lie on roads reachable from each other.
///
/// A point that is not on any road makes the query trivially false.
pub fn connected(roads: &[Road], p1: Point<f64>, p2: Point<f64>) -> bool {
    let Some(start) = road_containing(roads, p1) else {
        return false;
    };
    let reachable = RoadAdjacency::build(roads).reachable(start);
    roads
        .iter()
        .enumerate()
        .any(|(i, r)| reachable[i] && geom::on_segment(p2, &r.line))
}
