//! Routing trait and the default Dijkstra implementation.
//!
//! # Query-point insertion
//!
//! A query point may fall anywhere along a road, so before running
//! Dijkstra the roads carrying the two query points are split *in a
//! private copy* of the road list.  A point at an existing vertex needs no
//! split — the vertex is reused.  Both query points on the same road split
//! it once at both locations, order-independently.
//!
//! # Pluggability
//!
//! Callers route via the [`Router`] trait, so an application can swap in a
//! different algorithm (A*, contraction hierarchies) without touching the
//! network store.  [`DijkstraRouter`] is the default and is entirely
//! sufficient at interactive network sizes.

use geo::{Line, Point};

use rp_core::geom;
use rp_network::{Road, RoadNetwork};

use crate::connectivity::{self, segment_containing};
use crate::error::{RouteError, RouteResult};
use crate::graph::CostGraph;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the ordered coordinates of the path from
/// source to destination (inclusive) and its total length.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub points: Vec<Point<f64>>,
    pub distance: f64,
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine over a road network snapshot.
pub trait Router {
    /// Compute the shortest path between two on-road points.
    ///
    /// `from` and `to` must already lie on the network (use
    /// [`snap_to_network`] for raw click coordinates).
    fn shortest_path(
        &self,
        network: &RoadNetwork,
        from: Point<f64>,
        to: Point<f64>,
    ) -> RouteResult<Route>;
}

/// Standard Dijkstra over the per-query cost graph.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn shortest_path(
        &self,
        network: &RoadNetwork,
        from: Point<f64>,
        to: Point<f64>,
    ) -> RouteResult<Route> {
        route(network, from, to)
    }
}

// ── Snapping ──────────────────────────────────────────────────────────────────

/// Project `p` onto the nearest road within `max_distance` (inclusive).
///
/// Returns `None` when no road is close enough.  This is the only place a
/// raw click coordinate becomes an on-road query point.
pub fn snap_to_network(roads: &[Road], p: Point<f64>, max_distance: f64) -> Option<Point<f64>> {
    let nearest = roads.iter().min_by(|a, b| {
        geom::distance_to_segment(p, &a.line).total_cmp(&geom::distance_to_segment(p, &b.line))
    })?;
    if geom::distance_to_segment(p, &nearest.line) > max_distance {
        return None;
    }
    Some(geom::nearest_on_segment(p, &nearest.line))
}

// ── Routing internals ─────────────────────────────────────────────────────────

fn route(network: &RoadNetwork, from: Point<f64>, to: Point<f64>) -> RouteResult<Route> {
    let roads = network.roads();
    if !connectivity::connected(roads, from, to) {
        return Err(RouteError::NotConnected {
            x1: from.x(),
            y1: from.y(),
            x2: to.x(),
            y2: to.y(),
        });
    }

    // Private copy: the persistent network is never mutated by a query.
    let mut lines: Vec<Line<f64>> = roads.iter().map(|r| r.line).collect();

    // connected() proved both points are on some road.
    let i_from = segment_containing(&lines, from).ok_or(RouteError::Inconsistent)?;
    let i_to = segment_containing(&lines, to).ok_or(RouteError::Inconsistent)?;

    // A query point at an existing vertex reuses it exactly; an interior
    // one becomes a vertex by splitting its road in the copy.
    let from = anchor(&lines[i_from], from);
    let to = anchor(&lines[i_to], to);

    if geom::near(from, to) {
        return Ok(Route { points: vec![from], distance: 0.0 });
    }

    if i_from == i_to {
        let pieces = geom::split_segment(&lines[i_from], &[from, to]);
        lines.splice(i_from..=i_from, pieces);
    } else {
        // Replace the higher index first so the lower one stays valid.
        let (hi, hi_cut, lo, lo_cut) = if i_from > i_to {
            (i_from, from, i_to, to)
        } else {
            (i_to, to, i_from, from)
        };
        let pieces = geom::split_segment(&lines[hi], &[hi_cut]);
        lines.splice(hi..=hi, pieces);
        let pieces = geom::split_segment(&lines[lo], &[lo_cut]);
        lines.splice(lo..=lo, pieces);
    }

    let mut graph = CostGraph::new();
    for line in &lines {
        let a = graph.node(line.start_point());
        let b = graph.node(line.end_point());
        if a == b {
            // Zero-length segment; nothing to traverse.
            continue;
        }
        graph.connect(a, b, geom::segment_length(line));
    }
    log::debug!(
        "route graph: {} nodes over {} segments",
        graph.node_count(),
        lines.len()
    );

    let (Some(start), Some(goal)) = (graph.lookup(from), graph.lookup(to)) else {
        return Err(RouteError::Inconsistent);
    };
    let Some((path, distance)) = graph.shortest_path(start, goal) else {
        // connected() said reachable; the graph must agree.
        return Err(RouteError::Inconsistent);
    };

    Ok(Route {
        points: path.into_iter().map(|n| graph.position(n)).collect(),
        distance,
    })
}

/// Snap `p` to an exact endpoint of `line` when it is near one, so vertex
/// queries key into the graph identically to the vertex itself.
fn anchor(line: &Line<f64>, p: Point<f64>) -> Point<f64> {
    if geom::near(p, line.start_point()) {
        line.start_point()
    } else if geom::near(p, line.end_point()) {
        line.end_point()
    } else {
        p
    }
}
