//! The `Planner` facade.
//!
//! A UI layer drives the whole engine through this one type: placement
//! clicks go to [`Planner::add_point`], measurement clicks go to
//! [`Planner::add_query_point`], and rendering reads the snapshot getters.
//! The planner owns the network, the router, and the ephemeral query-point
//! pair; it contains no topology logic of its own.
//!
//! Everything here is synchronous and single-threaded: mutating calls take
//! `&mut self`, queries never touch persistent state, and there is no
//! interior mutability anywhere in the engine.

use geo::Point;

use rp_core::{geom, NetworkConfig};
use rp_network::{AddPointOutcome, RoadNetwork};
use rp_route::{snap_to_network, DijkstraRouter, Route, Router};

use crate::error::{EngineError, EngineResult};

/// Minimum spacing between the two query points of a measurement pair.
/// Purely a UX guard against accidental double clicks.
const QUERY_POINT_MIN_GAP: f64 = 0.1;

/// Result of a query-point click.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryOutcome {
    /// First point of a pair placed (snapped onto a road).
    Placed(Point<f64>),
    /// Second point placed; the pair's shortest path.
    Path(Route),
}

/// Facade over the road network and router.
///
/// Generic over the [`Router`] so applications can swap the algorithm;
/// [`Planner::new`] wires up the default Dijkstra implementation.
pub struct Planner<R: Router = DijkstraRouter> {
    network: RoadNetwork,
    router: R,
    query_points: Vec<Point<f64>>,
}

impl Planner<DijkstraRouter> {
    /// Create a planner with the default Dijkstra router.
    pub fn new(config: NetworkConfig) -> EngineResult<Self> {
        Self::with_router(config, DijkstraRouter)
    }
}

impl<R: Router> Planner<R> {
    /// Create a planner with a custom router.
    pub fn with_router(config: NetworkConfig, router: R) -> EngineResult<Self> {
        Ok(Self {
            network: RoadNetwork::new(config)?,
            router,
            query_points: Vec::new(),
        })
    }

    // ── Placement ─────────────────────────────────────────────────────────

    /// Handle a placement click; see [`RoadNetwork::add_point`].
    pub fn add_point(&mut self, x: f64, y: f64) -> EngineResult<AddPointOutcome> {
        Ok(self.network.add_point(Point::new(x, y))?)
    }

    /// Abandon the in-progress road build.
    pub fn cancel_build(&mut self) {
        self.network.cancel_build();
    }

    // ── Query points ──────────────────────────────────────────────────────

    /// Handle a measurement click.
    ///
    /// The click snaps onto the nearest road within the configured snap
    /// distance.  The first click of a pair is stored; the second computes
    /// and returns the shortest path between the two; a click after a
    /// complete pair starts a fresh pair.  Query points are ephemeral —
    /// nothing here touches the persistent network.
    pub fn add_query_point(&mut self, x: f64, y: f64) -> EngineResult<QueryOutcome> {
        if self.query_points.len() == 2 {
            self.query_points.clear();
        }

        let click = Point::new(x, y);
        let snap_distance = self.network.config().query_snap_distance;
        let Some(snapped) = snap_to_network(self.network.roads(), click, snap_distance) else {
            log::warn!("query point ({x:.3}, {y:.3}) is not near any road");
            return Err(EngineError::QueryPointOffRoad { x, y });
        };

        if let &[first] = &self.query_points[..] {
            if geom::within(snapped, first, QUERY_POINT_MIN_GAP) {
                // Keep the first point; only this click is refused.
                return Err(EngineError::QueryPointTooClose);
            }
            self.query_points.push(snapped);
            let route = self.router.shortest_path(&self.network, first, snapped)?;
            log::info!(
                "shortest path over {} points, length {:.3}",
                route.points.len(),
                route.distance
            );
            return Ok(QueryOutcome::Path(route));
        }

        self.query_points.push(snapped);
        Ok(QueryOutcome::Placed(snapped))
    }

    /// Drop the current query-point pair.
    pub fn clear_query_points(&mut self) {
        self.query_points.clear();
    }

    /// Compute the shortest path between two raw coordinates, snapping
    /// each onto the network first.  Read-only; ignores the query-point
    /// pair state.
    pub fn shortest_path(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> EngineResult<Route> {
        let snap_distance = self.network.config().query_snap_distance;
        let from = snap_to_network(self.network.roads(), Point::new(x1, y1), snap_distance)
            .ok_or(EngineError::QueryPointOffRoad { x: x1, y: y1 })?;
        let to = snap_to_network(self.network.roads(), Point::new(x2, y2), snap_distance)
            .ok_or(EngineError::QueryPointOffRoad { x: x2, y: y2 })?;
        Ok(self.router.shortest_path(&self.network, from, to)?)
    }

    // ── Snapshots for rendering ───────────────────────────────────────────

    /// Road segments as endpoint pairs.
    pub fn roads(&self) -> Vec<(Point<f64>, Point<f64>)> {
        self.network
            .roads()
            .iter()
            .map(|r| (r.start(), r.end()))
            .collect()
    }

    /// All committed point positions.
    pub fn points(&self) -> Vec<Point<f64>> {
        self.network.points().collect()
    }

    /// Committed crossroad positions.
    pub fn crossroads(&self) -> Vec<Point<f64>> {
        self.network.crossroads().collect()
    }

    /// The current query-point pair (zero, one, or two points).
    pub fn query_points(&self) -> &[Point<f64>] {
        &self.query_points
    }

    /// Direct read access to the underlying network.
    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }
}
