//! The road-network store and its transactional insertion flow.
//!
//! # Data layout
//!
//! Points live in an arena `Vec<PointRecord>` indexed by `PointId`, with
//! two sidecar indexes kept in lockstep:
//!
//! - a quantized-key registry (`PointKey → PointId`) for "is this exact
//!   coordinate a known point" lookups, and
//! - an R-tree (via `rstar`) whose entry envelopes *are* the points'
//!   click hitboxes, so both hitbox resolution and clearance queries are
//!   spatial-index walks rather than linear scans.
//!
//! Roads own their endpoint coordinates by copy; `RoadId` is object
//! identity only (splitting retires an ID and mints fresh ones).
//!
//! # Commit discipline
//!
//! Only [`RoadNetwork::add_point`] mutates the store, and it stages
//! everything first: new points sit in the pending build, and road
//! resolution runs over a copy of the committed road list.  The commit at
//! the end of a successful `add_road` is the single place persistent state
//! changes; every rejection path calls `cancel_build` instead.

use geo::{Line, Point};
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use rp_core::geom::{self, PointKey};
use rp_core::{NetworkConfig, PointId, RoadId};

use crate::crossroads::{self, NetworkView, Resolution};
use crate::error::{NetworkError, NetworkResult};

// ── R-tree point entry ────────────────────────────────────────────────────────

/// Entry stored in the point R-tree.  The envelope is the point's hitbox,
/// so an envelope-containment query *is* a hitbox test; distance queries
/// still measure from the point center.
#[derive(Clone)]
pub(crate) struct PointEntry {
    pub(crate) id: PointId,
    pub(crate) pos: [f64; 2],
    pub(crate) half: f64,
}

impl RTreeObject for PointEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.pos[0] - self.half, self.pos[1] - self.half],
            [self.pos[0] + self.half, self.pos[1] + self.half],
        )
    }
}

impl PointDistance for PointEntry {
    /// Squared Euclidean distance from the point center (not the hitbox).
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.pos[0] - point[0];
        let dy = self.pos[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Core records ──────────────────────────────────────────────────────────────

/// How a point came to exist.  The tag is load-bearing: crossroads are
/// exempt from the "new crossing too close to an existing point" rejection
/// when the same location is crossed again.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointKind {
    /// Placed by a user click.
    Placed,
    /// Created where two roads cross.
    Crossroad,
}

/// A committed point.  Never mutated after creation.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointRecord {
    pub pos: Point<f64>,
    pub kind: PointKind,
}

/// A straight road segment.  Endpoints are owned coordinate copies;
/// geometric identity is coordinate-based, `id` is bookkeeping identity.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Road {
    pub id: RoadId,
    pub line: Line<f64>,
}

impl Road {
    #[inline]
    pub fn start(&self) -> Point<f64> {
        self.line.start_point()
    }

    #[inline]
    pub fn end(&self) -> Point<f64> {
        self.line.end_point()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        geom::segment_length(&self.line)
    }

    /// `true` if this road runs between `a` and `b`, in either direction.
    pub fn joins(&self, a: Point<f64>, b: Point<f64>) -> bool {
        (geom::near(self.start(), a) && geom::near(self.end(), b))
            || (geom::near(self.start(), b) && geom::near(self.end(), a))
    }
}

/// Mints road IDs.  IDs are never reused, even for roads that fail to
/// commit.
pub(crate) struct RoadIdGen {
    next: u32,
}

impl RoadIdGen {
    pub(crate) fn new() -> Self {
        Self { next: 0 }
    }

    pub(crate) fn alloc(&mut self) -> RoadId {
        let id = RoadId(self.next);
        self.next += 1;
        id
    }
}

// ── Pending build state ───────────────────────────────────────────────────────

/// The road currently being drawn: up to two selected endpoints, plus the
/// subset of them that are brand-new points awaiting commit.
#[derive(Default)]
struct RoadBuild {
    /// New points staged by this build (not yet in the arena).
    staged: Vec<Point<f64>>,
    /// Selected endpoints, existing or staged, in click order.
    endpoints: Vec<Point<f64>>,
}

impl RoadBuild {
    fn clear(&mut self) {
        self.staged.clear();
        self.endpoints.clear();
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Result of a successful [`RoadNetwork::add_point`] call.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddPointOutcome {
    /// The resolved point (the click position, or the existing point the
    /// click snapped to).
    pub point: Point<f64>,

    /// `true` if the click resolved to an existing or staged point via its
    /// hitbox instead of creating a new one.
    pub used_existing: bool,

    /// The road committed by this click, if it was the second endpoint.
    /// This is the road *as drawn*; crossroad resolution may have stored it
    /// as several sub-segments.
    pub road: Option<Road>,

    /// Crossroads created while committing `road`.
    pub new_crossroads: Vec<Point<f64>>,
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// The persistent planar road network.
///
/// See the module docs for the data layout and the commit discipline.
pub struct RoadNetwork {
    config: NetworkConfig,
    points: Vec<PointRecord>,
    point_keys: FxHashMap<PointKey, PointId>,
    spatial: RTree<PointEntry>,
    roads: Vec<Road>,
    road_ids: RoadIdGen,
    build: RoadBuild,
}

impl RoadNetwork {
    /// Create an empty network.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Config`] if any tolerance in `config` is
    /// non-finite or non-positive.
    pub fn new(config: NetworkConfig) -> NetworkResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            points: Vec::new(),
            point_keys: FxHashMap::default(),
            spatial: RTree::new(),
            roads: Vec::new(),
            road_ids: RoadIdGen::new(),
            build: RoadBuild::default(),
        })
    }

    // ── Snapshots ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// All committed points, crossroads included.
    pub fn point_records(&self) -> &[PointRecord] {
        &self.points
    }

    /// Committed point positions.
    pub fn points(&self) -> impl Iterator<Item = Point<f64>> + '_ {
        self.points.iter().map(|r| r.pos)
    }

    /// Committed crossroad positions.
    pub fn crossroads(&self) -> impl Iterator<Item = Point<f64>> + '_ {
        self.points
            .iter()
            .filter(|r| r.kind == PointKind::Crossroad)
            .map(|r| r.pos)
    }

    /// Committed roads.
    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn crossroad_count(&self) -> usize {
        self.points
            .iter()
            .filter(|r| r.kind == PointKind::Crossroad)
            .count()
    }

    /// `true` while a road build has at least one selected endpoint.
    pub fn build_in_progress(&self) -> bool {
        !self.build.endpoints.is_empty()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Abandon the in-progress road build, discarding its staged points.
    pub fn cancel_build(&mut self) {
        if self.build_in_progress() {
            log::debug!("cancelling road build ({} staged points)", self.build.staged.len());
        }
        self.build.clear();
    }

    /// Handle one placement click.
    ///
    /// The click either resolves to an existing point (hitbox reuse), or
    /// stages a new point after clearance validation.  The second endpoint
    /// of a build triggers road creation, crossroad resolution and the
    /// commit.  Any rejection discards the *whole* in-progress build, not
    /// just this click.
    pub fn add_point(&mut self, pos: Point<f64>) -> NetworkResult<AddPointOutcome> {
        if !geom::is_finite_point(pos) {
            log::warn!("rejecting non-finite point input");
            self.build.clear();
            return Err(NetworkError::Placement { x: pos.x(), y: pos.y() });
        }

        if let Some(hit) = self.resolve_click(pos) {
            if self.build.endpoints.len() == 1 && geom::near(hit, self.build.endpoints[0]) {
                // Both endpoints would be the same point: a zero-length road.
                log::warn!("road build cancelled: both endpoints resolve to the same point");
                self.build.clear();
                return Err(NetworkError::Placement { x: pos.x(), y: pos.y() });
            }
            self.build.endpoints.push(hit);
            return self.finish_click(hit, true);
        }

        if self.placement_blocked(pos) {
            log::warn!("invalid placement at ({:.3}, {:.3}); road build cancelled", pos.x(), pos.y());
            self.build.clear();
            return Err(NetworkError::Placement { x: pos.x(), y: pos.y() });
        }

        self.build.staged.push(pos);
        self.build.endpoints.push(pos);
        self.finish_click(pos, false)
    }

    // ── Click resolution and validation ───────────────────────────────────

    /// Resolve a click to an existing point whose hitbox contains it.
    ///
    /// Committed points win over staged ones; among several overlapping
    /// hitboxes the nearest point center wins.
    fn resolve_click(&self, pos: Point<f64>) -> Option<Point<f64>> {
        let q = [pos.x(), pos.y()];
        let committed = self
            .spatial
            .locate_in_envelope_intersecting(&AABB::from_point(q))
            .min_by(|a, b| a.distance_2(&q).total_cmp(&b.distance_2(&q)))
            .map(|e| self.points[e.id.index()].pos);
        if committed.is_some() {
            return committed;
        }
        let half = self.config.hitbox_half_size;
        self.build
            .staged
            .iter()
            .copied()
            .find(|&s| geom::hitbox_contains(&geom::hitbox(s, half), pos))
    }

    /// `true` if a new point at `pos` would violate placement clearance
    /// against committed points, staged points, or committed roads.
    ///
    /// "Closer than" is strict: a point at exactly the clearance distance
    /// is allowed.
    fn placement_blocked(&self, pos: Point<f64>) -> bool {
        let r = self.config.placement_clearance;
        let q = [pos.x(), pos.y()];
        if self
            .spatial
            .locate_within_distance(q, r * r)
            .any(|e| e.distance_2(&q) < r * r)
        {
            return true;
        }
        if self.build.staged.iter().any(|&s| geom::distance(pos, s) < r) {
            return true;
        }
        self.roads
            .iter()
            .any(|road| geom::distance_to_segment(pos, &road.line) < r)
    }

    /// Complete a click: either report the staged/selected point, or — on
    /// the second endpoint — run the road through validation and commit.
    fn finish_click(&mut self, point: Point<f64>, used_existing: bool) -> NetworkResult<AddPointOutcome> {
        if self.build.endpoints.len() < 2 {
            return Ok(AddPointOutcome {
                point,
                used_existing,
                road: None,
                new_crossroads: Vec::new(),
            });
        }
        let a = self.build.endpoints[0];
        let b = self.build.endpoints[1];
        let (road, new_crossroads) = self.add_road(a, b)?;
        Ok(AddPointOutcome {
            point,
            used_existing,
            road: Some(road),
            new_crossroads,
        })
    }

    // ── Road creation ─────────────────────────────────────────────────────

    /// Validate and commit the candidate road from `a` to `b`.
    ///
    /// Runs the duplicate and clearance checks, then crossroad resolution
    /// over a copy of the committed road list.  On success the staged
    /// points, any new crossroads and the resolved road list are committed
    /// together; on failure everything pending is discarded.
    fn add_road(&mut self, a: Point<f64>, b: Point<f64>) -> NetworkResult<(Road, Vec<Point<f64>>)> {
        let candidate = Line::new(a, b);

        if self.roads.iter().any(|r| r.joins(a, b)) {
            log::warn!("rejecting duplicate road");
            self.build.clear();
            return Err(NetworkError::DuplicateRoad);
        }

        // No committed point other than the endpoints may sit within the
        // road clearance of the new segment.
        for rec in &self.points {
            if geom::near(rec.pos, a) || geom::near(rec.pos, b) {
                continue;
            }
            if geom::distance_to_segment(rec.pos, &candidate) < self.config.road_clearance {
                log::warn!(
                    "rejecting road: existing point ({:.3}, {:.3}) is too close",
                    rec.pos.x(),
                    rec.pos.y()
                );
                self.build.clear();
                return Err(NetworkError::Placement { x: rec.pos.x(), y: rec.pos.y() });
            }
        }

        let candidate_id = self.road_ids.alloc();
        let mut working = self.roads.clone();
        working.push(Road { id: candidate_id, line: candidate });

        let view = NetworkView {
            points: &self.points,
            keys: &self.point_keys,
            spatial: &self.spatial,
            clearance: self.config.placement_clearance,
            road_clearance: self.config.road_clearance,
        };
        let Resolution { roads, new_crossroads } =
            match crossroads::resolve(working, &view, &mut self.road_ids) {
                Ok(resolution) => resolution,
                Err(err) => {
                    log::warn!("road rejected during crossroad resolution: {err}");
                    self.build.clear();
                    return Err(err);
                }
            };

        // Commit point — the only place persistent state changes.
        let staged = std::mem::take(&mut self.build.staged);
        for p in staged {
            self.insert_point(p, PointKind::Placed);
        }
        for &x in &new_crossroads {
            self.insert_point(x, PointKind::Crossroad);
        }
        self.roads = roads;
        self.build.clear();

        log::info!(
            "committed road ({:.3}, {:.3})-({:.3}, {:.3}); {} roads, {} points total",
            a.x(),
            a.y(),
            b.x(),
            b.y(),
            self.roads.len(),
            self.points.len()
        );
        Ok((Road { id: candidate_id, line: candidate }, new_crossroads))
    }

    fn insert_point(&mut self, pos: Point<f64>, kind: PointKind) {
        let id = PointId(self.points.len() as u32);
        self.point_keys.insert(PointKey::of(pos), id);
        self.spatial.insert(PointEntry {
            id,
            pos: [pos.x(), pos.y()],
            half: self.config.hitbox_half_size,
        });
        self.points.push(PointRecord { pos, kind });
    }
}
