//! Crossroad detection, validation, and road splitting.
//!
//! [`resolve`] is a pure function over a *working* road set (the committed
//! roads plus the candidate): it never touches the store.  The caller
//! commits the returned road list and crossroad points atomically, or
//! discards everything on error — that split of responsibilities is what
//! makes road insertion transactional.
//!
//! # Validation rules
//!
//! For every crossing point `x` between two roads of the working set:
//!
//! - `x` at an endpoint of either road is already a shared vertex — no
//!   action.
//! - `x` with no committed point within the placement clearance is a new
//!   crossroad.
//! - `x` that *is* a known crossroad coordinate, with only crossroads
//!   nearby, is re-confirmed (crossroads are exempt from the proximity
//!   rejection at their own location).
//! - anything else is ambiguous: a new crossing cannot be silently merged
//!   into an unrelated nearby point, so the whole operation is rejected.
//!
//! Accepted crossings are recorded against **both** roads of the pair, and
//! each touched road is replaced by its sub-segments in a single pass.
//! Sub-segments need no re-resolution: they lie inside their parent, so
//! they cannot newly intersect anything the parent was not already checked
//! against.

use geo::{Line, Point};
use rstar::{PointDistance, RTree};
use rustc_hash::{FxHashMap, FxHashSet};

use rp_core::geom::{self, PointKey, SegmentCrossing};
use rp_core::PointId;

use crate::error::{NetworkError, NetworkResult};
use crate::network::{PointEntry, PointKind, PointRecord, Road, RoadIdGen};

// ── Read-only view of committed state ─────────────────────────────────────────

/// The slice of committed store state the resolver is allowed to see.
pub(crate) struct NetworkView<'a> {
    pub(crate) points: &'a [PointRecord],
    pub(crate) keys: &'a FxHashMap<PointKey, PointId>,
    pub(crate) spatial: &'a RTree<PointEntry>,
    /// Placement clearance: the "too close to an unrelated point" radius.
    pub(crate) clearance: f64,
    /// Minimum distance a crossroad must keep from roads it does not sit on.
    pub(crate) road_clearance: f64,
}

impl NetworkView<'_> {
    /// `true` if `p` is exactly a committed crossroad coordinate.
    fn is_crossroad_at(&self, p: Point<f64>) -> bool {
        self.keys
            .get(&PointKey::of(p))
            .is_some_and(|id| self.points[id.index()].kind == PointKind::Crossroad)
    }

    /// Committed points strictly closer than the clearance to `p`.
    fn nearby_points(&self, p: Point<f64>) -> Vec<&PointRecord> {
        let q = [p.x(), p.y()];
        let r2 = self.clearance * self.clearance;
        self.spatial
            .locate_within_distance(q, r2)
            .filter(|e| e.distance_2(&q) < r2)
            .map(|e| &self.points[e.id.index()])
            .collect()
    }
}

// ── Resolution result ─────────────────────────────────────────────────────────

/// Successful resolution: the full replacement road list and the
/// genuinely-new crossroad points (re-confirmed crossroads are split
/// targets but already exist in the arena).
#[derive(Debug)]
pub(crate) struct Resolution {
    pub(crate) roads: Vec<Road>,
    pub(crate) new_crossroads: Vec<Point<f64>>,
}

// ── Resolver ──────────────────────────────────────────────────────────────────

/// Detect and validate every road-road crossing in `working`, then split
/// the touched roads.
pub(crate) fn resolve(
    working: Vec<Road>,
    view: &NetworkView<'_>,
    ids: &mut RoadIdGen,
) -> NetworkResult<Resolution> {
    let mut cuts: Vec<Vec<Point<f64>>> = vec![Vec::new(); working.len()];
    let mut new_crossroads: Vec<Point<f64>> = Vec::new();
    let mut seen: FxHashSet<PointKey> = FxHashSet::default();

    for i in 0..working.len() {
        for j in (i + 1)..working.len() {
            let (ri, rj) = (&working[i], &working[j]);
            match geom::crossing(&ri.line, &rj.line) {
                SegmentCrossing::None => {}
                SegmentCrossing::Overlap => {
                    log::warn!("roads {} and {} overlap along a shared line", ri.id, rj.id);
                    return Err(NetworkError::DegenerateGeometry);
                }
                SegmentCrossing::At(x) => {
                    if is_endpoint(&ri.line, x) || is_endpoint(&rj.line, x) {
                        // Already a shared vertex.
                        continue;
                    }
                    vet_crossing(x, view)?;
                    // Crossroads accepted earlier in this same pass count as
                    // existing geometry too: two distinct crossings may not
                    // crowd each other below the clearance.
                    if new_crossroads
                        .iter()
                        .any(|&p| !geom::near(p, x) && geom::distance(p, x) < view.clearance)
                    {
                        return Err(NetworkError::TopologyConflict { x: x.x(), y: x.y() });
                    }
                    // The new vertex must also keep the point/road clearance
                    // from every road it does not sit on, or the committed
                    // state would hold a point pressed against a road.
                    if working.iter().enumerate().any(|(k, rk)| {
                        k != i
                            && k != j
                            && !is_endpoint(&rk.line, x)
                            && geom::distance_to_segment(x, &rk.line) < view.road_clearance
                    }) {
                        return Err(NetworkError::TopologyConflict { x: x.x(), y: x.y() });
                    }
                    log::debug!(
                        "crossroad at ({:.3}, {:.3}) between {} and {}",
                        x.x(),
                        x.y(),
                        ri.id,
                        rj.id
                    );
                    cuts[i].push(x);
                    cuts[j].push(x);
                    if !view.is_crossroad_at(x) && seen.insert(PointKey::of(x)) {
                        new_crossroads.push(x);
                    }
                }
            }
        }
    }

    let mut roads = Vec::with_capacity(working.len());
    for (road, cut) in working.into_iter().zip(cuts) {
        if cut.is_empty() {
            roads.push(road);
            continue;
        }
        let pieces = geom::split_segment(&road.line, &cut);
        if pieces.len() == 1 {
            // All cuts coincided with the road's own endpoints.
            roads.push(road);
            continue;
        }
        log::debug!("splitting {} into {} sub-segments", road.id, pieces.len());
        for line in pieces {
            roads.push(Road { id: ids.alloc(), line });
        }
    }

    Ok(Resolution { roads, new_crossroads })
}

/// Reject a crossing that would sit ambiguously near unrelated geometry.
fn vet_crossing(x: Point<f64>, view: &NetworkView<'_>) -> NetworkResult<()> {
    let nearby = view.nearby_points(x);
    if nearby.is_empty() {
        return Ok(());
    }
    if !view.is_crossroad_at(x) {
        // A new crossing near anything is ambiguous.
        return Err(NetworkError::TopologyConflict { x: x.x(), y: x.y() });
    }
    if nearby.iter().any(|r| r.kind != PointKind::Crossroad) {
        // A known crossroad crowded by a non-crossroad point.
        return Err(NetworkError::TopologyConflict { x: x.x(), y: x.y() });
    }
    Ok(())
}

fn is_endpoint(line: &Line<f64>, p: Point<f64>) -> bool {
    geom::near(p, line.start_point()) || geom::near(p, line.end_point())
}
