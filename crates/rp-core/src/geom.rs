//! Planar geometry helpers over the `geo` primitives.
//!
//! Everything here is a thin wrapper: the heavy lifting (segment
//! intersection, closest-point projection, Euclidean distances) is done by
//! the `geo` crate.  What this module adds is the engine's notion of
//! *identity* — two tolerances that must never be confused:
//!
//! - [`GEOM_EPSILON`] decides whether two coordinates are *the same
//!   location* (point identity, on-segment tests).
//! - The much larger UX tolerances (`NetworkConfig`) decide whether a
//!   coordinate is *close enough* to snap or to be rejected.  Those never
//!   appear in this module's near-equality helpers.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Closest, ClosestPoint, Coord, EuclideanDistance, EuclideanLength, Line, Point, Rect};

/// Near-equality tolerance for coordinate identity and on-segment tests.
///
/// Coordinates produced by intersection and projection carry float noise,
/// so exact equality is never used for geometric identity.
pub const GEOM_EPSILON: f64 = 1e-8;

/// Quantization grid for [`PointKey`]: 1e-9 units per cell, comfortably
/// finer than `GEOM_EPSILON` and still exact for coordinates below ~1e6.
const KEY_SCALE: f64 = 1e9;

// ── Point predicates ──────────────────────────────────────────────────────────

/// `true` if `a` and `b` are the same location (within [`GEOM_EPSILON`]).
#[inline]
pub fn near(a: Point<f64>, b: Point<f64>) -> bool {
    a.euclidean_distance(&b) <= GEOM_EPSILON
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point<f64>, b: Point<f64>) -> f64 {
    a.euclidean_distance(&b)
}

/// `true` if `a` and `b` are within `d` of each other (inclusive).
#[inline]
pub fn within(a: Point<f64>, b: Point<f64>, d: f64) -> bool {
    a.euclidean_distance(&b) <= d
}

/// `true` if `p` lies on `seg` (within [`GEOM_EPSILON`]).
#[inline]
pub fn on_segment(p: Point<f64>, seg: &Line<f64>) -> bool {
    p.euclidean_distance(seg) <= GEOM_EPSILON
}

/// `true` if both coordinates are finite (rejects NaN and ±inf input).
#[inline]
pub fn is_finite_point(p: Point<f64>) -> bool {
    p.x().is_finite() && p.y().is_finite()
}

// ── Segment helpers ───────────────────────────────────────────────────────────

/// Euclidean length of a segment.
#[inline]
pub fn segment_length(seg: &Line<f64>) -> f64 {
    seg.euclidean_length()
}

/// Distance from `p` to the nearest location on `seg`.
#[inline]
pub fn distance_to_segment(p: Point<f64>, seg: &Line<f64>) -> f64 {
    p.euclidean_distance(seg)
}

/// Closest-point projection of `p` onto `seg`.
///
/// A zero-length segment is its own nearest point.
pub fn nearest_on_segment(p: Point<f64>, seg: &Line<f64>) -> Point<f64> {
    match seg.closest_point(&p) {
        Closest::Intersection(q) | Closest::SinglePoint(q) => q,
        Closest::Indeterminate => seg.start_point(),
    }
}

/// Normalized position of `p`'s projection along `seg`, clamped to `[0, 1]`.
///
/// Used to order split points along a road; `p` is expected to be on or
/// near the segment.
pub fn segment_fraction(seg: &Line<f64>, p: Point<f64>) -> f64 {
    let dx = seg.end.x - seg.start.x;
    let dy = seg.end.y - seg.start.y;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return 0.0;
    }
    let t = ((p.x() - seg.start.x) * dx + (p.y() - seg.start.y) * dy) / len2;
    t.clamp(0.0, 1.0)
}

// ── Segment crossing ──────────────────────────────────────────────────────────

/// Classification of how two segments meet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SegmentCrossing {
    /// The segments do not touch.
    None,
    /// The segments meet in exactly one location (a proper crossing or an
    /// endpoint touch, collinear or not).
    At(Point<f64>),
    /// The segments are collinear and share a positive-length stretch.
    /// Unsupported topology — callers must reject the operation.
    Overlap,
}

/// Compute how segments `a` and `b` meet.
///
/// A collinear "overlap" whose ends coincide is really a single shared
/// location and is normalized to [`SegmentCrossing::At`].
pub fn crossing(a: &Line<f64>, b: &Line<f64>) -> SegmentCrossing {
    match line_intersection(*a, *b) {
        None => SegmentCrossing::None,
        Some(LineIntersection::SinglePoint { intersection, .. }) => {
            SegmentCrossing::At(intersection.into())
        }
        Some(LineIntersection::Collinear { intersection }) => {
            let (s, e) = (intersection.start_point(), intersection.end_point());
            if near(s, e) {
                SegmentCrossing::At(s)
            } else {
                SegmentCrossing::Overlap
            }
        }
    }
}

// ── Segment splitting ─────────────────────────────────────────────────────────

/// Split `seg` at every interior point in `cuts`, returning the pieces in
/// order from `seg.start` to `seg.end`.
///
/// Cuts that coincide with an endpoint or with each other are dropped, so a
/// cut list that turns out to be empty returns the segment unchanged.
/// Zero-length pieces are never emitted.  The sum of piece lengths equals
/// the original length (up to float rounding).
pub fn split_segment(seg: &Line<f64>, cuts: &[Point<f64>]) -> Vec<Line<f64>> {
    let mut interior: Vec<Point<f64>> = Vec::new();
    for &p in cuts {
        if near(p, seg.start_point()) || near(p, seg.end_point()) {
            continue;
        }
        if interior.iter().any(|&q| near(p, q)) {
            continue;
        }
        interior.push(p);
    }
    interior.sort_by(|a, b| segment_fraction(seg, *a).total_cmp(&segment_fraction(seg, *b)));

    let mut pieces = Vec::with_capacity(interior.len() + 1);
    let mut cursor = seg.start_point();
    for p in interior.into_iter().chain(std::iter::once(seg.end_point())) {
        if !near(cursor, p) {
            pieces.push(Line::new(cursor, p));
        }
        cursor = p;
    }
    if pieces.is_empty() {
        // Degenerate zero-length input; hand it back rather than vanish it.
        pieces.push(*seg);
    }
    pieces
}

// ── Quantized coordinate key ──────────────────────────────────────────────────

/// A quantized coordinate key, usable as a hash-map key where raw float
/// equality would be fragile.
///
/// Identical coordinates always produce identical keys, and sub-grid float
/// noise collapses.  Coordinates that are merely *near* each other may
/// still key differently, so callers canonicalize first (copy the exact
/// value of the shared vertex) — which is what the road store and the
/// route graph both do.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct PointKey(i64, i64);

impl PointKey {
    pub fn of(p: Point<f64>) -> Self {
        PointKey(
            (p.x() * KEY_SCALE).round() as i64,
            (p.y() * KEY_SCALE).round() as i64,
        )
    }
}

// ── Hitboxes ──────────────────────────────────────────────────────────────────

/// Axis-aligned click-tolerance region around a point.
///
/// Hitboxes exist purely so a user can click *near* a point and mean that
/// point; they play no part in topology validation.
pub fn hitbox(center: Point<f64>, half: f64) -> Rect<f64> {
    Rect::new(
        Coord { x: center.x() - half, y: center.y() - half },
        Coord { x: center.x() + half, y: center.y() + half },
    )
}

/// Boundary-inclusive containment test for a hitbox.
#[inline]
pub fn hitbox_contains(rect: &Rect<f64>, p: Point<f64>) -> bool {
    let (min, max) = (rect.min(), rect.max());
    p.x() >= min.x && p.x() <= max.x && p.y() >= min.y && p.y() <= max.y
}
