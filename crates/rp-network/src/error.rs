//! Network-subsystem error type.

use thiserror::Error;

use rp_core::ConfigError;

/// Errors produced by `rp-network`.
///
/// All variants are recoverable: a failed mutation rolls the store back to
/// the previous valid state and the caller may simply try something else.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A point or road would sit too close to existing geometry, or a road
    /// build degenerated (zero length, non-finite input).
    #[error("placement at ({x:.3}, {y:.3}) conflicts with existing geometry")]
    Placement { x: f64, y: f64 },

    /// The candidate road has the same two endpoints as an existing road.
    #[error("road duplicates an existing road")]
    DuplicateRoad,

    /// A new crossing would land ambiguously near an unrelated point.
    #[error("crossing at ({x:.3}, {y:.3}) is ambiguously near an existing point")]
    TopologyConflict { x: f64, y: f64 },

    /// Two roads overlap along a shared line — not representable as a
    /// finite set of crossroads.
    #[error("roads overlap along a shared line")]
    DegenerateGeometry,
}

pub type NetworkResult<T> = Result<T, NetworkError>;
