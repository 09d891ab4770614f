//! Engine-level error type, wrapping the subsystem errors.

use thiserror::Error;

use rp_network::NetworkError;
use rp_route::RouteError;

/// Everything the [`Planner`][crate::Planner] boundary can report.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("route error: {0}")]
    Route(#[from] RouteError),

    /// A query-point click landed too far from every road to snap.
    #[error("no road within reach of query point ({x:.3}, {y:.3})")]
    QueryPointOffRoad { x: f64, y: f64 },

    /// The second query point of a pair landed on top of the first.
    #[error("query point is too close to the previous one")]
    QueryPointTooClose,
}

pub type EngineResult<T> = Result<T, EngineError>;
