//! Route-subsystem error type.

use thiserror::Error;

/// Errors produced by `rp-route`.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The two query points are not reachable from each other (or one of
    /// them is not on any road).
    #[error("no road connection between ({x1:.3}, {y1:.3}) and ({x2:.3}, {y2:.3})")]
    NotConnected { x1: f64, y1: f64, x2: f64, y2: f64 },

    /// The destination vanished from the route graph after a positive
    /// connectivity check.  Defensive — indicates a bug, not bad input.
    #[error("route graph lost the destination after a positive connectivity check")]
    Inconsistent,
}

pub type RouteResult<T> = Result<T, RouteError>;
