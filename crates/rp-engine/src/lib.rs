//! `rp-engine` — the boundary API of the roadplan engine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                          |
//! |-------------|---------------------------------------------------|
//! | [`planner`] | `Planner`, `QueryOutcome`                         |
//! | [`error`]   | `EngineError`, `EngineResult<T>`                  |
//!
//! # Quick-start
//!
//! ```
//! use rp_core::NetworkConfig;
//! use rp_engine::{Planner, QueryOutcome};
//!
//! let mut planner = Planner::new(NetworkConfig::default())?;
//!
//! // Two clicks draw a road.
//! planner.add_point(0.0, 0.0)?;
//! planner.add_point(3.0, 4.0)?;
//!
//! // Two measurement clicks return the shortest path between them.
//! planner.add_query_point(0.0, 0.0)?;
//! let QueryOutcome::Path(route) = planner.add_query_point(3.0, 4.0)? else {
//!     unreachable!("second query point completes the pair");
//! };
//! assert!((route.distance - 5.0).abs() < 1e-9);
//! # Ok::<(), rp_engine::EngineError>(())
//! ```

pub mod error;
pub mod planner;


pub use error::{EngineError, EngineResult};
pub use planner::{Planner, QueryOutcome};
