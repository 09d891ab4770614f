//! `rp-network` — transactional planar road-network store.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`network`]    | `RoadNetwork`, `Road`, `PointRecord`, `AddPointOutcome` |
//! | [`crossroads`] | crossing detection, validation, and road splitting      |
//! | [`error`]      | `NetworkError`, `NetworkResult<T>`                      |
//!
//! # Transaction model
//!
//! Every mutation enters through [`RoadNetwork::add_point`].  Points are
//! staged while a road is being drawn; the second endpoint triggers road
//! validation and crossroad resolution against a *copy* of the committed
//! road list.  Only a fully valid result is committed — any rejection
//! discards the entire in-progress build, leaving the committed state
//! untouched.  Between calls the network always satisfies its four
//! invariants (point spacing, point/road clearance, vertex-only crossings,
//! no duplicate roads).

pub mod crossroads;
pub mod error;
pub mod network;


pub use error::{NetworkError, NetworkResult};
pub use network::{AddPointOutcome, PointKind, PointRecord, Road, RoadNetwork};
