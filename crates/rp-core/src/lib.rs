//! `rp-core` — foundational types for the roadplan road-network engine.
//!
//! This crate is a dependency of every other `rp-*` crate.  It intentionally
//! has no `rp-*` dependencies and minimal external ones (only `geo` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`geom`]   | epsilon helpers, segment crossing/splitting, `PointKey`   |
//! | [`ids`]    | `PointId`, `RoadId`                                       |
//! | [`config`] | `NetworkConfig` (UI-supplied tolerances), `ConfigError`   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.          |

pub mod config;
pub mod geom;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ConfigError, NetworkConfig};
pub use geom::{PointKey, SegmentCrossing, GEOM_EPSILON};
pub use ids::{PointId, RoadId};
