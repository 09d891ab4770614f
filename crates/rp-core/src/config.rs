//! Engine configuration.
//!
//! All four distances are supplied by the embedding application (they are
//! UX policy, not geometry), with defaults matching the reference tuning.
//! Note the deliberate separation: `hitbox_half_size` and
//! `query_snap_distance` control *click interpretation*, while
//! `placement_clearance` and `road_clearance` control *topology validity*.

use thiserror::Error;

/// Configuration error: a tolerance that cannot work.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive, finite distance (got {value})")]
    InvalidDistance { field: &'static str, value: f64 },
}

/// Distance tolerances governing placement validation and click handling.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkConfig {
    /// Minimum distance between a newly placed point and any existing
    /// point or road.  Violations reject the whole in-progress road build.
    pub placement_clearance: f64,

    /// Minimum distance between any road and a point that is not one of
    /// its own endpoints.
    pub road_clearance: f64,

    /// Half-extent of the axis-aligned hitbox around each point.  A click
    /// inside a hitbox reuses that point instead of creating a new one.
    pub hitbox_half_size: f64,

    /// Maximum distance from a click to a road for a shortest-path query
    /// point to snap onto that road.
    pub query_snap_distance: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            placement_clearance: 0.5,
            road_clearance: 0.2,
            hitbox_half_size: 0.3,
            query_snap_distance: 0.2,
        }
    }
}

impl NetworkConfig {
    /// Check that every tolerance is a positive, finite distance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("placement_clearance", self.placement_clearance),
            ("road_clearance", self.road_clearance),
            ("hitbox_half_size", self.hitbox_half_size),
            ("query_snap_distance", self.query_snap_distance),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDistance { field, value });
            }
        }
        Ok(())
    }
}
