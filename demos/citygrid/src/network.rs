//! Demo street grid definition.
//!
//! Two horizontal avenues crossed by two vertical streets — every crossing
//! becomes a crossroad and splits the roads involved — plus a spur that
//! reuses an existing endpoint via its hitbox.

use anyhow::Result;

use rp_engine::Planner;

/// Roads drawn click-pair by click-pair.
const ROADS: [((f64, f64), (f64, f64)); 5] = [
    ((0.0, 0.0), (10.0, 0.0)),  // south avenue
    ((0.0, 4.0), (10.0, 4.0)),  // north avenue
    ((2.0, -2.0), (2.0, 6.0)),  // west street, crosses both avenues
    ((7.0, -2.0), (7.0, 6.0)),  // east street, crosses both avenues
    ((10.0, 0.0), (12.0, 2.0)), // spur, starting from an existing corner
];

/// Build the grid through the planner's click API.
pub fn build_grid(planner: &mut Planner) -> Result<()> {
    for (a, b) in ROADS {
        planner.add_point(a.0, a.1)?;
        let outcome = planner.add_point(b.0, b.1)?;
        for crossroad in &outcome.new_crossroads {
            log::info!(
                "new crossroad at ({:.1}, {:.1})",
                crossroad.x(),
                crossroad.y()
            );
        }
    }
    Ok(())
}
