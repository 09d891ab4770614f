//! citygrid — smallest runnable demo of the roadplan engine.
//!
//! Builds a street grid through the same click API a UI would drive, then
//! places two measurement points and prints the shortest path between
//! them.  Run with `RUST_LOG=debug` to watch crossroad resolution work.

mod network;

use anyhow::{bail, Result};

use rp_core::NetworkConfig;
use rp_engine::{Planner, QueryOutcome};

fn main() -> Result<()> {
    env_logger::init();

    let mut planner = Planner::new(NetworkConfig::default())?;
    network::build_grid(&mut planner)?;

    println!(
        "built {} road segments over {} points ({} crossroads)",
        planner.roads().len(),
        planner.points().len(),
        planner.crossroads().len(),
    );

    // Measurement clicks land *near* the avenues and snap onto them.
    planner.add_query_point(5.0, 0.1)?;
    let QueryOutcome::Path(route) = planner.add_query_point(5.0, 3.9)? else {
        bail!("second query point should complete the pair");
    };

    println!("shortest path: {:.3} units via", route.distance);
    for p in &route.points {
        println!("  ({:.2}, {:.2})", p.x(), p.y());
    }
    Ok(())
}
