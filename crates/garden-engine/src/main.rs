//! # Garden Engine
//!
//! Headless entry point for Time Gardener.
//!
//! Usage: `garden [config.toml]`. The run replays the configured input script
//! (or the built-in demo), then idles until the tick budget is spent.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::{Context, Result};
use garden_engine::{EngineConfig, Runner, Script};
use garden_gameplay::Simulation;
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("garden=info".parse()?))
        .init();

    info!("Time Gardener starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = std::env::args()
        .nth(1)
        .map_or_else(EngineConfig::load, EngineConfig::load_from);
    config.validate();

    let script = match &config.script_path {
        Some(path) => Script::load(path)
            .with_context(|| format!("loading script {}", path.display()))?,
        None => Script::demo(),
    };

    let seed = config.resolve_seed();
    info!("Seed: {seed}");
    let sim = Simulation::with_seed(config.garden.clone(), seed)
        .context("building garden simulation")?;

    let mut runner = Runner::new(sim, config.frame_dt(), config.ticks);
    runner.run_script(&script);
    runner.run_idle();
    let (snapshot, summary) = runner.finish();

    info!(
        "Planted {}, harvested {}, weeds pulled {}, pests spawned {}",
        summary.planted, summary.harvested, summary.weeds_removed, summary.pests_spawned
    );

    if let Some(path) = &config.snapshot_path {
        write_snapshot(path, &snapshot.to_json()?)?;
    }

    info!("Time Gardener shutdown complete");
    Ok(())
}

fn write_snapshot(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json).with_context(|| format!("writing snapshot {}", path.display()))?;
    info!("Snapshot written to {}", path.display());
    Ok(())
}
