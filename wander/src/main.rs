//! `wander`: generate a seeded world, tour it and keep a journal.
//!
//! Usage: `wander [config.json5]`. The config path defaults to `wander.json5`
//! in the working directory; a missing file means built-in defaults.

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use wander_core::journal::journal;
use wander_core::worldgen::World;

mod config;
mod logger;
mod render;
mod roam;

use config::WanderConfig;

const DEFAULT_CONFIG_PATH: &str = "wander.json5";

fn main() -> anyhow::Result<()> {
    logger::init().context("failed to install logger")?;

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = WanderConfig::load(Path::new(&config_path))?;

    let start = Instant::now();
    let mut world = World::new(config.world.clone()).context("failed to generate world")?;
    let grid = world.grid();
    tracing::info!(
        "Generated {}x{} world in {:?} ({:.1}% land)",
        grid.width(),
        grid.height(),
        start.elapsed(),
        grid.land_fraction() * 100.0
    );

    if let Some(dir) = &config.output_dir {
        render::write_previews(world.grid(), Path::new(dir))?;
    }

    let walker = world.tour().context("failed to tour the world")?;
    let path = walker.path().to_vec();
    tracing::info!("Visited {} sample points", path.len());

    let (sealevel, snowline) = (world.grid().sealevel(), world.grid().snowline());
    for (day, entry) in journal(&path, sealevel, snowline).iter().enumerate() {
        tracing::info!("Day {}: {}", day + 1, entry);
    }

    if config.roam.steps > 0
        && let Some(last) = path.last()
    {
        roam::roam(&mut world, *last, &config.roam).context("failed to roam")?;
    }

    Ok(())
}
