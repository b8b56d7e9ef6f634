//! PNG previews of the generated rasters.

use std::fs;
use std::path::Path;

use anyhow::Context;
use image::ColorType;
use wander_core::palette::{rainfall_rgb, temperature_rgb, terrain_rgb};
use wander_core::worldgen::TerrainGrid;

/// Write `terrain.png`, `temperature.png` and `rainfall.png` into `dir`.
pub fn write_previews(grid: &TerrainGrid, dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    for (name, pixels) in [
        ("terrain.png", terrain_rgb(grid)),
        ("temperature.png", temperature_rgb(grid)),
        ("rainfall.png", rainfall_rgb(grid)),
    ] {
        let path = dir.join(name);
        image::save_buffer(
            &path,
            pixels.as_flattened(),
            grid.width(),
            grid.height(),
            ColorType::Rgb8,
        )
        .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
    }
    Ok(())
}
