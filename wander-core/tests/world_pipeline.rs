//! End-to-end world regression tests.
//!
//! Builds worlds from seeds through the public API. The recorded world in
//! `world_hashes.json` pins per-row MD5 digests of every raster channel and
//! the land-cell count, so any change in the random stream, the noise fields
//! or the climate passes shows up as a row mismatch.

use glam::IVec2;
use serde::Deserialize;
use wander_core::config::GridConfig;
use wander_core::journal::journal;
use wander_core::palette::{rainfall_rgb, temperature_rgb, terrain_rgb};
use wander_core::worldgen::{TerrainGrid, World};
use wander_core::{WorldConfig, WorldError};

fn config(seed: &str) -> WorldConfig {
    let defaults = WorldConfig::default();
    WorldConfig {
        seed: seed.to_string(),
        grid: GridConfig {
            width: 192,
            height: 128,
            ..GridConfig::default()
        },
        terrain_noise: defaults.terrain_noise.with_frequency(0.01),
        wind_noise: defaults.wind_noise.with_frequency(0.005),
        ..defaults
    }
}

/// A recorded world: the config it was built from and its expected digests.
#[derive(Deserialize)]
struct WorldHashesJson {
    seed: String,
    width: u32,
    height: u32,
    sealevel: u8,
    terrain_frequency: f64,
    wind_frequency: f64,
    land_cells: usize,
    row_hashes: Vec<String>,
}

fn load_expected_hashes() -> WorldHashesJson {
    let json_str = include_str!("../test_assets/world_hashes.json");
    serde_json::from_str(json_str).expect("Failed to parse world_hashes.json")
}

/// Compute one MD5 digest per raster row over all three channels.
fn row_hashes(grid: &TerrainGrid) -> Vec<String> {
    grid.cells()
        .chunks(grid.width() as usize)
        .map(|row| {
            let mut ctx = md5::Context::new();
            for cell in row {
                ctx.consume([cell.altitude, cell.temperature, cell.rainfall]);
            }
            format!("{:x}", ctx.finalize())
        })
        .collect()
}

#[test]
fn world_matches_recorded_hashes() {
    let expected = load_expected_hashes();
    let defaults = WorldConfig::default();
    let config = WorldConfig {
        seed: expected.seed.clone(),
        grid: GridConfig {
            width: expected.width,
            height: expected.height,
            sealevel: expected.sealevel,
            ..GridConfig::default()
        },
        terrain_noise: defaults.terrain_noise.with_frequency(expected.terrain_frequency),
        wind_noise: defaults.wind_noise.with_frequency(expected.wind_frequency),
        ..defaults
    };
    assert_eq!(config, self::config(&expected.seed));

    let world = World::new(config).expect("world should generate");
    let actual = row_hashes(world.grid());
    assert_eq!(actual.len(), expected.row_hashes.len());

    let mismatches: Vec<usize> = expected
        .row_hashes
        .iter()
        .zip(&actual)
        .enumerate()
        .filter(|(_, (e, a))| e != a)
        .map(|(row, _)| row)
        .collect();
    assert!(
        mismatches.is_empty(),
        "{} of {} rows differ, first few: {:?}",
        mismatches.len(),
        actual.len(),
        &mismatches[..mismatches.len().min(8)]
    );

    let land_cells = world
        .grid()
        .cells()
        .iter()
        .filter(|cell| cell.altitude > expected.sealevel)
        .count();
    assert_eq!(land_cells, expected.land_cells);
}

#[test]
fn seeded_worlds_are_reproducible() {
    let first = World::new(config("asdf")).expect("world should generate");
    let second = World::new(config("asdf")).expect("world should generate");

    let expected = row_hashes(first.grid());
    let actual = row_hashes(second.grid());
    let mismatches: Vec<usize> = expected
        .iter()
        .zip(&actual)
        .enumerate()
        .filter(|(_, (e, a))| e != a)
        .map(|(row, _)| row)
        .collect();
    assert!(mismatches.is_empty(), "rows differ: {mismatches:?}");

    for y in 0..128 {
        for x in 0..192 {
            let pos = IVec2::new(x, y);
            assert_eq!(
                first.grid().is_land(pos).unwrap(),
                second.grid().is_land(pos).unwrap()
            );
        }
    }
}

#[test]
fn tours_are_reproducible() {
    let tour = |seed| {
        let mut world = World::new(config(seed)).expect("world should generate");
        let walker = world.tour().expect("enough land for a tour");
        walker
            .path()
            .iter()
            .map(|p| p.position)
            .collect::<Vec<_>>()
    };
    assert_eq!(tour("asdf"), tour("asdf"));
}

#[test]
fn full_pipeline() {
    let mut world = World::new(config("asdf")).expect("world should generate");
    let grid = world.grid().clone();
    assert!(grid.land_fraction() > 0.0);

    let walker = world.tour().expect("enough land for a tour");
    let path = walker.path();
    assert_eq!(path.len(), world.config().sampler.target_count);
    assert!(walker.is_complete());
    for point in path {
        assert!(point.visited);
        assert!(grid.is_land(point.position).unwrap());
        assert_eq!(grid.cell_at(point.position).unwrap().altitude, point.altitude);
    }

    let entries = journal(path, grid.sealevel(), grid.snowline());
    assert_eq!(entries.len(), path.len() - 1);
    assert!(entries.iter().all(|e| e.starts_with("I walked")));

    let cells = (grid.width() * grid.height()) as usize;
    assert_eq!(terrain_rgb(&grid).len(), cells);
    assert_eq!(temperature_rgb(&grid).len(), cells);
    assert_eq!(rainfall_rgb(&grid).len(), cells);
}

#[test]
fn drowned_world_cannot_be_toured() {
    let mut config = config("asdf");
    config.terrain_noise = config.terrain_noise.with_output_range(0.0, 32.0);
    config.sampler.max_attempts = 200;
    let mut world = World::new(config).expect("world should generate");
    assert_eq!(world.grid().land_fraction(), 0.0);
    assert!(matches!(
        world.tour(),
        Err(WorldError::InsufficientLand {
            accepted: 0,
            attempts: 200,
            ..
        })
    ));
}

#[test]
fn config_file_defaults_fill_gaps() {
    let parsed: WorldConfig =
        serde_json::from_str(r#"{ "seed": "asdf", "grid": { "sealevel": 70 } }"#).unwrap();
    assert_eq!(parsed.grid.sealevel, 70);
    assert_eq!(parsed.grid.width, 512);
    assert_eq!(parsed.terrain_noise, WorldConfig::default().terrain_noise);
    assert!(parsed.validate().is_ok());
}
