//! World generation pipeline: terrain and climate rasters, land point
//! sampling and the traveller that tours them.
//!
//! Data flows leaf-first:
//!
//! 1. Two [`SimplexNoise`](wander_utils::noise::SimplexNoise) fields (terrain
//!    shape and wind) are built from a seeded [`Arc4Random`](wander_utils::random::Arc4Random).
//! 2. [`TerrainGrid::generate`](worldgen::TerrainGrid::generate) fills the
//!    altitude, temperature and rainfall channels.
//! 3. [`PointSampler`](sampling::PointSampler) spreads land-only points over the grid.
//! 4. [`NearestNeighborWalker`](travel::NearestNeighborWalker) orders them into a path.
//! 5. [`journal`] and [`palette`] read the path and raster for narration and previews.

pub mod config;
pub mod error;
pub mod journal;
pub mod palette;
pub mod sampling;
pub mod travel;
pub mod worldgen;

pub use config::WorldConfig;
pub use error::{ConfigError, WorldError};
