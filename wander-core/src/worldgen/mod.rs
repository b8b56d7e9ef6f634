//! World generation: the terrain/climate raster and the seeded pipeline that
//! builds it.

mod terrain_grid;
mod world;

pub use terrain_grid::{Cell, TerrainGrid};
pub use world::World;
