//! A fully seeded world: one RNG, its noise fields and the generated grid.

use glam::IVec2;
use wander_utils::noise::SimplexNoise;
use wander_utils::random::Arc4Random;

use crate::config::WorldConfig;
use crate::error::WorldError;
use crate::sampling::{PointSampler, SamplePoint};
use crate::travel::{self, NearestNeighborWalker};
use crate::worldgen::TerrainGrid;

/// A generated world and the random stream that built it.
///
/// The terrain field, then the wind field, draw their permutation shuffles
/// from the world's RNG; sampling and touring continue the same stream, so
/// one seed reproduces the whole pipeline.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    rng: Arc4Random,
    grid: TerrainGrid,
}

impl World {
    /// Validate `config`, build the noise fields and generate the grid.
    ///
    /// An empty seed draws from OS entropy and the result is not reproducible.
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;

        let mut rng = if config.seed.is_empty() {
            log::info!("No seed configured, seeding from entropy; this world is not reproducible");
            Arc4Random::from_entropy()
        } else {
            Arc4Random::from_seed(&config.seed)
        };

        let terrain = SimplexNoise::new(config.terrain_noise, &mut rng)?;
        let wind = SimplexNoise::new(config.wind_noise, &mut rng)?;
        let mut grid = TerrainGrid::new(config.grid, config.climate, terrain, wind)?;
        grid.generate();

        Ok(Self { config, rng, grid })
    }

    /// Place land sample points with the configured sampler options.
    pub fn sample_points(&mut self) -> Result<Vec<SamplePoint>, WorldError> {
        let sampler = self.config.sampler;
        PointSampler::new(&self.grid).generate(
            &mut self.rng,
            sampler.target_count,
            sampler.candidates_per_step,
            sampler.max_attempts,
        )
    }

    /// Sample points, place a walker on one of them and walk the full tour.
    pub fn tour(&mut self) -> Result<NearestNeighborWalker, WorldError> {
        let points = self.sample_points()?;
        let mut walker = NearestNeighborWalker::new(points);
        walker.place(&mut self.rng)?;
        walker.walk();
        Ok(walker)
    }

    /// One free-roaming step on this world's land, drawing from its RNG.
    ///
    /// See [`travel::wander_step`].
    pub fn wander_step(
        &mut self,
        from: IVec2,
        heading: f64,
        step_size: f64,
        max_attempts: usize,
    ) -> Result<(SamplePoint, f64), WorldError> {
        travel::wander_step(&self.grid, &mut self.rng, from, heading, step_size, max_attempts)
    }

    /// The generated grid.
    #[must_use]
    pub const fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    /// The options this world was built from.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The world's random stream, for callers driving their own travellers.
    pub const fn rng_mut(&mut self) -> &mut Arc4Random {
        &mut self.rng
    }
}
