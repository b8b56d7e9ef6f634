//! Terrain, temperature and rainfall raster.
//!
//! The grid is filled in two full passes. The first derives altitude from the
//! terrain noise and temperature from altitude. The second derives rainfall
//! from the wind noise, a latitude band and the first pass's altitudes, so it
//! cannot be fused into the first.

use std::f64::consts::TAU;
use std::time::Instant;

use glam::IVec2;
use wander_utils::math::{floor, lerp};
use wander_utils::noise::SimplexNoise;

use crate::config::{ClimateConfig, GridConfig};
use crate::error::WorldError;

/// Ocean temperature at the coast; open water cools by up to `OCEAN_DEPTH_COOLING`.
const OCEAN_SURFACE_TEMPERATURE: f64 = 174.0;
const OCEAN_DEPTH_COOLING: f64 = 46.0;
/// Temperature range spanned between sea level and the snow line.
const LOWLAND_TEMPERATURE_SPAN: f64 = 170.0;
/// Temperature at the snow line, falling to zero at the highest peaks.
const SNOWLINE_TEMPERATURE: f64 = 4.0;

/// One raster cell. All channels span `0..=255`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    /// 0 at or below sea level, otherwise height above sea level rescaled to 255.
    pub altitude: u8,
    /// Derived from altitude: mild over water, cooling with height.
    pub temperature: u8,
    /// Wind and latitude driven, never below the cell's altitude.
    pub rainfall: u8,
}

/// A fixed-size raster of derived terrain and climate channels.
///
/// Owns the two noise fields it samples; nothing is looked up from shared
/// state. Accessors are bounds checked and never wrap.
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    config: GridConfig,
    climate: ClimateConfig,
    terrain: SimplexNoise,
    wind: SimplexNoise,
    cells: Vec<Cell>,
}

impl TerrainGrid {
    /// Create a zeroed grid. Call [`generate`](Self::generate) to fill it.
    pub fn new(
        config: GridConfig,
        climate: ClimateConfig,
        terrain: SimplexNoise,
        wind: SimplexNoise,
    ) -> Result<Self, WorldError> {
        config.validate()?;
        climate.validate()?;
        let len = config.width as usize * config.height as usize;
        Ok(Self {
            config,
            climate,
            terrain,
            wind,
            cells: vec![Cell::default(); len],
        })
    }

    /// Fill every channel of the raster.
    ///
    /// Pure with respect to the owned noise fields: calling it again yields an
    /// identical raster.
    pub fn generate(&mut self) {
        let start = Instant::now();
        let width = self.config.width as usize;
        let height = self.config.height as usize;
        let sealevel = f64::from(self.config.sealevel);
        let snowline = f64::from(self.config.snowline);

        // Pass 1: altitude and temperature
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let raw_height = self.terrain.fractal_2d(x as f64, y as f64);
                let altitude = altitude_from_height(raw_height, sealevel);
                cells.push(Cell {
                    altitude,
                    temperature: temperature_for(f64::from(altitude), sealevel, snowline),
                    rainfall: 0,
                });
            }
        }

        // Pass 2: rainfall, blown west to east
        for y in 0..height {
            let band = latitude_band(y as f64 / height as f64 - 0.5, self.climate.latitude_bands);
            for x in 0..width {
                let idx = y * width + x;
                let altitude = f64::from(cells[idx].altitude);
                let wind = self.wind.fractal_2d(x as f64, y as f64);
                let mut blend = lerp(altitude / 255.0, wind, band);
                if x > 0 && cells[idx - 1].altitude > cells[idx].altitude {
                    blend *= self.climate.rain_shadow;
                }
                cells[idx].rainfall = to_channel(blend.max(altitude));
            }
        }

        self.cells = cells;
        log::debug!(
            "Generated {}x{} terrain grid in {:?} ({:.1}% land)",
            width,
            height,
            start.elapsed(),
            self.land_fraction() * 100.0
        );
    }

    /// Raster width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.config.width
    }

    /// Raster height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.config.height
    }

    /// Altitude threshold separating water from land.
    #[must_use]
    pub const fn sealevel(&self) -> u8 {
        self.config.sealevel
    }

    /// Altitude threshold above which cells are snow-capped.
    #[must_use]
    pub const fn snowline(&self) -> u8 {
        self.config.snowline
    }

    /// The grid options this raster was built with.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether `pos` lies inside the raster.
    #[must_use]
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as u32) < self.config.width
            && (pos.y as u32) < self.config.height
    }

    fn index(&self, pos: IVec2) -> Result<usize, WorldError> {
        if !self.contains(pos) {
            return Err(WorldError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.config.width,
                height: self.config.height,
            });
        }
        Ok(pos.y as usize * self.config.width as usize + pos.x as usize)
    }

    /// All channels at `pos`.
    pub fn cell_at(&self, pos: IVec2) -> Result<Cell, WorldError> {
        Ok(self.cells[self.index(pos)?])
    }

    /// Altitude at `pos`.
    pub fn terrain_at(&self, pos: IVec2) -> Result<u8, WorldError> {
        Ok(self.cell_at(pos)?.altitude)
    }

    /// Temperature at `pos`.
    pub fn temperature_at(&self, pos: IVec2) -> Result<u8, WorldError> {
        Ok(self.cell_at(pos)?.temperature)
    }

    /// Rainfall at `pos`.
    pub fn rainfall_at(&self, pos: IVec2) -> Result<u8, WorldError> {
        Ok(self.cell_at(pos)?.rainfall)
    }

    /// Whether the cell at `pos` is above sea level.
    pub fn is_land(&self, pos: IVec2) -> Result<bool, WorldError> {
        Ok(self.terrain_at(pos)? > self.config.sealevel)
    }

    /// Fraction of cells that are land.
    #[must_use]
    pub fn land_fraction(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        let land = self
            .cells
            .iter()
            .filter(|c| c.altitude > self.config.sealevel)
            .count();
        land as f64 / self.cells.len() as f64
    }
}

/// Rescale a `0..=255` noise height so sea level maps to 0 and the peak to 255.
fn altitude_from_height(raw_height: f64, sealevel: f64) -> u8 {
    let height = f64::from(floor(raw_height));
    if height <= sealevel {
        return 0;
    }
    (255.0 * (height - sealevel) / (255.0 - sealevel))
        .floor()
        .clamp(0.0, 255.0) as u8
}

/// Piecewise temperature: an ocean band, a linear lowland ramp and a cold
/// band above the snow line.
fn temperature_for(altitude: f64, sealevel: f64, snowline: f64) -> u8 {
    let temperature = if altitude <= sealevel {
        OCEAN_SURFACE_TEMPERATURE - OCEAN_DEPTH_COOLING * (1.0 - altitude / sealevel)
    } else if altitude <= snowline {
        SNOWLINE_TEMPERATURE
            + LOWLAND_TEMPERATURE_SPAN * (1.0 - (altitude - sealevel) / (snowline - sealevel))
    } else {
        SNOWLINE_TEMPERATURE * (1.0 - (altitude - snowline) / (255.0 - snowline))
    };
    to_channel(temperature)
}

/// Rain from prevailing circulation: wet at the equator, alternating dry and
/// wet bands towards the poles. `latitude` runs from -0.5 to 0.5.
fn latitude_band(latitude: f64, bands: f64) -> f64 {
    127.5 * (1.0 + (TAU * bands * latitude).cos())
}

/// Round half to even and clamp, matching 8-bit canvas channel storage.
fn to_channel(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}
