//! Typed configuration records for the generation pipeline.
//!
//! Every record deserializes with `#[serde(default)]`, so a config file only
//! needs the options it changes. Noise fields go one step further: each key
//! given overrides that field's own defaults, not the generic
//! [`NoiseConfig`] ones. Validation happens at the construction boundary via
//! the `validate` methods.

use serde::{Deserialize, Deserializer, Serialize};
use wander_utils::noise::{NoiseConfig, OutputRange};

use crate::error::ConfigError;

/// Raster size and altitude thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Raster width in cells.
    pub width: u32,
    /// Raster height in cells.
    pub height: u32,
    /// Cells with altitude above this are land.
    pub sealevel: u8,
    /// Cells with altitude above this are snow-capped.
    pub snowline: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            sealevel: 64,
            snowline: 128,
        }
    }
}

impl GridConfig {
    /// Checks dimensions and threshold ordering.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.sealevel == 0 || self.sealevel >= self.snowline || self.snowline == u8::MAX {
            return Err(ConfigError::InvalidThresholds {
                sealevel: self.sealevel,
                snowline: self.snowline,
            });
        }
        Ok(())
    }
}

/// Rainfall shaping options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    /// Number of wet/dry latitude cycles from the equator to each pole.
    pub latitude_bands: f64,
    /// Rainfall multiplier for cells sheltered by a higher upwind neighbour.
    pub rain_shadow: f64,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            latitude_bands: 3.0,
            rain_shadow: 0.85,
        }
    }
}

impl ClimateConfig {
    /// Checks that bands are positive and the shadow factor is in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.latitude_bands.is_finite() && self.latitude_bands > 0.0) {
            return Err(ConfigError::InvalidClimate {
                field: "latitude_bands",
                value: self.latitude_bands,
            });
        }
        if !(0.0..=1.0).contains(&self.rain_shadow) {
            return Err(ConfigError::InvalidClimate {
                field: "rain_shadow",
                value: self.rain_shadow,
            });
        }
        Ok(())
    }
}

/// Best-candidate point sampling options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Number of land points to place.
    pub target_count: usize,
    /// Random candidates drawn for every accepted point.
    pub candidates_per_step: usize,
    /// Cap on selections (accepted or rejected) before giving up.
    pub max_attempts: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            target_count: 32,
            candidates_per_step: 10,
            max_attempts: 10_000,
        }
    }
}

impl SamplerConfig {
    /// Checks that at least one candidate is drawn per step.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.candidates_per_step == 0 {
            return Err(ConfigError::ZeroCandidates);
        }
        Ok(())
    }
}

/// Everything needed to generate and tour one world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed string; empty means seed from OS entropy (not reproducible).
    pub seed: String,
    /// Raster size and thresholds.
    pub grid: GridConfig,
    /// Rainfall shaping.
    pub climate: ClimateConfig,
    /// Terrain shape noise; its output range should cover `0..=255`.
    #[serde(deserialize_with = "terrain_noise_overrides")]
    pub terrain_noise: NoiseConfig,
    /// Prevailing wind noise feeding rainfall.
    ///
    /// A single octave, at a lower frequency than the terrain so wet and dry
    /// regions span several landforms. More than one octave is rejected.
    #[serde(deserialize_with = "wind_noise_overrides")]
    pub wind_noise: NoiseConfig,
    /// Point sampling.
    pub sampler: SamplerConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: "asdf".to_string(),
            grid: GridConfig::default(),
            climate: ClimateConfig::default(),
            terrain_noise: terrain_noise_defaults(),
            wind_noise: wind_noise_defaults(),
            sampler: SamplerConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Validates every nested record.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.climate.validate()?;
        self.terrain_noise.validate()?;
        self.wind_noise.validate()?;
        if self.terrain_noise.output_range.is_none() {
            return Err(ConfigError::MissingOutputRange {
                field: "terrain_noise",
            });
        }
        if self.wind_noise.output_range.is_none() {
            return Err(ConfigError::MissingOutputRange {
                field: "wind_noise",
            });
        }
        if self.wind_noise.octaves != 1 {
            return Err(ConfigError::MultiOctaveWind(self.wind_noise.octaves));
        }
        self.sampler.validate()?;
        Ok(())
    }
}

fn terrain_noise_defaults() -> NoiseConfig {
    NoiseConfig::default()
        .with_frequency(0.002)
        .with_octaves(6)
        .with_output_range(0.0, 255.0)
}

fn wind_noise_defaults() -> NoiseConfig {
    NoiseConfig::default()
        .with_frequency(0.001)
        .with_octaves(1)
        .with_output_range(0.0, 255.0)
}

/// Noise options as written in a config file, every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NoiseOverrides {
    amplitude: Option<f64>,
    frequency: Option<f64>,
    octaves: Option<u32>,
    persistence: Option<f64>,
    output_range: Option<OutputRange>,
}

impl NoiseOverrides {
    fn over(self, base: NoiseConfig) -> NoiseConfig {
        NoiseConfig {
            amplitude: self.amplitude.unwrap_or(base.amplitude),
            frequency: self.frequency.unwrap_or(base.frequency),
            octaves: self.octaves.unwrap_or(base.octaves),
            persistence: self.persistence.unwrap_or(base.persistence),
            output_range: self.output_range.or(base.output_range),
        }
    }
}

fn terrain_noise_overrides<'de, D: Deserializer<'de>>(d: D) -> Result<NoiseConfig, D::Error> {
    Ok(NoiseOverrides::deserialize(d)?.over(terrain_noise_defaults()))
}

fn wind_noise_overrides<'de, D: Deserializer<'de>>(d: D) -> Result<NoiseConfig, D::Error> {
    Ok(NoiseOverrides::deserialize(d)?.over(wind_noise_defaults()))
}
