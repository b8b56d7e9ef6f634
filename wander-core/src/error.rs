//! Errors surfaced by world generation.
//!
//! Every failure is returned to the caller; nothing is logged and skipped.

use thiserror::Error;
use wander_utils::noise::NoiseConfigError;

/// Invalid construction options.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid width or height is zero.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// Sea level and snow line are not ordered `0 < sealevel < snowline < 255`.
    #[error("thresholds must satisfy 0 < sealevel ({sealevel}) < snowline ({snowline}) < 255")]
    InvalidThresholds {
        /// Configured sea level.
        sealevel: u8,
        /// Configured snow line.
        snowline: u8,
    },
    /// A climate option is out of its valid range.
    #[error("invalid climate option `{field}`: {value}")]
    InvalidClimate {
        /// Name of the offending option.
        field: &'static str,
        /// Its configured value.
        value: f64,
    },
    /// A noise field feeding the grid has no output range, so its raw
    /// `[-1, 1]` values would all fall below any sea level.
    #[error("`{field}` needs an output range")]
    MissingOutputRange {
        /// Name of the noise field.
        field: &'static str,
    },
    /// The wind field must be a single octave.
    #[error("`wind_noise` must have exactly one octave, got {0}")]
    MultiOctaveWind(u32),
    /// Best-candidate sampling needs at least one candidate per step.
    #[error("candidates per step must be at least 1")]
    ZeroCandidates,
    /// A noise field option is invalid.
    #[error("noise config: {0}")]
    Noise(#[from] NoiseConfigError),
}

/// An error that can occur while generating or querying a world.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    /// Invalid options were supplied at construction.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A raster accessor was called outside `[0, width) x [0, height)`.
    #[error("position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Requested x.
        x: i32,
        /// Requested y.
        y: i32,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// Too little land to place the requested points within the attempt cap.
    #[error(
        "insufficient land: placed {accepted} of {requested} points in {attempts} attempts"
    )]
    InsufficientLand {
        /// Points asked for.
        requested: usize,
        /// Points placed before giving up.
        accepted: usize,
        /// Attempts spent.
        attempts: usize,
    },
}

impl From<NoiseConfigError> for WorldError {
    fn from(err: NoiseConfigError) -> Self {
        Self::Config(ConfigError::Noise(err))
    }
}
