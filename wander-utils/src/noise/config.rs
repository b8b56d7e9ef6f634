//! Construction options for simplex noise fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An invalid noise field configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseConfigError {
    /// The output range is empty, inverted or not finite.
    #[error("output range min ({min}) must be less than max ({max})")]
    InvalidOutputRange {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// Fractal noise needs at least one octave.
    #[error("octave count must be at least 1")]
    ZeroOctaves,
    /// Amplitude is zero, negative or not finite.
    #[error("amplitude must be finite and positive, got {0}")]
    InvalidAmplitude(f64),
    /// Frequency is zero, negative or not finite.
    #[error("frequency must be finite and positive, got {0}")]
    InvalidFrequency(f64),
    /// Persistence is not finite.
    #[error("persistence must be finite, got {0}")]
    InvalidPersistence(f64),
}

/// Target interval for fractal noise output.
///
/// Raw noise in `[-1, 1]` is mapped linearly onto `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputRange {
    /// Value produced for raw noise `-1`.
    pub min: f64,
    /// Value produced for raw noise `1`.
    pub max: f64,
}

impl OutputRange {
    /// Creates a range. Validity is checked by [`NoiseConfig::validate`].
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Maps `value` from `[-1, 1]` onto this range.
    #[inline]
    #[must_use]
    pub fn rescale(&self, value: f64) -> f64 {
        self.min + (value + 1.0) / 2.0 * (self.max - self.min)
    }
}

/// Options for a [`SimplexNoise`](super::SimplexNoise) field.
///
/// Missing fields deserialize to their defaults: amplitude 1, frequency 1,
/// one octave, persistence 0.5 and no output range (raw `[-1, 1]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Amplitude of the first octave.
    pub amplitude: f64,
    /// Frequency of the first octave; doubles every octave.
    pub frequency: f64,
    /// Number of octaves summed by the fractal samplers.
    pub octaves: u32,
    /// Amplitude multiplier applied between octaves.
    pub persistence: f64,
    /// Optional rescale of the normalized fractal sum.
    pub output_range: Option<OutputRange>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            octaves: 1,
            persistence: 0.5,
            output_range: None,
        }
    }
}

impl NoiseConfig {
    /// Sets the base frequency.
    #[must_use]
    pub const fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the octave count.
    #[must_use]
    pub const fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    /// Sets the base amplitude.
    #[must_use]
    pub const fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Sets the per-octave amplitude falloff.
    #[must_use]
    pub const fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Rescales fractal output onto `[min, max]`.
    #[must_use]
    pub const fn with_output_range(mut self, min: f64, max: f64) -> Self {
        self.output_range = Some(OutputRange::new(min, max));
        self
    }

    /// Checks every option, failing on the first invalid one.
    pub fn validate(&self) -> Result<(), NoiseConfigError> {
        if !(self.amplitude.is_finite() && self.amplitude > 0.0) {
            return Err(NoiseConfigError::InvalidAmplitude(self.amplitude));
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(NoiseConfigError::InvalidFrequency(self.frequency));
        }
        if self.octaves == 0 {
            return Err(NoiseConfigError::ZeroOctaves);
        }
        if !self.persistence.is_finite() {
            return Err(NoiseConfigError::InvalidPersistence(self.persistence));
        }
        if let Some(OutputRange { min, max }) = self.output_range
            && !(min.is_finite() && max.is_finite() && min < max)
        {
            return Err(NoiseConfigError::InvalidOutputRange { min, max });
        }
        Ok(())
    }
}
