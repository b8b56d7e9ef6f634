//! Binary configuration, read from a JSON5 file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use wander_core::WorldConfig;

/// Everything the binary reads from its config file.
///
/// World options sit at the top level next to the output options. Every
/// field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WanderConfig {
    /// Seed, grid, noise and sampler options.
    #[serde(flatten)]
    pub world: WorldConfig,
    /// Directory for PNG previews; none are written when unset.
    pub output_dir: Option<String>,
    /// Free-roaming walk after the tour.
    pub roam: RoamConfig,
}

/// Free-roaming walk options.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoamConfig {
    /// Steps to take; 0 skips the walk.
    pub steps: usize,
    /// Cells covered per step.
    pub step_size: f64,
    /// Tries per step before giving up.
    pub max_attempts: usize,
}

impl Default for RoamConfig {
    fn default() -> Self {
        Self {
            steps: 0,
            step_size: 32.0,
            max_attempts: 1_000,
        }
    }
}

impl WanderConfig {
    /// Read and validate the config at `path`, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = match fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::parse(&text)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        config
            .world
            .validate()
            .with_context(|| format!("invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Parse JSON5 config text.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json5::from_str(text)?)
    }
}
