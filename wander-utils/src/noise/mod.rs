//! Simplex noise fields for terrain and climate generation.
//!
//! - [`SimplexNoise`] - 2D/3D/4D simplex noise with fractal (octave) composition
//!   and cylindrical/spherical domain warps
//! - [`NoiseConfig`] - validated construction options for a noise field

mod config;
mod simplex_noise;

pub use config::{NoiseConfig, NoiseConfigError, OutputRange};
pub use simplex_noise::SimplexNoise;

/// Gradient vectors for 2D and 3D simplex noise (the 12 cube edge midpoints).
///
/// 2D noise uses only the first two components.
pub(crate) const GRAD3: [[i8; 3]; 12] = [
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, 1],
    [1, 0, -1],
    [-1, 0, -1],
    [0, 1, 1],
    // Deliberately [0, -1, 1]; tables that repeat [0, -1, -1] here yield different maps.
    [0, -1, 1],
    [0, 1, -1],
    [0, -1, -1],
];

/// Gradient vectors for 4D simplex noise (the 32 edge midpoints of a tesseract).
pub(crate) const GRAD4: [[i8; 4]; 32] = [
    [0, 1, 1, 1],
    [0, 1, 1, -1],
    [0, 1, -1, 1],
    [0, 1, -1, -1],
    [0, -1, 1, 1],
    [0, -1, 1, -1],
    [0, -1, -1, 1],
    [0, -1, -1, -1],
    [1, 0, 1, 1],
    [1, 0, 1, -1],
    [1, 0, -1, 1],
    [1, 0, -1, -1],
    [-1, 0, 1, 1],
    [-1, 0, 1, -1],
    [-1, 0, -1, 1],
    [-1, 0, -1, -1],
    [1, 1, 0, 1],
    [1, 1, 0, -1],
    [1, -1, 0, 1],
    [1, -1, 0, -1],
    [-1, 1, 0, 1],
    [-1, 1, 0, -1],
    [-1, -1, 0, 1],
    [-1, -1, 0, -1],
    [1, 1, 1, 0],
    [1, 1, -1, 0],
    [1, -1, 1, 0],
    [1, -1, -1, 0],
    [-1, 1, 1, 0],
    [-1, 1, -1, 0],
    [-1, -1, 1, 0],
    [-1, -1, -1, 0],
];
