//! Shared primitives for world generation.
//!
//! - [`random`] - the [`Random`](random::Random) trait and the seeded ARC4 generator
//! - [`noise`] - simplex noise fields with fractal composition and domain warps
//! - [`math`] - small numeric helpers

pub mod math;
pub mod noise;
pub mod random;
