//! Random number generation for world generation.
//!
//! Every consumer of randomness (noise permutation shuffles, point sampling,
//! the traveller) takes an `impl Random` so tests can substitute their own
//! source. [`Arc4Random`] is the only production implementation.

pub mod arc4;

pub use arc4::Arc4Random;

/// A source of uniformly distributed random values.
pub trait Random {
    /// Returns a float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Returns a signed 32-bit integer covering the full `i32` range.
    fn next_i32(&mut self) -> i32;

    /// Returns an integer in `[0, bound)` by scaling [`next_f64`](Random::next_f64).
    ///
    /// Returns 0 when `bound` is 0.
    fn next_bounded(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        ((f64::from(bound) * self.next_f64()) as u32).min(bound - 1)
    }

    /// Returns an index in `[0, len)`, or 0 when `len` is 0.
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((len as f64 * self.next_f64()) as usize).min(len - 1)
    }
}
