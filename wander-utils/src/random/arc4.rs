//! Seeded ARC4 keystream generator.
//!
//! Produces the same stream as the widely used ARC4-based `seedrandom`
//! generator: the seed string is folded into a key, the ARC4 state is
//! key-scheduled, and the first 256 keystream bytes are dropped (RC4-drop[256]).
//! Floats are built from at least six keystream bytes so every bit of the
//! 52-bit mantissa is random.
//!
//! **Determinism.** Identical seed strings produce identical streams on every
//! platform. [`Arc4Random::from_entropy`] is the one exception and must not feed
//! anything that needs to be reproduced.

use rand::RngCore;

use super::Random;

/// Each keystream output is a byte.
const WIDTH: usize = 256;
const MASK: usize = WIDTH - 1;
/// Keystream bytes concatenated for the initial numerator of a float.
const CHUNKS: u32 = 6;
const START_DENOM: u128 = 1 << 48;
/// Numerators below this still have unfilled mantissa bits.
const SIGNIFICANCE: u128 = 1 << 52;
/// Numerators at or above this would round when converted to `f64`.
const OVERFLOW: u128 = 1 << 53;

/// ARC4-based deterministic generator seeded from a string.
#[derive(Clone, Debug)]
pub struct Arc4Random {
    s: [u8; WIDTH],
    i: u8,
    j: u8,
}

impl Arc4Random {
    /// Creates a generator from a seed string.
    ///
    /// The string's UTF-16 code units are mixed into a key of at most 256
    /// bytes, so seeds agree with generators that operate on JavaScript-style
    /// strings.
    #[must_use]
    pub fn from_seed(seed: &str) -> Self {
        Self::from_key(&mix_key(seed))
    }

    /// Creates a generator from 256 bytes of OS entropy.
    ///
    /// The resulting stream is not reproducible.
    #[must_use]
    pub fn from_entropy() -> Self {
        let mut key = [0u8; WIDTH];
        rand::rng().fill_bytes(&mut key);
        log::debug!("Seeding ARC4 generator from OS entropy; output is not reproducible");
        Self::from_key(&key)
    }

    /// Creates a generator directly from a key. An empty key behaves as `[0]`.
    #[must_use]
    pub fn from_key(key: &[u8]) -> Self {
        let key: &[u8] = if key.is_empty() { &[0] } else { key };

        let mut s = [0u8; WIDTH];
        for (i, val) in s.iter_mut().enumerate() {
            *val = i as u8;
        }

        // Standard ARC4 key scheduling
        let mut j: u8 = 0;
        for i in 0..WIDTH {
            j = j.wrapping_add(key[i % key.len()]).wrapping_add(s[i]);
            s.swap(i, usize::from(j));
        }

        let mut rng = Self { s, i: 0, j: 0 };
        rng.keystream(WIDTH as u32);
        rng
    }

    #[inline]
    fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        let t = self.s[usize::from(self.i)];
        self.j = self.j.wrapping_add(t);
        self.s[usize::from(self.i)] = self.s[usize::from(self.j)];
        self.s[usize::from(self.j)] = t;
        self.s[usize::from(self.s[usize::from(self.i)].wrapping_add(t))]
    }

    /// Concatenates the next `count` keystream bytes, most significant first.
    ///
    /// Only the low 64 bits are kept, so callers needing the exact value pass
    /// `count <= 8`.
    fn keystream(&mut self, count: u32) -> u64 {
        let mut r: u64 = 0;
        for _ in 0..count {
            r = (r << 8) | u64::from(self.next_byte());
        }
        r
    }

    /// Returns a float in `[0, 1)` with only 32 bits of randomness.
    pub fn next_quick_f64(&mut self) -> f64 {
        self.keystream(4) as f64 / 4_294_967_296.0
    }
}

impl Random for Arc4Random {
    fn next_f64(&mut self) -> f64 {
        let mut n = u128::from(self.keystream(CHUNKS));
        let mut d = START_DENOM;
        let mut x: u128 = 0;
        // Fill every significant bit by shifting in whole bytes.
        while n < SIGNIFICANCE {
            n = (n + x) << 8;
            d <<= 8;
            x = u128::from(self.next_byte());
        }
        // Shift back down so the final addition cannot round up.
        while n >= OVERFLOW {
            n >>= 1;
            d >>= 1;
            x >>= 1;
        }
        (n + x) as f64 / d as f64
    }

    fn next_i32(&mut self) -> i32 {
        self.keystream(4) as u32 as i32
    }
}

/// Folds a seed string into an ARC4 key of at most 256 bytes.
///
/// Positions past 255 wrap around and are smeared into the existing bytes.
fn mix_key(seed: &str) -> Vec<u8> {
    let mut key: Vec<u8> = Vec::with_capacity(WIDTH);
    let mut smear: i32 = 0;
    for (j, unit) in seed.encode_utf16().enumerate() {
        let slot = j & MASK;
        smear ^= key.get(slot).map_or(0, |&b| i32::from(b) * 19);
        let value = (smear.wrapping_add(i32::from(unit)) & 0xFF) as u8;
        if slot < key.len() {
            key[slot] = value;
        } else {
            key.push(value);
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn determinism_same_seed_same_output() {
        let mut a = Arc4Random::from_seed("asdf");
        let mut b = Arc4Random::from_seed("asdf");
        for _ in 0..1000 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn different_seeds_different_output() {
        let mut a = Arc4Random::from_seed("asdf");
        let mut b = Arc4Random::from_seed("asdg");
        let va: Vec<u64> = (0..8).map(|_| a.next_f64().to_bits()).collect();
        let vb: Vec<u64> = (0..8).map(|_| b.next_f64().to_bits()).collect();
        assert_ne!(va, vb);
    }

    /// Reference values published for the ARC4 `seedrandom` generator.
    #[test]
    fn known_sequence_for_hello_seed() {
        let mut rng = Arc4Random::from_seed("hello.");
        #[allow(clippy::float_cmp, reason = "exact reference values")]
        {
            assert_eq!(rng.next_f64(), 0.928_257_879_579_245_4);
            assert_eq!(rng.next_f64(), 0.375_256_976_864_678_4);
        }
    }

    #[test]
    fn f64_in_unit_range() {
        let mut rng = Arc4Random::from_seed("range");
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "f64 out of range: {v}");
        }
    }

    #[test]
    fn quick_f64_in_unit_range() {
        let mut rng = Arc4Random::from_seed("quick");
        for _ in 0..10_000 {
            let v = rng.next_quick_f64();
            assert!((0.0..1.0).contains(&v), "quick f64 out of range: {v}");
        }
    }

    #[test]
    fn i32_covers_both_signs() {
        let mut rng = Arc4Random::from_seed("signs");
        let values: Vec<i32> = (0..1000).map(|_| rng.next_i32()).collect();
        assert!(values.iter().any(|&v| v < 0));
        assert!(values.iter().any(|&v| v > 0));
    }

    #[test]
    fn empty_seed_behaves_as_zero_key() {
        let mut a = Arc4Random::from_seed("");
        let mut b = Arc4Random::from_key(&[0]);
        for _ in 0..100 {
            assert_eq!(a.next_i32(), b.next_i32());
        }
    }

    #[test]
    fn short_seed_key_is_code_units() {
        assert_eq!(mix_key("asdf"), b"asdf".to_vec());
    }

    #[test]
    fn long_seed_key_wraps_at_256() {
        let seed = "x".repeat(300);
        let key = mix_key(&seed);
        assert_eq!(key.len(), 256);
        // The first 44 slots were rewritten by the wrapped tail.
        assert_ne!(key[0], b'x');
        assert_eq!(key[255], b'x');
    }

    #[test]
    fn bounded_values_stay_below_bound() {
        let mut rng = Arc4Random::from_seed("bounded");
        for _ in 0..10_000 {
            assert!(rng.next_bounded(7) < 7);
            assert!(rng.next_index(13) < 13);
        }
        assert_eq!(rng.next_bounded(0), 0);
        assert_eq!(rng.next_index(0), 0);
    }

    #[test]
    fn entropy_seeding_produces_values() {
        let mut rng = Arc4Random::from_entropy();
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v));
    }
}
