//! Simplex noise in two, three and four dimensions.
//!
//! Follows Stefan Gustavson's reference formulation with Peter Eastman's
//! speedups and the rank-ordering method for 4D. Each field owns its own
//! permutation table, built once from a [`Random`] and never mutated.

use std::f64::consts::PI;

use crate::noise::{GRAD3, GRAD4, NoiseConfig, NoiseConfigError};
use crate::random::Random;

#[allow(clippy::unreadable_literal, reason = "reference constants")]
const SQRT_3: f64 = 1.7320508075688772;
#[allow(clippy::unreadable_literal, reason = "reference constants")]
const SQRT_5: f64 = 2.23606797749979;

/// Skewing factor for 2D simplex: `0.5 * (sqrt(3) - 1)`
const F2: f64 = 0.5 * (SQRT_3 - 1.0);
/// Unskewing factor for 2D simplex: `(3 - sqrt(3)) / 6`
const G2: f64 = (3.0 - SQRT_3) / 6.0;
/// Skewing factor for 3D simplex: `1/3`
const F3: f64 = 1.0 / 3.0;
/// Unskewing factor for 3D simplex: `1/6`
const G3: f64 = 1.0 / 6.0;
/// Skewing factor for 4D simplex: `(sqrt(5) - 1) / 4`
const F4: f64 = (SQRT_5 - 1.0) / 4.0;
/// Unskewing factor for 4D simplex: `(5 - sqrt(5)) / 20`
const G4: f64 = (5.0 - SQRT_5) / 20.0;

/// Scales keep each dimension's raw output inside `[-1, 1]`.
#[allow(clippy::unreadable_literal, reason = "reference constants")]
const NORM_2D: f64 = 70.14805770654148;
#[allow(clippy::unreadable_literal, reason = "reference constants")]
const NORM_3D: f64 = 94.68493150681972;
#[allow(clippy::unreadable_literal, reason = "reference constants")]
const NORM_4D: f64 = 72.37857097679466;

/// A seeded simplex noise field.
///
/// The 256-entry permutation is mirrored into 512-entry tables (plus a
/// pre-reduced mod-12 copy for the 2D/3D gradient lookup) so hashed lookups
/// never need to wrap.
#[derive(Debug, Clone)]
pub struct SimplexNoise {
    perm: [u8; 512],
    perm_mod12: [u8; 512],
    config: NoiseConfig,
}

impl SimplexNoise {
    /// Create a new noise field, shuffling its permutation with `random`.
    ///
    /// Consumes 255 values from `random`, so two fields built from the same
    /// generator state are identical.
    pub fn new<R: Random>(config: NoiseConfig, random: &mut R) -> Result<Self, NoiseConfigError> {
        config.validate()?;

        let mut p = [0u8; 256];
        for (i, val) in p.iter_mut().enumerate() {
            *val = i as u8;
        }

        // Fisher-Yates, walking down from the top
        for i in (1..256usize).rev() {
            let n = random.next_bounded((i + 1) as u32) as usize;
            p.swap(i, n);
        }

        let mut perm = [0u8; 512];
        let mut perm_mod12 = [0u8; 512];
        for i in 0..512 {
            perm[i] = p[i & 0xFF];
            perm_mod12[i] = perm[i] % 12;
        }

        Ok(Self {
            perm,
            perm_mod12,
            config,
        })
    }

    #[inline]
    fn p(&self, index: usize) -> usize {
        usize::from(self.perm[index])
    }

    #[inline]
    fn p12(&self, index: usize) -> usize {
        usize::from(self.perm_mod12[index])
    }

    #[inline]
    fn corner_2d(gi: usize, x: f64, y: f64) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            0.0
        } else {
            let g = GRAD3[gi];
            let t = t * t;
            t * t * (f64::from(g[0]) * x + f64::from(g[1]) * y)
        }
    }

    #[inline]
    fn corner_3d(gi: usize, x: f64, y: f64, z: f64) -> f64 {
        let t = 0.5 - x * x - y * y - z * z;
        if t < 0.0 {
            0.0
        } else {
            let g = GRAD3[gi];
            let t = t * t;
            t * t * (f64::from(g[0]) * x + f64::from(g[1]) * y + f64::from(g[2]) * z)
        }
    }

    #[inline]
    fn corner_4d(gi: usize, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let t = 0.5 - x * x - y * y - z * z - w * w;
        if t < 0.0 {
            0.0
        } else {
            let g = GRAD4[gi];
            let t = t * t;
            t * t
                * (f64::from(g[0]) * x
                    + f64::from(g[1]) * y
                    + f64::from(g[2]) * z
                    + f64::from(g[3]) * w)
        }
    }

    /// Sample single-octave 2D simplex noise.
    ///
    /// Returns a value in `[-1, 1]`.
    #[must_use]
    pub fn raw_2d(&self, xin: f64, yin: f64) -> f64 {
        let s = (xin + yin) * F2;
        let (i, ii) = lattice(xin + s);
        let (j, jj) = lattice(yin + s);
        let t = (i + j) * G2;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);

        // Lower triangle (x first) or upper triangle (y first)
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - offset(i1) + G2;
        let y1 = y0 - offset(j1) + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let gi0 = self.p12(ii + self.p(jj));
        let gi1 = self.p12(ii + i1 + self.p(jj + j1));
        let gi2 = self.p12(ii + 1 + self.p(jj + 1));

        let n0 = Self::corner_2d(gi0, x0, y0);
        let n1 = Self::corner_2d(gi1, x1, y1);
        let n2 = Self::corner_2d(gi2, x2, y2);

        NORM_2D * (n0 + n1 + n2)
    }

    /// Sample single-octave 3D simplex noise.
    ///
    /// Returns a value in `[-1, 1]`.
    #[must_use]
    #[allow(clippy::many_single_char_names, reason = "textbook variable names")]
    pub fn raw_3d(&self, xin: f64, yin: f64, zin: f64) -> f64 {
        let s = (xin + yin + zin) * F3;
        let (i, ii) = lattice(xin + s);
        let (j, jj) = lattice(yin + s);
        let (k, kk) = lattice(zin + s);
        let t = (i + j + k) * G3;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);
        let z0 = zin - (k - t);

        // Determine which simplex tetrahedron we're in
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let x1 = x0 - offset(i1) + G3;
        let y1 = y0 - offset(j1) + G3;
        let z1 = z0 - offset(k1) + G3;
        let x2 = x0 - offset(i2) + 2.0 * G3;
        let y2 = y0 - offset(j2) + 2.0 * G3;
        let z2 = z0 - offset(k2) + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let gi0 = self.p12(ii + self.p(jj + self.p(kk)));
        let gi1 = self.p12(ii + i1 + self.p(jj + j1 + self.p(kk + k1)));
        let gi2 = self.p12(ii + i2 + self.p(jj + j2 + self.p(kk + k2)));
        let gi3 = self.p12(ii + 1 + self.p(jj + 1 + self.p(kk + 1)));

        let n0 = Self::corner_3d(gi0, x0, y0, z0);
        let n1 = Self::corner_3d(gi1, x1, y1, z1);
        let n2 = Self::corner_3d(gi2, x2, y2, z2);
        let n3 = Self::corner_3d(gi3, x3, y3, z3);

        NORM_3D * (n0 + n1 + n2 + n3)
    }

    /// Sample single-octave 4D simplex noise.
    ///
    /// Returns a value in `[-1, 1]`.
    #[must_use]
    #[allow(
        clippy::many_single_char_names,
        clippy::similar_names,
        clippy::too_many_lines,
        reason = "textbook variable names"
    )]
    pub fn raw_4d(&self, xin: f64, yin: f64, zin: f64, win: f64) -> f64 {
        let s = (xin + yin + zin + win) * F4;
        let (i, ii) = lattice(xin + s);
        let (j, jj) = lattice(yin + s);
        let (k, kk) = lattice(zin + s);
        let (l, ll) = lattice(win + s);
        let t = (i + j + k + l) * G4;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);
        let z0 = zin - (k - t);
        let w0 = win - (l - t);

        // Rank each coordinate by six pairwise comparisons; rank 3 is the largest.
        let mut rank = [0usize; 4];
        let coords = [x0, y0, z0, w0];
        for a in 0..4 {
            for b in (a + 1)..4 {
                if coords[a] > coords[b] {
                    rank[a] += 1;
                } else {
                    rank[b] += 1;
                }
            }
        }

        // Corners are entered in order of decreasing coordinate magnitude.
        let step = |threshold: usize| rank.map(|r| usize::from(r >= threshold));
        let [i1, j1, k1, l1] = step(3);
        let [i2, j2, k2, l2] = step(2);
        let [i3, j3, k3, l3] = step(1);

        let x1 = x0 - offset(i1) + G4;
        let y1 = y0 - offset(j1) + G4;
        let z1 = z0 - offset(k1) + G4;
        let w1 = w0 - offset(l1) + G4;
        let x2 = x0 - offset(i2) + 2.0 * G4;
        let y2 = y0 - offset(j2) + 2.0 * G4;
        let z2 = z0 - offset(k2) + 2.0 * G4;
        let w2 = w0 - offset(l2) + 2.0 * G4;
        let x3 = x0 - offset(i3) + 3.0 * G4;
        let y3 = y0 - offset(j3) + 3.0 * G4;
        let z3 = z0 - offset(k3) + 3.0 * G4;
        let w3 = w0 - offset(l3) + 3.0 * G4;
        let x4 = x0 - 1.0 + 4.0 * G4;
        let y4 = y0 - 1.0 + 4.0 * G4;
        let z4 = z0 - 1.0 + 4.0 * G4;
        let w4 = w0 - 1.0 + 4.0 * G4;

        let hash = |a: usize, b: usize, c: usize, d: usize| {
            self.p(ii + a + self.p(jj + b + self.p(kk + c + self.p(ll + d)))) % 32
        };
        let gi0 = hash(0, 0, 0, 0);
        let gi1 = hash(i1, j1, k1, l1);
        let gi2 = hash(i2, j2, k2, l2);
        let gi3 = hash(i3, j3, k3, l3);
        let gi4 = hash(1, 1, 1, 1);

        let n0 = Self::corner_4d(gi0, x0, y0, z0, w0);
        let n1 = Self::corner_4d(gi1, x1, y1, z1, w1);
        let n2 = Self::corner_4d(gi2, x2, y2, z2, w2);
        let n3 = Self::corner_4d(gi3, x3, y3, z3, w3);
        let n4 = Self::corner_4d(gi4, x4, y4, z4, w4);

        NORM_4D * (n0 + n1 + n2 + n3 + n4)
    }

    /// Sum `config.octaves` octaves of `sample(frequency)`, normalize by the
    /// total amplitude and apply the output range.
    #[inline]
    fn fractal(&self, sample: impl Fn(f64) -> f64) -> f64 {
        let mut amplitude = self.config.amplitude;
        let mut frequency = self.config.frequency;
        let mut max_amplitude = 0.0;
        let mut noise = 0.0;

        for _ in 0..self.config.octaves {
            noise += sample(frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= self.config.persistence;
            frequency *= 2.0;
        }

        self.scale(noise / max_amplitude)
    }

    #[inline]
    fn scale(&self, value: f64) -> f64 {
        match &self.config.output_range {
            Some(range) => range.rescale(value),
            None => value,
        }
    }

    /// Sample multi-octave 2D noise, rescaled into the configured output range.
    #[must_use]
    pub fn fractal_2d(&self, x: f64, y: f64) -> f64 {
        self.fractal(|f| self.raw_2d(x * f, y * f))
    }

    /// Sample multi-octave 3D noise, rescaled into the configured output range.
    #[must_use]
    pub fn fractal_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.fractal(|f| self.raw_3d(x * f, y * f, z * f))
    }

    /// Sample multi-octave 4D noise, rescaled into the configured output range.
    #[must_use]
    pub fn fractal_4d(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.fractal(|f| self.raw_4d(x * f, y * f, z * f, w * f))
    }

    /// Sample 2D noise that wraps horizontally with period `circumference`.
    ///
    /// The x axis is bent around a cylinder and the field sampled in 3D.
    #[must_use]
    pub fn cylindrical_2d(&self, circumference: f64, x: f64, y: f64) -> f64 {
        let (a, b) = cylinder(circumference, x);
        self.fractal_3d(a, b, y)
    }

    /// Sample 3D noise that wraps along x with period `circumference`.
    #[must_use]
    pub fn cylindrical_3d(&self, circumference: f64, x: f64, y: f64, z: f64) -> f64 {
        let (a, b) = cylinder(circumference, x);
        self.fractal_4d(a, b, y, z)
    }

    /// Sample 2D noise mapped onto a sphere: x is longitude over
    /// `circumference`, y is latitude over half of it.
    #[must_use]
    pub fn spherical_2d(&self, circumference: f64, x: f64, y: f64) -> f64 {
        let (a, b, d) = sphere(circumference, x, y);
        self.fractal_3d(a, b, d)
    }

    /// Spherical mapping of x/y with an extra linear `z` axis.
    #[must_use]
    pub fn spherical_3d(&self, circumference: f64, x: f64, y: f64, z: f64) -> f64 {
        let (a, b, d) = sphere(circumference, x, y);
        self.fractal_4d(a, b, d, z)
    }
}

/// The lattice cell containing `value`, both as a float for the unskew and
/// as a permutation index reduced to `0..256`.
///
/// Stays in floating point so coordinates far beyond the `i32` range neither
/// overflow nor saturate.
#[inline]
fn lattice(value: f64) -> (f64, usize) {
    let cell = value.floor();
    (cell, cell.rem_euclid(256.0) as usize)
}

#[inline]
fn offset(step: usize) -> f64 {
    if step == 0 { 0.0 } else { 1.0 }
}

fn cylinder(circumference: f64, x: f64) -> (f64, f64) {
    let angle = x / circumference * 2.0 * PI;
    let radius = circumference / (2.0 * PI);
    (radius * angle.sin(), radius * angle.cos())
}

fn sphere(circumference: f64, x: f64, y: f64) -> (f64, f64, f64) {
    let longitude = x / circumference * 2.0 * PI;
    let latitude = y / circumference * PI;
    let sin_lat = (latitude + PI).sin();
    let radius = 2.0 * PI;
    (
        radius * longitude.sin() * sin_lat,
        radius * longitude.cos() * sin_lat,
        radius * latitude.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Arc4Random;

    fn field(seed: &str, config: NoiseConfig) -> SimplexNoise {
        let mut rng = Arc4Random::from_seed(seed);
        SimplexNoise::new(config, &mut rng).unwrap()
    }

    #[test]
    fn test_simplex_noise_deterministic() {
        let noise1 = field("asdf", NoiseConfig::default());
        let noise2 = field("asdf", NoiseConfig::default());

        for i in 0..10 {
            let x = f64::from(i) * 13.7;
            let z = f64::from(i) * 7.3;
            assert_eq!(
                noise1.raw_2d(x, z).to_bits(),
                noise2.raw_2d(x, z).to_bits()
            );
            assert_eq!(
                noise1.raw_3d(x, z, x).to_bits(),
                noise2.raw_3d(x, z, x).to_bits()
            );
            assert_eq!(
                noise1.raw_4d(x, z, x, z).to_bits(),
                noise2.raw_4d(x, z, x, z).to_bits()
            );
        }
    }

    #[test]
    fn test_permutation_is_a_permutation() {
        let noise = field("perm", NoiseConfig::default());
        let mut first: Vec<u8> = noise.perm[..256].to_vec();
        first.sort_unstable();
        let identity: Vec<u8> = (0..=255).collect();
        assert_eq!(first, identity);
        assert_eq!(noise.perm[..256], noise.perm[256..]);
        assert!(noise.perm_mod12.iter().all(|&v| v < 12));
    }

    #[test]
    fn test_different_seeds_give_different_fields() {
        let a = field("one", NoiseConfig::default());
        let b = field("two", NoiseConfig::default());
        let differs = (0..50).any(|i| {
            let x = f64::from(i) * 0.37;
            (a.raw_2d(x, x * 0.5) - b.raw_2d(x, x * 0.5)).abs() > 1e-9
        });
        assert!(differs);
    }

    #[test]
    fn test_raw_noise_is_bounded() {
        let noise = field("bounds", NoiseConfig::default());
        let mut rng = Arc4Random::from_seed("coords");
        let mut coord = || rng.next_f64() * 2000.0 - 1000.0;
        for _ in 0..100_000 {
            let (x, y, z, w) = (coord(), coord(), coord(), coord());
            let v2 = noise.raw_2d(x, y);
            let v3 = noise.raw_3d(x, y, z);
            let v4 = noise.raw_4d(x, y, z, w);
            assert!((-1.001..=1.001).contains(&v2), "2D out of range: {v2}");
            assert!((-1.001..=1.001).contains(&v3), "3D out of range: {v3}");
            assert!((-1.001..=1.001).contains(&v4), "4D out of range: {v4}");
        }
    }

    #[test]
    fn test_raw_noise_far_from_origin() {
        let noise = field("far", NoiseConfig::default());
        for c in [1.5e9, -1.5e9, 1e10, -1e10, 1e300] {
            for v in [
                noise.raw_2d(c, c),
                noise.raw_2d(c, -c),
                noise.raw_3d(c, -c, c),
                noise.raw_4d(c, c, -c, c),
            ] {
                assert!((-1.001..=1.001).contains(&v), "out of range at {c}: {v}");
            }
        }
    }

    #[test]
    fn test_many_octaves_stay_in_range() {
        let config = NoiseConfig::default()
            .with_frequency(0.002)
            .with_octaves(32)
            .with_output_range(0.0, 255.0);
        let noise = field("octaves", config);
        for (x, y) in [(511.0, 511.0), (0.0, 0.0), (-511.0, 37.0)] {
            let v = noise.fractal_2d(x, y);
            assert!((-0.1..=255.1).contains(&v), "fractal out of range: {v}");
            assert!(noise.fractal_3d(x, y, 1.0).is_finite());
            assert!(noise.fractal_4d(x, y, 1.0, -1.0).is_finite());
        }
    }

    #[test]
    fn test_lattice_wraps_into_permutation() {
        assert_eq!(lattice(3.7), (3.0, 3));
        assert_eq!(lattice(-0.5), (-1.0, 255));
        assert_eq!(lattice(-256.0), (-256.0, 0));
        assert_eq!(lattice(1e10 + 0.25), (1e10, 0));
    }

    #[test]
    fn test_simplex_2d_spatial_variation() {
        let noise = field("variation", NoiseConfig::default());

        let values: Vec<f64> = (0..20)
            .map(|i| noise.raw_2d(f64::from(i) * 0.5, f64::from(i) * 0.3))
            .collect();

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(max - min > 0.01, "2D simplex should have spatial variation");
    }

    #[test]
    fn test_single_octave_fractal_equals_scaled_raw() {
        let config = NoiseConfig::default().with_output_range(0.0, 255.0);
        let noise = field("fractal", config);
        let range = config.output_range.unwrap();
        for i in 0..100 {
            let x = f64::from(i) * 1.37;
            let y = f64::from(i) * -0.71;
            assert_eq!(
                noise.fractal_2d(x, y).to_bits(),
                range.rescale(noise.raw_2d(x, y)).to_bits()
            );
        }
    }

    #[test]
    fn test_fractal_without_range_stays_normalized() {
        let config = NoiseConfig::default()
            .with_octaves(6)
            .with_frequency(0.01);
        let noise = field("normalized", config);
        for i in 0..1000 {
            let x = f64::from(i) * 3.1;
            let y = f64::from(i) * 1.7;
            let v = noise.fractal_2d(x, y);
            assert!((-1.001..=1.001).contains(&v), "fractal out of range: {v}");
        }
    }

    #[test]
    fn test_fractal_respects_output_range() {
        let config = NoiseConfig::default()
            .with_octaves(4)
            .with_frequency(0.05)
            .with_output_range(-20.0, 40.0);
        let noise = field("range", config);
        for i in 0..1000 {
            let x = f64::from(i) * 0.9;
            let v3 = noise.fractal_3d(x, -x, x * 0.5);
            let v4 = noise.fractal_4d(x, -x, x * 0.5, 2.0);
            assert!((-20.1..=40.1).contains(&v3), "3D out of range: {v3}");
            assert!((-20.1..=40.1).contains(&v4), "4D out of range: {v4}");
        }
    }

    #[test]
    fn test_invalid_config_fails_construction() {
        let mut rng = Arc4Random::from_seed("bad");
        let config = NoiseConfig::default().with_output_range(1.0, 0.0);
        assert!(matches!(
            SimplexNoise::new(config, &mut rng),
            Err(NoiseConfigError::InvalidOutputRange { .. })
        ));
    }

    #[test]
    fn test_cylindrical_wraps_horizontally() {
        let noise = field("cylinder", NoiseConfig::default());
        let c = 64.0;
        for i in 0..32 {
            let x = f64::from(i) * 1.5;
            let y = f64::from(i) * 0.25;
            let a = noise.cylindrical_2d(c, x, y);
            let b = noise.cylindrical_2d(c, x + c, y);
            assert!((a - b).abs() < 1e-9, "cylinder seam at x={x}: {a} vs {b}");
            let a3 = noise.cylindrical_3d(c, x, y, 1.0);
            let b3 = noise.cylindrical_3d(c, x + c, y, 1.0);
            assert!((a3 - b3).abs() < 1e-9);
        }
    }

    #[test]
    fn test_spherical_wraps_longitude() {
        let noise = field("sphere", NoiseConfig::default());
        let c = 128.0;
        for i in 0..32 {
            let x = f64::from(i) * 3.0;
            let y = f64::from(i) * 2.0;
            let a = noise.spherical_2d(c, x, y);
            let b = noise.spherical_2d(c, x + c, y);
            assert!(a.is_finite());
            assert!((a - b).abs() < 1e-9, "sphere seam at x={x}: {a} vs {b}");
            assert!(noise.spherical_3d(c, x, y, 0.5).is_finite());
        }
    }
}
