#![forbid(unsafe_code)]

//! Seeded layered value noise.
//!
//! A 4096-entry lattice of uniform values is filled once from the seed.
//! Sampling blends the lattice with cosine interpolation across four octaves,
//! halving the amplitude each octave, so the output lies in `[0, 0.9375]`.
//! Neighbouring inputs give neighbouring outputs, which is what makes the
//! drift look smooth.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use std::f64::consts::PI;

const LATTICE_MASK: usize = 4095;
const Y_WRAP_BITS: u32 = 4;
const Y_WRAP: usize = 1 << Y_WRAP_BITS;
const OCTAVES: u32 = 4;
const FALLOFF: f64 = 0.5;

/// Keeps the noise lattice independent of the shape-parameter stream.
const NOISE_STREAM: u64 = 1;

#[inline]
fn cosine_ease(t: f64) -> f64 {
    0.5 * (1.0 - (t * PI).cos())
}

/// Deterministic smooth noise source.
#[derive(Debug, Clone)]
pub struct ValueNoise {
    lattice: Box<[f64]>,
}

impl ValueNoise {
    /// Build the lattice for `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(NOISE_STREAM);
        let lattice = (0..=LATTICE_MASK).map(|_| rng.random::<f64>()).collect();
        Self { lattice }
    }

    /// One-dimensional sample.
    #[inline]
    pub fn sample(&self, x: f64) -> f64 {
        self.sample2(x, 0.0)
    }

    /// Two-dimensional sample. Negative coordinates are mirrored.
    pub fn sample2(&self, x: f64, y: f64) -> f64 {
        let (x, y) = (sanitize(x), sanitize(y));

        let mut xi = x.floor() as usize;
        let mut yi = y.floor() as usize;
        let mut xf = x - x.floor();
        let mut yf = y - y.floor();

        let mut total = 0.0;
        let mut amplitude = 0.5;

        for _ in 0..OCTAVES {
            let origin = xi.wrapping_add(yi << Y_WRAP_BITS);
            let rx = cosine_ease(xf);
            let ry = cosine_ease(yf);

            let top = self.lerp_row(origin, rx);
            let bottom = self.lerp_row(origin.wrapping_add(Y_WRAP), rx);
            total += (top + ry * (bottom - top)) * amplitude;

            amplitude *= FALLOFF;
            xi <<= 1;
            xf *= 2.0;
            yi <<= 1;
            yf *= 2.0;
            if xf >= 1.0 {
                xi = xi.wrapping_add(1);
                xf -= 1.0;
            }
            if yf >= 1.0 {
                yi = yi.wrapping_add(1);
                yf -= 1.0;
            }
        }
        total
    }

    #[inline]
    fn lerp_row(&self, offset: usize, t: f64) -> f64 {
        let a = self.lattice[offset & LATTICE_MASK];
        let b = self.lattice[offset.wrapping_add(1) & LATTICE_MASK];
        a + t * (b - a)
    }
}

/// Mirror negatives and map non-finite input to the origin.
#[inline]
fn sanitize(v: f64) -> f64 {
    if v.is_finite() { v.abs() } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_values() {
        let a = ValueNoise::new(12345);
        let b = ValueNoise::new(12345);
        for i in 0..200 {
            let x = f64::from(i) * 0.37;
            assert_eq!(a.sample(x), b.sample(x));
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = ValueNoise::new(1);
        let b = ValueNoise::new(2);
        let differs = (0..50).any(|i| a.sample(f64::from(i) * 0.5) != b.sample(f64::from(i) * 0.5));
        assert!(differs);
    }

    #[test]
    fn output_in_unit_interval() {
        let n = ValueNoise::new(7);
        for i in 0..5_000 {
            let x = f64::from(i) * 0.731;
            let v = n.sample2(x, x * 0.5);
            assert!((0.0..1.0).contains(&v), "sample {v} out of range at {x}");
        }
    }

    #[test]
    fn smooth_for_small_steps() {
        let n = ValueNoise::new(99);
        let mut prev = n.sample(500.0);
        for i in 1..1000 {
            let next = n.sample(500.0 + f64::from(i) * 0.003);
            assert!((next - prev).abs() < 0.05);
            prev = next;
        }
    }

    #[test]
    fn non_finite_input_is_safe() {
        let n = ValueNoise::new(3);
        assert_eq!(n.sample(f64::NAN), n.sample(0.0));
        assert_eq!(n.sample(f64::INFINITY), n.sample(0.0));
        assert_eq!(n.sample(-2.5), n.sample(2.5));
    }
}
