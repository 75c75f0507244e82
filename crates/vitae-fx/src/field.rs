#![forbid(unsafe_code)]

//! The shape field: placement and per-tick motion.
//!
//! Shapes are laid out on a golden-angle spiral around the canvas centre and
//! then drift around their home positions following smooth noise. All
//! randomness comes from a ChaCha stream seeded by [`FieldConfig::seed`], so
//! `(size, config)` fully determines the initial sequence and every later
//! tick.
//!
//! # Invariants
//!
//! - After a tick, every shape's position lies within
//!   `[-size, width + size] × [-size, height + size]` (its own size).
//! - After a tick, `scale ∈ [1 − amplitude, 1 + amplitude]`.
//! - A shape's update reads only that shape; order is creation order.
//! - An invalid configuration produces no shapes at all.

use crate::noise::ValueNoise;
use crate::palette::Palette;
use crate::shape::{MAX_DRIFT, Shape, ShapeKind};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use std::f64::consts::TAU;
use std::fmt;
use vitae_core::geometry::{CanvasSize, Point};

/// φ, used for the spiral's angular step.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Spiral radius as a fraction of the shorter canvas side.
const SPIRAL_EXTENT: f64 = 0.45;

/// Largest accepted population.
pub const MAX_SHAPES: usize = 10_000;

/// Uniform jitter applied to each home coordinate.
const HOME_JITTER: f64 = 50.0;

/// Rejected field input.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Width or height is non-finite or not strictly positive.
    InvalidDimensions { width: f64, height: f64 },
    /// Shape count below zero or above [`MAX_SHAPES`].
    InvalidShapeCount { count: i64 },
    /// A tuning parameter outside its domain.
    InvalidParameter { name: &'static str, value: f64 },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid canvas dimensions {width}x{height}")
            }
            Self::InvalidShapeCount { count } => {
                write!(f, "shape count must be within 0..={MAX_SHAPES}, got {count}")
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid value for {name}: {value}")
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// Tuning parameters for the field. Any change requires re-initialization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldConfig {
    pub seed: u64,
    pub shape_count: usize,
    /// Multiplier on drift displacement and rotation. `0` freezes motion.
    pub drift_speed: f64,
    /// Noise-space advance per tick.
    pub noise_scale: f64,
    /// Breathing phase advance per tick, in radians.
    pub breathing_rate: f64,
    /// Probability in `[0, 1]` of the accent outline.
    pub accent_probability: f64,
    pub palette: Palette,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            shape_count: 40,
            drift_speed: 0.5,
            noise_scale: 0.003,
            breathing_rate: 0.02,
            accent_probability: 0.15,
            palette: Palette::CV,
        }
    }
}

impl FieldConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_shape_count(mut self, count: usize) -> Self {
        self.shape_count = count;
        self
    }

    /// Set the shape count from a signed value, rejecting anything outside
    /// `0..=MAX_SHAPES`.
    pub fn try_with_shape_count(self, count: i64) -> Result<Self, FieldError> {
        let count_usize = usize::try_from(count)
            .ok()
            .filter(|&n| n <= MAX_SHAPES)
            .ok_or(FieldError::InvalidShapeCount { count })?;
        Ok(self.with_shape_count(count_usize))
    }

    #[must_use]
    pub fn with_drift_speed(mut self, speed: f64) -> Self {
        self.drift_speed = speed;
        self
    }

    #[must_use]
    pub fn with_noise_scale(mut self, scale: f64) -> Self {
        self.noise_scale = scale;
        self
    }

    #[must_use]
    pub fn with_breathing_rate(mut self, rate: f64) -> Self {
        self.breathing_rate = rate;
        self
    }

    #[must_use]
    pub fn with_accent_probability(mut self, probability: f64) -> Self {
        self.accent_probability = probability;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Check every tuning parameter against its domain.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.shape_count > MAX_SHAPES {
            return Err(FieldError::InvalidShapeCount {
                count: i64::try_from(self.shape_count).unwrap_or(i64::MAX),
            });
        }
        let checks: [(&'static str, f64, bool); 4] = [
            (
                "drift_speed",
                self.drift_speed,
                self.drift_speed.is_finite() && self.drift_speed >= 0.0,
            ),
            ("noise_scale", self.noise_scale, self.noise_scale.is_finite()),
            (
                "breathing_rate",
                self.breathing_rate,
                self.breathing_rate.is_finite(),
            ),
            (
                "accent_probability",
                self.accent_probability,
                (0.0..=1.0).contains(&self.accent_probability),
            ),
        ];
        match checks.into_iter().find(|(_, _, ok)| !ok) {
            Some((name, value, _)) => Err(FieldError::InvalidParameter { name, value }),
            None => Ok(()),
        }
    }
}

fn check_size(size: CanvasSize) -> Result<(), FieldError> {
    if size.is_valid() {
        Ok(())
    } else {
        Err(FieldError::InvalidDimensions {
            width: size.width,
            height: size.height,
        })
    }
}

/// Build the initial shape sequence.
///
/// Per shape, the random draws happen in a fixed order (jitter x, jitter y,
/// kind, size, outline, noise offsets, rotation, rotation speed, breath
/// phase, breath amplitude) so sequences stay reproducible across releases.
pub fn initialize_shapes(size: CanvasSize, config: &FieldConfig) -> Result<Vec<Shape>, FieldError> {
    config.validate()?;
    check_size(size)?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let count = config.shape_count;
    let center = size.center();
    let extent = size.min_side() * SPIRAL_EXTENT;
    let angle_step = TAU * GOLDEN_RATIO;

    let mut shapes = Vec::with_capacity(count);
    for i in 0..count {
        let angle = i as f64 * angle_step;
        let radius = (i as f64 / count as f64).sqrt() * extent;
        let jitter_x = rng.random_range(-HOME_JITTER..HOME_JITTER);
        let jitter_y = rng.random_range(-HOME_JITTER..HOME_JITTER);
        let home = Point::new(
            center.x + angle.cos() * radius + jitter_x,
            center.y + angle.sin() * radius + jitter_y,
        );

        let kind = ShapeKind::from_unit(rng.random::<f64>());
        let shape_size = rng.random_range(kind.size_range());
        let outline = config
            .palette
            .outline_for(rng.random::<f64>(), config.accent_probability);
        let noise_offset_x = rng.random_range(0.0..1000.0);
        let noise_offset_y = rng.random_range(0.0..1000.0);
        let rotation = rng.random_range(0.0..TAU);
        let rotation_speed = rng.random_range(-0.01..0.01) * (20.0 / shape_size);
        let breath_phase = rng.random_range(0.0..TAU);
        let breath_amplitude = rng.random_range(0.05..0.15);

        shapes.push(Shape {
            home,
            position: home,
            kind,
            size: shape_size,
            outline,
            noise_offset_x,
            noise_offset_y,
            rotation,
            rotation_speed,
            breath_phase,
            breath_amplitude,
            scale: 1.0,
        });
    }
    Ok(shapes)
}

/// Wrap one coordinate to the opposite padded edge.
#[inline]
fn wrap_axis(v: f64, extent: f64, pad: f64) -> f64 {
    if v < -pad {
        extent + pad
    } else if v > extent + pad {
        -pad
    } else {
        v
    }
}

/// Advance every shape to tick `t`.
///
/// Position is recomputed from home each tick rather than integrated, so a
/// tick is a pure function of `t` for everything except `rotation`.
pub fn tick_shapes(
    shapes: &mut [Shape],
    t: u64,
    config: &FieldConfig,
    size: CanvasSize,
    noise: &ValueNoise,
) {
    let t = t as f64;
    let noise_t = t * config.noise_scale;
    let breath_t = t * config.breathing_rate;

    for shape in shapes.iter_mut() {
        let nx = noise.sample(shape.noise_offset_x + noise_t);
        let ny = noise.sample(shape.noise_offset_y + noise_t);
        let drift_x = -MAX_DRIFT + nx * 2.0 * MAX_DRIFT;
        let drift_y = -MAX_DRIFT + ny * 2.0 * MAX_DRIFT;

        let x = shape.home.x + drift_x * config.drift_speed;
        let y = shape.home.y + drift_y * config.drift_speed;
        shape.position = Point::new(
            wrap_axis(x, size.width, shape.size),
            wrap_axis(y, size.height, shape.size),
        );

        shape.rotation += shape.rotation_speed * config.drift_speed;
        shape.scale = 1.0 + (shape.breath_phase + breath_t).sin() * shape.breath_amplitude;
    }
}

/// Owned field state: the shape sequence, its noise source and the tick
/// counter.
#[derive(Debug, Clone)]
pub struct ShapeField {
    size: CanvasSize,
    config: FieldConfig,
    noise: ValueNoise,
    shapes: Vec<Shape>,
    elapsed: u64,
}

impl ShapeField {
    /// Validate and initialize a new field.
    pub fn new(size: CanvasSize, config: FieldConfig) -> Result<Self, FieldError> {
        let shapes = initialize_shapes(size, &config)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "vitae::field",
            shapes = shapes.len(),
            width = size.width,
            height = size.height,
            seed = config.seed,
            "field initialized"
        );
        Ok(Self {
            size,
            noise: ValueNoise::new(config.seed),
            config,
            shapes,
            elapsed: 0,
        })
    }

    /// Advance one tick.
    pub fn tick(&mut self) {
        tick_shapes(
            &mut self.shapes,
            self.elapsed,
            &self.config,
            self.size,
            &self.noise,
        );
        self.elapsed = self.elapsed.saturating_add(1);
    }

    /// Re-initialize for new dimensions; the tick counter restarts at 0.
    ///
    /// On error the field is left empty.
    pub fn resize(&mut self, size: CanvasSize) -> Result<(), FieldError> {
        self.size = size;
        self.rebuild()
    }

    /// Replace the configuration and re-initialize.
    ///
    /// The new configuration is validated first; on error nothing changes.
    pub fn reconfigure(&mut self, config: FieldConfig) -> Result<(), FieldError> {
        config.validate()?;
        if config.seed != self.config.seed {
            self.noise = ValueNoise::new(config.seed);
        }
        self.config = config;
        self.rebuild()
    }

    /// Re-initialize with a different population, keeping everything else.
    pub fn set_shape_count(&mut self, count: usize) -> Result<(), FieldError> {
        let config = self.config.clone().with_shape_count(count);
        self.reconfigure(config)
    }

    fn rebuild(&mut self) -> Result<(), FieldError> {
        self.elapsed = 0;
        match initialize_shapes(self.size, &self.config) {
            Ok(shapes) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    target: "vitae::field",
                    shapes = shapes.len(),
                    width = self.size.width,
                    height = self.size.height,
                    "field rebuilt"
                );
                self.shapes = shapes;
                Ok(())
            }
            Err(err) => {
                self.shapes.clear();
                Err(err)
            }
        }
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Ticks since the last (re)initialization.
    #[inline]
    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
