#![forbid(unsafe_code)]

//! Shape records.

use crate::palette::OutlineStyle;
use vitae_core::geometry::Point;

/// Reference size the per-kind ranges are scaled from.
pub const BASE_SIZE: f64 = 30.0;

/// Maximum displacement from home, in pixels, before `drift_speed` scaling.
pub const MAX_DRIFT: f64 = 60.0;

/// Primitive kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    /// Circle outline; `size` is the diameter.
    Disc,
    /// Centred square with corners rounded at 10% of the side.
    RoundedSquare,
    /// Equilateral triangle, apex up; `size` is the side.
    Triangle,
}

impl ShapeKind {
    /// Map a uniform draw: 40% discs, 30% squares, 30% triangles.
    #[inline]
    pub fn from_unit(u: f64) -> Self {
        if u < 0.4 {
            Self::Disc
        } else if u < 0.7 {
            Self::RoundedSquare
        } else {
            Self::Triangle
        }
    }

    /// Half-open size range for this kind.
    #[inline]
    pub fn size_range(self) -> std::ops::Range<f64> {
        match self {
            Self::Disc => BASE_SIZE * 0.5..BASE_SIZE * 2.0,
            Self::RoundedSquare => BASE_SIZE * 0.7..BASE_SIZE * 1.5,
            Self::Triangle => BASE_SIZE * 0.6..BASE_SIZE * 1.2,
        }
    }

    /// Stable name for logs and snapshots.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disc => "disc",
            Self::RoundedSquare => "rounded_square",
            Self::Triangle => "triangle",
        }
    }
}

/// One animated primitive.
///
/// `home`, `kind`, `size`, `outline`, the noise offsets, `rotation_speed` and
/// the breathing parameters are fixed at construction. `position`, `rotation`
/// and `scale` are rewritten by every tick.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    pub home: Point,
    pub position: Point,
    pub kind: ShapeKind,
    pub size: f64,
    pub outline: OutlineStyle,
    pub noise_offset_x: f64,
    pub noise_offset_y: f64,
    /// Radians.
    pub rotation: f64,
    /// Radians per tick at `drift_speed == 1`.
    pub rotation_speed: f64,
    pub breath_phase: f64,
    pub breath_amplitude: f64,
    pub scale: f64,
}

impl Shape {
    /// Inclusive bounds of `scale`.
    #[inline]
    pub fn scale_bounds(&self) -> (f64, f64) {
        (1.0 - self.breath_amplitude, 1.0 + self.breath_amplitude)
    }
}
