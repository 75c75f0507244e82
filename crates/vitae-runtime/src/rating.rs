#![forbid(unsafe_code)]

//! Performance ratings and FPS color tiers.

use std::fmt;

/// Overall health derived from average FPS and the dropped-frame percentage.
///
/// | rating | avg FPS | dropped |
/// |--------|---------|---------|
/// | Excellent | ≥ 55 | < 5% |
/// | Good | ≥ 40 | < 10% |
/// | Fair | ≥ 25 | < 20% |
/// | Poor | otherwise | |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PerformanceRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PerformanceRating {
    pub fn classify(average_fps: u32, dropped_percent: f64) -> Self {
        if average_fps >= 55 && dropped_percent < 5.0 {
            Self::Excellent
        } else if average_fps >= 40 && dropped_percent < 10.0 {
            Self::Good
        } else if average_fps >= 25 && dropped_percent < 20.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    /// Machine-friendly name for structured logs.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor - optimization needed",
        }
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dropped frames as a percentage of total, rounded to one decimal.
///
/// Zero frames yields `0.0`.
pub fn dropped_percent(dropped: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = dropped as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

/// Overlay color band for an FPS value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FpsTier {
    /// ≥55 FPS.
    Green,
    /// 40–54 FPS.
    Yellow,
    /// 25–39 FPS.
    Orange,
    /// <25 FPS.
    Red,
}

impl FpsTier {
    pub fn from_fps(fps: u32) -> Self {
        if fps >= 55 {
            Self::Green
        } else if fps >= 40 {
            Self::Yellow
        } else if fps >= 25 {
            Self::Orange
        } else {
            Self::Red
        }
    }

    /// CSS hex color.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Green => "#00ff00",
            Self::Yellow => "#ffff00",
            Self::Orange => "#ff9900",
            Self::Red => "#ff0000",
        }
    }
}
