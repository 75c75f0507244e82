#![forbid(unsafe_code)]

//! Metric records produced by the governor.

use crate::memory::{MemoryUsage, memory_label};
use crate::rating::{PerformanceRating, dropped_percent};

/// Aggregate frame metrics. All FPS values are whole frames per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameMetrics {
    /// Most recent per-second sample (0 before the first).
    pub instantaneous_fps: u32,
    /// Rounded mean over the sample window (0 if empty).
    pub average_fps: u32,
    /// Minimum over the sample window (0 if empty).
    pub min_fps: u32,
    pub dropped_frames: u64,
    pub total_frames: u64,
}

impl FrameMetrics {
    /// Dropped share of total, rounded to one decimal.
    #[inline]
    pub fn dropped_percent(&self) -> f64 {
        dropped_percent(self.dropped_frames, self.total_frames)
    }

    #[inline]
    pub fn rating(&self) -> PerformanceRating {
        PerformanceRating::classify(self.average_fps, self.dropped_percent())
    }
}

/// Metrics plus the environment readings published to sinks and logs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSnapshot {
    pub metrics: FrameMetrics,
    pub memory: Option<MemoryUsage>,
    pub dropped_percent: f64,
    pub rating: PerformanceRating,
}

impl MetricsSnapshot {
    pub fn new(metrics: FrameMetrics, memory: Option<MemoryUsage>) -> Self {
        Self {
            metrics,
            memory,
            dropped_percent: metrics.dropped_percent(),
            rating: metrics.rating(),
        }
    }

    /// `used/totalMB` or `N/A`.
    pub fn memory_label(&self) -> String {
        memory_label(self.memory)
    }
}

/// Governor lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GovernorState {
    /// No aggregate sample yet.
    Warming,
    /// At least one aggregate sample.
    Steady,
}

impl GovernorState {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warming => "warming",
            Self::Steady => "steady",
        }
    }
}
