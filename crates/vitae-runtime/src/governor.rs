#![forbid(unsafe_code)]

//! Frame governor: per-tick timing, per-second FPS aggregation and
//! periodic reporting.
//!
//! # Model
//!
//! The host calls [`FrameGovernor::observe`] exactly once per rendered frame
//! with a monotonic timestamp, before the next frame's tick/render.
//!
//! - Every call counts one frame. A call whose delta from the previous call
//!   exceeds `target_frame × dropped_factor` also counts one dropped frame.
//! - Calls are tallied per aggregate period. Once at least
//!   `aggregate_interval` has passed since the last aggregate, the period's
//!   FPS `round(ticks × 1000 / elapsed_ms)` is pushed into a bounded FIFO
//!   window (oldest evicted at capacity). The call that closes a period is
//!   counted in that period.
//! - Each aggregate publishes a snapshot to the sink (if any) and, when the log
//!   interval has elapsed, emits an `info` event on target `vitae::perf`.
//!
//! # States
//!
//! ```text
//! Warming ──(first aggregate)──► Steady
//!    ▲                              │
//!    └──────────── reset ───────────┘
//! ```
//!
//! # Failure Modes
//!
//! | Mode | Behavior |
//! |------|----------|
//! | Timestamp goes backwards | Delta saturates to zero; no drop counted |
//! | No memory introspection | Snapshot memory is `None` (`N/A`) |
//! | No sink | Aggregates still update metrics and the log |

use crate::config::GovernorConfig;
use crate::memory::{MemoryProbe, NoMemoryProbe};
use crate::metrics::{FrameMetrics, GovernorState, MetricsSnapshot};
use crate::sink::MetricsSink;
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// FPS sampler and metrics source.
pub struct FrameGovernor {
    config: GovernorConfig,
    dropped_threshold: Duration,
    window: VecDeque<u32>,
    instantaneous_fps: u32,
    ticks_in_period: u32,
    total_frames: u64,
    dropped_frames: u64,
    last_observe: Duration,
    last_aggregate: Duration,
    last_log: Duration,
    sink: Option<Box<dyn MetricsSink>>,
    memory: Box<dyn MemoryProbe>,
}

impl fmt::Debug for FrameGovernor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameGovernor")
            .field("config", &self.config)
            .field("window", &self.window)
            .field("instantaneous_fps", &self.instantaneous_fps)
            .field("ticks_in_period", &self.ticks_in_period)
            .field("total_frames", &self.total_frames)
            .field("dropped_frames", &self.dropped_frames)
            .field("has_sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

impl FrameGovernor {
    /// Start governing at `now` (the baseline for the first delta).
    pub fn new(config: GovernorConfig, now: Duration) -> Self {
        let capacity = config.window_capacity.max(1);
        Self {
            dropped_threshold: config.dropped_threshold(),
            window: VecDeque::with_capacity(capacity),
            config,
            instantaneous_fps: 0,
            ticks_in_period: 0,
            total_frames: 0,
            dropped_frames: 0,
            last_observe: now,
            last_aggregate: now,
            last_log: now,
            sink: None,
            memory: Box::new(NoMemoryProbe),
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn MetricsSink>) -> Self {
        self.set_sink(sink);
        self
    }

    #[must_use]
    pub fn with_memory_probe(mut self, probe: Box<dyn MemoryProbe>) -> Self {
        self.set_memory_probe(probe);
        self
    }

    pub fn set_memory_probe(&mut self, probe: Box<dyn MemoryProbe>) {
        self.memory = probe;
    }

    /// Install a sink, releasing any previous one.
    pub fn set_sink(&mut self, sink: Box<dyn MetricsSink>) {
        if let Some(mut old) = self.sink.replace(sink) {
            old.release();
        }
    }

    /// Record one frame at `now`.
    ///
    /// Returns the fresh metrics when this call closed an aggregate period.
    pub fn observe(&mut self, now: Duration) -> Option<FrameMetrics> {
        let delta = now.saturating_sub(self.last_observe);
        self.last_observe = now;

        self.total_frames = self.total_frames.saturating_add(1);
        if delta > self.dropped_threshold {
            self.dropped_frames = self.dropped_frames.saturating_add(1);
        }
        self.ticks_in_period = self.ticks_in_period.saturating_add(1);

        let since = now.saturating_sub(self.last_aggregate);
        if since.is_zero() || since < self.config.aggregate_interval {
            return None;
        }

        let elapsed_ms = since.as_secs_f64() * 1000.0;
        let fps = (f64::from(self.ticks_in_period) * 1000.0 / elapsed_ms).round() as u32;
        self.push_sample(fps);
        self.ticks_in_period = 0;
        self.last_aggregate = now;

        let metrics = self.metrics();
        tracing::trace!(
            target: "vitae::perf",
            fps,
            window = self.window.len(),
            "aggregate"
        );

        let log_due = self
            .config
            .log_interval
            .is_some_and(|interval| now.saturating_sub(self.last_log) >= interval);

        if self.sink.is_some() || log_due {
            let snapshot = MetricsSnapshot::new(metrics, self.memory.usage());
            if let Some(sink) = self.sink.as_mut() {
                sink.publish(&snapshot);
            }
            if log_due {
                log_snapshot(&snapshot);
                self.last_log = now;
            }
        }

        Some(metrics)
    }

    fn push_sample(&mut self, fps: u32) {
        let capacity = self.config.window_capacity.max(1);
        while self.window.len() >= capacity {
            self.window.pop_front();
        }
        self.window.push_back(fps);
        self.instantaneous_fps = fps;
    }

    /// Current aggregates. Pure read.
    pub fn metrics(&self) -> FrameMetrics {
        let (average_fps, min_fps) = if self.window.is_empty() {
            (0, 0)
        } else {
            let sum: u64 = self.window.iter().map(|&v| u64::from(v)).sum();
            let avg = (sum as f64 / self.window.len() as f64).round() as u32;
            let min = self.window.iter().copied().min().unwrap_or(0);
            (avg, min)
        };
        FrameMetrics {
            instantaneous_fps: self.instantaneous_fps,
            average_fps,
            min_fps,
            dropped_frames: self.dropped_frames,
            total_frames: self.total_frames,
        }
    }

    /// Metrics plus memory reading and rating.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot::new(self.metrics(), self.memory.usage())
    }

    #[inline]
    pub fn state(&self) -> GovernorState {
        if self.window.is_empty() {
            GovernorState::Warming
        } else {
            GovernorState::Steady
        }
    }

    /// Per-second samples, oldest first.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = u32> + '_ {
        self.window.iter().copied()
    }

    /// Clear the window and counters; timing restarts at `now`.
    pub fn reset(&mut self, now: Duration) {
        self.window.clear();
        self.instantaneous_fps = 0;
        self.ticks_in_period = 0;
        self.total_frames = 0;
        self.dropped_frames = 0;
        self.last_observe = now;
        self.last_aggregate = now;
        self.last_log = now;
        tracing::debug!(target: "vitae::perf", "governor reset");
    }

    /// Release the sink. Idempotent; also runs on drop.
    pub fn shutdown(&mut self) {
        if let Some(mut sink) = self.sink.take() {
            sink.release();
            tracing::debug!(target: "vitae::perf", "metrics sink released");
        }
    }

    #[inline]
    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    #[inline]
    pub fn config(&self) -> &GovernorConfig {
        &self.config
    }
}

impl Drop for FrameGovernor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn log_snapshot(snapshot: &MetricsSnapshot) {
    let m = &snapshot.metrics;
    tracing::info!(
        target: "vitae::perf",
        fps = m.instantaneous_fps,
        avg_fps = m.average_fps,
        min_fps = m.min_fps,
        memory = %snapshot.memory_label(),
        dropped = m.dropped_frames,
        total = m.total_frames,
        dropped_pct = snapshot.dropped_percent,
        rating = snapshot.rating.as_str(),
        "performance metrics"
    );
}
