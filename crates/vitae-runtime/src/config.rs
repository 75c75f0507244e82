#![forbid(unsafe_code)]

//! Governor configuration.
//!
//! # Environment Variables
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `VITAE_PERF_OVERLAY` | `1`/`true` enables the metrics overlay |
//! | `VITAE_PERF_LOG_INTERVAL_MS` | periodic log interval; `0` disables the log |
//!
//! Unparsable values are ignored and the default is kept.

use std::env;
use std::time::Duration;
use vitae_core::device::parse_flag;

/// Frame-time target the dropped-frame threshold is derived from (60 Hz).
pub const TARGET_FRAME: Duration = Duration::from_micros(16_670);

/// Tuning for [`crate::FrameGovernor`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GovernorConfig {
    /// Nominal frame time. A design constant, not the display refresh rate.
    pub target_frame: Duration,
    /// A tick whose delta exceeds `target_frame × dropped_factor` is dropped.
    pub dropped_factor: f64,
    /// Per-second FPS samples retained.
    pub window_capacity: usize,
    /// Minimum wall time between aggregate updates.
    pub aggregate_interval: Duration,
    /// Periodic structured log; `None` disables it.
    pub log_interval: Option<Duration>,
    /// Whether the host should attach the text overlay.
    pub overlay: bool,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            target_frame: TARGET_FRAME,
            dropped_factor: 1.5,
            window_capacity: 60,
            aggregate_interval: Duration::from_millis(1000),
            log_interval: Some(Duration::from_millis(5000)),
            overlay: false,
        }
    }
}

impl GovernorConfig {
    /// Defaults layered with the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults layered with values read through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(flag) = lookup("VITAE_PERF_OVERLAY").as_deref().and_then(parse_flag) {
            config.overlay = flag;
        }
        if let Some(ms) = lookup("VITAE_PERF_LOG_INTERVAL_MS").and_then(|v| v.trim().parse::<u64>().ok()) {
            config.log_interval = (ms > 0).then(|| Duration::from_millis(ms));
        }
        config
    }

    #[must_use]
    pub fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }

    #[must_use]
    pub fn with_log_interval(mut self, interval: Option<Duration>) -> Self {
        self.log_interval = interval;
        self
    }

    #[must_use]
    pub fn with_window_capacity(mut self, capacity: usize) -> Self {
        self.window_capacity = capacity.max(1);
        self
    }

    /// Deltas strictly above this count as dropped (25.005 ms by default).
    #[inline]
    pub fn dropped_threshold(&self) -> Duration {
        let nanos = self.target_frame.as_nanos() as f64 * self.dropped_factor.max(0.0);
        Duration::from_nanos(nanos.round() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = GovernorConfig::default();
        assert_eq!(c.window_capacity, 60);
        assert_eq!(c.aggregate_interval, Duration::from_secs(1));
        assert_eq!(c.log_interval, Some(Duration::from_secs(5)));
        assert!(!c.overlay);
        assert_eq!(c.dropped_threshold(), Duration::from_micros(25_005));
    }

    #[test]
    fn lookup_layers_over_defaults() {
        let c = GovernorConfig::from_lookup(|key| match key {
            "VITAE_PERF_OVERLAY" => Some("on".into()),
            "VITAE_PERF_LOG_INTERVAL_MS" => Some("2500".into()),
            _ => None,
        });
        assert!(c.overlay);
        assert_eq!(c.log_interval, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn zero_interval_disables_log() {
        let c = GovernorConfig::from_lookup(|key| {
            (key == "VITAE_PERF_LOG_INTERVAL_MS").then(|| "0".to_string())
        });
        assert_eq!(c.log_interval, None);
    }

    #[test]
    fn garbage_is_ignored() {
        let c = GovernorConfig::from_lookup(|_| Some("banana".into()));
        assert_eq!(c, GovernorConfig::default());
    }

    #[test]
    fn capacity_never_zero() {
        assert_eq!(GovernorConfig::default().with_window_capacity(0).window_capacity, 1);
    }
}
