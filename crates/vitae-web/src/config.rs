#![forbid(unsafe_code)]

//! Host configuration.
//!
//! `HostConfig::from_env` layers these variables over the defaults:
//!
//! | variable | effect |
//! |---|---|
//! | `VITAE_SEED` | field seed (`u64`) |
//! | `VITAE_SHAPE_COUNT` | fixed shape count; switches off the recommended count |
//! | `VITAE_DRIFT_SPEED` | drift speed multiplier |
//! | `VITAE_ADAPTIVE` | enables the closed-loop shape budget |
//! | `VITAE_CONNECTIONS` | draws links between nearby shapes |
//!
//! plus the governor variables read by [`GovernorConfig::from_lookup`].
//! Unparseable values are logged and ignored.

use std::env;

use vitae_core::device::parse_flag;
use vitae_fx::{FieldConfig, LinkParams, RenderOptions};
use vitae_runtime::{AdaptiveConfig, GovernorConfig};

/// Where the initial shape count comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeCountSource {
    /// The device recommendation table.
    #[default]
    Recommended,
    /// `FieldConfig::shape_count` as given.
    Configured,
}

/// Everything `start` needs besides the surface, clock and device.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub field: FieldConfig,
    pub governor: GovernorConfig,
    pub render: RenderOptions,
    pub links: LinkParams,
    pub shape_count: ShapeCountSource,
    /// Draw links between nearby shapes. Off by default; the device
    /// recommendation can still veto it.
    pub connections: bool,
    /// Closed-loop shape budget; `None` keeps the count fixed.
    pub adaptive: Option<AdaptiveConfig>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            governor: GovernorConfig::default(),
            render: RenderOptions::default(),
            links: LinkParams::default(),
            shape_count: ShapeCountSource::Recommended,
            connections: false,
            adaptive: None,
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            governor: GovernorConfig::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(raw) = lookup("VITAE_SEED") {
            match raw.trim().parse::<u64>() {
                Ok(seed) => config.field.seed = seed,
                Err(_) => ignored("VITAE_SEED", &raw),
            }
        }
        if let Some(raw) = lookup("VITAE_SHAPE_COUNT") {
            match raw.trim().parse::<i64>() {
                Ok(count) => match config.field.clone().try_with_shape_count(count) {
                    Ok(field) => {
                        config.field = field;
                        config.shape_count = ShapeCountSource::Configured;
                    }
                    Err(err) => {
                        tracing::warn!(target: "vitae::host", %err, "ignoring VITAE_SHAPE_COUNT");
                    }
                },
                Err(_) => ignored("VITAE_SHAPE_COUNT", &raw),
            }
        }
        if let Some(raw) = lookup("VITAE_DRIFT_SPEED") {
            match raw.trim().parse::<f64>() {
                Ok(speed) if speed.is_finite() && speed >= 0.0 => config.field.drift_speed = speed,
                _ => ignored("VITAE_DRIFT_SPEED", &raw),
            }
        }
        if let Some(raw) = lookup("VITAE_ADAPTIVE") {
            match parse_flag(&raw) {
                Some(true) => config.adaptive = Some(AdaptiveConfig::default()),
                Some(false) => config.adaptive = None,
                None => ignored("VITAE_ADAPTIVE", &raw),
            }
        }
        if let Some(raw) = lookup("VITAE_CONNECTIONS") {
            match parse_flag(&raw) {
                Some(on) => config.connections = on,
                None => ignored("VITAE_CONNECTIONS", &raw),
            }
        }
        config
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.field = field;
        self
    }

    /// Use `count` shapes regardless of the device recommendation.
    #[must_use]
    pub fn with_fixed_shape_count(mut self, count: usize) -> Self {
        self.field.shape_count = count;
        self.shape_count = ShapeCountSource::Configured;
        self
    }

    #[must_use]
    pub fn with_governor(mut self, governor: GovernorConfig) -> Self {
        self.governor = governor;
        self
    }

    #[must_use]
    pub fn with_connections(mut self, connections: bool) -> Self {
        self.connections = connections;
        self
    }

    #[must_use]
    pub fn with_adaptive(mut self, adaptive: Option<AdaptiveConfig>) -> Self {
        self.adaptive = adaptive;
        self
    }
}

fn ignored(key: &str, raw: &str) {
    tracing::warn!(target: "vitae::host", key, value = raw, "ignoring unparseable setting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(HostConfig::from_lookup(|_| None), HostConfig::default());
    }

    #[test]
    fn field_variables_are_layered() {
        let config = HostConfig::from_lookup(lookup(&[
            ("VITAE_SEED", "99"),
            ("VITAE_SHAPE_COUNT", " 12 "),
            ("VITAE_DRIFT_SPEED", "1.5"),
            ("VITAE_ADAPTIVE", "on"),
            ("VITAE_CONNECTIONS", "1"),
        ]));
        assert_eq!(config.field.seed, 99);
        assert_eq!(config.field.shape_count, 12);
        assert_eq!(config.shape_count, ShapeCountSource::Configured);
        assert_eq!(config.field.drift_speed, 1.5);
        assert_eq!(config.adaptive, Some(AdaptiveConfig::default()));
        assert!(config.connections);
    }

    #[test]
    fn governor_variables_pass_through() {
        let config = HostConfig::from_lookup(lookup(&[
            ("VITAE_PERF_OVERLAY", "1"),
            ("VITAE_PERF_LOG_INTERVAL_MS", "0"),
        ]));
        assert!(config.governor.overlay);
        assert_eq!(config.governor.log_interval, None);

        let config = HostConfig::from_lookup(lookup(&[("VITAE_PERF_LOG_INTERVAL_MS", "2000")]));
        assert_eq!(config.governor.log_interval, Some(Duration::from_millis(2000)));
    }

    #[test]
    fn bad_values_are_ignored() {
        let config = HostConfig::from_lookup(lookup(&[
            ("VITAE_SEED", "seed"),
            ("VITAE_SHAPE_COUNT", "-3"),
            ("VITAE_DRIFT_SPEED", "NaN"),
            ("VITAE_ADAPTIVE", "maybe"),
            ("VITAE_CONNECTIONS", "lots"),
        ]));
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn oversized_shape_count_is_ignored() {
        let config = HostConfig::from_lookup(lookup(&[("VITAE_SHAPE_COUNT", "99999999999")]));
        assert_eq!(config.shape_count, ShapeCountSource::Recommended);
        assert_eq!(config.field.shape_count, FieldConfig::default().shape_count);
    }

    #[test]
    fn connections_default_off() {
        assert!(!HostConfig::default().connections);
        assert!(HostConfig::default().with_connections(true).connections);
    }

    #[test]
    fn fixed_shape_count_builder() {
        let config = HostConfig::default().with_fixed_shape_count(5);
        assert_eq!(config.field.shape_count, 5);
        assert_eq!(config.shape_count, ShapeCountSource::Configured);
    }
}
