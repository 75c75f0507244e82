#![forbid(unsafe_code)]

//! Device capability detection.
//!
//! The backdrop scales its workload to the device class. Detection is a pure
//! function of a small set of host-provided signals ([`DetectInputs`]) so the
//! same inputs always produce the same [`DeviceCapabilities`].
//!
//! # Detection Strategy
//!
//! | Signal | Rule |
//! |--------|------|
//! | user agent | contains `Android`, `iPhone`, `iPad` or `iPod` (any case) → mobile |
//! | viewport width | `< 768` → mobile |
//! | hardware concurrency | `<= 4` → low-end; unknown → not low-end |
//! | reduced-motion media query | copied through |
//!
//! # Failure Modes
//!
//! | Mode | Condition | Fallback Behavior |
//! |------|-----------|-------------------|
//! | No user agent | Native host, privacy mode | Mobile only via viewport width |
//! | Unknown core count | API missing | Treated as capable (not low-end) |
//! | No battery API | Most desktop browsers | [`BatteryProbe::status`] returns `None` |

use std::env;

/// User-agent fragments that identify a mobile device.
const MOBILE_USER_AGENTS: &[&str] = &["android", "iphone", "ipad", "ipod"];

/// Viewports narrower than this are treated as mobile.
pub const MOBILE_VIEWPORT_MAX_WIDTH: f64 = 768.0;

/// Devices reporting this many logical cores or fewer are treated as low-end.
pub const LOW_END_MAX_CORES: u32 = 4;

/// Battery level below which a discharging device should reduce work.
pub const LOW_BATTERY_LEVEL: f64 = 0.2;

/// Raw signals supplied by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectInputs {
    pub user_agent: String,
    /// Viewport width in CSS pixels.
    pub viewport_width: f64,
    /// Logical core count, if the host can report it.
    pub hardware_concurrency: Option<u32>,
    pub prefers_reduced_motion: bool,
}

/// Static device-class hints consumed by the recommendation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceCapabilities {
    pub is_mobile: bool,
    pub is_low_end: bool,
    pub prefers_reduced_motion: bool,
}

impl DeviceCapabilities {
    /// A capable desktop: not mobile, not low-end, motion allowed.
    pub const DESKTOP: Self = Self {
        is_mobile: false,
        is_low_end: false,
        prefers_reduced_motion: false,
    };

    /// Classify a device from host signals.
    #[must_use]
    pub fn detect(inputs: &DetectInputs) -> Self {
        let agent = inputs.user_agent.to_ascii_lowercase();
        let mobile_agent = MOBILE_USER_AGENTS.iter().any(|m| agent.contains(m));
        // NaN/absent widths never count as narrow.
        let narrow = inputs.viewport_width > 0.0 && inputs.viewport_width < MOBILE_VIEWPORT_MAX_WIDTH;
        let is_low_end = inputs
            .hardware_concurrency
            .is_some_and(|cores| cores <= LOW_END_MAX_CORES);

        Self {
            is_mobile: mobile_agent || narrow,
            is_low_end,
            prefers_reduced_motion: inputs.prefers_reduced_motion,
        }
    }

    /// Detect from the process environment (native hosts and the demo).
    ///
    /// Reads `VITAE_DEVICE_MOBILE`, `VITAE_DEVICE_LOW_END` and
    /// `VITAE_REDUCED_MOTION`. Without an explicit low-end flag, falls back to
    /// [`std::thread::available_parallelism`].
    #[must_use]
    pub fn from_env() -> Self {
        let cores = std::thread::available_parallelism()
            .ok()
            .and_then(|n| u32::try_from(n.get()).ok());
        Self::from_lookup(|key| env::var(key).ok(), cores)
    }

    /// Same as [`Self::from_env`] but reading through `lookup`.
    pub fn from_lookup<F>(lookup: F, cores: Option<u32>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let inputs = DetectInputs {
            user_agent: String::new(),
            viewport_width: 0.0,
            hardware_concurrency: cores,
            prefers_reduced_motion: false,
        };
        let mut caps = Self::detect(&inputs);
        if let Some(flag) = lookup("VITAE_DEVICE_MOBILE").as_deref().and_then(parse_flag) {
            caps.is_mobile = flag;
        }
        if let Some(flag) = lookup("VITAE_DEVICE_LOW_END").as_deref().and_then(parse_flag) {
            caps.is_low_end = flag;
        }
        if let Some(flag) = lookup("VITAE_REDUCED_MOTION").as_deref().and_then(parse_flag) {
            caps.prefers_reduced_motion = flag;
        }
        caps
    }
}

/// Parse a boolean environment flag. Unrecognized values are ignored.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Battery reading from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatteryStatus {
    /// Charge level in `[0, 1]`.
    pub level: f64,
    pub charging: bool,
}

impl BatteryStatus {
    /// Create a reading, clamping `level` into `[0, 1]`.
    pub fn new(level: f64, charging: bool) -> Self {
        let level = if level.is_finite() {
            level.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { level, charging }
    }

    /// Discharging and below 20%.
    #[inline]
    pub fn should_reduce_performance(&self) -> bool {
        !self.charging && self.level < LOW_BATTERY_LEVEL
    }
}

/// Best-effort battery query. `None` means the capability is unavailable.
pub trait BatteryProbe {
    fn status(&self) -> Option<BatteryStatus>;
}

/// Probe for hosts without a battery API.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBattery;

impl BatteryProbe for NoBattery {
    fn status(&self) -> Option<BatteryStatus> {
        None
    }
}

/// Probe returning a fixed reading (tests and simulated hosts).
#[derive(Debug, Clone, Copy)]
pub struct FixedBattery(pub BatteryStatus);

impl BatteryProbe for FixedBattery {
    fn status(&self) -> Option<BatteryStatus> {
        Some(self.0)
    }
}
