#![forbid(unsafe_code)]

//! Best-effort heap usage probe.

use std::fmt;

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Heap usage reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl MemoryUsage {
    #[inline]
    pub fn used_mb(&self) -> f64 {
        self.used_bytes as f64 / BYTES_PER_MB
    }

    #[inline]
    pub fn total_mb(&self) -> f64 {
        self.total_bytes as f64 / BYTES_PER_MB
    }
}

/// `used/totalMB`, one decimal each.
impl fmt::Display for MemoryUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}/{:.1}MB", self.used_mb(), self.total_mb())
    }
}

/// Label for an optional reading: the usage, or `N/A`.
pub fn memory_label(usage: Option<MemoryUsage>) -> String {
    usage.map_or_else(|| "N/A".to_string(), |u| u.to_string())
}

/// Source of memory readings. `None` means the host cannot introspect.
pub trait MemoryProbe {
    fn usage(&self) -> Option<MemoryUsage>;
}

/// Probe for hosts without memory introspection.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMemoryProbe;

impl MemoryProbe for NoMemoryProbe {
    fn usage(&self) -> Option<MemoryUsage> {
        None
    }
}

/// Probe returning a fixed reading (tests and simulated hosts).
#[derive(Debug, Clone, Copy)]
pub struct FixedMemory(pub MemoryUsage);

impl MemoryProbe for FixedMemory {
    fn usage(&self) -> Option<MemoryUsage> {
        Some(self.0)
    }
}
