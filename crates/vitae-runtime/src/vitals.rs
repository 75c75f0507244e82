#![forbid(unsafe_code)]

//! Core Web Vitals bookkeeping.
//!
//! The host forwards raw performance entries (largest contentful paint, first
//! input, layout shifts, navigation timing). Each reading is classified,
//! logged on target `vitae::vitals`, and returned.

use std::fmt;

/// LCP below this (ms) is good.
pub const LCP_GOOD_MS: f64 = 2500.0;
/// FID below this (ms) is good.
pub const FID_GOOD_MS: f64 = 100.0;
/// CLS below this is good.
pub const CLS_GOOD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Vital {
    /// Largest Contentful Paint.
    Lcp,
    /// First Input Delay.
    Fid,
    /// Cumulative Layout Shift.
    Cls,
}

impl Vital {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lcp => "LCP",
            Self::Fid => "FID",
            Self::Cls => "CLS",
        }
    }

    fn good_below(self) -> f64 {
        match self {
            Self::Lcp => LCP_GOOD_MS,
            Self::Fid => FID_GOOD_MS,
            Self::Cls => CLS_GOOD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VitalRating {
    Good,
    NeedsImprovement,
}

impl VitalRating {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::NeedsImprovement => "needs_improvement",
        }
    }
}

/// A classified vital.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VitalReading {
    pub vital: Vital,
    /// Milliseconds for LCP/FID, unitless score for CLS.
    pub value: f64,
    pub rating: VitalRating,
}

impl VitalReading {
    fn classify(vital: Vital, value: f64) -> Self {
        let rating = if value < vital.good_below() {
            VitalRating::Good
        } else {
            VitalRating::NeedsImprovement
        };
        Self {
            vital,
            value,
            rating,
        }
    }
}

impl fmt::Display for VitalReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.rating {
            VitalRating::Good => "Good",
            VitalRating::NeedsImprovement => "Needs improvement",
        };
        match self.vital {
            Vital::Cls => write!(f, "CLS: {:.3} ({label})", self.value),
            v => write!(f, "{}: {:.0} ms ({label})", v.as_str(), self.value),
        }
    }
}

/// One layout-shift entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutShift {
    pub value: f64,
    /// Shifts right after user input do not count.
    pub had_recent_input: bool,
}

/// Navigation timing marks, in ms relative to time origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NavigationTiming {
    pub fetch_start: f64,
    pub dom_interactive: f64,
    pub dom_content_loaded_event_start: f64,
    pub dom_content_loaded_event_end: f64,
    pub load_event_start: f64,
    pub load_event_end: f64,
}

/// Derived page-load durations, in ms.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationSummary {
    pub dom_content_loaded: f64,
    pub load_complete: f64,
    pub dom_interactive: f64,
    pub total: f64,
}

impl NavigationTiming {
    pub fn summarize(&self) -> NavigationSummary {
        NavigationSummary {
            dom_content_loaded: self.dom_content_loaded_event_end
                - self.dom_content_loaded_event_start,
            load_complete: self.load_event_end - self.load_event_start,
            dom_interactive: self.dom_interactive - self.fetch_start,
            total: self.load_event_end - self.fetch_start,
        }
    }
}

/// Latest vitals seen on this page.
#[derive(Debug, Clone, Default)]
pub struct VitalsTracker {
    lcp: Option<VitalReading>,
    fid: Option<VitalReading>,
    cls_score: f64,
    cls: Option<VitalReading>,
    navigation: Option<NavigationSummary>,
}

impl VitalsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a batch of LCP candidates; the last one wins.
    ///
    /// Returns `None` for an empty batch.
    pub fn record_lcp(&mut self, start_times_ms: &[f64]) -> Option<VitalReading> {
        let last = *start_times_ms.last()?;
        let reading = VitalReading::classify(Vital::Lcp, last);
        log_reading(&reading);
        self.lcp = Some(reading);
        Some(reading)
    }

    /// Record a first-input entry.
    pub fn record_first_input(&mut self, start_time_ms: f64, processing_start_ms: f64) -> VitalReading {
        let delay = (processing_start_ms - start_time_ms).max(0.0);
        let reading = VitalReading::classify(Vital::Fid, delay);
        log_reading(&reading);
        self.fid = Some(reading);
        reading
    }

    /// Accumulate a batch of layout shifts and return the running score.
    pub fn record_layout_shifts(&mut self, shifts: &[LayoutShift]) -> VitalReading {
        self.cls_score += shifts
            .iter()
            .filter(|s| !s.had_recent_input)
            .map(|s| s.value)
            .sum::<f64>();
        let reading = VitalReading::classify(Vital::Cls, self.cls_score);
        log_reading(&reading);
        self.cls = Some(reading);
        reading
    }

    pub fn record_navigation(&mut self, timing: &NavigationTiming) -> NavigationSummary {
        let summary = timing.summarize();
        tracing::info!(
            target: "vitae::vitals",
            dom_content_loaded_ms = summary.dom_content_loaded,
            load_complete_ms = summary.load_complete,
            dom_interactive_ms = summary.dom_interactive,
            total_ms = summary.total,
            "page load performance"
        );
        self.navigation = Some(summary);
        summary
    }

    pub fn lcp(&self) -> Option<VitalReading> {
        self.lcp
    }

    pub fn fid(&self) -> Option<VitalReading> {
        self.fid
    }

    pub fn cls(&self) -> Option<VitalReading> {
        self.cls
    }

    pub fn navigation(&self) -> Option<NavigationSummary> {
        self.navigation
    }
}

fn log_reading(reading: &VitalReading) {
    tracing::info!(
        target: "vitae::vitals",
        metric = reading.vital.as_str(),
        value = reading.value,
        rating = reading.rating.as_str(),
        "{reading}"
    );
}
