#![forbid(unsafe_code)]

//! Runtime side of the vitae backdrop: frame timing and quality policy.
//!
//! # Key Components
//!
//! - [`FrameGovernor`]: per-frame observation, per-second FPS window, metrics
//! - [`recommend`]: static quality settings by device class
//! - [`AdaptiveShapeBudget`]: optional closed-loop shape count
//! - [`MetricsSink`] / [`TextOverlay`]: injected metrics display
//! - [`VitalsTracker`]: Core Web Vitals classification
//!
//! Nothing here depends on the shape field; the host wires the two together.

pub mod adaptive;
pub mod config;
pub mod governor;
pub mod memory;
pub mod metrics;
pub mod rating;
pub mod recommend;
pub mod sink;
pub mod vitals;

pub use adaptive::{AdaptiveConfig, AdaptiveShapeBudget, BudgetDecision};
pub use config::GovernorConfig;
pub use governor::FrameGovernor;
pub use memory::{FixedMemory, MemoryProbe, MemoryUsage, NoMemoryProbe};
pub use metrics::{FrameMetrics, GovernorState, MetricsSnapshot};
pub use rating::{FpsTier, PerformanceRating};
pub use recommend::{Recommendation, recommend, recommend_with_battery};
pub use sink::{MetricsSink, OverlayText, RecordingSink, TextOverlay};
pub use vitals::{VitalReading, VitalsTracker};
