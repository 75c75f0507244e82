#![forbid(unsafe_code)]

//! vitae public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a
//! prelude for embedding the backdrop.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use vitae_core::device::{BatteryProbe, BatteryStatus, DeviceCapabilities};
pub use vitae_core::geometry::{CanvasSize, Point};

// --- Field re-exports ------------------------------------------------------

pub use vitae_fx::{
    DrawCommand, DrawSurface, FieldConfig, FieldError, LinkParams, MAX_SHAPES, Palette,
    RenderOptions, Rgba, Shape, ShapeField, ShapeKind,
};

// --- Runtime re-exports ----------------------------------------------------

pub use vitae_runtime::{
    AdaptiveConfig, FrameGovernor, FrameMetrics, GovernorConfig, MetricsSink, MetricsSnapshot,
    PerformanceRating, Recommendation, TextOverlay, VitalReading, VitalsTracker,
};

// --- Host re-exports -------------------------------------------------------

pub use vitae_web::{
    BackgroundHandle, CanvasSurface, DeterministicClock, FrameClock, FrameOutcome, HostConfig,
    HostError, RecordingCanvas, WallClock, start, start_with_battery,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid field configuration or canvas size.
    Field(FieldError),
    /// Host lifecycle failure.
    Host(HostError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(err) => write!(f, "{err}"),
            Self::Host(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            Self::Host(err) => Some(err),
        }
    }
}

impl From<FieldError> for Error {
    fn from(err: FieldError) -> Self {
        Self::Field(err)
    }
}

impl From<HostError> for Error {
    fn from(err: HostError) -> Self {
        match err {
            HostError::Field(inner) => Self::Field(inner),
            other => Self::Host(other),
        }
    }
}

/// Standard result type for vitae APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BackgroundHandle, CanvasSize, CanvasSurface, DeterministicClock, DeviceCapabilities,
        Error, FieldConfig, FrameClock, FrameOutcome, GovernorConfig, HostConfig, Result,
        ShapeField, start,
    };

    pub use crate::{core, fx, runtime, web};
}

pub use vitae_core as core;
pub use vitae_fx as fx;
pub use vitae_runtime as runtime;
pub use vitae_web as web;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_field_errors_flatten() {
        let field = FieldError::InvalidShapeCount { count: -1 };
        let err: Error = HostError::Field(field.clone()).into();
        assert_eq!(err, Error::Field(field));
        let err: Error = HostError::Stopped.into();
        assert_eq!(err.to_string(), "background stopped");
    }

    #[test]
    fn prelude_starts_a_background() -> Result<()> {
        use crate::prelude::*;
        let surface = RecordingCanvas::new(CanvasSize::new(320.0, 240.0));
        let handle = start(
            surface,
            DeterministicClock::new(),
            HostConfig::default(),
            &DeviceCapabilities::DESKTOP,
        )?;
        assert!(handle.is_running());
        Ok(())
    }
}
