#![forbid(unsafe_code)]

//! Core: canvas geometry, device capability detection, and logging setup.

pub mod device;
pub mod geometry;
#[cfg(feature = "tracing-json")]
pub mod logging;
