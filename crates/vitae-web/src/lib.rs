#![forbid(unsafe_code)]

//! `vitae-web` embeds the backdrop in a page-like host.
//!
//! Design goals:
//! - **Host-driven frames**: the embedding environment calls
//!   [`BackgroundHandle::frame`] from its animation callback and forwards
//!   resize notifications.
//! - **Deterministic time**: frame timing comes from an injected
//!   [`FrameClock`]; tests and the demo use [`DeterministicClock`].
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! The crate does not bind to `wasm-bindgen`. A browser shim implements
//! [`CanvasSurface`] over `CanvasRenderingContext2D` by replaying
//! [`vitae_fx::DrawCommand`]s.

pub mod clock;
pub mod config;
pub mod host;
pub mod surface;

pub use clock::{DeterministicClock, FrameClock, WallClock};
pub use config::{HostConfig, ShapeCountSource};
pub use host::{BackgroundHandle, FrameOutcome, HostError, start, start_with_battery};
pub use surface::{CanvasSurface, RecordingCanvas};
