#![forbid(unsafe_code)]

//! Procedural shape field for the vitae backdrop.
//!
//! - [`field`]: deterministic golden-angle placement and noise-driven motion
//! - [`connections`]: constellation lines between nearby shapes
//! - [`draw`]: flat canvas-style draw command stream
//!
//! The crate is pure computation: no clocks, no I/O, no global state.

pub mod color;
pub mod connections;
pub mod draw;
pub mod field;
pub mod noise;
pub mod palette;
pub mod shape;

pub use color::Rgba;
pub use connections::{Link, LinkCache, LinkParams, build_links};
pub use draw::{CommandBuffer, DrawCommand, DrawSurface, RenderOptions, Stroke, paint_background, render};
pub use field::{FieldConfig, FieldError, MAX_SHAPES, ShapeField, initialize_shapes, tick_shapes};
pub use noise::ValueNoise;
pub use palette::{OutlineStyle, Palette};
pub use shape::{MAX_DRIFT, Shape, ShapeKind};
