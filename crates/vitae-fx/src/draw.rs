#![forbid(unsafe_code)]

//! Draw commands and field rendering.
//!
//! Rendering does not touch a real canvas. It emits a flat command stream
//! modelled on the 2D canvas state machine (`save`, `translate`, `rotate`,
//! `scale`, stroke, `restore`) into a [`DrawSurface`]. A browser host replays
//! the commands against `CanvasRenderingContext2D`; tests and the demo record
//! them with [`CommandBuffer`].
//!
//! Per frame the stream is:
//!
//! 1. optional trail fade: a full-canvas rect in the background color at low
//!    opacity,
//! 2. links (if any), beneath the shapes,
//! 3. per shape in creation order: `Save`, `Translate`, `Rotate`, `Scale`,
//!    `Stroke`, one primitive, `Restore`.

use crate::connections::Link;
use crate::palette::Palette;
use crate::shape::{Shape, ShapeKind};
use crate::color::Rgba;
use vitae_core::geometry::{CanvasSize, Point};

/// Height factor of an equilateral triangle (`√3 / 2`).
const TRIANGLE_HEIGHT: f64 = 0.866_025_403_784_438_6;

/// Corner radius of a rounded square as a fraction of its side.
const CORNER_RADIUS_RATIO: f64 = 0.1;

/// Default trail-fade opacity.
pub const DEFAULT_TRAIL_OPACITY: f64 = 0.05;

/// Stroke state for subsequent primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
    /// Shadow blur radius; `0.0` disables the glow.
    pub glow: f64,
}

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawCommand {
    /// Fill the whole canvas (alpha taken from `color`).
    FillCanvas { size: CanvasSize, color: Rgba },
    /// Straight stroked segment in canvas coordinates.
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f64,
    },
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Rotate { radians: f64 },
    Scale { factor: f64 },
    SetStroke(Stroke),
    /// Unfilled circle centred on the local origin.
    StrokeCircle { diameter: f64 },
    /// Unfilled square centred on the local origin.
    StrokeRoundedRect { side: f64, corner_radius: f64 },
    /// Unfilled triangle in local coordinates.
    StrokeTriangle { vertices: [Point; 3] },
}

impl DrawCommand {
    /// Short name, for logs and command histograms.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FillCanvas { .. } => "fill_canvas",
            Self::Line { .. } => "line",
            Self::Save => "save",
            Self::Restore => "restore",
            Self::Translate { .. } => "translate",
            Self::Rotate { .. } => "rotate",
            Self::Scale { .. } => "scale",
            Self::SetStroke(_) => "set_stroke",
            Self::StrokeCircle { .. } => "stroke_circle",
            Self::StrokeRoundedRect { .. } => "stroke_rounded_rect",
            Self::StrokeTriangle { .. } => "stroke_triangle",
        }
    }
}

/// Sink for draw commands.
pub trait DrawSurface {
    fn execute(&mut self, command: DrawCommand);
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn execute(&mut self, command: DrawCommand) {
        (**self).execute(command);
    }
}

impl<S: DrawSurface + ?Sized> DrawSurface for Box<S> {
    fn execute(&mut self, command: DrawCommand) {
        (**self).execute(command);
    }
}

/// Records commands in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clear recorded commands, keeping capacity.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Move the recorded commands out.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// How many recorded commands have the given [`DrawCommand::name`].
    pub fn count(&self, name: &str) -> usize {
        self.commands.iter().filter(|c| c.name() == name).count()
    }
}

impl DrawSurface for CommandBuffer {
    fn execute(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Per-frame rendering switches.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderOptions {
    /// Trail-fade opacity; `None` skips the fade.
    pub trail_opacity: Option<f64>,
    /// Glow strokes at twice their width.
    pub glow: bool,
    /// Link line width in pixels.
    pub link_width: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            trail_opacity: Some(DEFAULT_TRAIL_OPACITY),
            glow: false,
            link_width: 1.0,
        }
    }
}

/// Paint the canvas opaque in the background color.
///
/// Hosts call this once after (re)initialization so trails fade into a
/// solid base.
pub fn paint_background<S: DrawSurface + ?Sized>(surface: &mut S, size: CanvasSize, palette: &Palette) {
    surface.execute(DrawCommand::FillCanvas {
        size,
        color: palette.background,
    });
}

/// Emit one frame.
pub fn render<S: DrawSurface + ?Sized>(
    surface: &mut S,
    size: CanvasSize,
    shapes: &[Shape],
    links: &[Link],
    palette: &Palette,
    options: &RenderOptions,
) {
    if let Some(opacity) = options.trail_opacity {
        surface.execute(DrawCommand::FillCanvas {
            size,
            color: palette.background.with_opacity(opacity),
        });
    }

    for link in links {
        let (Some(a), Some(b)) = (shapes.get(link.a), shapes.get(link.b)) else {
            continue;
        };
        surface.execute(DrawCommand::Line {
            from: a.position,
            to: b.position,
            color: palette.blue_light.with_opacity(link.opacity),
            width: options.link_width,
        });
    }

    for shape in shapes {
        render_shape(surface, shape, options.glow);
    }
}

fn render_shape<S: DrawSurface + ?Sized>(surface: &mut S, shape: &Shape, glow: bool) {
    let width = f64::from(shape.outline.weight);
    surface.execute(DrawCommand::Save);
    surface.execute(DrawCommand::Translate {
        x: shape.position.x,
        y: shape.position.y,
    });
    surface.execute(DrawCommand::Rotate {
        radians: shape.rotation,
    });
    surface.execute(DrawCommand::Scale {
        factor: shape.scale,
    });
    surface.execute(DrawCommand::SetStroke(Stroke {
        color: shape.outline.color,
        width,
        glow: if glow { width * 2.0 } else { 0.0 },
    }));
    surface.execute(primitive(shape.kind, shape.size));
    surface.execute(DrawCommand::Restore);
}

/// Local-space geometry for a kind at a given size.
pub fn primitive(kind: ShapeKind, size: f64) -> DrawCommand {
    match kind {
        ShapeKind::Disc => DrawCommand::StrokeCircle { diameter: size },
        ShapeKind::RoundedSquare => DrawCommand::StrokeRoundedRect {
            side: size,
            corner_radius: size * CORNER_RADIUS_RATIO,
        },
        ShapeKind::Triangle => {
            let h = size * TRIANGLE_HEIGHT;
            DrawCommand::StrokeTriangle {
                vertices: [
                    Point::new(0.0, -h / 2.0),
                    Point::new(-size / 2.0, h / 2.0),
                    Point::new(size / 2.0, h / 2.0),
                ],
            }
        }
    }
}
