#![forbid(unsafe_code)]

//! The canvas seam between the host and the renderer.

use vitae_core::geometry::CanvasSize;
use vitae_fx::{CommandBuffer, DrawCommand, DrawSurface};

/// A drawable canvas owned by the embedding page.
///
/// `size` returns `None` once the canvas has been detached or its 2D context
/// is gone; the host treats that as surface loss.
pub trait CanvasSurface: DrawSurface {
    fn size(&self) -> Option<CanvasSize>;

    /// Called before each frame's commands.
    fn begin_frame(&mut self) {}
}

impl<S: CanvasSurface + ?Sized> CanvasSurface for Box<S> {
    fn size(&self) -> Option<CanvasSize> {
        (**self).size()
    }

    fn begin_frame(&mut self) {
        (**self).begin_frame();
    }
}

/// In-memory canvas that keeps the commands of the most recent frame.
///
/// Commands issued outside a frame (the background paint after start or
/// resize) are kept until the next `begin_frame`.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    size: Option<CanvasSize>,
    buffer: CommandBuffer,
    frames: u64,
}

impl RecordingCanvas {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    /// A canvas with no backing context.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn set_size(&mut self, size: CanvasSize) {
        self.size = Some(size);
    }

    /// Drop the backing context; subsequent frames see surface loss.
    pub fn detach(&mut self) {
        self.size = None;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        self.buffer.commands()
    }

    /// Commands named `name` in the current buffer.
    pub fn count(&self, name: &str) -> usize {
        self.buffer.count(name)
    }

    /// Frames begun so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl DrawSurface for RecordingCanvas {
    fn execute(&mut self, command: DrawCommand) {
        self.buffer.execute(command);
    }
}

impl CanvasSurface for RecordingCanvas {
    fn size(&self) -> Option<CanvasSize> {
        self.size
    }

    fn begin_frame(&mut self) {
        self.buffer.clear();
        self.frames += 1;
    }
}
