#![forbid(unsafe_code)]

//! Background lifecycle: `start`, per-frame driving, resize, `stop`.
//!
//! Each [`BackgroundHandle::frame`] runs, in order:
//!
//! 1. surface check (a missing size tears the background down),
//! 2. governor observation (and, when enabled, the adaptive shape budget),
//! 3. field tick (skipped under reduced motion),
//! 4. link refresh and render.
//!
//! Everything happens on the caller's thread inside the call.

use std::fmt;

use vitae_core::device::{BatteryProbe, DeviceCapabilities, NoBattery};
use vitae_core::geometry::CanvasSize;
use vitae_fx::{FieldError, Link, LinkCache, RenderOptions, ShapeField, paint_background, render};
use vitae_runtime::{
    AdaptiveShapeBudget, FrameGovernor, FrameMetrics, MemoryProbe, MetricsSnapshot, Recommendation,
    TextOverlay, recommend_with_battery,
};

use crate::clock::FrameClock;
use crate::config::{HostConfig, ShapeCountSource};
use crate::surface::CanvasSurface;

/// Host error type.
#[derive(Debug, Clone, PartialEq)]
pub enum HostError {
    /// The field rejected its configuration or the canvas size.
    Field(FieldError),
    /// The surface had no size at start.
    SurfaceUnavailable,
    /// The background was already torn down.
    Stopped,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(err) => write!(f, "field error: {err}"),
            Self::SurfaceUnavailable => f.write_str("canvas surface unavailable"),
            Self::Stopped => f.write_str("background stopped"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for HostError {
    fn from(err: FieldError) -> Self {
        Self::Field(err)
    }
}

/// What a call to [`BackgroundHandle::frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Field advanced and rendered.
    Rendered,
    /// Rendered without advancing (reduced motion).
    Frozen,
    /// The surface disappeared; the background is now stopped.
    SurfaceLost,
    /// Nothing to do: already stopped.
    Stopped,
}

impl FrameOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rendered => "rendered",
            Self::Frozen => "frozen",
            Self::SurfaceLost => "surface_lost",
            Self::Stopped => "stopped",
        }
    }
}

/// Start the background with no battery information.
pub fn start<S, C>(
    surface: S,
    clock: C,
    config: HostConfig,
    device: &DeviceCapabilities,
) -> Result<BackgroundHandle<S, C>, HostError>
where
    S: CanvasSurface,
    C: FrameClock,
{
    start_with_battery(surface, clock, config, device, &NoBattery)
}

/// Start the background.
///
/// Applies the device recommendation (shape count unless the config pins
/// one), builds the field, paints the base color and attaches the text
/// overlay when the governor config asks for it. Glow and links are drawn
/// only when the config opts in and the recommendation allows them; the
/// default frame is the trail fade followed by the shapes.
pub fn start_with_battery<S, C>(
    mut surface: S,
    clock: C,
    config: HostConfig,
    device: &DeviceCapabilities,
    battery: &dyn BatteryProbe,
) -> Result<BackgroundHandle<S, C>, HostError>
where
    S: CanvasSurface,
    C: FrameClock,
{
    let size = surface.size().ok_or(HostError::SurfaceUnavailable)?;
    let recommendation = recommend_with_battery(device, battery.status());

    let mut field_config = config.field;
    if config.shape_count == ShapeCountSource::Recommended {
        field_config.shape_count = recommendation.shape_count;
    }
    let budget = config
        .adaptive
        .map(|adaptive| AdaptiveShapeBudget::new(adaptive, field_config.shape_count));
    let field = ShapeField::new(size, field_config)?;

    let render_options = RenderOptions {
        glow: config.render.glow && recommendation.enable_blur,
        link_width: config.links.line_width,
        ..config.render
    };
    let links = (config.connections && recommendation.enable_connections)
        .then(|| LinkCache::new(config.links, recommendation.update_stride));

    let overlay_enabled = config.governor.overlay;
    let mut governor = FrameGovernor::new(config.governor, clock.now_mono());
    let overlay = overlay_enabled.then(|| {
        let overlay = TextOverlay::new();
        governor.set_sink(Box::new(overlay.clone()));
        overlay
    });

    paint_background(&mut surface, size, &field.config().palette);

    tracing::debug!(
        target: "vitae::host",
        width = size.width,
        height = size.height,
        shapes = field.len(),
        glow = render_options.glow,
        connections = links.is_some(),
        stride = recommendation.update_stride,
        reduced_motion = device.prefers_reduced_motion,
        adaptive = budget.is_some(),
        overlay = overlay.is_some(),
        "background started"
    );

    Ok(BackgroundHandle {
        surface: Some(surface),
        clock,
        field,
        governor,
        links,
        render_options,
        recommendation,
        budget,
        overlay,
        frozen: device.prefers_reduced_motion,
        running: true,
    })
}

/// A running background. Dropping it tears it down.
pub struct BackgroundHandle<S: CanvasSurface, C: FrameClock> {
    surface: Option<S>,
    clock: C,
    field: ShapeField,
    governor: FrameGovernor,
    links: Option<LinkCache>,
    render_options: RenderOptions,
    recommendation: Recommendation,
    budget: Option<AdaptiveShapeBudget>,
    overlay: Option<TextOverlay>,
    frozen: bool,
    running: bool,
}

impl<S: CanvasSurface, C: FrameClock> fmt::Debug for BackgroundHandle<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundHandle")
            .field("size", &self.field.size())
            .field("shapes", &self.field.len())
            .field("ticks", &self.field.elapsed_ticks())
            .field("recommendation", &self.recommendation)
            .field("frozen", &self.frozen)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl<S: CanvasSurface, C: FrameClock> BackgroundHandle<S, C> {
    /// Drive one animation frame.
    pub fn frame(&mut self) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Stopped;
        }
        let Some(size) = self.surface.as_ref().and_then(CanvasSurface::size) else {
            tracing::warn!(target: "vitae::host", "canvas surface lost, stopping background");
            self.teardown();
            return FrameOutcome::SurfaceLost;
        };
        if size != self.field.size() {
            tracing::trace!(
                target: "vitae::host",
                width = size.width,
                height = size.height,
                "surface size differs from field; awaiting resize"
            );
        }

        if let Some(metrics) = self.governor.observe(self.clock.now_mono()) {
            self.adapt(metrics);
        }

        let outcome = if self.frozen {
            FrameOutcome::Frozen
        } else {
            self.field.tick();
            FrameOutcome::Rendered
        };

        let links: &[Link] = match self.links.as_mut() {
            Some(cache) => {
                cache.refresh(self.field.elapsed_ticks(), self.field.shapes());
                cache.links()
            }
            None => &[],
        };
        let Some(surface) = self.surface.as_mut() else {
            return FrameOutcome::Stopped;
        };
        surface.begin_frame();
        render(
            surface,
            self.field.size(),
            self.field.shapes(),
            links,
            &self.field.config().palette,
            &self.render_options,
        );
        outcome
    }

    fn adapt(&mut self, metrics: FrameMetrics) {
        let Some(budget) = self.budget.as_mut() else {
            return;
        };
        if !budget.observe(metrics.instantaneous_fps).is_change() {
            return;
        }
        let count = budget.shape_count();
        if let Err(err) = self.field.set_shape_count(count) {
            tracing::warn!(target: "vitae::host", %err, count, "shape budget not applied");
            return;
        }
        if let Some(cache) = self.links.as_mut() {
            cache.invalidate();
        }
        if let Some(surface) = self.surface.as_mut() {
            paint_background(surface, self.field.size(), &self.field.config().palette);
        }
    }

    /// Rebuild the field for a new canvas size.
    ///
    /// On error the field is left empty and frames render nothing until a
    /// valid size arrives.
    pub fn resize(&mut self, size: CanvasSize) -> Result<(), HostError> {
        if !self.running {
            return Err(HostError::Stopped);
        }
        if let Some(cache) = self.links.as_mut() {
            cache.invalidate();
        }
        if let Err(err) = self.field.resize(size) {
            tracing::warn!(target: "vitae::host", %err, "resize rejected");
            return Err(err.into());
        }
        if let Some(surface) = self.surface.as_mut() {
            paint_background(surface, size, &self.field.config().palette);
        }
        tracing::debug!(
            target: "vitae::host",
            width = size.width,
            height = size.height,
            shapes = self.field.len(),
            "background resized"
        );
        Ok(())
    }

    /// Install a memory probe for the overlay and periodic log.
    pub fn set_memory_probe(&mut self, probe: Box<dyn MemoryProbe>) {
        self.governor.set_memory_probe(probe);
    }

    /// Tear down and hand the surface back.
    pub fn stop(mut self) -> Option<S> {
        self.teardown();
        self.surface.take()
    }

    fn teardown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.governor.shutdown();
        tracing::debug!(
            target: "vitae::host",
            frames = self.governor.metrics().total_frames,
            "background stopped"
        );
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether reduced motion froze the field.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn field(&self) -> &ShapeField {
        &self.field
    }

    pub fn metrics(&self) -> FrameMetrics {
        self.governor.metrics()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.governor.snapshot()
    }

    pub fn governor(&self) -> &FrameGovernor {
        &self.governor
    }

    pub fn recommendation(&self) -> Recommendation {
        self.recommendation
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    pub fn links(&self) -> Option<&LinkCache> {
        self.links.as_ref()
    }

    pub fn shape_budget(&self) -> Option<&AdaptiveShapeBudget> {
        self.budget.as_ref()
    }

    /// The attached overlay, if the governor config enabled one.
    pub fn overlay(&self) -> Option<&TextOverlay> {
        self.overlay.as_ref()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

impl<S: CanvasSurface, C: FrameClock> Drop for BackgroundHandle<S, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
