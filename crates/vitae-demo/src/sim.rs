#![forbid(unsafe_code)]

//! Headless simulation: a recording canvas, a deterministic clock and a
//! fixed frame schedule.

use std::time::Duration;

use serde::Serialize;
use vitae::prelude::*;
use vitae::{MetricsSnapshot, RecordingCanvas, Recommendation, VitalReading, VitalsTracker};

use crate::cli::Opts;

/// Extra delay added on stalled frames.
pub const STALL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub rendered: u64,
    pub frozen: u64,
    pub surface_lost: u64,
    pub stopped: u64,
}

impl OutcomeCounts {
    fn record(&mut self, outcome: FrameOutcome) {
        let slot = match outcome {
            FrameOutcome::Rendered => &mut self.rendered,
            FrameOutcome::Frozen => &mut self.frozen,
            FrameOutcome::SurfaceLost => &mut self.surface_lost,
            FrameOutcome::Stopped => &mut self.stopped,
        };
        *slot += 1;
    }
}

/// Final state after a run.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub device: DeviceCapabilities,
    pub recommendation: Recommendation,
    pub shapes: usize,
    pub ticks: u64,
    pub links: usize,
    pub outcomes: OutcomeCounts,
    pub commands_last_frame: usize,
    pub snapshot: MetricsSnapshot,
    /// Overlay text, when attached.
    pub overlay: Option<String>,
    /// LCP, FID and CLS readings when `--vitals` is on.
    pub vitals: Vec<VitalReading>,
}

/// Host and device configuration for `opts`, layered over the environment.
pub fn configure(opts: &Opts) -> (HostConfig, DeviceCapabilities) {
    let mut config = HostConfig::from_env();
    config.governor.overlay |= opts.overlay;
    config.connections |= opts.links;
    config.render.glow |= opts.glow;
    if opts.adaptive && config.adaptive.is_none() {
        config.adaptive = Some(vitae::AdaptiveConfig::default());
    }

    let mut device = DeviceCapabilities::from_env();
    device.is_mobile |= opts.mobile;
    device.is_low_end |= opts.low_end;
    device.prefers_reduced_motion |= opts.reduced_motion;
    (config, device)
}

/// Per-frame step for the schedule: `1/fps`, plus [`STALL`] every
/// `stall_every` frames.
pub fn frame_step(opts: &Opts, frame: u64) -> Duration {
    let base = Duration::from_micros(1_000_000 / u64::from(opts.fps.max(1)));
    if opts.stall_every > 0 && frame % opts.stall_every == 0 {
        base + STALL
    } else {
        base
    }
}

/// Feed page vitals from the frame schedule: the first paint is the
/// largest contentful paint, an input arriving with it is handled on the
/// next frame, and a fixed-size canvas never shifts layout.
fn record_vitals(tracker: &mut VitalsTracker, frame: u64, previous_ms: f64, now_ms: f64) {
    match frame {
        1 => {
            tracker.record_lcp(&[now_ms]);
        }
        2 => {
            tracker.record_first_input(previous_ms, now_ms);
            tracker.record_layout_shifts(&[]);
        }
        _ => {}
    }
}

pub fn run(opts: &Opts, config: HostConfig, device: &DeviceCapabilities) -> Result<DemoReport> {
    let canvas = RecordingCanvas::new(CanvasSize::new(opts.width, opts.height));
    let mut handle = start(canvas, DeterministicClock::new(), config, device)?;
    let mut outcomes = OutcomeCounts::default();
    let mut vitals = opts.vitals.then(VitalsTracker::new);
    let mut previous_ms = 0.0;

    for frame in 1..=opts.frames {
        handle.clock_mut().advance(frame_step(opts, frame));
        let outcome = handle.frame();
        outcomes.record(outcome);
        let now_ms = handle.clock().now_mono().as_secs_f64() * 1000.0;
        if let Some(tracker) = vitals.as_mut() {
            record_vitals(tracker, frame, previous_ms, now_ms);
        }
        previous_ms = now_ms;
        if matches!(outcome, FrameOutcome::SurfaceLost | FrameOutcome::Stopped) {
            break;
        }
    }

    let overlay = handle
        .overlay()
        .and_then(|overlay| overlay.text())
        .map(|text| text.to_string());
    Ok(DemoReport {
        device: *device,
        recommendation: handle.recommendation(),
        shapes: handle.field().len(),
        ticks: handle.field().elapsed_ticks(),
        links: handle.links().map_or(0, |cache| cache.links().len()),
        outcomes,
        commands_last_frame: handle.surface().map_or(0, |s| s.commands().len()),
        snapshot: handle.snapshot(),
        overlay,
        vitals: vitals
            .map(|t| [t.lcp(), t.fid(), t.cls()].into_iter().flatten().collect())
            .unwrap_or_default(),
    })
}
