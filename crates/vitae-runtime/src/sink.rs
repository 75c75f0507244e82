#![forbid(unsafe_code)]

//! Metrics sinks.
//!
//! The governor publishes a [`MetricsSnapshot`] to its sink once per aggregate
//! update and calls [`MetricsSink::release`] exactly once on shutdown. Sinks are
//! injected, so there is no global overlay element.

use crate::metrics::MetricsSnapshot;
use crate::rating::FpsTier;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Receiver of aggregate snapshots.
pub trait MetricsSink {
    fn publish(&mut self, snapshot: &MetricsSnapshot);

    /// Detach and free any display resources. Called once on shutdown.
    fn release(&mut self) {}
}

/// Rendered overlay contents.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayText {
    /// Color band of the headline FPS.
    pub tier: FpsTier,
    pub lines: Vec<String>,
}

impl OverlayText {
    pub fn from_snapshot(snapshot: &MetricsSnapshot) -> Self {
        let m = &snapshot.metrics;
        Self {
            tier: FpsTier::from_fps(m.instantaneous_fps),
            lines: vec![
                format!("FPS: {}", m.instantaneous_fps),
                format!("Avg: {} | Min: {}", m.average_fps, m.min_fps),
                format!("Mem: {}", snapshot.memory_label()),
                format!(
                    "Dropped: {}/{} ({:.1}%)",
                    m.dropped_frames, m.total_frames, snapshot.dropped_percent
                ),
            ],
        }
    }
}

impl fmt::Display for OverlayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

#[derive(Debug, Default)]
struct OverlayState {
    text: Option<OverlayText>,
    updates: u64,
    released: bool,
}

/// Headless text overlay.
///
/// Clones share state: hand one clone to the governor and keep another to read
/// what is currently displayed.
#[derive(Debug, Clone, Default)]
pub struct TextOverlay {
    state: Rc<RefCell<OverlayState>>,
}

impl TextOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently displayed text, if any.
    pub fn text(&self) -> Option<OverlayText> {
        self.state.borrow().text.clone()
    }

    /// Snapshots received since creation.
    pub fn updates(&self) -> u64 {
        self.state.borrow().updates
    }

    /// Whether the overlay is still attached.
    pub fn is_attached(&self) -> bool {
        !self.state.borrow().released
    }
}

impl MetricsSink for TextOverlay {
    fn publish(&mut self, snapshot: &MetricsSnapshot) {
        let mut state = self.state.borrow_mut();
        if state.released {
            return;
        }
        state.text = Some(OverlayText::from_snapshot(snapshot));
        state.updates += 1;
    }

    fn release(&mut self) {
        let mut state = self.state.borrow_mut();
        state.released = true;
        state.text = None;
    }
}

/// Collects every published snapshot. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Rc<RefCell<Vec<MetricsSnapshot>>>,
    released: Rc<RefCell<bool>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> Vec<MetricsSnapshot> {
        self.log.borrow().clone()
    }

    pub fn is_released(&self) -> bool {
        *self.released.borrow()
    }
}

impl MetricsSink for RecordingSink {
    fn publish(&mut self, snapshot: &MetricsSnapshot) {
        self.log.borrow_mut().push(*snapshot);
    }

    fn release(&mut self) {
        *self.released.borrow_mut() = true;
    }
}
