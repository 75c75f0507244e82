#![forbid(unsafe_code)]

//! Structured logging integration tests.
//!
//! These tests install a capturing layer and check that the periodic metrics
//! log and web-vitals readings are emitted with the expected targets and
//! fields.
//!
//!   cargo test -p vitae-runtime --test tracing_tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vitae_runtime::vitals::LayoutShift;
use vitae_runtime::{AdaptiveConfig, AdaptiveShapeBudget, FrameGovernor, GovernorConfig, VitalsTracker};

use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event with its target and fields.
#[derive(Debug, Clone)]
struct CapturedEvent {
    target: String,
    level: tracing::Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// A tracing Layer that records every event.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

/// Visitor that stringifies event fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            target: event.metadata().target().to_string(),
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

/// Run `f` under a capturing subscriber and return the recorded events.
fn with_captured_events<F>(f: F) -> Vec<CapturedEvent>
where
    F: FnOnce(),
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn perf_logs(events: &[CapturedEvent]) -> Vec<&CapturedEvent> {
    events
        .iter()
        .filter(|e| e.target == "vitae::perf" && e.field("message") == Some("performance metrics"))
        .collect()
}

fn drive(gov: &mut FrameGovernor, frames: u32, step: Duration) {
    let mut t = Duration::ZERO;
    for _ in 0..frames {
        t += step;
        gov.observe(t);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn periodic_log_fires_every_interval() {
    let events = with_captured_events(|| {
        let mut gov = FrameGovernor::new(GovernorConfig::default(), Duration::ZERO);
        // 12 seconds at 50 fps.
        drive(&mut gov, 600, Duration::from_millis(20));
    });
    let logs = perf_logs(&events);
    assert_eq!(logs.len(), 2, "expected logs at 5 s and 10 s, got {logs:?}");
    assert!(logs.iter().all(|e| e.level == tracing::Level::INFO));
}

#[test]
fn periodic_log_carries_structured_snapshot() {
    let events = with_captured_events(|| {
        let mut gov = FrameGovernor::new(GovernorConfig::default(), Duration::ZERO);
        drive(&mut gov, 250, Duration::from_millis(20));
    });
    let logs = perf_logs(&events);
    let log = logs.first().expect("one periodic log");
    assert_eq!(log.field("fps"), Some("50"));
    assert_eq!(log.field("avg_fps"), Some("50"));
    assert_eq!(log.field("min_fps"), Some("50"));
    assert_eq!(log.field("memory"), Some("N/A"));
    assert_eq!(log.field("dropped"), Some("0"));
    assert_eq!(log.field("total"), Some("250"));
    assert_eq!(log.field("dropped_pct"), Some("0"));
    assert_eq!(log.field("rating"), Some("good"));
}

#[test]
fn disabled_log_stays_silent() {
    let events = with_captured_events(|| {
        let config = GovernorConfig::default().with_log_interval(None);
        let mut gov = FrameGovernor::new(config, Duration::ZERO);
        drive(&mut gov, 600, Duration::from_millis(20));
    });
    assert!(perf_logs(&events).is_empty());
}

#[test]
fn budget_changes_are_logged() {
    let events = with_captured_events(|| {
        let mut budget = AdaptiveShapeBudget::new(AdaptiveConfig::default(), 80);
        for _ in 0..3 {
            budget.observe(20);
        }
    });
    let change = events
        .iter()
        .find(|e| e.field("message") == Some("shape budget changed"))
        .expect("budget change event");
    assert_eq!(change.field("decision"), Some("degrade"));
    assert_eq!(change.field("shapes"), Some("60"));
}

#[test]
fn vitals_are_logged_on_their_own_target() {
    let events = with_captured_events(|| {
        let mut vitals = VitalsTracker::new();
        vitals.record_lcp(&[1200.0]);
        vitals.record_first_input(10.0, 250.0);
        vitals.record_layout_shifts(&[LayoutShift {
            value: 0.01,
            had_recent_input: false,
        }]);
    });
    let vitals: Vec<_> = events.iter().filter(|e| e.target == "vitae::vitals").collect();
    assert_eq!(vitals.len(), 3);
    assert_eq!(vitals[0].field("metric"), Some("LCP"));
    assert_eq!(vitals[0].field("rating"), Some("good"));
    assert_eq!(vitals[1].field("metric"), Some("FID"));
    assert_eq!(vitals[1].field("rating"), Some("needs_improvement"));
    assert_eq!(vitals[2].field("metric"), Some("CLS"));
}
