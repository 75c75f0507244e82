//! Property-based invariant tests for the frame governor and policies.
//!
//! 1. `total_frames` equals the number of observe calls.
//! 2. `dropped_frames` equals the number of deltas above the threshold.
//! 3. The sample window never exceeds its capacity.
//! 4. `min_fps <= average_fps` whenever the window is non-empty.
//! 5. Reset is idempotent and returns to `Warming`.
//! 6. The adaptive budget stays within `[floor, ceiling]`.
//! 7. Ratings are monotone in average FPS.

use proptest::prelude::*;
use std::time::Duration;
use vitae_runtime::{
    AdaptiveConfig, AdaptiveShapeBudget, FrameGovernor, FrameMetrics, GovernorConfig,
    GovernorState, PerformanceRating,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn deltas_strategy() -> impl Strategy<Value = Vec<u64>> {
    // Frame deltas in microseconds: from very fast to multi-second stalls.
    proptest::collection::vec(0u64..2_500_000, 0..600)
}

fn config() -> GovernorConfig {
    GovernorConfig::default().with_log_interval(None)
}

fn rank(r: PerformanceRating) -> u8 {
    match r {
        PerformanceRating::Poor => 0,
        PerformanceRating::Fair => 1,
        PerformanceRating::Good => 2,
        PerformanceRating::Excellent => 3,
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1–4. Counters and window
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn counters_and_window_invariants(deltas in deltas_strategy(), capacity in 1usize..80) {
        let cfg = config().with_window_capacity(capacity);
        let threshold = cfg.dropped_threshold();
        let mut gov = FrameGovernor::new(cfg, Duration::ZERO);

        let mut t = Duration::ZERO;
        let mut expected_dropped = 0u64;
        for &d in &deltas {
            let delta = Duration::from_micros(d);
            if delta > threshold {
                expected_dropped += 1;
            }
            t += delta;
            gov.observe(t);
            prop_assert!(gov.samples().len() <= capacity);
        }

        let m = gov.metrics();
        prop_assert_eq!(m.total_frames, deltas.len() as u64);
        prop_assert_eq!(m.dropped_frames, expected_dropped);
        if gov.samples().len() > 0 {
            prop_assert_eq!(gov.state(), GovernorState::Steady);
            prop_assert!(m.min_fps <= m.average_fps);
            let max = gov.samples().max().unwrap_or(0);
            prop_assert!(m.average_fps <= max);
        } else {
            prop_assert_eq!(m.average_fps, 0);
            prop_assert_eq!(m.min_fps, 0);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Reset
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reset_is_idempotent(deltas in deltas_strategy()) {
        let mut gov = FrameGovernor::new(config(), Duration::ZERO);
        let mut t = Duration::ZERO;
        for &d in &deltas {
            t += Duration::from_micros(d);
            gov.observe(t);
        }
        gov.reset(t);
        let once = gov.metrics();
        gov.reset(t);
        prop_assert_eq!(gov.metrics(), once);
        prop_assert_eq!(once, FrameMetrics::default());
        prop_assert_eq!(gov.state(), GovernorState::Warming);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Adaptive budget bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn adaptive_budget_stays_bounded(
        ceiling in 0usize..200,
        samples in proptest::collection::vec(0u32..120, 0..300),
    ) {
        let config = AdaptiveConfig::default();
        let floor = config.min_shapes.min(ceiling);
        let mut budget = AdaptiveShapeBudget::new(config, ceiling);
        for fps in samples {
            budget.observe(fps);
            prop_assert!(budget.shape_count() >= floor);
            prop_assert!(budget.shape_count() <= ceiling);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Rating monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rating_monotone_in_fps(a in 0u32..120, b in 0u32..120, pct in 0.0f64..50.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            rank(PerformanceRating::classify(lo, pct)) <= rank(PerformanceRating::classify(hi, pct))
        );
    }
}
