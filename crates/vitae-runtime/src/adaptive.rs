#![forbid(unsafe_code)]

//! Closed-loop shape budget.
//!
//! The static [`crate::recommend`] table picks a starting population from the
//! device class. [`AdaptiveShapeBudget`] then follows the per-second FPS
//! aggregates and steps the population down when the device cannot keep up,
//! and back up (never past the static ceiling) once it recovers.
//!
//! ```text
//! fps sample ─► below degrade_below_fps? ─► streak ≥ patience ─► DEGRADE (−25%, floor)
//!            └► above upgrade_above_fps? ─► streak ≥ patience ─► UPGRADE (+25%, ceiling)
//!            └► otherwise / cooling down ─────────────────────► HOLD
//! ```
//!
//! The gap between the two thresholds plus the cooldown keeps the budget from
//! oscillating around a boundary.

/// Tuning for [`AdaptiveShapeBudget`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdaptiveConfig {
    /// Samples strictly below this count toward a degrade.
    pub degrade_below_fps: u32,
    /// Samples strictly above this count toward an upgrade.
    pub upgrade_above_fps: u32,
    /// Consecutive qualifying samples required before acting.
    pub patience: u32,
    /// Samples ignored after every change.
    pub cooldown_samples: u32,
    /// Fractional step per change.
    pub step_fraction: f64,
    /// Population never drops below this (unless the ceiling is lower).
    pub min_shapes: usize,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            degrade_below_fps: 45,
            upgrade_above_fps: 57,
            patience: 3,
            cooldown_samples: 5,
            step_fraction: 0.25,
            min_shapes: 10,
        }
    }
}

/// Decision output from the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BudgetDecision {
    /// Keep the current population.
    Hold,
    /// Population was reduced.
    Degrade,
    /// Population was increased.
    Upgrade,
}

impl BudgetDecision {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hold => "hold",
            Self::Degrade => "degrade",
            Self::Upgrade => "upgrade",
        }
    }

    /// Whether the host must re-initialize the field.
    #[inline]
    pub fn is_change(self) -> bool {
        self != Self::Hold
    }
}

/// Shape-count controller driven by FPS samples.
#[derive(Debug, Clone)]
pub struct AdaptiveShapeBudget {
    config: AdaptiveConfig,
    ceiling: usize,
    current: usize,
    below_streak: u32,
    above_streak: u32,
    cooldown: u32,
    last_decision: BudgetDecision,
}

impl AdaptiveShapeBudget {
    /// Start at `ceiling` (normally the static recommendation).
    pub fn new(config: AdaptiveConfig, ceiling: usize) -> Self {
        Self {
            config,
            ceiling,
            current: ceiling,
            below_streak: 0,
            above_streak: 0,
            cooldown: 0,
            last_decision: BudgetDecision::Hold,
        }
    }

    fn floor(&self) -> usize {
        self.config.min_shapes.min(self.ceiling)
    }

    /// Feed one per-second FPS sample.
    pub fn observe(&mut self, fps: u32) -> BudgetDecision {
        if fps < self.config.degrade_below_fps {
            self.below_streak = self.below_streak.saturating_add(1);
            self.above_streak = 0;
        } else if fps > self.config.upgrade_above_fps {
            self.above_streak = self.above_streak.saturating_add(1);
            self.below_streak = 0;
        } else {
            self.below_streak = 0;
            self.above_streak = 0;
        }

        let decision = if self.cooldown > 0 {
            self.cooldown -= 1;
            BudgetDecision::Hold
        } else if self.below_streak >= self.config.patience && self.current > self.floor() {
            let step = self.step(self.current);
            self.current = self.current.saturating_sub(step).max(self.floor());
            BudgetDecision::Degrade
        } else if self.above_streak >= self.config.patience && self.current < self.ceiling {
            let step = self.step(self.current);
            self.current = self.current.saturating_add(step).min(self.ceiling);
            BudgetDecision::Upgrade
        } else {
            BudgetDecision::Hold
        };

        if decision.is_change() {
            self.cooldown = self.config.cooldown_samples;
            self.below_streak = 0;
            self.above_streak = 0;
            tracing::info!(
                target: "vitae::perf",
                decision = decision.as_str(),
                fps,
                shapes = self.current,
                ceiling = self.ceiling,
                "shape budget changed"
            );
        }
        self.last_decision = decision;
        decision
    }

    /// At least one shape per change.
    fn step(&self, from: usize) -> usize {
        ((from as f64 * self.config.step_fraction).round() as usize).max(1)
    }

    /// Current target population.
    #[inline]
    pub fn shape_count(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Change the ceiling (e.g. on battery change), clamping the current value.
    pub fn set_ceiling(&mut self, ceiling: usize) {
        self.ceiling = ceiling;
        self.current = self.current.min(ceiling);
    }

    #[inline]
    pub fn last_decision(&self) -> BudgetDecision {
        self.last_decision
    }

    /// Back to the ceiling with no history.
    pub fn reset(&mut self) {
        self.current = self.ceiling;
        self.below_streak = 0;
        self.above_streak = 0;
        self.cooldown = 0;
        self.last_decision = BudgetDecision::Hold;
    }

    #[inline]
    pub fn config(&self) -> &AdaptiveConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(ceiling: usize) -> AdaptiveShapeBudget {
        AdaptiveShapeBudget::new(AdaptiveConfig::default(), ceiling)
    }

    #[test]
    fn starts_at_ceiling() {
        let b = budget(80);
        assert_eq!(b.shape_count(), 80);
        assert_eq!(b.last_decision(), BudgetDecision::Hold);
    }

    #[test]
    fn degrades_after_patience() {
        let mut b = budget(80);
        assert_eq!(b.observe(30), BudgetDecision::Hold);
        assert_eq!(b.observe(30), BudgetDecision::Hold);
        assert_eq!(b.observe(30), BudgetDecision::Degrade);
        assert_eq!(b.shape_count(), 60);
    }

    #[test]
    fn single_good_sample_breaks_streak() {
        let mut b = budget(80);
        b.observe(30);
        b.observe(30);
        b.observe(50);
        assert_eq!(b.observe(30), BudgetDecision::Hold);
        assert_eq!(b.shape_count(), 80);
    }

    #[test]
    fn cooldown_holds_after_change() {
        let mut b = budget(80);
        for _ in 0..3 {
            b.observe(20);
        }
        assert_eq!(b.shape_count(), 60);
        for _ in 0..5 {
            assert_eq!(b.observe(20), BudgetDecision::Hold);
        }
        // Cooldown consumed; the streak built during it counts.
        assert_eq!(b.observe(20), BudgetDecision::Degrade);
        assert_eq!(b.shape_count(), 45);
    }

    #[test]
    fn never_below_floor() {
        let mut b = budget(80);
        for _ in 0..200 {
            b.observe(5);
        }
        assert_eq!(b.shape_count(), 10);
    }

    #[test]
    fn floor_respects_small_ceiling() {
        let mut b = budget(4);
        for _ in 0..50 {
            b.observe(5);
        }
        assert_eq!(b.shape_count(), 4);
    }

    #[test]
    fn upgrades_back_to_ceiling_only() {
        let mut b = budget(80);
        for _ in 0..200 {
            b.observe(5);
        }
        for _ in 0..500 {
            b.observe(60);
        }
        assert_eq!(b.shape_count(), 80);
    }

    #[test]
    fn dead_band_holds() {
        let mut b = budget(80);
        for fps in [45, 50, 57, 45, 57] {
            assert_eq!(b.observe(fps), BudgetDecision::Hold);
        }
    }

    #[test]
    fn set_ceiling_clamps() {
        let mut b = budget(80);
        b.set_ceiling(30);
        assert_eq!(b.shape_count(), 30);
        b.reset();
        assert_eq!(b.shape_count(), 30);
    }

    #[test]
    fn decision_names() {
        assert_eq!(BudgetDecision::Degrade.as_str(), "degrade");
        assert!(!BudgetDecision::Hold.is_change());
    }
}
