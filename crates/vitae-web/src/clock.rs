#![forbid(unsafe_code)]

//! Monotonic frame clocks.

use std::time::Duration;

use web_time::Instant;

/// Monotonic time source read once per frame.
pub trait FrameClock {
    /// Time since an arbitrary fixed origin. Never decreases.
    fn now_mono(&self) -> Duration;
}

impl<C: FrameClock + ?Sized> FrameClock for &C {
    fn now_mono(&self) -> Duration {
        (**self).now_mono()
    }
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl FrameClock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}

/// Wall clock backed by `performance.now()` on wasm and `Instant` elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for WallClock {
    fn now_mono(&self) -> Duration {
        self.origin.elapsed()
    }
}
