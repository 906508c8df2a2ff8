//! Hit feedback latch.
//!
//! The state task records hits; the beam task asks whether one happened
//! recently enough to keep the beam in its "hit" color.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct HitLatch {
    last_hit: Option<Instant>,
    hold: Duration,
}

impl HitLatch {
    pub fn new(hold: Duration) -> Self {
        Self {
            last_hit: None,
            hold,
        }
    }

    /// Note a hit at `now`.
    pub fn record(&mut self, now: Instant) {
        self.last_hit = Some(now);
    }

    /// True while `now` is within `hold` of the last recorded hit.
    pub fn is_active(&self, now: Instant) -> bool {
        self.last_hit
            .is_some_and(|at| now.saturating_duration_since(at) < self.hold)
    }

    pub fn set_hold(&mut self, hold: Duration) {
        self.hold = hold;
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }
}
