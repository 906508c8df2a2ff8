//! Trajectory prediction from a position/velocity estimate.
//!
//! Two forward projections are produced per target: a single lead point from
//! a quadratic curve evaluated at its midpoint, and a lazily generated path of
//! constant-velocity steps.

use std::iter::FusedIterator;

use leadline_core::config::EngineConfig;
use leadline_core::Vec2;

/// Evaluate the quadratic Bezier curve `p0, p1, p2` at `t`.
pub fn quadratic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, t: f64) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

/// Lead point `lead_distance` ticks of velocity ahead, taken as the midpoint
/// of the curve `position -> position + velocity * lead_distance`.
///
/// With the middle control point on the straight line this equals
/// `position + velocity * lead_distance / 2`. The curve form leaves room for a
/// bent middle control point (e.g. from an acceleration estimate).
pub fn short_horizon_aim_point(position: Vec2, velocity: Vec2, lead_distance: f64) -> Vec2 {
    let p0 = position;
    let p1 = position + velocity * (lead_distance / 2.0);
    let p2 = position + velocity * lead_distance;
    quadratic_bezier(p0, p1, p2, 0.5)
}

/// Lazy constant-velocity extrapolation.
///
/// Yields `position + velocity * dt * (k + 1)` for `k` in `0..count`. Holds no
/// state beyond its inputs; clone it to replay the path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathIter {
    origin: Vec2,
    step: Vec2,
    next: usize,
    count: usize,
}

impl Iterator for PathIter {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.next >= self.count {
            return None;
        }
        self.next += 1;
        Some(self.origin + self.step * self.next as f64)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PathIter {}

impl FusedIterator for PathIter {}

/// `step_count` future positions spaced `dt` ticks apart. `dt` is expected
/// to be `>= 0`; `dt = 0` repeats `position`.
pub fn multi_step_path(position: Vec2, velocity: Vec2, step_count: usize, dt: f64) -> PathIter {
    PathIter {
        origin: position,
        step: velocity * dt,
        next: 0,
        count: step_count,
    }
}

/// Both projections for one target.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub aim_point: Vec2,
    pub path: PathIter,
}

/// Project an estimate forward with the configured lead and path settings.
pub fn predict(position: Vec2, velocity: Vec2, config: &EngineConfig) -> Prediction {
    Prediction {
        aim_point: short_horizon_aim_point(position, velocity, config.lead_distance),
        path: multi_step_path(position, velocity, config.multi_step_count, config.dt),
    }
}
