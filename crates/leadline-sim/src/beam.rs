//! Beam intersection tests.
//!
//! Decides whether an aim point lies "on" the observer's beam within a
//! tolerance radius. Pure geometry, no state.

use leadline_core::enums::HitStrategy;
use leadline_core::state::{BeamGeometry, HitTest};
use leadline_core::types::EntitySnapshot;
use leadline_core::Vec2;

/// Beam for an observer: starts at its position, points along its heading.
pub fn beam_for(observer: &EntitySnapshot, length: f64) -> BeamGeometry {
    BeamGeometry::new(observer.position, observer.heading, length)
}

/// Ellipse membership: `|c-a| + |c-b| <= |b-a| + r`.
///
/// The ellipse has its foci at the segment endpoints. At the midpoint its
/// half-width is `sqrt((L + r)^2 - L^2) / 2`, which is wider than `r` for long
/// beams; near the endpoints it tapers to `r / 2` past the tips.
pub fn ellipse_hit(a: Vec2, b: Vec2, c: Vec2, r: f64) -> bool {
    c.distance(a) + c.distance(b) <= a.distance(b) + r
}

/// Shortest distance from `c` to the segment `a..b`.
pub fn segment_distance(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return c.distance(a);
    }
    let t = ((c - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    c.distance(a + ab * t)
}

/// Capsule membership: distance from `c` to the segment `a..b` is at most `r`.
pub fn capsule_hit(a: Vec2, b: Vec2, c: Vec2, r: f64) -> bool {
    segment_distance(a, b, c) <= r
}

/// Test `aim_point` against `beam` with the chosen strategy.
pub fn test_hit(
    beam: &BeamGeometry,
    aim_point: Vec2,
    tolerance: f64,
    strategy: HitStrategy,
) -> HitTest {
    let a = beam.origin;
    let b = beam.end();
    let hit = match strategy {
        HitStrategy::Ellipse => ellipse_hit(a, b, aim_point, tolerance),
        HitStrategy::Capsule => capsule_hit(a, b, aim_point, tolerance),
    };
    HitTest {
        hit,
        aim_point,
        distance_to_origin: aim_point.distance(a),
        distance_to_end: aim_point.distance(b),
        segment_length: a.distance(b),
        strategy,
    }
}
