//! Per-tick output handed to the host after each pass.

use serde::{Deserialize, Serialize};

use crate::enums::HitStrategy;
use crate::types::{heading_vector, EntityId, Vec2};

/// The observer's firing line for the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BeamGeometry {
    pub origin: Vec2,
    /// Radians, 0 = -y.
    pub heading: f64,
    pub length: f64,
}

impl BeamGeometry {
    pub fn new(origin: Vec2, heading: f64, length: f64) -> Self {
        Self {
            origin,
            heading,
            length,
        }
    }

    /// Far endpoint of the beam.
    pub fn end(&self) -> Vec2 {
        self.origin + heading_vector(self.heading) * self.length
    }
}

/// Outcome of testing one aim point against the beam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitTest {
    pub hit: bool,
    pub aim_point: Vec2,
    pub distance_to_origin: f64,
    pub distance_to_end: f64,
    pub segment_length: f64,
    pub strategy: HitStrategy,
}

/// Everything the engine knows about one selected entity this tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetReport {
    pub id: EntityId,
    pub filtered_position: Vec2,
    pub filtered_velocity: Vec2,
    /// Exponentially smoothed raw position, for display interpolation.
    pub smoothed_position: Vec2,
    pub aim_point: Vec2,
    /// Empty unless `emit_future_path` is set.
    pub future_path: Vec<Vec2>,
    pub hit: HitTest,
    /// Distance from the observer to the entity's reported position.
    pub distance: f64,
}

/// Result of one state/prediction pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub beam: BeamGeometry,
    pub targets: Vec<TargetReport>,
    /// Observations refused during this pass.
    pub rejected_observations: u32,
    /// Tracks dropped for staleness during this pass.
    pub evicted_tracks: u32,
}

impl TickReport {
    /// True if any selected target's aim point lies on the beam.
    pub fn any_hit(&self) -> bool {
        self.targets.iter().any(|t| t.hit.hit)
    }
}

/// Result of one beam redraw pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BeamFrame {
    pub beam: BeamGeometry,
    /// A hit was registered within the feedback window.
    pub hit_active: bool,
}
