//! Enumeration types used throughout the engine.

use serde::{Deserialize, Serialize};

/// Which visible entities are handed to the tracker each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Only the visible entity closest to the observer.
    #[default]
    Closest,
    /// Every visible entity.
    All,
}

/// Geometry used to decide whether an aim point lies on the beam.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitStrategy {
    /// `|C-A| + |C-B| <= |B-A| + r`: membership in an ellipse with foci at
    /// the beam endpoints. Narrower than a capsule near the endpoints.
    #[default]
    Ellipse,
    /// Perpendicular point-to-segment distance `<= r`.
    Capsule,
}

/// Source of the velocity a track uses for its predict step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityModel {
    /// Velocity is taken verbatim from each observation. The filter only
    /// smooths position.
    #[default]
    Observed,
    /// Velocity is corrected from the position innovation every update
    /// (alpha-beta style), ignoring the reported velocity after seeding.
    Innovation,
}
