//! ECS components for the synthetic world.
//!
//! Components are plain data structs with no methods.
//! Behavior lives in the sim crate's systems.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, EntityKind, TeamId, Vec2};

/// Marker for the entity that owns the beam.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Observer;

/// Host-facing identity of an entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Identity {
    pub id: EntityId,
    pub team: TeamId,
    pub kind: EntityKind,
}

/// Ground-truth motion state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: Vec2,
    /// World units per tick.
    pub velocity: Vec2,
    /// Radians, 0 = -y.
    pub heading: f64,
}

/// Whether the entity is currently in play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Status {
    pub alive: bool,
}

/// Constant turn applied every tick. For targets it rotates the velocity;
/// for the observer it sweeps the heading.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Maneuver {
    /// Radians per tick.
    pub turn_rate: f64,
}

/// Measurement jitter applied when the sensor reports the entity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SensorNoise {
    /// Half-width of the uniform position error (world units).
    pub amplitude: f64,
}

/// What the host feed reports this tick (truth plus sensor error).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Reported {
    pub position: Vec2,
    pub velocity: Vec2,
}
