//! Fundamental geometric and entity types.

use serde::{Deserialize, Serialize};

/// 2D point or vector in world units (x = right, y = down).
pub type Vec2 = glam::DVec2;

/// Stable identifier of an entity in the host feed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EntityId(pub u32);

/// Team membership as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u32);

/// Opaque host classification of an entity (airframe, unit type...).
/// The core never interprets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKind(pub u16);

/// One entity as seen by the feed on the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub position: Vec2,
    /// World units per tick.
    pub velocity: Vec2,
    /// Rotation in radians. 0 points along -y.
    pub heading: f64,
    pub team: TeamId,
    pub kind: EntityKind,
    pub alive: bool,
    /// True for the entity the beam belongs to.
    pub is_observer: bool,
}

impl EntitySnapshot {
    /// A live, stationary, non-observer entity at `position`.
    pub fn new(id: EntityId, position: Vec2) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            heading: 0.0,
            team: TeamId::default(),
            kind: EntityKind::default(),
            alive: true,
            is_observer: false,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    pub fn with_team(mut self, team: TeamId) -> Self {
        self.team = team;
        self
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn dead(mut self) -> Self {
        self.alive = false;
        self
    }

    pub fn observer(mut self) -> Self {
        self.is_observer = true;
        self
    }

    /// Euclidean distance from this entity to a point.
    pub fn distance_to(&self, point: Vec2) -> f64 {
        self.position.distance(point)
    }
}

/// Unit vector for a heading, using the host convention that heading 0
/// points along -y and rotation is clockwise on screen.
pub fn heading_vector(heading: f64) -> Vec2 {
    Vec2::new(heading.sin(), -heading.cos())
}
