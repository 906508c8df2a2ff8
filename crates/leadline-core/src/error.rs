//! Error types for observation intake and configuration.

use thiserror::Error;

use crate::types::EntityId;

/// Reasons an observation is refused by the tracker.
///
/// A refused observation never reaches filter state; the previous estimate
/// for the entity is kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObservationError {
    #[error("entity {id:?}: non-finite position ({x}, {y})")]
    NonFinitePosition { id: EntityId, x: f64, y: f64 },

    #[error("entity {id:?}: non-finite velocity ({x}, {y})")]
    NonFiniteVelocity { id: EntityId, x: f64, y: f64 },

    #[error("entity {id:?}: position ({x}, {y}) outside world bound {bound}")]
    OutOfBounds {
        id: EntityId,
        x: f64,
        y: f64,
        bound: f64,
    },
}

/// Problems loading or validating an `EngineConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("beam preset {index} out of range (have {available})")]
    UnknownBeamPreset { index: usize, available: usize },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
