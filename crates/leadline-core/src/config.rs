//! Engine configuration snapshot.
//!
//! `EngineConfig` is immutable once handed to the engine. Retuning means
//! building a new value and swapping it in between passes.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{HitStrategy, SelectionMode, VelocityModel};
use crate::error::ConfigError;

/// Every tunable the engine and its scheduler read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // --- Prediction ---
    /// Lead distance for the short-horizon aim point (ticks of velocity).
    pub lead_distance: f64,
    /// Tolerance radius of the beam hit test.
    pub circle_radius: f64,
    /// Number of points in the future path.
    pub multi_step_count: usize,
    /// Step size of the future path (ticks).
    pub dt: f64,
    /// Whether reports carry the materialized future path.
    pub emit_future_path: bool,

    // --- Filtering ---
    pub process_noise: f64,
    pub observation_noise: f64,
    /// Exponential smoothing of the display position, in `[0, 2]`.
    pub smoothing_factor: f64,
    pub velocity_model: VelocityModel,
    /// Used by `VelocityModel::Innovation` only, in `[0, 1]`.
    pub velocity_gain: f64,
    /// Ticks a track may go unobserved before eviction.
    pub eviction_ticks: u64,
    /// Observations beyond this coordinate magnitude are rejected.
    pub world_bound: f64,

    // --- Selection ---
    pub selection: SelectionMode,
    pub include_teammates: bool,

    // --- Beam ---
    pub beam_length: f64,
    pub hit_strategy: HitStrategy,

    // --- Scheduling ---
    pub state_tick_hz: f64,
    pub beam_tick_hz: f64,
    /// How long a hit keeps the beam flagged (feedback window).
    pub hit_hold_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lead_distance: LEAD_DISTANCE,
            circle_radius: CIRCLE_RADIUS,
            multi_step_count: MULTI_STEP_COUNT,
            dt: PREDICTION_DT,
            emit_future_path: true,
            process_noise: PROCESS_NOISE,
            observation_noise: OBSERVATION_NOISE,
            smoothing_factor: SMOOTHING_FACTOR,
            velocity_model: VelocityModel::default(),
            velocity_gain: VELOCITY_GAIN,
            eviction_ticks: EVICTION_TICKS,
            world_bound: WORLD_BOUND,
            selection: SelectionMode::default(),
            include_teammates: false,
            beam_length: BEAM_LENGTH,
            hit_strategy: HitStrategy::default(),
            state_tick_hz: STATE_TICK_HZ,
            beam_tick_hz: BEAM_TICK_HZ,
            hit_hold_ms: HIT_HOLD_MS,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Copy of this config with the beam length taken from `BEAM_LENGTH_PRESETS`.
    pub fn with_beam_preset(&self, index: usize) -> Result<Self, ConfigError> {
        let length = BEAM_LENGTH_PRESETS
            .get(index)
            .copied()
            .ok_or(ConfigError::UnknownBeamPreset {
                index,
                available: BEAM_LENGTH_PRESETS.len(),
            })?;
        Ok(Self {
            beam_length: length,
            ..self.clone()
        })
    }

    /// Period of the state/prediction pass.
    pub fn state_period(&self) -> Duration {
        tick_period(self.state_tick_hz)
    }

    /// Period of the beam redraw pass.
    pub fn beam_period(&self) -> Duration {
        tick_period(self.beam_tick_hz)
    }

    pub fn hit_hold(&self) -> Duration {
        Duration::from_millis(self.hit_hold_ms)
    }

    /// Check every field for a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("lead_distance", self.lead_distance)?;
        non_negative("circle_radius", self.circle_radius)?;
        non_negative("dt", self.dt)?;
        non_negative("process_noise", self.process_noise)?;
        positive("observation_noise", self.observation_noise)?;
        within(
            "smoothing_factor",
            self.smoothing_factor,
            0.0,
            SMOOTHING_FACTOR_MAX,
        )?;
        within("velocity_gain", self.velocity_gain, 0.0, 1.0)?;
        positive("world_bound", self.world_bound)?;
        non_negative("beam_length", self.beam_length)?;
        within("state_tick_hz", self.state_tick_hz, MIN_TICK_HZ, MAX_TICK_HZ)?;
        within("beam_tick_hz", self.beam_tick_hz, MIN_TICK_HZ, MAX_TICK_HZ)?;
        if self.eviction_ticks == 0 {
            return Err(ConfigError::Invalid {
                field: "eviction_ticks",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Period for a pass rate. The rate is clamped to the accepted range first,
/// so an unvalidated config still yields a representable period.
fn tick_period(hz: f64) -> Duration {
    let hz = if hz.is_nan() {
        MIN_TICK_HZ
    } else {
        hz.clamp(MIN_TICK_HZ, MAX_TICK_HZ)
    };
    Duration::from_secs_f64(1.0 / hz)
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a finite value >= 0, got {value}"),
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a finite value > 0, got {value}"),
        })
    }
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a value in [{min}, {max}], got {value}"),
        })
    }
}
