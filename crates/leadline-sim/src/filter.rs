//! Motion filters used by the tracker.
//!
//! `MotionFilter` is the seam between the tracker and the estimator. The
//! default `AxisFilter` runs two independent one-dimensional Kalman filters
//! (x and y) over position; a coupled or higher-order filter only has to
//! implement the trait.

use leadline_core::config::EngineConfig;
use leadline_core::enums::VelocityModel;
use leadline_core::Vec2;

/// Constants a filter is built with. Fixed for the life of a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Per-axis growth of the error covariance per predict step.
    pub process_noise: Vec2,
    /// Per-axis measurement variance.
    pub observation_noise: Vec2,
    pub velocity_model: VelocityModel,
    pub velocity_gain: f64,
}

impl FilterParams {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            process_noise: Vec2::splat(config.process_noise),
            observation_noise: Vec2::splat(config.observation_noise),
            velocity_model: config.velocity_model,
            velocity_gain: config.velocity_gain,
        }
    }
}

impl Default for FilterParams {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// A position/velocity estimator advanced once per tick.
pub trait MotionFilter: Clone + std::fmt::Debug {
    /// Build a filter from the first observation of an entity.
    fn seed(position: Vec2, velocity: Vec2, params: &FilterParams) -> Self;

    /// Advance the estimate by one tick.
    fn predict(&mut self);

    /// Correct the estimate with an observation. Returns the per-axis gain applied.
    fn update(&mut self, observed_position: Vec2, observed_velocity: Vec2) -> Vec2;

    fn position(&self) -> Vec2;

    fn velocity(&self) -> Vec2;

    /// Per-axis error covariance. Never negative.
    fn covariance(&self) -> Vec2;
}

/// Decoupled per-axis filter over position.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisFilter {
    position: Vec2,
    velocity: Vec2,
    covariance: Vec2,
    process_noise: Vec2,
    observation_noise: Vec2,
    velocity_model: VelocityModel,
    velocity_gain: f64,
}

impl MotionFilter for AxisFilter {
    /// The first observation is taken as-is, which is the gain-1 update of a
    /// prior with no confidence. The posterior covariance of such an update is
    /// the observation noise itself.
    fn seed(position: Vec2, velocity: Vec2, params: &FilterParams) -> Self {
        Self {
            position,
            velocity,
            covariance: params.observation_noise,
            process_noise: params.process_noise,
            observation_noise: params.observation_noise,
            velocity_model: params.velocity_model,
            velocity_gain: params.velocity_gain,
        }
    }

    fn predict(&mut self) {
        self.position += self.velocity;
        self.covariance += self.process_noise;
    }

    fn update(&mut self, observed_position: Vec2, observed_velocity: Vec2) -> Vec2 {
        let innovation = observed_position - self.position;
        let gain = self.covariance / (self.covariance + self.observation_noise);

        self.position += gain * innovation;
        self.covariance *= Vec2::ONE - gain;

        match self.velocity_model {
            VelocityModel::Observed => self.velocity = observed_velocity,
            VelocityModel::Innovation => self.velocity += innovation * self.velocity_gain,
        }

        gain
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn covariance(&self) -> Vec2 {
        self.covariance
    }
}
