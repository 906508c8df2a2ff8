//! Entity state tracker.
//!
//! Owns one filter per observed entity id. Tracks are created on the first
//! valid observation of an id and evicted once the id goes unobserved for
//! `eviction_ticks` ticks. Invalid observations are refused before they reach
//! any filter.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, warn};

use leadline_core::config::EngineConfig;
use leadline_core::error::ObservationError;
use leadline_core::types::{EntityId, EntitySnapshot};
use leadline_core::Vec2;

use crate::filter::{AxisFilter, FilterParams, MotionFilter};

/// Read-only view of one track after its latest update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackState {
    pub id: EntityId,
    pub estimated_position: Vec2,
    pub estimated_velocity: Vec2,
    pub error_covariance: Vec2,
    pub process_noise: Vec2,
    pub observation_noise: Vec2,
    /// Exponentially smoothed raw position. Display only; never fed back
    /// into the filter.
    pub smoothed_position: Vec2,
    pub last_seen_tick: u64,
    /// Number of observations folded in, including the seeding one.
    pub updates: u64,
}

#[derive(Debug, Clone)]
struct Track<F> {
    filter: F,
    smoothed_position: Vec2,
    last_seen_tick: u64,
    updates: u64,
}

/// Per-entity filter bank with staleness eviction.
#[derive(Debug, Clone)]
pub struct EntityStateTracker<F: MotionFilter = AxisFilter> {
    tracks: HashMap<EntityId, Track<F>>,
    params: FilterParams,
    smoothing_factor: f64,
    eviction_ticks: u64,
    world_bound: f64,
    rejected_total: u64,
}

impl<F: MotionFilter> EntityStateTracker<F> {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            tracks: HashMap::new(),
            params: FilterParams::from_config(config),
            smoothing_factor: config.smoothing_factor,
            eviction_ticks: config.eviction_ticks,
            world_bound: config.world_bound,
            rejected_total: 0,
        }
    }

    /// Adopt a new configuration snapshot.
    ///
    /// Tracks are built with fixed filter constants, so a change to any of
    /// them drops every track; the next observations reseed. Returns true if
    /// tracks were dropped.
    pub fn reconfigure(&mut self, config: &EngineConfig) -> bool {
        let params = FilterParams::from_config(config);
        let reset = params != self.params;
        if reset && !self.tracks.is_empty() {
            debug!(tracks = self.tracks.len(), "filter constants changed, dropping tracks");
            self.clear();
        }
        self.params = params;
        self.smoothing_factor = config.smoothing_factor;
        self.eviction_ticks = config.eviction_ticks;
        self.world_bound = config.world_bound;
        reset
    }

    /// Fold one observation of `entity` into its track.
    ///
    /// The first valid observation of an id seeds the track; later ones run
    /// `predict` once per tick since the previous update (at least once, at
    /// most `eviction_ticks` times), then `update`. On error the track (if
    /// any) is untouched.
    pub fn observe(
        &mut self,
        entity: &EntitySnapshot,
        tick: u64,
    ) -> Result<TrackState, ObservationError> {
        if let Err(e) = self.validate(entity) {
            self.rejected_total += 1;
            warn!(error = %e, "observation rejected");
            return Err(e);
        }

        let smoothing = self.smoothing_factor;
        let eviction_ticks = self.eviction_ticks.max(1);
        let track = match self.tracks.entry(entity.id) {
            Entry::Occupied(slot) => {
                let track = slot.into_mut();
                // One predict per tick elapsed since the last update, so
                // ticks the entity was skipped or rejected still advance it.
                let elapsed = tick
                    .saturating_sub(track.last_seen_tick)
                    .clamp(1, eviction_ticks);
                for _ in 0..elapsed {
                    track.filter.predict();
                }
                track.filter.update(entity.position, entity.velocity);
                track.smoothed_position +=
                    (entity.position - track.smoothed_position) * smoothing;
                track.last_seen_tick = tick;
                track.updates += 1;
                track
            }
            Entry::Vacant(slot) => {
                debug!(id = entity.id.0, tick, "track created");
                slot.insert(Track {
                    filter: F::seed(entity.position, entity.velocity, &self.params),
                    smoothed_position: entity.position,
                    last_seen_tick: tick,
                    updates: 1,
                })
            }
        };

        Ok(view(entity.id, track, &self.params))
    }

    /// Drop tracks not observed for `eviction_ticks` ticks. Returns how many were dropped.
    pub fn evict_stale(&mut self, tick: u64) -> usize {
        let limit = self.eviction_ticks;
        let before = self.tracks.len();
        self.tracks.retain(|id, track| {
            let keep = tick.saturating_sub(track.last_seen_tick) < limit;
            if !keep {
                debug!(id = id.0, last_seen = track.last_seen_tick, tick, "track evicted");
            }
            keep
        });
        before - self.tracks.len()
    }

    pub fn get(&self, id: EntityId) -> Option<TrackState> {
        self.tracks
            .get(&id)
            .map(|track| view(id, track, &self.params))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.tracks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Observations refused since construction.
    pub fn rejected_total(&self) -> u64 {
        self.rejected_total
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    fn validate(&self, entity: &EntitySnapshot) -> Result<(), ObservationError> {
        let (id, p, v) = (entity.id, entity.position, entity.velocity);
        if !p.is_finite() {
            return Err(ObservationError::NonFinitePosition { id, x: p.x, y: p.y });
        }
        if !v.is_finite() {
            return Err(ObservationError::NonFiniteVelocity { id, x: v.x, y: v.y });
        }
        if p.abs().max_element() > self.world_bound {
            return Err(ObservationError::OutOfBounds {
                id,
                x: p.x,
                y: p.y,
                bound: self.world_bound,
            });
        }
        Ok(())
    }
}

fn view<F: MotionFilter>(id: EntityId, track: &Track<F>, params: &FilterParams) -> TrackState {
    TrackState {
        id,
        estimated_position: track.filter.position(),
        estimated_velocity: track.filter.velocity(),
        error_covariance: track.filter.covariance(),
        process_noise: params.process_noise,
        observation_noise: params.observation_noise,
        smoothed_position: track.smoothed_position,
        last_seen_tick: track.last_seen_tick,
        updates: track.updates,
    }
}
