//! Aim engine: one tick pass from entity feed to hit signal.
//!
//! `AimEngine` owns the tracker and the active configuration snapshot. Each
//! call to `tick` runs selection, tracking, prediction and the beam test
//! synchronously. `&mut self` makes passes non-reentrant; a host running
//! several scheduled tasks must serialize them around the engine.

use tracing::{debug, trace, warn};

use leadline_core::config::EngineConfig;
use leadline_core::error::ConfigError;
use leadline_core::state::{BeamGeometry, TargetReport, TickReport};

use crate::beam;
use crate::feed::EntityFeed;
use crate::filter::{AxisFilter, MotionFilter};
use crate::predictor;
use crate::selection;
use crate::tracker::{EntityStateTracker, TrackState};

/// The estimation / prediction / intersection pipeline.
pub struct AimEngine<F: MotionFilter = AxisFilter> {
    config: EngineConfig,
    tracker: EntityStateTracker<F>,
    tick: u64,
}

impl<F: MotionFilter> AimEngine<F> {
    /// Create an engine with a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tracker: EntityStateTracker::new(&config),
            config,
            tick: 0,
        })
    }

    /// Swap in a new configuration snapshot.
    ///
    /// An invalid snapshot is refused and the current one stays active.
    pub fn apply_config(&mut self, config: EngineConfig) -> Result<(), ConfigError> {
        if let Err(e) = config.validate() {
            warn!(error = %e, "config refused");
            return Err(e);
        }
        if self.tracker.reconfigure(&config) {
            debug!("filter constants changed; tracks will reseed");
        }
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tracker(&self) -> &EntityStateTracker<F> {
        &self.tracker
    }

    /// Number of ticks started, including skipped ones.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Run one full pass over `feed`.
    ///
    /// Returns `None` when the feed has no observer; nothing else is done on
    /// such a tick, but the tick counter still advances.
    pub fn tick(&mut self, feed: &impl EntityFeed) -> Option<TickReport> {
        self.tick += 1;
        let tick = self.tick;

        let Some(observer) = feed.observer() else {
            trace!(tick, "no observer, pass skipped");
            return None;
        };

        let config = &self.config;
        let beam = beam::beam_for(&observer, config.beam_length);
        let entities = feed.snapshots();
        let selected = selection::select(
            &observer,
            &entities,
            config.selection,
            config.include_teammates,
        );

        let mut report = TickReport {
            tick,
            beam,
            ..Default::default()
        };

        for target in selected {
            let track = match self.tracker.observe(target, tick) {
                Ok(track) => track,
                Err(_) => {
                    report.rejected_observations += 1;
                    // Hold the previous estimate if there is one.
                    match self.tracker.get(target.id) {
                        Some(track) => track,
                        None => continue,
                    }
                }
            };

            report.targets.push(assess(
                config,
                &beam,
                &track,
                observer.position.distance(target.position),
            ));
        }

        report.evicted_tracks = self.tracker.evict_stale(tick) as u32;

        if report.any_hit() {
            trace!(tick, "aim point on beam");
        }
        Some(report)
    }

    /// Beam geometry for the current observer, for the redraw pass.
    pub fn beam(&self, feed: &impl EntityFeed) -> Option<BeamGeometry> {
        feed.observer()
            .map(|observer| beam::beam_for(&observer, self.config.beam_length))
    }
}

/// Predict and test one tracked target.
fn assess(
    config: &EngineConfig,
    beam: &BeamGeometry,
    track: &TrackState,
    distance: f64,
) -> TargetReport {
    let prediction = predictor::predict(
        track.estimated_position,
        track.estimated_velocity,
        config,
    );
    let hit = beam::test_hit(
        beam,
        prediction.aim_point,
        config.circle_radius,
        config.hit_strategy,
    );
    let future_path = if config.emit_future_path {
        prediction.path.collect()
    } else {
        Vec::new()
    };

    TargetReport {
        id: track.id,
        filtered_position: track.estimated_position,
        filtered_velocity: track.estimated_velocity,
        smoothed_position: track.smoothed_position,
        aim_point: prediction.aim_point,
        future_path,
        hit,
        distance,
    }
}
