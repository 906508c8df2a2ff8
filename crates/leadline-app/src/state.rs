//! State shared between the scheduled tasks.
//!
//! Everything a pass touches lives in one `Session` behind one mutex. A pass
//! holds the lock from start to finish, so the two tasks never interleave
//! inside a pass and a config swap always lands between passes.

use std::time::Instant;

use leadline_core::config::EngineConfig;
use leadline_core::error::ConfigError;
use leadline_core::state::{BeamFrame, TickReport};
use leadline_sim::{AimEngine, Scenario, ScenarioConfig};

use crate::latch::HitLatch;

/// Commands sent from the host to the loop threads.
#[derive(Debug)]
pub enum LoopCommand {
    /// Replace the active configuration snapshot.
    ApplyConfig(EngineConfig),
    /// Stop both loops.
    Shutdown,
}

/// Engine, entity source and feedback latch.
pub struct Session {
    pub engine: AimEngine,
    pub scenario: Scenario,
    pub latch: HitLatch,
}

impl Session {
    pub fn new(config: EngineConfig, scenario: &ScenarioConfig) -> Result<Self, ConfigError> {
        let engine = AimEngine::new(config)?;
        Ok(Self::from_parts(engine, Scenario::new(scenario)))
    }

    pub fn from_parts(engine: AimEngine, scenario: Scenario) -> Self {
        let latch = HitLatch::new(engine.config().hit_hold());
        Self {
            engine,
            scenario,
            latch,
        }
    }

    /// Advance the world one tick and run the engine over it.
    pub fn state_pass(&mut self, now: Instant) -> Option<TickReport> {
        self.scenario.step();
        let report = self.engine.tick(&self.scenario.feed())?;
        if report.any_hit() {
            self.latch.record(now);
        }
        Some(report)
    }

    /// Current beam and whether it is inside the hit feedback window.
    pub fn beam_pass(&self, now: Instant) -> Option<BeamFrame> {
        let beam = self.engine.beam(&self.scenario.live())?;
        Some(BeamFrame {
            beam,
            hit_active: self.latch.is_active(now),
        })
    }

    /// Swap the configuration; on refusal the old one stays active.
    pub fn apply_config(&mut self, config: EngineConfig) -> Result<(), ConfigError> {
        let hold = config.hit_hold();
        self.engine.apply_config(config)?;
        self.latch.set_hold(hold);
        Ok(())
    }
}
