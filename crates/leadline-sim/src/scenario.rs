//! Seeded synthetic scenario: a hecs world with one observer and a handful of
//! moving targets. Stands in for a game host in tests and the CLI runner.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use leadline_core::types::EntityId;
use leadline_core::Vec2;

use crate::feed::SnapshotFeed;
use crate::systems;
use crate::systems::snapshot::WorldFeed;
use crate::world_setup;

/// Id given to the observer; targets and teammates follow it.
pub const OBSERVER_ID: EntityId = EntityId(1);

/// Configuration for a synthetic run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// RNG seed. Same seed = same world history.
    pub seed: u64,
    pub targets: usize,
    pub teammates: usize,
    /// Half-width of the uniform sensor jitter (world units).
    pub noise_amplitude: f64,
    /// Entities beyond this distance from the origin are removed.
    pub arena_radius: f64,
    /// Observer beam sweep, radians per tick.
    pub sweep_rate: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            targets: 3,
            teammates: 1,
            noise_amplitude: 1.5,
            arena_radius: 1500.0,
            sweep_rate: 0.01,
        }
    }
}

/// A running synthetic world.
pub struct Scenario {
    world: World,
    rng: ChaCha8Rng,
    tick: u64,
    arena_radius: f64,
    despawn_buffer: Vec<hecs::Entity>,
}

impl Scenario {
    /// Build the world: observer at the origin, then targets, then teammates.
    pub fn new(config: &ScenarioConfig) -> Self {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        world_setup::spawn_observer(&mut world, OBSERVER_ID, Vec2::ZERO, 0.0, config.sweep_rate);

        let mut next_id = OBSERVER_ID.0 + 1;
        for _ in 0..config.targets {
            world_setup::spawn_target(
                &mut world,
                &mut rng,
                EntityId(next_id),
                config.arena_radius,
                config.noise_amplitude,
            );
            next_id += 1;
        }
        for _ in 0..config.teammates {
            world_setup::spawn_teammate(
                &mut world,
                &mut rng,
                EntityId(next_id),
                config.arena_radius,
                config.noise_amplitude,
            );
            next_id += 1;
        }

        debug!(
            seed = config.seed,
            targets = config.targets,
            teammates = config.teammates,
            "scenario built"
        );

        Self {
            world,
            rng,
            tick: 0,
            arena_radius: config.arena_radius,
            despawn_buffer: Vec::new(),
        }
    }

    /// Wrap an already populated world, e.g. one built by hand in a test.
    pub fn from_world(world: World, seed: u64, arena_radius: f64) -> Self {
        Self {
            world,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: 0,
            arena_radius,
            despawn_buffer: Vec::new(),
        }
    }

    /// Advance the world one tick: move, cull, then sense.
    pub fn step(&mut self) {
        systems::movement::run(&mut self.world);
        let removed =
            systems::cleanup::run(&mut self.world, self.arena_radius, &mut self.despawn_buffer);
        if removed > 0 {
            debug!(tick = self.tick, removed, "entities left the arena");
        }
        systems::sensor::run(&mut self.world, &mut self.rng);
        self.tick += 1;
    }

    /// Owned snapshot of the current world, sorted by id.
    pub fn feed(&self) -> SnapshotFeed {
        systems::snapshot::build_feed(&self.world)
    }

    /// Borrowed live view of the current world.
    pub fn live(&self) -> WorldFeed<'_> {
        WorldFeed::new(&self.world)
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn world(&self) -> &World {
        &self.world
    }
}
