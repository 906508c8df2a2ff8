//! Aim-assist prediction engine.
//!
//! Tracks entities from a per-tick feed, projects their motion forward and
//! tests the projected aim points against the observer's beam. Headless and
//! deterministic; a seeded hecs world stands in for the host in tests.

pub mod beam;
pub mod engine;
pub mod feed;
pub mod filter;
pub mod predictor;
pub mod scenario;
pub mod selection;
pub mod systems;
pub mod tracker;
pub mod world_setup;

pub use engine::AimEngine;
pub use feed::{EntityFeed, SnapshotFeed};
pub use leadline_core as core;
pub use scenario::{Scenario, ScenarioConfig};
