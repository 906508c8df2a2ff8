//! Entity spawn factories for the synthetic world.
//!
//! Creates the observer, hostile targets and teammates with their component
//! bundles. Randomized placement draws from the caller's seeded RNG.

use std::f64::consts::TAU;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use leadline_core::components::*;
use leadline_core::types::{EntityId, EntityKind, TeamId};
use leadline_core::Vec2;

/// Team of the observer and its teammates.
pub const OBSERVER_TEAM: TeamId = TeamId(1);

/// Team of every spawned target.
pub const HOSTILE_TEAM: TeamId = TeamId(2);

pub const OBSERVER_KIND: EntityKind = EntityKind(0);
pub const TARGET_KIND: EntityKind = EntityKind(1);

/// Target speed range, world units per tick.
const TARGET_SPEED: (f64, f64) = (0.5, 3.0);

/// Maximum target turn rate, radians per tick.
const TARGET_TURN_MAX: f64 = 0.01;

/// Spawn the observer. It never moves; `sweep_rate` turns its beam each tick.
pub fn spawn_observer(
    world: &mut World,
    id: EntityId,
    position: Vec2,
    heading: f64,
    sweep_rate: f64,
) -> hecs::Entity {
    world.spawn((
        Observer,
        Identity {
            id,
            team: OBSERVER_TEAM,
            kind: OBSERVER_KIND,
        },
        Kinematics {
            position,
            velocity: Vec2::ZERO,
            heading,
        },
        Maneuver {
            turn_rate: sweep_rate,
        },
        Status { alive: true },
    ))
}

/// Spawn a hostile target somewhere in the ring `0.2..0.6 * arena_radius`,
/// flying roughly across the arena center.
pub fn spawn_target(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    id: EntityId,
    arena_radius: f64,
    noise_amplitude: f64,
) -> hecs::Entity {
    let (position, velocity) = random_pass(rng, arena_radius);
    let turn_rate = rng.gen_range(-TARGET_TURN_MAX..=TARGET_TURN_MAX);
    spawn_mover(
        world,
        Identity {
            id,
            team: HOSTILE_TEAM,
            kind: TARGET_KIND,
        },
        Kinematics {
            position,
            velocity,
            heading: 0.0,
        },
        turn_rate,
        noise_amplitude,
    )
}

/// Spawn a same-team entity. Selection skips it unless teammates are included.
pub fn spawn_teammate(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    id: EntityId,
    arena_radius: f64,
    noise_amplitude: f64,
) -> hecs::Entity {
    let (position, velocity) = random_pass(rng, arena_radius);
    spawn_mover(
        world,
        Identity {
            id,
            team: OBSERVER_TEAM,
            kind: TARGET_KIND,
        },
        Kinematics {
            position,
            velocity,
            heading: 0.0,
        },
        0.0,
        noise_amplitude,
    )
}

/// Spawn any moving, sensed entity with explicit state. Used by the random
/// factories and by tests that need exact trajectories.
pub fn spawn_mover(
    world: &mut World,
    identity: Identity,
    kinematics: Kinematics,
    turn_rate: f64,
    noise_amplitude: f64,
) -> hecs::Entity {
    world.spawn((
        identity,
        kinematics,
        Maneuver { turn_rate },
        SensorNoise {
            amplitude: noise_amplitude,
        },
        Reported {
            position: kinematics.position,
            velocity: kinematics.velocity,
        },
        Status { alive: true },
    ))
}

/// Random start point and a velocity aimed near the origin.
fn random_pass(rng: &mut ChaCha8Rng, arena_radius: f64) -> (Vec2, Vec2) {
    let bearing = rng.gen_range(0.0..TAU);
    let range = rng.gen_range(0.2..0.6) * arena_radius;
    let position = Vec2::from_angle(bearing) * range;

    let aim = Vec2::new(
        rng.gen_range(-0.1..0.1) * arena_radius,
        rng.gen_range(-0.1..0.1) * arena_radius,
    );
    let speed = rng.gen_range(TARGET_SPEED.0..TARGET_SPEED.1);
    let velocity = (aim - position).normalize_or_zero() * speed;
    (position, velocity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_observer_bundle() {
        let mut world = World::new();
        let e = spawn_observer(&mut world, EntityId(1), Vec2::ZERO, 0.0, 0.01);
        assert!(world.get::<&Observer>(e).is_ok());
        assert_eq!(world.get::<&Identity>(e).unwrap().team, OBSERVER_TEAM);
        assert!(world.get::<&Reported>(e).is_err());
    }

    #[test]
    fn test_spawn_target_inside_ring() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for i in 0..20 {
            let e = spawn_target(&mut world, &mut rng, EntityId(10 + i), 1000.0, 1.0);
            let kin = *world.get::<&Kinematics>(e).unwrap();
            let range = kin.position.length();
            assert!((200.0..600.0).contains(&range), "range {range}");
            let speed = kin.velocity.length();
            assert!((0.5..3.0).contains(&speed), "speed {speed}");
            assert_eq!(world.get::<&Identity>(e).unwrap().team, HOSTILE_TEAM);
        }
    }

    #[test]
    fn test_teammate_shares_observer_team() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let e = spawn_teammate(&mut world, &mut rng, EntityId(5), 1000.0, 0.0);
        assert_eq!(world.get::<&Identity>(e).unwrap().team, OBSERVER_TEAM);
        assert_eq!(world.get::<&Maneuver>(e).unwrap().turn_rate, 0.0);
    }
}
