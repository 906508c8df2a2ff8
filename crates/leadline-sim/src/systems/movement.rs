//! Kinematic integration system.
//!
//! Applies each entity's maneuver, then `position += velocity`.

use hecs::World;

use leadline_core::components::{Kinematics, Maneuver, Observer};
use leadline_core::Vec2;

/// Advance every entity with `Kinematics` by one tick.
pub fn run(world: &mut World) {
    // Observer: the maneuver sweeps the beam heading.
    for (_entity, (kin, maneuver, _)) in
        world.query_mut::<(&mut Kinematics, &Maneuver, &Observer)>()
    {
        kin.heading = (kin.heading + maneuver.turn_rate).rem_euclid(std::f64::consts::TAU);
    }

    // Everyone else: the maneuver bends the velocity.
    for (_entity, (kin, maneuver)) in world
        .query_mut::<(&mut Kinematics, &Maneuver)>()
        .without::<&Observer>()
    {
        if maneuver.turn_rate != 0.0 {
            kin.velocity = Vec2::from_angle(maneuver.turn_rate).rotate(kin.velocity);
        }
    }

    for (_entity, kin) in world.query_mut::<&mut Kinematics>() {
        kin.position += kin.velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_line() {
        let mut world = World::new();
        let e = world.spawn((Kinematics {
            position: Vec2::new(1.0, 2.0),
            velocity: Vec2::new(3.0, -1.0),
            heading: 0.0,
        },));

        run(&mut world);
        run(&mut world);

        let kin = *world.get::<&Kinematics>(e).unwrap();
        assert_eq!(kin.position, Vec2::new(7.0, 0.0));
    }

    #[test]
    fn test_turn_preserves_speed() {
        let mut world = World::new();
        let e = world.spawn((
            Kinematics {
                position: Vec2::ZERO,
                velocity: Vec2::new(4.0, 0.0),
                heading: 0.0,
            },
            Maneuver {
                turn_rate: std::f64::consts::FRAC_PI_2,
            },
        ));

        run(&mut world);

        let kin = *world.get::<&Kinematics>(e).unwrap();
        assert!((kin.velocity - Vec2::new(0.0, 4.0)).length() < 1e-9);
        assert!((kin.velocity.length() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_observer_sweeps_heading_not_velocity() {
        let mut world = World::new();
        let e = world.spawn((
            Observer,
            Kinematics::default(),
            Maneuver { turn_rate: 0.25 },
        ));

        for _ in 0..4 {
            run(&mut world);
        }

        let kin = *world.get::<&Kinematics>(e).unwrap();
        assert!((kin.heading - 1.0).abs() < 1e-12);
        assert_eq!(kin.velocity, Vec2::ZERO);
    }
}
