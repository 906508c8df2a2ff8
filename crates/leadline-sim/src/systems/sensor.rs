//! Sensor system: produces the reported position the host would see.
//!
//! Truth plus uniform jitter, drawn from the shared seeded RNG so a run is
//! reproducible from its seed.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use leadline_core::components::{Kinematics, Reported, SensorNoise};
use leadline_core::Vec2;

/// Refresh `Reported` on every entity that carries one.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng) {
    for (_entity, (kin, reported, noise)) in
        world.query_mut::<(&Kinematics, &mut Reported, Option<&SensorNoise>)>()
    {
        let jitter = match noise {
            Some(n) if n.amplitude > 0.0 => Vec2::new(
                rng.gen_range(-n.amplitude..=n.amplitude),
                rng.gen_range(-n.amplitude..=n.amplitude),
            ),
            _ => Vec2::ZERO,
        };
        reported.position = kin.position + jitter;
        reported.velocity = kin.velocity;
    }
}
