//! Cleanup system: removes entities that have left the arena.

use hecs::{Entity, World};

use leadline_core::components::{Kinematics, Observer};

/// Despawn every non-observer entity farther than `arena_radius` from the
/// origin. Uses a caller-owned buffer to avoid per-tick allocation.
/// Returns the number of entities removed.
pub fn run(world: &mut World, arena_radius: f64, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    let radius_sq = arena_radius * arena_radius;
    for (entity, kin) in world.query_mut::<&Kinematics>().without::<&Observer>() {
        if kin.position.length_squared() > radius_sq {
            despawn_buffer.push(entity);
        }
    }

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}
