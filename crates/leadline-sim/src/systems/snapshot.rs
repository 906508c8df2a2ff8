//! Snapshot system: exposes the world to the engine as an `EntityFeed`.
//!
//! Read-only; it never modifies the world.

use hecs::World;

use leadline_core::components::{Identity, Kinematics, Observer, Reported, Status};
use leadline_core::types::{EntityId, EntitySnapshot};

use crate::feed::{EntityFeed, SnapshotFeed};

/// Build the snapshot of one entity. `Reported` wins over truth when present.
fn snapshot_of(world: &World, entity: hecs::Entity) -> Option<EntitySnapshot> {
    let identity = *world.get::<&Identity>(entity).ok()?;
    let kin = *world.get::<&Kinematics>(entity).ok()?;
    let (position, velocity) = match world.get::<&Reported>(entity) {
        Ok(reported) => (reported.position, reported.velocity),
        Err(_) => (kin.position, kin.velocity),
    };
    let alive = world.get::<&Status>(entity).map_or(true, |s| s.alive);

    let mut snapshot = EntitySnapshot::new(identity.id, position)
        .with_velocity(velocity)
        .with_heading(kin.heading)
        .with_team(identity.team)
        .with_kind(identity.kind);
    snapshot.alive = alive;
    snapshot.is_observer = world.get::<&Observer>(entity).is_ok();
    Some(snapshot)
}

/// Every identified entity, sorted by `EntityId` so the order does not depend
/// on archetype layout.
fn sorted_snapshots(world: &World) -> Vec<EntitySnapshot> {
    let mut entities: Vec<EntitySnapshot> = world
        .query::<&Identity>()
        .iter()
        .filter_map(|(entity, _)| snapshot_of(world, entity))
        .collect();
    entities.sort_by_key(|e| e.id);
    entities
}

/// Owned feed of the whole world, in id order.
pub fn build_feed(world: &World) -> SnapshotFeed {
    SnapshotFeed::new(sorted_snapshots(world))
}

/// Live view over a borrowed world.
pub struct WorldFeed<'w> {
    world: &'w World,
}

impl<'w> WorldFeed<'w> {
    pub fn new(world: &'w World) -> Self {
        Self { world }
    }
}

impl EntityFeed for WorldFeed<'_> {
    fn get(&self, id: EntityId) -> Option<EntitySnapshot> {
        let entity = self
            .world
            .query::<&Identity>()
            .iter()
            .find(|(_, identity)| identity.id == id)
            .map(|(entity, _)| entity)?;
        snapshot_of(self.world, entity)
    }

    fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .world
            .query::<&Identity>()
            .iter()
            .map(|(_, identity)| identity.id)
            .collect();
        ids.sort();
        ids
    }

    /// Lowest-id observer, from a single query over observer entities.
    fn observer(&self) -> Option<EntitySnapshot> {
        self.world
            .query::<&Identity>()
            .with::<&Observer>()
            .iter()
            .filter_map(|(entity, _)| snapshot_of(self.world, entity))
            .min_by_key(|e| e.id)
    }

    fn snapshots(&self) -> Vec<EntitySnapshot> {
        sorted_snapshots(self.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadline_core::components::SensorNoise;
    use leadline_core::types::{EntityKind, TeamId};
    use leadline_core::Vec2;

    fn identity(id: u32) -> Identity {
        Identity {
            id: EntityId(id),
            team: TeamId(2),
            kind: EntityKind::default(),
        }
    }

    fn populate() -> World {
        let mut world = World::new();
        world.spawn((
            identity(3),
            Kinematics {
                position: Vec2::new(30.0, 0.0),
                ..Default::default()
            },
            Reported {
                position: Vec2::new(31.0, 1.0),
                velocity: Vec2::new(0.5, 0.0),
            },
            SensorNoise { amplitude: 1.0 },
            Status { alive: true },
        ));
        world.spawn((
            identity(1),
            Kinematics {
                heading: 0.5,
                ..Default::default()
            },
            Observer,
        ));
        world.spawn((
            identity(2),
            Kinematics {
                position: Vec2::new(20.0, 0.0),
                ..Default::default()
            },
            Status { alive: false },
        ));
        // No identity: invisible to the feed.
        world.spawn((Kinematics::default(),));
        world
    }

    #[test]
    fn test_build_feed_sorted_and_reported() {
        let world = populate();
        let feed = build_feed(&world);

        assert_eq!(feed.ids(), vec![EntityId(1), EntityId(2), EntityId(3)]);
        let observer = feed.observer().unwrap();
        assert_eq!(observer.id, EntityId(1));
        assert_eq!(observer.heading, 0.5);
        assert!(!feed.get(EntityId(2)).unwrap().alive);
        assert_eq!(feed.get(EntityId(3)).unwrap().position, Vec2::new(31.0, 1.0));
    }

    #[test]
    fn test_world_feed_observer_is_lowest_id() {
        let mut world = populate();
        world.spawn((
            identity(0),
            Kinematics {
                heading: 1.5,
                ..Default::default()
            },
            Observer,
        ));

        let live = WorldFeed::new(&world);
        assert_eq!(live.observer().map(|e| e.id), Some(EntityId(0)));
        assert_eq!(live.observer(), build_feed(&world).observer());
    }

    #[test]
    fn test_world_feed_matches_built_feed() {
        let world = populate();
        let live = WorldFeed::new(&world);
        assert_eq!(live.snapshots(), build_feed(&world).snapshots());
        assert_eq!(live.observer().map(|e| e.id), Some(EntityId(1)));
        assert!(live.get(EntityId(9)).is_none());
    }
}
