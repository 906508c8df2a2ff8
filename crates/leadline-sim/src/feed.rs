//! Entity feed abstraction.
//!
//! The engine reads the host's entities only through `EntityFeed`. The order
//! of `ids()` is the first-encountered order used for selection tie-breaks.

use leadline_core::types::{EntityId, EntitySnapshot};

/// Read-only view of the host's live entities for one tick.
pub trait EntityFeed {
    fn get(&self, id: EntityId) -> Option<EntitySnapshot>;

    /// Ids of every live entity, in a stable order.
    fn ids(&self) -> Vec<EntityId>;

    /// The entity that owns the beam, if one is present this tick.
    fn observer(&self) -> Option<EntitySnapshot> {
        self.ids()
            .into_iter()
            .filter_map(|id| self.get(id))
            .find(|e| e.is_observer)
    }

    /// Every entity, in `ids()` order.
    fn snapshots(&self) -> Vec<EntitySnapshot> {
        self.ids()
            .into_iter()
            .filter_map(|id| self.get(id))
            .collect()
    }
}

/// A feed backed by a plain list of snapshots, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotFeed {
    entities: Vec<EntitySnapshot>,
}

impl SnapshotFeed {
    pub fn new(entities: Vec<EntitySnapshot>) -> Self {
        Self { entities }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<EntitySnapshot> for SnapshotFeed {
    fn from_iter<I: IntoIterator<Item = EntitySnapshot>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl EntityFeed for SnapshotFeed {
    fn get(&self, id: EntityId) -> Option<EntitySnapshot> {
        self.entities.iter().find(|e| e.id == id).copied()
    }

    fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    fn observer(&self) -> Option<EntitySnapshot> {
        self.entities.iter().find(|e| e.is_observer).copied()
    }

    fn snapshots(&self) -> Vec<EntitySnapshot> {
        self.entities.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadline_core::Vec2;

    /// A feed that only implements the required methods, so the defaults run.
    struct Minimal(Vec<EntitySnapshot>);

    impl EntityFeed for Minimal {
        fn get(&self, id: EntityId) -> Option<EntitySnapshot> {
            self.0.iter().find(|e| e.id == id).copied()
        }

        fn ids(&self) -> Vec<EntityId> {
            self.0.iter().rev().map(|e| e.id).collect()
        }
    }

    fn entities() -> Vec<EntitySnapshot> {
        vec![
            EntitySnapshot::new(EntityId(1), Vec2::new(1.0, 0.0)),
            EntitySnapshot::new(EntityId(2), Vec2::ZERO).observer(),
            EntitySnapshot::new(EntityId(3), Vec2::new(3.0, 0.0)),
        ]
    }

    #[test]
    fn test_snapshot_feed_order_and_lookup() {
        let feed: SnapshotFeed = entities().into_iter().collect();
        assert_eq!(feed.ids(), vec![EntityId(1), EntityId(2), EntityId(3)]);
        assert_eq!(feed.get(EntityId(3)).map(|e| e.position.x), Some(3.0));
        assert!(feed.get(EntityId(9)).is_none());
        assert_eq!(feed.observer().map(|e| e.id), Some(EntityId(2)));
    }

    #[test]
    fn test_default_methods_follow_ids_order() {
        let feed = Minimal(entities());
        let order: Vec<u32> = feed.snapshots().iter().map(|e| e.id.0).collect();
        assert_eq!(order, vec![3, 2, 1]);
        assert_eq!(feed.observer().map(|e| e.id), Some(EntityId(2)));
    }

    #[test]
    fn test_no_observer() {
        let feed = SnapshotFeed::new(vec![EntitySnapshot::new(EntityId(1), Vec2::ZERO)]);
        assert!(feed.observer().is_none());
        assert!(Minimal(Vec::new()).observer().is_none());
    }
}
