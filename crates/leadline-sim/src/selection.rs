//! Target selection policy.
//!
//! Narrows the feed to the entities the tracker should follow. The order of
//! the input slice is the tie-break order, so the same feed always selects the
//! same targets.

use leadline_core::enums::SelectionMode;
use leadline_core::types::{EntitySnapshot, TeamId};
use leadline_core::Vec2;

/// Entities eligible for tracking, in input order.
///
/// The observer and dead entities are always dropped; same-team entities are
/// dropped unless `include_teammates` is set.
pub fn visible(
    candidates: &[EntitySnapshot],
    observer_team: TeamId,
    include_teammates: bool,
) -> impl Iterator<Item = &EntitySnapshot> + '_ {
    candidates.iter().filter(move |e| {
        e.alive && !e.is_observer && (include_teammates || e.team != observer_team)
    })
}

/// The candidate nearest to `observer_position`.
///
/// Ties go to the first candidate encountered. A lone candidate is returned
/// whatever its distance; non-finite distances rank last.
pub fn closest<'a>(
    observer_position: Vec2,
    candidates: impl IntoIterator<Item = &'a EntitySnapshot>,
) -> Option<&'a EntitySnapshot> {
    let rank = |e: &EntitySnapshot| {
        let d = e.distance_to(observer_position);
        if d.is_nan() {
            f64::INFINITY
        } else {
            d
        }
    };
    candidates
        .into_iter()
        .min_by(|a, b| rank(*a).total_cmp(&rank(*b)))
}

/// Apply `visible`, then narrow according to `mode`.
pub fn select<'a>(
    observer: &EntitySnapshot,
    candidates: &'a [EntitySnapshot],
    mode: SelectionMode,
    include_teammates: bool,
) -> Vec<&'a EntitySnapshot> {
    let eligible = visible(candidates, observer.team, include_teammates);
    match mode {
        SelectionMode::Closest => closest(observer.position, eligible).into_iter().collect(),
        SelectionMode::All => eligible.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadline_core::types::EntityId;

    fn at(id: u32, x: f64, y: f64) -> EntitySnapshot {
        EntitySnapshot::new(EntityId(id), Vec2::new(x, y)).with_team(TeamId(2))
    }

    fn ids<'a>(entities: impl IntoIterator<Item = &'a EntitySnapshot>) -> Vec<u32> {
        entities.into_iter().map(|e| e.id.0).collect()
    }

    #[test]
    fn test_closest_empty() {
        let none: [EntitySnapshot; 0] = [];
        assert!(closest(Vec2::ZERO, &none).is_none());
    }

    #[test]
    fn test_closest_single_regardless_of_distance() {
        let far = [at(1, 1.0e9, -1.0e9)];
        assert_eq!(closest(Vec2::ZERO, &far).map(|e| e.id), Some(EntityId(1)));

        let lost = [at(2, f64::NAN, 0.0)];
        assert_eq!(closest(Vec2::ZERO, &lost).map(|e| e.id), Some(EntityId(2)));
    }

    #[test]
    fn test_closest_picks_minimum() {
        let entities = [at(1, 300.0, 0.0), at(2, 0.0, -50.0), at(3, 80.0, 80.0)];
        assert_eq!(closest(Vec2::ZERO, &entities).map(|e| e.id), Some(EntityId(2)));
    }

    #[test]
    fn test_closest_tie_goes_to_first() {
        let entities = [at(5, 0.0, 100.0), at(3, 100.0, 0.0), at(9, -100.0, 0.0)];
        assert_eq!(closest(Vec2::ZERO, &entities).map(|e| e.id), Some(EntityId(5)));

        let reordered = [at(3, 100.0, 0.0), at(5, 0.0, 100.0), at(9, -100.0, 0.0)];
        assert_eq!(closest(Vec2::ZERO, &reordered).map(|e| e.id), Some(EntityId(3)));
    }

    #[test]
    fn test_closest_skips_nan_when_others_exist() {
        let entities = [at(1, f64::NAN, 0.0), at(2, 500.0, 0.0)];
        assert_eq!(closest(Vec2::ZERO, &entities).map(|e| e.id), Some(EntityId(2)));
    }

    #[test]
    fn test_visible_filters() {
        let me = at(0, 0.0, 0.0).with_team(TeamId(1)).observer();
        let entities = [
            me,
            at(1, 10.0, 0.0),
            at(2, 20.0, 0.0).dead(),
            at(3, 30.0, 0.0).with_team(TeamId(1)),
            at(4, 40.0, 0.0),
        ];

        assert_eq!(ids(visible(&entities, me.team, false)), vec![1, 4]);
        assert_eq!(ids(visible(&entities, me.team, true)), vec![1, 3, 4]);
    }

    #[test]
    fn test_select_applies_visibility_before_closest() {
        let me = at(0, 0.0, 0.0).with_team(TeamId(1)).observer();
        let entities = [
            me,
            at(1, 5.0, 0.0).with_team(TeamId(1)),
            at(2, 8.0, 0.0).dead(),
            at(3, 50.0, 0.0),
            at(4, 40.0, 0.0),
        ];

        let picked = select(&me, &entities, SelectionMode::Closest, false);
        assert_eq!(ids(picked), vec![4]);

        let picked = select(&me, &entities, SelectionMode::Closest, true);
        assert_eq!(ids(picked), vec![1]);

        let picked = select(&me, &entities, SelectionMode::All, false);
        assert_eq!(ids(picked), vec![3, 4]);
    }

    #[test]
    fn test_select_nothing_eligible() {
        let me = at(0, 0.0, 0.0).observer();
        let entities = [me, at(1, 1.0, 1.0).dead()];
        assert!(select(&me, &entities, SelectionMode::Closest, true).is_empty());
        assert!(select(&me, &entities, SelectionMode::All, true).is_empty());
    }
}
