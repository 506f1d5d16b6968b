//! Pointer hit testing
//!
//! The hit region is generous on purpose: a circle around the heart's visual
//! center (slightly below its anchor) united with the full bounding square.

use glam::Vec2;

use super::state::{FallingEntity, GameState};
use crate::consts::*;

/// Does a pointer at `point` touch this entity?
pub fn hit_test(entity: &FallingEntity, point: Vec2) -> bool {
    let center = entity.pos + Vec2::new(0.0, entity.radius * HIT_CENTER_OFFSET);
    let d = point - center;
    let in_circle = d.length() < entity.radius * HIT_RADIUS_SCALE + HIT_SLOP;
    let in_box = d.x.abs() < entity.radius && d.y.abs() < entity.radius;
    in_circle || in_box
}

/// Index of the topmost (latest spawned) entity under the pointer
pub fn find_hit(entities: &[FallingEntity], point: Vec2) -> Option<usize> {
    entities.iter().rposition(|e| hit_test(e, point))
}

/// Remove and return the topmost entity under the pointer, if any
pub fn resolve_hit(state: &mut GameState, point: Vec2) -> Option<FallingEntity> {
    let index = find_hit(&state.entities, point)?;
    Some(state.entities.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::default_levels;
    use crate::sim::kind::EntityKind;
    use proptest::prelude::*;

    fn entity(id: u32, x: f32, y: f32) -> FallingEntity {
        FallingEntity::new(id, EntityKind::Normal, Vec2::new(x, y), Vec2::ZERO)
    }

    #[test]
    fn test_hit_region() {
        let e = entity(1, 100.0, 100.0);
        // Dead center of the visual heart
        assert!(hit_test(&e, Vec2::new(100.0, 118.0)));
        // Inside the circle tolerance (r*0.9 + 20 = 47) but outside the box
        assert!(hit_test(&e, Vec2::new(100.0, 118.0 + 45.0)));
        // Well away
        assert!(!hit_test(&e, Vec2::new(200.0, 200.0)));

        // Big hearts: box corner reaches past the circle
        let mut big = entity(2, 100.0, 100.0);
        big.radius = 100.0;
        assert!(hit_test(&big, Vec2::new(195.0, 160.0 - 95.0)));
        assert!(!hit_test(&big, Vec2::new(205.0, 160.0 - 95.0)));
    }

    #[test]
    fn test_topmost_wins() {
        let mut state = GameState::new(1, Vec2::new(800.0, 600.0), default_levels()).unwrap();
        state.entities.push(entity(1, 100.0, 100.0));
        state.entities.push(entity(2, 105.0, 100.0));

        let hit = resolve_hit(&mut state, Vec2::new(102.0, 118.0)).unwrap();
        assert_eq!(hit.id, 2);
        assert_eq!(state.entities.len(), 1);
        assert_eq!(state.entities[0].id, 1);
    }

    #[test]
    fn test_miss_leaves_entities() {
        let mut state = GameState::new(1, Vec2::new(800.0, 600.0), default_levels()).unwrap();
        state.entities.push(entity(1, 100.0, 100.0));
        assert!(resolve_hit(&mut state, Vec2::new(-500.0, 900.0)).is_none());
        assert_eq!(state.entities.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_at_most_one_removed(
            xs in prop::collection::vec(40.0f32..760.0, 0..12),
            px in 0.0f32..800.0,
            py in 0.0f32..600.0,
        ) {
            let mut state = GameState::new(1, Vec2::new(800.0, 600.0), default_levels()).unwrap();
            for (i, x) in xs.iter().enumerate() {
                state.entities.push(entity(i as u32 + 1, *x, 300.0));
            }
            let before = state.entities.len();
            let hit = resolve_hit(&mut state, Vec2::new(px, py));
            let removed = before - state.entities.len();
            prop_assert_eq!(removed, hit.is_some() as usize);
            if let Some(hit) = hit {
                // Nothing later in spawn order was also under the pointer
                prop_assert!(state.entities.iter().filter(|e| e.id > hit.id).all(|e| !hit_test(e, Vec2::new(px, py))));
            }
        }
    }
}
