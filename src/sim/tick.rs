//! Per-frame simulation step and pointer input
//!
//! The simulation is variable-step: `dt` (ms) scales every timer, while
//! entity motion is one velocity step per frame.

use glam::Vec2;

use super::effects;
use super::flow;
use super::hit;
use super::kind::{EntityKind, MissEffect};
use super::scoring;
use super::spawn;
use super::state::{GameMode, GameState};
use crate::consts::*;

/// Advance the game state by one frame of `dt` milliseconds
pub fn tick(state: &mut GameState, dt: f32) {
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT_MS) } else { 0.0 };

    match state.mode {
        GameMode::Countdown { .. } => flow::advance_countdown(state, dt),

        GameMode::Playing => {
            spawn::update_spawner(state, dt);
            scoring::decay_combo(state, dt);
            update_entities(state);
            effects::update_particles(&mut state.particles, dt);
            effects::update_texts(&mut state.texts, dt);
        }

        // Confetti and the victory banner play out on the epilogue screens
        GameMode::Victory | GameMode::Success => {
            effects::update_particles(&mut state.particles, dt);
            effects::update_texts(&mut state.texts, dt);
        }

        _ => {}
    }
}

/// Move entities, bounce them off the side walls and cull the ones that fell out
pub fn update_entities(state: &mut GameState) {
    let width = state.width();
    let floor = state.height() + CULL_MARGIN;

    let mut fallen: Vec<(EntityKind, Vec2)> = Vec::new();
    state.entities.retain_mut(|e| {
        e.pos += e.vel;
        if e.pos.x < e.radius || e.pos.x > width - e.radius {
            e.vel.x = -e.vel.x;
        }
        if e.pos.y > floor {
            fallen.push((e.kind(), e.pos));
            return false;
        }
        true
    });

    for (kind, pos) in fallen {
        match kind.profile().on_miss {
            MissEffect::BreakCombo => state.run.combo = 0,
            MissEffect::Dodged => {
                state.run.stats.traps_dodged += 1;
                if state.roll() < NEAR_MISS_CHANCE {
                    let msg = state.pick(effects::NEAR_MISS);
                    let at = Vec2::new(pos.x, state.height() - NEAR_MISS_TEXT_LIFT);
                    effects::float_text_sized(state, at, msg, 0xaaaaaa, 14.0);
                }
            }
            MissEffect::Discard => {}
        }
    }
}

/// Handle one pointer-down at `point` (surface coordinates).
///
/// Ignored outside of play. Returns the kind of the entity hit, if any.
pub fn tap(state: &mut GameState, point: Vec2) -> Option<EntityKind> {
    if state.mode != GameMode::Playing {
        return None;
    }
    state.run.stats.clicks += 1;
    effects::spark(state, point, 0xffffff, TAP_PARTICLE_SIZE);

    let entity = hit::resolve_hit(state, point)?;
    state.run.stats.hits += 1;
    log::debug!("hit #{} {:?}", entity.id, entity.kind());
    scoring::apply_hit(state, &entity);
    Some(entity.kind())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::default_levels;
    use crate::sim::state::FallingEntity;
    use crate::sim::events::GameEvent;

    fn playing() -> GameState {
        let mut s = GameState::new(12345, Vec2::new(800.0, 600.0), default_levels()).unwrap();
        s.mode = GameMode::Playing;
        s
    }

    fn push(s: &mut GameState, kind: EntityKind, pos: Vec2, vel: Vec2) -> u32 {
        let id = s.next_entity_id();
        s.entities.push(FallingEntity::new(id, kind, pos, vel));
        id
    }

    #[test]
    fn test_tick_moves_entities_once() {
        let mut s = playing();
        push(&mut s, EntityKind::Normal, Vec2::new(400.0, 100.0), Vec2::new(0.5, 2.0));
        tick(&mut s, 16.0);
        assert_eq!(s.entities[0].pos, Vec2::new(400.5, 102.0));
    }

    #[test]
    fn test_wall_bounce() {
        let mut s = playing();
        push(&mut s, EntityKind::Normal, Vec2::new(31.0, 100.0), Vec2::new(-2.0, 1.0));
        update_entities(&mut s);
        assert_eq!(s.entities[0].vel.x, 2.0);
        update_entities(&mut s);
        assert_eq!(s.entities[0].pos.x, 31.0);
    }

    #[test]
    fn test_culling_effects() {
        let mut s = playing();
        s.run.combo = 4;
        s.run.score = 70;
        push(&mut s, EntityKind::Normal, Vec2::new(100.0, 649.0), Vec2::new(0.0, 2.0));
        push(&mut s, EntityKind::Broken, Vec2::new(300.0, 649.0), Vec2::new(0.0, 2.0));
        push(&mut s, EntityKind::Nuke, Vec2::new(500.0, 649.0), Vec2::new(0.0, 2.0));
        let survivor = push(&mut s, EntityKind::Golden, Vec2::new(600.0, 300.0), Vec2::new(0.0, 2.0));

        update_entities(&mut s);
        assert_eq!(s.entities.len(), 1);
        assert_eq!(s.entities[0].id, survivor);
        assert_eq!(s.run.combo, 0);
        assert_eq!(s.run.score, 70);
        assert_eq!(s.run.stats.traps_dodged, 1);
    }

    #[test]
    fn test_golden_miss_breaks_combo() {
        let mut s = playing();
        s.run.combo = 6;
        push(&mut s, EntityKind::Golden, Vec2::new(100.0, 649.0), Vec2::new(0.0, 2.0));
        update_entities(&mut s);
        assert!(s.entities.is_empty());
        assert_eq!(s.run.combo, 0);
    }

    #[test]
    fn test_near_miss_text_only_for_dodged_hazards() {
        let near_miss = |s: &GameState| {
            s.texts
                .iter()
                .filter(|t| effects::NEAR_MISS.contains(&t.text.as_str()))
                .count()
        };

        let mut shown = 0;
        for seed in 0..200 {
            let mut s = GameState::new(seed, Vec2::new(800.0, 600.0), default_levels()).unwrap();
            s.mode = GameMode::Playing;
            push(&mut s, EntityKind::Broken, Vec2::new(300.0, 649.0), Vec2::new(0.0, 2.0));
            update_entities(&mut s);
            assert_eq!(s.run.stats.traps_dodged, 1);
            if near_miss(&s) == 1 {
                shown += 1;
                assert!((s.texts[0].pos.y - (600.0 - NEAR_MISS_TEXT_LIFT)).abs() < 1e-3);
            }

            let mut s = GameState::new(seed, Vec2::new(800.0, 600.0), default_levels()).unwrap();
            s.mode = GameMode::Playing;
            for kind in [
                EntityKind::Normal,
                EntityKind::Golden,
                EntityKind::Boss,
                EntityKind::Slow,
                EntityKind::Nuke,
            ] {
                push(&mut s, kind, Vec2::new(300.0, 649.0), Vec2::new(0.0, 2.0));
            }
            update_entities(&mut s);
            assert!(s.texts.is_empty());
        }
        assert!(shown > 0 && shown < 200);
    }

    #[test]
    fn test_tapping_slow_scores_and_slows_everything() {
        let mut s = playing();
        push(&mut s, EntityKind::Slow, Vec2::new(200.0, 200.0), Vec2::ZERO);
        push(&mut s, EntityKind::Normal, Vec2::new(500.0, 100.0), Vec2::new(0.0, 4.0));
        push(&mut s, EntityKind::Broken, Vec2::new(650.0, 100.0), Vec2::new(0.0, 4.0));

        assert_eq!(tap(&mut s, Vec2::new(200.0, 218.0)), Some(EntityKind::Slow));
        assert_eq!(s.run.score, BASE_SCORE);
        assert_eq!(s.run.combo, 1);
        assert_eq!(s.entities.len(), 2);
        assert!(s.entities.iter().all(|e| (e.vel.y - 2.0).abs() < 1e-6));
    }

    #[test]
    fn test_tapping_nuke_scores_and_clears_hazards() {
        let mut s = playing();
        push(&mut s, EntityKind::Broken, Vec2::new(100.0, 100.0), Vec2::new(0.0, 4.0));
        push(&mut s, EntityKind::Nuke, Vec2::new(400.0, 200.0), Vec2::ZERO);
        push(&mut s, EntityKind::Broken, Vec2::new(600.0, 100.0), Vec2::new(0.0, 4.0));
        let keeper = push(&mut s, EntityKind::Normal, Vec2::new(700.0, 300.0), Vec2::new(0.0, 4.0));

        assert_eq!(tap(&mut s, Vec2::new(400.0, 218.0)), Some(EntityKind::Nuke));
        assert_eq!(s.run.score, BASE_SCORE);
        assert_eq!(s.run.stats.hits, 1);
        assert_eq!(s.entities.len(), 1);
        assert_eq!(s.entities[0].id, keeper);
        assert!(s.particles.len() > 3 * EXPLOSION_PARTICLES);
    }

    #[test]
    fn test_epilogue_texts_expire() {
        let mut s = playing();
        flow::win(&mut s);
        assert_eq!(s.mode, GameMode::Victory);
        assert!(!s.texts.is_empty());
        for _ in 0..20 {
            tick(&mut s, 100.0);
        }
        assert!(s.texts.is_empty());
    }

    #[test]
    fn test_entity_on_cull_line_survives() {
        let mut s = playing();
        push(&mut s, EntityKind::Normal, Vec2::new(100.0, 648.0), Vec2::new(0.0, 2.0));
        update_entities(&mut s);
        assert_eq!(s.entities.len(), 1);
    }

    #[test]
    fn test_tap_counts_clicks_and_hits() {
        let mut s = playing();
        push(&mut s, EntityKind::Normal, Vec2::new(200.0, 200.0), Vec2::ZERO);

        assert_eq!(tap(&mut s, Vec2::new(700.0, 50.0)), None);
        assert_eq!(tap(&mut s, Vec2::new(200.0, 218.0)), Some(EntityKind::Normal));
        assert_eq!(s.run.stats.clicks, 2);
        assert_eq!(s.run.stats.hits, 1);
        assert_eq!(s.run.stats.accuracy(), 50);
        assert!(s.entities.is_empty());
    }

    #[test]
    fn test_tap_ignored_when_not_playing() {
        let mut s = playing();
        s.mode = GameMode::Paused;
        push(&mut s, EntityKind::Normal, Vec2::new(200.0, 200.0), Vec2::ZERO);
        assert_eq!(tap(&mut s, Vec2::new(200.0, 218.0)), None);
        assert_eq!(s.run.stats.clicks, 0);
        assert_eq!(s.entities.len(), 1);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut s = playing();
        push(&mut s, EntityKind::Normal, Vec2::new(200.0, 200.0), Vec2::new(0.0, 3.0));
        s.run.combo = 3;
        s.run.combo_timer = 500.0;
        s.spawn_timer = 900.0;

        flow::toggle_pause(&mut s);
        for _ in 0..100 {
            tick(&mut s, 16.0);
        }
        flow::toggle_pause(&mut s);

        assert_eq!(s.mode, GameMode::Playing);
        assert_eq!(s.entities[0].pos, Vec2::new(200.0, 200.0));
        assert_eq!(s.run.combo, 3);
        assert_eq!(s.run.combo_timer, 500.0);
        assert_eq!(s.spawn_timer, 900.0);
    }

    #[test]
    fn test_bad_frame_delta_is_clamped() {
        let mut s = playing();
        tick(&mut s, f32::NAN);
        tick(&mut s, -50.0);
        assert_eq!(s.spawn_timer, 0.0);
        tick(&mut s, 1.0e9);
        assert_eq!(s.spawn_timer, MAX_FRAME_DT_MS);
    }

    #[test]
    fn test_multi_touch_second_tap_after_completion_ignored() {
        let mut s = playing();
        s.run.score = s.level().target - BASE_SCORE;
        push(&mut s, EntityKind::Normal, Vec2::new(200.0, 200.0), Vec2::ZERO);
        push(&mut s, EntityKind::Normal, Vec2::new(500.0, 200.0), Vec2::ZERO);

        tap(&mut s, Vec2::new(200.0, 218.0));
        tap(&mut s, Vec2::new(500.0, 218.0));
        assert_eq!(s.mode, GameMode::LevelComplete);
        assert_eq!(s.entities.len(), 1);
        let completions = s
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelComplete(_)))
            .count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing();
        let mut b = playing();
        for _ in 0..600 {
            tick(&mut a, 16.0);
            tick(&mut b, 16.0);
        }
        assert_eq!(a.entities.len(), b.entities.len());
        for (ea, eb) in a.entities.iter().zip(&b.entities) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.kind(), eb.kind());
        }
    }
}
