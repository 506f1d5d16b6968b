//! Score and combo bookkeeping

use super::effects;
use super::events::{GameEvent, SoundCue};
use super::flow;
use super::state::{FallingEntity, GameMode, GameState};
use crate::consts::*;

/// Combo multiplier: +0.1 for every full step of 5
pub fn multiplier(combo: u32) -> f64 {
    1.0 + (combo / COMBO_STEP) as f64 * COMBO_STEP_BONUS
}

/// Points awarded for `base` at the given combo, rounded
pub fn combo_points(base: u32, combo: u32) -> u32 {
    (base as f64 * multiplier(combo)).round() as u32
}

/// Score a caught entity (hazard or not)
pub fn apply_hit(state: &mut GameState, entity: &FallingEntity) {
    if entity.kind().is_hazard() {
        bad_hit(state, entity);
    } else {
        good_hit(state, entity);
    }
}

fn good_hit(state: &mut GameState, entity: &FallingEntity) {
    let profile = entity.kind().profile();
    state.emit(GameEvent::Sound(SoundCue::Pop));

    let run = &mut state.run;
    run.combo += 1;
    run.max_combo = run.max_combo.max(run.combo);
    run.combo_timer = COMBO_WINDOW_MS;

    if let Some(cue) = profile.hit_cue {
        state.emit(GameEvent::Sound(cue));
    }
    if let Some((label, color)) = profile.hit_label {
        effects::float_text(state, entity.pos, label, color);
    }

    let points = combo_points(profile.points, state.run.combo);
    state.run.score += points;
    state.run.stats.hearts_caught += 1;

    effects::explosion(state, entity.pos, entity.color);
    effects::float_text(state, entity.pos, format!("+{points}"), 0xffffff);

    if let Some(power_up) = profile.power_up {
        super::powerup::apply_powerup(state, power_up);
    }

    if state.run.combo % COMBO_MILESTONE == 0 {
        let msg = state.pick(effects::HIGH_COMBO);
        let center = state.center();
        effects::float_text(state, center, msg, 0xff69b4);
    }

    check_level_complete(state);
}

fn bad_hit(state: &mut GameState, entity: &FallingEntity) {
    let profile = entity.kind().profile();
    if let Some(cue) = profile.hit_cue {
        state.emit(GameEvent::Sound(cue));
    }
    state.run.combo = 0;
    state.run.score = state.run.score.saturating_sub(BROKEN_PENALTY);

    if let Some((label, color)) = profile.hit_label {
        effects::float_text(state, entity.pos, label, color);
    }
    if !state.reduced_motion {
        state.emit(GameEvent::Shake);
    }

    let msg = state.pick(effects::BROKEN_HIT);
    let pos = glam::Vec2::new(state.width() / 2.0, 100.0);
    effects::float_text_sized(state, pos, msg, 0xff0000, 18.0);
}

/// Drop the combo once its window runs out
pub fn decay_combo(state: &mut GameState, dt: f32) {
    let run = &mut state.run;
    if run.combo > 0 {
        run.combo_timer -= dt;
        if run.combo_timer <= 0.0 {
            run.combo = 0;
        }
    }
}

/// Finish the level when the target is reached. Returns true on the transition.
pub fn check_level_complete(state: &mut GameState) -> bool {
    if state.mode == GameMode::Playing && state.run.score >= state.level().target {
        flow::complete_level(state);
        return true;
    }
    false
}
