//! Procedural spawning
//!
//! One uniform roll picks the kind band (hazard, special, boss, normal);
//! specials take a second roll to split into golden / slow / nuke.

use glam::Vec2;
use rand::Rng;

use super::kind::EntityKind;
use super::state::{FallingEntity, GameState};
use crate::consts::*;
use crate::levels::LevelConfig;

/// Map the two uniform draws onto a kind for this level
pub fn choose_kind(level: &LevelConfig, roll: f32, sub_roll: f32) -> EntityKind {
    let special_end = level.hazard_ratio + level.powerup_ratio;
    if roll < level.hazard_ratio {
        EntityKind::Broken
    } else if roll < special_end {
        if sub_roll < 0.4 {
            EntityKind::Golden
        } else if sub_roll < 0.7 {
            EntityKind::Slow
        } else {
            EntityKind::Nuke
        }
    } else if roll < special_end + level.boss_ratio {
        EntityKind::Boss
    } else {
        EntityKind::Normal
    }
}

/// Create one entity above the surface for the current level
pub fn spawn_entity(state: &mut GameState) -> FallingEntity {
    let width = state.width();
    let level = state.level().clone();
    let rng = state.rng();

    let roll = rng.random::<f32>();
    let sub_roll = rng.random::<f32>();
    let kind = choose_kind(&level, roll, sub_roll);

    let span = (width - SPAWN_MARGIN * 2.0).max(0.0);
    let x = SPAWN_MARGIN + rng.random::<f32>() * span;
    let vx = rng.random_range(-SPAWN_DRIFT..SPAWN_DRIFT);
    let speed = level.speed_min + rng.random::<f32>() * (level.speed_max - level.speed_min);

    let id = state.next_entity_id();
    log::debug!("spawn #{id} {kind:?} at x={x:.0}");
    FallingEntity::new(
        id,
        kind,
        Vec2::new(x, SPAWN_Y),
        Vec2::new(vx, speed * SPEED_MULTIPLIER),
    )
}

/// Advance the spawn accumulator; spawns at most one entity per call
pub fn update_spawner(state: &mut GameState, dt: f32) {
    state.spawn_timer += dt;
    if state.spawn_timer > state.level().spawn_rate {
        let entity = spawn_entity(state);
        state.entities.push(entity);
        state.spawn_timer = 0.0;
    }
}
