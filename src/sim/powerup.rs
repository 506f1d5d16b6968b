//! Power-up effects
//!
//! One-shot, global modifiers applied the moment a power-up heart is caught.

use super::effects;
use super::kind::PowerUp;
use super::state::GameState;

/// Apply a caught power-up to everything currently on screen
pub fn apply_powerup(state: &mut GameState, power_up: PowerUp) {
    let center = state.center();
    match power_up {
        PowerUp::Slow => {
            for entity in &mut state.entities {
                entity.vel.y *= crate::consts::SLOW_FACTOR;
            }
            effects::float_text_sized(state, center, "CHILL OUT ❄️", 0x00ffff, 24.0);
        }
        PowerUp::Nuke => {
            let mut cleared = Vec::new();
            state.entities.retain(|e| {
                if e.kind().is_hazard() {
                    cleared.push((e.pos, e.color));
                    false
                } else {
                    true
                }
            });
            log::debug!("nuke cleared {} hazards", cleared.len());
            for (pos, color) in cleared {
                effects::explosion(state, pos, color);
            }
            effects::float_text_sized(state, center, "RED FLAGS CLEARED ✅", 0x00ff00, 24.0);
        }
    }
}
