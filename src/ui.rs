//! Presentation data
//!
//! Read-only views of the simulation for the HUD, the overlay screens and the
//! renderer. Nothing here mutates game state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{EntityKind, GameState, RunState};

/// End-of-level recap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub level_id: u32,
    pub score: u32,
    pub max_combo: u32,
    /// Hit percentage (0 with no clicks)
    pub accuracy: u32,
    pub hearts_caught: u32,
    pub traps_dodged: u32,
    /// 1 to 3
    pub stars: u32,
    pub message: String,
}

impl LevelSummary {
    pub fn from_run(level_id: u32, run: &RunState, message: &str) -> Self {
        let accuracy = run.stats.accuracy();
        Self {
            level_id,
            score: run.score,
            max_combo: run.max_combo,
            accuracy,
            hearts_caught: run.stats.hearts_caught,
            traps_dodged: run.stats.traps_dodged,
            stars: star_rating(accuracy, run.max_combo),
            message: message.to_string(),
        }
    }

    /// Stars as glyphs
    pub fn star_string(&self) -> String {
        "⭐".repeat(self.stars as usize)
    }
}

/// One star, plus one for accuracy above 80% and one for a combo above 10
pub fn star_rating(accuracy: u32, max_combo: u32) -> u32 {
    1 + (accuracy > 80) as u32 + (max_combo > 10) as u32
}

/// Values shown on the in-game HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub level_id: u32,
    pub target: u32,
    pub score: u32,
    pub combo: u32,
    /// Score progress toward the target in [0, 1]
    pub progress: f32,
    /// Combo window remaining in [0, 1]
    pub combo_fraction: f32,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let level = state.level();
        Self {
            level_id: level.id,
            target: level.target,
            score: state.run.score,
            combo: state.run.combo,
            progress: level.progress(state.run.score),
            combo_fraction: state.run.combo_fraction(),
        }
    }
}

/// A heart to draw
#[derive(Debug, Clone, Serialize)]
pub struct EntitySprite {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: EntityKind,
    pub color: u32,
    pub icon: Option<&'static str>,
}

/// A particle to draw
#[derive(Debug, Clone, Serialize)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub color: u32,
    pub size: f32,
    /// Opacity in [0, 1]
    pub alpha: f32,
}

/// A label to draw
#[derive(Debug, Clone, Serialize)]
pub struct TextSprite {
    pub pos: Vec2,
    pub text: String,
    pub color: u32,
    pub size: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderFrame {
    pub entities: Vec<EntitySprite>,
    pub particles: Vec<ParticleSprite>,
    pub texts: Vec<TextSprite>,
}

/// Copy the drawable parts of the state
pub fn build_render_frame(state: &GameState) -> RenderFrame {
    RenderFrame {
        entities: state
            .entities
            .iter()
            .map(|e| EntitySprite {
                pos: e.pos,
                radius: e.radius,
                kind: e.kind(),
                color: e.color,
                icon: e.icon,
            })
            .collect(),
        particles: state
            .particles
            .iter()
            .map(|p| ParticleSprite {
                pos: p.pos,
                color: p.color,
                size: p.size,
                alpha: p.life_fraction(),
            })
            .collect(),
        texts: state
            .texts
            .iter()
            .map(|t| TextSprite {
                pos: t.pos,
                text: t.text.clone(),
                color: t.color,
                size: t.size,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::default_levels;
    use crate::sim::{FallingEntity, GameMode};

    #[test]
    fn test_star_rating() {
        assert_eq!(star_rating(0, 0), 1);
        assert_eq!(star_rating(80, 10), 1);
        assert_eq!(star_rating(81, 10), 2);
        assert_eq!(star_rating(95, 11), 3);
    }

    #[test]
    fn test_summary_from_run() {
        let mut run = RunState::default();
        run.score = 320;
        run.max_combo = 14;
        run.stats.clicks = 10;
        run.stats.hits = 7;
        let summary = LevelSummary::from_run(1, &run, "Smooth operator.");
        assert_eq!(summary.accuracy, 70);
        assert_eq!(summary.stars, 2);
        assert_eq!(summary.star_string(), "⭐⭐");
    }

    #[test]
    fn test_hud_and_frame_are_read_only_views() {
        let mut state = GameState::new(9, Vec2::new(800.0, 600.0), default_levels()).unwrap();
        state.mode = GameMode::Playing;
        state.run.score = 150;
        state.entities.push(FallingEntity::new(
            1,
            EntityKind::Slow,
            Vec2::new(50.0, 60.0),
            Vec2::ZERO,
        ));

        let hud = HudSnapshot::from_state(&state);
        assert!((hud.progress - 0.5).abs() < 1e-6);
        assert_eq!(hud.target, 300);

        let frame = build_render_frame(&state);
        assert_eq!(frame.entities.len(), 1);
        assert_eq!(frame.entities[0].icon, Some("❄️"));
        assert_eq!(state.entities.len(), 1);
    }
}
