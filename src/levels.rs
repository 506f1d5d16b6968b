//! Level tuning
//!
//! Eight escalating levels followed by the boss stage. Hosts may replace the
//! table with JSON (see [`levels_from_json`]); the simulation only ever reads it.

use serde::{Deserialize, Serialize};

/// Static configuration of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// 1-based level number
    pub id: u32,
    pub name: String,
    /// Score that completes the level
    pub target: u32,
    /// Milliseconds between spawns
    pub spawn_rate: f32,
    /// Fall speed range (pixels per frame, before the global multiplier)
    pub speed_min: f32,
    pub speed_max: f32,
    /// Share of spawns that are broken hearts
    pub hazard_ratio: f32,
    /// Share of spawns that are golden hearts or power-ups
    pub powerup_ratio: f32,
    /// Share of spawns that are boss hearts
    #[serde(default)]
    pub boss_ratio: f32,
    /// Flavor line shown on the intro card
    pub desc: String,
}

impl LevelConfig {
    /// Progress toward the target in [0, 1]
    pub fn progress(&self, score: u32) -> f32 {
        if self.target == 0 {
            return 1.0;
        }
        (score as f32 / self.target as f32).min(1.0)
    }
}

#[allow(clippy::too_many_arguments)]
fn level(
    id: u32,
    name: &str,
    target: u32,
    spawn_rate: f32,
    speed_min: f32,
    speed_max: f32,
    hazard_ratio: f32,
    powerup_ratio: f32,
    boss_ratio: f32,
    desc: &str,
) -> LevelConfig {
    LevelConfig {
        id,
        name: name.to_string(),
        target,
        spawn_rate,
        speed_min,
        speed_max,
        hazard_ratio,
        powerup_ratio,
        boss_ratio,
        desc: desc.to_string(),
    }
}

/// The built-in level table
pub fn default_levels() -> Vec<LevelConfig> {
    vec![
        level(1, "The Crush", 300, 1000.0, 2.0, 4.0, 0.1, 0.05, 0.0, "Just getting started..."),
        level(2, "First Date", 600, 900.0, 3.0, 5.0, 0.2, 0.05, 0.0, "Don't mess this up!"),
        level(3, "Mixed Signals", 1000, 800.0, 3.0, 6.0, 0.3, 0.08, 0.0, "Watch out for red flags 🚩"),
        level(4, "The 'Talk'", 1500, 700.0, 4.0, 7.0, 0.35, 0.1, 0.0, "It's getting serious."),
        level(5, "Ghosting", 2000, 600.0, 5.0, 8.0, 0.4, 0.1, 0.0, "They disappear fast!"),
        level(6, "Love Bombing", 2800, 400.0, 4.0, 7.0, 0.2, 0.15, 0.0, "Too much at once!"),
        level(7, "Trust Issues", 3500, 550.0, 6.0, 9.0, 0.5, 0.1, 0.0, "Is it safe? Who knows."),
        level(8, "The Proposal", 4500, 500.0, 7.0, 10.0, 0.4, 0.12, 0.0, "One last hurdle..."),
        level(9, "BOSS: COMMITMENT", 6000, 300.0, 5.0, 12.0, 0.6, 0.2, 0.05, "DEFEAT THE FINAL BOSS"),
    ]
}

/// Parse a level table from JSON (an array of level records)
pub fn levels_from_json(json: &str) -> Result<Vec<LevelConfig>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ordered_and_sane() {
        let levels = default_levels();
        assert_eq!(levels.len(), 9);
        for (i, l) in levels.iter().enumerate() {
            assert_eq!(l.id as usize, i + 1);
            assert!(l.speed_min <= l.speed_max);
            assert!(l.hazard_ratio + l.powerup_ratio + l.boss_ratio < 1.0);
        }
        // Only the final stage fields bosses
        assert!(levels[..8].iter().all(|l| l.boss_ratio == 0.0));
        assert!(levels[8].boss_ratio > 0.0);
    }

    #[test]
    fn test_progress_clamps() {
        let l = &default_levels()[0];
        assert_eq!(l.progress(0), 0.0);
        assert!((l.progress(150) - 0.5).abs() < 1e-6);
        assert_eq!(l.progress(900), 1.0);
    }

    #[test]
    fn test_json_overrides_default_boss_ratio() {
        let json = r#"[{"id":1,"name":"Solo","target":50,"spawn_rate":500.0,
            "speed_min":1.0,"speed_max":2.0,"hazard_ratio":0.0,"powerup_ratio":0.0,
            "desc":"test"}]"#;
        let levels = levels_from_json(json).unwrap();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].boss_ratio, 0.0);
        assert_eq!(levels[0].target, 50);
    }
}
