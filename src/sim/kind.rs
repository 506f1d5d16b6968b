//! Falling entity kinds and their behaviour
//!
//! Every per-kind decision (color, points, hit and miss handling) comes from
//! [`EntityKind::profile`], so adding a kind touches only this file.

use serde::{Deserialize, Serialize};

use super::events::SoundCue;
use crate::consts::*;

/// Closed set of falling entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Normal,
    Golden,
    Broken,
    Boss,
    Slow,
    Nuke,
    Heal,
}

/// Global effect fired when a power-up is caught
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUp {
    /// Halve the fall speed of everything on screen
    Slow,
    /// Destroy every broken heart on screen
    Nuke,
}

/// What happens when an entity falls off the bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissEffect {
    /// Nothing
    Discard,
    /// Combo is lost
    BreakCombo,
    /// Counts as a dodged trap
    Dodged,
}

/// Per-kind behaviour table entry
#[derive(Debug, Clone, Copy)]
pub struct KindProfile {
    /// Fill color (0xRRGGBB)
    pub color: u32,
    /// Optional glyph drawn over the heart
    pub icon: Option<&'static str>,
    /// Base points before the combo multiplier
    pub points: u32,
    /// Catching it is penalized
    pub hazard: bool,
    pub power_up: Option<PowerUp>,
    /// Extra cue on top of the catch pop
    pub hit_cue: Option<SoundCue>,
    /// Extra label shown at the catch point
    pub hit_label: Option<(&'static str, u32)>,
    pub on_miss: MissEffect,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Normal,
        EntityKind::Golden,
        EntityKind::Broken,
        EntityKind::Boss,
        EntityKind::Slow,
        EntityKind::Nuke,
        EntityKind::Heal,
    ];

    pub fn profile(self) -> KindProfile {
        match self {
            EntityKind::Normal => KindProfile {
                color: 0xff4d6d,
                icon: None,
                points: BASE_SCORE,
                hazard: false,
                power_up: None,
                hit_cue: None,
                hit_label: None,
                on_miss: MissEffect::BreakCombo,
            },
            EntityKind::Golden => KindProfile {
                color: 0xffd700,
                icon: None,
                points: GOLD_SCORE,
                hazard: false,
                power_up: None,
                hit_cue: Some(SoundCue::Good),
                hit_label: Some(("GOLD!", 0xffd700)),
                on_miss: MissEffect::BreakCombo,
            },
            EntityKind::Broken => KindProfile {
                color: 0x555555,
                icon: None,
                points: 0,
                hazard: true,
                power_up: None,
                hit_cue: Some(SoundCue::Bad),
                hit_label: Some(("💔", 0xff0000)),
                on_miss: MissEffect::Dodged,
            },
            EntityKind::Boss => KindProfile {
                color: 0x8b0000,
                icon: Some("😈"),
                points: BOSS_SCORE,
                hazard: false,
                power_up: None,
                hit_cue: Some(SoundCue::Boss),
                hit_label: None,
                on_miss: MissEffect::Discard,
            },
            EntityKind::Slow => KindProfile {
                color: 0x00ced1,
                icon: Some("❄️"),
                points: BASE_SCORE,
                hazard: false,
                power_up: Some(PowerUp::Slow),
                hit_cue: None,
                hit_label: None,
                on_miss: MissEffect::Discard,
            },
            EntityKind::Nuke => KindProfile {
                color: 0xff4500,
                icon: Some("💣"),
                points: BASE_SCORE,
                hazard: false,
                power_up: Some(PowerUp::Nuke),
                hit_cue: None,
                hit_label: None,
                on_miss: MissEffect::Discard,
            },
            EntityKind::Heal => KindProfile {
                color: 0xff85a2,
                icon: Some("🩹"),
                points: BASE_SCORE,
                hazard: false,
                power_up: None,
                hit_cue: None,
                hit_label: None,
                on_miss: MissEffect::Discard,
            },
        }
    }

    /// Catching this kind costs points and combo
    pub fn is_hazard(self) -> bool {
        self.profile().hazard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_broken_is_hazard() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.is_hazard(), kind == EntityKind::Broken, "{kind:?}");
        }
    }

    #[test]
    fn test_miss_effects() {
        assert_eq!(EntityKind::Normal.profile().on_miss, MissEffect::BreakCombo);
        assert_eq!(EntityKind::Golden.profile().on_miss, MissEffect::BreakCombo);
        assert_eq!(EntityKind::Broken.profile().on_miss, MissEffect::Dodged);
        for kind in [EntityKind::Boss, EntityKind::Slow, EntityKind::Nuke, EntityKind::Heal] {
            assert_eq!(kind.profile().on_miss, MissEffect::Discard);
        }
    }

    #[test]
    fn test_point_ladder() {
        assert!(EntityKind::Normal.profile().points < EntityKind::Golden.profile().points);
        assert!(EntityKind::Golden.profile().points < EntityKind::Boss.profile().points);
    }
}
