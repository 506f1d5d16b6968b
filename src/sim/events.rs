//! Outbound notifications
//!
//! The simulation never talks to audio, storage or UI directly. It queues
//! [`GameEvent`]s on the state and the driver fans them out after each step.

use serde::{Deserialize, Serialize};

/// Named sound triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Heart caught
    Pop,
    /// Golden heart, countdown "GO!", success
    Good,
    /// Broken heart tapped, game over
    Bad,
    /// Level complete / victory fanfare
    Level,
    /// Boss hit or boss stage intro
    Boss,
    /// UI click, countdown ticks
    Click,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Pop => "pop",
            SoundCue::Good => "good",
            SoundCue::Bad => "bad",
            SoundCue::Level => "level",
            SoundCue::Boss => "boss",
            SoundCue::Click => "click",
        }
    }
}

/// Overlay screens the presentation layer can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Start,
    Tutorial,
    LevelIntro,
    Pause,
    LevelComplete,
    GameOver,
    Victory,
    Success,
}

/// Something the outside world should react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Play a sound
    Sound(SoundCue),
    /// Show a screen, or hide every overlay with `None`
    ShowScreen(Option<Screen>),
    /// Level intro card contents
    LevelIntro { id: u32, name: String, target: u32 },
    /// Countdown label changed ("3", "2", "1", "GO!")
    Countdown(&'static str),
    /// Shake the play surface
    Shake,
    /// A level was beaten
    LevelComplete(crate::ui::LevelSummary),
    /// The run failed
    GameOver(crate::ui::LevelSummary),
    /// The final level was beaten
    Victory,
    /// The victory "no" button should jump somewhere else
    DodgeNoButton,
}
