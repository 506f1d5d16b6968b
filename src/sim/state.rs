//! Game state and core simulation types
//!
//! One [`GameState`] is the whole simulation context: every component
//! function takes it by `&mut` and nothing lives in globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::events::GameEvent;
use super::kind::EntityKind;
use crate::consts::*;
use crate::error::GameError;
use crate::levels::LevelConfig;

/// Countdown label currently shown before play starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CountdownStep {
    Three,
    Two,
    One,
    Go,
}

impl CountdownStep {
    pub fn label(&self) -> &'static str {
        match self {
            CountdownStep::Three => "3",
            CountdownStep::Two => "2",
            CountdownStep::One => "1",
            CountdownStep::Go => "GO!",
        }
    }

    /// Time this label stays up
    pub fn duration_ms(&self) -> f32 {
        match self {
            CountdownStep::Go => COUNTDOWN_GO_MS,
            _ => COUNTDOWN_STEP_MS,
        }
    }

    /// Following label, `None` once "GO!" is done
    pub fn next(&self) -> Option<CountdownStep> {
        match self {
            CountdownStep::Three => Some(CountdownStep::Two),
            CountdownStep::Two => Some(CountdownStep::One),
            CountdownStep::One => Some(CountdownStep::Go),
            CountdownStep::Go => None,
        }
    }
}

/// Current mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameMode {
    /// Title screen
    Start,
    /// First-run instructions
    Tutorial,
    /// Level intro card counting down to play
    Countdown { step: CountdownStep, elapsed_ms: f32 },
    /// Active gameplay
    Playing,
    /// Simulation frozen
    Paused,
    /// Level target reached, waiting for "next"
    LevelComplete,
    /// Run failed
    GameOver,
    /// Final level beaten, waiting for the answer
    Victory,
    /// Epilogue
    Success,
}

impl GameMode {
    /// Countdown at its first label
    pub fn countdown() -> Self {
        GameMode::Countdown {
            step: CountdownStep::Three,
            elapsed_ms: 0.0,
        }
    }

    /// Modes in which [`super::tick`] advances anything
    pub fn is_running(self) -> bool {
        matches!(
            self,
            GameMode::Countdown { .. } | GameMode::Playing | GameMode::Victory | GameMode::Success
        )
    }
}

/// A falling heart
#[derive(Debug, Clone, Serialize)]
pub struct FallingEntity {
    /// Spawn order (monotonic)
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    kind: EntityKind,
    /// Fill color (0xRRGGBB)
    pub color: u32,
    pub icon: Option<&'static str>,
    pub radius: f32,
}

impl FallingEntity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, vel: Vec2) -> Self {
        let profile = kind.profile();
        Self {
            id,
            pos,
            vel,
            kind,
            color: profile.color,
            icon: profile.icon,
            radius: ENTITY_RADIUS,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life (ms)
    pub life: f32,
    /// Life at birth (ms)
    pub max_life: f32,
    pub color: u32,
    pub size: f32,
}

impl Particle {
    /// Remaining life in [0, 1], used for fading
    pub fn life_fraction(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// A rising label
#[derive(Debug, Clone, Serialize)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    pub color: u32,
    /// Remaining life (ms)
    pub life: f32,
    pub size: f32,
}

/// Per-level interaction counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub hearts_caught: u32,
    pub traps_dodged: u32,
    /// Every pointer-down during play
    pub clicks: u32,
    /// Pointer-downs that hit something
    pub hits: u32,
}

impl Stats {
    /// Hit percentage, rounded; 0 with no clicks
    pub fn accuracy(&self) -> u32 {
        if self.clicks == 0 {
            return 0;
        }
        (self.hits as f64 / self.clicks as f64 * 100.0).round() as u32
    }
}

/// Mutable state of one level attempt
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunState {
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    /// Time left before the combo drops (ms)
    pub combo_timer: f32,
    pub stats: Stats,
}

impl RunState {
    /// Combo window remaining in [0, 1]
    pub fn combo_fraction(&self) -> f32 {
        if self.combo == 0 {
            return 0.0;
        }
        (self.combo_timer / COMBO_WINDOW_MS).clamp(0.0, 1.0)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Level table (read-only during play)
    pub levels: Vec<LevelConfig>,
    /// Current level (0-based)
    pub level_index: usize,
    pub mode: GameMode,
    /// Surface size in pixels
    pub surface: Vec2,
    pub run: RunState,
    /// Live entities in spawn order
    pub entities: Vec<FallingEntity>,
    pub particles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
    /// Time since the last spawn (ms)
    pub spawn_timer: f32,
    /// Skip particles and shake
    pub reduced_motion: bool,
    /// Pending notifications for the driver
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state on the title screen.
    ///
    /// Fails when the level table is empty.
    pub fn new(seed: u64, surface: Vec2, levels: Vec<LevelConfig>) -> Result<Self, GameError> {
        if levels.is_empty() {
            return Err(GameError::NoLevels);
        }
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            levels,
            level_index: 0,
            mode: GameMode::Start,
            surface,
            run: RunState::default(),
            entities: Vec::new(),
            particles: Vec::new(),
            texts: Vec::new(),
            spawn_timer: 0.0,
            reduced_motion: false,
            events: Vec::new(),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Seeded RNG shared by every component
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Config of the current level
    pub fn level(&self) -> &LevelConfig {
        &self.levels[self.level_index]
    }

    pub fn is_final_level(&self) -> bool {
        self.level_index + 1 >= self.levels.len()
    }

    pub fn width(&self) -> f32 {
        self.surface.x
    }

    pub fn height(&self) -> f32 {
        self.surface.y
    }

    /// Center of the surface
    pub fn center(&self) -> Vec2 {
        self.surface * 0.5
    }

    /// Queue a notification
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pick one line from a message pool
    pub fn pick(&mut self, pool: &[&'static str]) -> &'static str {
        if pool.is_empty() {
            return "";
        }
        pool[self.rng.random_range(0..pool.len())]
    }

    /// Uniform draw in [0, 1)
    pub fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Clear everything belonging to a level attempt
    pub fn reset_run(&mut self) {
        self.entities.clear();
        self.particles.clear();
        self.texts.clear();
        self.run = RunState::default();
        self.spawn_timer = 0.0;
    }
}
