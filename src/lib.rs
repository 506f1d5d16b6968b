//! Catch My Heart - a falling-hearts arcade game
//!
//! Core modules:
//! - `sim`: Seeded simulation (spawning, physics, hits, scoring, level flow)
//! - `levels`: Data-driven level tuning
//! - `persistence`: Key-value storage for preferences and progress
//! - `settings`: User preferences backed by `persistence`
//! - `audio`: Sound cue playback (Web Audio on wasm, no-op elsewhere)
//! - `ui`: Presentation data handed to HUD/screens/renderer
//! - `game`: Frame-driven driver tying the simulation to its collaborators
//! - `web`: wasm exports driving `game` from the browser

pub mod audio;
pub mod error;
pub mod game;
pub mod levels;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod ui;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{GameError, StorageError};
pub use game::{Game, Surface, UiAction};
pub use levels::LevelConfig;
pub use settings::Preferences;

/// Game configuration constants
///
/// Distances are surface pixels, velocities are pixels per frame, and every
/// duration is in milliseconds.
pub mod consts {
    /// Points for a plain heart
    pub const BASE_SCORE: u32 = 10;
    /// Points for a golden heart
    pub const GOLD_SCORE: u32 = 50;
    /// Points for a boss heart
    pub const BOSS_SCORE: u32 = 100;
    /// Score lost when a broken heart is tapped
    pub const BROKEN_PENALTY: u32 = 10;

    /// How long a combo survives without a hit
    pub const COMBO_WINDOW_MS: f32 = 2000.0;
    /// Combo step size for the score multiplier
    pub const COMBO_STEP: u32 = 5;
    /// Multiplier gained per combo step
    pub const COMBO_STEP_BONUS: f64 = 0.1;
    /// Every Nth combo shows a hype message
    pub const COMBO_MILESTONE: u32 = 10;

    /// Global scale applied to level fall speeds
    pub const SPEED_MULTIPLIER: f32 = 0.5;
    /// Hit radius of every falling entity
    pub const ENTITY_RADIUS: f32 = 30.0;
    /// Horizontal spawn margin from either edge
    pub const SPAWN_MARGIN: f32 = 40.0;
    /// Spawn height (above the visible surface)
    pub const SPAWN_Y: f32 = -50.0;
    /// Maximum horizontal drift at spawn (symmetric)
    pub const SPAWN_DRIFT: f32 = 0.5;
    /// Distance below the surface at which entities are culled
    pub const CULL_MARGIN: f32 = 50.0;
    /// Near-miss text height above the bottom edge
    pub const NEAR_MISS_TEXT_LIFT: f32 = 50.0;

    /// Hit circle scale relative to radius
    pub const HIT_RADIUS_SCALE: f32 = 0.9;
    /// Extra hit circle tolerance
    pub const HIT_SLOP: f32 = 20.0;
    /// Visual center offset below position, relative to radius
    pub const HIT_CENTER_OFFSET: f32 = 0.6;

    /// Slow power-up vertical velocity factor
    pub const SLOW_FACTOR: f32 = 0.5;

    /// Particle gravity (added to vy every frame)
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    /// Particles per explosion burst
    pub const EXPLOSION_PARTICLES: usize = 10;
    /// Max explosion particle speed per axis (symmetric)
    pub const EXPLOSION_SPEED: f32 = 5.0;
    /// Explosion particle lifetime range
    pub const EXPLOSION_LIFE_MS: (f32, f32) = (500.0, 800.0);
    /// Explosion particle size range
    pub const EXPLOSION_SIZE: (f32, f32) = (2.0, 6.0);
    /// Lifetime of the tap feedback particle
    pub const TAP_PARTICLE_LIFE_MS: f32 = 300.0;
    /// Size of the tap feedback particle
    pub const TAP_PARTICLE_SIZE: f32 = 2.0;
    /// Confetti bursts shown on the success screen
    pub const CONFETTI_BURSTS: usize = 100;

    /// Floating text lifetime
    pub const TEXT_LIFE_MS: f32 = 800.0;
    /// Floating text rise per frame
    pub const TEXT_RISE: f32 = 0.5;
    /// Default floating text size
    pub const TEXT_SIZE: f32 = 20.0;

    /// Chance that a dodged broken heart shows a taunt
    pub const NEAR_MISS_CHANCE: f32 = 0.1;

    /// Countdown tick interval (3, 2, 1, GO!)
    pub const COUNTDOWN_STEP_MS: f32 = 800.0;
    /// Time "GO!" stays up before play begins
    pub const COUNTDOWN_GO_MS: f32 = 500.0;

    /// Largest frame delta fed to the simulation
    pub const MAX_FRAME_DT_MS: f32 = 100.0;
}

/// Install the logger for the current platform.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install the logger for the current platform.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
