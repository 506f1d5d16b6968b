//! Seeded simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Seeded RNG only (reproducible from `GameState::seed`)
//! - Spawn order is draw order and hit priority
//! - Side effects leave only as queued `GameEvent`s

pub mod effects;
pub mod events;
pub mod flow;
pub mod hit;
pub mod kind;
pub mod powerup;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use events::{GameEvent, Screen, SoundCue};
pub use hit::{hit_test, resolve_hit};
pub use kind::{EntityKind, KindProfile, MissEffect, PowerUp};
pub use state::{
    CountdownStep, FallingEntity, FloatingText, GameMode, GameState, Particle, RunState, Stats,
};
pub use tick::{tap, tick};
