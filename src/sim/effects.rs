//! Particles and floating text
//!
//! Purely cosmetic. Emitters respect reduced motion; decay runs every frame
//! and prunes with `swap_remove` since draw order does not matter here.

use glam::Vec2;
use rand::Rng;

use super::state::{FloatingText, GameState, Particle};
use crate::consts::*;

pub const NEAR_MISS: &[&str] = &[
    "Almost stole it 😏",
    "Too slow!",
    "Nice try 💅",
    "Swiped left on that one",
];
pub const BROKEN_HIT: &[&str] = &[
    "Ouch. Emotional damage.",
    "Red flag! 🚩",
    "Why are you like this?",
    "Heartbreak 💔",
];
pub const HIGH_COMBO: &[&str] = &["Okay gamer 😳", "Rizz god?", "Don't stop now!", "On fire! 🔥"];
pub const BOSS_INTRO: &[&str] = &[
    "FINAL BOSS: FEELINGS",
    "COMMITMENT ISSUES INCOMING",
    "POV: The 'Talk'",
    "BOSS: MIXED SIGNALS",
];
pub const VICTORY: &[&str] = &[
    "Certified Valentine ✅",
    "Simp card revoked (you won) 👑",
    "W",
    "Relationship goals",
];
pub const LEVEL_RECAP: &[&str] = &[
    "TZAAAAAA, ESTI PRAF",
    "Heart collector!",
    "Smooth operator.",
    "Is it hot in here?",
];
pub const GAME_OVER: &[&str] = &[
    "Mission Failed: We'll get 'em next time.",
    "Love hurts.",
    "Friendzoned.",
    "Left on read.",
];

/// Burst of particles in every direction
pub fn explosion(state: &mut GameState, pos: Vec2, color: u32) {
    if state.reduced_motion {
        return;
    }
    for _ in 0..EXPLOSION_PARTICLES {
        let rng = state.rng();
        let vel = Vec2::new(
            rng.random_range(-EXPLOSION_SPEED..EXPLOSION_SPEED),
            rng.random_range(-EXPLOSION_SPEED..EXPLOSION_SPEED),
        );
        let life = rng.random_range(EXPLOSION_LIFE_MS.0..EXPLOSION_LIFE_MS.1);
        let size = rng.random_range(EXPLOSION_SIZE.0..EXPLOSION_SIZE.1);
        state.particles.push(Particle {
            pos,
            vel,
            life,
            max_life: life,
            color,
            size,
        });
    }
}

/// A single motionless dot (tap feedback)
pub fn spark(state: &mut GameState, pos: Vec2, color: u32, size: f32) {
    if state.reduced_motion {
        return;
    }
    state.particles.push(Particle {
        pos,
        vel: Vec2::ZERO,
        life: TAP_PARTICLE_LIFE_MS,
        max_life: TAP_PARTICLE_LIFE_MS,
        color,
        size,
    });
}

/// Confetti for the success screen
pub fn confetti(state: &mut GameState) {
    let center = state.center();
    for _ in 0..CONFETTI_BURSTS {
        let hue = state.roll() * 360.0;
        explosion(state, center, hsl_to_rgb(hue, 1.0, 0.5));
    }
}

/// Rising label at the default size
pub fn float_text(state: &mut GameState, pos: Vec2, text: impl Into<String>, color: u32) {
    float_text_sized(state, pos, text, color, TEXT_SIZE);
}

pub fn float_text_sized(
    state: &mut GameState,
    pos: Vec2,
    text: impl Into<String>,
    color: u32,
    size: f32,
) {
    state.texts.push(FloatingText {
        pos,
        text: text.into(),
        color,
        life: TEXT_LIFE_MS,
        size,
    });
}

/// Age, move and prune particles
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    let mut i = 0;
    while i < particles.len() {
        let p = &mut particles[i];
        p.life -= dt;
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        if p.life <= 0.0 {
            particles.swap_remove(i);
        } else {
            i += 1;
        }
    }
}

/// Age, raise and prune floating texts
pub fn update_texts(texts: &mut Vec<FloatingText>, dt: f32) {
    let mut i = 0;
    while i < texts.len() {
        let t = &mut texts[i];
        t.life -= dt;
        t.pos.y -= TEXT_RISE;
        if t.life <= 0.0 {
            texts.swap_remove(i);
        } else {
            i += 1;
        }
    }
}

/// HSL (degrees, 0-1, 0-1) to 0xRRGGBB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> u32 {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_byte = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u32;
    (to_byte(r) << 16) | (to_byte(g) << 8) | to_byte(b)
}
