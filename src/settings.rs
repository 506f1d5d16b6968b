//! Player preferences and progress flags
//!
//! Persisted through a [`KeyValueStore`]. Storage failures are logged and
//! otherwise ignored: a broken store means defaults, never a crash.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

pub const KEY_SOUND: &str = "cmh_sound";
pub const KEY_MOTION: &str = "cmh_motion";
pub const KEY_TUTORIAL_DONE: &str = "cmh_tutorialDone";
pub const KEY_HAS_WON: &str = "cmh_hasWon";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub sound_enabled: bool,
    /// Reduced motion (no particles, no shake)
    pub reduced_motion: bool,
    /// Skip the tutorial on start
    pub tutorial_done: bool,
    /// Beaten the boss at least once
    pub has_won: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            reduced_motion: false,
            tutorial_done: false,
            has_won: false,
        }
    }
}

impl Preferences {
    /// Load from the store, falling back to defaults key by key
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        let prefs = Self {
            // Sound is on unless explicitly turned off
            sound_enabled: read(store, KEY_SOUND).map_or(defaults.sound_enabled, |v| v != "false"),
            reduced_motion: read(store, KEY_MOTION).map_or(defaults.reduced_motion, |v| v == "true"),
            tutorial_done: read(store, KEY_TUTORIAL_DONE)
                .map_or(defaults.tutorial_done, |v| v == "true"),
            has_won: read(store, KEY_HAS_WON).map_or(defaults.has_won, |v| v == "true"),
        };
        log::info!("Loaded preferences: {prefs:?}");
        prefs
    }

    pub fn set_sound_enabled(&mut self, store: &mut dyn KeyValueStore, on: bool) {
        self.sound_enabled = on;
        write(store, KEY_SOUND, on);
    }

    pub fn set_reduced_motion(&mut self, store: &mut dyn KeyValueStore, on: bool) {
        self.reduced_motion = on;
        write(store, KEY_MOTION, on);
    }

    pub fn mark_tutorial_done(&mut self, store: &mut dyn KeyValueStore) {
        self.tutorial_done = true;
        write(store, KEY_TUTORIAL_DONE, true);
    }

    pub fn mark_won(&mut self, store: &mut dyn KeyValueStore) {
        self.has_won = true;
        write(store, KEY_HAS_WON, true);
    }

    /// Wipe the store and return to defaults
    pub fn reset(&mut self, store: &mut dyn KeyValueStore) {
        if let Err(e) = store.clear() {
            log::warn!("Failed to clear storage: {e}");
        }
        *self = Self::default();
    }
}

fn read(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Storage read failed: {e}");
            None
        }
    }
}

fn write(store: &mut dyn KeyValueStore, key: &str, value: bool) {
    if let Err(e) = store.set(key, if value { "true" } else { "false" }) {
        log::warn!("Storage write failed: {e}");
    }
}
