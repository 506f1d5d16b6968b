//! Level and game flow
//!
//! ```text
//! Start -> Tutorial? -> Countdown(3,2,1,GO!) -> Playing <-> Paused
//! Playing -> LevelComplete -> Countdown (next level) | Victory -> Success
//! ```
//!
//! Every timed step (the countdown) advances inside [`super::tick`], so
//! pausing or restarting can never leave a stray timer behind.

use super::effects;
use super::events::{GameEvent, Screen, SoundCue};
use super::state::{CountdownStep, GameMode, GameState};
use crate::ui::LevelSummary;

/// Back to the title screen
pub fn open_start(state: &mut GameState) {
    state.mode = GameMode::Start;
    state.reset_run();
    state.emit(GameEvent::ShowScreen(Some(Screen::Start)));
}

/// Show the instructions before level 1
pub fn open_tutorial(state: &mut GameState) {
    state.mode = GameMode::Tutorial;
    state.emit(GameEvent::ShowScreen(Some(Screen::Tutorial)));
}

/// Reset the run and start the intro countdown for level `index` (0-based)
pub fn start_level(state: &mut GameState, index: usize) {
    let index = index.min(state.levels.len().saturating_sub(1));
    state.level_index = index;
    state.reset_run();
    state.mode = GameMode::countdown();

    let level = state.level();
    log::info!("Level {}: {} (target {})", level.id, level.name, level.target);
    let intro = GameEvent::LevelIntro {
        id: level.id,
        name: level.name.clone(),
        target: level.target,
    };
    state.emit(GameEvent::ShowScreen(Some(Screen::LevelIntro)));
    state.emit(intro);
    state.emit(GameEvent::Countdown(CountdownStep::Three.label()));
}

/// Run the intro countdown forward by `dt` ms
pub fn advance_countdown(state: &mut GameState, dt: f32) {
    let GameMode::Countdown {
        mut step,
        mut elapsed_ms,
    } = state.mode
    else {
        return;
    };

    elapsed_ms += dt;
    while elapsed_ms >= step.duration_ms() {
        elapsed_ms -= step.duration_ms();
        match step.next() {
            Some(next) => {
                step = next;
                let cue = if step == CountdownStep::Go {
                    SoundCue::Good
                } else {
                    SoundCue::Click
                };
                state.emit(GameEvent::Countdown(step.label()));
                state.emit(GameEvent::Sound(cue));
            }
            None => {
                begin_play(state);
                return;
            }
        }
    }
    state.mode = GameMode::Countdown { step, elapsed_ms };
}

fn begin_play(state: &mut GameState) {
    state.mode = GameMode::Playing;
    state.spawn_timer = 0.0;
    state.emit(GameEvent::ShowScreen(None));

    if state.is_final_level() {
        state.emit(GameEvent::Sound(SoundCue::Boss));
        let msg = state.pick(effects::BOSS_INTRO);
        let center = state.center();
        effects::float_text_sized(state, center, msg, 0xff0000, 28.0);
    }
}

/// Pause or resume. Returns false when the mode cannot be toggled.
pub fn toggle_pause(state: &mut GameState) -> bool {
    match state.mode {
        GameMode::Playing => {
            state.mode = GameMode::Paused;
            state.emit(GameEvent::ShowScreen(Some(Screen::Pause)));
            true
        }
        GameMode::Paused => {
            state.mode = GameMode::Playing;
            state.emit(GameEvent::ShowScreen(None));
            true
        }
        _ => false,
    }
}

/// Level target reached
pub fn complete_level(state: &mut GameState) {
    state.mode = GameMode::LevelComplete;
    state.emit(GameEvent::Sound(SoundCue::Level));

    let msg = state.pick(effects::LEVEL_RECAP);
    let summary = LevelSummary::from_run(state.level().id, &state.run, msg);
    log::info!(
        "Level {} complete: score {}, max combo {}, accuracy {}%",
        summary.level_id,
        summary.score,
        summary.max_combo,
        summary.accuracy
    );
    state.emit(GameEvent::LevelComplete(summary));
    state.emit(GameEvent::ShowScreen(Some(Screen::LevelComplete)));
}

/// Move on from the level-complete screen
pub fn next_level(state: &mut GameState) {
    if state.mode != GameMode::LevelComplete {
        return;
    }
    if state.is_final_level() {
        win(state);
    } else {
        start_level(state, state.level_index + 1);
    }
}

/// Replay the current level from scratch
pub fn restart_level(state: &mut GameState) {
    start_level(state, state.level_index);
}

/// Final level beaten
pub fn win(state: &mut GameState) {
    state.mode = GameMode::Victory;
    state.emit(GameEvent::Sound(SoundCue::Level));
    let message = state.pick(effects::VICTORY);
    log::info!("Victory: {message}");
    let center = state.center();
    effects::float_text_sized(state, center, message, 0xff69b4, 28.0);
    state.emit(GameEvent::Victory);
    state.emit(GameEvent::ShowScreen(Some(Screen::Victory)));
}

/// The "no" button on the victory screen runs away
pub fn dodge_no(state: &mut GameState) {
    if state.mode == GameMode::Victory {
        state.emit(GameEvent::DodgeNoButton);
        state.emit(GameEvent::Sound(SoundCue::Click));
    }
}

/// The only acceptable answer
pub fn accept(state: &mut GameState) {
    if state.mode != GameMode::Victory {
        return;
    }
    state.mode = GameMode::Success;
    state.emit(GameEvent::Sound(SoundCue::Good));
    state.emit(GameEvent::ShowScreen(Some(Screen::Success)));
    effects::confetti(state);
}

/// Run failed. No rule reaches this during normal play.
pub fn game_over(state: &mut GameState) {
    state.mode = GameMode::GameOver;
    state.emit(GameEvent::Sound(SoundCue::Bad));
    let msg = state.pick(effects::GAME_OVER);
    let summary = LevelSummary::from_run(state.level().id, &state.run, msg);
    log::info!("Game over on level {}: {}", summary.level_id, summary.message);
    state.emit(GameEvent::GameOver(summary));
    state.emit(GameEvent::ShowScreen(Some(Screen::GameOver)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::levels::default_levels;
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(21, Vec2::new(800.0, 600.0), default_levels()).unwrap()
    }

    fn countdown_labels(s: &GameState) -> Vec<&'static str> {
        s.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Countdown(l) => Some(*l),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_countdown_reaches_playing() {
        let mut s = state();
        start_level(&mut s, 0);
        assert!(matches!(s.mode, GameMode::Countdown { .. }));

        advance_countdown(&mut s, COUNTDOWN_STEP_MS * 3.0 - 1.0);
        assert!(matches!(s.mode, GameMode::Countdown { step: CountdownStep::One, .. }));
        advance_countdown(&mut s, 1.0);
        assert!(matches!(s.mode, GameMode::Countdown { step: CountdownStep::Go, .. }));
        advance_countdown(&mut s, COUNTDOWN_GO_MS);
        assert_eq!(s.mode, GameMode::Playing);
        assert_eq!(countdown_labels(&s), ["3", "2", "1", "GO!"]);
        assert!(s.events.contains(&GameEvent::ShowScreen(None)));
    }

    #[test]
    fn test_start_level_resets_run() {
        let mut s = state();
        s.run.score = 999;
        s.run.max_combo = 30;
        s.spawn_timer = 400.0;
        start_level(&mut s, 2);
        assert_eq!(s.level_index, 2);
        assert_eq!(s.run, Default::default());
        assert!(s.entities.is_empty());
        assert_eq!(s.spawn_timer, 0.0);
    }

    #[test]
    fn test_pause_only_from_playing() {
        let mut s = state();
        assert!(!toggle_pause(&mut s));
        s.mode = GameMode::Playing;
        assert!(toggle_pause(&mut s));
        assert_eq!(s.mode, GameMode::Paused);
        assert!(toggle_pause(&mut s));
        assert_eq!(s.mode, GameMode::Playing);
    }

    #[test]
    fn test_next_level_and_victory() {
        let mut s = state();
        s.mode = GameMode::LevelComplete;
        next_level(&mut s);
        assert_eq!(s.level_index, 1);

        s.level_index = s.levels.len() - 1;
        s.mode = GameMode::LevelComplete;
        next_level(&mut s);
        assert_eq!(s.mode, GameMode::Victory);
        assert!(s.events.contains(&GameEvent::Victory));

        dodge_no(&mut s);
        assert_eq!(s.mode, GameMode::Victory);
        accept(&mut s);
        assert_eq!(s.mode, GameMode::Success);
        assert!(!s.particles.is_empty());
    }

    #[test]
    fn test_boss_intro_on_final_level() {
        let mut s = state();
        start_level(&mut s, 8);
        advance_countdown(&mut s, COUNTDOWN_STEP_MS * 3.0);
        advance_countdown(&mut s, COUNTDOWN_GO_MS);
        assert_eq!(s.mode, GameMode::Playing);
        assert!(s.events.contains(&GameEvent::Sound(SoundCue::Boss)));
        assert!(s.texts.iter().any(|t| effects::BOSS_INTRO.contains(&t.text.as_str())));
    }

    #[test]
    fn test_game_over_reports_summary() {
        let mut s = state();
        s.mode = GameMode::Playing;
        game_over(&mut s);
        assert_eq!(s.mode, GameMode::GameOver);
        assert!(s.events.iter().any(|e| matches!(e, GameEvent::GameOver(_))));
    }
}
