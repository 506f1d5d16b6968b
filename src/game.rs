//! Game driver
//!
//! Owns the [`GameState`] and its collaborators. The host calls
//! [`Game::frame`] once per animation frame, [`Game::pointer_down`] on taps
//! and [`Game::action`] on button presses; the driver measures frame time,
//! runs the simulation and forwards queued events to audio, storage and UI.

use glam::Vec2;

use crate::audio::AudioSink;
use crate::error::GameError;
use crate::levels::{LevelConfig, default_levels};
use crate::persistence::KeyValueStore;
use crate::settings::Preferences;
use crate::sim::{self, GameEvent, GameMode, GameState, Screen, SoundCue, flow};
use crate::ui::{HudSnapshot, LevelSummary, RenderFrame, build_render_frame};

/// Size of the play surface in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

/// Buttons and toggles on the overlay screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Title screen "play"
    Start,
    /// Tutorial "got it"
    FinishTutorial,
    TogglePause,
    /// Pause screen restart
    Restart,
    /// Pause screen quit
    Quit,
    /// Level complete "next"
    NextLevel,
    /// Game over retry
    Retry,
    /// Game over menu
    Menu,
    /// Victory "no" (it runs away)
    DodgeNo,
    /// Victory "yes"
    AcceptValentine,
    /// Success screen replay from level 1
    Replay,
    /// Forget every stored preference and flag
    ResetProgress,
    SetSound(bool),
    SetReducedMotion(bool),
}

impl std::str::FromStr for UiAction {
    type Err = GameError;

    /// Parse the camelCase button names used by the page
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name {
            "start" => UiAction::Start,
            "finishTutorial" => UiAction::FinishTutorial,
            "togglePause" => UiAction::TogglePause,
            "restart" => UiAction::Restart,
            "quit" => UiAction::Quit,
            "nextLevel" => UiAction::NextLevel,
            "retry" => UiAction::Retry,
            "menu" => UiAction::Menu,
            "dodgeNo" => UiAction::DodgeNo,
            "acceptValentine" => UiAction::AcceptValentine,
            "replay" => UiAction::Replay,
            "resetProgress" => UiAction::ResetProgress,
            "soundOn" => UiAction::SetSound(true),
            "soundOff" => UiAction::SetSound(false),
            "motionOn" => UiAction::SetReducedMotion(true),
            "motionOff" => UiAction::SetReducedMotion(false),
            _ => return Err(GameError::UnknownAction(name.to_string())),
        })
    }
}

/// Presentation collaborator. Every hook defaults to doing nothing.
pub trait Presenter {
    /// Title screen; `returning_winner` when the boss was beaten before
    fn title(&mut self, _returning_winner: bool) {}
    /// Show a screen, or hide all overlays with `None`
    fn show_screen(&mut self, _screen: Option<Screen>) {}
    fn level_intro(&mut self, _id: u32, _name: &str, _target: u32) {}
    fn countdown(&mut self, _label: &str) {}
    fn hud(&mut self, _hud: &HudSnapshot) {}
    fn level_complete(&mut self, _summary: &LevelSummary) {}
    fn game_over(&mut self, _summary: &LevelSummary) {}
    fn shake(&mut self) {}
    fn dodge_no_button(&mut self) {}
}

/// Presenter that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// Game instance holding all state
pub struct Game {
    state: GameState,
    prefs: Preferences,
    store: Box<dyn KeyValueStore>,
    audio: Box<dyn AudioSink>,
    presenter: Box<dyn Presenter>,
    last_time: Option<f64>,
}

impl Game {
    /// Build a game on the title screen.
    ///
    /// Fails only when there is nothing to play on.
    pub fn new(
        surface: Option<Surface>,
        store: Box<dyn KeyValueStore>,
        audio: Box<dyn AudioSink>,
        presenter: Box<dyn Presenter>,
    ) -> Result<Self, GameError> {
        let surface = surface.ok_or(GameError::SurfaceMissing)?;
        let size = validate_surface(surface)?;

        let prefs = Preferences::load(store.as_ref());
        let mut state = GameState::new(rand::random(), size, default_levels())?;
        state.reduced_motion = prefs.reduced_motion;

        let mut game = Self {
            state,
            prefs,
            store,
            audio,
            presenter,
            last_time: None,
        };
        game.audio.set_enabled(game.prefs.sound_enabled);
        game.presenter.title(game.prefs.has_won);
        game.presenter.show_screen(Some(Screen::Start));
        log::info!("Catch My Heart: game initialized (seed {})", game.state.seed);
        Ok(game)
    }

    /// Restart the simulation from a fixed seed (title screen)
    pub fn with_seed(mut self, seed: u64) -> Self {
        let levels = self.state.levels.clone();
        if let Err(e) = self.rebuild(seed, levels) {
            log::warn!("Reseed failed: {e}");
        }
        self
    }

    /// Replace the level table (title screen)
    pub fn with_levels(mut self, levels: Vec<LevelConfig>) -> Result<Self, GameError> {
        self.rebuild(self.state.seed, levels)?;
        Ok(self)
    }

    fn rebuild(&mut self, seed: u64, levels: Vec<LevelConfig>) -> Result<(), GameError> {
        let mut state = GameState::new(seed, self.state.surface, levels)?;
        state.reduced_motion = self.prefs.reduced_motion;
        self.state = state;
        Ok(())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::from_state(&self.state)
    }

    /// Drawable snapshot of the current frame
    pub fn render_frame(&self) -> RenderFrame {
        build_render_frame(&self.state)
    }

    /// The host surface changed size
    pub fn resize(&mut self, surface: Surface) -> Result<(), GameError> {
        self.state.surface = validate_surface(surface)?;
        Ok(())
    }

    /// Forget the last frame time so the next frame simulates nothing
    pub fn reset_clock(&mut self) {
        self.last_time = None;
    }

    /// Advance one animation frame. `time_ms` is the host's monotonic clock.
    pub fn frame(&mut self, time_ms: f64) {
        // First frame (or a clock going backwards) simulates nothing
        let dt = match self.last_time {
            Some(prev) if time_ms >= prev => (time_ms - prev) as f32,
            _ => 0.0,
        };
        self.last_time = Some(time_ms);

        sim::tick(&mut self.state, dt);
        self.dispatch();
        if self.state.mode == GameMode::Playing {
            let hud = self.hud();
            self.presenter.hud(&hud);
        }
    }

    /// One or more simultaneous pointer-downs, resolved in order
    pub fn pointer_down(&mut self, points: &[Vec2]) {
        if self.state.mode != GameMode::Playing {
            return;
        }
        for &point in points {
            sim::tap(&mut self.state, point);
        }
        self.dispatch();
        let hud = self.hud();
        self.presenter.hud(&hud);
    }

    /// Handle a button press or toggle
    pub fn action(&mut self, action: UiAction) {
        log::debug!("ui action {action:?}");
        let before = self.state.mode;
        match action {
            UiAction::Start => {
                self.audio.resume();
                self.click();
                if self.prefs.tutorial_done {
                    flow::start_level(&mut self.state, 0);
                } else {
                    flow::open_tutorial(&mut self.state);
                }
            }
            UiAction::FinishTutorial => {
                self.click();
                self.prefs.mark_tutorial_done(self.store.as_mut());
                flow::start_level(&mut self.state, 0);
            }
            UiAction::TogglePause => {
                flow::toggle_pause(&mut self.state);
            }
            UiAction::Restart | UiAction::Retry => {
                self.click();
                flow::restart_level(&mut self.state);
            }
            UiAction::Quit | UiAction::Menu => {
                self.click();
                flow::open_start(&mut self.state);
                self.presenter.title(self.prefs.has_won);
            }
            UiAction::NextLevel => {
                self.click();
                flow::next_level(&mut self.state);
            }
            UiAction::DodgeNo => flow::dodge_no(&mut self.state),
            UiAction::AcceptValentine => flow::accept(&mut self.state),
            UiAction::Replay => flow::start_level(&mut self.state, 0),
            UiAction::ResetProgress => {
                self.prefs.reset(self.store.as_mut());
                self.state.reduced_motion = self.prefs.reduced_motion;
                self.audio.set_enabled(self.prefs.sound_enabled);
                flow::open_start(&mut self.state);
                self.presenter.title(self.prefs.has_won);
            }
            UiAction::SetSound(on) => {
                self.prefs.set_sound_enabled(self.store.as_mut(), on);
                self.audio.set_enabled(on);
                if on {
                    self.audio.resume();
                }
            }
            UiAction::SetReducedMotion(on) => {
                self.prefs.set_reduced_motion(self.store.as_mut(), on);
                self.state.reduced_motion = on;
            }
        }
        // Time spent on a frozen screen never reaches the simulation
        if self.state.mode != before && self.state.mode.is_running() {
            self.reset_clock();
        }
        self.dispatch();
    }

    fn click(&mut self) {
        self.audio.play(SoundCue::Click);
    }

    /// Forward queued simulation events to the collaborators
    fn dispatch(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Sound(cue) => self.audio.play(cue),
                GameEvent::ShowScreen(screen) => self.presenter.show_screen(screen),
                GameEvent::LevelIntro { id, name, target } => {
                    self.presenter.level_intro(id, &name, target)
                }
                GameEvent::Countdown(label) => self.presenter.countdown(label),
                GameEvent::Shake => self.presenter.shake(),
                GameEvent::LevelComplete(summary) => self.presenter.level_complete(&summary),
                GameEvent::GameOver(summary) => self.presenter.game_over(&summary),
                GameEvent::Victory => self.prefs.mark_won(self.store.as_mut()),
                GameEvent::DodgeNoButton => self.presenter.dodge_no_button(),
            }
        }
    }
}

fn validate_surface(surface: Surface) -> Result<Vec2, GameError> {
    let Surface { width, height } = surface;
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(GameError::InvalidSurface { width, height });
    }
    Ok(Vec2::new(width, height))
}
