//! Catch My Heart entry point
//!
//! Native builds run a headless autoplay session: a simple bot taps the
//! lowest catchable heart every few frames and the run is reported through
//! the log. Set `RUST_LOG=debug` for per-hit detail.
//!
//! Usage: `catch-my-heart [seed] [store.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use catch_my_heart::audio::RecordingAudio;
    use catch_my_heart::game::{Game, Presenter, Surface, UiAction};
    use catch_my_heart::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
    use catch_my_heart::sim::{GameMode, GameState, Screen};
    use catch_my_heart::ui::LevelSummary;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u64 = 60 * 60 * 10;
    /// Bot reaction time in frames
    const TAP_EVERY: u64 = 8;

    /// Reports screens and summaries through the log
    #[derive(Default)]
    struct LogPresenter;

    impl Presenter for LogPresenter {
        fn title(&mut self, returning_winner: bool) {
            if returning_winner {
                log::info!("Catch My Heart 💘 (Again?)");
            } else {
                log::info!("Catch My Heart 💘");
            }
        }

        fn show_screen(&mut self, screen: Option<Screen>) {
            log::debug!("screen: {screen:?}");
        }

        fn level_intro(&mut self, id: u32, name: &str, target: u32) {
            log::info!("Level {id}: {name} - Goal: {target} pts");
        }

        fn level_complete(&mut self, s: &LevelSummary) {
            log::info!(
                "{} score {} | max combo {} | accuracy {}% | {}",
                s.message,
                s.score,
                s.max_combo,
                s.accuracy,
                s.star_string()
            );
        }

        fn game_over(&mut self, s: &LevelSummary) {
            log::info!("{} (score {})", s.message, s.score);
        }
    }

    /// Visual center of the lowest visible heart worth catching
    fn bot_target(state: &GameState) -> Option<Vec2> {
        state
            .entities
            .iter()
            .filter(|e| !e.kind().is_hazard() && e.pos.y > 0.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.pos + Vec2::new(0.0, e.radius * 0.6))
    }

    pub fn run() {
        catch_my_heart::init_logging();

        let mut args = std::env::args().skip(1);
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or_else(rand::random);
        let store: Box<dyn KeyValueStore> = match args.next() {
            Some(path) => Box::new(JsonFileStore::open(path)),
            None => Box::new(MemoryStore::new()),
        };
        let audio = RecordingAudio::new();
        let cues = audio.log();

        let surface = Surface {
            width: 800.0,
            height: 600.0,
        };
        let mut game = match Game::new(Some(surface), store, Box::new(audio), Box::new(LogPresenter)) {
            Ok(game) => game.with_seed(seed),
            Err(e) => {
                log::error!("Game initialization failed: {e}");
                std::process::exit(1);
            }
        };

        game.action(UiAction::Start);
        if game.mode() == GameMode::Tutorial {
            game.action(UiAction::FinishTutorial);
        }

        let mut time = 0.0;
        for frame in 0..MAX_FRAMES {
            time += FRAME_MS;
            game.frame(time);

            match game.mode() {
                GameMode::Playing if frame % TAP_EVERY == 0 => {
                    if let Some(target) = bot_target(game.state()) {
                        game.pointer_down(&[target]);
                    }
                }
                GameMode::LevelComplete => game.action(UiAction::NextLevel),
                GameMode::Victory => {
                    game.action(UiAction::DodgeNo);
                    game.action(UiAction::AcceptValentine);
                }
                GameMode::Success => {
                    log::info!("Success after {:.0}s of play", time / 1000.0);
                    break;
                }
                _ => {}
            }
        }

        let state = game.state();
        log::info!(
            "Finished in {:?} on level {} ({} sound cues, seed {})",
            state.mode,
            state.level().id,
            cues.borrow().len(),
            state.seed
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The page drives `catch_my_heart::web::WebGame`
    catch_my_heart::init_logging();
}
