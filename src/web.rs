//! Browser bindings
//!
//! [`WebGame`] owns a [`Game`] wired to LocalStorage and Web Audio, drives it
//! from `requestAnimationFrame` and takes pointer and button input from the
//! page. Screen and HUD updates reach the page through one JS callback,
//! `on_event(kind, json)`. Handlers must not call back into the game
//! synchronously.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::error::GameError;
use crate::game::{Game, Presenter, Surface, UiAction};
use crate::persistence::LocalStore;
use crate::sim::Screen;
use crate::ui::{HudSnapshot, LevelSummary};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    crate::init_logging();
}

/// Forwards presentation hooks to the page callback as JSON
struct JsPresenter {
    on_event: Option<js_sys::Function>,
}

impl JsPresenter {
    fn send(&self, kind: &str, payload: &impl Serialize) {
        let Some(callback) = &self.on_event else {
            return;
        };
        let json = match serde_json::to_string(payload) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode {kind} event: {e}");
                return;
            }
        };
        if let Err(e) = callback.call2(&JsValue::NULL, &JsValue::from_str(kind), &JsValue::from_str(&json)) {
            log::warn!("{kind} handler threw: {e:?}");
        }
    }
}

impl Presenter for JsPresenter {
    fn title(&mut self, returning_winner: bool) {
        self.send("title", &returning_winner);
    }

    fn show_screen(&mut self, screen: Option<Screen>) {
        self.send("screen", &screen);
    }

    fn level_intro(&mut self, id: u32, name: &str, target: u32) {
        self.send(
            "levelIntro",
            &serde_json::json!({ "id": id, "name": name, "target": target }),
        );
    }

    fn countdown(&mut self, label: &str) {
        self.send("countdown", &label);
    }

    fn hud(&mut self, hud: &HudSnapshot) {
        self.send("hud", hud);
    }

    fn level_complete(&mut self, summary: &LevelSummary) {
        self.send("levelComplete", summary);
    }

    fn game_over(&mut self, summary: &LevelSummary) {
        self.send("gameOver", summary);
    }

    fn shake(&mut self) {
        self.send("shake", &());
    }

    fn dodge_no_button(&mut self) {
        self.send("dodgeNo", &());
    }
}

fn js_error(e: GameError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Game handle exported to the page
#[wasm_bindgen]
pub struct WebGame {
    game: Rc<RefCell<Game>>,
    running: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl WebGame {
    /// Build a game for a `width` x `height` canvas
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, on_event: Option<js_sys::Function>) -> Result<WebGame, JsValue> {
        let game = Game::new(
            Some(Surface { width, height }),
            Box::new(LocalStore),
            Box::new(WebAudio::new(true)),
            Box::new(JsPresenter { on_event }),
        )
        .map_err(js_error)?;
        Ok(Self {
            game: Rc::new(RefCell::new(game)),
            running: Rc::new(Cell::new(false)),
        })
    }

    /// Start the frame loop
    pub fn start(&self) {
        if self.running.replace(true) {
            return;
        }
        self.game.borrow_mut().reset_clock();
        request_animation_frame(self.game.clone(), self.running.clone());
    }

    /// Stop scheduling frames
    pub fn stop(&self) {
        self.running.set(false);
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, x: f32, y: f32) {
        self.game.borrow_mut().pointer_down(&[Vec2::new(x, y)]);
    }

    /// Simultaneous touches as `[x0, y0, x1, y1, ...]`
    #[wasm_bindgen(js_name = touchesDown)]
    pub fn touches_down(&self, coords: &[f32]) {
        let points: Vec<Vec2> = coords
            .chunks_exact(2)
            .map(|c| Vec2::new(c[0], c[1]))
            .collect();
        self.game.borrow_mut().pointer_down(&points);
    }

    /// Button press by name (`"start"`, `"togglePause"`, `"soundOff"`, ...)
    pub fn action(&self, name: &str) -> Result<(), JsValue> {
        let action: UiAction = name.parse().map_err(js_error)?;
        self.game.borrow_mut().action(action);
        Ok(())
    }

    pub fn resize(&self, width: f32, height: f32) -> Result<(), JsValue> {
        self.game
            .borrow_mut()
            .resize(Surface { width, height })
            .map_err(js_error)
    }

    /// Drawable state of the current frame as JSON
    #[wasm_bindgen(js_name = renderFrame)]
    pub fn render_frame(&self) -> String {
        let frame = self.game.borrow().render_frame();
        serde_json::to_string(&frame).unwrap_or_else(|e| {
            log::warn!("Failed to encode render frame: {e}");
            String::from("{}")
        })
    }
}

fn request_animation_frame(game: Rc<RefCell<Game>>, running: Rc<Cell<bool>>) {
    let Some(window) = web_sys::window() else {
        log::error!("No window, frame loop stopped");
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(game, running, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(game: Rc<RefCell<Game>>, running: Rc<Cell<bool>>, time: f64) {
    if !running.get() {
        return;
    }
    game.borrow_mut().frame(time);
    request_animation_frame(game, running);
}
