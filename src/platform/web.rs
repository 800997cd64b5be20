//! Browser host: requestAnimationFrame scheduling and the JS-facing handle
//!
//! The JS presentation layer owns the DOM/canvas. It forwards pointer drags
//! and button presses to `WebGame` and polls `snapshot_json()` to draw.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::prelude::*;

use super::{FrameScheduler, FrameToken};
use crate::driver::GameLoop;
use crate::{Playfield, Settings};

pub type WebLoop = GameLoop<RafScheduler>;

/// Schedules frames with `window.requestAnimationFrame`
pub struct RafScheduler {
    game: Weak<RefCell<WebLoop>>,
    pending: Option<(FrameToken, i32)>,
}

impl RafScheduler {
    fn new(game: Weak<RefCell<WebLoop>>) -> Self {
        Self {
            game,
            pending: None,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self, token: FrameToken) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; cannot schedule frame");
            return;
        };

        let game = self.game.clone();
        let closure = Closure::once(move |time: f64| {
            if let Some(game) = game.upgrade() {
                game.borrow_mut().on_frame(token, time);
            }
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => self.pending = Some((token, handle)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        match self.pending {
            Some((pending, handle)) if pending == token => {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
                self.pending = None;
            }
            _ => {}
        }
    }
}

/// Game handle exported to JS
#[wasm_bindgen]
pub struct WebGame {
    game: Rc<RefCell<WebLoop>>,
    settings: Settings,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<WebGame, JsValue> {
        console_error_panic_hook::set_once();
        // Already initialized when a second game is created
        let _ = console_log::init_with_level(log::Level::Info);

        let playfield =
            Playfield::try_new(width, height).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new_cyclic(|weak: &Weak<RefCell<WebLoop>>| {
            RefCell::new(GameLoop::new(RafScheduler::new(weak.clone()), playfield, seed))
        });

        Ok(WebGame {
            game,
            settings: Settings::default(),
        })
    }

    pub fn start(&self) {
        self.game.borrow_mut().start();
    }

    pub fn stop(&self) {
        self.game.borrow_mut().stop();
    }

    pub fn restart(&self) {
        let seed = js_sys::Date::now() as u64;
        self.game.borrow_mut().restart(seed);
    }

    pub fn pause(&self) {
        self.game.borrow_mut().pause();
    }

    pub fn resume(&self) {
        self.game.borrow_mut().resume();
    }

    /// Pause button
    pub fn toggle_pause(&self) {
        self.game.borrow_mut().toggle_pause();
    }

    pub fn end_round(&self) {
        self.game.borrow_mut().end_round();
    }

    pub fn focus_lost(&self) {
        self.game.borrow_mut().focus_lost();
    }

    pub fn focus_gained(&self) {
        self.game.borrow_mut().focus_gained();
    }

    pub fn gesture_start(&self) {
        self.game.borrow_mut().gesture_start();
    }

    /// `dx`/`dy` are the total drag since the gesture started
    pub fn gesture_move(&self, dx: f32, dy: f32) {
        self.game.borrow_mut().gesture_move(Vec2::new(dx, dy));
    }

    pub fn gesture_end(&self) {
        self.game.borrow_mut().gesture_end();
    }

    /// Latest snapshot as JSON
    pub fn snapshot_json(&self) -> String {
        match serde_json::to_string(self.game.borrow().snapshot()) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Snapshot serialization failed: {}", e);
                String::from("null")
            }
        }
    }

    /// Events since the last call, filtered by the current preferences
    ///
    /// Returns `{"sounds": [...], "haptics": [...]}` for the audio/vibration
    /// layer to act on.
    pub fn drain_feedback_json(&self) -> String {
        let events = self.game.borrow_mut().drain_events();
        let sounds: Vec<_> = events
            .iter()
            .filter(|e| self.settings.wants_sound(e))
            .collect();
        let haptics: Vec<_> = events
            .iter()
            .filter(|e| self.settings.wants_haptics(e))
            .collect();
        let feedback = serde_json::json!({ "sounds": sounds, "haptics": haptics });
        feedback.to_string()
    }

    /// Replace the preferences snapshot (JSON from the settings screen)
    pub fn set_settings(&mut self, json: &str) {
        self.settings = Settings::from_json_or_default(json);
    }

    pub fn music_enabled(&self) -> bool {
        self.settings.music
    }

    /// Stop on tab hide / window blur, resume on return
    pub fn attach_focus_listeners(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = self.game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    g.focus_lost();
                    log::info!("Stopped (tab hidden)");
                } else {
                    g.focus_gained();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = self.game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().focus_lost();
                log::info!("Stopped (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = self.game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().focus_gained();
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}
