//! Browser bindings
//!
//! The page owns the canvas, DOM overlays and the animation frame loop. It
//! forwards key/touch events here, calls `frame(dt)` once per animation frame
//! and draws the returned JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, sounds};
use crate::highscore::LocalStore;
use crate::platform::KeyState;
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::GamePhase;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStore>,
    keys: KeyState,
    settings: Settings,
    audio: AudioManager,
}

#[wasm_bindgen]
impl WebGame {
    /// `tuning_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: &str) -> WebGame {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json_or_default(tuning_json)
        };
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let audio = AudioManager::new(&settings);
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            session: Session::new(seed, tuning, LocalStore),
            keys: KeyState::new(),
            settings,
            audio,
        }
    }

    pub fn key_down(&mut self, key: &str) {
        self.keys.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.key_up(key);
    }

    /// Touch position in field coordinates
    pub fn touch(&mut self, x: f32) {
        self.keys.touch(x);
    }

    pub fn touch_end(&mut self) {
        self.keys.touch_end();
    }

    /// Window lost focus: release keys, optionally mute
    pub fn blur(&mut self) {
        self.keys.clear();
        if self.settings.mute_on_blur {
            self.audio.set_muted(true, &self.settings);
        }
    }

    pub fn focus(&mut self) {
        self.audio.apply_settings(&self.settings);
    }

    /// Start button
    pub fn start(&mut self) -> bool {
        self.audio.resume();
        self.session.start()
    }

    /// Game over overlay dismissed
    pub fn acknowledge(&mut self) -> bool {
        self.session.acknowledge()
    }

    /// Replace settings from the options menu (JSON)
    pub fn set_settings(&mut self, json: &str) {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => {
                self.settings = settings;
                self.settings.save();
                self.audio.apply_settings(&self.settings);
            }
            Err(e) => log::warn!("Ignoring invalid settings: {}", e),
        }
    }

    /// Advance one animation frame; returns `{ frame, events }` as JSON
    pub fn frame(&mut self, dt: f32) -> String {
        let input = self.keys.resolve();
        let mut out = self.session.frame(&input, dt);
        for sound in sounds(&out.events) {
            self.audio.play(sound);
        }
        if !self.settings.effective_flash() {
            for item in &mut out.frame.items {
                item.flashing = false;
            }
        }
        let payload = serde_json::json!({
            "frame": out.frame,
            "events": out.events,
        });
        payload.to_string()
    }

    pub fn score(&self) -> u64 {
        self.session.state().score
    }

    pub fn high_score(&self) -> u64 {
        self.session.state().high_score
    }

    pub fn lives(&self) -> u8 {
        self.session.state().player.lives
    }

    pub fn level(&self) -> u32 {
        self.session.state().level
    }

    pub fn in_menu(&self) -> bool {
        self.session.phase() == GamePhase::Menu
    }

    pub fn is_game_over(&self) -> bool {
        self.session.phase() == GamePhase::GameOver
    }
}
