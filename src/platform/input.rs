//! Keyboard and touch input resolution

use std::collections::HashSet;

use crate::sim::TickInput;

const LEFT_KEYS: [&str; 3] = ["ArrowLeft", "a", "A"];
const RIGHT_KEYS: [&str; 3] = ["ArrowRight", "d", "D"];
const FIRE_KEYS: [&str; 5] = [" ", "Space", "ArrowUp", "w", "W"];

/// Held keys and active touch, refreshed by event handlers between ticks
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<String>,
    /// x of the active touch, in field coordinates
    touch_x: Option<f32>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.held.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// A touch steers toward its x and holds fire
    pub fn touch(&mut self, x: f32) {
        self.touch_x = Some(x);
    }

    pub fn touch_end(&mut self) {
        self.touch_x = None;
    }

    /// Drop everything (focus loss)
    pub fn clear(&mut self) {
        self.held.clear();
        self.touch_x = None;
    }

    fn any_held(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.held.contains(*k))
    }

    /// Snapshot for the next tick
    pub fn resolve(&self) -> TickInput {
        TickInput {
            left: self.any_held(&LEFT_KEYS),
            right: self.any_held(&RIGHT_KEYS),
            fire: self.any_held(&FIRE_KEYS) || self.touch_x.is_some(),
            target_x: self.touch_x,
        }
    }
}
