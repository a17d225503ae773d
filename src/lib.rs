//! Space Shooter - a Space-Invaders style arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, waves, collisions, game phases)
//! - `session`: Controller glue binding the simulation to high-score storage
//! - `highscore`: Single-integer high score persistence
//! - `platform`: Keyboard/touch input resolution
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `audio`: Sound cue synthesis

pub mod audio;
pub mod highscore;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscore::{FileStore, MemoryStore, ScoreStore};
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Largest timestep a single tick will integrate (seconds)
    pub const MAX_DT: f32 = 0.05;

    /// Bullet spawn offset above the player's center (ship nose)
    pub const PLAYER_NOSE_OFFSET: f32 = 26.0;
    /// Bullet spawn offset below an enemy's center
    pub const ENEMY_MUZZLE_OFFSET: f32 = 14.0;

    /// Touch steering dead zone (pixels)
    pub const TOUCH_DEAD_ZONE: f32 = 4.0;
}

/// Uniform random value in `[a, b)`. Returns `a` for an empty range.
#[inline]
pub fn rand_range<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    if b > a { rng.random_range(a..b) } else { a }
}

/// Restrict `v` to `[lo, hi]`. Unlike `f32::clamp` this never panics; an
/// inverted range resolves to `hi`.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

/// Circle-circle overlap: centers closer than the sum of radii
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}
