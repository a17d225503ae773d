//! Data-driven game balance
//!
//! Every gameplay constant lives here so a level designer can override any
//! subset from JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Horizontal distance the ship keeps from either edge
    pub field_margin: f32,

    // === Player ===
    pub player_speed: f32,
    /// Seconds between shots
    pub player_reload: f32,
    pub player_lives: u8,
    pub player_radius: f32,
    /// Distance from the bottom of the field to the ship's row
    pub player_baseline_offset: f32,
    pub player_bullet_speed: f32,
    pub player_bullet_radius: f32,
    /// Invulnerability/flash window after taking a hit
    pub player_invulnerable_secs: f32,

    // === Enemies ===
    pub enemy_radius: f32,
    pub enemy_points: u64,
    pub enemy_bullet_radius: f32,
    pub enemy_bullet_speed: f32,
    pub enemy_bullet_speed_per_level: f32,
    pub enemy_fire_min: f32,
    pub enemy_fire_max: f32,
    /// Multiplier applied to the fire cooldown range per level past the first
    pub enemy_fire_cooldown_decay: f32,
    pub enemy_fire_cooldown_floor: f32,
    pub enemy_fire_chance: f32,
    pub enemy_fire_chance_per_level: f32,
    pub enemy_fire_chance_max: f32,
    pub enemy_sway_amplitude: f32,
    /// Radians per second
    pub enemy_sway_speed: f32,
    pub enemy_descent_speed: f32,
    pub enemy_descent_per_level: f32,

    // === Waves ===
    pub wave_base_enemies: u32,
    pub wave_enemies_per_level: u32,
    pub wave_max_enemies: u32,
    pub wave_columns: u32,
    pub wave_spacing_x: f32,
    pub wave_spacing_y: f32,
    /// y of the first enemy row
    pub wave_top: f32,
    pub level_bonus: u64,
    pub level_break_secs: f32,

    // === Particles ===
    pub particle_burst: usize,
    pub particle_ttl: f32,
    pub particle_speed_min: f32,
    pub particle_speed_max: f32,
    pub particle_size: f32,
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 480.0,
            field_height: 720.0,
            field_margin: 40.0,

            player_speed: 420.0,
            player_reload: 0.18,
            player_lives: 3,
            player_radius: 18.0,
            player_baseline_offset: 80.0,
            player_bullet_speed: 700.0,
            player_bullet_radius: 4.0,
            player_invulnerable_secs: 1.2,

            enemy_radius: 16.0,
            enemy_points: 100,
            enemy_bullet_radius: 5.0,
            enemy_bullet_speed: 260.0,
            enemy_bullet_speed_per_level: 20.0,
            enemy_fire_min: 1.2,
            enemy_fire_max: 3.5,
            enemy_fire_cooldown_decay: 0.92,
            enemy_fire_cooldown_floor: 0.4,
            enemy_fire_chance: 0.35,
            enemy_fire_chance_per_level: 0.05,
            enemy_fire_chance_max: 0.9,
            enemy_sway_amplitude: 36.0,
            enemy_sway_speed: 1.6,
            enemy_descent_speed: 8.0,
            enemy_descent_per_level: 3.0,

            wave_base_enemies: 6,
            wave_enemies_per_level: 2,
            wave_max_enemies: 48,
            wave_columns: 8,
            wave_spacing_x: 48.0,
            wave_spacing_y: 44.0,
            wave_top: 80.0,
            level_bonus: 500,
            level_break_secs: 1.5,

            particle_burst: 14,
            particle_ttl: 0.6,
            particle_speed_min: 60.0,
            particle_speed_max: 240.0,
            particle_size: 3.0,
            max_particles: 512,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning table
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load overrides, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning JSON ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Leftmost x the ship may occupy
    pub fn min_player_x(&self) -> f32 {
        self.field_margin
    }

    /// Rightmost x the ship may occupy
    pub fn max_player_x(&self) -> f32 {
        self.field_width - self.field_margin
    }

    /// The ship's row
    pub fn player_baseline(&self) -> f32 {
        self.field_height - self.player_baseline_offset
    }
}
