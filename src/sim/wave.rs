//! Wave generation and difficulty scaling
//!
//! Every difficulty knob is monotonic in the level: more enemies (until the
//! cap), shorter fire cooldowns, higher fire probability, faster descent and
//! faster enemy bullets.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, GameState};
use crate::rand_range;
use crate::tuning::Tuning;

/// Difficulty parameters for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    pub level: u32,
    pub enemy_count: u32,
    /// Probability an enemy fires when its cooldown expires
    pub fire_chance: f32,
    pub fire_min: f32,
    pub fire_max: f32,
    pub descent_speed: f32,
    pub bullet_speed: f32,
}

impl WaveSpec {
    pub fn for_level(level: u32, tuning: &Tuning) -> Self {
        let level = level.max(1);
        let past_first = level - 1;
        let steps = past_first as f32;

        let enemy_count = tuning
            .wave_base_enemies
            .saturating_add(tuning.wave_enemies_per_level.saturating_mul(level))
            .min(tuning.wave_max_enemies);

        let decay = tuning
            .enemy_fire_cooldown_decay
            .powi(past_first.min(i32::MAX as u32) as i32);
        let fire_min = (tuning.enemy_fire_min * decay).max(tuning.enemy_fire_cooldown_floor);
        let fire_max = (tuning.enemy_fire_max * decay).max(fire_min);

        Self {
            level,
            enemy_count,
            fire_chance: (tuning.enemy_fire_chance + tuning.enemy_fire_chance_per_level * steps)
                .min(tuning.enemy_fire_chance_max),
            fire_min,
            fire_max,
            descent_speed: tuning.enemy_descent_speed + tuning.enemy_descent_per_level * steps,
            bullet_speed: tuning.enemy_bullet_speed + tuning.enemy_bullet_speed_per_level * steps,
        }
    }
}

/// Replace the enemy collection with the formation for `state.level`.
/// Returns the number of enemies spawned.
pub fn spawn_wave(state: &mut GameState) -> usize {
    let spec = WaveSpec::for_level(state.level, &state.tuning);
    let count = spec.enemy_count;
    let cols = state.tuning.wave_columns.clamp(1, count.max(1));
    let center_x = state.tuning.field_width / 2.0;

    state.enemies.clear();
    for i in 0..count {
        let row = i / cols;
        let col = i % cols;
        // Short last row is centered as well
        let row_len = cols.min(count - row * cols);
        let offset = col as f32 - (row_len - 1) as f32 / 2.0;
        let x = center_x + offset * state.tuning.wave_spacing_x;
        let y = state.tuning.wave_top + row as f32 * state.tuning.wave_spacing_y;
        let fire_cooldown = rand_range(&mut state.rng, spec.fire_min, spec.fire_max);

        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: Vec2::new(x, y),
            home_x: x,
            row,
            col,
            radius: state.tuning.enemy_radius,
            sway_phase: row as f32 * 0.5,
            fire_cooldown,
            alive: true,
        });
    }

    log::info!(
        "Wave {}: {} enemies, fire chance {:.2}, descent {:.1}",
        spec.level,
        count,
        spec.fire_chance,
        spec.descent_speed
    );
    state.wave = spec;
    count as usize
}
