//! Per-frame simulation tick
//!
//! Order within a tick: input, player, enemies (fire decisions included),
//! bullets, particles, collision pass, compaction, win/lose check, frame.

use super::collision::resolve_collisions;
use super::frame::Frame;
use super::state::{GameEvent, GamePhase, GameState, Sound};
use super::wave::spawn_wave;
use crate::clamp;
use crate::consts::MAX_DT;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Fire held; shots go out whenever the reload allows
    pub fire: bool,
    /// Touch/pointer x the ship steers toward when no direction key is held
    pub target_x: Option<f32>,
}

/// Result of one tick
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub events: Vec<GameEvent>,
    pub frame: Frame,
}

/// Advance the game by `dt` seconds (clamped to `[0, MAX_DT]`)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickOutput {
    let dt = clamp(dt, 0.0, MAX_DT);
    let mut events = Vec::new();
    state.time += dt;

    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            // Leftover explosions finish animating
            for particle in &mut state.particles {
                particle.update(dt);
            }
            state.compact();
        }
        GamePhase::Playing | GamePhase::LevelComplete => {
            state.player.update(dt, input, &state.tuning);
            if input.fire {
                if let Some(bullet) = state.player.try_shoot(&state.tuning) {
                    state.pending.bullets.push(bullet);
                    events.push(GameEvent::sound(Sound::Shoot));
                }
            }

            for enemy in &mut state.enemies {
                if let Some(bullet) = enemy.update(dt, &state.wave, &state.tuning, &mut state.rng) {
                    state.pending.bullets.push(bullet);
                    events.push(GameEvent::sound(Sound::EnemyShoot));
                }
            }

            for bullet in &mut state.bullets {
                bullet.update(dt, &state.tuning);
            }
            for particle in &mut state.particles {
                particle.update(dt);
            }

            resolve_collisions(state, &mut events);
            state.compact();
            check_progress(state, dt, &mut events);
        }
    }

    TickOutput {
        events,
        frame: Frame::capture(state),
    }
}

/// Win/lose check and level transitions
fn check_progress(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    match state.phase {
        GamePhase::Playing => {
            if !state.player.alive {
                enter_game_over(state, events);
            } else if state.enemies.is_empty() {
                let cleared = state.level;
                let bonus = state.tuning.level_bonus * u64::from(cleared);
                state.add_score(bonus, events);
                events.push(GameEvent::LevelCleared {
                    level: cleared,
                    bonus,
                });
                events.push(GameEvent::sound(Sound::LevelClear));
                state.level += 1;
                state.level_timer = state.tuning.level_break_secs;
                state.phase = GamePhase::LevelComplete;
                log::info!("Level {} cleared (+{}), score {}", cleared, bonus, state.score);
            }
        }
        GamePhase::LevelComplete => {
            if !state.player.alive {
                enter_game_over(state, events);
                return;
            }
            state.level_timer = (state.level_timer - dt).max(0.0);
            if state.level_timer <= 0.0 {
                let enemies = spawn_wave(state);
                events.push(GameEvent::WaveSpawned {
                    level: state.level,
                    enemies,
                });
                state.phase = GamePhase::Playing;
            }
        }
        GamePhase::Menu | GamePhase::GameOver => {}
    }
}

fn enter_game_over(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    events.push(GameEvent::GameOver {
        score: state.score,
        level: state.level,
    });
    events.push(GameEvent::sound(Sound::GameOver));
    log::info!(
        "Game over at level {} with score {} (high {})",
        state.level,
        state.score,
        state.high_score
    );
}
