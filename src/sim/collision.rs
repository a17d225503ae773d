//! Collision and scoring pass
//!
//! Runs once per tick after every entity has moved. Entities are only
//! flagged dead here; removal happens in `GameState::compact`.

use super::state::{BulletOwner, GameEvent, GameState, Sound, Tint};
use crate::circles_overlap;

/// What the pass resolved this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionSummary {
    pub enemies_destroyed: u32,
    pub bullets_consumed: u32,
    pub player_hits: u32,
    /// An enemy reached the player's row
    pub invaded: bool,
}

/// Resolve bullet/enemy/player overlaps, award points, queue explosions.
///
/// Every overlapping player-bullet/enemy pair is resolved: an enemy struck
/// by several bullets in one tick dies once, and each of those bullets is
/// consumed.
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) -> CollisionSummary {
    let mut summary = CollisionSummary::default();
    let mut points = 0;

    {
        let GameState {
            tuning,
            rng,
            player,
            enemies,
            bullets,
            pending,
            ..
        } = &mut *state;

        // 1. Player bullets vs enemies
        let targetable: Vec<bool> = enemies.iter().map(|e| e.alive).collect();
        for bullet in bullets
            .iter_mut()
            .filter(|b| b.alive && b.owner == BulletOwner::Player)
        {
            for (enemy, _) in enemies
                .iter_mut()
                .zip(&targetable)
                .filter(|(_, was_alive)| **was_alive)
            {
                if !circles_overlap(bullet.pos, bullet.radius, enemy.pos, enemy.radius) {
                    continue;
                }
                if bullet.alive {
                    bullet.alive = false;
                    summary.bullets_consumed += 1;
                }
                if enemy.alive {
                    enemy.alive = false;
                    summary.enemies_destroyed += 1;
                    points += tuning.enemy_points;
                    pending.burst(rng, enemy.pos, Tint::Enemy, tuning);
                    events.push(GameEvent::sound(Sound::Explosion));
                    log::debug!("Enemy {} destroyed", enemy.id);
                }
            }
        }

        // 2. Enemy bullets vs player
        for bullet in bullets
            .iter_mut()
            .filter(|b| b.alive && b.owner == BulletOwner::Enemy)
        {
            if !player.alive {
                break;
            }
            // Bullets pass through while the ship is flashing
            if player.is_invulnerable()
                || !circles_overlap(bullet.pos, bullet.radius, player.pos, player.radius)
            {
                continue;
            }
            bullet.alive = false;
            summary.bullets_consumed += 1;
            if player.damage(tuning.player_invulnerable_secs) {
                summary.player_hits += 1;
                pending.burst(rng, player.pos, Tint::Player, tuning);
                events.push(GameEvent::sound(Sound::Hit));
                if !player.alive {
                    events.push(GameEvent::sound(Sound::Explosion));
                }
            }
        }

        // 3. Enemies vs player: direct contact or reaching the player's row
        for enemy in enemies.iter_mut().filter(|e| e.alive) {
            if !player.alive {
                break;
            }
            if circles_overlap(enemy.pos, enemy.radius, player.pos, player.radius) {
                enemy.alive = false;
                summary.enemies_destroyed += 1;
                pending.burst(rng, enemy.pos, Tint::Enemy, tuning);
                events.push(GameEvent::sound(Sound::Explosion));
                if player.damage(tuning.player_invulnerable_secs) {
                    summary.player_hits += 1;
                    events.push(GameEvent::sound(Sound::Hit));
                    if !player.alive {
                        pending.burst(rng, player.pos, Tint::Player, tuning);
                    }
                }
            } else if enemy.pos.y + enemy.radius >= player.pos.y {
                log::info!("Enemy {} reached the player's row", enemy.id);
                player.destroy();
                summary.invaded = true;
                pending.burst(rng, player.pos, Tint::Player, tuning);
                events.push(GameEvent::sound(Sound::Explosion));
            }
        }
    }

    state.add_score(points, events);
    summary
}
