//! Render snapshot handed to the external renderer each tick
//!
//! Pure data: the renderer decides how each `EntityKind` is drawn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Bullet, BulletOwner, Enemy, GamePhase, GameState, Particle, Player, Tint};

/// Drawable entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    PlayerBullet,
    EnemyBullet,
    Enemy,
    /// Explosion debris, colored by what blew up
    Particle(Tint),
}

/// One drawable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Opacity in [0, 1]
    pub alpha: f32,
    /// Ship is in its post-hit flash window
    pub flashing: bool,
}

impl From<&Player> for RenderItem {
    fn from(player: &Player) -> Self {
        Self {
            kind: EntityKind::Player,
            pos: player.pos,
            radius: player.radius,
            alpha: 1.0,
            flashing: player.is_invulnerable(),
        }
    }
}

impl From<&Bullet> for RenderItem {
    fn from(bullet: &Bullet) -> Self {
        let kind = match bullet.owner {
            BulletOwner::Player => EntityKind::PlayerBullet,
            BulletOwner::Enemy => EntityKind::EnemyBullet,
        };
        Self {
            kind,
            pos: bullet.pos,
            radius: bullet.radius,
            alpha: 1.0,
            flashing: false,
        }
    }
}

impl From<&Enemy> for RenderItem {
    fn from(enemy: &Enemy) -> Self {
        Self {
            kind: EntityKind::Enemy,
            pos: enemy.pos,
            radius: enemy.radius,
            alpha: 1.0,
            flashing: false,
        }
    }
}

impl From<&Particle> for RenderItem {
    fn from(particle: &Particle) -> Self {
        Self {
            kind: EntityKind::Particle(particle.tint),
            pos: particle.pos,
            radius: particle.size,
            alpha: particle.fade(),
            flashing: false,
        }
    }
}

/// Read-only values for the score/lives/level display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    pub level: u32,
    pub phase: GamePhase,
}

/// Everything the renderer and HUD need for one frame, in draw order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub hud: Hud,
    pub items: Vec<RenderItem>,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let mut items = Vec::with_capacity(
            state.particles.len() + state.enemies.len() + state.bullets.len() + 1,
        );
        items.extend(state.particles.iter().map(RenderItem::from));
        items.extend(state.enemies.iter().map(RenderItem::from));
        items.extend(state.bullets.iter().map(RenderItem::from));
        if state.player.alive && state.phase != GamePhase::Menu {
            items.push(RenderItem::from(&state.player));
        }

        Self {
            hud: Hud {
                score: state.score,
                high_score: state.high_score,
                lives: state.player.lives,
                level: state.level,
                phase: state.phase,
            },
            items,
        }
    }

    /// Number of items of a kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_menu_frame_has_no_ship() {
        let state = GameState::new(1, Tuning::default());
        let frame = Frame::capture(&state);
        assert!(frame.items.is_empty());
        assert_eq!(frame.hud.phase, GamePhase::Menu);
        assert_eq!(frame.hud.lives, 3);
    }

    #[test]
    fn test_playing_frame_draw_order() {
        let mut state = GameState::new(1, Tuning::default());
        state.start();
        let frame = Frame::capture(&state);
        assert_eq!(frame.count(EntityKind::Enemy), state.enemies.len());
        assert_eq!(frame.count(EntityKind::Player), 1);
        // Ship drawn last, on top
        assert_eq!(frame.items.last().map(|i| i.kind), Some(EntityKind::Player));
    }

    #[test]
    fn test_frame_serializes() {
        let mut state = GameState::new(1, Tuning::default());
        state.start();
        let json = serde_json::to_string(&Frame::capture(&state)).expect("serializable");
        assert!(json.contains("\"phase\":\"Playing\""));
        assert!(json.contains("\"Enemy\""));
    }
}
