//! Game state and core simulation types
//!
//! Plain data plus per-entity motion. Cross-entity rules (collisions,
//! scoring, phase changes) live in `collision` and `tick`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::tick::TickInput;
use super::wave::{WaveSpec, spawn_wave};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{clamp, rand_range};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a start command
    Menu,
    /// Active wave
    Playing,
    /// Wave cleared, next wave spawns when the break runs out
    LevelComplete,
    /// Run ended, waiting for acknowledgement
    GameOver,
}

/// Audio cues emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    Shoot,
    EnemyShoot,
    Explosion,
    Hit,
    LevelClear,
    GameOver,
}

/// Discrete outputs of a tick, performed by external collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    Sound { sound: Sound },
    WaveSpawned { level: u32, enemies: usize },
    LevelCleared { level: u32, bonus: u64 },
    /// Score passed the high score the run started against (once per run)
    NewHighScore { score: u64 },
    GameOver { score: u64, level: u32 },
}

impl GameEvent {
    pub fn sound(sound: Sound) -> Self {
        GameEvent::Sound { sound }
    }
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A projectile moving along a fixed velocity
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub owner: BulletOwner,
    pub alive: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, owner: BulletOwner) -> Self {
        Self {
            pos,
            vel,
            radius,
            owner,
            alive: true,
        }
    }

    /// Linear motion; dies once fully outside the field
    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.pos += self.vel * dt;
        let r = self.radius;
        if self.pos.y < -r
            || self.pos.y > tuning.field_height + r
            || self.pos.x < -r
            || self.pos.x > tuning.field_width + r
        {
            self.alive = false;
        }
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Horizontal velocity applied on the last update
    pub vel_x: f32,
    pub speed: f32,
    pub radius: f32,
    /// Seconds until the next shot is allowed (never negative)
    pub cooldown: f32,
    pub reload: f32,
    pub lives: u8,
    pub alive: bool,
    /// Remaining invulnerability/flash time after a hit
    pub flash: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.field_width / 2.0, tuning.player_baseline()),
            vel_x: 0.0,
            speed: tuning.player_speed,
            radius: tuning.player_radius,
            cooldown: 0.0,
            reload: tuning.player_reload,
            lives: tuning.player_lives,
            alive: true,
            flash: 0.0,
        }
    }

    /// Move from directional input, keep inside the field, run down timers
    pub fn update(&mut self, dt: f32, input: &TickInput, tuning: &Tuning) {
        let max_step = self.speed * dt;
        let mut step = 0.0;
        if input.left || input.right {
            if input.left {
                step -= max_step;
            }
            if input.right {
                step += max_step;
            }
        } else if let Some(target_x) = input.target_x {
            let dx = target_x - self.pos.x;
            if dx.abs() > TOUCH_DEAD_ZONE {
                step = dx.signum() * max_step.min(dx.abs());
            }
        }

        let prev_x = self.pos.x;
        self.pos.x = clamp(
            self.pos.x + step,
            tuning.min_player_x(),
            tuning.max_player_x(),
        );
        // Velocity actually achieved, zero when pinned against a wall
        self.vel_x = if dt > 0.0 { (self.pos.x - prev_x) / dt } else { 0.0 };

        self.cooldown = (self.cooldown - dt).max(0.0);
        self.flash = (self.flash - dt).max(0.0);
    }

    /// Fire from the ship's nose if reloaded
    pub fn try_shoot(&mut self, tuning: &Tuning) -> Option<Bullet> {
        if !self.alive || self.cooldown > 0.0 {
            return None;
        }
        self.cooldown = self.reload;
        Some(Bullet::new(
            self.pos - Vec2::new(0.0, PLAYER_NOSE_OFFSET),
            Vec2::new(0.0, -tuning.player_bullet_speed),
            tuning.player_bullet_radius,
            BulletOwner::Player,
        ))
    }

    pub fn is_invulnerable(&self) -> bool {
        self.flash > 0.0
    }

    /// Lose a life unless invulnerable. Returns true if the hit landed.
    pub fn damage(&mut self, invulnerable_secs: f32) -> bool {
        if !self.alive || self.is_invulnerable() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.flash = invulnerable_secs;
        if self.lives == 0 {
            self.alive = false;
        }
        true
    }

    /// Lose every remaining life at once
    pub fn destroy(&mut self) {
        self.lives = 0;
        self.alive = false;
    }
}

/// An invader
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Center of the horizontal sway
    pub home_x: f32,
    pub row: u32,
    pub col: u32,
    pub radius: f32,
    pub sway_phase: f32,
    /// Seconds until the next fire decision (never negative)
    pub fire_cooldown: f32,
    pub alive: bool,
}

impl Enemy {
    /// Sway, descend, and maybe fire. Returns a bullet to spawn.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        wave: &WaveSpec,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<Bullet> {
        self.sway_phase += tuning.enemy_sway_speed * dt;
        self.pos.x = self.home_x + self.sway_phase.sin() * tuning.enemy_sway_amplitude;
        self.pos.y += wave.descent_speed * dt;

        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        if self.fire_cooldown > 0.0 {
            return None;
        }

        self.fire_cooldown = rand_range(rng, wave.fire_min, wave.fire_max);
        if rng.random::<f32>() >= wave.fire_chance {
            return None;
        }

        Some(Bullet::new(
            self.pos + Vec2::new(0.0, ENEMY_MUZZLE_OFFSET),
            Vec2::new(0.0, wave.bullet_speed),
            tuning.enemy_bullet_radius,
            BulletOwner::Enemy,
        ))
    }
}

/// Particle color family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Enemy,
    Player,
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Time to live (seconds, counts down)
    pub ttl: f32,
    pub max_ttl: f32,
    pub size: f32,
    pub tint: Tint,
}

impl Particle {
    /// Drift with linearly fading velocity
    pub fn update(&mut self, dt: f32) {
        self.ttl = (self.ttl - dt).max(0.0);
        self.pos += self.vel * self.fade() * dt;
    }

    /// Remaining life in [0, 1]; drives both speed and alpha
    pub fn fade(&self) -> f32 {
        if self.max_ttl > 0.0 {
            (self.ttl / self.max_ttl).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn is_alive(&self) -> bool {
        self.ttl > 0.0
    }
}

/// Entities created mid-tick, merged during compaction
#[derive(Debug, Clone, Default)]
pub struct SpawnQueue {
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
}

impl SpawnQueue {
    /// Queue an explosion burst of `tuning.particle_burst` particles
    pub fn burst<R: Rng + ?Sized>(&mut self, rng: &mut R, pos: Vec2, tint: Tint, tuning: &Tuning) {
        for _ in 0..tuning.particle_burst {
            let angle = rand_range(rng, 0.0, std::f32::consts::TAU);
            let speed = rand_range(rng, tuning.particle_speed_min, tuning.particle_speed_max);
            let ttl = tuning.particle_ttl * rand_range(rng, 0.75, 1.0);
            self.particles.push(Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                ttl,
                max_ttl: ttl,
                size: tuning.particle_size,
                tint,
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty() && self.particles.is_empty()
    }
}

/// Complete game state: entity collections, score, and the phase machine
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    /// Always >= score
    pub high_score: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub pending: SpawnQueue,
    /// Difficulty of the active wave
    pub wave: WaveSpec,
    /// Seconds left in the LevelComplete break
    pub level_timer: f32,
    /// Simulated seconds since creation
    pub time: f32,
    new_high_announced: bool,
    next_id: u32,
}

impl GameState {
    /// Create a new game sitting in the menu
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(&tuning);
        let wave = WaveSpec::for_level(1, &tuning);
        Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            level: 1,
            score: 0,
            high_score: 0,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            pending: SpawnQueue::default(),
            wave,
            level_timer: 0.0,
            time: 0.0,
            new_high_announced: false,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Menu -> Playing. Resets the run and spawns the first wave.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }
        self.score = 0;
        self.level = 1;
        self.player = Player::new(&self.tuning);
        self.enemies.clear();
        self.bullets.clear();
        self.particles.clear();
        self.pending = SpawnQueue::default();
        self.level_timer = 0.0;
        self.new_high_announced = false;
        spawn_wave(self);
        self.phase = GamePhase::Playing;
        log::info!("Run started (seed {}, high score {})", self.seed, self.high_score);
        true
    }

    /// GameOver -> Menu
    pub fn acknowledge_game_over(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::Menu;
        true
    }

    /// Add points, keeping the high score at or above the score
    pub fn add_score(&mut self, points: u64, events: &mut Vec<GameEvent>) {
        if points == 0 {
            return;
        }
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
            if !self.new_high_announced {
                self.new_high_announced = true;
                events.push(GameEvent::NewHighScore { score: self.score });
            }
        }
    }

    /// Drop dead entities, then merge everything spawned this tick
    pub fn compact(&mut self) {
        self.bullets.retain(|b| b.alive);
        self.enemies.retain(|e| e.alive);
        self.particles.retain(Particle::is_alive);

        self.bullets.append(&mut self.pending.bullets);
        self.particles.append(&mut self.pending.particles);

        // Oldest particles go first when over budget
        if self.particles.len() > self.tuning.max_particles {
            let excess = self.particles.len() - self.tuning.max_particles;
            self.particles.drain(..excess);
        }
    }

    pub fn player_bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter().filter(|b| b.owner == BulletOwner::Player)
    }

    pub fn enemy_bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter().filter(|b| b.owner == BulletOwner::Enemy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrow_field() -> Tuning {
        Tuning {
            field_width: 400.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_player_clamps_to_left_bound() {
        let tuning = narrow_field();
        let mut player = Player::new(&tuning);
        player.pos.x = 200.0;
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..60 {
            player.update(1.0 / 60.0, &input, &tuning);
            assert!(player.pos.x >= 40.0);
        }
        assert_eq!(player.pos.x, 40.0);
    }

    #[test]
    fn test_player_velocity_zero_at_wall() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        player.update(0.05, &input, &tuning);
        assert!((player.vel_x + 420.0).abs() < 1e-3);

        player.pos.x = tuning.min_player_x();
        player.update(0.05, &input, &tuning);
        assert_eq!(player.pos.x, tuning.min_player_x());
        assert_eq!(player.vel_x, 0.0);

        // Partial step into the wall reports the shortened move
        player.pos.x = tuning.min_player_x() + 7.0;
        player.update(0.05, &input, &tuning);
        assert!((player.vel_x + 140.0).abs() < 1e-3);
    }

    #[test]
    fn test_enemy_sways_and_descends() {
        let tuning = Tuning::default();
        let wave = WaveSpec {
            level: 1,
            enemy_count: 1,
            fire_chance: 0.0,
            fire_min: 1.0,
            fire_max: 2.0,
            descent_speed: 12.0,
            bullet_speed: 260.0,
        };
        let mut rng = Pcg32::seed_from_u64(11);
        let mut enemy = Enemy {
            id: 1,
            pos: Vec2::new(200.0, 100.0),
            home_x: 200.0,
            row: 0,
            col: 0,
            radius: tuning.enemy_radius,
            sway_phase: 0.0,
            fire_cooldown: 100.0,
            alive: true,
        };

        let dt = 1.0 / 60.0;
        for _ in 0..600 {
            let y = enemy.pos.y;
            assert!(enemy.update(dt, &wave, &tuning, &mut rng).is_none());
            assert!((enemy.pos.y - (y + wave.descent_speed * dt)).abs() < 1e-4);
            assert!((enemy.pos.x - enemy.home_x).abs() <= tuning.enemy_sway_amplitude + 1e-4);
        }
    }

    #[test]
    fn test_enemy_failed_fire_roll_reseeds_cooldown() {
        let tuning = Tuning::default();
        let wave = WaveSpec {
            level: 1,
            enemy_count: 1,
            fire_chance: 0.0,
            fire_min: 1.0,
            fire_max: 2.0,
            descent_speed: 0.0,
            bullet_speed: 260.0,
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let mut enemy = Enemy {
            id: 1,
            pos: Vec2::new(200.0, 100.0),
            home_x: 200.0,
            row: 0,
            col: 0,
            radius: tuning.enemy_radius,
            sway_phase: 0.0,
            fire_cooldown: 0.0,
            alive: true,
        };

        for _ in 0..50 {
            enemy.fire_cooldown = 0.0;
            assert!(enemy.update(1.0 / 60.0, &wave, &tuning, &mut rng).is_none());
            assert!(enemy.fire_cooldown >= wave.fire_min);
            assert!(enemy.fire_cooldown <= wave.fire_max);
        }
    }

    #[test]
    fn test_player_both_keys_cancel() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let start_x = player.pos.x;
        let input = TickInput {
            left: true,
            right: true,
            target_x: Some(10.0),
            ..Default::default()
        };
        player.update(0.05, &input, &tuning);
        assert_eq!(player.pos.x, start_x);
        assert_eq!(player.vel_x, 0.0);
    }

    #[test]
    fn test_player_touch_steering_does_not_overshoot() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos.x = 240.0;
        let input = TickInput {
            target_x: Some(250.0),
            ..Default::default()
        };
        player.update(0.05, &input, &tuning);
        assert_eq!(player.pos.x, 250.0);

        // Inside the dead zone nothing moves
        let input = TickInput {
            target_x: Some(252.0),
            ..Default::default()
        };
        player.update(0.05, &input, &tuning);
        assert_eq!(player.pos.x, 250.0);
    }

    #[test]
    fn test_try_shoot_respects_cooldown() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);

        let bullet = player.try_shoot(&tuning).expect("first shot fires");
        assert_eq!(bullet.owner, BulletOwner::Player);
        assert_eq!(bullet.pos, player.pos - Vec2::new(0.0, PLAYER_NOSE_OFFSET));
        assert_eq!(bullet.vel, Vec2::new(0.0, -700.0));
        assert_eq!(player.cooldown, tuning.player_reload);

        assert!(player.try_shoot(&tuning).is_none());

        player.update(0.2, &TickInput::default(), &tuning);
        assert_eq!(player.cooldown, 0.0);
        assert!(player.try_shoot(&tuning).is_some());
    }

    #[test]
    fn test_player_damage_and_invulnerability() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert!(player.damage(1.0));
        assert_eq!(player.lives, 2);
        assert!(player.is_invulnerable());
        // Second hit during the flash window is ignored
        assert!(!player.damage(1.0));
        assert_eq!(player.lives, 2);

        player.flash = 0.0;
        player.lives = 1;
        assert!(player.damage(1.0));
        assert_eq!(player.lives, 0);
        assert!(!player.alive);
    }

    #[test]
    fn test_bullet_leaves_field() {
        let tuning = Tuning::default();
        let mut bullet = Bullet::new(
            Vec2::new(100.0, 2.0),
            Vec2::new(0.0, -700.0),
            4.0,
            BulletOwner::Player,
        );
        bullet.update(0.005, &tuning);
        assert!(bullet.alive);
        bullet.update(0.02, &tuning);
        assert!(!bullet.alive);
    }

    #[test]
    fn test_particle_fades_and_dies() {
        let mut particle = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(100.0, 0.0),
            ttl: 0.5,
            max_ttl: 0.5,
            size: 3.0,
            tint: Tint::Enemy,
        };
        particle.update(0.25);
        assert!((particle.fade() - 0.5).abs() < 1e-6);
        assert!((particle.pos.x - 12.5).abs() < 1e-4);
        particle.update(0.3);
        assert_eq!(particle.ttl, 0.0);
        assert!(!particle.is_alive());
    }

    #[test]
    fn test_burst_count() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut queue = SpawnQueue::default();
        queue.burst(&mut rng, Vec2::new(10.0, 10.0), Tint::Enemy, &tuning);
        assert_eq!(queue.particles.len(), tuning.particle_burst);
        for p in &queue.particles {
            let speed = p.vel.length();
            assert!(speed >= tuning.particle_speed_min - 1e-3);
            assert!(speed <= tuning.particle_speed_max + 1e-3);
            assert!(p.ttl > 0.0 && p.ttl <= tuning.particle_ttl);
        }
    }

    #[test]
    fn test_compact_merges_pending_and_caps_particles() {
        let tuning = Tuning {
            max_particles: 20,
            ..Default::default()
        };
        let mut state = GameState::new(3, tuning.clone());
        let mut rng = Pcg32::seed_from_u64(2);
        state.pending.burst(&mut rng, Vec2::ZERO, Tint::Enemy, &tuning);
        state.pending.burst(&mut rng, Vec2::ZERO, Tint::Player, &tuning);
        state.pending.bullets.push(Bullet::new(
            Vec2::new(10.0, 10.0),
            Vec2::ZERO,
            4.0,
            BulletOwner::Enemy,
        ));
        state.bullets.push(Bullet {
            alive: false,
            ..Bullet::new(Vec2::ZERO, Vec2::ZERO, 4.0, BulletOwner::Player)
        });

        state.compact();
        assert!(state.pending.is_empty());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.enemy_bullets().count(), 1);
        assert_eq!(state.particles.len(), 20);
        // The newest burst survives the cap intact
        assert!(state.particles.iter().rev().take(14).all(|p| p.tint == Tint::Player));
    }

    #[test]
    fn test_start_only_from_menu() {
        let mut state = GameState::new(42, Tuning::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.enemies.is_empty());

        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.enemies.len() as u32, state.wave.enemy_count);

        assert!(!state.start());
        assert!(!state.acknowledge_game_over());
    }

    #[test]
    fn test_add_score_tracks_high_score_once() {
        let mut state = GameState::new(42, Tuning::default());
        state.high_score = 150;
        state.start();
        let mut events = Vec::new();

        state.add_score(100, &mut events);
        assert_eq!(state.high_score, 150);
        assert!(events.is_empty());

        state.add_score(100, &mut events);
        assert_eq!(state.high_score, 200);
        assert_eq!(events, vec![GameEvent::NewHighScore { score: 200 }]);

        state.add_score(100, &mut events);
        assert_eq!(state.high_score, 300);
        assert_eq!(events.len(), 1);
    }
}
