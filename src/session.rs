//! Game session: the simulation plus its high score store
//!
//! Platform front ends (browser, headless runner) drive a `Session` once per
//! animation frame and perform the returned events. The store is written at
//! the end of any frame in which the score passed the stored high score, so a
//! run abandoned mid-game keeps its best.

use crate::highscore::ScoreStore;
use crate::sim::{Frame, GamePhase, GameState, TickInput, TickOutput, tick};
use crate::tuning::Tuning;

pub struct Session<S: ScoreStore> {
    state: GameState,
    store: S,
    /// Last value known to be in the store
    stored_high: u64,
}

impl<S: ScoreStore> Session<S> {
    /// Read the stored high score and sit in the menu
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Self {
        let stored_high = store.load();
        let mut state = GameState::new(seed, tuning);
        state.high_score = stored_high;
        Self {
            state,
            store,
            stored_high,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Start command from the menu
    pub fn start(&mut self) -> bool {
        self.state.start()
    }

    /// Advance one frame, persisting any new high score
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> TickOutput {
        let out = tick(&mut self.state, input, dt);
        self.persist_high_score();
        out
    }

    /// Dismiss the game over screen and return to the menu
    pub fn acknowledge(&mut self) -> bool {
        if !self.state.acknowledge_game_over() {
            return false;
        }
        self.persist_high_score();
        true
    }

    /// Snapshot without advancing time
    pub fn snapshot(&self) -> Frame {
        Frame::capture(&self.state)
    }

    fn persist_high_score(&mut self) {
        if self.state.score > self.stored_high {
            self.stored_high = self.state.score;
            self.store.save(self.stored_high);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::MemoryStore;
    use crate::sim::GameEvent;
    use crate::sim::{Bullet, BulletOwner};
    use glam::Vec2;

    fn quiet_tuning() -> Tuning {
        Tuning {
            enemy_fire_chance: 0.0,
            enemy_fire_chance_per_level: 0.0,
            enemy_descent_speed: 0.0,
            enemy_descent_per_level: 0.0,
            ..Default::default()
        }
    }

    /// Kill the player with an enemy bullet on the last life
    fn lose_run(session: &mut Session<MemoryStore>) -> TickOutput {
        session.state.player.lives = 1;
        let p = session.state.player.pos;
        session.state.bullets.push(Bullet::new(
            Vec2::new(p.x, p.y),
            Vec2::ZERO,
            5.0,
            BulletOwner::Enemy,
        ));
        session.frame(&TickInput::default(), 1.0 / 60.0)
    }

    #[test]
    fn test_loads_stored_high_score() {
        let session = Session::new(1, Tuning::default(), MemoryStore::with_score(2_500));
        assert_eq!(session.state().high_score, 2_500);
        assert_eq!(session.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_better_score_persisted_and_read_back() {
        let mut session = Session::new(1, quiet_tuning(), MemoryStore::with_score(100));
        assert!(session.start());
        session.state.score = 1_200;
        session.state.high_score = 1_200;

        let out = lose_run(&mut session);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert!(out
            .events
            .contains(&GameEvent::GameOver { score: 1_200, level: 1 }));
        assert_eq!(session.store().load(), 1_200);
        assert_eq!(session.store().writes, 1);

        // Acknowledge does not write the same value twice
        assert!(session.acknowledge());
        assert_eq!(session.phase(), GamePhase::Menu);
        assert_eq!(session.store().writes, 1);

        // Next startup reads it back
        let store = session.store().clone();
        let next = Session::new(2, quiet_tuning(), store);
        assert_eq!(next.state().high_score, 1_200);
    }

    #[test]
    fn test_new_best_persisted_mid_run() {
        let tuning = Tuning {
            enemy_sway_amplitude: 0.0,
            ..quiet_tuning()
        };
        let mut session = Session::new(1, tuning, MemoryStore::with_score(50));
        session.start();
        session.state.enemies.truncate(2);
        let target = session.state.enemies[0].pos;
        session.state.enemies[0].home_x = target.x;
        // Second survivor keeps the wave from clearing
        session.state.enemies[1].pos.x = 440.0;
        session.state.enemies[1].home_x = 440.0;
        session.state.bullets.push(Bullet::new(
            Vec2::new(target.x, target.y + 24.0),
            Vec2::new(0.0, -700.0),
            4.0,
            BulletOwner::Player,
        ));

        let out = session.frame(&TickInput::default(), 1.0 / 60.0);
        assert!(out
            .events
            .contains(&GameEvent::NewHighScore { score: 100 }));
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.store().load(), 100);
        assert_eq!(session.store().writes, 1);

        // Quiet frames do not rewrite it
        session.frame(&TickInput::default(), 1.0 / 60.0);
        assert_eq!(session.store().writes, 1);
    }

    #[test]
    fn test_worse_score_not_persisted() {
        let mut session = Session::new(1, quiet_tuning(), MemoryStore::with_score(5_000));
        session.start();
        session.state.score = 300;

        lose_run(&mut session);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert!(session.acknowledge());
        assert_eq!(session.store().load(), 5_000);
        assert_eq!(session.store().writes, 0);
        assert_eq!(session.state().high_score, 5_000);
    }

    #[test]
    fn test_acknowledge_outside_game_over() {
        let mut session = Session::new(1, Tuning::default(), MemoryStore::new());
        assert!(!session.acknowledge());
        session.start();
        assert!(!session.acknowledge());
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = Session::new(1, quiet_tuning(), MemoryStore::new());
        session.start();
        lose_run(&mut session);
        assert!(!session.start());
        session.acknowledge();
        assert!(session.start());
        assert_eq!(session.state().player.lives, 3);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.snapshot().hud.phase, GamePhase::Playing);
    }
}
