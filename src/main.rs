//! Space Shooter entry point
//!
//! The browser build is driven from JavaScript through `space_shooter::web`.
//! Natively this runs a headless autopilot session, handy for balance checks.
//!
//! Environment:
//! - `SPACE_SHOOTER_TUNING`: path to a tuning JSON file
//! - `SPACE_SHOOTER_HIGH_SCORE`: high score file (default `.space_shooter_high`)
//! - `SPACE_SHOOTER_SECONDS`: simulated seconds to play (default 120)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use space_shooter::sim::{GameEvent, GamePhase};
    use space_shooter::{FileStore, Session, Tuning};

    env_logger::init();
    log::info!("Space Shooter (native, headless) starting...");

    let tuning = match std::env::var("SPACE_SHOOTER_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };
    let store_path = std::env::var("SPACE_SHOOTER_HIGH_SCORE")
        .unwrap_or_else(|_| ".space_shooter_high".to_string());
    let seconds: f32 = std::env::var("SPACE_SHOOTER_SECONDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(120.0);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Game initialized with seed: {}", seed);

    let mut session = Session::new(seed, tuning, FileStore::new(store_path));
    session.start();

    let dt = 1.0 / 60.0;
    let frames = (seconds / dt) as u32;
    for _ in 0..frames {
        let input = autopilot(session.state());
        let out = session.frame(&input, dt);
        for event in &out.events {
            match event {
                GameEvent::LevelCleared { level, bonus } => {
                    println!("Level {level} cleared (+{bonus})");
                }
                GameEvent::NewHighScore { score } => println!("New high score: {score}"),
                _ => {}
            }
        }
        if session.phase() == GamePhase::GameOver {
            break;
        }
    }

    let state = session.state();
    println!(
        "Final: score {} | level {} | lives {} | high {}",
        state.score, state.level, state.player.lives, state.high_score
    );
    session.acknowledge();
}

/// Track the nearest enemy column and keep firing
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &space_shooter::sim::GameState) -> space_shooter::sim::TickInput {
    let ship_x = state.player.pos.x;
    let target_x = state
        .enemies
        .iter()
        .map(|e| e.pos.x)
        .min_by(|a, b| {
            (a - ship_x)
                .abs()
                .partial_cmp(&(b - ship_x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    space_shooter::sim::TickInput {
        fire: true,
        target_x,
        ..Default::default()
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `web::wasm_start`, this is just to satisfy the compiler
}
