//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time advances only through `tick(dt)`
//! - Seeded RNG only
//! - Side effects (audio, storage, drawing) leave as `GameEvent`s and `Frame`s
//!
//! Each entity kind is its own struct in its own collection with an inherent
//! `update`; `tick` calls them in a fixed order. Collisions need typed access
//! to specific pairs, so there is no shared entity enum for updates.
//! `EntityKind` is the tag the render snapshot uses to tell kinds apart.

pub mod collision;
pub mod frame;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{CollisionSummary, resolve_collisions};
pub use frame::{EntityKind, Frame, Hud, RenderItem};
pub use state::{
    Bullet, BulletOwner, Enemy, GameEvent, GamePhase, GameState, Particle, Player, Sound,
    SpawnQueue, Tint,
};
pub use tick::{TickInput, TickOutput, tick};
pub use wave::{WaveSpec, spawn_wave};
