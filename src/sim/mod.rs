//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped only; `dt` comes from the host's monotonic clock
//! - Seeded RNG only
//! - Stable iteration order (slot order for pools, insertion order for enemies)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod level;
pub mod pool;
pub mod state;
pub mod tick;

pub use collision::{point_hits_enemy, point_in_aabb, point_in_circle, point_in_rect};
pub use entities::{
    Aabb, Bomb, Bullet, DamageState, Enemy, EnemyKind, Entity, Lifecycle, Ship, WorldCtx,
};
pub use level::{EnemySpawn, Level, LevelCatalog, LevelData, Surface, TerrainSample};
pub use pool::{Pool, Poolable};
pub use state::{GamePhase, GameState};
pub use tick::{FrameInput, tick};
