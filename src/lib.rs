//! Cavern Strike - simulation core for a side-scrolling cave shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, pools, collision, phase machine)
//! - `config`: Data-driven game balance
//! - `render`: Backend-agnostic read-only draw pass
//!
//! The crate owns no windowing, input polling, or drawing. A host loop feeds
//! [`sim::tick`] a [`sim::FrameInput`] and a `dt` from a monotonic clock, then
//! hands the resulting state to a [`render::RenderBackend`] of its choosing.

pub mod config;
pub mod render;
pub mod sim;

pub use config::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport width in world units (PSP screen ratio, height normalized to 1)
    pub const ASPECT: f32 = 480.0 / 272.0;
    /// World vertical extent
    pub const WORLD_HEIGHT: f32 = 1.0;

    /// Ship spawn offset into the viewport
    pub const SHIP_START_X: f32 = 0.02;
    pub const SHIP_START_Y: f32 = 0.5;

    /// Window after a hit during which further damage is ignored (seconds)
    pub const DAMAGE_RECOVERY_WINDOW: f32 = 0.2;

    /// Margin past the viewport edge before an entity is culled
    pub const CULL_MARGIN: f32 = 0.25;

    /// Hold on the level-over screen before the next level starts (seconds)
    pub const LEVEL_OVER_DELAY: f32 = 2.0;

    /// Upper bound on simultaneously live enemies
    pub const MAX_ENEMIES: usize = 32;
}

/// Velocity for a launch at `angle_deg` degrees with the given speed
#[inline]
pub fn launch_velocity(angle_deg: f32, speed: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(speed * rad.cos(), speed * rad.sin())
}
