//! Backend-agnostic rendering pass
//!
//! The simulation issues no drawing itself. A host plugs in a
//! [`RenderBackend`] (GPU, terminal, headless test probe) and calls
//! [`draw_frame`] after `tick`; the pass only reads settled state, so it can
//! never race the simulation.

use glam::Vec2;

use crate::sim::entities::Entity;
use crate::sim::{EnemyKind, GamePhase, GameState, TerrainSample};

/// Draw-call surface the simulation core renders through
///
/// Positions are entity centers in world units; `camera_x` is the left edge
/// of the viewport. Backends own projection, color, and sprite choice.
pub trait RenderBackend {
    fn draw_rect(&mut self, position: Vec2, size: Vec2, frame: u32);
    fn draw_ellipse(&mut self, position: Vec2, size: Vec2, frame: u32);
    fn draw_terrain(&mut self, samples: &[TerrainSample], camera_x: f32);
    fn draw_hud(&mut self, health: i32, lives: u32, score: u32, phase: GamePhase);
}

/// Walk the state read-only and emit one frame of draw calls
pub fn draw_frame<B: RenderBackend>(state: &GameState, backend: &mut B) {
    let phase = state.phase();
    if matches!(phase, GamePhase::LevelPlay | GamePhase::LevelOver) {
        if let Some(level) = state.level.as_ref() {
            backend.draw_terrain(level.samples(), state.camera_x());
        }

        let ship = &state.ship;
        backend.draw_rect(ship.position, ship.half_extents * 2.0, ship.frame());

        for enemy in &state.enemies {
            match enemy.kind {
                EnemyKind::Simple => {
                    backend.draw_rect(enemy.position, enemy.half_extents * 2.0, enemy.frame());
                }
                EnemyKind::Tracking => {
                    backend.draw_ellipse(
                        enemy.center(),
                        Vec2::splat(enemy.radius * 2.0),
                        enemy.frame(),
                    );
                }
            }
        }

        for (_, bullet) in state.ship_bullets.iter_active() {
            let b = bullet.bounds();
            backend.draw_rect(bullet.position, b.max - b.min, bullet.frame());
        }
        for (_, bullet) in state.enemy_bullets.iter_active() {
            let b = bullet.bounds();
            backend.draw_rect(bullet.position, b.max - b.min, bullet.frame());
        }
        for (_, bomb) in state.bombs.iter_active() {
            let b = bomb.bounds();
            backend.draw_ellipse(bomb.position, b.max - b.min, bomb.frame());
        }
    }

    backend.draw_hud(state.ship.health, state.ship.lives, state.score, phase);
}
