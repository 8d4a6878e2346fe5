//! The closed entity set: ship, enemies, bullets, bombs
//!
//! Four variants behind one capability surface ([`Entity`]): advance by dt,
//! report a bounding box, report lifecycle state. Per-variant rules live on
//! the concrete types; the frame pipeline in `tick` decides who gets updated
//! and collided.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::Poolable;
use crate::consts;
use crate::launch_velocity;

/// Entity lifecycle
///
/// `Dead` is terminal for a logical instance: the only way back is a pooled
/// reset, which creates a fresh instance in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Asleep,
    Awake,
    Dead,
}

/// Axis-aligned bounding box given by min/max corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_half_extents(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

/// Per-update view of the world, threaded through every entity update
///
/// Replaces ambient globals: the frame pipeline builds one of these per tick
/// from the game state and tuning.
#[derive(Debug, Clone, Copy)]
pub struct WorldCtx {
    pub ship_position: Vec2,
    pub level_width: f32,
    pub gravity: f32,
    pub tracking_gain: f32,
    pub enemy_max_speed: f32,
}

/// Common capability set over the closed entity set
pub trait Entity {
    fn update(&mut self, dt: f32, ctx: &WorldCtx);
    fn bounds(&self) -> Aabb;
    fn lifecycle(&self) -> Lifecycle;
    /// Animation frame counter, advanced once per update
    fn frame(&self) -> u32;
}

/// Whether the ship is inside its post-hit grace window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageState {
    Recovering,
    Recovered,
}

/// The player craft. One per game state, long-lived for the run.
#[derive(Debug, Clone)]
pub struct Ship {
    pub position: Vec2,
    pub velocity: Vec2,
    pub half_extents: Vec2,
    pub health: i32,
    pub lives: u32,
    pub damage_state: DamageState,
    /// Countdown to `Recovered`; damage is rejected while above zero
    pub damage_recovery: f32,
    state: Lifecycle,
    frame: u32,
}

impl Ship {
    pub fn new(half_extents: Vec2) -> Self {
        Self {
            position: Vec2::new(consts::SHIP_START_X, consts::SHIP_START_Y),
            velocity: Vec2::ZERO,
            half_extents,
            health: 100,
            lives: 3,
            damage_state: DamageState::Recovered,
            damage_recovery: 0.0,
            state: Lifecycle::Awake,
            frame: 0,
        }
    }

    /// Apply damage, clamped to [0, 100]
    ///
    /// Silently ignored while the recovery countdown is running; a hit that
    /// lands starts the fixed recovery window.
    pub fn take_damage(&mut self, amount: i32) {
        if self.damage_recovery > 0.0 {
            return;
        }
        self.health = (self.health - amount).clamp(0, 100);
        self.damage_recovery = consts::DAMAGE_RECOVERY_WINDOW;
        self.damage_state = DamageState::Recovering;
    }

    /// Spend a life and restore full health
    pub fn remove_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.health = 100;
    }

    /// New-game reset: three lives, full health
    pub fn reset_lives(&mut self) {
        self.lives = 3;
        self.health = 100;
    }

    /// Place the ship at the level start position
    pub fn respawn(&mut self) {
        self.position = Vec2::new(consts::SHIP_START_X, consts::SHIP_START_Y);
        self.velocity = Vec2::ZERO;
        self.damage_state = DamageState::Recovered;
        self.damage_recovery = 0.0;
    }
}

impl Entity for Ship {
    fn update(&mut self, dt: f32, ctx: &WorldCtx) {
        // Velocity is written by the input collaborator; integrate and clamp
        // to the level extent (clamped, not wrapped).
        self.position += self.velocity * dt;
        self.position.x = self.position.x.clamp(0.0, ctx.level_width);
        self.position.y = self.position.y.clamp(0.0, consts::WORLD_HEIGHT);

        self.damage_recovery = (self.damage_recovery - dt).max(0.0);
        if self.damage_recovery == 0.0 {
            self.damage_state = DamageState::Recovered;
        }
        self.frame = self.frame.wrapping_add(1);
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.half_extents)
    }

    fn lifecycle(&self) -> Lifecycle {
        self.state
    }

    fn frame(&self) -> u32 {
        self.frame
    }
}

/// Enemy movement/behavior rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Constant downward drift
    Simple,
    /// Drift plus steering toward the ship's current position
    Tracking,
}

/// A hostile craft
///
/// Carries both hitbox shapes: the rectangular box shared by every entity
/// and a circle centered on the position. Collision picks per kind: `Simple`
/// is gated by the rectangle, `Tracking` by the circle (round sprite).
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub half_extents: Vec2,
    pub radius: f32,
    state: Lifecycle,
    frame: u32,
}

impl Enemy {
    /// Create asleep with the stock downward drift
    pub fn new(kind: EnemyKind, position: Vec2, half_extents: Vec2, radius: f32) -> Self {
        Self {
            kind,
            position,
            velocity: Vec2::new(0.0, -0.1),
            half_extents,
            radius,
            state: Lifecycle::Asleep,
            frame: 0,
        }
    }

    /// Circular hitbox center (tracks the position every frame)
    pub fn center(&self) -> Vec2 {
        self.position
    }

    /// Activate a sleeping enemy. Waking the dead is a programming error.
    pub fn wake(&mut self) {
        debug_assert!(self.state != Lifecycle::Dead, "wake() on a dead enemy");
        if self.state == Lifecycle::Asleep {
            self.state = Lifecycle::Awake;
        }
    }

    /// Terminal within this lifetime; the cull pass removes it this frame
    pub fn kill(&mut self) {
        self.state = Lifecycle::Dead;
    }
}

impl Entity for Enemy {
    fn update(&mut self, dt: f32, ctx: &WorldCtx) {
        if self.state != Lifecycle::Awake {
            return;
        }
        if self.kind == EnemyKind::Tracking {
            let offset = ctx.ship_position - self.position;
            self.velocity += offset * ctx.tracking_gain * dt;
            self.velocity = self.velocity.clamp_length_max(ctx.enemy_max_speed);
        }
        self.position += self.velocity * dt;
        self.frame = self.frame.wrapping_add(1);
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.half_extents)
    }

    fn lifecycle(&self) -> Lifecycle {
        self.state
    }

    fn frame(&self) -> u32 {
        self.frame
    }
}

/// A straight-flying projectile. Pooled; ownership is decided by which pool
/// it lives in (ship-fired vs enemy-fired).
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub position: Vec2,
    pub velocity: Vec2,
    state: Lifecycle,
    frame: u32,
}

impl Default for Bullet {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            state: Lifecycle::Awake,
            frame: 0,
        }
    }
}

impl Poolable for Bullet {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Entity for Bullet {
    fn update(&mut self, dt: f32, _ctx: &WorldCtx) {
        self.position += self.velocity * dt;
        self.frame = self.frame.wrapping_add(1);
    }

    fn bounds(&self) -> Aabb {
        // Bullets collide as points; the box exists for the render pass
        Aabb::from_center_half_extents(self.position, Vec2::splat(0.004))
    }

    fn lifecycle(&self) -> Lifecycle {
        self.state
    }

    fn frame(&self) -> u32 {
        self.frame
    }
}

/// Ship-dropped ordnance on a ballistic arc
///
/// Launch velocity is derived once from angle and speed; gravity then pulls
/// the vertical component down every frame (Euler integration).
#[derive(Debug, Clone, PartialEq)]
pub struct Bomb {
    pub angle_deg: f32,
    pub initial_velocity: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    state: Lifecycle,
    frame: u32,
}

impl Default for Bomb {
    fn default() -> Self {
        Self {
            angle_deg: 45.0,
            initial_velocity: 2.0,
            position: Vec2::ZERO,
            velocity: launch_velocity(45.0, 2.0),
            state: Lifecycle::Awake,
            frame: 0,
        }
    }
}

impl Bomb {
    /// Re-derive the launch velocity for a tuned angle/speed
    pub fn launch(&mut self, position: Vec2, angle_deg: f32, speed: f32) {
        self.position = position;
        self.angle_deg = angle_deg;
        self.initial_velocity = speed;
        self.velocity = launch_velocity(angle_deg, speed);
    }
}

impl Poolable for Bomb {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Entity for Bomb {
    fn update(&mut self, dt: f32, ctx: &WorldCtx) {
        self.position += self.velocity * dt;
        self.velocity.y -= ctx.gravity * dt;
        self.frame = self.frame.wrapping_add(1);
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, Vec2::splat(0.008))
    }

    fn lifecycle(&self) -> Lifecycle {
        self.state
    }

    fn frame(&self) -> u32 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx() -> WorldCtx {
        WorldCtx {
            ship_position: Vec2::new(1.0, 0.5),
            level_width: 4.0,
            gravity: 3.0,
            tracking_gain: 0.8,
            enemy_max_speed: 0.6,
        }
    }

    #[test]
    fn fresh_bomb_launches_at_45_degrees() {
        let bomb = Bomb::default();
        assert!((bomb.velocity.x - 1.414).abs() < 0.001);
        assert!((bomb.velocity.y - 1.414).abs() < 0.001);
    }

    #[test]
    fn bomb_reset_equals_fresh_construction() {
        let mut bomb = Bomb::default();
        bomb.launch(Vec2::new(1.0, 0.7), 30.0, 3.0);
        bomb.update(0.1, &ctx());
        bomb.reset();
        assert_eq!(bomb, Bomb::default());
    }

    #[test]
    fn bomb_arc_is_parabolic() {
        let mut bomb = Bomb::default();
        let vy0 = bomb.velocity.y;
        bomb.update(0.5, &ctx());
        assert!(bomb.velocity.y < vy0);
        assert!((bomb.velocity.x - 1.414).abs() < 0.001); // gravity is vertical only
    }

    #[test]
    fn bullet_reset_restores_pool_defaults() {
        let mut bullet = Bullet {
            position: Vec2::new(2.0, 0.3),
            velocity: Vec2::new(1.5, 0.0),
            ..Bullet::default()
        };
        bullet.reset();
        assert_eq!(bullet.position, Vec2::ZERO);
        assert_eq!(bullet.velocity, Vec2::ZERO);
        assert_eq!(bullet.lifecycle(), Lifecycle::Awake);
    }

    #[test]
    fn damage_inside_recovery_window_is_ignored() {
        let mut ship = Ship::new(Vec2::new(0.03, 0.015));
        ship.take_damage(30);
        assert_eq!(ship.health, 70);
        assert_eq!(ship.damage_state, DamageState::Recovering);

        // Second hit 0.1s later, still inside the 0.2s window
        ship.update(0.1, &ctx());
        ship.take_damage(30);
        assert_eq!(ship.health, 70);

        // Third hit after the window has elapsed
        ship.update(0.15, &ctx());
        assert_eq!(ship.damage_state, DamageState::Recovered);
        ship.take_damage(30);
        assert_eq!(ship.health, 40);
    }

    #[test]
    fn remove_life_restores_health() {
        let mut ship = Ship::new(Vec2::new(0.03, 0.015));
        ship.take_damage(100);
        assert_eq!(ship.health, 0);
        ship.remove_life();
        assert_eq!(ship.lives, 2);
        assert_eq!(ship.health, 100);
        ship.reset_lives();
        assert_eq!(ship.lives, 3);
    }

    #[test]
    fn ship_is_clamped_to_level_bounds() {
        let mut ship = Ship::new(Vec2::new(0.03, 0.015));
        ship.velocity = Vec2::new(-10.0, 20.0);
        ship.update(1.0, &ctx());
        assert_eq!(ship.position.x, 0.0);
        assert_eq!(ship.position.y, consts::WORLD_HEIGHT);
    }

    #[test]
    fn tracking_enemy_steers_toward_ship() {
        let mut enemy = Enemy::new(
            EnemyKind::Tracking,
            Vec2::new(2.0, 0.9),
            Vec2::splat(0.02),
            0.02,
        );
        enemy.wake();
        // Ship is to the left and below; velocity should pick up a leftward bias
        enemy.update(0.1, &ctx());
        assert!(enemy.velocity.x < 0.0);
        assert!(enemy.velocity.length() <= ctx().enemy_max_speed + 1e-6);
    }

    #[test]
    fn simple_enemy_keeps_drifting() {
        let mut enemy = Enemy::new(
            EnemyKind::Simple,
            Vec2::new(2.0, 0.9),
            Vec2::splat(0.02),
            0.02,
        );
        enemy.wake();
        enemy.update(0.1, &ctx());
        assert_eq!(enemy.velocity, Vec2::new(0.0, -0.1));
        assert!(enemy.position.y < 0.9);
    }

    #[test]
    fn asleep_enemy_does_not_move() {
        let mut enemy = Enemy::new(
            EnemyKind::Simple,
            Vec2::new(2.0, 0.9),
            Vec2::splat(0.02),
            0.02,
        );
        enemy.update(1.0, &ctx());
        assert_eq!(enemy.position, Vec2::new(2.0, 0.9));
        assert_eq!(enemy.lifecycle(), Lifecycle::Asleep);
    }

    proptest! {
        /// Health never escapes [0, 100] under any damage/update interleaving.
        #[test]
        fn health_stays_clamped(
            steps in proptest::collection::vec((0i32..250, 0.0f32..0.5), 0..64)
        ) {
            let mut ship = Ship::new(Vec2::new(0.03, 0.015));
            for (amount, dt) in steps {
                ship.take_damage(amount);
                prop_assert!((0..=100).contains(&ship.health));
                ship.update(dt, &ctx());
                prop_assert!((0..=100).contains(&ship.health));
            }
        }
    }
}
