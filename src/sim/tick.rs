//! Frame pipeline and phase sequencing
//!
//! [`tick`] advances the state by one timestep. In `LevelPlay` it runs the
//! pipeline input -> update -> collide -> cull; in the other phases it walks
//! the coarse transitions. All mutation for a frame completes inside `tick`,
//! so the render pass afterwards only ever reads settled state.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::entities::{DamageState, Enemy, Entity, Lifecycle};
use super::level::Surface;
use super::state::{GamePhase, GameState};
use crate::consts;

/// Input intents for a single tick, read once at the start of the pipeline
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Ship movement intent, each axis in [-1, 1]
    pub movement: Vec2,
    /// Fire the forward gun
    pub fire: bool,
    /// Drop a bomb
    pub fire_bomb: bool,
    /// Menu action (leaves the intro / starts a run)
    pub start: bool,
    /// Quit signal, honored from any phase
    pub quit: bool,
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) {
    if input.quit {
        if state.phase() != GamePhase::Quit {
            state.set_phase(GamePhase::Quit);
            state.teardown();
        }
        return;
    }

    match state.phase() {
        GamePhase::Intro => {
            if input.start {
                state.set_phase(GamePhase::Start);
            }
        }
        GamePhase::Start => {
            state.begin_run();
            state.set_phase(GamePhase::LevelStart);
        }
        GamePhase::LevelStart => {
            if state.load_current_level() {
                state.set_phase(GamePhase::LevelPlay);
            } else {
                log::warn!("catalog has no level {}", state.current_level);
                state.set_phase(GamePhase::GameOver);
            }
        }
        GamePhase::LevelPlay => level_play(state, input, dt),
        GamePhase::LevelOver => {
            state.level_over_timer -= dt;
            if state.level_over_timer <= 0.0 {
                if state.current_level + 1 < state.catalog.len() {
                    state.current_level += 1;
                    state.set_phase(GamePhase::LevelStart);
                } else {
                    state.set_phase(GamePhase::GameOver);
                }
            }
        }
        GamePhase::GameOver | GamePhase::Quit => {}
    }
}

fn level_play(state: &mut GameState, input: &FrameInput, dt: f32) {
    apply_input(state, input, dt);
    wake_due_enemies(state);
    update_entities(state, dt);
    enemy_fire(state, dt);
    collide(state, dt);
    cull(state);

    // A drained ship spends a life; zero lives ends the run this same frame
    // regardless of any other condition.
    if state.ship.health == 0 {
        state.ship.remove_life();
        recenter_ship(state);
    }
    if state.ship.lives == 0 {
        state.set_phase(GamePhase::GameOver);
        return;
    }

    // Completion: the ship has flown the level's full width
    let width = state.level.as_ref().map(|l| l.width()).unwrap_or(0.0);
    if state.ship.position.x >= width {
        state.level_over_timer = consts::LEVEL_OVER_DELAY;
        state.set_phase(GamePhase::LevelOver);
    }
}

/// Read intents once: steer the ship, run fire control
fn apply_input(state: &mut GameState, input: &FrameInput, dt: f32) {
    state.ship.velocity = input.movement.clamp_length_max(1.0) * state.tuning.ship_speed;

    state.bullet_cooldown = (state.bullet_cooldown - dt).max(0.0);
    state.bomb_cooldown = (state.bomb_cooldown - dt).max(0.0);

    if input.fire && state.bullet_cooldown == 0.0 {
        let muzzle = Vec2::new(state.ship.bounds().max.x, state.ship.position.y);
        let speed = state.tuning.ship_bullet_speed;
        // A full pool means "cannot fire now", never an error
        if let Some(bullet) = state.ship_bullets.acquire() {
            bullet.position = muzzle;
            bullet.velocity = Vec2::new(speed, 0.0);
            state.bullet_cooldown = state.tuning.fire_cooldown;
        }
    }

    if input.fire_bomb && state.bomb_cooldown == 0.0 {
        let position = state.ship.position;
        let angle = state.tuning.bomb_angle_deg;
        let speed = state.tuning.bomb_initial_velocity;
        if let Some(bomb) = state.bombs.acquire() {
            bomb.launch(position, angle, speed);
            state.bomb_cooldown = state.tuning.bomb_cooldown;
        }
    }
}

/// Wake scheduled enemies as the viewport reaches their trigger x
fn wake_due_enemies(state: &mut GameState) {
    let view_right = state.camera_x() + consts::ASPECT + consts::CULL_MARGIN;
    let half = state.tuning.enemy_half_extents;
    let radius = state.tuning.enemy_radius;
    let Some(level) = state.level.as_mut() else {
        return;
    };
    for spawn in level.drain_due_spawns(view_right) {
        if state.enemies.len() >= consts::MAX_ENEMIES {
            log::debug!("enemy cap reached, dropping spawn at x={:.2}", spawn.x);
            continue;
        }
        let mut enemy = Enemy::new(spawn.kind, Vec2::new(spawn.x, spawn.y), half, radius);
        enemy.wake();
        state.enemies.push(enemy);
    }
}

fn update_entities(state: &mut GameState, dt: f32) {
    let ctx = state.world_ctx();
    state.ship.update(dt, &ctx);
    for enemy in &mut state.enemies {
        enemy.update(dt, &ctx);
    }
    for (_, bullet) in state.ship_bullets.iter_active_mut() {
        bullet.update(dt, &ctx);
    }
    for (_, bullet) in state.enemy_bullets.iter_active_mut() {
        bullet.update(dt, &ctx);
    }
    for (_, bomb) in state.bombs.iter_active_mut() {
        bomb.update(dt, &ctx);
    }
}

/// Every interval (jittered), each awake on-screen enemy aims one bullet
/// at the ship
fn enemy_fire(state: &mut GameState, dt: f32) {
    state.enemy_fire_timer -= dt;
    if state.enemy_fire_timer > 0.0 {
        return;
    }
    let jitter: f32 = state.rng.random_range(0.75..1.25);
    state.enemy_fire_timer = state.tuning.enemy_fire_interval * jitter;

    let ship_position = state.ship.position;
    let speed = state.tuning.enemy_bullet_speed;
    let cam = state.camera_x();
    for i in 0..state.enemies.len() {
        let enemy = &state.enemies[i];
        if enemy.lifecycle() != Lifecycle::Awake {
            continue;
        }
        if enemy.position.x < cam || enemy.position.x > cam + consts::ASPECT {
            continue;
        }
        let position = enemy.position;
        let dir = (ship_position - position).normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }
        let Some(bullet) = state.enemy_bullets.acquire() else {
            break;
        };
        bullet.position = position;
        bullet.velocity = dir * speed;
    }
}

/// Kill the first awake enemy containing `point`; returns true on a hit
fn kill_enemy_at(state: &mut GameState, point: Vec2) -> bool {
    let Some(idx) = state
        .enemies
        .iter()
        .position(|e| e.lifecycle() == Lifecycle::Awake && collision::point_hits_enemy(point, e))
    else {
        return false;
    };
    let kind = state.enemies[idx].kind;
    state.enemies[idx].kill();
    let points = state.score_for(kind);
    state.score += points;
    log::debug!("{kind:?} enemy destroyed (+{points})");
    true
}

/// Resolve the frame's contacts, in a fixed order
///
/// Ship-vs-enemy-fire runs first so the recovery window set by the first hit
/// is already in effect when a second same-frame hit is tested.
fn collide(state: &mut GameState, dt: f32) {
    // 1. Ship vs enemy bullets
    let ship_box = state.ship.bounds();
    for i in 0..state.enemy_bullets.capacity() {
        let Some(bullet) = state.enemy_bullets.get(i) else {
            continue;
        };
        if collision::point_in_aabb(bullet.position, &ship_box) {
            state.ship.take_damage(state.tuning.bullet_damage);
            state.enemy_bullets.release(i);
        }
    }

    // 2. Ship ordnance vs awake enemies
    for i in 0..state.ship_bullets.capacity() {
        let Some(bullet) = state.ship_bullets.get(i) else {
            continue;
        };
        let position = bullet.position;
        if kill_enemy_at(state, position) {
            state.ship_bullets.release(i);
        }
    }
    for i in 0..state.bombs.capacity() {
        let Some(bomb) = state.bombs.get(i) else {
            continue;
        };
        let position = bomb.position;
        if kill_enemy_at(state, position) {
            state.bombs.release(i);
        }
    }

    // 3. Ship vs terrain, probed at the hitbox corners
    let (floor_hit, ceiling_hit, floor_clearance) = {
        let Some(level) = state.level.as_ref() else {
            return;
        };
        let b = state.ship.bounds();
        let floor_hit = level.collides(Vec2::new(b.min.x, b.min.y), Surface::Floor)
            || level.collides(Vec2::new(b.max.x, b.min.y), Surface::Floor);
        let ceiling_hit = level.collides(Vec2::new(b.min.x, b.max.y), Surface::Ceiling)
            || level.collides(Vec2::new(b.max.x, b.max.y), Surface::Ceiling);
        let clearance =
            level.distance_from(Vec2::new(state.ship.position.x, b.min.y), Surface::Floor);
        (floor_hit, ceiling_hit, clearance)
    };

    if floor_hit || ceiling_hit {
        log::debug!(
            "ship hit the {}",
            if floor_hit { "floor" } else { "ceiling" }
        );
        state.ship.remove_life();
        recenter_ship(state);
    } else if floor_clearance > 0.0 && floor_clearance < state.tuning.low_fly_threshold {
        // Skimming the floor pays out per accrued interval
        state.low_fly_accum += dt;
        while state.low_fly_accum >= state.tuning.low_fly_interval {
            state.low_fly_accum -= state.tuning.low_fly_interval;
            state.score += state.tuning.low_fly_bonus;
        }
    } else {
        state.low_fly_accum = 0.0;
    }
}

/// Losing a life puts the ship back mid-channel at its current x, inside a
/// recovery window so the next frame cannot take it straight back out
fn recenter_ship(state: &mut GameState) {
    let x = state.ship.position.x;
    if let Some(level) = state.level.as_ref() {
        let mid =
            (level.surface_y(x, Surface::Ceiling) + level.surface_y(x, Surface::Floor)) / 2.0;
        state.ship.position.y = mid;
    }
    state.ship.velocity = Vec2::ZERO;
    state.ship.damage_recovery = consts::DAMAGE_RECOVERY_WINDOW;
    state.ship.damage_state = DamageState::Recovering;
}

/// Drop what the frame no longer needs: dead enemies, terrain impacts,
/// entities that left the view
fn cull(state: &mut GameState) {
    let cam = state.camera_x();
    let left = cam - consts::CULL_MARGIN;
    let right = cam + consts::ASPECT + consts::CULL_MARGIN;
    let below = -consts::CULL_MARGIN;
    let above = consts::WORLD_HEIGHT + consts::CULL_MARGIN;
    let in_view =
        |p: Vec2| p.x >= left && p.x <= right && p.y >= below && p.y <= above;

    if let Some(level) = state.level.as_ref() {
        for enemy in &mut state.enemies {
            if enemy.lifecycle() == Lifecycle::Awake && level.collides_terrain(enemy.position) {
                enemy.kill();
            }
        }
    }
    state
        .enemies
        .retain(|e| e.lifecycle() != Lifecycle::Dead && e.position.x >= left && e.position.y >= below);

    for i in 0..state.ship_bullets.capacity() {
        let Some(bullet) = state.ship_bullets.get(i) else {
            continue;
        };
        let hit_terrain = state
            .level
            .as_ref()
            .is_some_and(|l| l.collides_terrain(bullet.position));
        if hit_terrain || !in_view(bullet.position) {
            state.ship_bullets.release(i);
        }
    }
    for i in 0..state.enemy_bullets.capacity() {
        let Some(bullet) = state.enemy_bullets.get(i) else {
            continue;
        };
        let hit_terrain = state
            .level
            .as_ref()
            .is_some_and(|l| l.collides_terrain(bullet.position));
        if hit_terrain || !in_view(bullet.position) {
            state.enemy_bullets.release(i);
        }
    }
    for i in 0..state.bombs.capacity() {
        let Some(bomb) = state.bombs.get(i) else {
            continue;
        };
        let hit_terrain = state
            .level
            .as_ref()
            .is_some_and(|l| l.collides_terrain(bomb.position));
        if hit_terrain || !in_view(bomb.position) {
            state.bombs.release(i);
        }
    }
}
