//! Game state: the explicit simulation context
//!
//! One value owns everything a frame mutates: the ship, the live enemies,
//! the three projectile pools, the active level, and the phase machine.
//! Everything the original kept in globals is threaded through here instead,
//! with init and teardown tied to phase transitions.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entities::{Bomb, Bullet, Enemy, EnemyKind, Ship, WorldCtx};
use super::level::{Level, LevelCatalog};
use super::pool::Pool;
use crate::config::Tuning;
use crate::consts;

/// Top-level phase, distinct from per-entity lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the player
    Intro,
    /// One-frame new-game reset
    Start,
    /// Installing level geometry for `current_level`
    LevelStart,
    /// The frame pipeline (input, update, collide, cull) runs here
    LevelPlay,
    /// Level complete; brief hold before the next one
    LevelOver,
    /// Run ended; only quit leaves this phase
    GameOver,
    /// Terminal; pools and level resources have been torn down
    Quit,
}

/// The defined edges of the phase machine. Quit is reachable from anywhere.
fn transition_allowed(from: GamePhase, to: GamePhase) -> bool {
    use GamePhase::*;
    if to == Quit {
        return from != Quit;
    }
    matches!(
        (from, to),
        (Intro, Start)
            | (Start, LevelStart)
            | (LevelStart, LevelPlay)
            | (LevelStart, GameOver) // empty catalog
            | (LevelPlay, LevelOver)
            | (LevelPlay, GameOver)
            | (LevelOver, LevelStart)
            | (LevelOver, GameOver)
    )
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    phase: GamePhase,
    pub tuning: Tuning,
    pub ship: Ship,
    /// Live enemies; dead ones are removed the frame they die
    pub enemies: Vec<Enemy>,
    pub ship_bullets: Pool<Bullet>,
    pub enemy_bullets: Pool<Bullet>,
    pub bombs: Pool<Bomb>,
    pub catalog: LevelCatalog,
    /// Index into the catalog
    pub current_level: usize,
    /// Installed geometry; `None` outside of play phases
    pub level: Option<Level>,
    pub score: u32,
    pub(crate) bullet_cooldown: f32,
    pub(crate) bomb_cooldown: f32,
    pub(crate) enemy_fire_timer: f32,
    pub(crate) level_over_timer: f32,
    pub(crate) low_fly_accum: f32,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Build a fresh state in `Intro`; pool storage is allocated here, once
    pub fn new(catalog: LevelCatalog, tuning: Tuning, seed: u64) -> Self {
        let ship = Ship::new(tuning.ship_half_extents);
        Self {
            phase: GamePhase::Intro,
            ship,
            enemies: Vec::with_capacity(consts::MAX_ENEMIES),
            ship_bullets: Pool::new(tuning.ship_bullet_capacity),
            enemy_bullets: Pool::new(tuning.enemy_bullet_capacity),
            bombs: Pool::new(tuning.bomb_capacity),
            catalog,
            current_level: 0,
            level: None,
            score: 0,
            bullet_cooldown: 0.0,
            bomb_cooldown: 0.0,
            enemy_fire_timer: tuning.enemy_fire_interval,
            level_over_timer: 0.0,
            low_fly_accum: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Move to `next` along a defined edge
    ///
    /// An undefined transition is a programming error: it trips a
    /// `debug_assert!` in development builds and is a no-op in release.
    pub(crate) fn set_phase(&mut self, next: GamePhase) {
        debug_assert!(
            transition_allowed(self.phase, next),
            "invalid phase transition {:?} -> {next:?}",
            self.phase
        );
        if !transition_allowed(self.phase, next) {
            return;
        }
        log::info!("phase {:?} -> {next:?}", self.phase);
        self.phase = next;
    }

    /// New-game reset performed in `Start`
    pub(crate) fn begin_run(&mut self) {
        self.ship.reset_lives();
        self.score = 0;
        self.current_level = 0;
    }

    /// Install geometry for `current_level`; false if the catalog is exhausted
    pub(crate) fn load_current_level(&mut self) -> bool {
        let Some(data) = self.catalog.get(self.current_level) else {
            return false;
        };
        let level = Level::new(data.clone());
        log::info!(
            "level {} '{}' loaded: width={:.2}, {} samples",
            self.current_level,
            level.name(),
            level.width(),
            level.samples().len()
        );
        self.level = Some(level);
        self.ship.respawn();
        self.enemies.clear();
        self.ship_bullets.clear();
        self.enemy_bullets.clear();
        self.bombs.clear();
        self.bullet_cooldown = 0.0;
        self.bomb_cooldown = 0.0;
        self.enemy_fire_timer = self.tuning.enemy_fire_interval;
        self.low_fly_accum = 0.0;
        true
    }

    /// Left edge of the viewport, following the ship across the level
    pub fn camera_x(&self) -> f32 {
        let width = self.level.as_ref().map(|l| l.width()).unwrap_or(0.0);
        let max_cam = (width - consts::ASPECT).max(0.0);
        (self.ship.position.x - consts::SHIP_START_X).clamp(0.0, max_cam)
    }

    /// Per-tick world view handed to entity updates
    pub(crate) fn world_ctx(&self) -> WorldCtx {
        WorldCtx {
            ship_position: self.ship.position,
            level_width: self.level.as_ref().map(|l| l.width()).unwrap_or(0.0),
            gravity: self.tuning.gravity,
            tracking_gain: self.tuning.tracking_gain,
            enemy_max_speed: self.tuning.enemy_max_speed,
        }
    }

    pub(crate) fn score_for(&self, kind: EnemyKind) -> u32 {
        match kind {
            EnemyKind::Simple => self.tuning.score_simple,
            EnemyKind::Tracking => self.tuning.score_tracking,
        }
    }

    /// Release pooled resources and level geometry; runs on entering `Quit`
    pub(crate) fn teardown(&mut self) {
        self.ship_bullets.clear();
        self.enemy_bullets.clear();
        self.bombs.clear();
        self.enemies.clear();
        self.level = None;
        log::info!("simulation torn down");
    }
}
