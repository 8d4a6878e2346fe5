//! Cavern Strike entry point
//!
//! Runs the simulation headless: a scripted pilot flies the built-in demo
//! catalog while a counting backend stands in for a real renderer. Real
//! frontends supply their own input polling and `RenderBackend`; this binary
//! exists to exercise the core end to end and to smoke-test tuning files
//! (pass a JSON path as the first argument).

use std::time::{Duration, Instant};

use glam::Vec2;

use cavern_strike::config::Tuning;
use cavern_strike::consts::{MAX_SUBSTEPS, SIM_DT};
use cavern_strike::render::{RenderBackend, draw_frame};
use cavern_strike::sim::{
    EnemyKind, EnemySpawn, FrameInput, GamePhase, GameState, LevelCatalog, LevelData,
    TerrainSample, tick,
};

/// Stand-in backend: counts draw calls instead of issuing them
#[derive(Default)]
struct HeadlessBackend {
    draw_calls: u64,
}

impl RenderBackend for HeadlessBackend {
    fn draw_rect(&mut self, _: Vec2, _: Vec2, _: u32) {
        self.draw_calls += 1;
    }
    fn draw_ellipse(&mut self, _: Vec2, _: Vec2, _: u32) {
        self.draw_calls += 1;
    }
    fn draw_terrain(&mut self, _: &[TerrainSample], _: f32) {
        self.draw_calls += 1;
    }
    fn draw_hud(&mut self, _: i32, _: u32, _: u32, _: GamePhase) {
        self.draw_calls += 1;
    }
}

/// A gently undulating canyon, sampled every eighth of a world unit
fn canyon(name: &str, width: f32, spawns: Vec<EnemySpawn>) -> LevelData {
    let steps = (width * 8.0) as usize;
    let samples = (0..=steps)
        .map(|i| {
            let x = i as f32 / 8.0;
            let wave = (x * 1.7).sin() * 0.08;
            TerrainSample {
                x,
                ceiling: 0.88 + wave,
                floor: 0.12 + wave,
            }
        })
        .collect();
    LevelData {
        name: name.into(),
        samples,
        spawns,
    }
}

fn demo_catalog() -> LevelCatalog {
    LevelCatalog::new(vec![
        canyon(
            "outer canyon",
            6.0,
            vec![
                EnemySpawn { x: 1.5, y: 0.6, kind: EnemyKind::Simple },
                EnemySpawn { x: 3.0, y: 0.7, kind: EnemyKind::Simple },
                EnemySpawn { x: 4.5, y: 0.5, kind: EnemyKind::Tracking },
            ],
        ),
        canyon(
            "deep canyon",
            8.0,
            vec![
                EnemySpawn { x: 1.0, y: 0.6, kind: EnemyKind::Tracking },
                EnemySpawn { x: 2.5, y: 0.75, kind: EnemyKind::Simple },
                EnemySpawn { x: 4.0, y: 0.55, kind: EnemyKind::Tracking },
                EnemySpawn { x: 6.0, y: 0.65, kind: EnemyKind::Simple },
            ],
        ),
    ])
}

fn load_tuning() -> Tuning {
    let Some(path) = std::env::args().nth(1) else {
        return Tuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("tuning loaded from {path}");
                tuning
            }
            Err(err) => {
                log::warn!("bad tuning file {path}: {err}; using defaults");
                Tuning::default()
            }
        },
        Err(err) => {
            log::warn!("cannot read {path}: {err}; using defaults");
            Tuning::default()
        }
    }
}

fn main() {
    env_logger::init();

    let mut state = GameState::new(demo_catalog(), load_tuning(), 0xCA7E);
    let mut backend = HeadlessBackend::default();

    let mut input = FrameInput {
        start: true,
        movement: Vec2::new(1.0, 0.0),
        fire: true,
        ..FrameInput::default()
    };

    let started = Instant::now();
    let mut last = started;
    let mut accumulator = 0.0f32;
    let mut sim_time = 0.0f32;

    loop {
        let now = Instant::now();
        let frame_dt = (now - last).as_secs_f32().min(0.1);
        last = now;
        accumulator += frame_dt;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input, SIM_DT);
            input.start = false; // one-shot
            input.fire_bomb = (sim_time % 2.0) < SIM_DT; // a bomb every 2s
            accumulator -= SIM_DT;
            sim_time += SIM_DT;
            substeps += 1;
        }

        draw_frame(&state, &mut backend);

        if matches!(state.phase(), GamePhase::GameOver | GamePhase::Quit) {
            break;
        }
        if started.elapsed() > Duration::from_secs(120) {
            log::warn!("demo wall-clock budget exceeded, quitting");
            input.quit = true;
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    log::info!(
        "run over: score={} lives={} after {sim_time:.1}s simulated, {} draw calls",
        state.score,
        state.ship.lives,
        backend.draw_calls
    );
}
