//! Static level geometry and the level catalog
//!
//! A level is an ordered run of terrain samples (ceiling and floor heights
//! across the scrollable width) plus an enemy spawn schedule. The loader that
//! produces `LevelData` is a collaborator; the core treats it as opaque input.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::EnemyKind;
use crate::consts;

/// One terrain sample: ceiling and floor heights at an x position
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TerrainSample {
    pub x: f32,
    pub ceiling: f32,
    pub floor: f32,
}

/// Which terrain curve a query is against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Ceiling,
    Floor,
}

/// Scheduled enemy, woken once the viewport reaches `x`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    pub kind: EnemyKind,
}

/// Opaque level description as produced by the loader collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    pub samples: Vec<TerrainSample>,
    #[serde(default)]
    pub spawns: Vec<EnemySpawn>,
}

/// The fixed list of levels for a run; length never changes after load
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelCatalog {
    pub levels: Vec<LevelData>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<LevelData>) -> Self {
        Self { levels }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelData> {
        self.levels.get(index)
    }
}

/// Active level: installed geometry plus spawn-schedule progress
#[derive(Debug, Clone)]
pub struct Level {
    name: String,
    samples: Vec<TerrainSample>,
    spawns: Vec<EnemySpawn>,
    next_spawn: usize,
}

impl Level {
    /// Install level data, normalizing sample and spawn order by x
    pub fn new(data: LevelData) -> Self {
        let mut samples = data.samples;
        samples.sort_by(|a, b| a.x.total_cmp(&b.x));
        let mut spawns = data.spawns;
        spawns.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self {
            name: data.name,
            samples,
            spawns,
            next_spawn: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[TerrainSample] {
        &self.samples
    }

    /// Horizontal extent of the level
    pub fn width(&self) -> f32 {
        self.samples.last().map(|s| s.x).unwrap_or(0.0)
    }

    /// Curve height at `x`, interpolated between neighboring samples
    ///
    /// Lookups outside the defined x-range clamp to the nearest sample; a
    /// level with no samples degenerates to an open channel.
    pub fn surface_y(&self, x: f32, surface: Surface) -> f32 {
        let pick = |s: &TerrainSample| match surface {
            Surface::Ceiling => s.ceiling,
            Surface::Floor => s.floor,
        };

        let (first, last) = match (self.samples.first(), self.samples.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => {
                return match surface {
                    Surface::Ceiling => consts::WORLD_HEIGHT,
                    Surface::Floor => 0.0,
                };
            }
        };
        if x <= first.x {
            return pick(first);
        }
        if x >= last.x {
            return pick(last);
        }

        // partition_point: first sample with sample.x > x; the window above
        // guarantees both neighbors exist
        let idx = self.samples.partition_point(|s| s.x <= x);
        let right = self.samples[idx];
        let left = self.samples[idx - 1];
        let span = right.x - left.x;
        if span <= f32::EPSILON {
            return pick(&left);
        }
        let t = (x - left.x) / span;
        pick(&left) + (pick(&right) - pick(&left)) * t
    }

    /// Signed clearance from the given curve at the point's x
    ///
    /// Positive means the point is on the open side of the curve; zero or
    /// negative means it has crossed it.
    pub fn distance_from(&self, point: Vec2, surface: Surface) -> f32 {
        let y = self.surface_y(point.x, surface);
        match surface {
            Surface::Ceiling => y - point.y,
            Surface::Floor => point.y - y,
        }
    }

    /// True iff the point has crossed the curve (signed distance ≤ 0)
    pub fn collides(&self, point: Vec2, surface: Surface) -> bool {
        self.distance_from(point, surface) <= 0.0
    }

    /// Point crossed either curve
    pub fn collides_terrain(&self, point: Vec2) -> bool {
        self.collides(point, Surface::Ceiling) || self.collides(point, Surface::Floor)
    }

    /// Spawns whose trigger x the viewport has reached, consumed in order
    pub fn drain_due_spawns(&mut self, view_right: f32) -> &[EnemySpawn] {
        let start = self.next_spawn;
        while self.next_spawn < self.spawns.len() && self.spawns[self.next_spawn].x <= view_right {
            self.next_spawn += 1;
        }
        &self.spawns[start..self.next_spawn]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canyon() -> Level {
        Level::new(LevelData {
            name: "canyon".into(),
            samples: vec![
                TerrainSample { x: 0.0, ceiling: 0.9, floor: 0.1 },
                TerrainSample { x: 1.0, ceiling: 0.8, floor: 0.2 },
                TerrainSample { x: 2.0, ceiling: 0.9, floor: 0.1 },
            ],
            spawns: vec![
                EnemySpawn { x: 1.5, y: 0.5, kind: EnemyKind::Simple },
                EnemySpawn { x: 0.5, y: 0.6, kind: EnemyKind::Tracking },
            ],
        })
    }

    #[test]
    fn surface_lookup_interpolates() {
        let level = canyon();
        assert!((level.surface_y(0.5, Surface::Ceiling) - 0.85).abs() < 1e-6);
        assert!((level.surface_y(0.5, Surface::Floor) - 0.15).abs() < 1e-6);
    }

    #[test]
    fn surface_lookup_clamps_out_of_range() {
        let level = canyon();
        assert_eq!(level.surface_y(-5.0, Surface::Floor), 0.1);
        assert_eq!(level.surface_y(99.0, Surface::Ceiling), 0.9);
    }

    #[test]
    fn collision_matches_signed_distance() {
        let level = canyon();
        for &x in &[-0.5, 0.0, 0.3, 1.0, 1.7, 2.0, 3.0] {
            for i in 0..=20 {
                let point = Vec2::new(x, i as f32 * 0.05);
                for surface in [Surface::Ceiling, Surface::Floor] {
                    assert_eq!(
                        level.collides(point, surface),
                        level.distance_from(point, surface) <= 0.0,
                        "mismatch at {point:?} vs {surface:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn floor_crossing_is_detected() {
        let level = canyon();
        assert!(level.collides(Vec2::new(0.0, 0.05), Surface::Floor));
        assert!(!level.collides(Vec2::new(0.0, 0.5), Surface::Floor));
        assert!(level.collides(Vec2::new(0.0, 0.95), Surface::Ceiling));
    }

    #[test]
    fn empty_level_is_an_open_channel() {
        let level = Level::new(LevelData {
            name: "void".into(),
            samples: Vec::new(),
            spawns: Vec::new(),
        });
        assert_eq!(level.width(), 0.0);
        assert!(!level.collides_terrain(Vec2::new(0.0, 0.5)));
    }

    #[test]
    fn spawns_drain_in_x_order() {
        let mut level = canyon();
        // Constructor sorted them; the tracking spawn at 0.5 comes first
        let due = level.drain_due_spawns(1.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].kind, EnemyKind::Tracking);

        let due = level.drain_due_spawns(2.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].kind, EnemyKind::Simple);

        assert!(level.drain_due_spawns(10.0).is_empty());
    }

    #[test]
    fn catalog_round_trips_through_json() {
        let catalog = LevelCatalog::new(vec![LevelData {
            name: "one".into(),
            samples: vec![TerrainSample { x: 0.0, ceiling: 1.0, floor: 0.0 }],
            spawns: Vec::new(),
        }]);
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed = LevelCatalog::from_json(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get(0).unwrap().name, "one");
    }
}
