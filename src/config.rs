//! Data-driven game balance
//!
//! Every gameplay knob the simulation consumes lives here so levels can be
//! rebalanced without touching code. Loadable from JSON; missing fields fall
//! back to the defaults below.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game balance knobs consumed by the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration applied to bombs (world units / s²)
    pub gravity: f32,

    /// Ship speed at full stick deflection (world units / s)
    pub ship_speed: f32,
    /// Ship hitbox half extents
    pub ship_half_extents: Vec2,

    /// Damage dealt by one enemy bullet
    pub bullet_damage: i32,

    /// Ship bullet muzzle speed (fired straight ahead)
    pub ship_bullet_speed: f32,
    /// Enemy bullet speed (aimed at the ship)
    pub enemy_bullet_speed: f32,
    /// Minimum time between ship bullets (seconds)
    pub fire_cooldown: f32,
    /// Minimum time between bombs (seconds)
    pub bomb_cooldown: f32,
    /// Base interval between enemy volleys (seconds, jittered per volley)
    pub enemy_fire_interval: f32,

    /// Bomb launch angle in degrees (measured from +x)
    pub bomb_angle_deg: f32,
    /// Bomb launch speed
    pub bomb_initial_velocity: f32,

    /// Steering gain for tracking enemies (velocity bias per second
    /// proportional to the offset toward the ship)
    pub tracking_gain: f32,
    /// Speed cap for tracking enemies
    pub enemy_max_speed: f32,
    /// Enemy rectangular hitbox half extents
    pub enemy_half_extents: Vec2,
    /// Enemy circular hitbox radius
    pub enemy_radius: f32,

    /// Pool capacities (fixed at startup, never resized)
    pub ship_bullet_capacity: usize,
    pub enemy_bullet_capacity: usize,
    pub bomb_capacity: usize,

    /// Score per kill
    pub score_simple: u32,
    pub score_tracking: u32,

    /// Floor clearance under which low-flying bonus accrues
    pub low_fly_threshold: f32,
    /// Bonus points granted per accrued low-flying interval
    pub low_fly_bonus: u32,
    /// Accrual interval for the low-flying bonus (seconds)
    pub low_fly_interval: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 3.0,

            ship_speed: 0.4,
            ship_half_extents: Vec2::new(0.03, 0.015),

            bullet_damage: 30,

            ship_bullet_speed: 1.5,
            enemy_bullet_speed: 0.5,
            fire_cooldown: 0.15,
            bomb_cooldown: 0.5,
            enemy_fire_interval: 1.2,

            bomb_angle_deg: 45.0,
            bomb_initial_velocity: 2.0,

            tracking_gain: 0.8,
            enemy_max_speed: 0.6,
            enemy_half_extents: Vec2::new(0.02, 0.02),
            enemy_radius: 0.02,

            ship_bullet_capacity: 16,
            enemy_bullet_capacity: 32,
            bomb_capacity: 4,

            score_simple: 100,
            score_tracking: 150,

            low_fly_threshold: 0.05,
            low_fly_bonus: 10,
            low_fly_interval: 0.5,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_ballistics() {
        let t = Tuning::default();
        assert_eq!(t.bomb_angle_deg, 45.0);
        assert_eq!(t.bomb_initial_velocity, 2.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{"gravity": 5.5, "bomb_capacity": 8}"#).unwrap();
        assert_eq!(t.gravity, 5.5);
        assert_eq!(t.bomb_capacity, 8);
        assert_eq!(t.bullet_damage, Tuning::default().bullet_damage);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Tuning::from_json("{gravity}").is_err());
    }
}
