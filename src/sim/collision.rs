//! Geometric collision predicates
//!
//! Two bounding-shape tests, applied by context: rectangle tests for the
//! ship and for `Simple` enemies, the circle test for `Tracking` enemies
//! (a better fit for their round sprite). Terrain tests live on
//! [`super::level::Level`].

use glam::Vec2;

use super::entities::{Aabb, Enemy, EnemyKind};

/// Point inside an axis-aligned rectangle given explicit corners
#[inline]
pub fn point_in_rect(point: Vec2, min: Vec2, max: Vec2) -> bool {
    point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
}

/// Convenience form against a stored bounding box
#[inline]
pub fn point_in_aabb(point: Vec2, aabb: &Aabb) -> bool {
    point_in_rect(point, aabb.min, aabb.max)
}

/// Point inside a circle
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    (point - center).length_squared() <= radius * radius
}

/// Canonical hit test for an enemy, picking the shape its kind is gated by
pub fn point_hits_enemy(point: Vec2, enemy: &Enemy) -> bool {
    use super::entities::Entity;
    match enemy.kind {
        EnemyKind::Simple => point_in_aabb(point, &enemy.bounds()),
        EnemyKind::Tracking => point_in_circle(point, enemy.center(), enemy.radius),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_interior_and_edges() {
        let min = Vec2::new(0.0, 0.0);
        let max = Vec2::new(1.0, 0.5);
        assert!(point_in_rect(Vec2::new(0.5, 0.25), min, max));
        assert!(point_in_rect(min, min, max));
        assert!(point_in_rect(max, min, max));
        assert!(!point_in_rect(Vec2::new(1.01, 0.25), min, max));
        assert!(!point_in_rect(Vec2::new(0.5, -0.01), min, max));
    }

    #[test]
    fn circle_test_uses_radius() {
        let center = Vec2::new(1.0, 1.0);
        assert!(point_in_circle(Vec2::new(1.0, 1.04), center, 0.05));
        assert!(point_in_circle(Vec2::new(1.05, 1.0), center, 0.05));
        assert!(!point_in_circle(Vec2::new(1.05, 1.05), center, 0.05));
    }

    #[test]
    fn enemy_hit_shape_follows_kind() {
        let half = Vec2::splat(0.05);
        let radius = 0.05;
        let pos = Vec2::new(1.0, 0.5);
        // A box corner lies outside the inscribed circle
        let corner = pos + Vec2::splat(0.045);

        let simple = Enemy::new(EnemyKind::Simple, pos, half, radius);
        let tracking = Enemy::new(EnemyKind::Tracking, pos, half, radius);

        assert!(point_hits_enemy(corner, &simple));
        assert!(!point_hits_enemy(corner, &tracking));
        assert!(point_hits_enemy(pos, &simple));
        assert!(point_hits_enemy(pos, &tracking));
    }
}
