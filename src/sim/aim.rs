//! Aim resolution relative to the player's turret
//!
//! Screen y grows downward, so the vertical offset is flipped before any
//! angle math: "up" on screen is positive `dy`.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::{normalize_degrees, screen_to_math};

/// Screen region around the origin, numbered counterclockwise from upper-right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    /// dx >= 0, dy >= 0
    UpperRight,
    /// dx < 0, dy >= 0
    UpperLeft,
    /// dx < 0, dy < 0
    LowerLeft,
    /// dx >= 0, dy < 0
    LowerRight,
}

impl Quadrant {
    /// Classify a math-space offset (y up). Zero components fall on the
    /// non-negative side.
    pub fn from_offset(dx: f32, dy: f32) -> Self {
        match (dx >= 0.0, dy >= 0.0) {
            (true, true) => Quadrant::UpperRight,
            (false, true) => Quadrant::UpperLeft,
            (false, false) => Quadrant::LowerLeft,
            (true, false) => Quadrant::LowerRight,
        }
    }

    /// Conventional quadrant number, 1-4
    pub fn number(&self) -> u8 {
        match self {
            Quadrant::UpperRight => 1,
            Quadrant::UpperLeft => 2,
            Quadrant::LowerLeft => 3,
            Quadrant::LowerRight => 4,
        }
    }

    /// Screen-space direction signs for motion away from the origin
    pub fn screen_signs(&self) -> IVec2 {
        match self {
            Quadrant::UpperRight => IVec2::new(1, -1),
            Quadrant::UpperLeft => IVec2::new(-1, -1),
            Quadrant::LowerLeft => IVec2::new(-1, 1),
            Quadrant::LowerRight => IVec2::new(1, 1),
        }
    }
}

/// Direction from the turret to the aim point, recomputed every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimVector {
    /// Counterclockwise from +x, in [0, 360)
    pub angle_deg: f32,
    pub quadrant: Quadrant,
    /// (|dx|, |dy|) normalized; the quadrant carries the signs
    pub unit_velocity: Vec2,
}

impl Default for AimVector {
    /// Used when the aim point sits exactly on the origin
    fn default() -> Self {
        Self {
            angle_deg: 0.0,
            quadrant: Quadrant::UpperRight,
            unit_velocity: Vec2::X,
        }
    }
}

impl AimVector {
    /// Resolve `aim_point` against `origin`, both in screen space.
    ///
    /// Never fails: an aim point on the origin yields `AimVector::default()`.
    pub fn resolve(aim_point: Vec2, origin: Vec2) -> Self {
        let offset = screen_to_math(aim_point - origin);
        let (dx, dy) = (offset.x, offset.y);

        let distance = offset.length();
        if distance == 0.0 || !distance.is_finite() {
            return Self::default();
        }

        Self {
            angle_deg: normalize_degrees(dy.atan2(dx).to_degrees()),
            quadrant: Quadrant::from_offset(dx, dy),
            unit_velocity: offset.abs() / distance,
        }
    }

    /// Per-axis integer velocity for a projectile of speed `base_speed`.
    ///
    /// Each component is truncated toward zero before the quadrant signs are
    /// applied, so shallow angles can zero out one axis.
    pub fn integer_velocity(&self, base_speed: i32) -> IVec2 {
        let magnitude = (self.unit_velocity * base_speed as f32).as_ivec2();
        magnitude * self.quadrant.screen_signs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ORIGIN: Vec2 = Vec2::new(400.0, 300.0);

    fn aim(dx: f32, dy_up: f32) -> AimVector {
        AimVector::resolve(ORIGIN + Vec2::new(dx, -dy_up), ORIGIN)
    }

    #[test]
    fn test_cardinal_angles() {
        assert!((aim(10.0, 0.0).angle_deg - 0.0).abs() < 1e-4);
        assert!((aim(0.0, 10.0).angle_deg - 90.0).abs() < 1e-4);
        assert!((aim(-10.0, 0.0).angle_deg - 180.0).abs() < 1e-4);
        assert!((aim(0.0, -10.0).angle_deg - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_quadrants_by_screen_position() {
        // Up and right on screen means a smaller y coordinate
        let up_right = AimVector::resolve(Vec2::new(500.0, 200.0), ORIGIN);
        assert_eq!(up_right.quadrant.number(), 1);
        let up_left = AimVector::resolve(Vec2::new(300.0, 200.0), ORIGIN);
        assert_eq!(up_left.quadrant.number(), 2);
        let down_left = AimVector::resolve(Vec2::new(300.0, 400.0), ORIGIN);
        assert_eq!(down_left.quadrant.number(), 3);
        let down_right = AimVector::resolve(Vec2::new(500.0, 400.0), ORIGIN);
        assert_eq!(down_right.quadrant.number(), 4);
    }

    #[test]
    fn test_axis_boundaries() {
        // dx = 0 belongs to the right half, dy = 0 to the upper half
        assert_eq!(aim(0.0, 5.0).quadrant, Quadrant::UpperRight);
        assert_eq!(aim(0.0, -5.0).quadrant, Quadrant::LowerRight);
        assert_eq!(aim(5.0, 0.0).quadrant, Quadrant::UpperRight);
        assert_eq!(aim(-5.0, 0.0).quadrant, Quadrant::UpperLeft);
    }

    #[test]
    fn test_degenerate_aim_uses_default() {
        let vector = AimVector::resolve(ORIGIN, ORIGIN);
        assert_eq!(vector, AimVector::default());
        assert_eq!(vector.quadrant.number(), 1);
        assert_eq!(vector.angle_deg, 0.0);
    }

    #[test]
    fn test_unit_velocity_is_magnitude_free() {
        let near = aim(3.0, 4.0);
        let far = aim(300.0, 400.0);
        assert!((near.unit_velocity - Vec2::new(0.6, 0.8)).length() < 1e-6);
        assert!((near.unit_velocity - far.unit_velocity).length() < 1e-6);
    }

    #[test]
    fn test_integer_velocity_truncates() {
        // 10 * 0.6 = 6, 10 * 0.8 = 8
        assert_eq!(aim(3.0, 4.0).integer_velocity(10), IVec2::new(6, -8));
        assert_eq!(aim(-3.0, -4.0).integer_velocity(10), IVec2::new(-6, 8));
        // 10 * sin(5.7 deg) < 1 truncates to zero
        assert_eq!(aim(10.0, 1.0).integer_velocity(10).y, 0);
    }

    proptest! {
        #[test]
        fn prop_quadrant_matches_offset_signs(
            dx in prop_oneof![-500.0f32..-0.01, 0.01f32..500.0],
            dy in prop_oneof![-500.0f32..-0.01, 0.01f32..500.0],
        ) {
            let vector = aim(dx, dy);
            let expected = match (dx > 0.0, dy > 0.0) {
                (true, true) => 1,
                (false, true) => 2,
                (false, false) => 3,
                (true, false) => 4,
            };
            prop_assert_eq!(vector.quadrant.number(), expected);
            prop_assert!(vector.angle_deg >= 0.0 && vector.angle_deg < 360.0);
            prop_assert!(vector.unit_velocity.x >= 0.0 && vector.unit_velocity.x <= 1.0);
            prop_assert!(vector.unit_velocity.y >= 0.0 && vector.unit_velocity.y <= 1.0);
        }

        #[test]
        fn prop_minimum_speed_always_moves(
            dx in -500.0f32..500.0,
            dy in -500.0f32..500.0,
        ) {
            prop_assert_ne!(aim(dx, dy).integer_velocity(2), IVec2::ZERO);
        }
    }
}
