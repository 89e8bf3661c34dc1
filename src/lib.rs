//! Boss Rush - a boss-rush arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `profile`: Persistent progression (cubes, upgrades, weapon unlocks)
//!
//! Rendering, input wiring and menu layout are external collaborators: they
//! read entity state between ticks and feed a [`sim::TickInput`] per frame.

pub mod profile;
pub mod sim;

pub use profile::{PlayerStats, Profile};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults (before permanent upgrades)
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_MAX_HEALTH_BASE: f32 = 100.0;
    pub const PLAYER_SPEED_BASE: f32 = 5.0;
    pub const PLAYER_FIRE_RATE_BASE: u32 = 15;
    pub const PLAYER_BULLET_SPEED_BASE: f32 = 8.0;
    /// Tick budget for player projectiles (4.5s at 60Hz)
    pub const PLAYER_BULLET_LIFETIME: u32 = 270;

    /// Auto-fire interval in ticks
    pub const AUTO_FIRE_DELAY: u32 = 10;

    /// Critical hits
    pub const CRITICAL_CHANCE: f32 = 0.15;
    pub const CRITICAL_MULTIPLIER: f32 = 2.0;

    /// Special ability
    pub const SPECIAL_DURATION: u32 = 90;
    pub const SPECIAL_SPEED: f32 = 3.0;
    pub const SPECIAL_DAMAGE: f32 = 15.0;
    pub const SPECIAL_RADIUS: f32 = 40.0;
    pub const SPECIAL_LIFETIME: u32 = 180;
    /// Radial burst when the special expires
    pub const SPECIAL_BURST_COUNT: u32 = 15;
    pub const SPECIAL_BURST_SPEED: f32 = 6.0;
    pub const SPECIAL_BURST_DAMAGE: f32 = 8.0;
    pub const SPECIAL_BURST_RADIUS: f32 = 4.0;
    pub const SPECIAL_BURST_LIFETIME: u32 = 90;

    /// Enemy fire
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;

    /// Homing turn rates (fraction of the angular error applied per tick)
    pub const PLAYER_HOMING_TURN_RATE: f32 = 0.1;
    pub const ENEMY_HOMING_TURN_RATE: f32 = 0.05;

    /// Continuous-damage divisors (per-tick fraction of full damage)
    pub const CONTACT_DAMAGE_DIVISOR: f32 = 20.0;
    pub const BEAM_DAMAGE_DIVISOR: f32 = 30.0;

    /// Currency reward for sustained damage on a boss
    pub const DAMAGE_THRESHOLD_CUBES: f32 = 1000.0;
    pub const CUBES_PER_THRESHOLD: u64 = 25;

    /// Delay between a boss dying and the next one spawning
    pub const RESPAWN_DELAY_TICKS: u64 = 90;

    /// Floating combat text lifetime
    pub const FLOAT_TEXT_LIFE: u32 = 60;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector for an angle (radians)
#[inline]
pub fn vec_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of the vector from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// True while a circle at `pos` still overlaps the (generously bounded) field
#[inline]
pub fn in_field_bounds(pos: Vec2, radius: f32) -> bool {
    pos.x + radius > 0.0
        && pos.x - radius < consts::FIELD_WIDTH
        && pos.y + radius > 0.0
        && pos.y - radius < consts::FIELD_HEIGHT
}

/// Distance from point `p` to the segment `a`-`b`
pub fn dist_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI) - (-PI)).abs() < 1e-5);
        assert_eq!(normalize_angle(0.5), 0.5);
    }

    #[test]
    fn test_dist_to_segment() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        // Perpendicular drop onto the segment
        assert!((dist_to_segment(Vec2::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-5);
        // Past the end: distance to endpoint
        assert!((dist_to_segment(Vec2::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-5);
        // Degenerate segment
        assert!((dist_to_segment(Vec2::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_field_bounds_edge_is_out() {
        // A circle exactly at the boundary is already outside
        assert!(!in_field_bounds(Vec2::new(-5.0, 100.0), 5.0));
        assert!(in_field_bounds(Vec2::new(-4.0, 100.0), 5.0));
        assert!(!in_field_bounds(Vec2::new(consts::FIELD_WIDTH + 5.0, 100.0), 5.0));
    }
}
