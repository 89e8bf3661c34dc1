//! Weapon data tables
//!
//! Each weapon is a static profile (damage/speed multipliers, projectile
//! radius, shop price, tint) plus a shot spec describing how a single trigger
//! pull translates into projectiles: count, spread, behavior flags, shot-time
//! bonuses and an optional status payload.

use serde::{Deserialize, Serialize};

use super::state::Tint;
use super::status::EffectKind;

/// The ten weapon types, in shop/cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponKind {
    Normal,
    Explosive,
    Piercing,
    Rapid,
    Homing,
    Freeze,
    Poison,
    Laser,
    Cluster,
    Energy,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 10] = [
        WeaponKind::Normal,
        WeaponKind::Explosive,
        WeaponKind::Piercing,
        WeaponKind::Rapid,
        WeaponKind::Homing,
        WeaponKind::Freeze,
        WeaponKind::Poison,
        WeaponKind::Laser,
        WeaponKind::Cluster,
        WeaponKind::Energy,
    ];

    pub fn profile(self) -> WeaponProfile {
        match self {
            WeaponKind::Normal => WeaponProfile {
                name: "Normal",
                price: 0,
                tint: Tint::Lime,
                damage_mult: 1.0,
                speed_mult: 1.0,
                radius: 5.0,
                fire_rate_mult: 1.0,
            },
            WeaponKind::Explosive => WeaponProfile {
                name: "Explosive",
                price: 30,
                tint: Tint::Orange,
                damage_mult: 2.0,
                speed_mult: 0.8,
                radius: 7.0,
                fire_rate_mult: 1.3,
            },
            WeaponKind::Piercing => WeaponProfile {
                name: "Piercing",
                price: 45,
                tint: Tint::Purple,
                damage_mult: 1.5,
                speed_mult: 1.2,
                radius: 5.0,
                fire_rate_mult: 1.1,
            },
            WeaponKind::Rapid => WeaponProfile {
                name: "Rapid",
                price: 60,
                tint: Tint::Yellow,
                damage_mult: 0.7,
                speed_mult: 1.5,
                radius: 3.0,
                fire_rate_mult: 0.5,
            },
            WeaponKind::Homing => WeaponProfile {
                name: "Homing",
                price: 90,
                tint: Tint::Cyan,
                damage_mult: 1.2,
                speed_mult: 0.9,
                radius: 6.0,
                fire_rate_mult: 1.2,
            },
            WeaponKind::Freeze => WeaponProfile {
                name: "Freeze",
                price: 75,
                tint: Tint::Ice,
                damage_mult: 0.8,
                speed_mult: 1.0,
                radius: 5.0,
                fire_rate_mult: 1.1,
            },
            WeaponKind::Poison => WeaponProfile {
                name: "Poison",
                price: 70,
                tint: Tint::Green,
                damage_mult: 0.6,
                speed_mult: 1.0,
                radius: 5.0,
                fire_rate_mult: 1.0,
            },
            WeaponKind::Laser => WeaponProfile {
                name: "Laser",
                price: 120,
                tint: Tint::Red,
                damage_mult: 2.5,
                speed_mult: 2.0,
                radius: 3.0,
                fire_rate_mult: 0.9,
            },
            WeaponKind::Cluster => WeaponProfile {
                name: "Cluster",
                price: 100,
                tint: Tint::White,
                damage_mult: 1.0,
                speed_mult: 0.7,
                radius: 8.0,
                fire_rate_mult: 1.4,
            },
            WeaponKind::Energy => WeaponProfile {
                name: "Energy",
                price: 180,
                tint: Tint::Gold,
                damage_mult: 3.0,
                speed_mult: 0.6,
                radius: 10.0,
                fire_rate_mult: 1.5,
            },
        }
    }

    /// How one trigger pull turns into projectiles
    pub fn shot_spec(self) -> ShotSpec {
        let mut spec = ShotSpec::default();
        match self {
            WeaponKind::Normal => {}
            WeaponKind::Explosive => spec.explosive = true,
            WeaponKind::Piercing => spec.piercing = true,
            WeaponKind::Rapid => {
                spec.count = 3;
                spec.spread = 0.15;
            }
            WeaponKind::Homing => spec.homing = true,
            WeaponKind::Freeze => spec.status = Some((EffectKind::Slow, 180)),
            WeaponKind::Poison => spec.status = Some((EffectKind::Poison, 300)),
            WeaponKind::Laser => {
                spec.speed_bonus = 2.0;
                spec.piercing = true;
            }
            WeaponKind::Cluster => spec.explosive = true,
            WeaponKind::Energy => {
                spec.damage_bonus = 1.5;
                spec.explosive = true;
            }
        }
        spec
    }
}

/// Static per-weapon data
#[derive(Debug, Clone, Copy)]
pub struct WeaponProfile {
    pub name: &'static str,
    /// Shop price in cubes (0 = always owned)
    pub price: u64,
    pub tint: Tint,
    pub damage_mult: f32,
    pub speed_mult: f32,
    pub radius: f32,
    /// Multiplier on the player's fire cooldown (lower = faster)
    pub fire_rate_mult: f32,
}

/// Behavior of the projectiles one trigger pull produces
#[derive(Debug, Clone, Copy)]
pub struct ShotSpec {
    pub count: u32,
    /// Random aim jitter in radians, +/- around the aim line
    pub spread: f32,
    /// Extra multipliers applied on top of the profile at shot time
    pub damage_bonus: f32,
    pub speed_bonus: f32,
    pub explosive: bool,
    pub piercing: bool,
    pub homing: bool,
    pub status: Option<(EffectKind, u32)>,
}

impl Default for ShotSpec {
    fn default() -> Self {
        Self {
            count: 1,
            spread: 0.0,
            damage_bonus: 1.0,
            speed_bonus: 1.0,
            explosive: false,
            piercing: false,
            homing: false,
            status: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_is_free_and_plain() {
        let profile = WeaponKind::Normal.profile();
        assert_eq!(profile.price, 0);
        let spec = WeaponKind::Normal.shot_spec();
        assert_eq!(spec.count, 1);
        assert!(!spec.explosive && !spec.piercing && !spec.homing);
        assert!(spec.status.is_none());
    }

    #[test]
    fn test_rapid_fires_three_with_spread() {
        let spec = WeaponKind::Rapid.shot_spec();
        assert_eq!(spec.count, 3);
        assert!(spec.spread > 0.0);
    }

    #[test]
    fn test_status_payloads() {
        assert_eq!(
            WeaponKind::Freeze.shot_spec().status,
            Some((EffectKind::Slow, 180))
        );
        assert_eq!(
            WeaponKind::Poison.shot_spec().status,
            Some((EffectKind::Poison, 300))
        );
    }

    #[test]
    fn test_laser_doubles_speed_and_pierces() {
        let spec = WeaponKind::Laser.shot_spec();
        assert_eq!(spec.speed_bonus, 2.0);
        assert!(spec.piercing);
    }

    #[test]
    fn test_energy_hits_harder_and_explodes() {
        let spec = WeaponKind::Energy.shot_spec();
        assert_eq!(spec.damage_bonus, 1.5);
        assert!(spec.explosive);
    }
}
