//! Persistent progression: currency, permanent upgrades, weapon unlocks
//!
//! The profile outlives runs. Purchases re-validate affordability and caps
//! internally so a stale UI gate can never corrupt the balance; the denied
//! cases are ordinary outcomes, not errors. Only this module touches the
//! filesystem.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::sim::weapons::WeaponKind;

/// Permanent upgrade tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradeKind {
    Health,
    Damage,
    Speed,
    FireRate,
    SpecialCooldown,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::Health,
        UpgradeKind::Damage,
        UpgradeKind::Speed,
        UpgradeKind::FireRate,
        UpgradeKind::SpecialCooldown,
    ];

    pub fn max_level(self) -> u32 {
        match self {
            UpgradeKind::SpecialCooldown => 5,
            _ => 10,
        }
    }

    fn base_cost(self) -> f64 {
        match self {
            UpgradeKind::Health => 15.0,
            UpgradeKind::Damage => 20.0,
            UpgradeKind::Speed => 25.0,
            UpgradeKind::FireRate => 30.0,
            UpgradeKind::SpecialCooldown => 40.0,
        }
    }

    fn cost_multiplier(self) -> f64 {
        match self {
            UpgradeKind::SpecialCooldown => 1.8,
            _ => 1.4,
        }
    }

    /// Cost of buying the next level when `level` are already owned
    pub fn cost_at(self, level: u32) -> u64 {
        (self.base_cost() * self.cost_multiplier().powi(level as i32)).floor() as u64
    }
}

/// Current level of each upgrade track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub health: u32,
    pub damage: u32,
    pub speed: u32,
    pub fire_rate: u32,
    pub special_cooldown: u32,
}

impl UpgradeLevels {
    pub fn get(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Health => self.health,
            UpgradeKind::Damage => self.damage,
            UpgradeKind::Speed => self.speed,
            UpgradeKind::FireRate => self.fire_rate,
            UpgradeKind::SpecialCooldown => self.special_cooldown,
        }
    }

    fn bump(&mut self, kind: UpgradeKind) {
        match kind {
            UpgradeKind::Health => self.health += 1,
            UpgradeKind::Damage => self.damage += 1,
            UpgradeKind::Speed => self.speed += 1,
            UpgradeKind::FireRate => self.fire_rate += 1,
            UpgradeKind::SpecialCooldown => self.special_cooldown += 1,
        }
    }
}

/// Player stats derived from the profile's upgrade levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub max_health: f32,
    pub base_damage: f32,
    pub speed: f32,
    pub fire_rate: u32,
    pub special_cooldown_max: u32,
}

/// Why a shop operation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    InsufficientCubes,
    MaxLevel,
    AlreadyUnlocked,
    NotUnlocked,
}

/// Result of a shop operation; denial is a normal outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopOutcome {
    Accepted,
    Denied(DenyReason),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub cubes: u64,
    pub upgrades: UpgradeLevels,
    unlocked: BTreeSet<WeaponKind>,
    pub selected_weapon: WeaponKind,
    pub tutorial_seen: bool,
}

impl Default for Profile {
    fn default() -> Self {
        let mut unlocked = BTreeSet::new();
        unlocked.insert(WeaponKind::Normal);
        Self {
            cubes: 0,
            upgrades: UpgradeLevels::default(),
            unlocked,
            selected_weapon: WeaponKind::Normal,
            tutorial_seen: false,
        }
    }
}

impl Profile {
    /// Buy the next level of an upgrade track
    pub fn purchase_upgrade(&mut self, kind: UpgradeKind) -> ShopOutcome {
        let level = self.upgrades.get(kind);
        if level >= kind.max_level() {
            return ShopOutcome::Denied(DenyReason::MaxLevel);
        }
        let cost = kind.cost_at(level);
        if self.cubes < cost {
            return ShopOutcome::Denied(DenyReason::InsufficientCubes);
        }
        self.cubes -= cost;
        self.upgrades.bump(kind);
        ShopOutcome::Accepted
    }

    /// Buy a weapon at its listed price
    pub fn unlock_weapon(&mut self, weapon: WeaponKind) -> ShopOutcome {
        if self.unlocked.contains(&weapon) {
            return ShopOutcome::Denied(DenyReason::AlreadyUnlocked);
        }
        let price = weapon.profile().price;
        if self.cubes < price {
            return ShopOutcome::Denied(DenyReason::InsufficientCubes);
        }
        self.cubes -= price;
        self.unlocked.insert(weapon);
        ShopOutcome::Accepted
    }

    /// Pick the weapon to start runs with; must be unlocked
    pub fn select_weapon(&mut self, weapon: WeaponKind) -> ShopOutcome {
        if !self.unlocked.contains(&weapon) {
            return ShopOutcome::Denied(DenyReason::NotUnlocked);
        }
        self.selected_weapon = weapon;
        ShopOutcome::Accepted
    }

    pub fn is_unlocked(&self, weapon: WeaponKind) -> bool {
        self.unlocked.contains(&weapon)
    }

    /// Unlocked weapons in shop order
    pub fn unlocked_weapons(&self) -> impl Iterator<Item = WeaponKind> + '_ {
        WeaponKind::ALL
            .into_iter()
            .filter(|w| self.unlocked.contains(w))
    }

    /// Player stats for a new run at the current upgrade levels
    pub fn derived_stats(&self) -> PlayerStats {
        let up = &self.upgrades;
        PlayerStats {
            max_health: consts::PLAYER_MAX_HEALTH_BASE + up.health as f32 * 20.0,
            base_damage: 10.0 + up.damage as f32 * 3.0,
            speed: consts::PLAYER_SPEED_BASE + up.speed as f32 * 0.5,
            fire_rate: consts::PLAYER_FIRE_RATE_BASE.saturating_sub(up.fire_rate * 2).max(5),
            special_cooldown_max: 1200u32.saturating_sub(up.special_cooldown * 120).max(600),
        }
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(io::Error::other)
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let data = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, data)
    }

    /// Load the profile, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(profile) => profile,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    log::warn!("failed to load profile from {}: {err}", path.display());
                }
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_formula() {
        assert_eq!(UpgradeKind::Health.cost_at(0), 15);
        assert_eq!(UpgradeKind::Health.cost_at(1), 21); // floor(15 * 1.4)
        assert_eq!(UpgradeKind::Health.cost_at(2), 29); // floor(15 * 1.96)
        assert_eq!(UpgradeKind::SpecialCooldown.cost_at(1), 72); // floor(40 * 1.8)
    }

    #[test]
    fn test_purchase_deducts_and_levels() {
        let mut profile = Profile::default();
        profile.cubes = 100;
        assert_eq!(profile.purchase_upgrade(UpgradeKind::Health), ShopOutcome::Accepted);
        assert_eq!(profile.cubes, 85);
        assert_eq!(profile.upgrades.health, 1);
    }

    #[test]
    fn test_purchase_denied_when_broke() {
        let mut profile = Profile::default();
        profile.cubes = 10;
        assert_eq!(
            profile.purchase_upgrade(UpgradeKind::Health),
            ShopOutcome::Denied(DenyReason::InsufficientCubes)
        );
        assert_eq!(profile.cubes, 10);
        assert_eq!(profile.upgrades.health, 0);
    }

    #[test]
    fn test_purchase_denied_at_max_level() {
        let mut profile = Profile::default();
        profile.cubes = u64::MAX;
        profile.upgrades.special_cooldown = 5;
        assert_eq!(
            profile.purchase_upgrade(UpgradeKind::SpecialCooldown),
            ShopOutcome::Denied(DenyReason::MaxLevel)
        );
    }

    #[test]
    fn test_weapon_unlock_and_reselect() {
        let mut profile = Profile::default();
        profile.cubes = 60;
        assert_eq!(profile.unlock_weapon(WeaponKind::Explosive), ShopOutcome::Accepted);
        assert_eq!(profile.cubes, 30);
        assert_eq!(
            profile.unlock_weapon(WeaponKind::Explosive),
            ShopOutcome::Denied(DenyReason::AlreadyUnlocked)
        );
        assert_eq!(profile.select_weapon(WeaponKind::Explosive), ShopOutcome::Accepted);
        assert_eq!(
            profile.select_weapon(WeaponKind::Laser),
            ShopOutcome::Denied(DenyReason::NotUnlocked)
        );
        assert_eq!(profile.selected_weapon, WeaponKind::Explosive);
    }

    #[test]
    fn test_derived_stats_scale_with_levels() {
        let mut profile = Profile::default();
        let base = profile.derived_stats();
        assert_eq!(base.max_health, 100.0);
        assert_eq!(base.fire_rate, 15);
        assert_eq!(base.special_cooldown_max, 1200);

        profile.upgrades.health = 3;
        profile.upgrades.fire_rate = 10;
        profile.upgrades.special_cooldown = 5;
        let upgraded = profile.derived_stats();
        assert_eq!(upgraded.max_health, 160.0);
        // Floors apply
        assert_eq!(upgraded.fire_rate, 5);
        assert_eq!(upgraded.special_cooldown_max, 600);
    }

    #[test]
    fn test_json_round_trip_preserves_derived_stats() {
        let mut profile = Profile::default();
        profile.cubes = 500;
        profile.upgrades.damage = 4;
        profile.unlocked.insert(WeaponKind::Poison);
        profile.selected_weapon = WeaponKind::Poison;

        let json = serde_json::to_string(&profile).unwrap();
        let back: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.derived_stats(), profile.derived_stats());
        assert_eq!(back.selected_weapon, WeaponKind::Poison);
        assert!(back.is_unlocked(WeaponKind::Poison));
    }

    #[test]
    fn test_unlocked_weapons_in_shop_order() {
        let mut profile = Profile::default();
        profile.unlocked.insert(WeaponKind::Energy);
        profile.unlocked.insert(WeaponKind::Piercing);
        let order: Vec<_> = profile.unlocked_weapons().collect();
        assert_eq!(
            order,
            vec![WeaponKind::Normal, WeaponKind::Piercing, WeaponKind::Energy]
        );
    }
}
