//! Boss archetypes and state machine
//!
//! One boss is alive at a time. The archetype cycles with the run level and
//! drives stats, movement, basic fire and the periodic special attack.
//! Archetype-specific transient state (shield timers, laser charge, dash
//! velocity...) lives in a tagged enum so each boss only carries what it uses.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::projectile::EnemyProjectile;
use super::state::Tint;
use super::status::{EffectKind, StatusLedger};
use crate::{angle_between, consts, vec_from_angle};

/// The ten boss archetypes, cycling with the run level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    Brute,
    Sniper,
    Swarm,
    Teleporter,
    Shield,
    Berserker,
    Frost,
    Shadow,
    Laser,
    Ultimate,
}

impl Archetype {
    pub const COUNT: u32 = 10;

    pub fn from_level(level: u32) -> Self {
        match level % Self::COUNT {
            0 => Archetype::Brute,
            1 => Archetype::Sniper,
            2 => Archetype::Swarm,
            3 => Archetype::Teleporter,
            4 => Archetype::Shield,
            5 => Archetype::Berserker,
            6 => Archetype::Frost,
            7 => Archetype::Shadow,
            8 => Archetype::Laser,
            _ => Archetype::Ultimate,
        }
    }

    pub fn stats(self) -> ArchetypeStats {
        match self {
            Archetype::Brute => ArchetypeStats {
                name: "Brute",
                tint: Tint::Red,
                base_health: 700.0,
                health_scaling: 300.0,
                base_damage: 20.0,
                damage_scaling: 7.0,
                speed: 0.5,
                fire_rate: 75,
                attack_frequency: 180,
            },
            Archetype::Sniper => ArchetypeStats {
                name: "Sniper",
                tint: Tint::Green,
                base_health: 500.0,
                health_scaling: 200.0,
                base_damage: 40.0,
                damage_scaling: 12.0,
                speed: 0.9,
                fire_rate: 110,
                attack_frequency: 90,
            },
            Archetype::Swarm => ArchetypeStats {
                name: "Swarm",
                tint: Tint::Orange,
                base_health: 600.0,
                health_scaling: 250.0,
                base_damage: 15.0,
                damage_scaling: 5.0,
                speed: 1.5,
                fire_rate: 30,
                attack_frequency: 100,
            },
            Archetype::Teleporter => ArchetypeStats {
                name: "Teleporter",
                tint: Tint::Purple,
                base_health: 550.0,
                health_scaling: 220.0,
                base_damage: 28.0,
                damage_scaling: 10.0,
                speed: 0.7,
                fire_rate: 60,
                attack_frequency: 140,
            },
            Archetype::Shield => ArchetypeStats {
                name: "Shield",
                tint: Tint::Ice,
                base_health: 900.0,
                health_scaling: 350.0,
                base_damage: 20.0,
                damage_scaling: 6.0,
                speed: 0.5,
                fire_rate: 70,
                attack_frequency: 180,
            },
            Archetype::Berserker => ArchetypeStats {
                name: "Berserker",
                tint: Tint::Magenta,
                base_health: 700.0,
                health_scaling: 280.0,
                base_damage: 35.0,
                damage_scaling: 16.0,
                speed: 0.8,
                fire_rate: 50,
                attack_frequency: 90,
            },
            Archetype::Frost => ArchetypeStats {
                name: "Frost",
                tint: Tint::Cyan,
                base_health: 650.0,
                health_scaling: 260.0,
                base_damage: 22.0,
                damage_scaling: 7.0,
                speed: 0.9,
                fire_rate: 85,
                attack_frequency: 150,
            },
            Archetype::Shadow => ArchetypeStats {
                name: "Shadow",
                tint: Tint::Gray,
                base_health: 600.0,
                health_scaling: 240.0,
                base_damage: 28.0,
                damage_scaling: 9.0,
                speed: 1.2,
                fire_rate: 45,
                attack_frequency: 130,
            },
            Archetype::Laser => ArchetypeStats {
                name: "Laser",
                tint: Tint::Yellow,
                base_health: 750.0,
                health_scaling: 300.0,
                base_damage: 45.0,
                damage_scaling: 20.0,
                speed: 0.4,
                fire_rate: 170,
                attack_frequency: 220,
            },
            Archetype::Ultimate => ArchetypeStats {
                name: "Ultimate",
                tint: Tint::Gold,
                base_health: 1300.0,
                health_scaling: 500.0,
                base_damage: 55.0,
                damage_scaling: 25.0,
                speed: 1.0,
                fire_rate: 40,
                attack_frequency: 70,
            },
        }
    }
}

/// Base stats for an archetype, before per-level scaling
#[derive(Debug, Clone, Copy)]
pub struct ArchetypeStats {
    pub name: &'static str,
    pub tint: Tint,
    pub base_health: f32,
    pub health_scaling: f32,
    pub base_damage: f32,
    pub damage_scaling: f32,
    pub speed: f32,
    pub fire_rate: u32,
    pub attack_frequency: u32,
}

/// Transient per-archetype state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SpecialState {
    None,
    /// Shockwave can only fire when the timer has run down
    Brute { shockwave_timer: u32 },
    Teleporter { teleport_cooldown: u32 },
    Shield { active: bool, cooldown: u32 },
    Berserker { dash_vel: Vec2 },
    Shadow { invisible: bool, cooldown: u32 },
    Laser { charging: bool, charge_ticks: u32 },
}

const SHIELD_DURATION: u32 = 180;
const SHIELD_RECHARGE: u32 = 300;
const INVISIBILITY_DURATION: u32 = 120;
const INVISIBILITY_RECHARGE: u32 = 300;
const LASER_CHARGE_TICKS: u32 = 120;
const BRUTE_SHOCKWAVE_COOLDOWN: u32 = 300;
const TELEPORT_COOLDOWN: u32 = 180;

/// Duration of the berserker dash before the scheduled stop
pub const DASH_TICKS: u64 = 30;

/// A destructible weak spot on the boss body, position relative to center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeakPoint {
    pub offset: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub active: bool,
}

/// Side effects of a boss update the orchestrator must act on
#[derive(Debug, Default)]
pub struct BossUpdate {
    pub projectiles: Vec<EnemyProjectile>,
    /// A dash started this tick; schedule its end
    pub dash_started: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub archetype: Archetype,
    pub level: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub damage: f32,
    pub speed: f32,
    pub fire_rate: u32,
    pub fire_cooldown: u32,
    pub attack_counter: u32,
    pub attack_frequency: u32,
    pub enraged: bool,
    pub status: StatusLedger,
    pub weak_points: Vec<WeakPoint>,
    pub special: SpecialState,
    pub score_value: u64,
    /// Accumulated damage toward the periodic cube payout
    damage_counter: f32,
}

impl Boss {
    pub fn spawn(level: u32) -> Self {
        let archetype = Archetype::from_level(level);
        let stats = archetype.stats();
        let radius = 50.0 + level as f32 * 1.5;
        let health = stats.base_health + level as f32 * stats.health_scaling;

        let num_points = 2 + level / 5;
        let wp_health = 3.0 + (level / 3) as f32;
        let weak_points = (0..num_points)
            .map(|i| WeakPoint {
                offset: vec_from_angle(i as f32 / num_points as f32 * TAU) * (radius * 0.8),
                radius: 8.0,
                health: wp_health,
                max_health: wp_health,
                active: true,
            })
            .collect();

        let special = match archetype {
            Archetype::Brute => SpecialState::Brute { shockwave_timer: 0 },
            Archetype::Teleporter => SpecialState::Teleporter {
                teleport_cooldown: 0,
            },
            Archetype::Shield => SpecialState::Shield {
                active: false,
                cooldown: 0,
            },
            Archetype::Berserker => SpecialState::Berserker {
                dash_vel: Vec2::ZERO,
            },
            Archetype::Shadow => SpecialState::Shadow {
                invisible: false,
                cooldown: 0,
            },
            Archetype::Laser => SpecialState::Laser {
                charging: false,
                charge_ticks: 0,
            },
            _ => SpecialState::None,
        };

        Self {
            archetype,
            level,
            pos: Vec2::new(consts::FIELD_WIDTH / 2.0, consts::FIELD_HEIGHT * 0.2),
            radius,
            health,
            max_health: health,
            damage: stats.base_damage + level as f32 * stats.damage_scaling,
            speed: stats.speed,
            fire_rate: stats.fire_rate,
            fire_cooldown: 0,
            attack_counter: 0,
            attack_frequency: stats.attack_frequency,
            enraged: false,
            status: StatusLedger::new(),
            weak_points,
            special,
            score_value: 500 + level as u64 * 200,
            damage_counter: 0.0,
        }
    }

    /// Body hitbox is smaller than the drawn radius
    pub fn hitbox_radius(&self) -> f32 {
        self.radius * 0.7
    }

    pub fn is_shielded(&self) -> bool {
        matches!(self.special, SpecialState::Shield { active: true, .. })
    }

    pub fn is_invisible(&self) -> bool {
        matches!(self.special, SpecialState::Shadow { invisible: true, .. })
    }

    fn is_charging_laser(&self) -> bool {
        matches!(self.special, SpecialState::Laser { charging: true, .. })
    }

    /// Advance the boss one tick: enrage check, movement, basic fire, special
    /// attack pattern. `time_ticks` drives the wander trig; attacks aim at
    /// `player_pos`.
    pub fn update(&mut self, time_ticks: u64, player_pos: Vec2, rng: &mut Pcg32) -> BossUpdate {
        if self.health / self.max_health < 0.3 && !self.enraged {
            self.enraged = true;
            self.fire_rate = (self.fire_rate as f32 * 0.6) as u32;
            self.speed *= 1.5;
            log::info!("{} boss enraged", self.archetype.stats().name);
        }

        let mut out = BossUpdate::default();
        self.update_movement(time_ticks, rng);
        self.update_attacks(player_pos, rng, &mut out);
        out
    }

    fn update_movement(&mut self, time_ticks: u64, rng: &mut Pcg32) {
        // Wander formulas use wall-clock-ish milliseconds to keep the original
        // oscillation periods at 60Hz
        let t_ms = time_ticks as f32 * (1000.0 / 60.0);
        let speed = self.speed * self.status.speed_multiplier();

        match &mut self.special {
            SpecialState::Teleporter { teleport_cooldown } => {
                if *teleport_cooldown == 0 && rng.random::<f32>() < 0.005 {
                    self.pos = random_field_pos(self.radius, rng);
                    *teleport_cooldown = TELEPORT_COOLDOWN;
                } else {
                    *teleport_cooldown = teleport_cooldown.saturating_sub(1);
                }
            }
            SpecialState::Shadow { invisible, cooldown } => {
                if *cooldown == 0 && !*invisible && rng.random::<f32>() < 0.007 {
                    *invisible = true;
                    *cooldown = INVISIBILITY_DURATION + INVISIBILITY_RECHARGE;
                } else if *invisible && *cooldown <= INVISIBILITY_RECHARGE {
                    *invisible = false;
                }
                *cooldown = cooldown.saturating_sub(1);
                self.pos.x += (t_ms / 500.0).cos() * speed * 5.0;
            }
            SpecialState::Laser { charging, .. } => {
                // Holds still while charging for an accurate shot
                if !*charging {
                    self.pos.x += (t_ms / 500.0).cos() * speed * 3.0;
                }
            }
            SpecialState::Berserker { dash_vel } => {
                let dash = *dash_vel;
                self.pos += dash;
                self.pos.x += (t_ms / 500.0).cos() * speed * 5.0;
            }
            SpecialState::Brute { .. } => {
                self.pos.x += (t_ms / 1000.0).cos() * speed * 3.0;
            }
            _ => match self.archetype {
                Archetype::Sniper => {
                    // Mostly stationary with rare repositioning jumps
                    if rng.random::<f32>() < 0.01 {
                        self.pos.x += (rng.random::<f32>() - 0.5) * speed * 20.0;
                    }
                }
                Archetype::Swarm => {
                    self.pos.x += (t_ms / 200.0).sin() * speed * 2.0;
                    self.pos.y += (t_ms / 300.0).cos() * speed;
                }
                _ => {
                    self.pos.x += (t_ms / 500.0).cos() * speed * 5.0;
                }
            },
        }

        // Bosses own the top 60% of the field
        self.pos.x = self.pos.x.clamp(self.radius, consts::FIELD_WIDTH - self.radius);
        self.pos.y = self
            .pos
            .y
            .clamp(self.radius, consts::FIELD_HEIGHT * 0.6);
    }

    fn update_attacks(&mut self, player_pos: Vec2, rng: &mut Pcg32, out: &mut BossUpdate) {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);

        if self.fire_cooldown == 0 && !self.is_charging_laser() {
            let aim = angle_between(self.pos, player_pos);
            self.basic_attack(aim, rng, &mut out.projectiles);
            self.fire_cooldown = self.fire_rate;
        }

        self.attack_counter += 1;
        if self.attack_counter >= self.attack_frequency {
            self.attack_counter = 0;
            self.special_attack(player_pos, rng, out);
        }

        // Per-archetype timers
        match &mut self.special {
            SpecialState::Brute { shockwave_timer } => {
                *shockwave_timer = shockwave_timer.saturating_sub(1);
            }
            SpecialState::Shield { active, cooldown } => {
                if *cooldown > 0 {
                    *cooldown -= 1;
                    if *active && *cooldown <= SHIELD_RECHARGE - SHIELD_DURATION {
                        *active = false;
                    }
                }
            }
            SpecialState::Laser {
                charging,
                charge_ticks,
            } => {
                if *charging {
                    *charge_ticks = charge_ticks.saturating_sub(1);
                    if *charge_ticks == 0 {
                        *charging = false;
                        let aim = angle_between(self.pos, player_pos);
                        out.projectiles
                            .push(EnemyProjectile::beam(self.pos, aim, self.damage * 2.0));
                        self.fire_cooldown = self.fire_rate;
                        self.attack_counter = 0;
                    }
                }
            }
            _ => {}
        }
    }

    fn basic_attack(&self, aim: f32, rng: &mut Pcg32, shots: &mut Vec<EnemyProjectile>) {
        let speed = consts::ENEMY_BULLET_SPEED;
        let tint = self.archetype.stats().tint;
        match self.archetype {
            Archetype::Sniper => {
                shots.push(EnemyProjectile::ballistic(
                    self.pos,
                    aim,
                    speed * 2.5,
                    self.damage,
                    tint,
                ));
            }
            Archetype::Swarm => {
                for i in -3..=3 {
                    shots.push(EnemyProjectile::ballistic(
                        self.pos,
                        aim + i as f32 * 0.15,
                        speed * 1.2,
                        self.damage * 0.5,
                        tint,
                    ));
                }
            }
            Archetype::Berserker => {
                for _ in 0..5 {
                    let spread = (rng.random::<f32>() - 0.5) * 0.5;
                    shots.push(EnemyProjectile::ballistic(
                        self.pos,
                        aim + spread,
                        speed * 1.5,
                        self.damage * 0.7,
                        tint,
                    ));
                }
            }
            Archetype::Frost => {
                let mut shot =
                    EnemyProjectile::ballistic(self.pos, aim, speed * 1.2, self.damage * 0.8, tint);
                shot.status = Some((EffectKind::Slow, 120));
                shots.push(shot);
            }
            Archetype::Shadow => {
                let mut shot =
                    EnemyProjectile::ballistic(self.pos, aim, speed * 1.3, self.damage * 0.7, tint);
                shot.status = Some((EffectKind::Poison, 180));
                shots.push(shot);
            }
            Archetype::Laser => {
                // Pot shots between beam charges
                shots.push(EnemyProjectile::ballistic(
                    self.pos,
                    aim,
                    speed,
                    self.damage * 0.4,
                    Tint::Red,
                ));
            }
            Archetype::Ultimate => {
                shots.push(EnemyProjectile::ballistic(
                    self.pos,
                    aim,
                    speed * 1.5,
                    self.damage,
                    tint,
                ));
                if rng.random::<f32>() < 0.3 {
                    shots.push(EnemyProjectile::homing(
                        self.pos,
                        aim,
                        speed,
                        self.damage * 0.8,
                        tint,
                    ));
                }
            }
            _ => {
                shots.push(EnemyProjectile::ballistic(
                    self.pos,
                    aim,
                    speed,
                    self.damage,
                    Tint::Red,
                ));
            }
        }
    }

    fn special_attack(&mut self, player_pos: Vec2, rng: &mut Pcg32, out: &mut BossUpdate) {
        let aim = angle_between(self.pos, player_pos);
        let speed = consts::ENEMY_BULLET_SPEED;
        match self.archetype {
            Archetype::Brute => {
                if let SpecialState::Brute { shockwave_timer } = &mut self.special
                    && *shockwave_timer == 0
                {
                    *shockwave_timer = BRUTE_SHOCKWAVE_COOLDOWN;
                    shockwave(self.pos, self.damage, &mut out.projectiles);
                }
            }
            Archetype::Sniper => {
                // High precision piercing shot
                let mut shot = EnemyProjectile::ballistic(
                    self.pos,
                    aim,
                    speed * 4.0,
                    self.damage * 1.5,
                    Tint::Yellow,
                );
                shot.piercing = true;
                out.projectiles.push(shot);
            }
            Archetype::Swarm => {
                for _ in 0..(3 + self.level / 2) {
                    out.projectiles.push(EnemyProjectile::homing(
                        self.pos,
                        rng.random::<f32>() * TAU,
                        speed * 0.5,
                        self.damage * 0.7,
                        Tint::Orange,
                    ));
                }
            }
            Archetype::Teleporter => {
                // Blink next to the player and burst in all directions
                self.pos = player_pos
                    + Vec2::new(
                        (rng.random::<f32>() - 0.5) * 100.0,
                        (rng.random::<f32>() - 0.5) * 100.0,
                    );
                for i in 0..8 {
                    out.projectiles.push(EnemyProjectile::ballistic(
                        self.pos,
                        i as f32 / 8.0 * TAU,
                        speed * 1.5,
                        self.damage * 1.1,
                        Tint::Purple,
                    ));
                }
            }
            Archetype::Shield => {
                if let SpecialState::Shield { active, cooldown } = &mut self.special {
                    *active = true;
                    *cooldown = SHIELD_RECHARGE;
                }
            }
            Archetype::Berserker => {
                if let SpecialState::Berserker { dash_vel } = &mut self.special {
                    *dash_vel = vec_from_angle(aim) * self.speed * 5.0;
                    out.dash_started = true;
                }
            }
            Archetype::Frost => {
                out.projectiles.push(EnemyProjectile::area(
                    self.pos,
                    aim,
                    speed,
                    self.damage * 1.5,
                    (EffectKind::Slow, 240),
                ));
            }
            Archetype::Shadow => {
                if let SpecialState::Shadow { invisible, cooldown } = &mut self.special {
                    *invisible = true;
                    *cooldown = INVISIBILITY_DURATION + INVISIBILITY_RECHARGE;
                }
            }
            Archetype::Laser => {
                if let SpecialState::Laser {
                    charging,
                    charge_ticks,
                } = &mut self.special
                {
                    *charging = true;
                    *charge_ticks = LASER_CHARGE_TICKS;
                }
            }
            Archetype::Ultimate => {
                // Shockwave, a homing shot and a blink, all at once
                shockwave(self.pos, self.damage, &mut out.projectiles);
                out.projectiles.push(EnemyProjectile::homing(
                    self.pos,
                    aim,
                    speed * 0.7,
                    self.damage * 1.5,
                    Tint::Gold,
                ));
                self.pos = random_field_pos(self.radius, rng);
            }
        }
    }

    /// Stop a dash (scheduled when the dash starts)
    pub fn end_dash(&mut self) {
        if let SpecialState::Berserker { dash_vel } = &mut self.special {
            *dash_vel = Vec2::ZERO;
        }
    }

    /// Accrue damage toward the periodic cube payout without touching body
    /// health. Weak-point hits route here; body hits via [`Boss::take_damage`].
    pub fn accrue_damage(&mut self, amount: f32) -> u64 {
        self.damage_counter += amount;
        let mut cubes = 0;
        while self.damage_counter >= consts::DAMAGE_THRESHOLD_CUBES {
            cubes += consts::CUBES_PER_THRESHOLD;
            self.damage_counter -= consts::DAMAGE_THRESHOLD_CUBES;
        }
        cubes
    }

    /// Apply damage with shield mitigation, accruing the cube payout counter.
    /// Returns the damage actually dealt, cubes earned, and whether the boss
    /// died.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        let dealt = if self.is_shielded() {
            amount * 0.1
        } else {
            amount
        };
        self.health -= dealt;
        let cubes = self.accrue_damage(dealt);

        let died = self.health <= 0.0;
        if died {
            self.damage_counter = 0.0;
        }
        DamageOutcome { dealt, cubes, died }
    }
}

/// Result of [`Boss::take_damage`]
#[derive(Debug, Clone, Copy)]
pub struct DamageOutcome {
    pub dealt: f32,
    pub cubes: u64,
    pub died: bool,
}

fn shockwave(pos: Vec2, damage: f32, shots: &mut Vec<EnemyProjectile>) {
    for i in 0..12 {
        shots.push(EnemyProjectile::ballistic(
            pos,
            i as f32 / 12.0 * TAU,
            consts::ENEMY_BULLET_SPEED * 0.8,
            damage * 1.2,
            Tint::Red,
        ));
    }
}

fn random_field_pos(radius: f32, rng: &mut Pcg32) -> Vec2 {
    Vec2::new(
        rng.random::<f32>() * (consts::FIELD_WIDTH - radius * 2.0) + radius,
        rng.random::<f32>() * (consts::FIELD_HEIGHT * 0.5) + radius,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_archetype_cycles_with_level() {
        assert_eq!(Archetype::from_level(0), Archetype::Brute);
        assert_eq!(Archetype::from_level(9), Archetype::Ultimate);
        assert_eq!(Archetype::from_level(10), Archetype::Brute);
        assert_eq!(Archetype::from_level(23), Archetype::Teleporter);
    }

    #[test]
    fn test_spawn_scaling() {
        let boss = Boss::spawn(10);
        // Brute again at level 10
        assert_eq!(boss.archetype, Archetype::Brute);
        assert_eq!(boss.max_health, 700.0 + 10.0 * 300.0);
        assert_eq!(boss.damage, 20.0 + 10.0 * 7.0);
        assert_eq!(boss.radius, 65.0);
        assert_eq!(boss.weak_points.len(), 4);
        assert_eq!(boss.weak_points[0].max_health, 3.0 + 3.0);
        assert_eq!(boss.score_value, 500 + 10 * 200);
    }

    #[test]
    fn test_weak_points_sit_on_inner_ring() {
        let boss = Boss::spawn(0);
        for wp in &boss.weak_points {
            assert!((wp.offset.length() - boss.radius * 0.8).abs() < 1e-3);
            assert_eq!(wp.radius, 8.0);
        }
    }

    #[test]
    fn test_shield_mitigates_to_a_tenth() {
        let mut boss = Boss::spawn(4);
        assert_eq!(boss.archetype, Archetype::Shield);
        boss.special = SpecialState::Shield {
            active: true,
            cooldown: SHIELD_RECHARGE,
        };
        let before = boss.health;
        let outcome = boss.take_damage(10.0);
        assert!((outcome.dealt - 1.0).abs() < 1e-5);
        assert!((before - boss.health - 1.0).abs() < 1e-5);
        assert!(!outcome.died);
    }

    #[test]
    fn test_cube_payout_every_thousand_damage() {
        let mut boss = Boss::spawn(9);
        let outcome = boss.take_damage(999.0);
        assert_eq!(outcome.cubes, 0);
        let outcome = boss.take_damage(1.0);
        assert_eq!(outcome.cubes, 25);
        let outcome = boss.take_damage(2000.0);
        assert_eq!(outcome.cubes, 50);
    }

    #[test]
    fn test_accrue_damage_pays_cubes_without_health_change() {
        let mut boss = Boss::spawn(9);
        let health = boss.health;
        assert_eq!(boss.accrue_damage(999.0), 0);
        assert_eq!(boss.accrue_damage(1.0), 25);
        assert_eq!(boss.health, health);
    }

    #[test]
    fn test_enrage_is_one_way_and_buffs() {
        let mut boss = Boss::spawn(0);
        let base_rate = boss.fire_rate;
        let base_speed = boss.speed;
        boss.health = boss.max_health * 0.29;
        boss.update(0, Vec2::new(400.0, 500.0), &mut rng());
        assert!(boss.enraged);
        assert_eq!(boss.fire_rate, (base_rate as f32 * 0.6) as u32);
        assert!((boss.speed - base_speed * 1.5).abs() < 1e-5);
        // A second pass must not compound the buffs
        let rate = boss.fire_rate;
        boss.update(1, Vec2::new(400.0, 500.0), &mut rng());
        assert_eq!(boss.fire_rate, rate);
    }

    #[test]
    fn test_movement_clamped_to_upper_field() {
        let mut boss = Boss::spawn(2);
        boss.pos = Vec2::new(-50.0, consts::FIELD_HEIGHT);
        let mut r = rng();
        boss.update(0, Vec2::new(400.0, 500.0), &mut r);
        assert!(boss.pos.x >= boss.radius);
        assert!(boss.pos.y <= consts::FIELD_HEIGHT * 0.6);
    }

    #[test]
    fn test_death_at_zero_health() {
        let mut boss = Boss::spawn(0);
        let outcome = boss.take_damage(boss.health);
        assert!(outcome.died);
    }

    #[test]
    fn test_dash_ends_on_schedule_call() {
        let mut boss = Boss::spawn(5);
        boss.special = SpecialState::Berserker {
            dash_vel: Vec2::new(4.0, 0.0),
        };
        boss.end_dash();
        match boss.special {
            SpecialState::Berserker { dash_vel } => assert_eq!(dash_vel, Vec2::ZERO),
            _ => panic!("special state changed"),
        }
    }
}
