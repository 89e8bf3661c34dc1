//! Projectile lifecycle and motion
//!
//! Three collections live in `GameState`: player projectiles, the special
//! ability projectile(s), and enemy projectiles. Enemy projectiles carry a
//! behavior tag (ballistic, homing, area-effect, beam) instead of separate
//! types; the tag owns whatever transient state that behavior needs.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Tint;
use super::status::EffectKind;
use crate::{angle_between, consts, in_field_bounds, normalize_angle, vec_from_angle};

/// A player-fired projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub tint: Tint,
    pub lifetime: u32,
    pub explosive: bool,
    pub piercing: bool,
    pub homing: bool,
    pub status: Option<(EffectKind, u32)>,
    /// Set when a collision consumes the projectile; pruned next advance
    pub spent: bool,
}

impl Projectile {
    /// Advance one tick: homing steer (if a target exists), then move.
    pub fn advance(&mut self, target: Option<Vec2>) {
        if self.homing
            && let Some(target) = target
        {
            self.vel = steer(self.pos, self.vel, target, consts::PLAYER_HOMING_TURN_RATE);
        }
        self.pos += self.vel;
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    pub fn alive(&self) -> bool {
        !self.spent && self.lifetime > 0 && in_field_bounds(self.pos, self.radius)
    }
}

/// The special ability projectile: slow, large, bursts on expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialProjectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub lifetime: u32,
    pub spent: bool,
}

impl SpecialProjectile {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            vel: vec_from_angle(angle) * consts::SPECIAL_SPEED,
            lifetime: consts::SPECIAL_LIFETIME,
            spent: false,
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    pub fn radius(&self) -> f32 {
        consts::SPECIAL_RADIUS
    }

    pub fn damage(&self) -> f32 {
        consts::SPECIAL_DAMAGE
    }

    /// Expired or left the field (bursts either way)
    pub fn expired(&self) -> bool {
        self.lifetime == 0 || !in_field_bounds(self.pos, self.radius())
    }

    /// Radial burst of small projectiles emitted when the special ends
    pub fn burst(&self) -> Vec<Projectile> {
        (0..consts::SPECIAL_BURST_COUNT)
            .map(|i| {
                let angle = i as f32 / consts::SPECIAL_BURST_COUNT as f32 * TAU;
                Projectile {
                    pos: self.pos,
                    vel: vec_from_angle(angle) * consts::SPECIAL_BURST_SPEED,
                    radius: consts::SPECIAL_BURST_RADIUS,
                    damage: consts::SPECIAL_BURST_DAMAGE,
                    tint: Tint::White,
                    lifetime: consts::SPECIAL_BURST_LIFETIME,
                    explosive: false,
                    piercing: false,
                    homing: false,
                    status: None,
                    spent: false,
                }
            })
            .collect()
    }
}

/// What an enemy projectile does each tick beyond flying straight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EnemyBehavior {
    Ballistic,
    Homing,
    /// Flies until it leaves the field or crosses into the player's zone,
    /// then detonates into a stationary expanding hazard.
    Area {
        status: (EffectKind, u32),
        exploded: bool,
        hazard_ticks: u32,
    },
    /// Anchored ray that grows from the boss toward a fixed angle
    Beam {
        angle: f32,
        length: f32,
        remaining: u32,
    },
}

/// Hazard duration after an area projectile detonates
pub const AREA_HAZARD_TICKS: u32 = 60;
/// Hazard radius growth per tick while active
pub const AREA_HAZARD_GROWTH: f32 = 1.5;
/// Beam length growth per tick
pub const BEAM_GROWTH: f32 = 30.0;
/// Beam lifetime cap
pub const BEAM_MAX_TICKS: u32 = 500;

/// A boss-fired projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyProjectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub tint: Tint,
    pub behavior: EnemyBehavior,
    pub status: Option<(EffectKind, u32)>,
    pub piercing: bool,
    pub spent: bool,
}

impl EnemyProjectile {
    pub fn ballistic(pos: Vec2, angle: f32, speed: f32, damage: f32, tint: Tint) -> Self {
        Self {
            pos,
            vel: vec_from_angle(angle) * speed,
            radius: 6.0,
            damage,
            tint,
            behavior: EnemyBehavior::Ballistic,
            status: None,
            piercing: false,
            spent: false,
        }
    }

    pub fn homing(pos: Vec2, angle: f32, speed: f32, damage: f32, tint: Tint) -> Self {
        Self {
            behavior: EnemyBehavior::Homing,
            ..Self::ballistic(pos, angle, speed, damage, tint)
        }
    }

    pub fn area(pos: Vec2, angle: f32, speed: f32, damage: f32, status: (EffectKind, u32)) -> Self {
        Self {
            pos,
            vel: vec_from_angle(angle) * speed,
            radius: 10.0,
            damage,
            tint: Tint::Ice,
            behavior: EnemyBehavior::Area {
                status,
                exploded: false,
                hazard_ticks: AREA_HAZARD_TICKS,
            },
            status: Some(status),
            piercing: false,
            spent: false,
        }
    }

    pub fn beam(pos: Vec2, angle: f32, damage: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: 8.0,
            damage,
            tint: Tint::Red,
            behavior: EnemyBehavior::Beam {
                angle,
                length: 0.0,
                remaining: BEAM_MAX_TICKS,
            },
            status: None,
            piercing: false,
            spent: false,
        }
    }

    /// Advance one tick. `player_pos` drives homing steer.
    pub fn advance(&mut self, player_pos: Vec2) {
        match &mut self.behavior {
            EnemyBehavior::Ballistic => self.pos += self.vel,
            EnemyBehavior::Homing => {
                self.vel = steer(self.pos, self.vel, player_pos, consts::ENEMY_HOMING_TURN_RATE);
                self.pos += self.vel;
            }
            EnemyBehavior::Area {
                exploded,
                hazard_ticks,
                ..
            } => {
                if *exploded {
                    *hazard_ticks = hazard_ticks.saturating_sub(1);
                    self.radius += AREA_HAZARD_GROWTH;
                } else {
                    self.pos += self.vel;
                    if !in_field_bounds(self.pos, self.radius)
                        || self.pos.y > consts::FIELD_HEIGHT * 0.8
                    {
                        *exploded = true;
                        self.vel = Vec2::ZERO;
                    }
                }
            }
            EnemyBehavior::Beam { length, remaining, .. } => {
                let max_len = 1.5 * consts::FIELD_WIDTH.max(consts::FIELD_HEIGHT);
                *length = (*length + BEAM_GROWTH).min(max_len);
                *remaining = remaining.saturating_sub(1);
            }
        }
    }

    pub fn alive(&self) -> bool {
        if self.spent {
            return false;
        }
        match &self.behavior {
            EnemyBehavior::Ballistic | EnemyBehavior::Homing => {
                in_field_bounds(self.pos, self.radius)
            }
            EnemyBehavior::Area {
                exploded,
                hazard_ticks,
                ..
            } => !*exploded || *hazard_ticks > 0,
            EnemyBehavior::Beam { remaining, .. } => *remaining > 0,
        }
    }

    /// Beam endpoint, if this is a beam
    pub fn beam_segment(&self) -> Option<(Vec2, Vec2)> {
        match &self.behavior {
            EnemyBehavior::Beam { angle, length, .. } => {
                Some((self.pos, self.pos + vec_from_angle(*angle) * *length))
            }
            _ => None,
        }
    }
}

/// Rotate `vel` toward `target` by `turn_rate` of the signed angular error,
/// preserving speed.
pub fn steer(pos: Vec2, vel: Vec2, target: Vec2, turn_rate: f32) -> Vec2 {
    let speed = vel.length();
    if speed == 0.0 {
        return vel;
    }
    let current = vel.y.atan2(vel.x);
    let desired = angle_between(pos, target);
    let error = normalize_angle(desired - current);
    vec_from_angle(current + error * turn_rate) * speed
}
