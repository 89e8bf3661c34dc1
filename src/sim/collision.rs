//! Collision and damage resolution
//!
//! Runs once per tick after projectiles have advanced. Ordering matters:
//! weak points are tested before the boss body and a weak-point hit skips the
//! body test for that projectile this tick. Non-piercing projectiles are
//! marked spent on any hit and pruned on the next advance.

use glam::Vec2;
use rand::Rng;

use super::projectile::EnemyBehavior;
use super::state::{FloatKind, FloatText, GameState, Tint};
use super::status::EffectKind;
use crate::{consts, dist_to_segment, vec_from_angle};

/// Apply the critical-hit rule to a base damage value given a uniform roll
/// in [0, 1).
pub fn crit_damage(base: f32, roll: f32) -> (f32, bool) {
    if roll < consts::CRITICAL_CHANCE {
        (base * consts::CRITICAL_MULTIPLIER, true)
    } else {
        (base, false)
    }
}

/// Resolve all collisions for this tick
pub fn resolve(state: &mut GameState) {
    player_boss_contact(state);
    player_shots_vs_boss(state);
    specials_vs_boss(state);
    enemy_shots_vs_player(state);
}

/// Push the player out of the boss body and apply contact damage
fn player_boss_contact(state: &mut GameState) {
    let Some(boss) = state.boss.as_ref() else {
        return;
    };
    let player = &mut state.player;
    let combined = player.radius + boss.radius;
    if player.pos.distance(boss.pos) < combined {
        let angle = (player.pos.y - boss.pos.y).atan2(player.pos.x - boss.pos.x);
        player.pos = boss.pos + vec_from_angle(angle) * combined;

        let contact = boss.damage / consts::CONTACT_DAMAGE_DIVISOR;
        player.health -= contact;
        state.texts.push(FloatText::new(
            player.pos - Vec2::new(0.0, 30.0),
            FloatKind::Damage(contact),
            Tint::Red,
        ));
    }
}

fn player_shots_vs_boss(state: &mut GameState) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    for proj in state.projectiles.iter_mut() {
        if proj.spent {
            continue;
        }

        // Weak points intercept before the body
        let wp_hit = boss.weak_points.iter().position(|wp| {
            wp.active && proj.pos.distance(boss.pos + wp.offset) < proj.radius + wp.radius
        });
        if let Some(i) = wp_hit {
            let roll = state.rng.random::<f32>();
            let (damage, crit) = crit_damage(proj.damage * 3.0, roll);
            // Body health is untouched; the damage still counts toward run
            // stats and the cube payout
            let cubes = boss.accrue_damage(damage);
            state.stats.damage_dealt += damage;
            state.stats.cubes_earned += cubes;

            let wp = &mut boss.weak_points[i];
            wp.health -= damage;
            let wp_pos = boss.pos + wp.offset;
            if wp.health <= 0.0 {
                wp.active = false;
                state.score += 100;
            }
            state.texts.push(FloatText::new(
                wp_pos - Vec2::new(0.0, 10.0),
                if crit {
                    FloatKind::Crit(damage)
                } else {
                    FloatKind::Damage(damage)
                },
                Tint::Yellow,
            ));
            if !proj.piercing {
                proj.spent = true;
            }
            continue;
        }

        // Body hitbox
        if proj.pos.distance(boss.pos) < proj.radius + boss.hitbox_radius() {
            let roll = state.rng.random::<f32>();
            let (damage, crit) = crit_damage(proj.damage, roll);
            let shielded = boss.is_shielded();
            let outcome = boss.take_damage(damage);
            state.stats.damage_dealt += outcome.dealt;
            state.stats.cubes_earned += outcome.cubes;

            let text_pos = boss.pos - Vec2::new(0.0, boss.radius + 20.0);
            if shielded {
                // Mitigated hit; no score, and status never lands through the
                // shield
                state
                    .texts
                    .push(FloatText::new(text_pos, FloatKind::Blocked, Tint::Ice));
            } else {
                state.score += (outcome.dealt / 5.0).round() as u64;
                state.texts.push(FloatText::new(
                    text_pos,
                    if crit {
                        FloatKind::Crit(outcome.dealt)
                    } else {
                        FloatKind::Damage(outcome.dealt)
                    },
                    Tint::White,
                ));
                if let Some((kind, duration)) = proj.status {
                    boss.status.apply(kind, duration);
                }
            }
            if !proj.piercing {
                proj.spent = true;
            }
        }
    }
}

fn specials_vs_boss(state: &mut GameState) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    for special in state.specials.iter_mut() {
        if special.spent {
            continue;
        }
        if special.pos.distance(boss.pos) < special.radius() + boss.hitbox_radius() {
            let roll = state.rng.random::<f32>();
            let (damage, crit) = crit_damage(special.damage(), roll);
            let shielded = boss.is_shielded();
            let outcome = boss.take_damage(damage);
            state.stats.damage_dealt += outcome.dealt;
            state.stats.cubes_earned += outcome.cubes;
            if !shielded {
                state.score += (outcome.dealt / 5.0).round() as u64;
            }

            let text_pos = boss.pos - Vec2::new(0.0, boss.radius + 20.0);
            state.texts.push(FloatText::new(
                text_pos,
                if shielded {
                    FloatKind::Blocked
                } else if crit {
                    FloatKind::Crit(outcome.dealt)
                } else {
                    FloatKind::Damage(outcome.dealt)
                },
                if shielded { Tint::Ice } else { Tint::White },
            ));
            // Spent specials burst on the next advance
            special.spent = true;
        }
    }
}

fn enemy_shots_vs_player(state: &mut GameState) {
    let player = &mut state.player;
    let shielded = player.status.has(EffectKind::Shield);

    for eproj in state.enemy_projectiles.iter_mut() {
        if eproj.spent {
            continue;
        }
        match &eproj.behavior {
            EnemyBehavior::Beam { .. } => {
                // Continuous contact damage along the ray; a player shield
                // still blocks it
                if let Some((a, b)) = eproj.beam_segment()
                    && dist_to_segment(player.pos, a, b) < player.radius + eproj.radius
                    && !shielded
                {
                    player.health -= eproj.damage / consts::BEAM_DAMAGE_DIVISOR;
                }
            }
            EnemyBehavior::Area { status, exploded: true, .. } => {
                // Hazard zone applies its status on entry; standing in it does
                // not refresh the duration, and it deals no direct damage
                let (kind, duration) = *status;
                if eproj.pos.distance(player.pos) < eproj.radius + player.radius
                    && !shielded
                    && !player.status.has(kind)
                {
                    player.status.apply(kind, duration);
                }
            }
            _ => {
                if eproj.pos.distance(player.pos) < eproj.radius + player.radius {
                    if shielded {
                        state.texts.push(FloatText::new(
                            player.pos - Vec2::new(0.0, 20.0),
                            FloatKind::Blocked,
                            Tint::Gold,
                        ));
                    } else {
                        player.health -= eproj.damage;
                        state.texts.push(FloatText::new(
                            player.pos - Vec2::new(0.0, 20.0),
                            FloatKind::Damage(eproj.damage),
                            Tint::Red,
                        ));
                        if let Some((kind, duration)) = eproj.status {
                            player.status.apply(kind, duration);
                        }
                    }
                    if !eproj.piercing {
                        eproj.spent = true;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;
    use crate::sim::projectile::{EnemyProjectile, Projectile};
    use crate::sim::weapons::WeaponKind;

    fn running_state() -> GameState {
        let profile = Profile::default();
        let mut state = GameState::new(
            1,
            profile.derived_stats(),
            profile.unlocked_weapons().collect(),
            WeaponKind::Normal,
        );
        state.start_run();
        state
    }

    fn plain_shot(pos: Vec2, damage: f32) -> Projectile {
        Projectile {
            pos,
            vel: Vec2::ZERO,
            radius: 5.0,
            damage,
            tint: Tint::Yellow,
            lifetime: 100,
            explosive: false,
            piercing: false,
            homing: false,
            status: None,
            spent: false,
        }
    }

    #[test]
    fn test_crit_damage_threshold() {
        // Just under the threshold crits, at the threshold does not
        assert_eq!(crit_damage(10.0, 0.1499), (20.0, true));
        assert_eq!(crit_damage(10.0, 0.15), (10.0, false));
        assert_eq!(crit_damage(10.0, 0.99), (10.0, false));
    }

    #[test]
    fn test_weak_point_hit_leaves_body_health_alone() {
        let mut state = running_state();
        let boss = state.boss.as_ref().unwrap();
        let wp_pos = boss.pos + boss.weak_points[0].offset;
        let health_before = boss.health;
        let wp_health_before = boss.weak_points[0].health;

        state.projectiles.push(plain_shot(wp_pos, 1.0));
        resolve(&mut state);

        let boss = state.boss.as_ref().unwrap();
        // Weak point took at least the tripled damage
        assert!(boss.weak_points[0].health <= wp_health_before - 3.0);
        // Body health never moves on a weak-point hit
        assert_eq!(boss.health, health_before);
        // The damage still counts toward run stats
        assert!(state.stats.damage_dealt >= 3.0);
        assert!(state.projectiles[0].spent);
    }

    #[test]
    fn test_weak_point_destruction_scores() {
        let mut state = running_state();
        let boss = state.boss.as_mut().unwrap();
        boss.weak_points[0].health = 0.5;
        let wp_pos = boss.pos + boss.weak_points[0].offset;

        state.projectiles.push(plain_shot(wp_pos, 10.0));
        resolve(&mut state);

        let boss = state.boss.as_ref().unwrap();
        assert!(!boss.weak_points[0].active);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_body_hit_scores_and_records_stats() {
        let mut state = running_state();
        let boss = state.boss.as_mut().unwrap();
        for wp in boss.weak_points.iter_mut() {
            wp.active = false;
        }
        let boss_pos = boss.pos;

        state.projectiles.push(plain_shot(boss_pos, 10.0));
        resolve(&mut state);

        assert!(state.stats.damage_dealt >= 10.0);
        assert!(state.score >= 2);
        assert!(state.projectiles[0].spent);
    }

    #[test]
    fn test_piercing_shot_survives_hit() {
        let mut state = running_state();
        let boss = state.boss.as_mut().unwrap();
        for wp in boss.weak_points.iter_mut() {
            wp.active = false;
        }
        let boss_pos = boss.pos;

        let mut shot = plain_shot(boss_pos, 10.0);
        shot.piercing = true;
        state.projectiles.push(shot);
        resolve(&mut state);
        assert!(!state.projectiles[0].spent);
    }

    #[test]
    fn test_player_shield_blocks_damage_and_status() {
        let mut state = running_state();
        state.player.status.apply(EffectKind::Shield, 120);
        let health_before = state.player.health;

        let mut shot = EnemyProjectile::ballistic(state.player.pos, 0.0, 0.0, 25.0, Tint::Red);
        shot.status = Some((EffectKind::Poison, 300));
        state.enemy_projectiles.push(shot);
        resolve(&mut state);

        assert_eq!(state.player.health, health_before);
        assert!(!state.player.status.has(EffectKind::Poison));
        assert!(state.enemy_projectiles[0].spent);
        assert!(state
            .texts
            .iter()
            .any(|t| t.kind == FloatKind::Blocked));
    }

    #[test]
    fn test_enemy_hit_damages_and_applies_status() {
        let mut state = running_state();
        let health_before = state.player.health;

        let mut shot = EnemyProjectile::ballistic(state.player.pos, 0.0, 0.0, 25.0, Tint::Red);
        shot.status = Some((EffectKind::Slow, 120));
        state.enemy_projectiles.push(shot);
        resolve(&mut state);

        assert_eq!(state.player.health, health_before - 25.0);
        assert!(state.player.status.has(EffectKind::Slow));
    }

    #[test]
    fn test_contact_pushes_player_out_and_damages() {
        let mut state = running_state();
        let boss = state.boss.as_ref().unwrap();
        let boss_pos = boss.pos;
        let boss_radius = boss.radius;
        let boss_damage = boss.damage;
        state.player.pos = boss_pos + Vec2::new(boss_radius * 0.5, 0.0);
        let health_before = state.player.health;

        resolve(&mut state);

        let expected = state.player.radius + boss_radius;
        assert!((state.player.pos.distance(boss_pos) - expected).abs() < 1e-3);
        assert!(
            (health_before - state.player.health
                - boss_damage / consts::CONTACT_DAMAGE_DIVISOR)
                .abs()
                < 1e-4
        );
    }

    #[test]
    fn test_beam_damage_respects_divisor() {
        let mut state = running_state();
        let health_before = state.player.health;
        let start = state.player.pos - Vec2::new(200.0, 0.0);
        let mut beam = EnemyProjectile::beam(start, 0.0, 30.0);
        // Long enough to cross the player
        for _ in 0..20 {
            beam.advance(state.player.pos);
        }
        state.enemy_projectiles.push(beam);
        resolve(&mut state);

        assert!(
            (health_before - state.player.health - 30.0 / consts::BEAM_DAMAGE_DIVISOR).abs()
                < 1e-4
        );
        // Beams are never spent by contact
        assert!(!state.enemy_projectiles[0].spent);
    }

    #[test]
    fn test_shielded_body_hit_awards_no_score() {
        use crate::sim::boss::SpecialState;

        let mut state = running_state();
        let boss = state.boss.as_mut().unwrap();
        for wp in boss.weak_points.iter_mut() {
            wp.active = false;
        }
        boss.special = SpecialState::Shield {
            active: true,
            cooldown: 300,
        };
        let boss_pos = boss.pos;

        state.projectiles.push(plain_shot(boss_pos, 10.0));
        resolve(&mut state);

        assert_eq!(state.score, 0);
        // The mitigated damage still lands and is recorded
        assert!(state.stats.damage_dealt > 0.0);
        assert!(state.texts.iter().any(|t| t.kind == FloatKind::Blocked));
    }

    #[test]
    fn test_area_hazard_applies_status_without_damage() {
        let mut state = running_state();
        let health_before = state.player.health;
        let mut hazard = EnemyProjectile::area(
            state.player.pos,
            0.0,
            0.0,
            10.0,
            (EffectKind::Slow, 240),
        );
        if let EnemyBehavior::Area { exploded, .. } = &mut hazard.behavior {
            *exploded = true;
        }
        hazard.radius = 100.0;
        state.enemy_projectiles.push(hazard);
        resolve(&mut state);

        assert_eq!(state.player.health, health_before);
        assert!(state.player.status.has(EffectKind::Slow));
    }

    #[test]
    fn test_area_hazard_does_not_refresh_held_status() {
        let mut state = running_state();
        // About to expire; the hazard must not extend it
        state.player.status.apply(EffectKind::Slow, 5);
        let mut hazard = EnemyProjectile::area(
            state.player.pos,
            0.0,
            0.0,
            10.0,
            (EffectKind::Slow, 240),
        );
        if let EnemyBehavior::Area { exploded, .. } = &mut hazard.behavior {
            *exploded = true;
        }
        hazard.radius = 100.0;
        state.enemy_projectiles.push(hazard);
        resolve(&mut state);

        for _ in 0..5 {
            state.player.status.tick();
        }
        assert!(!state.player.status.has(EffectKind::Slow));
    }
}
