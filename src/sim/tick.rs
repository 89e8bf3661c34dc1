//! Per-tick simulation step
//!
//! `tick` advances the whole simulation by one fixed step. Phase order:
//! run-controller gate, scheduled one-shot events, player update, projectile
//! advance and prune, collision resolution, boss update and death handling,
//! terminal checks. Pausing skips the entire step so every timer freezes.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::boss::DASH_TICKS;
use super::collision;
use super::projectile::{Projectile, SpecialProjectile};
use super::state::{FloatKind, FloatText, GamePhase, GameState, ScheduledKind, Tint};
use super::status::EffectKind;
use crate::{angle_between, consts, vec_from_angle};

/// Edge-triggered input sampled once per tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Desired movement direction; normalized before use
    pub movement: Vec2,
    pub fire: bool,
    pub special: bool,
    pub toggle_pause: bool,
    pub cycle_weapon: bool,
    pub toggle_auto_fire: bool,
}

/// Advance the simulation by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Idle | GamePhase::GameOver => return,
        GamePhase::Paused => {
            if input.toggle_pause {
                state.phase = GamePhase::Running;
            }
            return;
        }
        GamePhase::Running => {
            if input.toggle_pause {
                state.phase = GamePhase::Paused;
                return;
            }
        }
    }

    state.time_ticks += 1;
    state.stats.survival_ticks += 1;

    run_schedule(state);
    update_player(state, input);
    advance_projectiles(state);
    collision::resolve(state);
    update_boss(state);
    age_texts(state);

    // Terminal check on the same tick the health crossed zero
    if state.player.health <= 0.0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "game over: score {} after {} bosses",
            state.score,
            state.stats.waves_cleared
        );
    }
}

/// Fire one-shot events whose target tick has arrived
fn run_schedule(state: &mut GameState) {
    let now = state.time_ticks;
    let due: Vec<ScheduledKind> = state
        .schedule
        .iter()
        .filter(|e| e.at <= now)
        .map(|e| e.kind)
        .collect();
    state.schedule.retain(|e| e.at > now);

    for kind in due {
        match kind {
            ScheduledKind::SpawnBoss => state.spawn_boss(),
            ScheduledKind::EndDash => {
                if let Some(boss) = state.boss.as_mut() {
                    boss.end_dash();
                }
            }
        }
    }
}

fn update_player(state: &mut GameState, input: &TickInput) {
    if input.cycle_weapon {
        state.cycle_weapon();
    }
    if input.toggle_auto_fire {
        state.auto_fire = !state.auto_fire;
        state.auto_fire_counter = 0;
    }

    let player = &mut state.player;

    let speed = player.speed * player.status.speed_multiplier();
    player.pos += input.movement.normalize_or_zero() * speed;
    player.pos.x = player
        .pos
        .x
        .clamp(player.radius, consts::FIELD_WIDTH - player.radius);
    player.pos.y = player
        .pos
        .y
        .clamp(player.radius, consts::FIELD_HEIGHT - player.radius);

    player.fire_cooldown = player.fire_cooldown.saturating_sub(1);
    player.special_cooldown = player.special_cooldown.saturating_sub(1);
    if player.special_active {
        player.special_timer = player.special_timer.saturating_sub(1);
        if player.special_timer == 0 {
            player.special_active = false;
        }
    }

    // Damage-over-time pulses
    for pulse in player.status.tick() {
        player.health -= pulse.damage;
        let tint = match pulse.kind {
            EffectKind::Poison => Tint::Green,
            EffectKind::Fire => Tint::Orange,
            _ => Tint::Red,
        };
        state.texts.push(FloatText::new(
            player.pos - Vec2::new(0.0, 30.0),
            FloatKind::Damage(pulse.damage),
            tint,
        ));
    }

    if input.fire {
        player_shoot(state);
    }
    if state.auto_fire {
        state.auto_fire_counter += 1;
        if state.auto_fire_counter >= consts::AUTO_FIRE_DELAY {
            state.auto_fire_counter = 0;
            player_shoot(state);
        }
    }
    if input.special {
        activate_special(state);
    }
}

/// Spawn the selected weapon's shot group aimed at the boss. No-op while on
/// cooldown or with no live boss, so repeated calls inside one cooldown
/// window fire exactly once.
fn player_shoot(state: &mut GameState) {
    let player = &mut state.player;
    if player.fire_cooldown > 0 {
        return;
    }
    let Some(boss) = state.boss.as_ref() else {
        return;
    };

    let profile = player.weapon.profile();
    let spec = player.weapon.shot_spec();
    let aim = angle_between(player.pos, boss.pos);
    let damage = player.base_damage * profile.damage_mult * spec.damage_bonus;
    let speed = consts::PLAYER_BULLET_SPEED_BASE * profile.speed_mult * spec.speed_bonus;

    for _ in 0..spec.count {
        let jitter = if spec.spread > 0.0 {
            (state.rng.random::<f32>() - 0.5) * 2.0 * spec.spread
        } else {
            0.0
        };
        state.projectiles.push(Projectile {
            pos: player.pos,
            vel: vec_from_angle(aim + jitter) * speed,
            radius: profile.radius,
            damage,
            tint: profile.tint,
            lifetime: consts::PLAYER_BULLET_LIFETIME,
            explosive: spec.explosive,
            piercing: spec.piercing,
            homing: spec.homing,
            status: spec.status,
            spent: false,
        });
    }

    player.fire_cooldown = (player.fire_rate as f32 * profile.fire_rate_mult)
        .round()
        .max(1.0) as u32;
}

/// Launch the special projectile, gated by its cooldown and by one already
/// being active
fn activate_special(state: &mut GameState) {
    let player = &mut state.player;
    if player.special_cooldown > 0 || player.special_active {
        return;
    }
    player.special_active = true;
    player.special_timer = consts::SPECIAL_DURATION;
    player.special_cooldown = player.special_cooldown_max;

    let angle = match state.boss.as_ref() {
        Some(boss) => angle_between(player.pos, boss.pos),
        // No target mid-run cannot happen, but aim somewhere anyway
        None => state.rng.random::<f32>() * TAU,
    };
    state.specials.push(SpecialProjectile::new(player.pos, angle));
}

fn advance_projectiles(state: &mut GameState) {
    let boss_pos = state.boss.as_ref().map(|b| b.pos);
    for proj in state.projectiles.iter_mut() {
        proj.advance(boss_pos);
    }
    state.projectiles.retain(Projectile::alive);

    // Specials burst when spent by a hit or when their run expires
    let mut bursts: Vec<Projectile> = Vec::new();
    for special in state.specials.iter_mut() {
        if special.spent {
            bursts.extend(special.burst());
            continue;
        }
        special.advance();
        if special.expired() {
            bursts.extend(special.burst());
            special.spent = true;
        }
    }
    state.specials.retain(|s| !s.spent);
    state.projectiles.extend(bursts);

    let player_pos = state.player.pos;
    for eproj in state.enemy_projectiles.iter_mut() {
        eproj.advance(player_pos);
    }
    state.enemy_projectiles.retain(|p| p.alive());
}

fn update_boss(state: &mut GameState) {
    let mut dash_started = false;
    let mut death: Option<(u64, u32)> = None;

    if let Some(boss) = state.boss.as_mut() {
        // Status pulses hit the boss through the same mitigation path
        for pulse in boss.status.tick() {
            let outcome = boss.take_damage(pulse.damage);
            state.stats.damage_dealt += outcome.dealt;
            state.stats.cubes_earned += outcome.cubes;
            let tint = match pulse.kind {
                EffectKind::Poison => Tint::Green,
                _ => Tint::Orange,
            };
            state.texts.push(FloatText::new(
                boss.pos - Vec2::new(0.0, boss.radius + 20.0),
                FloatKind::Damage(outcome.dealt),
                tint,
            ));
        }

        let update = boss.update(state.time_ticks, state.player.pos, &mut state.rng);
        state.enemy_projectiles.extend(update.projectiles);
        dash_started = update.dash_started;

        if boss.health <= 0.0 {
            death = Some((boss.score_value, boss.level));
        }
    }

    if dash_started {
        state.schedule_in(ScheduledKind::EndDash, DASH_TICKS);
    }

    if let Some((score_value, level)) = death {
        let cubes = score_value / 100 + level as u64 * 5;
        state.score += score_value;
        state.stats.cubes_earned += cubes;
        state.stats.waves_cleared += 1;
        state.boss_level += 1;
        state.boss = None;
        state.enemy_projectiles.clear();
        state.schedule_in(ScheduledKind::SpawnBoss, consts::RESPAWN_DELAY_TICKS);
        log::info!(
            "boss defeated at lv{}, +{} score, +{} cubes",
            level + 1,
            score_value,
            cubes
        );
    }
}

fn age_texts(state: &mut GameState) {
    for text in state.texts.iter_mut() {
        text.life = text.life.saturating_sub(1);
    }
    state.texts.retain(|t| t.life > 0);
}
