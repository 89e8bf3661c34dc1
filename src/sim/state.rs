//! Game state: the full simulation snapshot
//!
//! `GameState` owns everything the step function mutates, including the RNG,
//! so a serialized state replays identically. The presentation layer reads
//! entity positions and the floating-text queue between ticks but never
//! mutates state directly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::projectile::{EnemyProjectile, Projectile, SpecialProjectile};
use super::status::StatusLedger;
use super::weapons::WeaponKind;
use crate::consts;
use crate::profile::PlayerStats;

/// Run controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Abstract color tags; the presentation layer maps them to real colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Yellow,
    Orange,
    Cyan,
    Green,
    Magenta,
    Ice,
    Lime,
    Red,
    Purple,
    White,
    Gray,
    Gold,
}

/// What a floating combat text shows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FloatKind {
    Damage(f32),
    Crit(f32),
    Blocked,
}

/// A queued floating text event; ages out over [`consts::FLOAT_TEXT_LIFE`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatText {
    pub pos: Vec2,
    pub kind: FloatKind,
    pub tint: Tint,
    pub life: u32,
}

impl FloatText {
    pub fn new(pos: Vec2, kind: FloatKind, tint: Tint) -> Self {
        Self {
            pos,
            kind,
            tint,
            life: consts::FLOAT_TEXT_LIFE,
        }
    }
}

/// One-shot events fired when `time_ticks` reaches `at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledKind {
    SpawnBoss,
    EndDash,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub at: u64,
    pub kind: ScheduledKind,
}

/// Per-run counters, reset at run start
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub waves_cleared: u32,
    pub damage_dealt: f32,
    pub cubes_earned: u64,
    pub survival_ticks: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub base_damage: f32,
    pub speed: f32,
    /// Cooldown in ticks between trigger pulls
    pub fire_rate: u32,
    pub fire_cooldown: u32,
    pub special_cooldown: u32,
    pub special_cooldown_max: u32,
    pub special_active: bool,
    pub special_timer: u32,
    pub status: StatusLedger,
    pub weapon: WeaponKind,
}

impl Player {
    pub fn from_stats(stats: &PlayerStats, weapon: WeaponKind) -> Self {
        Self {
            pos: Vec2::new(consts::FIELD_WIDTH / 2.0, consts::FIELD_HEIGHT * 0.75),
            radius: consts::PLAYER_RADIUS,
            health: stats.max_health,
            max_health: stats.max_health,
            base_damage: stats.base_damage,
            speed: stats.speed,
            fire_rate: stats.fire_rate,
            fire_cooldown: 0,
            special_cooldown: 0,
            special_cooldown_max: stats.special_cooldown_max,
            special_active: false,
            special_timer: 0,
            status: StatusLedger::new(),
            weapon,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub score: u64,
    pub boss_level: u32,
    pub auto_fire: bool,
    pub auto_fire_counter: u32,
    pub player: Player,
    pub boss: Option<Boss>,
    pub projectiles: Vec<Projectile>,
    pub specials: Vec<SpecialProjectile>,
    pub enemy_projectiles: Vec<EnemyProjectile>,
    pub texts: Vec<FloatText>,
    pub schedule: Vec<ScheduledEvent>,
    pub stats: RunStats,
    /// Weapons the in-run selector may cycle through, in shop order
    pub unlocked_weapons: Vec<WeaponKind>,
    /// Stats snapshot used when (re)building the player
    player_stats: PlayerStats,
}

impl GameState {
    pub fn new(seed: u64, stats: PlayerStats, unlocked: Vec<WeaponKind>, weapon: WeaponKind) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            time_ticks: 0,
            score: 0,
            boss_level: 0,
            auto_fire: false,
            auto_fire_counter: 0,
            player: Player::from_stats(&stats, weapon),
            boss: None,
            projectiles: Vec::new(),
            specials: Vec::new(),
            enemy_projectiles: Vec::new(),
            texts: Vec::new(),
            schedule: Vec::new(),
            stats: RunStats::default(),
            unlocked_weapons: unlocked,
            player_stats: stats,
        }
    }

    /// Reset everything run-scoped and spawn the level-0 boss
    pub fn start_run(&mut self) {
        let weapon = self.player.weapon;
        self.phase = GamePhase::Running;
        self.score = 0;
        self.boss_level = 0;
        self.player = Player::from_stats(&self.player_stats, weapon);
        self.projectiles.clear();
        self.specials.clear();
        self.enemy_projectiles.clear();
        self.texts.clear();
        self.schedule.clear();
        self.stats = RunStats::default();
        self.spawn_boss();
        log::info!("run started (seed {})", self.seed);
    }

    /// Spawn the boss for the current level and reposition the player away
    /// from it
    pub fn spawn_boss(&mut self) {
        let boss = Boss::spawn(self.boss_level);
        log::info!(
            "boss spawned: {} lv{} ({} hp)",
            boss.archetype.stats().name,
            self.boss_level + 1,
            boss.max_health
        );
        self.boss = Some(boss);
        self.player.pos = Vec2::new(consts::FIELD_WIDTH / 2.0, consts::FIELD_HEIGHT * 0.75);
    }

    pub fn push_text(&mut self, text: FloatText) {
        self.texts.push(text);
    }

    pub fn schedule_in(&mut self, kind: ScheduledKind, delay: u64) {
        self.schedule.push(ScheduledEvent {
            at: self.time_ticks + delay,
            kind,
        });
    }

    /// Select the next unlocked weapon after the current one
    pub fn cycle_weapon(&mut self) {
        if self.unlocked_weapons.is_empty() {
            return;
        }
        let current = self
            .unlocked_weapons
            .iter()
            .position(|&w| w == self.player.weapon)
            .unwrap_or(0);
        self.player.weapon = self.unlocked_weapons[(current + 1) % self.unlocked_weapons.len()];
    }
}
