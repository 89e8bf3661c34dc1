//! Status effect ledger
//!
//! Both the player and the boss carry a [`StatusLedger`]: a small map from
//! effect kind to remaining duration. Applying an effect that is already
//! present refreshes its duration instead of stacking. Damage-over-time
//! effects pulse on a fixed period so that a duration of `k * period` yields
//! exactly `k` damage pulses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Timed effect kinds that can be attached to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffectKind {
    Poison,
    Slow,
    Fire,
    Shield,
    SpeedBoost,
}

impl EffectKind {
    /// Periodic damage for damage-over-time effects: (damage, period in ticks)
    pub fn tick_damage(self) -> Option<(f32, u32)> {
        match self {
            EffectKind::Poison => Some((2.0, 30)),
            EffectKind::Fire => Some((3.0, 20)),
            _ => None,
        }
    }
}

/// One active effect: remaining duration plus the periodic pulse countdown
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusEntry {
    pub remaining: u32,
    pub pulse_in: u32,
}

/// A damage pulse produced by ticking the ledger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusPulse {
    pub kind: EffectKind,
    pub damage: f32,
}

/// Active status effects on a single entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusLedger {
    effects: BTreeMap<EffectKind, StatusEntry>,
}

impl StatusLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or refresh an effect. Refreshing resets both the duration and
    /// the pulse countdown.
    pub fn apply(&mut self, kind: EffectKind, duration: u32) {
        let pulse_in = kind.tick_damage().map(|(_, period)| period).unwrap_or(0);
        self.effects.insert(
            kind,
            StatusEntry {
                remaining: duration,
                pulse_in,
            },
        );
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Advance all effects by one tick, returning any damage pulses due.
    ///
    /// The pulse countdown decrements before being checked, so an effect with
    /// period 30 pulses on ticks 30, 60, 90... and a 300-tick poison deals
    /// exactly 10 pulses before expiring.
    pub fn tick(&mut self) -> Vec<StatusPulse> {
        let mut pulses = Vec::new();
        for (&kind, entry) in self.effects.iter_mut() {
            entry.remaining = entry.remaining.saturating_sub(1);
            if let Some((damage, period)) = kind.tick_damage() {
                entry.pulse_in = entry.pulse_in.saturating_sub(1);
                if entry.pulse_in == 0 {
                    pulses.push(StatusPulse { kind, damage });
                    entry.pulse_in = period;
                }
            }
        }
        self.effects.retain(|_, entry| entry.remaining > 0);
        pulses
    }

    /// Combined movement speed multiplier from active effects
    pub fn speed_multiplier(&self) -> f32 {
        let mut mult = 1.0;
        if self.has(EffectKind::Slow) {
            mult *= 0.5;
        }
        if self.has(EffectKind::SpeedBoost) {
            mult *= 1.5;
        }
        mult
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poison_full_duration_pulse_count() {
        let mut ledger = StatusLedger::new();
        ledger.apply(EffectKind::Poison, 300);

        let mut total = 0.0;
        let mut pulses = 0;
        for _ in 0..300 {
            for pulse in ledger.tick() {
                total += pulse.damage;
                pulses += 1;
            }
        }
        assert_eq!(pulses, 10);
        assert!((total - 20.0).abs() < 1e-5);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_fire_pulses_every_20_ticks() {
        let mut ledger = StatusLedger::new();
        ledger.apply(EffectKind::Fire, 60);

        let mut pulses = Vec::new();
        for t in 1..=60 {
            for pulse in ledger.tick() {
                pulses.push((t, pulse.damage));
            }
        }
        assert_eq!(pulses, vec![(20, 3.0), (40, 3.0), (60, 3.0)]);
    }

    #[test]
    fn test_reapply_refreshes_instead_of_stacking() {
        let mut ledger = StatusLedger::new();
        ledger.apply(EffectKind::Slow, 10);
        for _ in 0..5 {
            ledger.tick();
        }
        ledger.apply(EffectKind::Slow, 10);
        for _ in 0..9 {
            ledger.tick();
            assert!(ledger.has(EffectKind::Slow));
        }
        ledger.tick();
        assert!(!ledger.has(EffectKind::Slow));
    }

    #[test]
    fn test_speed_multiplier_combines() {
        let mut ledger = StatusLedger::new();
        assert_eq!(ledger.speed_multiplier(), 1.0);
        ledger.apply(EffectKind::Slow, 100);
        assert_eq!(ledger.speed_multiplier(), 0.5);
        ledger.apply(EffectKind::SpeedBoost, 100);
        assert_eq!(ledger.speed_multiplier(), 0.75);
    }

    #[test]
    fn test_shield_has_no_pulse_damage() {
        let mut ledger = StatusLedger::new();
        ledger.apply(EffectKind::Shield, 120);
        for _ in 0..120 {
            assert!(ledger.tick().is_empty());
        }
        assert!(!ledger.has(EffectKind::Shield));
    }
}
