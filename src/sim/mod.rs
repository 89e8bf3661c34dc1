//! Deterministic simulation core
//!
//! Pure fixed-timestep game logic with no platform dependencies. The
//! embedding layer owns the clock: it calls [`tick`] once per frame with a
//! [`TickInput`] and renders from the state in between.

pub mod boss;
pub mod collision;
pub mod projectile;
pub mod state;
pub mod status;
pub mod tick;
pub mod weapons;

pub use boss::{Archetype, Boss};
pub use state::{GamePhase, GameState, Player, RunStats};
pub use status::{EffectKind, StatusLedger};
pub use tick::{TickInput, tick};
pub use weapons::WeaponKind;
