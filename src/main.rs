//! Headless demo runner
//!
//! Loads the persistent profile, plays a scripted run of the simulation and
//! banks the earned cubes back into the profile. Useful for balance checks
//! and as a smoke test of the full tick loop without a renderer.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use glam::Vec2;

use boss_rush::sim::{GamePhase, GameState, TickInput, tick};
use boss_rush::{Profile, consts};

const MAX_DEMO_TICKS: u64 = consts::TICK_RATE as u64 * 300;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let profile_path = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "boss-rush-profile.json".to_string()),
    );
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xB0551234);

    let mut profile = Profile::load_or_default(&profile_path);
    let mut state = GameState::new(
        seed,
        profile.derived_stats(),
        profile.unlocked_weapons().collect(),
        profile.selected_weapon,
    );
    state.start_run();

    while state.phase != GamePhase::GameOver && state.time_ticks < MAX_DEMO_TICKS {
        let input = scripted_input(&state);
        tick(&mut state, &input);
    }

    log::info!(
        "demo finished: score {}, {} bosses down, {:.0} damage dealt, {} cubes earned",
        state.score,
        state.stats.waves_cleared,
        state.stats.damage_dealt,
        state.stats.cubes_earned
    );

    profile.cubes += state.stats.cubes_earned;
    if let Err(err) = profile.save(&profile_path) {
        log::error!("failed to save profile to {}: {err}", profile_path.display());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Strafe across the bottom of the field, firing constantly and using the
/// special whenever it comes off cooldown
fn scripted_input(state: &GameState) -> TickInput {
    let strafe = if (state.time_ticks / 120) % 2 == 0 {
        1.0
    } else {
        -1.0
    };
    TickInput {
        movement: Vec2::new(strafe, 0.0),
        fire: true,
        special: state.player.special_cooldown == 0 && !state.player.special_active,
        ..Default::default()
    }
}
