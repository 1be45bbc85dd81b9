//! Play command - run the autopilot through a session
//!
//! ## Architecture
//!
//! - run() - orchestration
//! - play_session() - drives the autopilot floor by floor
//! - report() - JSON output

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use hexcrawl_core::{Autopilot, Game, RunSummary};

use crate::config_cmd;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Game config JSON file (defaults when omitted)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Stop after clearing this many floors
    #[arg(long, default_value = "10")]
    pub floors: u32,

    /// Maximum actions per floor
    #[arg(long, default_value = "300")]
    pub max_turns: u32,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Resolve the configuration
/// 2. Let the autopilot play
/// 3. Report the summary
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = config_cmd::resolve(args.config.as_deref(), seed)?;

    tracing::info!(
        "Starting session: floors={}, max_turns={}, seed={:?}",
        args.floors,
        args.max_turns,
        config.seed
    );

    let mut game = Game::with_config(config)?;
    let mut pilot = Autopilot::new(seed.unwrap_or(42));
    let summary = play_session(&mut game, &mut pilot, &args);

    report(&summary)
}

// ============================================================================
// PHASES
// ============================================================================

fn play_session(game: &mut Game, pilot: &mut Autopilot, args: &PlayArgs) -> RunSummary {
    let summary = pilot.play_game(game, args.floors, args.max_turns);
    tracing::info!(
        "Session over on floor {}: {:?} after {} turns ({} floors cleared)",
        summary.floor,
        summary.final_state,
        summary.turns,
        summary.floors_cleared
    );
    summary
}

fn report(summary: &RunSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}
