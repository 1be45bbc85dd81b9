//! Board command - lay out a floor and dump it as text and JSON

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use hexcrawl_core::{Game, GameState, Hex};

use crate::config_cmd;

#[derive(Args)]
pub struct BoardArgs {
    /// Game config JSON file (defaults when omitted)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Floor to lay out
    #[arg(long, default_value = "1")]
    pub floor: u32,

    /// Print only the JSON snapshot
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: BoardArgs, seed: Option<u64>) -> Result<()> {
    let config = config_cmd::resolve(args.config.as_deref(), seed)?;
    if args.floor == 0 || args.floor > config.final_floor {
        bail!("floor must be between 1 and {}", config.final_floor);
    }

    let mut game = Game::with_config(config)?;
    advance_to_floor(&mut game, args.floor);
    tracing::info!(
        "Floor {}: {} enemies, crystal at {:?}",
        game.floor(),
        game.enemies().len(),
        game.crystal_hex()
    );

    if !args.json {
        println!("{}", render(&game));
    }
    println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    Ok(())
}

/// Regenerate floors until `floor` is reached
fn advance_to_floor(game: &mut Game, floor: u32) {
    while game.floor() < floor {
        let exit = game.exit_hex();
        // Moving onto the exit by hand is the only way to a Success state
        if game.relocate_player(exit).is_err() || game.end_turn() != GameState::Success {
            break;
        }
        game.next_floor();
    }
}

/// Text dump of the board, one row of hexes per line
fn render(game: &Game) -> String {
    let radius = game.config().board_radius;
    let mut out = String::new();
    for r in -radius..=radius {
        out.push_str(&" ".repeat(r.unsigned_abs() as usize));
        let q_min = (-radius).max(-r - radius);
        let q_max = radius.min(-r + radius);
        for q in q_min..=q_max {
            let glyph = game
                .cell(Hex::axial(q, r))
                .map_or(' ', |cell| cell.tile().glyph());
            out.push(glyph);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}
