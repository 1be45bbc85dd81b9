//! HEXCRAWL CLI - Command-line interface
//!
//! Commands:
//! - play: Run the autopilot through one or more floors
//! - board: Lay out a floor and dump it
//! - config: Write the default configuration

mod board_cmd;
mod config_cmd;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexcrawl")]
#[command(about = "HEXCRAWL hex-grid escape puzzle, played headless")]
struct Cli {
    /// Random seed for floor generation and the autopilot
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the autopilot and print a JSON summary
    Play(play_cmd::PlayArgs),
    /// Lay out a floor and print it
    Board(board_cmd::BoardArgs),
    /// Write the default configuration as JSON
    Config(config_cmd::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Board(args) => board_cmd::run(args, cli.seed),
        Commands::Config(args) => config_cmd::run(args),
    }
}
