//! Config command - write the default configuration, and shared loading

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use hexcrawl_core::GameConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Where to write the JSON file
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    GameConfig::default()
        .save(&args.output)
        .with_context(|| format!("Failed to write config: {}", args.output.display()))?;
    tracing::info!("Wrote default config to {}", args.output.display());
    Ok(())
}

/// Config from file (or defaults) with the command-line seed applied on top
pub fn resolve(path: Option<&Path>, seed: Option<u64>) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    config.validate()?;
    Ok(config)
}
