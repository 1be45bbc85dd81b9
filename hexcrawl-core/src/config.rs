//! Game configuration

use crate::board::BOARD_RADIUS;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Floor that ends the game when its exit is reached
pub const FINAL_FLOOR: u32 = 10;

/// Teleport destinations must lie fewer than this many steps from the player
pub const TELEPORT_RANGE: i32 = 4;

/// Tunable constants for a game session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board radius (the outermost ring holds the player and exit)
    pub board_radius: i32,
    /// Floor whose exit ends the session
    pub final_floor: u32,
    /// Radius of the teleport circle (half-open)
    pub teleport_range: i32,
    /// Choices for the inner radius of the pillar annulus
    pub pillar_inner: Vec<i32>,
    /// Choices for the outer (exclusive) radius of the pillar annulus
    pub pillar_outer: Vec<i32>,
    /// Random seed for floor generation (None = entropy)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_radius: BOARD_RADIUS,
            final_floor: FINAL_FLOOR,
            teleport_range: TELEPORT_RANGE,
            pillar_inner: vec![0, 1],
            pillar_outer: vec![2, 3],
            seed: None,
        }
    }
}

impl GameConfig {
    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_final_floor(mut self, final_floor: u32) -> Self {
        self.final_floor = final_floor;
        self
    }

    pub fn with_board_radius(mut self, board_radius: i32) -> Self {
        self.board_radius = board_radius;
        self
    }

    /// Reject values that would break board setup
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.board_radius < 1 {
            bail!("board_radius must be at least 1, got {}", self.board_radius);
        }
        if self.final_floor < 1 {
            bail!("final_floor must be at least 1");
        }
        if self.teleport_range < 1 {
            bail!("teleport_range must be at least 1, got {}", self.teleport_range);
        }
        if self.pillar_inner.is_empty() || self.pillar_outer.is_empty() {
            bail!("pillar radius choices must not be empty");
        }
        if self.pillar_inner.iter().any(|&r| r < 0) {
            bail!("pillar_inner radii must be non-negative");
        }
        // Pillars stay strictly inside the ring holding the player and exit
        if let Some(&outer) = self.pillar_outer.iter().find(|&&r| r > self.board_radius) {
            bail!(
                "pillar_outer radius {} reaches past board radius {}",
                outer,
                self.board_radius
            );
        }
        Ok(())
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
