//! HEXCRAWL Core - Game engine
//!
//! This crate provides the core game logic for HEXCRAWL:
//! - Board geometry (hex grid with cube coordinates)
//! - Tile storage and per-cell derived state
//! - Shortest-path search for move legality and enemy pursuit
//! - Floor setup, turn resolution and the win/lose/stuck state machine
//! - A greedy autopilot for headless play

pub mod board;
pub mod grid;
pub mod cell;
pub mod enemy;
pub mod path;
pub mod game;
pub mod config;
pub mod error;
pub mod ai;

// Re-exports for convenient access
pub use board::{Hex, DIRECTIONS, BOARD_RADIUS, ring, rings, line_between};
pub use grid::Grid;
pub use cell::{Cell, Tile};
pub use enemy::Enemy;
pub use path::shortest_path;
pub use game::{Action, Game, GameState, Snapshot};
pub use config::{GameConfig, FINAL_FLOOR, TELEPORT_RANGE};
pub use error::ActionError;
pub use ai::{Autopilot, RunSummary};
