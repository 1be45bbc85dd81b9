//! Greedy autopilot that plays a game headlessly

use crate::board::Hex;
use crate::cell::Cell;
use crate::game::{Action, Game, GameState};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Added to the score of a cell next to an enemy
const UNSAFE_PENALTY: u32 = 1_000;

/// Score for a cell with no route to the exit
const NO_ROUTE: u32 = 500;

// ============================================================================
// AUTOPILOT
// ============================================================================

/// Outcome of an autopilot run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Floor the run ended on
    pub floor: u32,
    pub floors_cleared: u32,
    pub turns: u32,
    pub final_state: GameState,
    pub teleports_left: u32,
}

/// Picks the move that gets closest to the exit without ending next to an
/// enemy, grabbing the crystal or exit directly whenever the board is safe.
pub struct Autopilot {
    rng: ChaCha8Rng,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(42)
    }
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Best action for the current position, `None` if nothing is legal
    pub fn best_action(&mut self, game: &Game) -> Option<Action> {
        if game.state() != GameState::Playing {
            return None;
        }

        let player = game.player_cell();
        let exit = game.exit_hex();

        if game.is_safe() {
            let targets = [game.crystal_hex(), Some(exit)];
            if let Some(target) = targets
                .into_iter()
                .flatten()
                .find(|&t| !player.path_to(t).is_empty())
            {
                return Some(Action::FastMove(target));
            }
        }

        let mut steps: Vec<(u32, Hex)> = player
            .neighbors()
            .into_iter()
            .filter(|cell| cell.is_enterable())
            .map(|cell| (score_cell(&cell, exit), cell.hex()))
            .collect();

        // Shuffle first so the stable sort breaks ties randomly
        steps.shuffle(&mut self.rng);
        steps.sort_by_key(|&(score, _)| score);

        let best = steps.first().copied();
        let all_unsafe = best.map_or(true, |(score, _)| score >= UNSAFE_PENALTY);

        if all_unsafe && game.num_teleports() > 0 {
            if let Some(dest) = self.teleport_target(game) {
                return Some(Action::Teleport(dest));
            }
        }

        best.map(|(_, hex)| Action::Step(hex))
    }

    /// Safe enterable cell in teleport range closest to the exit
    fn teleport_target(&mut self, game: &Game) -> Option<Hex> {
        let exit = game.exit_hex();
        let mut options: Vec<(u32, Hex)> = game
            .player_cell()
            .circle(game.config().teleport_range)
            .into_iter()
            .filter(|cell| cell.is_enterable() && cell.is_safe())
            .map(|cell| (score_cell(&cell, exit), cell.hex()))
            .collect();
        options.shuffle(&mut self.rng);
        options.sort_by_key(|&(score, _)| score);
        options.first().map(|&(_, hex)| hex)
    }

    /// Play until the floor ends or `max_turns` actions have been taken.
    ///
    /// Returns the number of turns played.
    pub fn play_floor(&mut self, game: &mut Game, max_turns: u32) -> u32 {
        let mut turns = 0;
        while game.state() == GameState::Playing && turns < max_turns {
            let Some(action) = self.best_action(game) else {
                debug!(floor = game.floor(), "no legal action");
                break;
            };
            match game.apply(action) {
                Ok(_) => turns += 1,
                Err(e) => {
                    warn!("autopilot chose an illegal action {:?}: {}", action, e);
                    break;
                }
            }
        }
        turns
    }

    /// Play floors until the run ends, `max_floors` are cleared or a floor
    /// exceeds `max_turns`.
    pub fn play_game(&mut self, game: &mut Game, max_floors: u32, max_turns: u32) -> RunSummary {
        let mut floors_cleared = 0;
        let mut turns = 0;

        loop {
            turns += self.play_floor(game, max_turns);
            if game.state() != GameState::Success {
                break;
            }
            floors_cleared += 1;
            if floors_cleared >= max_floors {
                break;
            }
            game.next_floor();
        }

        if game.state() == GameState::Final {
            floors_cleared += 1;
        }

        RunSummary {
            floor: game.floor(),
            floors_cleared,
            turns,
            final_state: game.state(),
            teleports_left: game.num_teleports(),
        }
    }
}

/// Lower is better: remaining path length to the exit, plus a penalty when
/// the cell touches an enemy
fn score_cell(cell: &Cell<'_>, exit: Hex) -> u32 {
    if cell.hex() == exit {
        return 0;
    }
    let route = cell.path_to(exit).len();
    let distance = if route == 0 { NO_ROUTE } else { route as u32 };
    if cell.is_safe() {
        distance
    } else {
        distance + UNSAFE_PENALTY
    }
}
