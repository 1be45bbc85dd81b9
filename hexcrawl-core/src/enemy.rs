//! Pursuing enemies

use crate::board::Hex;
use crate::cell::Cell;
use crate::game::Game;
use crate::path::shortest_path;
use serde::{Deserialize, Serialize};

/// An enemy token. Moves one step along its shortest path each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    hex: Hex,
}

impl Enemy {
    pub fn new(hex: Hex) -> Self {
        Self { hex }
    }

    pub fn hex(&self) -> Hex {
        self.hex
    }

    pub(crate) fn move_to(&mut self, hex: Hex) {
        self.hex = hex;
    }

    pub fn cell<'a>(&self, game: &'a Game) -> Option<Cell<'a>> {
        game.cell(self.hex)
    }

    /// True when no path from this enemy to the player remains
    pub fn is_defeated(&self, game: &Game) -> bool {
        let player = game.player_hex();
        self.hex != player && shortest_path(game, self.hex, player).is_empty()
    }
}
