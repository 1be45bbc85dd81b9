//! Tile types and the per-cell view over a game

use crate::board::{line_between, rings, Hex};
use crate::game::Game;
use crate::path::shortest_path;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What occupies a tile.
///
/// The grid only ever stores terrain (`Empty`, `Pillar`, `Barrier`). The
/// player, enemies, exit and teleport crystal are tracked by position on the
/// game and folded in by [`Cell::tile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tile {
    Empty,
    Player,
    Barrier,
    Pillar,
    Teleport,
    Exit,
    Enemy,
}

impl Tile {
    /// Single character used by text dumps
    pub fn glyph(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Player => '@',
            Tile::Barrier => '#',
            Tile::Pillar => 'O',
            Tile::Teleport => '*',
            Tile::Exit => '>',
            Tile::Enemy => 'E',
        }
    }
}

/// A board cell seen through its owning game.
///
/// Everything except the stored tag is derived on each call from the current
/// board state.
#[derive(Clone, Copy)]
pub struct Cell<'a> {
    game: &'a Game,
    hex: Hex,
}

impl<'a> Cell<'a> {
    pub(crate) fn new(game: &'a Game, hex: Hex) -> Self {
        Self { game, hex }
    }

    pub fn hex(&self) -> Hex {
        self.hex
    }

    pub fn game(&self) -> &'a Game {
        self.game
    }

    /// Stored terrain tag (off-board reads as a pillar)
    pub fn tag(&self) -> Tile {
        self.game.grid().get(self.hex).unwrap_or(Tile::Pillar)
    }

    /// Tag with occupants folded in: player, then enemy, then exit, then crystal
    pub fn tile(&self) -> Tile {
        let tag = self.tag();
        if tag != Tile::Empty {
            tag
        } else if self.is_player() {
            Tile::Player
        } else if self.has_enemy() {
            Tile::Enemy
        } else if self.is_exit() {
            Tile::Exit
        } else if self.is_teleport() {
            Tile::Teleport
        } else {
            Tile::Empty
        }
    }

    pub fn is_player(&self) -> bool {
        self.game.player_hex() == self.hex
    }

    pub fn has_enemy(&self) -> bool {
        self.game.has_enemy_at(self.hex)
    }

    pub fn is_exit(&self) -> bool {
        self.game.exit_hex() == self.hex
    }

    pub fn is_teleport(&self) -> bool {
        self.game.crystal_hex() == Some(self.hex)
    }

    /// Bare empty tile: no terrain and no occupant of any kind
    pub fn is_pathable(&self) -> bool {
        self.tile() == Tile::Empty
    }

    pub fn is_empty(&self) -> bool {
        self.is_pathable()
    }

    /// The player may end a move here: open terrain with no player or enemy,
    /// so the exit and crystal count.
    pub fn is_enterable(&self) -> bool {
        self.tag() == Tile::Empty && !self.is_player() && !self.has_enemy()
    }

    /// No enemy adjacent
    pub fn is_safe(&self) -> bool {
        !self.neighbors().iter().any(Cell::has_enemy)
    }

    /// Adjacent cells that exist on the board
    pub fn neighbors(&self) -> Vec<Cell<'a>> {
        self.hex
            .neighbors()
            .into_iter()
            .filter_map(|hex| self.game.cell(hex))
            .collect()
    }

    /// On-board cells fewer than `radius` steps away, this one included
    pub fn circle(&self, radius: i32) -> Vec<Cell<'a>> {
        rings(self.hex, 0, radius)
            .into_iter()
            .filter_map(|hex| self.game.cell(hex))
            .collect()
    }

    /// The straight line towards `other`, cut before the first cell that is
    /// not a bare empty tile.
    pub fn line_to(&self, other: Hex) -> Vec<Cell<'a>> {
        line_between(self.hex, other)
            .into_iter()
            .map_while(|hex| self.game.cell(hex))
            .take_while(|cell| cell.is_pathable())
            .collect()
    }

    /// Shortest path to `other`, this cell excluded; empty when unreachable
    pub fn path_to(&self, other: Hex) -> Vec<Cell<'a>> {
        shortest_path(self.game, self.hex, other)
            .into_iter()
            .filter_map(|hex| self.game.cell(hex))
            .collect()
    }
}

impl PartialEq for Cell<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.hex == other.hex && std::ptr::eq(self.game, other.game)
    }
}

impl Eq for Cell<'_> {}

impl fmt::Debug for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("hex", &self.hex)
            .field("tile", &self.tile())
            .finish()
    }
}
