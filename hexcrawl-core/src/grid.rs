//! Board storage: hex -> tile, iterated in insertion order

use crate::board::{rings, Hex};
use crate::cell::Tile;
use rustc_hash::FxHashMap;

/// Dense tile storage keyed by hex.
///
/// Hexes are assigned a stable index in insertion order; the pathfinder works
/// on these indices.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    hexes: Vec<Hex>,
    tiles: Vec<Tile>,
    index: FxHashMap<Hex, usize>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hexagonal board of the given radius centered on `center`, all empty
    pub fn hexagon(center: Hex, radius: i32) -> Self {
        let mut grid = Self::new();
        for hex in rings(center, 0, radius + 1) {
            grid.set(hex, Tile::Empty);
        }
        grid
    }

    /// Tile at hex, `None` when off the board
    pub fn get(&self, hex: Hex) -> Option<Tile> {
        self.index.get(&hex).map(|&i| self.tiles[i])
    }

    /// Insert or overwrite
    pub fn set(&mut self, hex: Hex, tile: Tile) {
        match self.index.get(&hex) {
            Some(&i) => self.tiles[i] = tile,
            None => {
                self.index.insert(hex, self.hexes.len());
                self.hexes.push(hex);
                self.tiles.push(tile);
            }
        }
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.index.contains_key(&hex)
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    pub fn index_of(&self, hex: Hex) -> Option<usize> {
        self.index.get(&hex).copied()
    }

    pub fn hex_at(&self, index: usize) -> Hex {
        self.hexes[index]
    }

    /// Every stored hex in insertion order
    pub fn hexes(&self) -> impl Iterator<Item = Hex> + '_ {
        self.hexes.iter().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Hex, Tile)> + '_ {
        self.hexes.iter().copied().zip(self.tiles.iter().copied())
    }

    /// Overwrite every stored tile
    pub fn reset(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }
}
