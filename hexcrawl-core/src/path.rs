//! Shortest paths over the hex grid
//!
//! Uniform-cost search (Dijkstra with unit edges). The start and goal may sit
//! on any tile, but every intermediate step must be pathable: empty terrain
//! with no player, enemy, exit or crystal on it.

use crate::board::Hex;
use crate::cell::Cell;
use crate::game::Game;
use crate::grid::Grid;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Cost of moving between adjacent hexes
const STEP_COST: u32 = 1;

/// Path from `start` (exclusive) to `goal` (inclusive) on the game board.
///
/// Returns an empty vector when the goal cannot be reached, when either end
/// is off the board, or when `start == goal`.
pub fn shortest_path(game: &Game, start: Hex, goal: Hex) -> Vec<Hex> {
    shortest_path_where(game.grid(), start, goal, |hex| Cell::new(game, hex).is_pathable())
}

/// Same search with the intermediate-step rule supplied by the caller
pub(crate) fn shortest_path_where<F>(grid: &Grid, start: Hex, goal: Hex, passable: F) -> Vec<Hex>
where
    F: Fn(Hex) -> bool,
{
    let (Some(start_index), Some(goal_index)) = (grid.index_of(start), grid.index_of(goal)) else {
        return Vec::new();
    };
    if start_index == goal_index {
        return Vec::new();
    }

    // Walkability is fixed for the whole search
    let walkable: Vec<bool> = grid.hexes().map(passable).collect();

    let mut dist = vec![u32::MAX; grid.len()];
    let mut prev: Vec<Option<usize>> = vec![None; grid.len()];
    dist[start_index] = 0;

    let mut heap: BinaryHeap<Reverse<(u32, usize)>> = BinaryHeap::new();
    heap.push(Reverse((0, start_index)));

    while let Some(Reverse((cost, index))) = heap.pop() {
        if index == goal_index {
            break;
        }
        if cost != dist[index] {
            continue;
        }

        for neighbor in grid.hex_at(index).neighbors() {
            let Some(next) = grid.index_of(neighbor) else {
                continue;
            };
            let traversable = next == start_index || next == goal_index || walkable[next];
            if !traversable {
                continue;
            }

            let new_cost = cost + STEP_COST;
            if new_cost < dist[next] {
                dist[next] = new_cost;
                prev[next] = Some(index);
                heap.push(Reverse((new_cost, next)));
            }
        }
    }

    if prev[goal_index].is_none() {
        return Vec::new();
    }

    let mut path = Vec::with_capacity(dist[goal_index] as usize);
    let mut current = goal_index;
    while current != start_index {
        path.push(grid.hex_at(current));
        match prev[current] {
            Some(p) => current = p,
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ring, rings, DIRECTIONS};
    use crate::cell::Tile;
    use crate::config::GameConfig;

    fn open_grid() -> Grid {
        Grid::hexagon(Hex::ORIGIN, 8)
    }

    /// Search using terrain only
    fn terrain_path(grid: &Grid, start: Hex, goal: Hex) -> Vec<Hex> {
        shortest_path_where(grid, start, goal, |hex| grid.get(hex) == Some(Tile::Empty))
    }

    fn assert_valid_path(grid: &Grid, start: Hex, goal: Hex, path: &[Hex]) {
        assert_eq!(path.last(), Some(&goal));
        let mut previous = start;
        for (i, &step) in path.iter().enumerate() {
            assert_eq!(previous.distance(step), 1, "step {} is not adjacent", i);
            if i + 1 < path.len() {
                assert_eq!(grid.get(step), Some(Tile::Empty), "step {} is blocked", i);
            }
            previous = step;
        }
    }

    #[test]
    fn test_minimal_on_open_board() {
        let grid = open_grid();
        let pairs = [
            (Hex::ORIGIN, Hex::axial(3, -1)),
            (Hex::axial(0, 8), Hex::axial(0, -8)),
            (Hex::axial(-8, 4), Hex::axial(5, 2)),
            (Hex::axial(2, 2), Hex::axial(2, 3)),
        ];
        for (start, goal) in pairs {
            let path = terrain_path(&grid, start, goal);
            assert_eq!(path.len() as i32, start.distance(goal));
            assert_valid_path(&grid, start, goal, &path);
        }
    }

    #[test]
    fn test_same_cell_is_empty() {
        let grid = open_grid();
        assert!(terrain_path(&grid, Hex::ORIGIN, Hex::ORIGIN).is_empty());
    }

    #[test]
    fn test_off_board_is_empty() {
        let grid = open_grid();
        assert!(terrain_path(&grid, Hex::ORIGIN, Hex::axial(9, 0)).is_empty());
    }

    #[test]
    fn test_routes_around_wall() {
        let mut grid = open_grid();
        // Wall across the middle with a gap at the west edge
        for q in -7..=8 {
            grid.set(Hex::axial(q, -q / 2), Tile::Pillar);
        }
        let start = Hex::axial(0, 4);
        let goal = Hex::axial(0, -4);
        let path = terrain_path(&grid, start, goal);
        assert!(!path.is_empty());
        assert!(path.len() as i32 > start.distance(goal));
        assert_valid_path(&grid, start, goal, &path);
    }

    #[test]
    fn test_enclosed_goal_is_unreachable() {
        let mut grid = open_grid();
        let goal = Hex::axial(2, -1);
        for hex in ring(goal, 1) {
            grid.set(hex, Tile::Barrier);
        }
        assert!(terrain_path(&grid, Hex::axial(-5, 5), goal).is_empty());
    }

    #[test]
    fn test_endpoints_may_be_blocked() {
        let mut grid = open_grid();
        let start = Hex::ORIGIN;
        let goal = DIRECTIONS[2] * 3;
        grid.set(start, Tile::Pillar);
        grid.set(goal, Tile::Pillar);
        let path = terrain_path(&grid, start, goal);
        assert_eq!(path.len(), 3);
        assert_valid_path(&grid, start, goal, &path);
    }

    #[test]
    fn test_never_passes_through_obstacles() {
        let mut grid = open_grid();
        for hex in rings(Hex::ORIGIN, 0, 3) {
            grid.set(hex, Tile::Pillar);
        }
        let start = Hex::axial(-4, 0);
        let goal = Hex::axial(4, 0);
        let path = terrain_path(&grid, start, goal);
        assert!(!path.is_empty());
        assert_valid_path(&grid, start, goal, &path);
    }

    #[test]
    fn test_occupants_block_intermediate_steps() {
        let mut game = Game::with_config(GameConfig::default().with_seed(3)).unwrap();
        game.clear_floor();
        let start = Hex::axial(0, 2);
        let goal = Hex::axial(0, -2);
        game.spawn_enemy(Hex::ORIGIN);
        game.place_crystal(Hex::axial(0, -1));

        let path = shortest_path(&game, start, goal);
        assert_eq!(path.last(), Some(&goal));
        assert!(path.len() as i32 > start.distance(goal));
        for &step in &path[..path.len() - 1] {
            assert!(game.cell(step).unwrap().is_pathable(), "path crosses {:?}", step);
        }
    }

    #[test]
    fn test_occupied_goal_is_reachable() {
        let mut game = Game::with_config(GameConfig::default().with_seed(3)).unwrap();
        game.clear_floor();
        let enemy = Hex::axial(2, 0);
        game.spawn_enemy(enemy);
        let path = shortest_path(&game, Hex::ORIGIN, enemy);
        assert_eq!(path.len(), 2);
        assert_eq!(path.last(), Some(&enemy));
    }
}
