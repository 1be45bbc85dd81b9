//! Game state, floor setup and turn resolution

use crate::board::{opposite_direction, rings, Hex, DIRECTIONS};
use crate::cell::{Cell, Tile};
use crate::config::GameConfig;
use crate::enemy::Enemy;
use crate::error::ActionError;
use crate::grid::Grid;
use crate::path::shortest_path;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Direction from the center to the exit; the player starts opposite
const EXIT_DIRECTION: usize = 0;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Session state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Playing,
    /// Exit reached on a regular floor
    Success,
    /// An enemy caught the player
    Failure,
    /// No route to the exit and no teleports left
    Stuck,
    /// Exit reached on the final floor
    Final,
}

/// A player action. Each one consumes a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Walk one step along the shortest path towards `dest`
    Step(Hex),
    /// Jump straight onto the exit or crystal while no enemy can reach the player
    FastMove(Hex),
    /// Spend a teleport charge to jump within range
    Teleport(Hex),
    /// Draw a barrier line from `start` towards `end`
    Barrier { start: Hex, end: Hex },
}

/// Serializable view of a floor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub floor: u32,
    pub state: GameState,
    pub player: Hex,
    pub exit: Hex,
    pub teleport_crystal: Option<Hex>,
    pub enemies: Vec<Hex>,
    pub num_teleports: u32,
    pub pillars: Vec<Hex>,
    pub barriers: Vec<Hex>,
}

// ============================================================================
// GAME
// ============================================================================

/// Game session: the board, its occupants and the turn state machine
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    rng: ChaCha8Rng,

    player: Hex,
    exit: Hex,
    teleport_crystal: Option<Hex>,
    enemies: Vec<Enemy>,

    num_teleports: u32,
    floor: u32,
    state: GameState,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// New game with the default configuration
    pub fn new() -> Self {
        Self::build(GameConfig::default())
    }

    /// New game on floor 1. Fails when the config does not pass
    /// [`GameConfig::validate`].
    pub fn with_config(config: GameConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let grid = Grid::hexagon(Hex::ORIGIN, config.board_radius);

        let mut game = Self {
            config,
            grid,
            rng,
            player: Hex::ORIGIN,
            exit: Hex::ORIGIN,
            teleport_crystal: None,
            enemies: Vec::new(),
            num_teleports: 0,
            floor: 1,
            state: GameState::Playing,
        };
        game.reset_game();
        game
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Every board cell
    pub fn cells(&self) -> impl Iterator<Item = Cell<'_>> + '_ {
        self.grid.hexes().map(move |hex| Cell::new(self, hex))
    }

    /// Cell at hex, `None` when off the board
    pub fn cell(&self, hex: Hex) -> Option<Cell<'_>> {
        self.grid.contains(hex).then(|| Cell::new(self, hex))
    }

    pub fn player_cell(&self) -> Cell<'_> {
        Cell::new(self, self.player)
    }

    pub fn exit_cell(&self) -> Cell<'_> {
        Cell::new(self, self.exit)
    }

    pub fn teleport_crystal(&self) -> Option<Cell<'_>> {
        self.teleport_crystal.map(|hex| Cell::new(self, hex))
    }

    pub fn player_hex(&self) -> Hex {
        self.player
    }

    pub fn exit_hex(&self) -> Hex {
        self.exit
    }

    pub fn crystal_hex(&self) -> Option<Hex> {
        self.teleport_crystal
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn has_enemy_at(&self, hex: Hex) -> bool {
        self.enemies.iter().any(|e| e.hex() == hex)
    }

    pub fn num_teleports(&self) -> u32 {
        self.num_teleports
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// No enemy can currently reach the player
    pub fn is_safe(&self) -> bool {
        self.enemies.iter().all(|e| e.is_defeated(self))
    }

    /// On the final floor
    pub fn is_endgame(&self) -> bool {
        self.floor == self.config.final_floor
    }

    pub fn snapshot(&self) -> Snapshot {
        let tagged = |tile: Tile| -> Vec<Hex> {
            self.grid
                .iter()
                .filter(|&(_, t)| t == tile)
                .map(|(hex, _)| hex)
                .collect()
        };
        Snapshot {
            floor: self.floor,
            state: self.state,
            player: self.player,
            exit: self.exit,
            teleport_crystal: self.teleport_crystal,
            enemies: self.enemies.iter().map(Enemy::hex).collect(),
            num_teleports: self.num_teleports,
            pillars: tagged(Tile::Pillar),
            barriers: tagged(Tile::Barrier),
        }
    }

    // ========================================================================
    // FLOOR LIFECYCLE
    // ========================================================================

    /// Back to floor 1 with no teleports and a fresh board
    pub fn reset_game(&mut self) {
        self.floor = 1;
        self.num_teleports = 0;
        self.state = GameState::Playing;
        self.setup_board();
        info!(floor = self.floor, "game reset");
    }

    /// Advance after a success, otherwise restart from floor 1
    pub fn next_floor(&mut self) {
        if self.state == GameState::Success {
            self.floor += 1;
            self.state = GameState::Playing;
            self.setup_board();
            info!(floor = self.floor, "advanced to next floor");
        } else {
            self.reset_game();
        }
    }

    /// Lay out the current floor: exit, player, pillars, crystal, enemies
    pub fn setup_board(&mut self) {
        self.grid.reset(Tile::Empty);
        self.teleport_crystal = None;
        self.enemies.clear();

        let center = Hex::ORIGIN;
        let radius = self.config.board_radius;
        self.exit = center + DIRECTIONS[EXIT_DIRECTION] * radius;
        self.player = center + DIRECTIONS[opposite_direction(EXIT_DIRECTION)] * radius;

        if self.is_endgame() {
            self.exit = center;
            debug!(floor = self.floor, "final floor laid out");
            return;
        }

        self.place_pillars(center);

        let mut candidates = self.spawn_candidates();
        candidates.shuffle(&mut self.rng);

        self.teleport_crystal = candidates.pop();
        let num_enemies = self.floor as usize;
        for _ in 0..num_enemies {
            match candidates.pop() {
                Some(hex) => self.enemies.push(Enemy::new(hex)),
                None => break,
            }
        }

        debug!(
            floor = self.floor,
            enemies = self.enemies.len(),
            crystal = ?self.teleport_crystal,
            "floor laid out"
        );
    }

    fn place_pillars(&mut self, center: Hex) {
        let inner = self.config.pillar_inner.choose(&mut self.rng).copied().unwrap_or(0);
        let outer = self.config.pillar_outer.choose(&mut self.rng).copied().unwrap_or(0);

        for hex in rings(center, inner, outer) {
            if hex != self.player && hex != self.exit && self.grid.contains(hex) {
                self.grid.set(hex, Tile::Pillar);
            }
        }
        debug!(inner, outer, "pillars placed");
    }

    /// Empty cells not next to the player
    fn spawn_candidates(&self) -> Vec<Hex> {
        self.cells()
            .filter(|cell| cell.is_empty())
            .map(|cell| cell.hex())
            .filter(|hex| hex.distance(self.player) > 1)
            .collect()
    }

    // ========================================================================
    // TURN RESOLUTION
    // ========================================================================

    /// Resolve the turn after the player has acted.
    ///
    /// Picks up the crystal, checks the exit, moves every enemy one step in
    /// collection order (the first to reach the player ends the turn) and
    /// finally checks whether the player has sealed themselves in.
    pub fn end_turn(&mut self) -> GameState {
        if self.state != GameState::Playing {
            return self.state;
        }

        if self.teleport_crystal == Some(self.player) {
            self.num_teleports += 1;
            self.teleport_crystal = None;
            debug!(teleports = self.num_teleports, "teleport crystal collected");
        }

        if self.player == self.exit {
            self.state = if self.is_endgame() {
                GameState::Final
            } else {
                GameState::Success
            };
            info!(floor = self.floor, state = ?self.state, "exit reached");
            return self.state;
        }

        for i in 0..self.enemies.len() {
            let from = self.enemies[i].hex();
            let path = shortest_path(self, from, self.player);
            if let Some(&step) = path.first() {
                if step == self.player || Cell::new(self, step).is_empty() {
                    self.enemies[i].move_to(step);
                    debug!(enemy = i, ?from, to = ?step, "enemy moved");
                }
            }

            if self.enemies[i].hex() == self.player {
                self.state = GameState::Failure;
                info!(floor = self.floor, enemy = i, "player caught");
                return self.state;
            }
        }

        if self.num_teleports == 0 && shortest_path(self, self.player, self.exit).is_empty() {
            self.state = GameState::Stuck;
            info!(floor = self.floor, "player is stuck");
        }

        self.state
    }

    /// Tag the free prefix of the line from `start` to `end` as barrier.
    ///
    /// Returns the number of cells tagged.
    pub fn place_barrier(&mut self, start: Hex, end: Hex) -> usize {
        let line: Vec<Hex> = match self.cell(start) {
            Some(cell) => cell.line_to(end).iter().map(Cell::hex).collect(),
            None => return 0,
        };
        for &hex in &line {
            self.grid.set(hex, Tile::Barrier);
        }
        debug!(?start, ?end, placed = line.len(), "barrier placed");
        line.len()
    }

    /// Put the player on `hex` without any legality check.
    ///
    /// Callers doing their own move validation follow this with [`Game::end_turn`].
    pub fn relocate_player(&mut self, hex: Hex) -> Result<(), ActionError> {
        if !self.grid.contains(hex) {
            return Err(ActionError::OffBoard(hex));
        }
        self.player = hex;
        Ok(())
    }

    // ========================================================================
    // PLAYER ACTIONS
    // ========================================================================

    /// Validate and perform `action`, then resolve the turn.
    ///
    /// Rejected actions leave the game unchanged.
    pub fn apply(&mut self, action: Action) -> Result<GameState, ActionError> {
        if self.state != GameState::Playing {
            return Err(ActionError::NotPlaying(self.state));
        }

        match action {
            Action::Step(dest) => {
                self.player = self.check_step(dest)?;
            }
            Action::FastMove(dest) => {
                self.check_fast_move(dest)?;
                self.player = dest;
            }
            Action::Teleport(dest) => {
                self.check_teleport(dest)?;
                self.num_teleports -= 1;
                self.player = dest;
            }
            Action::Barrier { start, end } => {
                self.check_barrier(start, end)?;
                self.place_barrier(start, end);
            }
        }

        Ok(self.end_turn())
    }

    /// First step of a legal move towards `dest`
    fn check_step(&self, dest: Hex) -> Result<Hex, ActionError> {
        self.cell(dest).ok_or(ActionError::OffBoard(dest))?;
        let path = self.player_cell().path_to(dest);
        let step = path.first().ok_or(ActionError::Unreachable(dest))?;
        if !step.is_enterable() {
            return Err(ActionError::Blocked(step.hex()));
        }
        Ok(step.hex())
    }

    fn check_fast_move(&self, dest: Hex) -> Result<(), ActionError> {
        self.cell(dest).ok_or(ActionError::OffBoard(dest))?;
        if dest != self.exit && self.teleport_crystal != Some(dest) {
            return Err(ActionError::NotATarget(dest));
        }
        if !self.is_safe() {
            return Err(ActionError::Unsafe);
        }
        if self.player_cell().path_to(dest).is_empty() {
            return Err(ActionError::Unreachable(dest));
        }
        Ok(())
    }

    fn check_teleport(&self, dest: Hex) -> Result<(), ActionError> {
        if self.num_teleports == 0 {
            return Err(ActionError::NoTeleports);
        }
        let cell = self.cell(dest).ok_or(ActionError::OffBoard(dest))?;
        if dest.distance(self.player) >= self.config.teleport_range {
            return Err(ActionError::OutOfRange(dest));
        }
        if !cell.is_enterable() {
            return Err(ActionError::Blocked(dest));
        }
        Ok(())
    }

    fn check_barrier(&self, start: Hex, end: Hex) -> Result<(), ActionError> {
        let cell = self.cell(start).ok_or(ActionError::OffBoard(start))?;
        if cell.line_to(end).is_empty() {
            return Err(ActionError::EmptyBarrier);
        }
        Ok(())
    }
}

// ============================================================================
// TEST HELPERS
// ============================================================================

#[cfg(test)]
impl Game {
    /// Wipe pillars, barriers, enemies and the crystal, keeping player and exit
    pub(crate) fn clear_floor(&mut self) {
        self.grid.reset(Tile::Empty);
        self.enemies.clear();
        self.teleport_crystal = None;
    }

    pub(crate) fn spawn_enemy(&mut self, hex: Hex) {
        self.enemies.push(Enemy::new(hex));
    }

    pub(crate) fn set_tile(&mut self, hex: Hex, tile: Tile) {
        self.grid.set(hex, tile);
    }

    pub(crate) fn place_crystal(&mut self, hex: Hex) {
        self.teleport_crystal = Some(hex);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ring;

    fn seeded_game(seed: u64) -> Game {
        Game::with_config(GameConfig::default().with_seed(seed)).unwrap()
    }

    fn open_game() -> Game {
        let mut game = seeded_game(5);
        game.clear_floor();
        game
    }

    #[test]
    fn test_fresh_game() {
        let game = seeded_game(1);
        assert_eq!(game.floor(), 1);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.num_teleports(), 0);
        assert_eq!(game.enemies().len(), 1);
        assert!(game.teleport_crystal().is_some());
        assert_eq!(game.cells().count(), 217);
    }

    #[test]
    fn test_setup_invariants() {
        for seed in 0..20 {
            let game = seeded_game(seed);
            let player = game.player_hex();
            let exit = game.exit_hex();
            assert_eq!(player.distance_to_center(), 8);
            assert_eq!(exit.distance_to_center(), 8);
            assert_eq!(player.distance(exit), 16);

            let crystal = game.crystal_hex().unwrap();
            assert_ne!(crystal, player);
            assert_ne!(crystal, exit);

            let mut seen = vec![crystal];
            for enemy in game.enemies() {
                let cell = enemy.cell(&game).unwrap();
                assert_eq!(cell.tag(), Tile::Empty);
                assert!(enemy.hex().distance(player) > 1);
                assert_ne!(enemy.hex(), exit);
                assert!(!seen.contains(&enemy.hex()));
                seen.push(enemy.hex());
            }

            // Pillars form an annulus around the center
            let pillars = game.snapshot().pillars;
            assert!(!pillars.is_empty());
            assert!(pillars.iter().all(|h| h.distance_to_center() < 3));
            assert!(game.snapshot().barriers.is_empty());
        }
    }

    #[test]
    fn test_same_seed_same_floor() {
        assert_eq!(seeded_game(42).snapshot(), seeded_game(42).snapshot());
    }

    #[test]
    fn test_final_floor_layout() {
        let mut game = Game::with_config(GameConfig::default().with_seed(2).with_final_floor(1)).unwrap();
        assert!(game.is_endgame());
        assert_eq!(game.exit_hex(), Hex::ORIGIN);
        assert!(game.enemies().is_empty());
        assert!(game.crystal_hex().is_none());
        assert!(game.snapshot().pillars.is_empty());

        game.relocate_player(Hex::axial(0, 1)).unwrap();
        assert_eq!(game.apply(Action::Step(Hex::ORIGIN)), Ok(GameState::Final));

        // Final is terminal: next_floor restarts
        game.next_floor();
        assert_eq!(game.floor(), 1);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_exit_success_then_next_floor() {
        let mut game = open_game();
        let exit = game.exit_hex();
        game.relocate_player(exit.neighbor(3)).unwrap();

        assert_eq!(game.apply(Action::Step(exit)), Ok(GameState::Success));
        assert_eq!(game.player_hex(), exit);

        game.next_floor();
        assert_eq!(game.floor(), 2);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.enemies().len(), 2);
    }

    #[test]
    fn test_enemies_do_not_move_on_winning_turn() {
        let mut game = open_game();
        let exit = game.exit_hex();
        let start = exit.neighbor(3);
        game.relocate_player(start).unwrap();
        game.spawn_enemy(start.neighbor(3).neighbor(3));
        let before = game.enemies()[0];

        game.relocate_player(exit).unwrap();
        assert_eq!(game.end_turn(), GameState::Success);
        assert_eq!(game.enemies()[0], before);
    }

    #[test]
    fn test_adjacent_enemy_catches_player() {
        let mut game = open_game();
        let player = game.player_hex();
        game.spawn_enemy(player.neighbor(0));

        assert_eq!(game.end_turn(), GameState::Failure);
        assert_eq!(game.enemies()[0].hex(), player);
    }

    #[test]
    fn test_enemy_steps_towards_player() {
        let mut game = open_game();
        let player = game.player_hex();
        let far = player.neighbor(0).neighbor(0);
        game.spawn_enemy(far);

        assert_eq!(game.end_turn(), GameState::Playing);
        assert_eq!(game.enemies()[0].hex().distance(player), 1);
    }

    #[test]
    fn test_first_catch_ends_turn() {
        let mut game = open_game();
        let player = game.player_hex();
        let distant = player.neighbor(0).neighbor(0).neighbor(0);
        game.spawn_enemy(player.neighbor(0));
        game.spawn_enemy(distant);

        assert_eq!(game.end_turn(), GameState::Failure);
        assert_eq!(game.enemies()[1].hex(), distant);
    }

    #[test]
    fn test_enemies_never_share_a_cell() {
        let mut game = open_game();
        // Corridor along the SE axis, everything else walled off
        let corridor: Vec<Hex> = (0..4).map(|i| DIRECTIONS[2] * i).collect();
        let hexes: Vec<Hex> = game.grid().hexes().collect();
        for hex in hexes {
            if !corridor.contains(&hex) {
                game.set_tile(hex, Tile::Pillar);
            }
        }
        game.relocate_player(corridor[0]).unwrap();
        game.num_teleports = 1;

        // The rear enemy moves first but the front one is in its way
        game.spawn_enemy(corridor[3]);
        game.spawn_enemy(corridor[2]);

        assert_eq!(game.end_turn(), GameState::Playing);
        assert_eq!(game.enemies()[0].hex(), corridor[3]);
        assert_eq!(game.enemies()[1].hex(), corridor[1]);
    }

    #[test]
    fn test_sealed_in_is_stuck() {
        let mut game = open_game();
        let player = game.player_hex();
        for hex in ring(player, 1) {
            game.place_barrier(hex, hex);
        }
        assert_eq!(game.end_turn(), GameState::Stuck);

        game.next_floor();
        assert_eq!(game.floor(), 1);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_sealed_in_with_teleport_is_not_stuck() {
        let mut game = open_game();
        game.num_teleports = 1;
        let player = game.player_hex();
        for hex in ring(player, 1) {
            game.place_barrier(hex, hex);
        }
        assert_eq!(game.end_turn(), GameState::Playing);
    }

    #[test]
    fn test_barrier_stops_at_pillar() {
        let mut game = open_game();
        let a = Hex::axial(-2, 0);
        let b = Hex::axial(2, 0);
        game.set_tile(Hex::ORIGIN, Tile::Pillar);

        assert_eq!(game.place_barrier(a, b), 2);
        assert_eq!(game.grid().get(a), Some(Tile::Barrier));
        assert_eq!(game.grid().get(Hex::axial(-1, 0)), Some(Tile::Barrier));
        assert_eq!(game.grid().get(Hex::ORIGIN), Some(Tile::Pillar));
        assert_eq!(game.grid().get(Hex::axial(1, 0)), Some(Tile::Empty));
        assert_eq!(game.grid().get(b), Some(Tile::Empty));
    }

    #[test]
    fn test_barrier_never_covers_occupants() {
        let mut game = open_game();
        let exit = game.exit_hex();
        assert_eq!(game.place_barrier(exit, Hex::ORIGIN), 0);
        assert_eq!(game.grid().get(exit), Some(Tile::Empty));

        let player = game.player_hex();
        let start = player.neighbor(0).neighbor(0);
        assert_eq!(game.place_barrier(start, player), 2);
        assert_eq!(game.grid().get(player), Some(Tile::Empty));
    }

    #[test]
    fn test_end_turn_is_deterministic() {
        let mut a = seeded_game(17);
        let mut b = a.clone();
        // Different RNG state must not matter inside end_turn
        b.rng = ChaCha8Rng::seed_from_u64(999);
        a.end_turn();
        b.end_turn();
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_crystal_pickup() {
        let mut game = open_game();
        let player = game.player_hex();
        let crystal = player.neighbor(0);
        game.teleport_crystal = Some(crystal);

        assert_eq!(game.apply(Action::Step(crystal)), Ok(GameState::Playing));
        assert_eq!(game.num_teleports(), 1);
        assert!(game.teleport_crystal().is_none());
    }

    #[test]
    fn test_teleport_spends_charge() {
        let mut game = open_game();
        let player = game.player_hex();
        let dest = player.neighbor(0).neighbor(0).neighbor(0);

        assert_eq!(game.apply(Action::Teleport(dest)), Err(ActionError::NoTeleports));

        game.num_teleports = 1;
        let too_far = dest.neighbor(0);
        assert_eq!(game.apply(Action::Teleport(too_far)), Err(ActionError::OutOfRange(too_far)));

        assert_eq!(game.apply(Action::Teleport(dest)), Ok(GameState::Playing));
        assert_eq!(game.player_hex(), dest);
        assert_eq!(game.num_teleports(), 0);
    }

    #[test]
    fn test_fast_move_requires_safety() {
        let mut game = open_game();
        let exit = game.exit_hex();
        assert_eq!(game.apply(Action::FastMove(Hex::ORIGIN)), Err(ActionError::NotATarget(Hex::ORIGIN)));

        game.spawn_enemy(Hex::ORIGIN);
        assert_eq!(game.apply(Action::FastMove(exit)), Err(ActionError::Unsafe));

        game.enemies.clear();
        assert_eq!(game.apply(Action::FastMove(exit)), Ok(GameState::Success));
        assert_eq!(game.player_hex(), exit);
    }

    #[test]
    fn test_rejected_actions_leave_state_unchanged() {
        let mut game = seeded_game(23);
        let before = game.snapshot();
        let player = game.player_hex();

        assert!(game.apply(Action::Step(Hex::axial(20, 0))).is_err());
        assert!(game.apply(Action::Step(player)).is_err());
        assert!(game.apply(Action::Barrier { start: player, end: Hex::ORIGIN }).is_err());
        assert!(game.apply(Action::Teleport(player.neighbor(0))).is_err());
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_step_blocked_by_enemy() {
        let mut game = open_game();
        let player = game.player_hex();
        let next = player.neighbor(0);
        game.spawn_enemy(next);
        // Stepping onto the enemy itself
        assert_eq!(game.apply(Action::Step(next)), Err(ActionError::Blocked(next)));

        // The enemy is the only way out, so nothing beyond it is reachable
        let target = next.neighbor(0).neighbor(0);
        game.set_tile(player.neighbor(1), Tile::Barrier);
        game.set_tile(player.neighbor(5), Tile::Barrier);
        assert_eq!(game.apply(Action::Step(target)), Err(ActionError::Unreachable(target)));
    }

    #[test]
    fn test_enemy_routes_around_another_enemy() {
        let mut game = open_game();
        let rear = Hex::axial(0, 5);
        let front = Hex::axial(0, 6);
        game.spawn_enemy(rear);
        game.spawn_enemy(front);

        assert_eq!(game.end_turn(), GameState::Playing);
        let moved = game.enemies()[0].hex();
        assert_ne!(moved, rear);
        assert_ne!(moved, front);
        assert_eq!(moved.distance(rear), 1);
        assert_eq!(game.enemies()[1].hex(), Hex::axial(0, 7));
    }

    #[test]
    fn test_enemy_never_steps_onto_exit() {
        let mut game = open_game();
        let exit = game.exit_hex();
        // Only short route from the enemy to the player crosses the exit
        let enemy = Hex::axial(1, -8);
        game.set_tile(Hex::axial(0, -7), Tile::Pillar);
        game.relocate_player(Hex::axial(-1, -7)).unwrap();
        game.spawn_enemy(enemy);

        assert_eq!(game.end_turn(), GameState::Playing);
        assert_ne!(game.enemies()[0].hex(), exit);
        assert_eq!(game.enemies()[0].hex().distance(enemy), 1);
        assert!(!game.player_cell().path_to(enemy).iter().any(|cell| cell.is_exit()));
    }

    #[test]
    fn test_enemy_never_steps_onto_crystal() {
        let mut game = open_game();
        let crystal = Hex::axial(0, 7);
        game.place_crystal(crystal);
        game.spawn_enemy(Hex::axial(0, 6));

        // Both detours around the crystal are three steps long
        assert_eq!(game.end_turn(), GameState::Playing);
        let moved = game.enemies()[0].hex();
        assert_ne!(moved, crystal);
        assert_eq!(moved.distance(Hex::axial(0, 6)), 1);
        assert_eq!(moved.distance(game.player_hex()), 2);
        assert_eq!(game.crystal_hex(), Some(crystal));
    }

    #[test]
    fn test_stuck_when_only_route_is_through_crystal() {
        let mut game = open_game();
        game.place_crystal(Hex::axial(0, 7));
        game.set_tile(Hex::axial(1, 7), Tile::Barrier);
        game.set_tile(Hex::axial(-1, 8), Tile::Barrier);
        assert_eq!(game.end_turn(), GameState::Stuck);
    }

    #[test]
    fn test_stuck_when_only_route_is_through_enemy() {
        let mut game = open_game();
        game.set_tile(Hex::axial(1, 7), Tile::Barrier);
        game.set_tile(Hex::axial(-1, 8), Tile::Barrier);
        game.spawn_enemy(Hex::axial(0, 6));

        // The enemy closes in on (0, 7) and blocks the only way out
        assert_eq!(game.end_turn(), GameState::Stuck);
        assert_eq!(game.enemies()[0].hex(), Hex::axial(0, 7));
    }

    #[test]
    fn test_teleport_onto_crystal() {
        let mut game = open_game();
        game.num_teleports = 1;
        let crystal = game.player_hex().neighbor(0).neighbor(0);
        game.place_crystal(crystal);
        assert_eq!(game.apply(Action::Teleport(crystal)), Ok(GameState::Playing));
        assert_eq!(game.player_hex(), crystal);
        assert_eq!(game.num_teleports(), 1);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        assert!(Game::with_config(GameConfig::default().with_board_radius(0)).is_err());
        assert!(Game::with_config(GameConfig::default().with_final_floor(0)).is_err());
        assert!(Game::with_config(GameConfig::default().with_seed(1)).is_ok());
        assert_eq!(Game::new().cells().count(), 217);
    }

    #[test]
    fn test_actions_rejected_after_game_over() {
        let mut game = open_game();
        let player = game.player_hex();
        game.spawn_enemy(player.neighbor(0));
        game.end_turn();
        assert_eq!(
            game.apply(Action::Step(Hex::ORIGIN)),
            Err(ActionError::NotPlaying(GameState::Failure))
        );
    }

    #[test]
    fn test_barrier_action_ends_turn() {
        let mut game = open_game();
        let player = game.player_hex();
        game.spawn_enemy(player.neighbor(0).neighbor(0).neighbor(0));
        let state = game.apply(Action::Barrier {
            start: Hex::axial(3, -3),
            end: Hex::axial(3, 0),
        });
        assert_eq!(state, Ok(GameState::Playing));
        assert_eq!(game.snapshot().barriers.len(), 4);
        assert_eq!(game.enemies()[0].hex().distance(player), 2);
    }
}
