//! Board module - the authoritative grid and the move rules
//!
//! The board owns the 4x4 grid, the running score and the spawn RNG.
//! Moves are computed with [`Board::simulate_move`], which never mutates state:
//! callers animate the result first and commit it afterwards with
//! [`Board::commit_grid`].

use arrayvec::ArrayVec;
use tracing::debug;

use crate::rng::SpawnRng;
use crate::types::{Direction, Grid, Pos, CELL_COUNT, GRID_SIZE, INITIAL_TILES, WIN_VALUE};

/// Outcome of simulating one move against the current grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// Grid after compaction and merging
    pub grid: Grid,
    /// Sum of merged tile values
    pub score_gain: u32,
    /// True iff `grid` differs from the board's current grid
    pub changed: bool,
}

/// Compact and merge a single line given in scan order.
///
/// Each tile merges at most once per move, so `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]`.
/// A pair whose sum would not fit in a `u32` stays unmerged.
/// Returns the new line and the score gained.
pub fn slide_line(line: [u32; GRID_SIZE]) -> ([u32; GRID_SIZE], u32) {
    let compacted: ArrayVec<u32, GRID_SIZE> = line.into_iter().filter(|&v| v != 0).collect();

    let mut out = [0u32; GRID_SIZE];
    let mut write = 0usize;
    let mut gain = 0u32;
    let mut i = 0usize;

    while i < compacted.len() {
        let value = compacted[i];
        let merged = (i + 1 < compacted.len() && compacted[i + 1] == value)
            .then(|| value.checked_mul(2))
            .flatten();
        if let Some(merged) = merged {
            out[write] = merged;
            gain = gain.saturating_add(merged);
            // Skip the partner; it cannot merge again this pass
            i += 2;
        } else {
            out[write] = value;
            i += 1;
        }
        write += 1;
    }

    (out, gain)
}

/// The game board: grid, score and spawn RNG
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    score: u32,
    rng: SpawnRng,
}

impl Board {
    /// Create an empty board whose spawns are driven by `seed`
    pub fn new(seed: u64) -> Self {
        Self::with_rng(SpawnRng::new(seed))
    }

    /// Create an empty board with an explicit generator
    pub fn with_rng(rng: SpawnRng) -> Self {
        Self {
            grid: Grid::empty(),
            score: 0,
            rng,
        }
    }

    /// Reset grid and score, then place the opening tiles
    pub fn init(&mut self) {
        self.grid = Grid::empty();
        self.score = 0;
        for _ in 0..INITIAL_TILES {
            self.spawn_new_tile();
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Value at (row, col), None when out of bounds
    pub fn value(&self, row: usize, col: usize) -> Option<u32> {
        self.grid.get(row, col)
    }

    /// Replace the grid wholesale (used when restoring a saved game)
    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn add_score(&mut self, delta: u32) {
        self.score = self.score.saturating_add(delta);
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Compute the result of moving every tile in `direction` without mutating the board
    pub fn simulate_move(&self, direction: Direction) -> MoveResult {
        let mut grid = self.grid;
        let mut score_gain = 0u32;

        for index in 0..GRID_SIZE {
            let (line, gain) = slide_line(self.grid.line(direction, index));
            grid.set_line(direction, index, line);
            score_gain = score_gain.saturating_add(gain);
        }

        MoveResult {
            grid,
            score_gain,
            changed: grid != self.grid,
        }
    }

    /// Replace the authoritative grid with a previously simulated one
    pub fn commit_grid(&mut self, grid: Grid) {
        debug!(tiles = grid.tile_count(), max = grid.max_tile(), "grid committed");
        self.grid = grid;
    }

    /// Place a 2 (90%) or 4 (10%) on a random empty cell
    ///
    /// Returns None when the grid is full.
    pub fn spawn_new_tile(&mut self) -> Option<(Pos, u32)> {
        let empty: ArrayVec<Pos, CELL_COUNT> = self.grid.empty_cells().collect();
        let pos = empty[self.rng.pick_index(empty.len())?];
        let value = self.rng.tile_value();

        self.grid.set(pos.row as usize, pos.col as usize, value);
        debug!(row = pos.row, col = pos.col, value, "tile spawned");

        Some((pos, value))
    }

    /// True once any tile has reached 2048
    pub fn has_won(&self) -> bool {
        self.grid.max_tile() >= WIN_VALUE
    }

    /// True when the grid is full and no two neighbours can merge
    pub fn is_game_over(&self) -> bool {
        if !self.grid.is_full() {
            return false;
        }
        !self.can_merge()
    }

    /// Check rightward and downward neighbours for equal values
    fn can_merge(&self) -> bool {
        let rows = self.grid.rows();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let value = rows[row][col];
                if col + 1 < GRID_SIZE && rows[row][col + 1] == value {
                    return true;
                }
                if row + 1 < GRID_SIZE && rows[row + 1][col] == value {
                    return true;
                }
            }
        }
        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(1)
    }
}
