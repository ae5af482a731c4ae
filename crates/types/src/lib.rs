//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (grid engine, reconciliation, animation, rendering).
//!
//! # Grid
//!
//! The playfield is a fixed 4x4 matrix of tile values:
//!
//! - **0** marks an empty cell
//! - every other value is a power of two, starting at 2
//! - coordinates are `(row, col)` with `(0, 0)` at the top-left
//!
//! # Timing Constants
//!
//! Animation timing values are in seconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MOVE_DURATION_SECS` | 0.2 | Slide from source cell to destination cell |
//! | `MERGE_DURATION_SECS` | 0.1 | Pop of a merged tile after it arrives |
//! | `SPAWN_DURATION_SECS` | 0.1 | Pop-in of a freshly spawned tile |
//! | `MAX_FRAME_DELTA_SECS` | 0.1 | Upper clamp for a single frame delta |
//!
//! # Examples
//!
//! ```
//! use tile_merge_types::{Direction, Grid, Pos, GRID_SIZE};
//!
//! let mut grid = Grid::empty();
//! assert!(grid.set(0, 1, 2));
//! assert_eq!(grid[Pos::new(0, 1)], 2);
//!
//! // Parse a direction (case-insensitive)
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir.line(0)[0], Pos::new(0, 0));
//! assert_eq!(GRID_SIZE, 4);
//! ```

use std::ops::Index;

/// Grid side length (4 rows, 4 columns)
pub const GRID_SIZE: usize = 4;

/// Total number of cells on the grid
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Tile value that wins the game
pub const WIN_VALUE: u32 = 2048;

/// Largest tile a 4x4 board can build (a 4 spawned into the final cell)
pub const MAX_TILE_VALUE: u32 = 1 << 17;

/// Number of tiles placed when a new game starts
pub const INITIAL_TILES: usize = 2;

/// Probability that a spawned tile is a 4 instead of a 2
pub const SPAWN_FOUR_PROBABILITY: f64 = 0.1;

/// Slide duration for moving tiles
pub const MOVE_DURATION_SECS: f32 = 0.2;

/// Pop duration for merged tiles (runs after the slide)
pub const MERGE_DURATION_SECS: f32 = 0.1;

/// Pop-in duration for spawned tiles
pub const SPAWN_DURATION_SECS: f32 = 0.1;

/// Largest frame delta accepted by the animation clock
pub const MAX_FRAME_DELTA_SECS: f32 = 0.1;

/// Peak scale reached by merge and spawn pops
pub const POP_PEAK_SCALE: f32 = 1.2;

/// Default cell edge in pixels
pub const DEFAULT_CELL_SIZE: f32 = 100.0;

/// Default gap between cells in pixels
pub const DEFAULT_CELL_PADDING: f32 = 10.0;

/// Move directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a stable order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// True for Left/Right (lines are rows), false for Up/Down (lines are columns)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Cells of line `index` in scan order.
    ///
    /// The first cell is the leading edge tiles slide toward: column 0 for Left,
    /// column 3 for Right, row 0 for Up, row 3 for Down.
    pub fn line(&self, index: usize) -> [Pos; GRID_SIZE] {
        let i = index as u8;
        let last = (GRID_SIZE - 1) as u8;
        let mut out = [Pos::new(0, 0); GRID_SIZE];
        for (k, slot) in out.iter_mut().enumerate() {
            let k = k as u8;
            *slot = match self {
                Direction::Left => Pos::new(i, k),
                Direction::Right => Pos::new(i, last - k),
                Direction::Up => Pos::new(k, i),
                Direction::Down => Pos::new(last - k, i),
            };
        }
        out
    }
}

/// A cell coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major flat index, or None when the coordinate is off the grid
    pub fn index(&self) -> Option<usize> {
        let (row, col) = (self.row as usize, self.col as usize);
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        Some(row * GRID_SIZE + col)
    }

    /// Position along a line of `direction`, counted from the leading edge
    pub fn offset_along(&self, direction: Direction) -> usize {
        let last = GRID_SIZE - 1;
        match direction {
            Direction::Left => self.col as usize,
            Direction::Right => last - self.col as usize,
            Direction::Up => self.row as usize,
            Direction::Down => last - self.row as usize,
        }
    }
}

/// True for 0 (empty) and for powers of two from 2 up to [`MAX_TILE_VALUE`]
pub fn is_valid_tile(value: u32) -> bool {
    value == 0 || ((2..=MAX_TILE_VALUE).contains(&value) && value.is_power_of_two())
}

/// The 4x4 playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    cells: [[u32; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Create a grid with every cell empty
    pub const fn empty() -> Self {
        Self {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Create from row arrays (`rows[row][col]`)
    pub const fn from_rows(rows: [[u32; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells: rows }
    }

    /// Create from a row-major flat array
    pub fn from_flat(flat: [u32; CELL_COUNT]) -> Self {
        let mut grid = Self::empty();
        for (i, value) in flat.into_iter().enumerate() {
            grid.cells[i / GRID_SIZE][i % GRID_SIZE] = value;
        }
        grid
    }

    /// Row-major flat copy of the cells
    pub fn to_flat(&self) -> [u32; CELL_COUNT] {
        let mut flat = [0; CELL_COUNT];
        for (i, slot) in flat.iter_mut().enumerate() {
            *slot = self.cells[i / GRID_SIZE][i % GRID_SIZE];
        }
        flat
    }

    pub fn rows(&self) -> &[[u32; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Get the value at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Set the value at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, value: u32) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Iterate every position in row-major order
    pub fn positions() -> impl Iterator<Item = Pos> {
        (0..CELL_COUNT).map(|i| Pos::new((i / GRID_SIZE) as u8, (i % GRID_SIZE) as u8))
    }

    /// Iterate the positions of empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        Self::positions().filter(move |&pos| self[pos] == 0)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&v| v != 0)
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v != 0).count()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values
    pub fn total(&self) -> u32 {
        self.cells.iter().flatten().sum()
    }

    /// Read line `index` of `direction` in scan order
    pub fn line(&self, direction: Direction, index: usize) -> [u32; GRID_SIZE] {
        direction.line(index).map(|pos| self[pos])
    }

    /// Write line `index` of `direction` in scan order
    pub fn set_line(&mut self, direction: Direction, index: usize, values: [u32; GRID_SIZE]) {
        for (pos, value) in direction.line(index).into_iter().zip(values) {
            self.cells[pos.row as usize][pos.col as usize] = value;
        }
    }
}

impl Index<Pos> for Grid {
    type Output = u32;

    fn index(&self, pos: Pos) -> &u32 {
        &self.cells[pos.row as usize][pos.col as usize]
    }
}

impl From<[[u32; GRID_SIZE]; GRID_SIZE]> for Grid {
    fn from(rows: [[u32; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self::from_rows(rows)
    }
}

/// Per-tile provenance of a single move.
///
/// `Move` and `Merge` legs of a merge pair carry the pre-merge (half) value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticEvent {
    Move { from: Pos, to: Pos, value: u32 },
    Merge { from: Pos, to: Pos, value: u32 },
    Spawn { at: Pos, value: u32 },
}

impl SemanticEvent {
    /// Source cell (None for spawns)
    pub fn source(&self) -> Option<Pos> {
        match *self {
            SemanticEvent::Move { from, .. } | SemanticEvent::Merge { from, .. } => Some(from),
            SemanticEvent::Spawn { .. } => None,
        }
    }

    pub fn destination(&self) -> Pos {
        match *self {
            SemanticEvent::Move { to, .. } | SemanticEvent::Merge { to, .. } => to,
            SemanticEvent::Spawn { at, .. } => at,
        }
    }

    pub fn value(&self) -> u32 {
        match *self {
            SemanticEvent::Move { value, .. }
            | SemanticEvent::Merge { value, .. }
            | SemanticEvent::Spawn { value, .. } => value,
        }
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, SemanticEvent::Merge { .. })
    }

    pub fn is_spawn(&self) -> bool {
        matches!(self, SemanticEvent::Spawn { .. })
    }
}
