//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the grid rules, tile spawning and move reconciliation.
//! It has no dependencies on rendering, input or file I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical spawn sequences
//! - **Testable**: Every rule is a plain function or method on plain data
//! - **Portable**: Usable from a terminal, a GUI or a headless simulator
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 grid, move simulation, spawning, win/loss detection
//! - [`rng`]: Seeded generator behind every spawn decision
//! - [`reconcile`]: Before/after diff into per-tile Move/Merge events
//! - [`leaderboard`]: Best score per player, highest first
//! - [`save`]: Persistence bundle handed to the storage collaborator
//!
//! # Game Rules
//!
//! - **Moves**: Tiles slide toward one edge; equal neighbours merge once per move
//! - **Scoring**: Each merge adds the merged tile value
//! - **Spawning**: After every effective move a 2 (90%) or 4 (10%) appears on an empty cell
//! - **Win**: A 2048 tile appears
//! - **Loss**: The grid is full and no neighbours match
//!
//! # Example
//!
//! ```
//! use tile_merge_core::{reconcile, Board};
//! use tile_merge_core::types::{Direction, Grid};
//!
//! let mut board = Board::new(12345);
//! board.set_grid(Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]));
//!
//! let before = *board.grid();
//! let result = board.simulate_move(Direction::Left);
//! assert!(result.changed);
//! assert_eq!(result.score_gain, 4);
//!
//! let events = reconcile(&before, &result.grid, Direction::Left);
//! assert_eq!(events.len(), 2);
//!
//! board.commit_grid(result.grid);
//! board.add_score(result.score_gain);
//! assert!(board.spawn_new_tile().is_some());
//! ```

pub mod board;
pub mod leaderboard;
pub mod reconcile;
pub mod rng;
pub mod save;

pub use tile_merge_types as types;

// Re-export commonly used types for convenience
pub use board::{slide_line, Board, MoveResult};
pub use leaderboard::{Leaderboard, RankEntry};
pub use reconcile::{reconcile, verify, EventList, ReconcileError};
pub use rng::SpawnRng;
pub use save::{SaveBundle, SaveError};
