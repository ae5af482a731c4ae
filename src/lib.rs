//! Tile merge puzzle (workspace facade crate).
//!
//! The grid rules, reconciliation and persistence types live in
//! `tile-merge-core`, tile interpolation in `tile-merge-animation`. This crate
//! re-exports both under `tile_merge::{core, animation, types}` and adds the
//! session layer that drives a full turn: [`GameState`].

pub use tile_merge_animation as animation;
pub use tile_merge_core as core;
pub use tile_merge_types as types;

pub mod config;
pub mod game_state;
pub mod snapshot;
pub mod telemetry;

pub use config::GameConfig;
pub use game_state::{GameState, GameStatus, TurnEvent};
pub use snapshot::{GameSnapshot, TileSnapshot};
