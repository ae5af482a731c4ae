//! Animation module - time-based tile interpolation
//!
//! Turns the per-tile events produced by reconciliation into visual tiles whose
//! positions and scales evolve with wall-clock time. This crate intentionally
//! knows nothing about how tiles are drawn; renderers read [`VisualTile`]s and
//! draw them however they like.
//!
//! # Phases
//!
//! | Tile | Sequence |
//! |------|----------|
//! | Move leg | `Moving` → `Done` |
//! | Merge leg | `Moving` → `MergingPop` (value doubled once) → `Done` |
//! | Spawn | `SpawningPop` → `Done` |
//!
//! # Example
//!
//! ```
//! use tile_merge_animation::{AnimationController, AnimationKind};
//! use tile_merge_animation::types::{Pos, SemanticEvent};
//!
//! let mut anim = AnimationController::default();
//! anim.start_move_animation(&[SemanticEvent::Move {
//!     from: Pos::new(0, 3),
//!     to: Pos::new(0, 0),
//!     value: 2,
//! }]);
//!
//! let mut finished = None;
//! while finished.is_none() {
//!     finished = anim.update(1.0 / 60.0);
//! }
//! assert_eq!(finished, Some(AnimationKind::Move));
//! assert!(!anim.is_animating());
//! ```

pub mod controller;
pub mod layout;
pub mod tile;

pub use tile_merge_types as types;

pub use controller::{AnimationController, AnimationKind};
pub use layout::{AnimationTiming, GridLayout, PixelPos};
pub use tile::{merge_pop_scale, spawn_pop_scale, TilePhase, VisualTile};
