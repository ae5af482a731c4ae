//! Read-only view of a session for renderers.

use arrayvec::ArrayVec;

use crate::animation::{PixelPos, VisualTile};
use crate::game_state::GameStatus;
use crate::types::{Grid, CELL_COUNT};

/// One animated tile as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSnapshot {
    pub position: PixelPos,
    pub value: u32,
    pub scale: f32,
}

impl From<&VisualTile> for TileSnapshot {
    fn from(tile: &VisualTile) -> Self {
        Self {
            position: tile.current,
            value: tile.value,
            scale: tile.scale,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub score: u32,
    pub status: GameStatus,
    pub animating: bool,
    pub spawning: bool,
    pub tiles: ArrayVec<TileSnapshot, CELL_COUNT>,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: Grid::empty(),
            score: 0,
            status: GameStatus::Playing,
            animating: false,
            spawning: false,
            tiles: ArrayVec::new(),
        }
    }
}
