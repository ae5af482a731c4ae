//! Save module - the persistence bundle
//!
//! A [`SaveBundle`] is what the core hands to the persistence collaborator:
//! player name, score and the 16 grid cells in row-major order. Where and how it
//! is written to disk is up to the collaborator; the core only offers a JSON
//! encoding and validates tiles on the way back in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;
use crate::types::{is_valid_tile, Grid, CELL_COUNT};

/// Errors returned when decoding or restoring a save
#[derive(Debug, Error)]
pub enum SaveError {
    /// The bundle could not be encoded or decoded.
    #[error("save bundle JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A grid cell holds a value that cannot appear in play.
    #[error("invalid tile {value} at cell {index}")]
    InvalidTile { index: usize, value: u32 },
}

/// Opaque game state handed to persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveBundle {
    pub username: String,
    pub score: u32,
    /// Row-major cell values
    pub grid: [u32; CELL_COUNT],
}

impl SaveBundle {
    pub fn new(username: impl Into<String>, score: u32, grid: &Grid) -> Self {
        Self {
            username: username.into(),
            score,
            grid: grid.to_flat(),
        }
    }

    /// Capture the board's current grid and score
    pub fn from_board(username: impl Into<String>, board: &Board) -> Self {
        Self::new(username, board.score(), board.grid())
    }

    /// Decode the grid, rejecting values that cannot appear in play
    /// (anything but 0 or a power of two between 2 and `MAX_TILE_VALUE`)
    pub fn grid(&self) -> Result<Grid, SaveError> {
        if let Some((index, &value)) = self
            .grid
            .iter()
            .enumerate()
            .find(|(_, v)| !is_valid_tile(**v))
        {
            return Err(SaveError::InvalidTile { index, value });
        }
        Ok(Grid::from_flat(self.grid))
    }

    /// Write grid and score back into `board`
    pub fn restore_into(&self, board: &mut Board) -> Result<(), SaveError> {
        board.set_grid(self.grid()?);
        board.set_score(self.score);
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_captures_board() {
        let mut board = Board::new(3);
        board.set_grid(Grid::from_rows([[2, 0, 0, 0], [0, 4, 0, 0], [0; 4], [0, 0, 0, 8]]));
        board.set_score(36);

        let bundle = SaveBundle::from_board("ann", &board);
        assert_eq!(bundle.username, "ann");
        assert_eq!(bundle.score, 36);
        assert_eq!(bundle.grid[0], 2);
        assert_eq!(bundle.grid[5], 4);
        assert_eq!(bundle.grid[15], 8);
    }

    #[test]
    fn test_restore_into_board() {
        let json = r#"{"username":"bob","score":12,"grid":[4,4,0,0,0,0,0,0,0,0,0,0,0,0,0,2]}"#;
        let bundle = SaveBundle::from_json(json).unwrap();

        let mut board = Board::new(1);
        bundle.restore_into(&mut board).unwrap();
        assert_eq!(board.score(), 12);
        assert_eq!(board.value(0, 1), Some(4));
        assert_eq!(board.value(3, 3), Some(2));
    }

    #[test]
    fn test_invalid_tile_rejected() {
        let mut bundle = SaveBundle::new("x", 0, &Grid::empty());
        bundle.grid[7] = 3;
        match bundle.grid() {
            Err(SaveError::InvalidTile { index, value }) => {
                assert_eq!(index, 7);
                assert_eq!(value, 3);
            }
            other => panic!("expected InvalidTile, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_tile_rejected() {
        let mut bundle = SaveBundle::new("x", 0, &Grid::empty());
        bundle.grid[0] = 1 << 31;
        bundle.grid[1] = 1 << 31;
        assert!(matches!(
            bundle.grid(),
            Err(SaveError::InvalidTile { index: 0, value }) if value == 1 << 31
        ));

        let mut board = Board::new(1);
        assert!(bundle.restore_into(&mut board).is_err());
        assert_eq!(*board.grid(), Grid::empty());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            SaveBundle::from_json("{\"username\":\"x\"}"),
            Err(SaveError::Json(_))
        ));
    }
}
