//! Game state module - one play session
//!
//! Ties the board, reconciliation and the animation controller together. A turn
//! runs in three steps:
//!
//! 1. [`GameState::apply_move`] simulates the move, reconciles it into events
//!    and starts the move animation. The board is not touched yet.
//! 2. When the move animation completes, [`GameState::tick`] commits the grid,
//!    adds the score gain, spawns a tile and starts the spawn animation.
//! 3. When the spawn animation completes the turn is finished: win and loss are
//!    checked and a [`TurnEvent`] is recorded for observers.
//!
//! The authoritative grid therefore never changes while a move is on screen.

use tracing::{debug, info, warn};

use crate::animation::{AnimationController, AnimationKind, VisualTile};
use crate::config::GameConfig;
use crate::core::{reconcile, verify, Board, MoveResult, SaveBundle, SaveError};
use crate::snapshot::{GameSnapshot, TileSnapshot};
use crate::types::{Direction, Pos};

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    /// A 2048 tile appeared; the next input acknowledges it and play continues
    Won,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::GameOver => "game_over",
        }
    }
}

/// Summary of a finished turn (consumed by observers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnEvent {
    pub direction: Direction,
    pub score_gain: u32,
    pub spawned: Option<(Pos, u32)>,
    pub status: GameStatus,
}

/// A move waiting for its animation to finish
#[derive(Debug, Clone, Copy)]
struct PendingTurn {
    direction: Direction,
    result: MoveResult,
    spawned: Option<(Pos, u32)>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    animator: AnimationController,
    status: GameStatus,
    username: String,
    /// Set once the win has been reported; a game only wins once
    win_seen: bool,
    pending: Option<PendingTurn>,
    /// Number of finished turns in this game
    turns: u32,
    last_event: Option<TurnEvent>,
}

impl GameState {
    /// Create a session; call [`start`](Self::start) to deal the opening tiles
    pub fn new(config: &GameConfig, username: impl Into<String>) -> Self {
        Self {
            board: Board::new(config.seed),
            animator: AnimationController::new(config.timing, config.layout),
            status: GameStatus::Playing,
            username: username.into(),
            win_seen: false,
            pending: None,
            turns: 0,
            last_event: None,
        }
    }

    /// Rebuild a session from a persistence bundle
    pub fn restore(bundle: &SaveBundle, config: &GameConfig) -> Result<Self, SaveError> {
        let mut state = Self::new(config, bundle.username.clone());
        bundle.restore_into(&mut state.board)?;
        state.win_seen = state.board.has_won();
        if state.board.is_game_over() {
            state.status = GameStatus::GameOver;
        }
        info!(
            username = %state.username,
            score = state.board.score(),
            "game restored"
        );
        Ok(state)
    }

    /// Start a fresh game: clear the board, deal two tiles, drop any animation
    pub fn start(&mut self) {
        self.animator.stop();
        self.board.init();
        self.status = GameStatus::Playing;
        self.win_seen = false;
        self.pending = None;
        self.turns = 0;
        self.last_event = None;
        info!(username = %self.username, seed = self.board.seed(), "new game");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn visual_tiles(&self) -> &[VisualTile] {
        self.animator.tiles()
    }

    /// Try to play `direction`.
    ///
    /// Returns true when a move animation was started (or, with nothing to
    /// animate, the move was applied directly). Input is ignored while an
    /// animation runs or after game over. In the `Won` state the input only
    /// acknowledges the win, moving to `GameOver` if no move remains.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        match self.status {
            GameStatus::GameOver => return false,
            GameStatus::Won => {
                // The winning turn may also have filled the board.
                self.status = if self.board.is_game_over() {
                    info!(score = self.board.score(), turns = self.turns, "game over");
                    GameStatus::GameOver
                } else {
                    GameStatus::Playing
                };
                return false;
            }
            GameStatus::Playing => {}
        }

        if self.animator.is_animating() {
            debug!(direction = direction.as_str(), "input ignored during animation");
            return false;
        }

        let before = *self.board.grid();
        let result = self.board.simulate_move(direction);
        if !result.changed {
            return false;
        }

        let events = reconcile(&before, &result.grid, direction);
        if let Err(err) = verify(&before, &result.grid, &events) {
            warn!(direction = direction.as_str(), error = %err, "move reconciliation incomplete");
        }

        self.pending = Some(PendingTurn {
            direction,
            result,
            spawned: None,
        });

        if !self.animator.start_move_animation(&events) {
            self.on_move_animation_complete();
        }
        true
    }

    /// Advance animations by one frame; returns true when a turn finished
    pub fn tick(&mut self, delta_secs: f32) -> bool {
        match self.animator.update(delta_secs) {
            Some(AnimationKind::Move) => self.on_move_animation_complete(),
            Some(AnimationKind::Spawn) => {
                self.finish_turn();
                true
            }
            None => false,
        }
    }

    /// Take and clear the last finished turn
    pub fn take_last_event(&mut self) -> Option<TurnEvent> {
        self.last_event.take()
    }

    /// Commit the pending move and spawn; returns true when the turn finished
    /// here because there was no spawn to animate
    fn on_move_animation_complete(&mut self) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };

        self.board.commit_grid(pending.result.grid);
        self.board.add_score(pending.result.score_gain);

        let spawned = self.board.spawn_new_tile();
        pending.spawned = spawned;

        if let Some((pos, value)) = spawned {
            if self
                .animator
                .start_spawn_animation(pos.row as usize, pos.col as usize, value)
            {
                return false;
            }
        }
        self.finish_turn();
        true
    }

    fn finish_turn(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        if self.board.has_won() && !self.win_seen {
            self.win_seen = true;
            self.status = GameStatus::Won;
            info!(score = self.board.score(), "reached 2048");
        } else if self.board.is_game_over() {
            self.status = GameStatus::GameOver;
            info!(score = self.board.score(), turns = self.turns + 1, "game over");
        }

        self.turns += 1;
        self.last_event = Some(TurnEvent {
            direction: pending.direction,
            score_gain: pending.result.score_gain,
            spawned: pending.spawned,
            status: self.status,
        });
        debug!(
            direction = pending.direction.as_str(),
            gain = pending.result.score_gain,
            score = self.board.score(),
            status = self.status.as_str(),
            "turn finished"
        );
    }

    /// Persistence bundle for the current board
    pub fn save_bundle(&self) -> SaveBundle {
        SaveBundle::from_board(self.username.clone(), &self.board)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid = *self.board.grid();
        out.score = self.board.score();
        out.status = self.status;
        out.animating = self.animator.is_animating();
        out.spawning = self.animator.is_spawning_animation();
        out.tiles.clear();
        out.tiles
            .extend(self.animator.tiles().iter().map(TileSnapshot::from));
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default(), "player")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Grid;

    fn state_with(rows: [[u32; 4]; 4]) -> GameState {
        let mut state = GameState::default();
        state.board.set_grid(Grid::from_rows(rows));
        state
    }

    fn run_until_idle(state: &mut GameState) {
        for _ in 0..100 {
            state.tick(0.05);
            if !state.is_animating() {
                return;
            }
        }
        panic!("animation never finished");
    }

    #[test]
    fn test_new_state() {
        let state = GameState::default();
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.score(), 0);
        assert_eq!(state.turns(), 0);
        assert!(!state.is_animating());
    }

    #[test]
    fn test_start_deals_two_tiles() {
        let mut state = GameState::default();
        state.start();
        assert_eq!(state.board().grid().tile_count(), 2);
    }

    #[test]
    fn test_grid_untouched_during_move_animation() {
        let mut state = state_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = *state.board().grid();

        assert!(state.apply_move(Direction::Left));
        assert!(state.is_animating());
        state.tick(0.05);
        assert_eq!(*state.board().grid(), before);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_input_ignored_while_animating() {
        let mut state = state_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(state.apply_move(Direction::Left));
        assert!(!state.apply_move(Direction::Right));
    }

    #[test]
    fn test_noop_move_rejected() {
        let mut state = state_with([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(!state.apply_move(Direction::Left));
        assert!(!state.apply_move(Direction::Up));
        assert!(!state.is_animating());
    }

    #[test]
    fn test_turn_commits_scores_and_spawns() {
        let mut state = state_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        state.apply_move(Direction::Left);
        run_until_idle(&mut state);

        assert_eq!(state.score(), 4);
        assert_eq!(state.board().value(0, 0), Some(4));
        assert_eq!(state.board().grid().tile_count(), 2);
        assert_eq!(state.turns(), 1);

        let event = state.take_last_event().unwrap();
        assert_eq!(event.direction, Direction::Left);
        assert_eq!(event.score_gain, 4);
        assert!(event.spawned.is_some());
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_win_reported_once() {
        let mut state = state_with([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]);
        state.apply_move(Direction::Left);
        run_until_idle(&mut state);
        assert_eq!(state.status(), GameStatus::Won);

        // The acknowledging input does not move tiles.
        let grid = *state.board().grid();
        assert!(!state.apply_move(Direction::Right));
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(*state.board().grid(), grid);

        assert!(state.apply_move(Direction::Right));
        run_until_idle(&mut state);
        assert_ne!(state.status(), GameStatus::Won);
    }

    #[test]
    fn test_winning_turn_that_locks_the_board_ends_the_game() {
        let mut state = state_with([
            [1024, 1024, 8, 16],
            [8, 16, 32, 64],
            [16, 32, 64, 128],
            [32, 64, 128, 256],
        ]);
        assert!(state.apply_move(Direction::Left));
        run_until_idle(&mut state);
        assert_eq!(state.status(), GameStatus::Won);
        assert!(state.board().is_game_over());

        assert!(!state.apply_move(Direction::Up));
        assert_eq!(state.status(), GameStatus::GameOver);
        assert!(!state.apply_move(Direction::Down));
        assert_eq!(state.status(), GameStatus::GameOver);
    }

    #[test]
    fn test_game_over_blocks_input() {
        let mut state = state_with([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        state.status = GameStatus::GameOver;
        assert!(!state.apply_move(Direction::Left));
    }

    #[test]
    fn test_snapshot_reports_tiles_while_animating() {
        let mut state = state_with([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        state.apply_move(Direction::Left);
        state.tick(0.1);

        let snap = state.snapshot();
        assert!(snap.animating);
        assert!(!snap.spawning);
        assert_eq!(snap.tiles.len(), 1);
        assert_eq!(state.visual_tiles().len(), 1);
        assert!(state.visual_tiles()[0].is_moving());
        assert!(snap.tiles[0].position.x < 330.0);
        assert_eq!(snap.grid.get(0, 3), Some(2));
    }
}
