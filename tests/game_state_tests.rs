//! Session tests - full turns through GameState

use tile_merge::core::SaveBundle;
use tile_merge::types::{Direction, Grid};
use tile_merge::{GameConfig, GameSnapshot, GameState, GameStatus};

const FRAME: f32 = 1.0 / 60.0;

fn restored(rows: [[u32; 4]; 4], score: u32) -> GameState {
    let bundle = SaveBundle::new("tester", score, &Grid::from_rows(rows));
    GameState::restore(&bundle, &GameConfig::default()).unwrap()
}

/// Tick until the session is idle; returns the number of frames
fn settle(game: &mut GameState) -> u32 {
    let mut frames = 0;
    while game.is_animating() {
        game.tick(FRAME);
        frames += 1;
        assert!(frames < 1000, "session never went idle");
    }
    frames
}

#[test]
fn test_end_to_end_merge_turn() {
    let mut game = restored([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0);

    assert!(game.apply_move(Direction::Left));
    assert!(game.is_animating());

    let mut snap = GameSnapshot::default();
    let mut displayed_four = 0;
    let mut prev_max = 0;
    while game.is_animating() {
        game.tick(FRAME);
        game.snapshot_into(&mut snap);
        let max = snap.tiles.iter().map(|t| t.value).max().unwrap_or(0);
        if max == 4 && prev_max != 4 && !snap.spawning {
            displayed_four += 1;
        }
        if !snap.spawning {
            prev_max = max;
        }
    }
    assert_eq!(displayed_four, 1);

    assert_eq!(game.board().grid().rows()[0][0], 4);
    assert_eq!(game.score(), 4);
    // Merged tile plus one spawn.
    assert_eq!(game.board().grid().tile_count(), 2);

    let event = game.take_last_event().unwrap();
    assert_eq!(event.score_gain, 4);
    assert_eq!(event.status, GameStatus::Playing);
    let (pos, value) = event.spawned.unwrap();
    assert_eq!(game.board().value(pos.row as usize, pos.col as usize), Some(value));
}

#[test]
fn test_same_seed_same_game() {
    let config = GameConfig::default().with_seed(4242);
    let mut a = GameState::new(&config, "a");
    let mut b = GameState::new(&config, "b");
    a.start();
    b.start();

    for direction in [Direction::Left, Direction::Up, Direction::Right, Direction::Down].repeat(10) {
        let moved_a = a.apply_move(direction);
        let moved_b = b.apply_move(direction);
        assert_eq!(moved_a, moved_b);
        settle(&mut a);
        settle(&mut b);
        assert_eq!(a.board().grid(), b.board().grid());
        assert_eq!(a.score(), b.score());
    }
}

#[test]
fn test_input_ignored_until_turn_finishes() {
    let mut game = restored([[2, 0, 0, 2], [0; 4], [0; 4], [0; 4]], 0);
    assert!(game.apply_move(Direction::Left));

    while game.is_animating() {
        assert!(!game.apply_move(Direction::Right));
        game.tick(FRAME);
    }
    assert_eq!(game.turns(), 1);
    assert_eq!(game.board().value(0, 0), Some(4));
}

#[test]
fn test_grid_commits_only_after_move_animation() {
    let before = [[0, 0, 0, 8], [0; 4], [0; 4], [0; 4]];
    let mut game = restored(before, 0);
    game.apply_move(Direction::Left);

    for _ in 0..5 {
        game.tick(FRAME);
        assert_eq!(*game.board().grid(), Grid::from_rows(before));
    }
    settle(&mut game);
    assert_eq!(game.board().value(0, 0), Some(8));
}

#[test]
fn test_score_accumulates_across_turns() {
    let mut game = restored([[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]], 10);
    game.apply_move(Direction::Left);
    settle(&mut game);
    assert_eq!(game.score(), 10 + 4 + 8);
}

#[test]
fn test_restore_rejects_bad_tiles() {
    let mut bundle = SaveBundle::new("x", 0, &Grid::empty());
    bundle.grid[3] = 6;
    assert!(GameState::restore(&bundle, &GameConfig::default()).is_err());
}

#[test]
fn test_restore_stuck_grid_is_game_over() {
    let mut game = restored([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]], 100);
    assert_eq!(game.status(), GameStatus::GameOver);
    assert!(!game.apply_move(Direction::Up));

    // A new game recovers.
    game.start();
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.score(), 0);
}

#[test]
fn test_restored_win_is_not_reported_again() {
    let mut game = restored([[2048, 0, 0, 0], [2, 2, 0, 0], [0; 4], [0; 4]], 20000);
    assert!(game.apply_move(Direction::Left));
    settle(&mut game);
    assert_eq!(game.status(), GameStatus::Playing);
}

#[test]
fn test_last_move_into_game_over() {
    // Left merges the 2s; the spawn lands in the only gap left and the grid locks up.
    let mut game = restored([[2, 2, 8, 16], [8, 16, 32, 64], [16, 32, 64, 128], [32, 64, 128, 256]], 0);
    assert!(game.apply_move(Direction::Left));
    settle(&mut game);

    assert_eq!(game.board().grid().rows()[0][..3], [4, 8, 16]);
    let last = game.board().value(0, 3).unwrap();
    assert!(last == 2 || last == 4);
    assert_eq!(game.status(), GameStatus::GameOver);
    assert_eq!(game.take_last_event().unwrap().status, GameStatus::GameOver);
}

#[test]
fn test_save_round_trip_through_session() {
    let mut game = restored([[4, 4, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2]], 8);
    game.apply_move(Direction::Left);
    settle(&mut game);

    let json = game.save_bundle().to_json().unwrap();
    let bundle = SaveBundle::from_json(&json).unwrap();
    let copy = GameState::restore(&bundle, &GameConfig::default()).unwrap();

    assert_eq!(copy.board().grid(), game.board().grid());
    assert_eq!(copy.score(), game.score());
    assert_eq!(copy.username(), "tester");
}
