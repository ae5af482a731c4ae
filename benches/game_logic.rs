use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_merge::animation::AnimationController;
use tile_merge::core::{reconcile, Board};
use tile_merge::types::{Direction, Grid};
use tile_merge::{GameState, GameStatus};

fn busy_grid() -> Grid {
    Grid::from_rows([[2, 2, 4, 8], [0, 4, 4, 0], [16, 0, 16, 2], [2, 2, 2, 2]])
}

fn bench_simulate_move(c: &mut Criterion) {
    let mut board = Board::new(12345);
    board.set_grid(busy_grid());

    c.bench_function("simulate_move_all_directions", |b| {
        b.iter(|| {
            for direction in Direction::ALL {
                black_box(board.simulate_move(black_box(direction)));
            }
        })
    });
}

fn bench_reconcile(c: &mut Criterion) {
    let before = busy_grid();
    let mut board = Board::new(12345);
    board.set_grid(before);
    let after = board.simulate_move(Direction::Left).grid;

    c.bench_function("reconcile_left", |b| {
        b.iter(|| black_box(reconcile(black_box(&before), black_box(&after), Direction::Left)))
    });
}

fn bench_animation_update(c: &mut Criterion) {
    let before = busy_grid();
    let mut board = Board::new(12345);
    board.set_grid(before);
    let after = board.simulate_move(Direction::Left).grid;
    let events = reconcile(&before, &after, Direction::Left);
    let mut anim = AnimationController::default();

    c.bench_function("animation_update_16ms", |b| {
        b.iter(|| {
            if !anim.is_animating() {
                anim.start_move_animation(&events);
            }
            black_box(anim.update(black_box(0.016)));
        })
    });
}

fn bench_full_turn(c: &mut Criterion) {
    let mut state = GameState::default();
    state.start();
    let mut i = 0usize;

    c.bench_function("full_turn", |b| {
        b.iter(|| {
            if state.apply_move(Direction::ALL[i % 4]) {
                while state.is_animating() {
                    state.tick(0.1);
                }
            }
            if state.status() == GameStatus::GameOver {
                state.start();
            }
            i += 1;
        })
    });
}

criterion_group!(
    benches,
    bench_simulate_move,
    bench_reconcile,
    bench_animation_update,
    bench_full_turn
);
criterion_main!(benches);
