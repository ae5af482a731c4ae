//! Headless tile merge runner (default binary).
//!
//! Plays a session without a display: a simple strategy feeds directions, the
//! loop advances animations with a fixed frame delta, and the final score is
//! ranked on a fresh leaderboard. Useful for smoke-testing timing settings and
//! for producing save bundles.

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use tile_merge::core::Leaderboard;
use tile_merge::types::Direction;
use tile_merge::{telemetry, GameConfig, GameState, GameStatus};

/// Hard stop for a session that never goes idle
const MAX_FRAMES_PER_TURN: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Left, Down, Right, Up in turn
    Cycle,
    /// Uniformly random direction
    Random,
}

#[derive(Debug, Parser)]
#[command(name = "tile-merge", about = "Play a headless tile merge session")]
struct Args {
    /// Spawn seed (overrides TILE_MERGE_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of turns to play
    #[arg(long, default_value_t = 500)]
    moves: u32,

    /// Simulated frame length in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u32,

    /// Name recorded on the leaderboard and in the save bundle
    #[arg(long, default_value = "player")]
    player: String,

    #[arg(long, value_enum, default_value_t = Strategy::Cycle)]
    strategy: Strategy,

    /// Log JSON lines instead of text
    #[arg(long)]
    json_log: bool,

    /// Print the final save bundle as JSON on stdout
    #[arg(long)]
    print_save: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init(args.json_log);

    if args.frame_ms == 0 {
        bail!("--frame-ms must be positive");
    }

    let mut config = GameConfig::from_env();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut game = GameState::new(&config, args.player.clone());
    game.start();

    play(&mut game, &args, config.seed)?;

    let mut leaderboard = Leaderboard::new();
    leaderboard.insert_or_update(game.username(), game.score());
    info!(
        player = game.username(),
        score = game.score(),
        turns = game.turns(),
        max_tile = game.board().grid().max_tile(),
        status = game.status().as_str(),
        best = leaderboard.best_score(),
        "session finished"
    );

    if args.print_save {
        println!("{}", game.save_bundle().to_json()?);
    }
    Ok(())
}

fn play(game: &mut GameState, args: &Args, seed: u64) -> Result<()> {
    let frame_secs = args.frame_ms as f32 / 1000.0;
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
    let mut cursor = 0usize;

    for _ in 0..args.moves {
        if game.status() == GameStatus::GameOver {
            break;
        }
        if game.status() == GameStatus::Won {
            // Any input acknowledges the win.
            game.apply_move(Direction::Left);
        }

        let mut started = false;
        for _ in 0..Direction::ALL.len() {
            let direction = match args.strategy {
                Strategy::Cycle => {
                    let d = CYCLE[cursor % CYCLE.len()];
                    cursor += 1;
                    d
                }
                Strategy::Random => Direction::ALL[rng.random_range(0..Direction::ALL.len())],
            };
            if game.apply_move(direction) {
                started = true;
                break;
            }
        }
        if !started {
            debug!("no direction changed the grid");
            break;
        }

        let mut frames = 0u32;
        while game.is_animating() {
            game.tick(frame_secs);
            frames += 1;
            if frames > MAX_FRAMES_PER_TURN {
                bail!("animation did not finish after {frames} frames");
            }
        }

        if let Some(event) = game.take_last_event() {
            debug!(
                direction = event.direction.as_str(),
                gain = event.score_gain,
                status = event.status.as_str(),
                "turn"
            );
        }
    }
    Ok(())
}

const CYCLE: [Direction; 4] = [Direction::Left, Direction::Down, Direction::Right, Direction::Up];
