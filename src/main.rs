//! Headless autoplay runner (default binary).
//!
//! Drives a seeded game with random placements until game over or a piece limit,
//! then prints a summary. `--moves` replays a fixed event list instead, and
//! `--opening` scripts the first pieces. Nothing is rendered; logs go to stderr (`RUST_LOG`
//! controls verbosity) so stdout stays machine-readable with `--json`.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockfall::core::{BoardEngine, PieceSupplier, ViewSnapshot};
use blockfall::engine::GameController;
use blockfall::types::{BoardConfig, MoveEvent, MoveKind, PieceKind};

#[derive(Debug, Parser)]
#[command(name = "blockfall", version, about = "Headless autoplay for the blockfall engine")]
struct Args {
    /// Board width (defaults to BLOCKFALL_WIDTH or 10)
    #[arg(long)]
    width: Option<usize>,

    /// Board height including hidden rows (defaults to BLOCKFALL_HEIGHT or 25)
    #[arg(long)]
    height: Option<usize>,

    /// Seed for both the piece sequence and the placement policy
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Stop after this many pieces even if the game is still running
    #[arg(long, default_value_t = 500)]
    max_pieces: u32,

    /// Comma-separated piece kinds dealt before random draws (e.g. `i,o,t`)
    #[arg(long, value_delimiter = ',')]
    opening: Vec<String>,

    /// Comma-separated moves to replay instead of autoplay (e.g. `left,rotate,hardDrop`)
    #[arg(long, value_delimiter = ',')]
    moves: Vec<String>,

    /// Print the summary as JSON, including the final view
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    config: BoardConfig,
    seed: u64,
    pieces: u32,
    score: u32,
    lines: u32,
    game_over: bool,
    view: ViewSnapshot,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;
    info!(
        width = config.width,
        height = config.height,
        seed = args.seed,
        "starting game"
    );

    let opening = parse_opening(&args.opening)?;
    let moves = parse_moves(&args.moves)?;
    let board = BoardEngine::with_supplier(config, PieceSupplier::from_kinds(opening, args.seed))
        .context("creating board")?;
    let game = GameController::new(board);

    let summary = if moves.is_empty() {
        autoplay(game, config, args.seed, args.max_pieces)
    } else {
        replay(game, config, args.seed, &moves)
    };

    if args.json {
        let out = serde_json::to_string_pretty(&summary).context("serializing summary")?;
        println!("{out}");
    } else {
        println!(
            "pieces={} score={} lines={} game_over={}",
            summary.pieces, summary.score, summary.lines, summary.game_over
        );
    }
    Ok(())
}

fn resolve_config(args: &Args) -> Result<BoardConfig> {
    let base = BoardConfig::from_env().context("invalid BLOCKFALL_* environment config")?;
    let width = args.width.unwrap_or(base.width);
    let height = args.height.unwrap_or(base.height);
    let hidden_rows = base.hidden_rows.min(height.saturating_sub(1));
    BoardConfig::with_hidden_rows(width, height, hidden_rows)
        .with_context(|| format!("invalid board size {width}x{height}"))
}

fn parse_opening(names: &[String]) -> Result<Vec<PieceKind>> {
    names
        .iter()
        .map(|name| {
            PieceKind::from_str(name.trim()).ok_or_else(|| anyhow!("unknown piece kind {name:?}"))
        })
        .collect()
}

fn parse_moves(names: &[String]) -> Result<Vec<MoveKind>> {
    names
        .iter()
        .map(|name| MoveKind::from_str(name.trim()).ok_or_else(|| anyhow!("unknown move {name:?}")))
        .collect()
}

/// Apply scripted moves in order; stops early on game over
fn replay(mut game: GameController, config: BoardConfig, seed: u64, moves: &[MoveKind]) -> Summary {
    for &kind in moves {
        if game.is_game_over() {
            break;
        }
        game.handle(MoveEvent::user(kind));
    }
    info!(moves = moves.len(), score = game.score(), "replay finished");
    summarize(&game, config, seed)
}

/// Play random placements: a few rotations, a horizontal shift, then a hard drop
fn autoplay(mut game: GameController, config: BoardConfig, seed: u64, max_pieces: u32) -> Summary {
    let mut policy = StdRng::seed_from_u64(seed.wrapping_add(1));
    let reach = config.width as i32 / 2;

    while !game.is_game_over() && game.pieces_spawned() < max_pieces {
        for _ in 0..policy.random_range(0..4) {
            game.handle(MoveEvent::user(MoveKind::Rotate));
        }

        let shift = policy.random_range(-reach..=reach);
        let step = if shift < 0 {
            MoveKind::Left
        } else {
            MoveKind::Right
        };
        for _ in 0..shift.unsigned_abs() {
            game.handle(MoveEvent::user(step));
        }

        game.handle(MoveEvent::user(MoveKind::HardDrop));
    }

    info!(
        pieces = game.pieces_spawned(),
        score = game.score(),
        lines = game.lines_cleared(),
        "autoplay finished"
    );
    summarize(&game, config, seed)
}

fn summarize(game: &GameController, config: BoardConfig, seed: u64) -> Summary {
    Summary {
        config,
        seed,
        pieces: game.pieces_spawned(),
        score: game.score(),
        lines: game.lines_cleared(),
        game_over: game.is_game_over(),
        view: game.view(),
    }
}
