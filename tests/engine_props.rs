//! Property tests for the board engine
//!
//! Seeds, shapes and offsets are generated; the checks must hold for any of them:
//! - placement on an empty grid collides iff some filled cell is out of bounds
//! - a clear pass over a grid without full rows is the identity
//! - survivors keep their order and the bonus is 50 * k^2
//! - the ghost never sits above the active piece
//! - a failed move or rotation leaves the view untouched
//! - score and grid dimensions stay consistent over a rollout

use proptest::prelude::*;

use blockfall::core::matrix::{clear_full_rows, is_row_full};
use blockfall::core::pieces::filled_cells;
use blockfall::core::{get_shape, BoardEngine, Grid};
use blockfall::engine::GameController;
use blockfall::types::{BoardConfig, MoveEvent, MoveKind, PieceKind};

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    (0..PieceKind::ALL.len()).prop_map(|i| PieceKind::ALL[i])
}

fn move_strategy() -> impl Strategy<Value = MoveKind> {
    prop_oneof![
        Just(MoveKind::Down),
        Just(MoveKind::Left),
        Just(MoveKind::Right),
        Just(MoveKind::Rotate),
        Just(MoveKind::HardDrop),
        Just(MoveKind::Hold),
    ]
}

/// Rows where every row keeps at least one empty cell
fn sparse_rows(width: usize, height: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(0u8..8, width), height).prop_map(
        move |mut rows| {
            for (y, row) in rows.iter_mut().enumerate() {
                row[y % width] = 0;
            }
            rows
        },
    )
}

proptest! {
    #[test]
    fn placement_on_empty_grid_collides_only_out_of_bounds(
        kind in kind_strategy(),
        rotation in 0usize..4,
        x in -4i32..12,
        y in -4i32..27,
    ) {
        let grid = Grid::new(10, 25);
        let shape = get_shape(kind, rotation);
        let out_of_bounds = filled_cells(&shape).iter().any(|&(dx, dy)| {
            let (cx, cy) = (x + dx, y + dy);
            cx < 0 || cx >= 10 || cy < 0 || cy >= 25
        });

        prop_assert_eq!(grid.collides(&shape, x, y), out_of_bounds);
    }

    #[test]
    fn clear_without_full_rows_is_identity(rows in sparse_rows(6, 8)) {
        let grid = Grid::from_rows(rows).unwrap();
        let result = clear_full_rows(&grid);

        prop_assert_eq!(result.lines_removed, 0);
        prop_assert_eq!(result.score_bonus, 0);
        prop_assert_eq!(result.grid, grid);
    }

    #[test]
    fn clear_keeps_survivor_order_and_scores_quadratically(
        rows in sparse_rows(5, 10),
        full in prop::collection::vec(any::<bool>(), 10),
    ) {
        let mut rows = rows;
        for (row, &make_full) in rows.iter_mut().zip(&full) {
            if make_full {
                row.fill(1);
            }
        }
        let survivors: Vec<Vec<u8>> =
            rows.iter().filter(|r| !is_row_full(r)).cloned().collect();
        let k = rows.len() - survivors.len();

        let result = clear_full_rows(&Grid::from_rows(rows).unwrap());
        let out = result.grid.to_rows();

        prop_assert_eq!(result.lines_removed, k);
        prop_assert_eq!(result.score_bonus, 50 * (k * k) as u32);
        prop_assert!(out[..k].iter().all(|r| r.iter().all(|&c| c == 0)));
        prop_assert_eq!(&out[k..], survivors.as_slice());
    }

    #[test]
    fn ghost_is_never_above_active_piece(
        seed in any::<u64>(),
        moves in prop::collection::vec(move_strategy(), 0..40),
    ) {
        let mut board = BoardEngine::seeded(BoardConfig::default(), seed).unwrap();
        board.spawn_piece();

        for kind in moves {
            match kind {
                MoveKind::Down => { board.move_down(); }
                MoveKind::Left => { board.move_left(); }
                MoveKind::Right => { board.move_right(); }
                MoveKind::Rotate => { board.rotate(); }
                MoveKind::HardDrop => {
                    if board.hard_drop().game_over {
                        break;
                    }
                }
                MoveKind::Hold => { board.hold_swap(); }
            }

            let view = board.snapshot();
            if let Some(ghost) = view.ghost {
                prop_assert!(ghost.y > view.y);
                prop_assert_eq!(ghost.x, view.x);
                prop_assert!(!board.collides(ghost.x, ghost.y, &ghost.shape));
                prop_assert!(board.collides(ghost.x, ghost.y + 1, &ghost.shape));
            }
        }
    }

    #[test]
    fn rejected_move_or_rotation_leaves_view_untouched(
        seed in any::<u64>(),
        shifts in prop::collection::vec(any::<bool>(), 0..12),
        drops in 0usize..25,
    ) {
        let mut board = BoardEngine::seeded(BoardConfig::default(), seed).unwrap();
        board.spawn_piece();
        for left in shifts {
            if left { board.move_left(); } else { board.move_right(); }
        }
        for _ in 0..drops {
            board.move_down();
        }

        let before = board.snapshot();
        if !board.rotate() {
            prop_assert_eq!(board.snapshot(), before.clone());
        }
        let before = board.snapshot();
        if !board.move_left() {
            prop_assert_eq!(board.snapshot(), before.clone());
        }
        let before = board.snapshot();
        if !board.move_down() {
            prop_assert_eq!(board.snapshot(), before);
        }
    }

    #[test]
    fn rollout_keeps_score_monotonic(
        seed in any::<u64>(),
        events in prop::collection::vec(move_strategy(), 1..120),
    ) {
        let config = BoardConfig::new(8, 16).unwrap();
        let mut game = GameController::seeded(config, seed).unwrap();
        let mut last_score = game.score();

        for kind in events {
            let result = game.handle(MoveEvent::user(kind));
            prop_assert!(game.score() >= last_score);
            last_score = game.score();

            let grid = game.board().grid();
            prop_assert_eq!((grid.width(), grid.height()), (8, 16));
            if let Some(clear) = result.clear {
                prop_assert_eq!(clear.score_bonus, 50 * (clear.lines_removed * clear.lines_removed) as u32);
            }
        }
    }
}
