use blockfall::core::matrix::clear_full_rows;
use blockfall::core::{get_spawn_shape, BoardEngine, Grid};
use blockfall::engine::GameController;
use blockfall::types::{BoardConfig, MoveEvent, MoveKind, PieceKind};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_collides(c: &mut Criterion) {
    let mut grid = Grid::new(10, 25);
    for x in 0..9 {
        grid.set(x, 24, 1);
    }
    let shape = get_spawn_shape(PieceKind::T);

    c.bench_function("collides", |b| {
        b.iter(|| grid.collides(black_box(&shape), black_box(3), black_box(21)))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut rows = vec![vec![0u8; 10]; 25];
    // Fill bottom 4 rows
    for row in rows.iter_mut().skip(21) {
        row.fill(1);
    }
    let grid = Grid::from_rows(rows).unwrap();

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| clear_full_rows(black_box(&grid)))
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut board = BoardEngine::seeded(BoardConfig::default(), 12345).unwrap();

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            board.spawn_piece();
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut board = BoardEngine::seeded(BoardConfig::default(), 12345).unwrap();
    board.spawn_piece();

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            board.move_left();
            board.move_right();
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut board = BoardEngine::seeded(BoardConfig::default(), 12345).unwrap();
    board.spawn_piece();
    board.move_down();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            board.rotate();
        })
    });
}

fn bench_hard_drop_game(c: &mut Criterion) {
    c.bench_function("hard_drop_until_game_over", |b| {
        b.iter(|| {
            let mut game = GameController::seeded(BoardConfig::default(), 12345).unwrap();
            while !game.is_game_over() {
                game.handle(MoveEvent::timer(MoveKind::HardDrop));
            }
            game.score()
        })
    });
}

criterion_group!(
    benches,
    bench_collides,
    bench_line_clear,
    bench_piece_spawn,
    bench_try_move,
    bench_try_rotate,
    bench_hard_drop_game
);
criterion_main!(benches);
