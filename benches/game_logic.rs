use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris_board::core::{Board, BoardConfig, Grid};
use tetris_board::term::{BoardView, FrameBuffer, Viewport};
use tetris_board::types::{Direction, ShapeKind};

fn fresh_board() -> Board {
    Board::with_config(BoardConfig::default().with_seed(12345)).unwrap()
}

fn bench_tick(c: &mut Criterion) {
    let mut board = fresh_board();

    c.bench_function("tick", |b| {
        b.iter(|| {
            if !board.tick() {
                board = fresh_board();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new(10, 20).unwrap();
            for y in 16..20 {
                grid.fill_row(y, ShapeKind::I);
            }
            black_box(grid.clear_full_rows());
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut board = fresh_board();
    let mut direction = Direction::Left;

    c.bench_function("move_shape", |b| {
        b.iter(|| {
            direction = match direction {
                Direction::Left => Direction::Right,
                _ => Direction::Left,
            };
            black_box(board.move_shape(direction));
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut board = fresh_board();
    board.move_shape(Direction::Down);
    board.move_shape(Direction::Down);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(board.rotate());
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut board = fresh_board();
    for _ in 0..8 {
        board.hard_drop();
    }

    c.bench_function("render_text", |b| b.iter(|| black_box(board.render())));

    let view = BoardView::default();
    let snapshot = board.snapshot();
    let mut fb = FrameBuffer::new(80, 24);
    c.bench_function("render_framebuffer", |b| {
        b.iter(|| view.render_into(black_box(&snapshot), Viewport::new(80, 24), &mut fb))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_move,
    bench_rotate,
    bench_render
);
criterion_main!(benches);
