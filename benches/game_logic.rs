use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grid_tetris::core::{Board, GameSnapshot, GameState};
use grid_tetris::term::{FrameBuffer, GameView, Viewport};
use grid_tetris::types::{Block, Color, GameAction, FRAME_MS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.tick(0);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(FRAME_MS));
        })
    });
}

fn bench_remove_rows(c: &mut Criterion) {
    let block = Color::new(3).map(Block::settled);

    c.bench_function("remove_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for y in 26..30 {
                for x in 0..10 {
                    board.set(x, y, block);
                }
            }
            while let Some(row) = board.find_full_row() {
                board.remove_row(row);
            }
            black_box(board.filled_count())
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.tick(0);

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            state.apply_action(GameAction::Delete);
            if state.game_over() {
                state.apply_action(GameAction::Restart);
                state.tick(0);
            }
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.tick(0);

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            state.apply_action(GameAction::MoveLeft);
            state.apply_action(GameAction::MoveRight);
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.tick(0);
    let view = GameView::default();
    let viewport = Viewport::new(80, 34);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(black_box(&snap), viewport, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_remove_rows,
    bench_piece_spawn,
    bench_move,
    bench_render
);
criterion_main!(benches);
