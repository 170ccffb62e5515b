use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_blockfall::core::{
    is_valid_position, rotate, template_shape, GameSession, Playfield, Tetromino,
};
use tui_blockfall::term::{encode_frame, GameView, Viewport};
use tui_blockfall::types::{Color, PieceKind, RotationDirection};

fn bench_gravity_advance(c: &mut Criterion) {
    let mut game = GameSession::seeded(12345);
    game.start();

    c.bench_function("advance_16ms", |b| {
        b.iter(|| {
            if game.game_over() {
                game.reset();
                game.start();
            }
            game.advance(black_box(16));
            game.drain_events().for_each(drop);
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut game = GameSession::seeded(12345);
    game.start();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if game.game_over() {
                game.reset();
                game.start();
            }
            game.handle_hard_drop();
            game.drain_events().for_each(drop);
        })
    });
}

fn bench_collision(c: &mut Criterion) {
    let mut field = Playfield::new();
    for x in 0..9 {
        field.set(x, 19, Color::Red);
    }
    let piece = Tetromino::spawn(PieceKind::T);

    c.bench_function("is_valid_position", |b| {
        b.iter(|| is_valid_position(black_box(&field), black_box(&piece), 0, 17))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let shape = template_shape(PieceKind::I);

    c.bench_function("rotate_4x4", |b| {
        b.iter(|| rotate(black_box(&shape), RotationDirection::Clockwise))
    });
}

fn bench_render(c: &mut Criterion) {
    let mut game = GameSession::seeded(12345);
    game.start();
    for _ in 0..6 {
        game.handle_hard_drop();
    }
    let snap = game.snapshot();
    let view = GameView::default();
    let vp = Viewport::new(80, 30);
    let previous = view.render(&snap, "none", vp);
    let mut out = Vec::with_capacity(32 * 1024);

    c.bench_function("render_and_diff", |b| {
        b.iter(|| {
            let frame = view.render(black_box(&snap), "Space", vp);
            out.clear();
            let _ = encode_frame(Some(&previous), &frame, &mut out);
        })
    });
}

criterion_group!(
    benches,
    bench_gravity_advance,
    bench_hard_drop,
    bench_collision,
    bench_rotate,
    bench_render
);
criterion_main!(benches);
