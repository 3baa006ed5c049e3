use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_candy::core::{
    find_matches, generate_board, generate_match_free, resolve_cascade, Board, Session,
    SessionConfig, SymbolRng,
};
use tui_candy::types::{Move, Position, Symbol, MAX_CASCADE_STEPS};

fn bench_find_matches(c: &mut Criterion) {
    let mut source = SymbolRng::new(12345, Symbol::COUNT);
    let board = generate_board(&mut source);

    c.bench_function("find_matches", |b| {
        b.iter(|| find_matches(black_box(&board)))
    });
}

fn bench_gravity(c: &mut Criterion) {
    c.bench_function("gravity_half_empty", |b| {
        b.iter(|| {
            // Checkerboard of holes
            let mut board = Board::from_fn(|pos| {
                ((pos.row + pos.col) % 2 == 0).then_some(Symbol::Candy)
            });
            board.apply_gravity()
        })
    });
}

fn bench_cascade(c: &mut Criterion) {
    let mut source = SymbolRng::new(12345, Symbol::COUNT);

    c.bench_function("resolve_cascade_random_board", |b| {
        b.iter(|| {
            let mut board = generate_board(&mut source);
            resolve_cascade(&mut board, &mut source, black_box(MAX_CASCADE_STEPS))
        })
    });
}

fn bench_generate_match_free(c: &mut Criterion) {
    let mut source = SymbolRng::new(12345, Symbol::COUNT);

    c.bench_function("generate_match_free", |b| {
        b.iter(|| generate_match_free(&mut source, black_box(100)))
    });
}

fn bench_attempt_swap(c: &mut Criterion) {
    let mut session = Session::new(SessionConfig {
        moves: u32::MAX,
        ..SessionConfig::default()
    });
    session.start();
    let mut col = 0u8;

    c.bench_function("attempt_swap", |b| {
        b.iter(|| {
            col = (col + 1) % 7;
            let mv = Move::new(Position::new(4, col), Position::new(4, col + 1));
            let _ = session.attempt_swap(black_box(mv));
        })
    });
}

criterion_group!(
    benches,
    bench_find_matches,
    bench_gravity,
    bench_cascade,
    bench_generate_match_free,
    bench_attempt_swap
);
criterion_main!(benches);
