use std::time::Duration;

use common::game::{Board, Mark, calculate_minimax_move};
use criterion::{Criterion, SamplingMode, criterion_group, criterion_main};

fn bench_single_move_empty_board() {
    let board = Board::new();
    calculate_minimax_move(&board, Mark::X).unwrap();
}

fn bench_single_move_mid_game() {
    let mut board = Board::new();
    for (index, mark) in [(4, Mark::X), (0, Mark::O), (8, Mark::X), (2, Mark::O)] {
        assert!(board.mark(index, mark));
    }
    calculate_minimax_move(&board, Mark::X).unwrap();
}

fn bench_full_game() {
    let mut board = Board::new();
    let mut mark = Mark::X;
    while !board.is_ended() {
        let index = calculate_minimax_move(&board, mark).unwrap();
        assert!(board.mark(index, mark));
        mark = mark.opponent().unwrap();
    }
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(50)
        .measurement_time(Duration::from_secs(20));

    group.bench_function("single_move_empty", |b| b.iter(bench_single_move_empty_board));

    group.bench_function("single_move_mid_game", |b| b.iter(bench_single_move_mid_game));

    group.bench_function("full_game", |b| b.iter(bench_full_game));

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
