use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use engine_core::Game;
use games_tictactoe::{Action, State, TicTacToe};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_legal_actions(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_legal_actions");
    let game = TicTacToe::new();

    group.bench_function("opening", |b| {
        let state = game.initial_state();
        b.iter(|| black_box(game.legal_actions(&state).unwrap()));
    });

    group.bench_function("midgame", |b| {
        let state = State::from_board([1, 2, 0, 0, 1, 0, 0, 0, 2]).unwrap();
        b.iter(|| black_box(game.legal_actions(&state).unwrap()));
    });

    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_apply");
    group.bench_function("apply_center", |b| {
        let game = TicTacToe::new();
        let base_state = game.initial_state();
        b.iter_batched(
            || base_state,
            |state| black_box(game.apply(&state, &Action::Place(4)).unwrap()),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_random_playout(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_playout");
    group.bench_function("random_to_terminal", |b| {
        let game = TicTacToe::new();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        b.iter(|| {
            let mut state = game.initial_state();
            while !game.is_terminal(&state) {
                let actions = game.legal_actions(&state).unwrap();
                let action = actions.choose(&mut rng).unwrap();
                state = game.apply(&state, action).unwrap();
            }
            black_box(state)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_legal_actions, bench_apply, bench_random_playout);
criterion_main!(benches);
