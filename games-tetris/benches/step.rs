use criterion::{black_box, criterion_group, criterion_main, Criterion};
use engine_core::{ErasedGame, GameAdapter};
use games_tetris::{Action, Tetris};

fn bench_typed_steps(c: &mut Criterion) {
    c.bench_function("tetris_typed_1000_steps", |b| {
        b.iter(|| {
            let mut env = GameAdapter::with_seed(Tetris::default(), 42);
            env.reset();
            for i in 0..1000u32 {
                let step = env.step(i % Action::ALL.len() as u32).unwrap();
                if step.done {
                    env.reset();
                }
                black_box(step.reward);
            }
        })
    });
}

fn bench_erased_steps(c: &mut Criterion) {
    c.bench_function("tetris_erased_1000_steps", |b| {
        let mut obs = Vec::with_capacity(games_tetris::OBS_LEN);
        b.iter(|| {
            let mut env = GameAdapter::with_seed(Tetris::default(), 42);
            env.reset_into(&mut obs).unwrap();
            for i in 0..1000u32 {
                let (reward, done) = env.step_into(i % 5, &mut obs).unwrap();
                if done {
                    env.reset_into(&mut obs).unwrap();
                }
                black_box(reward);
            }
        })
    });
}

criterion_group!(benches, bench_typed_steps, bench_erased_steps);
criterion_main!(benches);
