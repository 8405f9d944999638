use criterion::{Criterion, criterion_group, criterion_main};
use memorama_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;

fn bench_deal(c: &mut Criterion) {
    let mut group = c.benchmark_group("deal");
    for difficulty in Difficulty::ALL {
        group.bench_function(difficulty.name(), |b| {
            let mut rng = SmallRng::seed_from_u64(0);
            b.iter(|| generate_cards(black_box(difficulty), &mut rng))
        });
    }
    group.finish();
}

fn bench_score(c: &mut Criterion) {
    c.bench_function("score", |b| {
        b.iter(|| calculate_score(black_box(27), black_box(143), black_box(Difficulty::Hard)))
    });
}

criterion_group!(benches, bench_deal, bench_score);
criterion_main!(benches);
