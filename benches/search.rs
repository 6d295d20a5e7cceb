use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::Rng;

use seedcracker::core::lcg::JavaRng;
use seedcracker::search::{SeedChecker, SearchConfig};
use seedcracker::treasure::{generate_chest, TargetLayout};
use seedcracker::KNOWN_SEED;

pub fn criterion_benchmark(c: &mut Criterion) {
    let target = TargetLayout::known_treasure();
    let config = SearchConfig::default();
    let checker = SeedChecker::without_oracle(&target, config.chunk_x, config.chunk_z);
    let mut rng = rand::thread_rng();

    c.bench_function("evaluate_random", |b| {
        b.iter_batched(
            || rng.gen::<i64>(),
            |seed| checker.evaluate(black_box(seed)),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("evaluate_known", |b| {
        b.iter(|| checker.evaluate(black_box(KNOWN_SEED)))
    });

    c.bench_function("generate_chest", |b| {
        b.iter(|| generate_chest(black_box(KNOWN_SEED), -28, -73))
    });

    c.bench_function("next_int", |b| {
        let mut random = JavaRng::default();
        b.iter(|| random.next_int(black_box(35)))
    });

    c.bench_function("skip_2_40", |b| {
        let mut random = JavaRng::default();
        b.iter(|| random.skip(black_box(1 << 40)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
