use criterion::*;
use parstats::ParallelConfig;
use std::hint::black_box;

const LEN: usize = 2_000_000;

fn sample_data() -> Vec<f64> {
    (0..LEN).map(|i| (i as f64 * 0.001).sin() * 100.0).collect()
}

fn reduce_benchmark(c: &mut Criterion) {
    let data = sample_data();
    let mut group = c.benchmark_group("reduce");

    for threads in [1, 2, 4, 8] {
        let config = ParallelConfig::new(threads).unwrap();

        group.bench_with_input(BenchmarkId::new("variance", threads), &config, |b, config| {
            b.iter(|| black_box(parstats::variance_with(black_box(&data), config)));
        });

        group.bench_with_input(BenchmarkId::new("sum", threads), &config, |b, config| {
            b.iter(|| black_box(parstats::sum_with(black_box(&data), config)));
        });

        group.bench_with_input(BenchmarkId::new("minmax", threads), &config, |b, config| {
            b.iter(|| black_box(parstats::minmax_with(black_box(&data), config)));
        });
    }

    group.finish();
}

fn sort_benchmark(c: &mut Criterion) {
    let data = sample_data();
    let mut group = c.benchmark_group("order");
    group.sample_size(20);

    for threads in [1, 4] {
        let config = ParallelConfig::new(threads).unwrap();
        group.bench_with_input(BenchmarkId::new("median", threads), &config, |b, config| {
            b.iter(|| black_box(parstats::median_with(black_box(&data), config).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, reduce_benchmark, sort_benchmark);
criterion_main!(benches);
