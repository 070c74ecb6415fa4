use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use tangle_engine::{generate, Configuration, RngSource};

fn benchmark_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for (label, config) in [
        ("literal", Configuration::default()),
        ("all_families", Configuration::all()),
    ] {
        for n in [7u64, 360, 997] {
            group.bench_with_input(BenchmarkId::new(label, n), &n, |b, &n| {
                let mut rng = RngSource::seeded(n);
                b.iter(|| black_box(generate(black_box(n), &config, &mut rng).unwrap()))
            });
        }
    }

    group.finish();
}

fn benchmark_full_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("range");
    group.sample_size(10);

    group.bench_function("all_families_0_to_1000_depth_3", |b| {
        let config = Configuration {
            max_depth: 3,
            ..Configuration::all()
        };
        let mut rng = RngSource::seeded(1);
        b.iter(|| {
            for n in 0..=1000u64 {
                black_box(generate(n, &config, &mut rng).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_generate, benchmark_full_range);
criterion_main!(benches);
