use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dmvprep_core::history::hash;

fn bench_hash(c: &mut Criterion) {
    let short = "What does a flashing red traffic light mean?";
    let long = short.repeat(64);

    let mut group = c.benchmark_group("hash");
    group.bench_function("short", |b| b.iter(|| hash(black_box(short))));
    group.bench_function("long", |b| b.iter(|| hash(black_box(&long))));
    group.finish();
}

criterion_group!(benches, bench_hash);
criterion_main!(benches);
