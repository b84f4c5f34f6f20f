//! Criterion benchmarks for CLOAK commitments: commit, add, add_commitment, verify on both curves.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use cloak_crypto::{BabyJubjub, CommitValue, CurveGroup};
use cloak_pedersen::PedersenEngine;

fn bench_curve<G: CurveGroup>(c: &mut Criterion, name: &str, engine: PedersenEngine<'_, G>) {
    let h = engine.generate_secondary_generator();
    let r1 = engine.generate_random_scalar();
    let r2 = engine.generate_random_scalar();
    let v1 = CommitValue::from(1_000u64);
    let v2 = CommitValue::from(250u64);
    let c1 = engine.commit_to(&h, &r1, &v1);
    let c2 = engine.commit_to(&h, &r2, &v2);

    let mut g = c.benchmark_group(name);
    g.throughput(Throughput::Elements(1));
    g.bench_function("random_scalar", |b| {
        b.iter(|| black_box(engine.generate_random_scalar()));
    });
    g.bench_function("commit_to", |b| {
        b.iter(|| black_box(engine.commit_to(&h, &r1, black_box(&v1))));
    });
    g.bench_function("add", |b| {
        b.iter(|| black_box(engine.add(&c1, &c2)));
    });
    g.bench_function("add_commitment", |b| {
        b.iter(|| black_box(engine.add_commitment(&h, &r1, &r2, &v1, &v2)));
    });
    g.bench_function("verify", |b| {
        b.iter(|| black_box(engine.verify(&h, &c1, &r1, &v1)));
    });
    g.finish();
}

fn bench_secp256k1(c: &mut Criterion) {
    bench_curve(c, "secp256k1", PedersenEngine::secp256k1());
}

fn bench_baby_jubjub(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let params = runtime.block_on(BabyJubjub::load()).unwrap();
    bench_curve(c, "babyjubjub", PedersenEngine::new(params));
}

criterion_group!(benches, bench_secp256k1, bench_baby_jubjub);
criterion_main!(benches);
