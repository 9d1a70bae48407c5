use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::{random_scalar, Bls24};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_pairing(c: &mut Criterion) {
    let curve = Bls24::standard().unwrap();
    let p = curve.hash_to_g1(b"Alice").unwrap();
    let q = curve.hash_to_g2(b"Server").unwrap();
    let f = curve.miller_loop(&p, &q).unwrap();

    let mut group = c.benchmark_group("bls24");
    group.sample_size(10);
    group.bench_function("miller_loop", |bencher| {
        bencher.iter(|| black_box(curve.miller_loop(black_box(&p), black_box(&q))))
    });
    group.bench_function("final_exponentiation", |bencher| {
        bencher.iter(|| black_box(curve.final_exponentiation(black_box(&f))))
    });
    group.bench_function("pairing", |bencher| {
        bencher.iter(|| black_box(curve.pairing(black_box(&p), black_box(&q))))
    });
    group.finish();
}

fn bench_gt(c: &mut Criterion) {
    let curve = Bls24::standard().unwrap();
    let p = curve.hash_to_g1(b"Alice").unwrap();
    let q = curve.hash_to_g2(b"Server").unwrap();
    let e = curve.pairing(&p, &q).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let scalar = random_scalar(&mut rng, curve.order()).unwrap();

    let mut group = c.benchmark_group("gt");
    group.sample_size(10);
    group.bench_function("gt_pow_frobenius", |bencher| {
        bencher.iter(|| black_box(curve.gt_pow(black_box(&e), black_box(&scalar))))
    });
    group.bench_function("gt_pow_naive", |bencher| {
        bencher.iter(|| black_box(black_box(&e).pow(black_box(&scalar))))
    });
    group.bench_function("is_member", |bencher| {
        bencher.iter(|| black_box(curve.is_member(black_box(e.value()))))
    });
    group.finish();
}

fn bench_hashing(c: &mut Criterion) {
    let curve = Bls24::standard().unwrap();
    let mut group = c.benchmark_group("hash");
    group.sample_size(10);
    group.bench_function("hash_to_g1", |bencher| {
        bencher.iter(|| black_box(curve.hash_to_g1(black_box(b"Alice"))))
    });
    group.bench_function("hash_to_g2", |bencher| {
        bencher.iter(|| black_box(curve.hash_to_g2(black_box(b"Server"))))
    });
    group.finish();
}

criterion_group!(benches, bench_pairing, bench_gt, bench_hashing);
criterion_main!(benches);
