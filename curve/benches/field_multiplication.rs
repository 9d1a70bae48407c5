use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::{BigInt, Bls24Tower, FieldElement, Fp, Fp24, Fp4, RandomField, STANDARD_PARAMETER};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn tower() -> Bls24Tower {
    let curve = curve::Bls24::new(&BigInt::from(STANDARD_PARAMETER)).unwrap();
    curve.tower().clone()
}

fn bench_bigint_pow_mod(c: &mut Criterion) {
    let tower = tower();
    let p = tower.fp.modulus().clone();
    let mut rng = StdRng::seed_from_u64(42);
    let base = BigInt::random_below(&mut rng, &p).unwrap();
    let exponent = BigInt::random_below(&mut rng, &p).unwrap();
    c.bench_function("bigint_pow_mod_637", |bencher| {
        bencher.iter(|| black_box(black_box(&base).pow_mod(black_box(&exponent), &p)))
    });
}

fn bench_fp_mul(c: &mut Criterion) {
    let tower = tower();
    let mut rng = StdRng::seed_from_u64(42);
    let a = Fp::random(&tower.fp, &mut rng);
    let b = Fp::random(&tower.fp, &mut rng);
    c.bench_function("fp_mul", |bencher| {
        bencher.iter(|| black_box(black_box(&a).mul(black_box(&b))))
    });
}

fn bench_fp_invert(c: &mut Criterion) {
    let tower = tower();
    let mut rng = StdRng::seed_from_u64(42);
    let a = Fp::random(&tower.fp, &mut rng);
    c.bench_function("fp_invert", |bencher| bencher.iter(|| black_box(black_box(&a).invert())));
}

fn bench_fp4_mul(c: &mut Criterion) {
    let tower = tower();
    let mut rng = StdRng::seed_from_u64(42);
    let a = Fp4::random(&tower.fp4, &mut rng);
    let b = Fp4::random(&tower.fp4, &mut rng);
    c.bench_function("fp4_mul", |bencher| {
        bencher.iter(|| black_box(black_box(&a).mul(black_box(&b))))
    });
}

fn bench_fp24_mul(c: &mut Criterion) {
    let tower = tower();
    let mut rng = StdRng::seed_from_u64(42);
    let a = Fp24::random(&tower.fp24, &mut rng);
    let b = Fp24::random(&tower.fp24, &mut rng);
    c.bench_function("fp24_mul", |bencher| {
        bencher.iter(|| black_box(black_box(&a).mul(black_box(&b))))
    });
    c.bench_function("fp24_square", |bencher| bencher.iter(|| black_box(black_box(&a).square())));
    c.bench_function("fp24_frobenius", |bencher| {
        bencher.iter(|| black_box(black_box(&a).frobenius()))
    });
}

criterion_group!(
    benches,
    bench_bigint_pow_mod,
    bench_fp_mul,
    bench_fp_invert,
    bench_fp4_mul,
    bench_fp24_mul
);
criterion_main!(benches);
