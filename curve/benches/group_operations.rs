use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use curve::{multi_scalar_mul, random_scalar, BigInt, Bls24, Group, Projective, G1};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn setup() -> (Bls24, G1, G1) {
    let curve = Bls24::standard().unwrap();
    let g = curve.hash_to_g1(b"Alice").unwrap();
    let h = curve.hash_to_g1(b"Robert").unwrap();
    (curve, g, h)
}

fn bench_affine_double(c: &mut Criterion) {
    let (_, g, _) = setup();
    c.bench_function("affine_double", |bencher| {
        bencher.iter(|| black_box(black_box(&g).double()))
    });
}

fn bench_projective_double(c: &mut Criterion) {
    let (_, g, _) = setup();
    let g = g.to_projective();
    c.bench_function("projective_double", |bencher| {
        bencher.iter(|| black_box(black_box(&g).double()))
    });
}

fn bench_affine_add(c: &mut Criterion) {
    let (_, g, h) = setup();
    c.bench_function("affine_add", |bencher| {
        bencher.iter(|| black_box(black_box(&g) + black_box(&h)))
    });
}

fn bench_projective_add(c: &mut Criterion) {
    let (_, g, h) = setup();
    let g = g.to_projective();
    let h = h.to_projective();
    c.bench_function("projective_add", |bencher| {
        bencher.iter(|| black_box(black_box(&g) + black_box(&h)))
    });
}

fn bench_scalar_mul(c: &mut Criterion) {
    let (curve, g, _) = setup();
    let mut rng = StdRng::seed_from_u64(42);
    let scalar = random_scalar(&mut rng, curve.order()).unwrap();
    let projective = g.to_projective();

    c.bench_function("projective_scalar_mul", |bencher| {
        bencher.iter(|| black_box(black_box(&projective).scalar_mul(black_box(&scalar))))
    });
    c.bench_function("projective_scalar_mul_windowed", |bencher| {
        bencher.iter(|| black_box(black_box(&projective).scalar_mul_windowed(black_box(&scalar))))
    });
    c.bench_function("g1_mul_glv", |bencher| {
        bencher.iter(|| black_box(curve.g1_mul(black_box(&g), black_box(&scalar))))
    });
}

fn bench_g2_mul(c: &mut Criterion) {
    let (curve, _, _) = setup();
    let q = curve.hash_to_g2(b"Server").unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let scalar = random_scalar(&mut rng, curve.order()).unwrap();

    c.bench_function("g2_scalar_mul_windowed", |bencher| {
        bencher.iter(|| black_box(black_box(&q).scalar_mul_windowed(black_box(&scalar))))
    });
    c.bench_function("g2_mul_psi", |bencher| {
        bencher.iter(|| black_box(curve.g2_mul(black_box(&q), black_box(&scalar))))
    });
}

fn bench_msm(c: &mut Criterion) {
    let (curve, g, _) = setup();
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("msm");

    for size in [2usize, 4, 8, 16] {
        let mut points: Vec<Projective<_>> = Vec::with_capacity(size);
        let mut scalars: Vec<BigInt> = Vec::with_capacity(size);
        let mut current = g.to_projective();
        for _ in 0..size {
            points.push(current.clone());
            scalars.push(random_scalar(&mut rng, curve.order()).unwrap());
            current = current.double();
        }

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
            bencher.iter(|| black_box(multi_scalar_mul(black_box(&points), black_box(&scalars))))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_affine_double,
    bench_projective_double,
    bench_affine_add,
    bench_projective_add,
    bench_scalar_mul,
    bench_g2_mul,
    bench_msm
);
criterion_main!(benches);
