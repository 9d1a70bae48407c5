use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::Bls24;
use protocols::{
    ClientHandshake, DsaParams, DsaSigningKey, EcdsaParams, EcdsaSigningKey, ServerHandshake, TrustedAuthority,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const K163: &str = "163 1 1
4000000000000000000020108A2E0CC0D99F8A5EF
2FE13C0537BBC11ACAA07D793DE4E6D5E5C94EEE8
289070FB05D38FF58321F2E800536D538CCDAA3D9
7 6 3";

fn bench_dsa(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let params = DsaParams::generate(&mut rng, 1024, 160).expect("generate");
    let sk = DsaSigningKey::random(&params, &mut rng).expect("key");
    let vk = sk.verifying_key(&params).expect("public key");
    let msg = b"benchmark message";
    let sig = sk.sign(&params, &mut rng, msg).expect("sign");

    c.bench_function("dsa_sign", |bencher| {
        bencher.iter(|| {
            let sig = sk.sign(&params, &mut rng, black_box(msg)).expect("sign");
            black_box(sig);
        })
    });
    c.bench_function("dsa_verify", |bencher| {
        bencher.iter(|| {
            let ok = vk.verify(&params, black_box(msg), black_box(&sig)).expect("verify");
            black_box(ok);
        })
    });
}

fn bench_ecdsa(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let params = EcdsaParams::from_text(K163).expect("parse");
    let sk = EcdsaSigningKey::random(&params, &mut rng).expect("key");
    let vk = sk.verifying_key(&params).expect("public key");
    let msg = b"benchmark message";
    let sig = sk.sign(&params, &mut rng, msg).expect("sign");

    c.bench_function("ecdsa_k163_sign", |bencher| {
        bencher.iter(|| {
            let sig = sk.sign(&params, &mut rng, black_box(msg)).expect("sign");
            black_box(sig);
        })
    });
    c.bench_function("ecdsa_k163_verify", |bencher| {
        bencher.iter(|| {
            let ok = vk.verify(&params, black_box(msg), black_box(&sig)).expect("verify");
            black_box(ok);
        })
    });
}

fn bench_ake(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let curve = Bls24::standard().expect("curve");
    let authority = TrustedAuthority::new(&curve, &mut rng).expect("authority");
    let alice = authority.extract_client(&curve, b"Alice").expect("extract");
    let server = authority.extract_server(&curve, b"Server").expect("extract");

    let mut group = c.benchmark_group("ake");
    group.sample_size(10);
    group.bench_function("client_handshake", |bencher| {
        bencher.iter(|| {
            let (client, _) = ClientHandshake::start(&curve, &alice, b"Server", &mut rng).expect("start");
            let (_, share) = ServerHandshake::start(&curve, &server, b"Alice", &mut rng).expect("start");
            black_box(client.finish(&curve, &share).expect("finish"));
        })
    });
    group.finish();
}

criterion_group!(benches, bench_dsa, bench_ecdsa, bench_ake);
criterion_main!(benches);
