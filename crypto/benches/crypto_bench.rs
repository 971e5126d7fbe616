use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn ed25519_sign_bench(c: &mut Criterion) {
    let keys = nelo_crypto::generate_device_keys();
    let msg = [42u8; 64];

    c.bench_function("ed25519_sign_64B", |b| {
        b.iter(|| nelo_crypto::sign_message(black_box(&msg), &keys.private))
    });
}

fn ed25519_verify_bench(c: &mut Criterion) {
    let keys = nelo_crypto::generate_device_keys();
    let msg = [42u8; 64];
    let sig = nelo_crypto::sign_message(&msg, &keys.private);

    c.bench_function("ed25519_verify_64B", |b| {
        b.iter(|| nelo_crypto::verify_signature(black_box(&msg), &sig, &keys.public))
    });
}

fn wallet_id_derive_bench(c: &mut Criterion) {
    let keys = nelo_crypto::generate_device_keys();

    c.bench_function("wallet_id_derive", |b| {
        b.iter(|| nelo_crypto::derive_wallet_id(black_box(&keys.public)))
    });
}

fn wallet_id_decode_bench(c: &mut Criterion) {
    let keys = nelo_crypto::generate_device_keys();
    let id = nelo_crypto::derive_wallet_id(&keys.public);

    c.bench_function("wallet_id_decode", |b| {
        b.iter(|| nelo_crypto::decode_wallet_id(black_box(&id)))
    });
}

criterion_group!(
    benches,
    ed25519_sign_bench,
    ed25519_verify_bench,
    wallet_id_derive_bench,
    wallet_id_decode_bench
);
criterion_main!(benches);
