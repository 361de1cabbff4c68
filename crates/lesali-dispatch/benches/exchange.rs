use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lesali_crypto::{
    default_padding_size, open_stripped, seal_stripped, stripped_len, MessageNumber, PublicKey,
    SharedSecret,
};
use lesali_dispatch::{Client, Dispatcher, DispatcherConfig};

pub fn criterion_benchmark(c: &mut Criterion) {
    let shared_secret = SharedSecret::from_bytes([0u8; 32]);
    let number = MessageNumber::new(2);
    let plaintext = vec![0u8; 1024];
    let (_, padding) = default_padding_size(plaintext.len());

    c.bench_function("seal_stripped_1k", |b| {
        b.iter(|| {
            seal_stripped(
                black_box(&plaintext),
                black_box(&shared_secret),
                padding,
                number,
            )
        })
    });

    let sealed = seal_stripped(&plaintext, &shared_secret, padding, number)
        .expect("should seal benchmark input");

    c.bench_function("open_stripped_1k", |b| {
        b.iter(|| open_stripped(black_box(&sealed), black_box(&shared_secret), number))
    });

    // Every iteration reuses the same request, so the collaborators skip replay checks.
    let client_key = PublicKey::from_bytes([1u8; 32]);
    let client = Client::new(client_key, shared_secret.clone());
    let dispatcher = Dispatcher::new(DispatcherConfig::new(
        |ctx: (), _: &PublicKey, _: MessageNumber| {
            Ok::<_, ()>((ctx, SharedSecret::from_bytes([0u8; 32])))
        },
        |_: &(), _: &PublicKey, _: MessageNumber| Ok(()),
        |_: &(), request: &[u8]| Ok(request.to_vec()),
    ));
    let request = client
        .seal_request(number, &plaintext)
        .expect("should seal benchmark request");

    c.bench_function("handle_request_1k", |b| {
        b.iter(|| {
            let mut response = Vec::with_capacity(stripped_len(plaintext.len(), padding));
            dispatcher
                .handle_request((), Cursor::new(black_box(&request)), &mut response)
                .expect("exchange should succeed");
            response
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
