use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use aes_core::{encrypt_block, expand_key, Aes128Key};
use aes_modes::{Cipher, Mode};

fn bench_block(c: &mut Criterion) {
    let round_keys = expand_key(&Aes128Key::from([0u8; 16]));
    let mut group = c.benchmark_group("block");
    group.bench_function("expand_key", |b| {
        b.iter(|| expand_key(&Aes128Key::from([1u8; 16])));
    });
    group.bench_function("encrypt_block", |b| {
        let block = [0x42u8; 16];
        b.iter(|| encrypt_block(&block, &round_keys));
    });
    group.finish();
}

fn bench_modes(c: &mut Criterion) {
    let cipher = Cipher::new(&[0u8; 16]).expect("16-byte key");
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);

    let mut group = c.benchmark_group("modes");
    for size in [64usize, 1024, 16 * 1024] {
        let mut message = vec![0u8; size];
        rng.fill_bytes(&mut message);
        group.throughput(Throughput::Bytes(size as u64));
        for mode in [Mode::Ecb, Mode::Cbc] {
            group.bench_with_input(BenchmarkId::new(mode.to_string(), size), &message, |b, m| {
                b.iter(|| cipher.encrypt(m, mode));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_block, bench_modes);
criterion_main!(benches);
