//! Benchmarks for the sentinel-delimited Burrows-Wheeler Transform.
//!
//! Forward sorting compares whole rotations, so highly repetitive inputs
//! are the slow case and are kept small here.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxibwt_bwt::{BlockSize, bwt, decode, encode};
use std::hint::black_box;

fn generate_text(size: usize) -> Vec<u8> {
    b"The quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(size)
        .collect()
}

fn generate_random(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let byte = (seed >> 32) as u8;
        data.push(if byte == 0x02 || byte == 0x03 { 0x20 } else { byte });
    }
    data
}

fn bench_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("bwt_block");
    for (name, data) in [
        ("text_1k", generate_text(1024)),
        ("random_1k", generate_random(1024)),
        ("text_16k", generate_text(16 * 1024)),
        ("random_16k", generate_random(16 * 1024)),
    ] {
        let transformed = bwt::transform(&data).expect("payload has no sentinels");
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("forward", name), &data, |b, data| {
            b.iter(|| bwt::transform(black_box(data)))
        });
        group.bench_with_input(
            BenchmarkId::new("inverse", name),
            &transformed,
            |b, transformed| b.iter(|| bwt::inverse_transform(black_box(transformed))),
        );
    }
    group.finish();
}

fn bench_framed(c: &mut Criterion) {
    let data = generate_text(256 * 1024);
    let framed = encode(&data, BlockSize::default()).expect("payload has no sentinels");

    let mut group = c.benchmark_group("bwt_framed");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("encode_256k", |b| {
        b.iter(|| encode(black_box(&data), BlockSize::default()))
    });
    group.bench_function("decode_256k", |b| b.iter(|| decode(black_box(&framed))));
    group.finish();
}

criterion_group!(benches, bench_block, bench_framed);
criterion_main!(benches);
