//! RLE throughput benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// Long runs: the format's best case.
fn runs(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut byte = 0u8;
    while data.len() < size {
        let run = ((data.len() / 97) % 200 + 8).min(size - data.len());
        data.extend(std::iter::repeat_n(byte, run));
        byte = byte.wrapping_add(1);
    }
    data
}

/// No runs at all: every byte becomes a pair.
fn distinct(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

fn bench_rle(c: &mut Criterion) {
    let mut group = c.benchmark_group("rle");
    let size = 256 * 1024;

    for (name, data) in [("runs", runs(size)), ("distinct", distinct(size))] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("compress", name), &data, |b, data| {
            b.iter(|| black_box(krunch_rle::compress(black_box(data))));
        });

        let compressed = krunch_rle::compress(&data);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::new("decompress", name),
            &compressed,
            |b, compressed| {
                b.iter(|| black_box(krunch_rle::decompress(black_box(compressed)).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_rle);
criterion_main!(benches);
