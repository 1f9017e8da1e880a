// In bintable-core/benches/codec_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bintable::kernels::lz4;
use bintable::{encode_csv, BintableConfig};

/// Generates a vector of highly compressible data.
fn generate_low_entropy_bytes(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let pattern = b"abcdefgABCDEFG12345";
    while data.len() < size {
        data.extend_from_slice(pattern);
    }
    data.truncate(size);
    data
}

/// Generates a vector of less compressible, more random-looking data.
fn generate_high_entropy_bytes(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let pattern: Vec<u8> = (0..=255u8).collect();
    while data.len() < size {
        data.extend_from_slice(&pattern);
    }
    data.truncate(size);
    data
}

/// A synthetic wide table: 8 columns, short mixed values.
fn generate_csv(rows: usize) -> String {
    (0..rows)
        .map(|r| {
            format!(
                "{r},name{r},{},{},tag,constant,{},x\n",
                r % 7,
                r * 31 % 1000,
                r % 2
            )
        })
        .collect()
}

const BENCH_DATA_SIZE: usize = 65536; // 64 KB

fn bench_lz4_kernel(c: &mut Criterion) {
    let low_entropy_data = generate_low_entropy_bytes(BENCH_DATA_SIZE);
    let high_entropy_data = generate_high_entropy_bytes(BENCH_DATA_SIZE);
    let block_size = BintableConfig::default().block_size;

    c.bench_function("lz4_encode_low_entropy_64k", |b| {
        b.iter(|| lz4::encode(black_box(&low_entropy_data), block_size).unwrap())
    });
    c.bench_function("lz4_encode_high_entropy_64k", |b| {
        b.iter(|| lz4::encode(black_box(&high_entropy_data), block_size).unwrap())
    });

    let compressed = lz4::encode(&low_entropy_data, block_size).unwrap();
    c.bench_function("lz4_decode_low_entropy_64k", |b| {
        b.iter(|| lz4::decode(black_box(&compressed)).unwrap())
    });
}

fn bench_full_encode(c: &mut Criterion) {
    let csv = generate_csv(10_000);
    let config = BintableConfig::default();

    c.bench_function("encode_csv_10k_rows", |b| {
        b.iter(|| encode_csv(black_box(&csv), &config).unwrap())
    });
}

criterion_group!(benches, bench_lz4_kernel, bench_full_encode);
criterion_main!(benches);
