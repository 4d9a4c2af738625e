use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::time::Duration;
use zcrush::compress;

fn generate_test_data(size: usize, pattern: &str) -> Vec<u8> {
    match pattern {
        "text" => {
            // Generate Lorem ipsum style text data
            let base = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
            let mut data = Vec::with_capacity(size);
            while data.len() < size {
                data.extend_from_slice(base);
            }
            data.truncate(size);
            data
        }
        "binary" => (0..size).map(|i| ((i * 17 + 11) % 256) as u8).collect(),
        "random" => {
            // Pseudo-random data that compresses poorly
            let mut state = 0x2545_f491u32;
            (0..size)
                .map(|_| {
                    state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                    (state >> 24) as u8
                })
                .collect()
        }
        _ => panic!("Unknown pattern: {}", pattern),
    }
}

fn compression_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_throughput");
    group.measurement_time(Duration::from_secs(10));

    for size in [10240, 1048576].iter() {
        let size_label = match *size {
            10240 => "10KB",
            1048576 => "1MB",
            _ => "unknown",
        };

        for pattern in ["text", "binary", "random"].iter() {
            let data = generate_test_data(*size, pattern);

            for level in [1, 6, 9] {
                let benchmark_id = BenchmarkId::from_parameter(format!(
                    "{}/{}/level{}",
                    size_label, pattern, level
                ));

                group.throughput(Throughput::Bytes(*size as u64));
                group.bench_with_input(benchmark_id, &data, |b, data| {
                    b.iter(|| {
                        compress(black_box(data), black_box(0), black_box(level))
                            .expect("Compression failed")
                    });
                });
            }
        }
    }

    group.finish();
}

/// How the chunk size alone affects throughput at a fixed level
fn chunk_size_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_size_sweep");
    group.measurement_time(Duration::from_secs(5));

    let size = 4 * 1048576;
    let data = generate_test_data(size, "text");

    for chunk_kib in [1u32, 16, 64, 256, 1024] {
        let benchmark_id = BenchmarkId::from_parameter(format!("{}KiB", chunk_kib));

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(benchmark_id, &data, |b, data| {
            b.iter_batched(
                || data.clone(),
                |data| {
                    let compressed = compress(black_box(&data), black_box(chunk_kib), 6)
                        .expect("Compression failed");
                    black_box(compressed.len())
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, compression_throughput, chunk_size_sweep);
criterion_main!(benches);
