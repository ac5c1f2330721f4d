//! Benchmarks for reverb processing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strainer_dsp::dsp::reverb::{ReverbEngine, ReverbKernel, ReverbParams};

use crate::BLOCK_SIZES;

pub fn bench_reverb(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/reverb");

    let sample_rate = 48_000.0;
    let params = ReverbParams::default();

    // One full kernel, the cost paid every kernel_size frames
    for kernel_size in [512, 1024, 2048] {
        let input: Vec<f32> = (0..kernel_size).map(|i| (i as f32 * 0.05).sin() * 0.5).collect();
        let mut kernel = ReverbKernel::new(sample_rate, kernel_size);
        let mut buffer = input.clone();

        group.bench_with_input(BenchmarkId::new("kernel", kernel_size), &kernel_size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                kernel.process(black_box(&mut buffer), &params);
            })
        });
    }

    // Per-quantum cost, amortised over whole kernels
    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| {
                if i < 10 {
                    1.0 - (i as f32 / 10.0) // Initial impulse
                } else {
                    (i as f32 * 0.05).sin() * 0.1 // Quiet tail
                }
            })
            .collect();
        let mut reverb = ReverbEngine::new(sample_rate, 2, 1024, size);
        let mut io = vec![input.clone(), input.clone()];

        group.bench_with_input(BenchmarkId::new("stereo_quantum", size), &size, |b, _| {
            b.iter(|| {
                io[0].copy_from_slice(&input);
                io[1].copy_from_slice(&input);
                reverb.process(black_box(&mut io), size, &params)
            })
        });
    }

    group.finish();
}
