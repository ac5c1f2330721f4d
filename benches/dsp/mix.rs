//! Benchmarks for mixing and normalisation helpers.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strainer_dsp::dsp::mix::{normalize_peak, sum_in_place};

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let a: Vec<f32> = (0..size).map(|i| (i as f32 * 0.01).sin()).collect();
        let b_sig: Vec<f32> = (0..size).map(|i| (i as f32 * 0.02).cos()).collect();
        let mut buffer = a.clone();

        group.bench_with_input(BenchmarkId::new("sum", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&a);
                sum_in_place(black_box(&mut buffer), black_box(&b_sig));
            })
        });

        group.bench_with_input(BenchmarkId::new("normalize", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&a);
                normalize_peak(black_box(&mut buffer))
            })
        });
    }

    group.finish();
}
