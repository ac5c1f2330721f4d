//! Benchmarks for the one-pole filter stage.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strainer_dsp::dsp::filter::{FilterStage, SaturationStage};
use strainer_dsp::params::ResolvedParam;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let lowpass = ResolvedParam::Constant(2_000.0);
        let highpass = ResolvedParam::Constant(120.0);
        let gain = ResolvedParam::Constant(2.0);

        // Block-constant cutoffs: coefficients once per block
        let mut filter = FilterStage::new(48_000.0, SaturationStage::Pre);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("k_rate", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.process(black_box(&mut buffer), &lowpass, &highpass, &gain);
            })
        });

        // Per-sample cutoff sweep: coefficients every sample
        let sweep: Vec<f32> = (0..size).map(|i| 200.0 + i as f32 * 30.0).collect();
        let swept = ResolvedParam::PerSample {
            values: &sweep,
            min: 0.0,
            max: 20_000.0,
            default: 10_000.0,
        };
        let mut filter = FilterStage::new(48_000.0, SaturationStage::Pre);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("a_rate", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.process(black_box(&mut buffer), &swept, &highpass, &gain);
            })
        });
    }

    group.finish();
}
