//! Benchmarks for the arctangent saturator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strainer_dsp::dsp::distortion::saturate_buffer;

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin()).collect();
        let mut buffer = input.clone();

        for gain in [1.0, 10.0] {
            group.bench_with_input(BenchmarkId::new(format!("gain_{gain}"), size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    saturate_buffer(black_box(&mut buffer), gain);
                })
            });
        }
    }

    group.finish();
}
