//! Benchmarks for sample-and-hold rate reduction.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strainer_dsp::dsp::bitcrusher::Bitcrusher;
use strainer_dsp::params::ResolvedParam;

use crate::BLOCK_SIZES;

pub fn bench_bitcrusher(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/bitcrusher");
    let crusher = Bitcrusher::new();

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin()).collect();
        let mut buffer = input.clone();

        for hold in [1.0, 8.0, 128.0] {
            let quant = ResolvedParam::Constant(hold);
            group.bench_with_input(BenchmarkId::new(format!("hold_{hold}"), size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    crusher.process_in_place(black_box(&mut buffer), &quant);
                })
            });
        }
    }

    group.finish();
}
