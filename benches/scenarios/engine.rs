//! Benchmarks for a full engine quantum: voices, filter, crusher, reverb.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strainer_dsp::{channel, AudioOutput, BlockParams, EngineConfig, ParamId};

use crate::BLOCK_SIZES;

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &size in BLOCK_SIZES {
        let config = EngineConfig {
            max_block_size: size,
            ..EngineConfig::default()
        };

        // === DEFAULT PATCH ===
        let Ok((mut handle, mut engine)) = channel(config) else {
            continue;
        };
        let mut output = AudioOutput::new(config.channels, size);
        let Ok(params) = BlockParams::new(size) else {
            continue;
        };

        group.bench_with_input(BenchmarkId::new("stereo_default", size), &size, |b, _| {
            b.iter(|| {
                let _ = handle.note_on(220.0, 1.0);
                let _ = handle.note_on(330.0, 0.8);
                engine.process(black_box(&params), &mut output)
            })
        });

        // === AUTOMATED PATCH ===
        // Per-sample cutoff sweep and crusher, k-rate mix
        let Ok((mut handle, mut engine)) = channel(config) else {
            continue;
        };
        let sweep: Vec<f32> = (0..size).map(|i| 300.0 + i as f32 * 20.0).collect();
        let mix = [0.7];
        let quant = [4.0];
        let Ok(params) = BlockParams::new(size)
            .and_then(|p| p.with_automation(ParamId::Lowpass, &sweep))
            .and_then(|p| p.with_automation(ParamId::Mix, &mix))
            .and_then(|p| p.with_automation(ParamId::Quant, &quant))
        else {
            continue;
        };

        group.bench_with_input(BenchmarkId::new("stereo_automated", size), &size, |b, _| {
            b.iter(|| {
                let _ = handle.note_on(220.0, 1.0);
                engine.process(black_box(&params), &mut output)
            })
        });
    }

    group.finish();
}
