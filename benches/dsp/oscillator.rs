//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strainer_dsp::dsp::oscillator::Oscillator;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let increment = 440.0 / 48_000.0;

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let cases = [
            // Sawtooth - simple linear ramp
            ("saw", Oscillator::new(0.0, 0.75, 0.0, 0.0)),
            // Warped saw - one powf per sample
            ("smooth_square", Oscillator::new(1.0, 0.75, 0.0, 0.0)),
            // Square - branch per sample
            ("square", Oscillator::new(2.0, 0.75, 0.0, 0.0)),
            // Unison - three waveform reads
            ("unison", Oscillator::new(1.5, 0.75, 0.8, 0.0)),
            // Phase drop - extra exp() per sample
            ("phase_drop", Oscillator::new(1.0, 0.75, 0.0, 4.0)),
        ];

        for (name, osc) in cases {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    let mut phase = 0.0f32;
                    for (i, sample) in buffer.iter_mut().enumerate() {
                        *sample = osc.sample(black_box(phase), i as f32 / 48_000.0);
                        phase = (phase + increment).fract();
                    }
                })
            });
        }
    }

    group.finish();
}
