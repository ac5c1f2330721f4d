//! Benchmarks for the polyphonic voice bank.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strainer_dsp::params::ResolvedParam;
use strainer_dsp::synth::{VoiceBank, VoiceParams};

use crate::BLOCK_SIZES;

const CHORD: [f32; 4] = [130.81, 155.56, 196.0, 233.08];

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === FULL CHORD ===
        // Every slot sounding, plain smoothed square
        let plain = VoiceParams {
            decay: ResolvedParam::Constant(1.0),
            ..VoiceParams::default()
        };
        let mut bank = VoiceBank::new(4, 48_000.0);
        group.bench_with_input(BenchmarkId::new("chord", size), &size, |b, _| {
            b.iter(|| {
                for freq in CHORD {
                    bank.trigger(freq, 1.0);
                }
                bank.render(black_box(&mut buffer), &plain);
            })
        });

        // === THICK CHORD ===
        // Unison and phase drop on every voice
        let thick = VoiceParams {
            decay: ResolvedParam::Constant(1.0),
            detune: ResolvedParam::Constant(0.7),
            phase_drop: ResolvedParam::Constant(3.0),
            ..VoiceParams::default()
        };
        let mut bank = VoiceBank::new(4, 48_000.0);
        group.bench_with_input(BenchmarkId::new("chord_unison", size), &size, |b, _| {
            b.iter(|| {
                for freq in CHORD {
                    bank.trigger(freq, 1.0);
                }
                bank.render(black_box(&mut buffer), &thick);
            })
        });

        // === SHAPE SWEEP ===
        // Per-sample shape automation: waveform re-selected every sample
        let sweep: Vec<f32> = (0..size).map(|i| 2.0 * i as f32 / size as f32).collect();
        let swept = VoiceParams {
            decay: ResolvedParam::Constant(1.0),
            shape: ResolvedParam::PerSample {
                values: &sweep,
                min: 0.0,
                max: 2.0,
                default: 1.0,
            },
            ..VoiceParams::default()
        };
        let mut bank = VoiceBank::new(4, 48_000.0);
        group.bench_with_input(BenchmarkId::new("chord_shape_sweep", size), &size, |b, _| {
            b.iter(|| {
                for freq in CHORD {
                    bank.trigger(freq, 1.0);
                }
                bank.render(black_box(&mut buffer), &swept);
            })
        });
    }

    group.finish();
}
