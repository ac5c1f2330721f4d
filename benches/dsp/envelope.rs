//! Benchmarks for the exponential decay envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strainer_dsp::dsp::envelope::{decay_level, EnvelopeClock};

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Clock-driven decay, as a voice runs it
        let mut clock = EnvelopeClock::new();
        group.bench_with_input(BenchmarkId::new("decay", size), &size, |b, _| {
            b.iter(|| {
                clock.reset();
                for sample in buffer.iter_mut() {
                    *sample = decay_level(clock.seconds(sample_rate), black_box(0.25));
                    clock.tick();
                }
            })
        });
    }

    group.finish();
}
