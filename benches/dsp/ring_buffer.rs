//! Benchmarks for the multi-channel ring buffer.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strainer_dsp::dsp::ring_buffer::RingBuffer;

use crate::BLOCK_SIZES;

pub fn bench_ring_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ring_buffer");

    for &size in BLOCK_SIZES {
        let input = vec![vec![0.5f32; size]; 2];
        let mut output = vec![vec![0.0f32; size]; 2];
        let mut ring = RingBuffer::new(1024 + size, 2);

        group.bench_with_input(BenchmarkId::new("push_pull_stereo", size), &size, |b, _| {
            b.iter(|| {
                ring.push(black_box(&input), size);
                ring.pull(black_box(&mut output), size)
            })
        });
    }

    group.finish();
}
