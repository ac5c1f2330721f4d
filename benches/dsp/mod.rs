//! Benchmarks for low-level DSP primitives.

mod bitcrusher;
mod distortion;
mod envelope;
mod filter;
mod mix;
mod oscillator;
mod reverb;
mod ring_buffer;

pub use bitcrusher::bench_bitcrusher;
pub use distortion::bench_distortion;
pub use envelope::bench_envelope;
pub use filter::bench_filter;
pub use mix::bench_mix;
pub use oscillator::bench_oscillator;
pub use reverb::bench_reverb;
pub use ring_buffer::bench_ring_buffer;
