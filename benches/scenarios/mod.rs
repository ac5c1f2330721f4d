//! Real-world scenario benchmarks.
//!
//! These benchmarks model actual usage patterns from the demos: a busy voice
//! bank and the full engine quantum with every effect in the chain.

mod engine;
mod voices;

pub use engine::bench_engine;
pub use voices::bench_voices;
