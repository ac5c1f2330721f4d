//! Low-level DSP primitives used by the voice bank and the effect chain.
//!
//! These components are allocation-free once constructed and realtime-safe.
//! They stay focused on the signal-processing math; parameter resolution and
//! message handling live in the layers above.

/// Sample-and-hold rate reduction.
pub mod bitcrusher;
/// Arctangent soft clipper.
pub mod distortion;
/// Exponential decay and the per-voice sample clock.
pub mod envelope;
/// One-pole low-pass/high-pass pair with saturation.
pub mod filter;
/// Dry/wet blending and peak normalisation.
pub mod mix;
/// Waveforms, shape morph, unison and phase drop.
pub mod oscillator;
/// Block Schroeder reverb behind ring buffers.
pub mod reverb;
/// Multi-channel circular sample queue.
pub mod ring_buffer;

pub use envelope::EnvelopeClock;
