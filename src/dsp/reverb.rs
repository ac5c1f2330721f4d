//! Reverb - Block Schroeder Reverberator
//!
//! A Schroeder reverb built to run on whole fixed-size blocks ("kernels")
//! rather than sample by sample. Each kernel is processed independently: the
//! echoes it produces stay inside the kernel and nothing carries over into
//! the next one.
//!
//! # Architecture
//!
//! ```text
//!          ┌──→ [Comb 1] ──┐
//!          ├──→ [Comb 2] ──┤
//! Kernel ──┼──→ [Comb 3] ──┼──→ (Σ) ──┐
//!    │     └──→ [Comb 4] ──┘          ├─ mix ─→ [Allpass] ─→ [Allpass] ─→ Output
//!    └────────────── dry ─────────────┘          (normalise)   (normalise)
//! ```
//!
//! ## Comb Filters
//!
//! Each comb works on its own copy of the kernel and folds a decayed copy of
//! the signal back in `delay` samples later:
//!
//! ```text
//! y[i + delay] += y[i] * decay        for i in 0..len - delay
//! ```
//!
//! Because `y[i]` may already contain earlier echoes, this recirculates and
//! produces a decaying echo train. The four combs use the base delay/decay
//! plus small fixed offsets so their echo trains interleave instead of
//! stacking on the same samples.
//!
//! ## Allpass Filters
//!
//! Two identical diffusers with a long fixed delay and a short lookahead
//! coupling term, processed left to right over the already-written output:
//!
//! ```text
//! y[i] += -g * y[i - delay]                   if i >= delay
//! y[i] +=  g * y[i + 20 - delay]              if that index is in 1..len
//! ```
//!
//! After each allpass the kernel is divided by its peak so the tail never
//! grows past full scale, whatever the decay and mix settings. A silent kernel
//! (peak exactly 0) is left alone.
//!
//! The kernel is normalised between the two allpasses, not only once at the
//! end of the chain. Both stages are linear, so the result equals a single
//! final normalisation up to a constant scale; the second allpass just sees
//! full-scale input.
//!
//! # Block Size Mismatch
//!
//! The host asks for quanta of whatever size it likes; the kernel size is
//! fixed. [`ReverbEngine`] sits two ring buffers around the kernel:
//!
//! ```text
//! quantum ─→ [input ring] ─(whole kernels)─→ kernel ─→ [output ring] ─→ quantum
//! ```
//!
//! Nothing comes out until one kernel's worth of input has accumulated; until
//! then (and on any later underrun) the quantum is silence. A kernel size that
//! is a multiple of the quantum size keeps the output gap-free after that.

use crate::dsp::mix::{blend_dry_wet, normalize_peak};
use crate::dsp::ring_buffer::RingBuffer;
use crate::{MAX_BLOCK_SIZE, MAX_CHANNELS};

/// Default kernel length in frames.
pub const DEFAULT_KERNEL_SIZE: usize = 1024;
/// Largest kernel [`ReverbEngine`] will allocate for.
pub const MAX_KERNEL_SIZE: usize = 65_536;

/// `(delay offset ms, decay offset)` for each comb, applied to the base values.
pub const COMB_OFFSETS: [(f32, f32); 4] = [
    (0.0, 0.0),
    (-11.73, -0.1313),
    (19.31, -0.2743),
    (-7.97, -0.31),
];

pub const ALLPASS_DELAY_MS: f32 = 89.27;
pub const ALLPASS_DECAY: f32 = 0.131;
/// Forward distance of the allpass coupling term, in samples.
pub const ALLPASS_LOOKAHEAD: usize = 20;

/// Convert a delay in milliseconds to whole samples, never less than one.
#[inline]
pub fn ms_to_samples(delay_ms: f32, sample_rate: f32) -> usize {
    let ms = if delay_ms.is_finite() { delay_ms.max(0.0) } else { 0.0 };
    ((ms / 1000.0 * sample_rate).round() as usize).max(1)
}

/// Recirculating single-tap echo, in place.
pub fn comb_filter(buffer: &mut [f32], delay_samples: usize, decay: f32) {
    let delay = delay_samples.max(1);
    for i in 0..buffer.len().saturating_sub(delay) {
        buffer[i + delay] += buffer[i] * decay;
    }
}

/// Allpass diffuser followed by peak normalisation, in place.
pub fn allpass_filter(buffer: &mut [f32], delay_samples: usize, decay: f32) {
    let len = buffer.len();
    let delay = delay_samples.max(1);

    for i in 0..len {
        if i >= delay {
            buffer[i] += -decay * buffer[i - delay];
        }
        if i + ALLPASS_LOOKAHEAD > delay {
            let ahead = i + ALLPASS_LOOKAHEAD - delay;
            if ahead < len {
                buffer[i] += decay * buffer[ahead];
            }
        }
    }

    normalize_peak(buffer);
}

/// Per-kernel reverb settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParams {
    pub delay_ms: f32,
    pub mix: f32,
    pub decay_factor: f32,
}

impl Default for ReverbParams {
    fn default() -> Self {
        Self {
            delay_ms: 12.0,
            mix: 0.5,
            decay_factor: 0.4,
        }
    }
}

/// The block reverberation kernel with its pre-allocated comb scratch space.
pub struct ReverbKernel {
    sample_rate: f32,
    combs: [Vec<f32>; 4],
}

impl ReverbKernel {
    pub fn new(sample_rate: f32, kernel_size: usize) -> Self {
        Self {
            sample_rate,
            combs: std::array::from_fn(|_| vec![0.0; kernel_size]),
        }
    }

    /// Reverberate one kernel in place.
    ///
    /// Buffers longer than the kernel size given at construction only have
    /// their first `kernel_size` samples processed.
    pub fn process(&mut self, buffer: &mut [f32], params: &ReverbParams) {
        let len = buffer.len().min(self.combs[0].len());
        let buffer = &mut buffer[..len];

        for (comb, &(delay_offset, decay_offset)) in self.combs.iter_mut().zip(COMB_OFFSETS.iter()) {
            let comb = &mut comb[..len];
            comb.copy_from_slice(buffer);
            comb_filter(
                comb,
                ms_to_samples(params.delay_ms + delay_offset, self.sample_rate),
                params.decay_factor + decay_offset,
            );
        }

        for (i, sample) in buffer.iter_mut().enumerate() {
            let wet = self.combs.iter().map(|comb| comb[i]).sum::<f32>();
            *sample = blend_dry_wet(*sample, wet, params.mix);
        }

        let allpass_delay = ms_to_samples(ALLPASS_DELAY_MS, self.sample_rate);
        allpass_filter(buffer, allpass_delay, ALLPASS_DECAY);
        allpass_filter(buffer, allpass_delay, ALLPASS_DECAY);
    }
}

/// Quantum-to-kernel adapter around [`ReverbKernel`].
pub struct ReverbEngine {
    kernel: ReverbKernel,
    input: RingBuffer,
    output: RingBuffer,
    block: Vec<Vec<f32>>,
    kernel_size: usize,
    primed: bool,
}

impl ReverbEngine {
    /// `max_block_size` is the largest quantum the host will ever request.
    ///
    /// Sizes are clamped to `1..=MAX_KERNEL_SIZE`, `1..=MAX_BLOCK_SIZE` and
    /// `1..=MAX_CHANNELS`; [`EngineConfig::validate`](crate::EngineConfig::validate)
    /// rejects anything outside those ranges before it gets here.
    pub fn new(sample_rate: f32, channels: usize, kernel_size: usize, max_block_size: usize) -> Self {
        let kernel_size = kernel_size.clamp(1, MAX_KERNEL_SIZE);
        let channels = channels.clamp(1, MAX_CHANNELS);
        let capacity = kernel_size.saturating_add(max_block_size.clamp(1, MAX_BLOCK_SIZE));

        Self {
            kernel: ReverbKernel::new(sample_rate, kernel_size),
            input: RingBuffer::new(capacity, channels),
            output: RingBuffer::new(capacity, channels),
            block: vec![vec![0.0; kernel_size]; channels],
            kernel_size,
            primed: false,
        }
    }

    /// Reverberate one quantum in place.
    ///
    /// The first `frames` samples of each channel are consumed and then
    /// overwritten with whatever output is ready, silence where none is.
    /// Returns how many frames of real output were delivered.
    pub fn process<B>(&mut self, io: &mut [B], frames: usize, params: &ReverbParams) -> usize
    where
        B: AsRef<[f32]> + AsMut<[f32]>,
    {
        self.input.push(&*io, frames);

        while self.input.frames_available() >= self.kernel_size {
            self.input.pull(&mut self.block, self.kernel_size);
            for channel in self.block.iter_mut() {
                self.kernel.process(channel, params);
            }
            self.output.push(&self.block, self.kernel_size);
            self.primed = true;
        }

        for channel in io.iter_mut() {
            let channel = channel.as_mut();
            let len = frames.min(channel.len());
            channel[..len].fill(0.0);
        }

        self.output.pull(io, frames)
    }

    pub fn kernel_size(&self) -> usize {
        self.kernel_size
    }

    /// True once at least one kernel has been produced.
    pub fn is_primed(&self) -> bool {
        self.primed
    }

    /// True while processed output is still waiting to be delivered.
    pub fn has_pending_output(&self) -> bool {
        !self.output.is_empty()
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.output.clear();
        self.primed = false;
    }
}
