//! Sample-and-hold rate reduction.
//!
//! Despite the name this does not touch amplitude resolution. It holds every
//! Q-th input sample for Q output slots, which is what running the signal at
//! `sample_rate / Q` and upsampling with zero-order hold would produce:
//!
//! ```text
//! Q = 4
//! in:  1 2 3 4 5 6 7 8 9
//! out: 1 1 1 1 5 5 5 5 9
//!      └─────┘ └─────┘ └ partial group, truncated at the buffer end
//! ```
//!
//! Groups restart at the beginning of every block, so the hold pattern is
//! aligned to block boundaries.

use crate::params::automation::ResolvedParam;

pub const MIN_HOLD: usize = 1;
pub const MAX_HOLD: usize = 128;

/// Round a raw hold factor and clamp it to `MIN_HOLD..=MAX_HOLD`.
///
/// NaN collapses to 1 (bypass).
#[inline]
pub fn hold_factor(raw: f32) -> usize {
    if raw.is_nan() {
        return MIN_HOLD;
    }
    (raw.round().clamp(MIN_HOLD as f32, MAX_HOLD as f32)) as usize
}

/// Stateless sample-and-hold downsampler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bitcrusher;

impl Bitcrusher {
    pub fn new() -> Self {
        Self
    }

    /// Hold `input` into `output` with a fixed factor.
    ///
    /// Only `min(input.len(), output.len())` slots are written.
    pub fn process(&self, input: &[f32], output: &mut [f32], hold: usize) {
        let len = input.len().min(output.len());
        let hold = hold.clamp(MIN_HOLD, MAX_HOLD);

        for (out_group, in_group) in output[..len].chunks_mut(hold).zip(input[..len].chunks(hold)) {
            out_group.fill(in_group[0]);
        }
    }

    /// Hold a buffer in place, reading the factor at the start of each group.
    pub fn process_in_place(&self, buffer: &mut [f32], quant: &ResolvedParam<'_>) {
        let mut start = 0;
        while start < buffer.len() {
            let hold = hold_factor(quant.at(start));
            let end = (start + hold).min(buffer.len());
            let held = buffer[start];
            buffer[start..end].fill(held);
            start = end;
        }
    }
}
