//! Saturation / Soft Clipping
//!
//! The filter stage drives its signal through an arctangent waveshaper:
//!
//!   saturate(x, gain) = (2/π) · atan(gain · x)
//!
//! The output is bounded to (-1, 1) for any input. For small `gain · x` the
//! curve is close to linear with slope `2·gain/π`; as the product grows the
//! peaks are squashed toward ±1, adding odd harmonics.
//!
//! # Gain Values
//!
//!   0.01 = Near silence (the curve is almost flat)
//!   1.0  = Gentle rounding, slight level drop
//!   3-5  = Obvious overdrive
//!   10   = Heavy, almost square

use std::f32::consts::FRAC_2_PI;

/// Arctangent soft clipper.
#[inline]
pub fn saturate(sample: f32, gain: f32) -> f32 {
    FRAC_2_PI * (gain * sample).atan()
}

/// Apply [`saturate`] to an entire buffer in place.
pub fn saturate_buffer(buffer: &mut [f32], gain: f32) {
    for sample in buffer.iter_mut() {
        *sample = saturate(*sample, gain);
    }
}
