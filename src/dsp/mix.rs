//! Buffer mixing and level helpers.

/*
Mixing
======

  blend       Linear dry/wet crossfade. `mix = 0` is all dry, `mix = 1` is
              all wet, and the two weights always sum to 1:

                  out = dry·(1 − mix) + wet·mix

              Note the wet term is not normalised by how many signals were
              summed into it. The reverb blends the dry kernel against the
              SUM of four comb outputs, so a high mix can push the pre-
              normalisation level well above 1.0. Peak normalisation fixes
              that afterwards.

  peak        Largest absolute sample value in a buffer.

  normalise   Divide every sample by the peak so the loudest sample lands
              exactly on ±1.0. A silent buffer (peak 0) is left alone rather
              than divided by zero.
*/

/// Blend dry and wet samples using linear crossfade (single sample version).
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Add signal B into signal A in-place.
///
/// Can exceed [-1.0, +1.0].
#[inline]
pub fn sum_in_place(a: &mut [f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len());

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa += sb;
    }
}

/// Largest absolute value in the buffer (0.0 for an empty buffer).
#[inline]
pub fn peak(buffer: &[f32]) -> f32 {
    buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

/// Scale the buffer so its peak absolute value is 1.0.
///
/// Silent buffers are left untouched. Returns the peak found before scaling.
pub fn normalize_peak(buffer: &mut [f32]) -> f32 {
    let max = peak(buffer);
    if max > 0.0 && max.is_finite() {
        let scale = 1.0 / max;
        for sample in buffer.iter_mut() {
            *sample *= scale;
        }
    }
    max
}
