use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::distortion::saturate;
use crate::params::automation::ResolvedParam;

/*
One-Pole Filter Stage
=====================

The cheapest useful recursive filter: one multiply-add of memory per sample.

    b1 = exp(−2π · cutoff / sample_rate)
    a0 = 1 − b1

    z1 = input · a0 + z1 · b1          ← low-pass output, also the state

b1 is the feedback weight. A low cutoff gives b1 near 1 (the state barely
moves, heavy smoothing); a cutoff near Nyquist gives b1 near 0 (the output
follows the input almost directly). At cutoff 0 the coefficients are exactly
b1 = 1, a0 = 0: the filter freezes and lets no new energy in. None of this
divides, so no cutoff can produce NaN.

High-Pass
---------

The high-pass is "signal minus its own low-pass", built from a second
one-pole with its own state and cutoff:

    hp = x − lowpass_hp(x)

Signal Chain
------------

    input ──[saturate?]──▶ low-pass ──▶ high-pass ──[saturate?]──▶ output

The saturator sits either in front of the filters (the input is squashed,
then filtered, so the filter softens the clipping harmonics) or after them
(filtered signal is clipped, harsher). `SaturationStage` picks which.

Coefficient Rate
----------------

Each cutoff decides its own update rate from its own automation array: a
block-constant cutoff recomputes its coefficients once per block, a per-sample
cutoff recomputes every sample. The recursion memory is never reset by a
coefficient change.
*/

/// Where the saturator sits relative to the filters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaturationStage {
    /// Saturate the input before it enters the low-pass.
    #[default]
    Pre,
    /// Saturate the high-pass output.
    Post,
    /// No saturation.
    Bypass,
}

/// One-pole low-pass recursion with its coefficients.
#[derive(Debug, Clone, Copy)]
pub struct OnePole {
    a0: f32,
    b1: f32,
    z1: f32,
    cutoff_hz: f32,
}

impl OnePole {
    pub fn new(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut pole = Self {
            a0: 1.0,
            b1: 0.0,
            z1: 0.0,
            cutoff_hz,
        };
        pole.set_cutoff(cutoff_hz, sample_rate);
        pole
    }

    /// Recompute the coefficients. The state is kept.
    #[inline]
    pub fn set_cutoff(&mut self, cutoff_hz: f32, sample_rate: f32) {
        let cutoff_hz = if cutoff_hz.is_finite() {
            cutoff_hz.max(0.0)
        } else {
            0.0
        };
        self.cutoff_hz = cutoff_hz;
        self.b1 = (-TAU * cutoff_hz / sample_rate).exp();
        self.a0 = 1.0 - self.b1;
    }

    /// Run one sample through the low-pass.
    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        self.z1 = input * self.a0 + self.z1 * self.b1;
        self.z1
    }

    pub fn coefficients(&self) -> (f32, f32) {
        (self.a0, self.b1)
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn reset(&mut self) {
        self.z1 = 0.0;
    }
}

/// Low-pass then high-pass one-pole pair with a soft clipper.
///
/// One instance per channel; the recursion memory is per instance.
pub struct FilterStage {
    lowpass: OnePole,
    highpass: OnePole,
    saturation: SaturationStage,
    sample_rate: f32,
}

impl FilterStage {
    pub fn new(sample_rate: f32, saturation: SaturationStage) -> Self {
        Self {
            lowpass: OnePole::new(20_000.0_f32.min(sample_rate * 0.5), sample_rate),
            highpass: OnePole::new(0.0, sample_rate),
            saturation,
            sample_rate,
        }
    }

    pub fn set_cutoffs(&mut self, lowpass_hz: f32, highpass_hz: f32) {
        self.lowpass.set_cutoff(lowpass_hz, self.sample_rate);
        self.highpass.set_cutoff(highpass_hz, self.sample_rate);
    }

    /// Filter one sample with the current coefficients.
    #[inline]
    pub fn next_sample(&mut self, input: f32, gain: f32) -> f32 {
        let input = match self.saturation {
            SaturationStage::Pre => saturate(input, gain),
            _ => input,
        };

        let low = self.lowpass.next_sample(input);
        let out = low - self.highpass.next_sample(low);

        match self.saturation {
            SaturationStage::Post => saturate(out, gain),
            _ => out,
        }
    }

    /// Filter a block in place.
    ///
    /// Block-constant cutoffs update their coefficients once up front;
    /// per-sample cutoffs update on every sample.
    pub fn process(
        &mut self,
        buffer: &mut [f32],
        lowpass: &ResolvedParam<'_>,
        highpass: &ResolvedParam<'_>,
        gain: &ResolvedParam<'_>,
    ) {
        if lowpass.is_constant() {
            self.lowpass.set_cutoff(lowpass.at(0), self.sample_rate);
        }
        if highpass.is_constant() {
            self.highpass.set_cutoff(highpass.at(0), self.sample_rate);
        }

        for (i, sample) in buffer.iter_mut().enumerate() {
            if !lowpass.is_constant() {
                self.lowpass.set_cutoff(lowpass.at(i), self.sample_rate);
            }
            if !highpass.is_constant() {
                self.highpass.set_cutoff(highpass.at(i), self.sample_rate);
            }
            *sample = self.next_sample(*sample, gain.at(i));
        }
    }

    pub fn lowpass(&self) -> &OnePole {
        &self.lowpass
    }

    pub fn highpass(&self) -> &OnePole {
        &self.highpass
    }

    pub fn reset(&mut self) {
        self.lowpass.reset();
        self.highpass.reset();
    }
}
