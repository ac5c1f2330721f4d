#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::envelope::pluck_level;

/*
Voice Oscillator
================

Pure functions of phase. The voice owns the phase accumulator; everything
here just maps a phase (in cycles, normally [0, 1)) to a sample in [-1, 1].

Base Waveforms
--------------

Sawtooth:   saw(p) = 2·(p mod 1) − 1

     1 ┐   ╱│   ╱│
       │  ╱ │  ╱ │
    -1 └╱───┴╱───┴→ p

Pulse:      square(p, pw) = +1 if (p mod 1) > pw else −1

     1 ┐    ┌─┐    ┌─┐
       │    │ │    │ │
    -1 └────┘ └────┘ └→ p
            ↑ pw

Warped saw: saw(p^e) with e = pw·(pw−0.2)·(pw−0.3)·(pw−0.4). Raising the
phase to a small exponent bunches the ramp up at the start of the cycle,
which reads as a rounded square. This is the "smoothed square".

Shape Morph
-----------

One control, `shape` in [0, 2], walks through three timbres:

    shape  0 ──────────── 1 ──────────── 2
           saw      smoothed square     pulse

    shape < 1:  (1 − s)·saw + s·warped
    shape ≥ 1:  (2 − s)·warped + (s − 1)·square

Both halves evaluate to the warped saw at shape = 1, so sweeping the control
never jumps.

Unison
------

With a non-zero `spread`, three copies of the waveform are read at phase
rates 1, 1 + 0.05·spread and 1 − 0.1·spread and averaged. The copies drift
against each other and thicken the sound.

Phase Drop
----------

The phase fed to the waveform is scaled by (1 + amount · pluck(t)), where
pluck(t) is a fast exponential (see `envelope::PLUCK_DECAY`). Right after a
trigger the waveform runs through several cycles per period, producing a
bright, pitch-dropping attack that settles back to the plain waveform.
*/

/// Upward phase-rate offset of the second unison copy, per unit of spread.
pub const DETUNE_UP: f32 = 0.05;
/// Downward phase-rate offset of the third unison copy, per unit of spread.
pub const DETUNE_DOWN: f32 = 0.1;

#[inline]
fn wrap(phase: f32) -> f32 {
    phase.rem_euclid(1.0)
}

/// Bipolar sawtooth, -1 at phase 0 rising to +1.
#[inline]
pub fn saw(phase: f32) -> f32 {
    2.0 * wrap(phase) - 1.0
}

/// Pulse wave, low until `pulse_width` then high.
#[inline]
pub fn square(phase: f32, pulse_width: f32) -> f32 {
    if wrap(phase) > pulse_width {
        1.0
    } else {
        -1.0
    }
}

/// Exponent applied to the phase to bend the saw toward a rounded square.
#[inline]
pub fn warp_exponent(pulse_width: f32) -> f32 {
    pulse_width * (pulse_width - 0.2) * (pulse_width - 0.3) * (pulse_width - 0.4)
}

#[inline]
fn warped_saw(phase: f32, exponent: f32) -> f32 {
    saw(phase.max(0.0).powf(exponent))
}

/// Waveform selected from the shape and pulse-width controls.
///
/// Picked once per block when both controls are block-constant, so the
/// per-sample path is a single match instead of rebuilt closures.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    /// Plain sawtooth (shape = 0).
    Saw,
    /// Saw fading into the warped saw (0 < shape < 1).
    SawToSmooth { mix: f32, exponent: f32 },
    /// Warped saw fading into the pulse (1 ≤ shape < 2).
    SmoothToSquare {
        mix: f32,
        exponent: f32,
        pulse_width: f32,
    },
    /// Pure pulse (shape = 2).
    Square { pulse_width: f32 },
}

impl Waveform {
    pub fn select(shape: f32, pulse_width: f32) -> Self {
        let shape = if shape.is_nan() { 1.0 } else { shape.clamp(0.0, 2.0) };

        if shape <= 0.0 {
            Waveform::Saw
        } else if shape < 1.0 {
            Waveform::SawToSmooth {
                mix: shape,
                exponent: warp_exponent(pulse_width),
            }
        } else if shape < 2.0 {
            Waveform::SmoothToSquare {
                mix: shape - 1.0,
                exponent: warp_exponent(pulse_width),
                pulse_width,
            }
        } else {
            Waveform::Square { pulse_width }
        }
    }

    #[inline]
    pub fn sample(&self, phase: f32) -> f32 {
        match *self {
            Waveform::Saw => saw(phase),
            Waveform::SawToSmooth { mix, exponent } => {
                (1.0 - mix) * saw(phase) + mix * warped_saw(phase, exponent)
            }
            Waveform::SmoothToSquare {
                mix,
                exponent,
                pulse_width,
            } => (1.0 - mix) * warped_saw(phase, exponent) + mix * square(phase, pulse_width),
            Waveform::Square { pulse_width } => square(phase, pulse_width),
        }
    }
}

/// Continuous saw → smoothed square → pulse morph.
#[inline]
pub fn shape_morph(phase: f32, shape: f32, pulse_width: f32) -> f32 {
    Waveform::select(shape, pulse_width).sample(phase)
}

/// Average of three phase-rate-offset copies; passthrough when `spread` is 0.
#[inline]
pub fn detune_unison(waveform: &Waveform, phase: f32, spread: f32) -> f32 {
    if spread <= 0.0 {
        return waveform.sample(phase);
    }

    let up = waveform.sample(phase * (1.0 + DETUNE_UP * spread));
    let down = waveform.sample(phase * (1.0 - DETUNE_DOWN * spread));
    (waveform.sample(phase) + up + down) / 3.0
}

/// Scale the phase by the decaying pluck transient.
#[inline]
pub fn phase_drop(phase: f32, amount: f32, elapsed: f32) -> f32 {
    phase * (1.0 + amount * pluck_level(elapsed))
}

/// Block-resolved oscillator settings shared by every voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub waveform: Waveform,
    pub spread: f32,
    pub phase_drop: f32,
}

impl Oscillator {
    pub fn new(shape: f32, pulse_width: f32, spread: f32, phase_drop: f32) -> Self {
        Self {
            waveform: Waveform::select(shape, pulse_width),
            spread,
            phase_drop,
        }
    }

    /// Output for a voice at `phase`, `elapsed` seconds after its trigger.
    #[inline]
    pub fn sample(&self, phase: f32, elapsed: f32) -> f32 {
        let warped = phase_drop(phase, self.phase_drop, elapsed);
        detune_unison(&self.waveform, warped, self.spread)
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new(1.0, 0.75, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saw_boundaries() {
        assert_eq!(saw(0.0), -1.0);
        assert_eq!(saw(0.5), 0.0);
        assert!((saw(0.999) - 0.998).abs() < 1e-4);
        assert_eq!(saw(1.25), saw(0.25));
    }

    #[test]
    fn test_square_respects_pulse_width() {
        assert_eq!(square(0.2, 0.5), -1.0);
        assert_eq!(square(0.5, 0.5), -1.0);
        assert_eq!(square(0.6, 0.5), 1.0);
        assert_eq!(square(0.7, 0.75), -1.0);
        assert_eq!(square(0.8, 0.75), 1.0);
    }

    #[test]
    fn test_select_picks_variant_by_shape() {
        assert_eq!(Waveform::select(0.0, 0.75), Waveform::Saw);
        assert!(matches!(Waveform::select(0.5, 0.75), Waveform::SawToSmooth { .. }));
        assert!(matches!(Waveform::select(1.0, 0.75), Waveform::SmoothToSquare { .. }));
        assert_eq!(
            Waveform::select(2.0, 0.75),
            Waveform::Square { pulse_width: 0.75 }
        );
    }

    #[test]
    fn test_shape_zero_is_pure_saw() {
        for i in 0..64 {
            let phase = i as f32 / 64.0;
            assert_eq!(shape_morph(phase, 0.0, 0.75), saw(phase));
        }
    }

    #[test]
    fn test_shape_two_is_pure_square() {
        for i in 0..64 {
            let phase = i as f32 / 64.0;
            assert_eq!(shape_morph(phase, 2.0, 0.6), square(phase, 0.6));
        }
    }

    #[test]
    fn test_morph_is_continuous_at_crossover() {
        for pw in [0.5, 0.75, 0.99] {
            for i in 1..32 {
                let phase = i as f32 / 32.0;
                let below = shape_morph(phase, 1.0 - 1e-6, pw);
                let at = shape_morph(phase, 1.0, pw);
                assert!(
                    (below - at).abs() < 1e-4,
                    "discontinuity at phase {phase}, pw {pw}: {below} vs {at}"
                );
            }
        }
    }

    #[test]
    fn test_morph_starts_at_minus_one() {
        for shape in [0.0, 0.5, 1.0, 1.5] {
            assert_eq!(shape_morph(0.0, shape, 0.75), -1.0, "shape {shape}");
        }
    }

    #[test]
    fn test_zero_spread_is_passthrough() {
        let wave = Waveform::select(0.7, 0.8);
        for i in 0..32 {
            let phase = i as f32 / 32.0;
            assert_eq!(detune_unison(&wave, phase, 0.0), wave.sample(phase));
        }
    }

    #[test]
    fn test_unison_stays_bounded() {
        let wave = Waveform::Saw;
        for i in 0..256 {
            let phase = i as f32 / 256.0;
            let out = detune_unison(&wave, phase, 1.0);
            assert!((-1.0..=1.0).contains(&out), "out of range: {out}");
        }
    }

    #[test]
    fn test_unison_differs_from_single_copy() {
        let wave = Waveform::Saw;
        let differs = (1..64)
            .map(|i| i as f32 / 64.0)
            .any(|phase| (detune_unison(&wave, phase, 1.0) - wave.sample(phase)).abs() > 1e-3);
        assert!(differs);
    }

    #[test]
    fn test_phase_drop_decays_away() {
        assert_eq!(phase_drop(0.3, 0.0, 0.0), 0.3);
        assert!((phase_drop(0.3, 4.0, 0.0) - 1.5).abs() < 1e-6);

        let late = phase_drop(0.3, 4.0, 5.0);
        assert!((late - 0.3).abs() < 1e-6, "transient should be gone: {late}");
    }

    #[test]
    fn test_oscillator_bundles_waveform_and_modifiers() {
        let osc = Oscillator::new(0.0, 0.75, 0.0, 0.0);
        assert_eq!(osc.sample(0.0, 0.0), -1.0);
        assert_eq!(osc.sample(0.25, 1.0), saw(0.25));
    }
}
