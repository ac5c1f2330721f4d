/*
Exponential Decay Envelope
==========================

Every voice in the bank is a struck/plucked sound: it starts at full level the
instant it is triggered and decays forever, with no attack, sustain or release
stage. The curve is a plain exponential:

    level(t) = exp(-t / decay)

  Level
    1.0 ┐╲
        │ ╲
  0.368 │  ╲___             ← one time-constant later: exp(-1)
        │      ╲_____
    0.0 └────────────────────────→ t
        0   decay   2·decay

`decay` is the time constant in seconds: after `decay` seconds the level is
1/e ≈ 0.3679, after 5·decay it is below 1%.

Elapsed Time
------------

Time is counted in rendered samples, not read from a host clock. Each voice
owns an `EnvelopeClock` that resets on trigger and ticks once per rendered
sample, so identical input always renders identical output no matter how the
host schedules callbacks.

Pluck Envelope
--------------

The phase-distortion transient uses the same curve with a short fixed time
constant (`PLUCK_DECAY`), so the brightness "pluck" dies away quickly and
independently of the amplitude decay.
*/

/// Time constant of the phase-distortion transient, in seconds.
pub const PLUCK_DECAY: f32 = 0.1;

/// Level below which a voice is considered inaudible (about -80 dBFS).
pub const SILENCE_THRESHOLD: f32 = 1.0e-4;

/// Exponential decay level after `elapsed` seconds.
///
/// A non-positive time constant collapses the envelope to an impulse: 1.0 at
/// `elapsed == 0`, 0.0 afterwards.
#[inline]
pub fn decay_level(elapsed: f32, decay: f32) -> f32 {
    if decay > 0.0 {
        (-elapsed / decay).exp()
    } else if elapsed <= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Fast-decaying envelope driving the phase-distortion amount.
#[inline]
pub fn pluck_level(elapsed: f32) -> f32 {
    decay_level(elapsed, PLUCK_DECAY)
}

/// Elapsed-sample counter for one voice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvelopeClock {
    samples: u64,
}

impl EnvelopeClock {
    pub const fn new() -> Self {
        Self { samples: 0 }
    }

    /// Restart from zero (note trigger).
    pub fn reset(&mut self) {
        self.samples = 0;
    }

    /// Advance by one rendered sample.
    #[inline]
    pub fn tick(&mut self) {
        self.samples = self.samples.saturating_add(1);
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Elapsed time in seconds at the given sample rate.
    #[inline]
    pub fn seconds(&self, sample_rate: f32) -> f32 {
        (self.samples as f64 / sample_rate as f64) as f32
    }
}
