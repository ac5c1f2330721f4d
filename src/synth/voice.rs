use crate::dsp::envelope::{decay_level, EnvelopeClock};
use crate::dsp::oscillator::Oscillator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,     // Never triggered, or decayed below the silence threshold
    Sounding, // Triggered and still audible
}

/// One polyphonic note slot.
///
/// Plain data: the bank keeps a fixed array of these and overwrites them in
/// place on trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    phase: f32,
    frequency: f32,
    velocity: f32,
    clock: EnvelopeClock,
    active: bool,
}

impl Voice {
    pub const fn new() -> Self {
        Self {
            phase: 0.0,
            frequency: 0.0,
            velocity: 0.0,
            clock: EnvelopeClock::new(),
            active: false,
        }
    }

    /// Restart from phase 0 with a fresh envelope. `velocity` is post-curve.
    ///
    /// `frequency` must be finite; [`VoiceBank::trigger`](crate::synth::VoiceBank::trigger)
    /// filters everything else out before it reaches a slot.
    pub fn trigger(&mut self, frequency: f32, velocity: f32) {
        self.phase = 0.0;
        self.frequency = frequency;
        self.velocity = velocity;
        self.clock.reset();
        self.active = true;
    }

    /// Produce this voice's contribution and step it forward one sample.
    ///
    /// Idle voices return 0.0 and do not move.
    #[inline]
    pub fn next_sample(&mut self, oscillator: &Oscillator, decay: f32, sample_rate: f32) -> f32 {
        if !self.active {
            return 0.0;
        }

        let elapsed = self.clock.seconds(sample_rate);
        let envelope = decay_level(elapsed, decay);
        let out = oscillator.sample(self.phase, elapsed) * self.velocity * envelope;

        self.phase = advance_phase(self.phase, self.frequency / sample_rate);
        self.clock.tick();
        out
    }

    /// Current envelope gain (velocity × decay) for the given time constant.
    pub fn level(&self, decay: f32, sample_rate: f32) -> f32 {
        if !self.active {
            return 0.0;
        }
        self.velocity * decay_level(self.clock.seconds(sample_rate), decay)
    }

    /// Mark idle once the level has fallen below `threshold`.
    pub fn retire_if_silent(&mut self, decay: f32, sample_rate: f32, threshold: f32) {
        if self.active && self.level(decay, sample_rate) < threshold {
            self.active = false;
        }
    }

    pub fn state(&self) -> VoiceState {
        if self.active {
            VoiceState::Sounding
        } else {
            VoiceState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn elapsed_samples(&self) -> u64 {
        self.clock.samples()
    }
}

/// Step `phase` by `increment` and wrap into `[0, 1)`, negative steps included.
#[inline]
fn advance_phase(phase: f32, increment: f32) -> f32 {
    let next = (phase + increment).rem_euclid(1.0);
    // rem_euclid rounds tiny negative values up to exactly 1.0
    if next < 1.0 {
        next
    } else {
        0.0
    }
}

impl Default for Voice {
    fn default() -> Self {
        Self::new()
    }
}
