use crate::{
    dsp::{envelope::SILENCE_THRESHOLD, oscillator::Oscillator},
    params::automation::ResolvedParam,
    synth::voice::Voice,
    MAX_VOICES,
};

/*
Voice Bank
==========

A fixed pool of N voices and a round-robin cursor.

Trigger
-------

    same frequency already sounding?  ── yes ──▶ retrigger that slot
                  │ no
                  ▼
    take slot[cursor], whatever it is doing (unconditional steal)

    cursor = (cursor + 1) mod N        ← either way

Retriggering an existing pitch keeps two copies of the same note from
stacking in unison. Frequencies are compared exactly: the control side sends
the same f32 for the same note.

Per Sample
----------

For each voice in slot order:

    env  = exp(−elapsed / decay)
    out += osc(phase, elapsed) · velocity · env
    phase = (phase + f / sr) mod 1
    elapsed += 1 sample

Slot order is fixed, so identical input renders bit-identical output.

Velocity is curved once, at trigger: v' = v².
*/

/// Map raw velocity (0..1) to gain. NaN is treated as silence.
#[inline]
pub fn velocity_curve(raw: f32) -> f32 {
    if raw.is_nan() {
        return 0.0;
    }
    let v = raw.clamp(0.0, 1.0);
    v * v
}

/// Voice-side parameters for one quantum.
#[derive(Debug, Clone, Copy)]
pub struct VoiceParams<'a> {
    pub decay: ResolvedParam<'a>,
    pub shape: ResolvedParam<'a>,
    pub pulse_width: ResolvedParam<'a>,
    pub detune: ResolvedParam<'a>,
    pub phase_drop: ResolvedParam<'a>,
}

impl VoiceParams<'_> {
    fn oscillator_is_constant(&self) -> bool {
        self.shape.is_constant()
            && self.pulse_width.is_constant()
            && self.detune.is_constant()
            && self.phase_drop.is_constant()
    }

    #[inline]
    fn oscillator_at(&self, index: usize) -> Oscillator {
        Oscillator::new(
            self.shape.at(index),
            self.pulse_width.at(index),
            self.detune.at(index),
            self.phase_drop.at(index),
        )
    }
}

impl Default for VoiceParams<'_> {
    fn default() -> Self {
        Self {
            decay: ResolvedParam::Constant(0.25),
            shape: ResolvedParam::Constant(1.0),
            pulse_width: ResolvedParam::Constant(0.75),
            detune: ResolvedParam::Constant(0.0),
            phase_drop: ResolvedParam::Constant(0.0),
        }
    }
}

pub struct VoiceBank {
    voices: Vec<Voice>,
    cursor: usize,
    sample_rate: f32,
}

impl VoiceBank {
    /// `voice_count` is clamped to `1..=MAX_VOICES`.
    pub fn new(voice_count: usize, sample_rate: f32) -> Self {
        Self {
            voices: vec![Voice::new(); voice_count.clamp(1, MAX_VOICES)],
            cursor: 0,
            sample_rate,
        }
    }

    /// Start a note and return the slot it landed in.
    ///
    /// Frequencies that are not finite and positive are ignored: no slot
    /// changes and the cursor stays put.
    pub fn trigger(&mut self, frequency: f32, raw_velocity: f32) -> Option<usize> {
        if !(frequency.is_finite() && frequency > 0.0) {
            return None;
        }

        let slot = self
            .voices
            .iter()
            .position(|v| v.is_active() && v.frequency() == frequency)
            .unwrap_or(self.cursor);

        self.voices[slot].trigger(frequency, velocity_curve(raw_velocity));
        self.cursor = (self.cursor + 1) % self.voices.len();
        Some(slot)
    }

    /// Sum of every voice for one sample.
    #[inline]
    pub fn next_sample(&mut self, oscillator: &Oscillator, decay: f32) -> f32 {
        let sample_rate = self.sample_rate;
        self.voices
            .iter_mut()
            .map(|voice| voice.next_sample(oscillator, decay, sample_rate))
            .sum()
    }

    /// Overwrite `out` with the mixed voices for one quantum.
    pub fn render(&mut self, out: &mut [f32], params: &VoiceParams<'_>) {
        if out.is_empty() {
            return;
        }

        if params.oscillator_is_constant() {
            let oscillator = params.oscillator_at(0);
            for (i, sample) in out.iter_mut().enumerate() {
                *sample = self.next_sample(&oscillator, params.decay.at(i));
            }
        } else {
            for (i, sample) in out.iter_mut().enumerate() {
                let oscillator = params.oscillator_at(i);
                *sample = self.next_sample(&oscillator, params.decay.at(i));
            }
        }

        let decay = params.decay.at(out.len() - 1);
        for voice in self.voices.iter_mut() {
            voice.retire_if_silent(decay, self.sample_rate, SILENCE_THRESHOLD);
        }
    }

    /// True while any voice is still above the silence threshold.
    pub fn is_audible(&self) -> bool {
        self.voices.iter().any(Voice::is_active)
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}
