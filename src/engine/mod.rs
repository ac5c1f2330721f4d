//! The render-side engine and its control-side handle.
//!
//! ```text
//! control thread                          audio thread
//! ──────────────                          ────────────
//! ControlHandle ──[SynthMessage queue]──▶ Engine::process
//!       ▲                                   │ drain messages
//!       │                                   │ VoiceBank (mono)
//!       │                                   │ FilterStage   ┐ per
//!       │                                   │ Bitcrusher    ┘ channel
//!       │                                   │ ReverbEngine
//!       └──────[StatusMessage queue]────────┘ liveness
//! ```
//!
//! `Engine::process` never allocates, locks or logs. Buffers are sized from
//! [`EngineConfig`] at construction; a quantum longer than
//! `max_block_size` is rendered in consecutive windows.

pub mod config;
#[cfg(feature = "rtrb")]
pub mod control;

pub use config::EngineConfig;
#[cfg(feature = "rtrb")]
pub use control::{channel, ControlHandle, QueueEngine};

use crate::{
    dsp::{
        bitcrusher::Bitcrusher,
        filter::FilterStage,
        reverb::{ReverbEngine, ReverbParams},
    },
    error::ConfigError,
    io::AudioOutput,
    params::{
        automation::{BlockParams, ParamSnapshot},
        descriptor::ParamId,
    },
    synth::{
        message::{MessageReceiver, StatusMessage, StatusSender, SynthMessage},
        poly::{VoiceBank, VoiceParams},
    },
};

pub struct Engine<R: MessageReceiver, S: StatusSender> {
    config: EngineConfig,
    rx: R,
    status: S,
    snapshot: ParamSnapshot,
    bank: VoiceBank,
    filters: Vec<FilterStage>,
    crusher: Bitcrusher,
    reverb: ReverbEngine,
    mono: Vec<f32>,
    channels: Vec<Vec<f32>>,
    ready_sent: bool,
    primed_sent: bool,
    idle_sent: bool,
}

impl<R: MessageReceiver, S: StatusSender> Engine<R, S> {
    pub fn new(config: EngineConfig, rx: R, status: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let block = config.max_block_size;
        Ok(Self {
            config,
            rx,
            status,
            snapshot: ParamSnapshot::new(),
            bank: VoiceBank::new(config.voices, config.sample_rate),
            filters: (0..config.channels)
                .map(|_| FilterStage::new(config.sample_rate, config.saturation))
                .collect(),
            crusher: Bitcrusher::new(),
            reverb: ReverbEngine::new(config.sample_rate, config.channels, config.kernel_size, block),
            mono: vec![0.0; block],
            channels: vec![vec![0.0; block]; config.channels],
            ready_sent: false,
            primed_sent: false,
            idle_sent: false,
        })
    }

    /// Render one quantum of `params.frames()` frames into `output`.
    ///
    /// Each output channel gets exactly that many samples (or as many as it
    /// can hold). Output channels past the configured count are silenced.
    /// Returns `false` once the control side is gone, every voice has
    /// decayed, and the reverb has nothing left to deliver.
    pub fn process(&mut self, params: &BlockParams<'_>, output: &mut AudioOutput) -> bool {
        if !self.ready_sent {
            self.status.send(StatusMessage::Ready {
                sample_rate: self.config.sample_rate,
                voices: self.bank.len(),
            });
            self.ready_sent = true;
        }

        self.drain_messages();

        let frames = params.frames();
        let step = self.config.max_block_size;
        let mut start = 0;
        while start < frames {
            let len = step.min(frames - start);
            self.render_window(&params.window(start, len), start, output);
            start += len;
        }

        for extra in output.buffers.iter_mut().skip(self.config.channels) {
            let len = frames.min(extra.len());
            extra[..len].fill(0.0);
        }

        if !self.primed_sent && self.reverb.is_primed() {
            self.status.send(StatusMessage::ReverbPrimed);
            self.primed_sent = true;
        }

        let alive = self.is_alive();
        if alive {
            self.idle_sent = false;
        } else if !self.idle_sent {
            self.status.send(StatusMessage::Idle);
            self.idle_sent = true;
        }
        alive
    }

    fn drain_messages(&mut self) {
        while let Some(message) = self.rx.pop() {
            match message {
                SynthMessage::NoteOn { freq, vel } => {
                    if let Some(slot) = self.bank.trigger(freq, vel) {
                        self.status.send(StatusMessage::VoiceTriggered { slot, freq });
                    }
                }
                SynthMessage::SetParam { param, value } => self.snapshot.set(param, value),
            }
        }
    }

    fn render_window(&mut self, params: &BlockParams<'_>, offset: usize, output: &mut AudioOutput) {
        let len = params.frames();
        let snapshot = &self.snapshot;
        let resolve = |id| params.resolve(id, snapshot);

        let voice_params = VoiceParams {
            decay: resolve(ParamId::Decay),
            shape: resolve(ParamId::Shape),
            pulse_width: resolve(ParamId::PulseWidth),
            detune: resolve(ParamId::Detune),
            phase_drop: resolve(ParamId::PhaseDrop),
        };
        self.bank.render(&mut self.mono[..len], &voice_params);

        let lowpass = resolve(ParamId::Lowpass);
        let highpass = resolve(ParamId::Highpass);
        let gain = resolve(ParamId::Saturate);
        let quant = resolve(ParamId::Quant);

        for (channel, filter) in self.channels.iter_mut().zip(self.filters.iter_mut()) {
            let channel = &mut channel[..len];
            channel.copy_from_slice(&self.mono[..len]);
            filter.process(channel, &lowpass, &highpass, &gain);
            self.crusher.process_in_place(channel, &quant);
        }

        let reverb = ReverbParams {
            delay_ms: resolve(ParamId::DelayMs).at(0),
            mix: resolve(ParamId::Mix).at(0),
            decay_factor: resolve(ParamId::DecayFactor).at(0),
        };
        self.reverb.process(&mut self.channels, len, &reverb);

        for (dest, src) in output.buffers.iter_mut().zip(self.channels.iter()) {
            if offset >= dest.len() {
                continue;
            }
            let n = len.min(dest.len() - offset);
            dest[offset..offset + n].copy_from_slice(&src[..n]);
        }
    }

    fn is_alive(&self) -> bool {
        !self.rx.is_closed() || self.bank.is_audible() || self.reverb.has_pending_output()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &ParamSnapshot {
        &self.snapshot
    }

    pub fn voice_bank(&self) -> &VoiceBank {
        &self.bank
    }

    pub fn reverb(&self) -> &ReverbEngine {
        &self.reverb
    }

    pub fn filters(&self) -> &[FilterStage] {
        &self.filters
    }
}
