//! Control-side half of the engine.
//!
//! Everything here runs off the audio thread: it may log, allocate and fail.
//! The only link to the render side is a pair of lock-free SPSC queues.

use rtrb::{Consumer, Producer, PushError, RingBuffer};
use tracing::{debug, info, warn};

use crate::{
    engine::{config::EngineConfig, Engine},
    error::{ConfigError, ControlError},
    io::{converter::midi_to_synth, midi::MidiEvent},
    params::descriptor::ParamId,
    synth::message::{StatusMessage, SynthMessage},
};

/// Render half produced by [`channel`].
pub type QueueEngine = Engine<Consumer<SynthMessage>, Producer<StatusMessage>>;

/// Build a connected control handle and render engine.
pub fn channel(config: EngineConfig) -> Result<(ControlHandle, QueueEngine), ConfigError> {
    if let Err(err) = config.validate() {
        warn!(%err, "rejected engine config");
        return Err(err);
    }

    let (message_tx, message_rx) = RingBuffer::new(config.message_capacity.max(1));
    let (status_tx, status_rx) = RingBuffer::new(config.status_capacity.max(1));

    let engine = Engine::new(config, message_rx, status_tx)?;
    info!(
        sample_rate = config.sample_rate,
        voices = config.voices,
        channels = config.channels,
        kernel_size = config.kernel_size,
        "engine created"
    );

    let handle = ControlHandle {
        tx: message_tx,
        status: status_rx,
        midi_channel: None,
    };
    Ok((handle, engine))
}

pub struct ControlHandle {
    tx: Producer<SynthMessage>,
    status: Consumer<StatusMessage>,
    midi_channel: Option<u8>,
}

impl ControlHandle {
    /// Queue a note-on. `vel` is raw `0..=1`.
    pub fn note_on(&mut self, freq: f32, vel: f32) -> Result<(), ControlError> {
        if !(freq.is_finite() && freq > 0.0) {
            return Err(ControlError::InvalidFrequency(freq));
        }
        self.send(SynthMessage::NoteOn { freq, vel })
    }

    /// Forward a MIDI event. Returns whether it produced a note-on.
    ///
    /// Only note-ons are acted on; note-offs are accepted and ignored.
    pub fn midi(&mut self, event: MidiEvent) -> Result<bool, ControlError> {
        let channel = self.midi_channel.unwrap_or_else(|| event.channel());
        match midi_to_synth(event, channel) {
            Some(message) => self.send(message).map(|()| true),
            None => {
                debug!(?event, "ignoring midi event");
                Ok(false)
            }
        }
    }

    /// Listen on one MIDI channel only; `None` accepts all of them.
    pub fn set_midi_channel(&mut self, channel: Option<u8>) {
        self.midi_channel = channel;
    }

    /// Queue a k-rate parameter change for the next quantum.
    pub fn set_param(&mut self, param: ParamId, value: f32) -> Result<(), ControlError> {
        self.send(SynthMessage::SetParam { param, value })
    }

    pub fn set_param_by_name(&mut self, name: &str, value: f32) -> Result<(), ControlError> {
        let param = ParamId::from_name(name)?;
        self.set_param(param, value)
    }

    /// Next status message from the render side, if any.
    pub fn poll_status(&mut self) -> Option<StatusMessage> {
        self.status.pop().ok()
    }

    /// False once the engine has been dropped.
    pub fn is_render_alive(&self) -> bool {
        !self.tx.is_abandoned()
    }

    fn send(&mut self, message: SynthMessage) -> Result<(), ControlError> {
        if self.tx.is_abandoned() {
            warn!(?message, "render side is gone, dropping message");
            return Err(ControlError::Disconnected);
        }

        match self.tx.push(message) {
            Ok(()) => Ok(()),
            Err(PushError::Full(message)) => {
                warn!(?message, "control queue full, dropping message");
                Err(ControlError::QueueFull)
            }
        }
    }
}
