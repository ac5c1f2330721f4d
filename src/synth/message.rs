#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::params::descriptor::ParamId;

/// Control → render.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    /// `freq` in Hz, `vel` raw in `0..=1` (the curve is applied on trigger).
    #[cfg_attr(feature = "serde", serde(rename = "noteon"))]
    NoteOn { freq: f32, vel: f32 },
    /// New k-rate value, applied at the next quantum boundary.
    SetParam { param: ParamId, value: f32 },
}

/// Render → control.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StatusMessage {
    /// First quantum rendered.
    Ready { sample_rate: f32, voices: usize },
    /// A note-on landed in `slot`.
    VoiceTriggered { slot: usize, freq: f32 },
    /// The reverb produced its first kernel.
    ReverbPrimed,
    /// Nothing left to render and nobody left to send notes.
    Idle,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;

    /// True once the sending side is gone for good.
    fn is_closed(&self) -> bool {
        false
    }
}

/// Non-blocking status output. Full queues drop the message.
pub trait StatusSender {
    fn send(&mut self, message: StatusMessage);
}

/// Discards every status message.
impl StatusSender for () {
    fn send(&mut self, _message: StatusMessage) {}
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }

    fn is_closed(&self) -> bool {
        self.is_abandoned() && self.is_empty()
    }
}

#[cfg(feature = "rtrb")]
impl StatusSender for Producer<StatusMessage> {
    fn send(&mut self, message: StatusMessage) {
        let _ = self.push(message);
    }
}
