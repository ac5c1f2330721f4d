// Purpose: Voice pool, note triggering and the control/render message contract
// This layer sits between the DSP primitives and the engine

pub mod message;
pub mod poly;
pub mod voice;

pub use message::{MessageReceiver, StatusMessage, StatusSender, SynthMessage};
pub use poly::{velocity_curve, VoiceBank, VoiceParams};
pub use voice::{Voice, VoiceState};
