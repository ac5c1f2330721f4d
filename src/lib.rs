pub mod dsp; // Allocation-free DSP primitives
pub mod engine; // Render entry point, config and control handle
pub mod error;
pub mod io; // MIDI, output buffers
pub mod params; // Parameter table and per-quantum resolution
pub mod synth; // Voice pool and messaging

pub const MAX_BLOCK_SIZE: usize = 2048;
pub const MAX_CHANNELS: usize = 8;
pub const MAX_VOICES: usize = 64;
pub const MAX_QUEUE_CAPACITY: usize = 65_536;

pub use engine::{Engine, EngineConfig};
#[cfg(feature = "rtrb")]
pub use engine::{channel, ControlHandle};
pub use error::{ConfigError, ControlError};
pub use io::AudioOutput;
pub use params::{BlockParams, ParamId};
