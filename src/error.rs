//! Error types surfaced to the control side.
//!
//! Nothing in here is ever constructed on the render path. Configuration and
//! automation problems are caught while the engine is built or while a
//! quantum's [`BlockParams`](crate::params::automation::BlockParams) is being
//! assembled, so the audio callback only ever sees validated data.

use thiserror::Error;

/// Invalid engine setup or malformed per-quantum automation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f32),

    #[error("voice bank needs at least one voice")]
    NoVoices,

    #[error("voice bank holds at most {max} voices, got {got}")]
    TooManyVoices { got: usize, max: usize },

    #[error("channel count must be between 1 and {max}, got {got}")]
    InvalidChannelCount { got: usize, max: usize },

    #[error("reverb kernel size must be between 1 and {max} frames, got {got}")]
    InvalidKernelSize { got: usize, max: usize },

    #[error("queue capacity must be between 1 and {max}, got {got}")]
    InvalidQueueCapacity { got: usize, max: usize },

    #[error("block size must be between 1 and {max} frames, got {got}")]
    InvalidBlockSize { got: usize, max: usize },

    #[error("automation for `{param}` has {got} values, expected 1 or {frames}")]
    MalformedAutomation {
        param: &'static str,
        got: usize,
        frames: usize,
    },

    #[error("unknown parameter `{0}`")]
    UnknownParam(String),

    #[cfg(feature = "serde")]
    #[error("failed to parse engine config: {0}")]
    Parse(String),
}

/// Failure to hand a message to the render side.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error("control queue is full, message dropped")]
    QueueFull,

    #[error("render side has been dropped")]
    Disconnected,

    #[error("note frequency must be positive and finite, got {0}")]
    InvalidFrequency(f32),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
