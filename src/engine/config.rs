#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    dsp::{filter::SaturationStage, reverb::MAX_KERNEL_SIZE},
    error::ConfigError,
    MAX_BLOCK_SIZE, MAX_CHANNELS, MAX_QUEUE_CAPACITY, MAX_VOICES,
};

/// Everything fixed at engine construction.
///
/// All buffers are sized from this once; nothing is reallocated afterwards.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    pub voices: usize,
    pub channels: usize,
    /// Reverb kernel length in frames.
    pub kernel_size: usize,
    /// Largest quantum the host will request.
    pub max_block_size: usize,
    pub message_capacity: usize,
    pub status_capacity: usize,
    pub saturation: SaturationStage,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            voices: 4,
            channels: 2,
            kernel_size: 1024,
            max_block_size: 128,
            message_capacity: 256,
            status_capacity: 64,
            saturation: SaturationStage::Pre,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.voices == 0 {
            return Err(ConfigError::NoVoices);
        }
        if self.voices > MAX_VOICES {
            return Err(ConfigError::TooManyVoices {
                got: self.voices,
                max: MAX_VOICES,
            });
        }
        if self.channels == 0 || self.channels > MAX_CHANNELS {
            return Err(ConfigError::InvalidChannelCount {
                got: self.channels,
                max: MAX_CHANNELS,
            });
        }
        if self.kernel_size == 0 || self.kernel_size > MAX_KERNEL_SIZE {
            return Err(ConfigError::InvalidKernelSize {
                got: self.kernel_size,
                max: MAX_KERNEL_SIZE,
            });
        }
        if self.max_block_size == 0 || self.max_block_size > MAX_BLOCK_SIZE {
            return Err(ConfigError::InvalidBlockSize {
                got: self.max_block_size,
                max: MAX_BLOCK_SIZE,
            });
        }
        for capacity in [self.message_capacity, self.status_capacity] {
            if capacity == 0 || capacity > MAX_QUEUE_CAPACITY {
                return Err(ConfigError::InvalidQueueCapacity {
                    got: capacity,
                    max: MAX_QUEUE_CAPACITY,
                });
            }
        }

        if self.kernel_size % self.max_block_size != 0 {
            warn!(
                kernel_size = self.kernel_size,
                max_block_size = self.max_block_size,
                "reverb kernel is not a multiple of the block size, expect periodic silent gaps"
            );
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
