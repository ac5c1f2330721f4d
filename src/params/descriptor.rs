//! Automatable parameter table.
//!
//! Every control the engine exposes is listed here once, with its default and
//! legal range. The table is what a host sees at discovery time and what the
//! render side clamps against, so the two can never disagree.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name, default and range of one automatable control.
///
/// Serialises as `{ name, defaultValue, minValue, maxValue }`.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterDescriptor {
    pub name: &'static str,
    pub default_value: f32,
    pub min_value: f32,
    pub max_value: f32,
}

impl ParameterDescriptor {
    pub const fn new(name: &'static str, default_value: f32, min_value: f32, max_value: f32) -> Self {
        Self {
            name,
            default_value,
            min_value,
            max_value,
        }
    }

    /// Clamp into range. NaN becomes the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default_value
        } else {
            value.clamp(self.min_value, self.max_value)
        }
    }
}

/// Identifies one entry of the parameter table.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    /// Amplitude envelope time constant, seconds.
    Decay,
    /// Pulse width of the square and the warp exponent source.
    #[cfg_attr(feature = "serde", serde(rename = "pw"))]
    PulseWidth,
    /// Depth of the phase-drop pluck transient.
    PhaseDrop,
    /// Saw → smoothed square → pulse morph.
    Shape,
    /// Unison spread.
    Detune,
    Lowpass,
    #[cfg_attr(feature = "serde", serde(rename = "hipass"))]
    Highpass,
    /// Saturator drive.
    Saturate,
    /// Bitcrusher hold factor.
    Quant,
    DelayMs,
    Mix,
    DecayFactor,
}

const DESCRIPTORS: [ParameterDescriptor; ParamId::COUNT] = [
    ParameterDescriptor::new("decay", 0.25, 0.01, 1.0),
    ParameterDescriptor::new("pw", 0.75, 0.5, 0.99),
    ParameterDescriptor::new("phaseDrop", 0.0, 0.0, 10.0),
    ParameterDescriptor::new("shape", 1.0, 0.0, 2.0),
    ParameterDescriptor::new("detune", 0.0, 0.0, 1.0),
    ParameterDescriptor::new("lowpass", 10_000.0, 0.0, 20_000.0),
    ParameterDescriptor::new("hipass", 10_000.0, 0.0, 20_000.0),
    ParameterDescriptor::new("saturate", 1.0, 0.01, 10.0),
    ParameterDescriptor::new("quant", 1.0, 1.0, 128.0),
    ParameterDescriptor::new("delayMs", 12.0, 1.0, 1_000.0),
    ParameterDescriptor::new("mix", 0.5, 0.0, 1.0),
    ParameterDescriptor::new("decayFactor", 0.4, 0.311, 0.999),
];

impl ParamId {
    pub const COUNT: usize = 12;

    /// Table order; `ALL[id.index()] == id`.
    pub const ALL: [ParamId; ParamId::COUNT] = [
        ParamId::Decay,
        ParamId::PulseWidth,
        ParamId::PhaseDrop,
        ParamId::Shape,
        ParamId::Detune,
        ParamId::Lowpass,
        ParamId::Highpass,
        ParamId::Saturate,
        ParamId::Quant,
        ParamId::DelayMs,
        ParamId::Mix,
        ParamId::DecayFactor,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn descriptor(self) -> &'static ParameterDescriptor {
        &DESCRIPTORS[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Look a parameter up by its discovery name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name() == name)
            .ok_or_else(|| ConfigError::UnknownParam(name.to_string()))
    }
}

/// The full discovery table, in [`ParamId::ALL`] order.
pub fn descriptors() -> &'static [ParameterDescriptor] {
    &DESCRIPTORS
}
