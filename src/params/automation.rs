use crate::error::ConfigError;
use crate::params::descriptor::{ParamId, ParameterDescriptor};
use crate::MAX_BLOCK_SIZE;

/*
Parameter Resolution
====================

Each quantum, every parameter arrives as one of:

    no lane        → the k-rate value held in the render-side snapshot
    [v]            → k-rate: v for the whole quantum
    [v0 .. vN-1]   → a-rate: one value per output frame

The choice is made once per parameter per quantum by looking at the array
length, then the DSP code asks the resolved parameter for "the value at frame
i" without caring which case it is. Anything derived from a k-rate value
(filter coefficients, the selected waveform) is computed once; anything
derived from an a-rate value is recomputed every frame. There is no
interpolation between the two.

Every value handed out is clamped into the descriptor's range and NaN is
replaced by the default, so nothing a host sends can leak NaN into a
recursive filter.

Lane lengths other than 1 or the frame count are rejected when the
`BlockParams` is built, on the host side, before the quantum is rendered.
*/

/// One parameter, resolved for the current quantum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedParam<'a> {
    /// Same (already clamped) value for every frame.
    Constant(f32),
    /// One raw value per frame, clamped on read.
    PerSample {
        values: &'a [f32],
        min: f32,
        max: f32,
        default: f32,
    },
}

impl<'a> ResolvedParam<'a> {
    /// Pick the rate from the array length.
    ///
    /// An empty array resolves to the descriptor default.
    pub fn from_values(values: &'a [f32], descriptor: &ParameterDescriptor) -> Self {
        match values {
            [] => ResolvedParam::Constant(descriptor.default_value),
            [value] => ResolvedParam::Constant(descriptor.clamp(*value)),
            _ => ResolvedParam::PerSample {
                values,
                min: descriptor.min_value,
                max: descriptor.max_value,
                default: descriptor.default_value,
            },
        }
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        matches!(self, ResolvedParam::Constant(_))
    }

    /// Value at frame `index`.
    ///
    /// Indices past the end of a per-sample array hold its last value.
    #[inline]
    pub fn at(&self, index: usize) -> f32 {
        match *self {
            ResolvedParam::Constant(value) => value,
            ResolvedParam::PerSample {
                values,
                min,
                max,
                default,
            } => match values.get(index).or(values.last()) {
                Some(value) if !value.is_nan() => value.clamp(min, max),
                _ => default,
            },
        }
    }
}

/// Render-side k-rate values, one per parameter.
///
/// Updated from `SetParam` messages between quanta, so a quantum always sees
/// one coherent set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    values: [f32; ParamId::COUNT],
}

impl ParamSnapshot {
    pub fn new() -> Self {
        Self {
            values: ParamId::ALL.map(|id| id.descriptor().default_value),
        }
    }

    /// Store a clamped value.
    pub fn set(&mut self, id: ParamId, value: f32) {
        self.values[id.index()] = id.descriptor().clamp(value);
    }

    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        self.values[id.index()]
    }
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame count and optional automation lanes for one render quantum.
///
/// ```ignore
/// let sweep: Vec<f32> = (0..128).map(|i| 200.0 + i as f32 * 50.0).collect();
/// let params = BlockParams::new(128)?
///     .with_automation(ParamId::Lowpass, &sweep)?
///     .with_automation(ParamId::Mix, &[0.2])?;
/// engine.process(&params, &mut output);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockParams<'a> {
    frames: usize,
    lanes: [Option<&'a [f32]>; ParamId::COUNT],
}

impl<'a> BlockParams<'a> {
    pub fn new(frames: usize) -> Result<Self, ConfigError> {
        if frames == 0 || frames > MAX_BLOCK_SIZE {
            return Err(ConfigError::InvalidBlockSize {
                got: frames,
                max: MAX_BLOCK_SIZE,
            });
        }
        Ok(Self {
            frames,
            lanes: [None; ParamId::COUNT],
        })
    }

    /// Attach a k-rate (length 1) or a-rate (length `frames`) lane.
    pub fn with_automation(mut self, id: ParamId, values: &'a [f32]) -> Result<Self, ConfigError> {
        if values.len() != 1 && values.len() != self.frames {
            return Err(ConfigError::MalformedAutomation {
                param: id.name(),
                got: values.len(),
                frames: self.frames,
            });
        }
        self.lanes[id.index()] = Some(values);
        Ok(self)
    }

    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn lane(&self, id: ParamId) -> Option<&'a [f32]> {
        self.lanes[id.index()]
    }

    /// Sub-range `start..start + len` of this quantum.
    ///
    /// Per-sample lanes are sliced; block-constant lanes carry over.
    pub fn window(&self, start: usize, len: usize) -> BlockParams<'a> {
        let end = start.saturating_add(len).min(self.frames);
        let start = start.min(end);

        let mut lanes = self.lanes;
        for values in lanes.iter_mut().flatten() {
            if values.len() == self.frames && values.len() > 1 {
                let full: &'a [f32] = *values;
                *values = &full[start..end];
            }
        }

        BlockParams {
            frames: end - start,
            lanes,
        }
    }

    /// Resolve `id` for this quantum, falling back to the snapshot.
    pub fn resolve(&self, id: ParamId, snapshot: &ParamSnapshot) -> ResolvedParam<'a> {
        match self.lanes[id.index()] {
            Some(values) => ResolvedParam::from_values(values, id.descriptor()),
            None => ResolvedParam::Constant(snapshot.get(id)),
        }
    }
}
