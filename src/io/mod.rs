// Purpose - external interfaces, format conversions

pub mod converter;
pub mod midi;

/// Planar output buffers, one `Vec` per channel.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AudioOutput {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioOutput {
    /// Allocate `channels` zeroed buffers of `frames` samples.
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; frames]; channels],
        }
    }

    pub fn channels(&self) -> usize {
        self.buffers.len()
    }

    /// Frames held by the shortest channel.
    pub fn frames(&self) -> usize {
        self.buffers.iter().map(Vec::len).min().unwrap_or(0)
    }

    /// Interleave the first `frames` frames into `dest` (for device callbacks).
    pub fn interleave_into(&self, dest: &mut [f32], frames: usize) {
        let channels = self.channels();
        if channels == 0 {
            return;
        }
        for (frame, out) in dest.chunks_mut(channels).take(frames).enumerate() {
            for (ch, sample) in out.iter_mut().enumerate() {
                *sample = self.buffers[ch].get(frame).copied().unwrap_or(0.0);
            }
        }
    }
}
