//! Fixed-capacity multi-channel sample FIFO.
//!
//! Used to decouple the host's quantum size from a processor's internal
//! kernel size: the producer pushes whatever the host hands over, the
//! consumer pulls whole kernels (or whole quanta) once enough frames exist.
//!
//! ```text
//!            write_index
//!                 ↓
//!   [ . . . x x x x . . . ]   capacity L, per channel
//!           ↑
//!       read_index            frames_available = 4
//! ```
//!
//! Overflow policy: pushing more than the free space silently overwrites the
//! oldest unread frames and caps `frames_available` at the capacity. Underrun
//! policy: a pull never hands out more frames than are available, and leaves
//! the remaining destination samples untouched.

pub struct RingBuffer {
    data: Box<[f32]>,
    capacity: usize,
    channels: usize,
    write_index: usize,
    read_index: usize,
    frames_available: usize,
}

impl RingBuffer {
    /// Allocate a ring of `capacity` frames for `channels` channels.
    ///
    /// Both values are raised to at least 1.
    pub fn new(capacity: usize, channels: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = channels.max(1);

        Self {
            data: vec![0.0; capacity * channels].into_boxed_slice(),
            capacity,
            channels,
            write_index: 0,
            read_index: 0,
            frames_available: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn frames_available(&self) -> usize {
        self.frames_available
    }

    pub fn is_empty(&self) -> bool {
        self.frames_available == 0
    }

    /// Push the first `frames` samples of each source channel.
    ///
    /// Source channels beyond the ring's channel count are ignored; ring
    /// channels without a source (or with a shorter source) receive zeros.
    pub fn push<B: AsRef<[f32]>>(&mut self, source: &[B], frames: usize) {
        for i in 0..frames {
            let index = (self.write_index + i) % self.capacity;
            for ch in 0..self.channels {
                let sample = source
                    .get(ch)
                    .and_then(|s| s.as_ref().get(i))
                    .copied()
                    .unwrap_or(0.0);
                self.data[ch * self.capacity + index] = sample;
            }
        }

        self.write_index = (self.write_index + frames) % self.capacity;

        let total = self.frames_available + frames;
        if total > self.capacity {
            // Oldest unread frames were overwritten; the reader restarts at
            // the oldest surviving frame.
            self.frames_available = self.capacity;
            self.read_index = self.write_index;
        } else {
            self.frames_available = total;
        }
    }

    /// Pull up to `frames` frames into each destination channel.
    ///
    /// Returns the number of frames actually written. Destination samples past
    /// that count are left as they were.
    pub fn pull<B: AsMut<[f32]>>(&mut self, destination: &mut [B], frames: usize) -> usize {
        let count = frames.min(self.frames_available);

        for (ch, dest) in destination.iter_mut().take(self.channels).enumerate() {
            let dest = dest.as_mut();
            let count = count.min(dest.len());
            let base = ch * self.capacity;
            for (i, slot) in dest[..count].iter_mut().enumerate() {
                *slot = self.data[base + (self.read_index + i) % self.capacity];
            }
        }

        self.read_index = (self.read_index + count) % self.capacity;
        self.frames_available -= count;
        count
    }

    /// Drop all buffered frames.
    pub fn clear(&mut self) {
        self.write_index = 0;
        self.read_index = 0;
        self.frames_available = 0;
    }
}
