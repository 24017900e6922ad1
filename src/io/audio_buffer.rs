//! Append-only microphone sample buffer

use super::decoder::{decode_complete, BYTES_PER_SAMPLE};
use crate::features::frame::Frame;

/// Growing buffer of mono `f32` samples
///
/// Bytes can be pushed in chunks split at any boundary; an incomplete
/// trailing sample is held back until the rest of its bytes arrive.
#[derive(Debug, Default, Clone)]
pub struct AudioBuffer {
    data: Vec<f32>,
    /// Leftover bytes of a sample split across pushes (always < 4)
    pending: Vec<u8>,
}

impl AudioBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            pending: Vec::with_capacity(BYTES_PER_SAMPLE),
        }
    }

    /// Append decoded samples
    pub fn push(&mut self, samples: &[f32]) {
        self.data.extend_from_slice(samples);
    }

    /// Append raw little-endian `f32` bytes
    ///
    /// Returns the number of complete samples added by this call.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> usize {
        let before = self.data.len();
        let mut rest = bytes;

        if !self.pending.is_empty() {
            let missing = BYTES_PER_SAMPLE - self.pending.len();
            let take = missing.min(rest.len());
            self.pending.extend_from_slice(&rest[..take]);
            rest = &rest[take..];

            if self.pending.len() < BYTES_PER_SAMPLE {
                return 0;
            }
            self.data.extend(decode_complete(&self.pending));
            self.pending.clear();
        }

        let complete = rest.len() - rest.len() % BYTES_PER_SAMPLE;
        self.data.extend(decode_complete(&rest[..complete]));
        self.pending.extend_from_slice(&rest[complete..]);

        self.data.len() - before
    }

    /// All complete samples received so far
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Number of complete samples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when no complete sample has been received
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of bytes waiting for the rest of their sample
    pub fn pending_bytes(&self) -> usize {
        self.pending.len()
    }

    /// Samples covered by `frame`, clamped to what has been received
    pub fn frame_window(&self, frame: &Frame) -> &[f32] {
        let end = frame.end.min(self.data.len());
        let start = frame.start.min(end);
        &self.data[start..end]
    }
}
