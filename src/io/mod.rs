//! Audio I/O modules
//!
//! Raw little-endian `f32` decoding and the append-only sample buffer.

pub mod audio_buffer;
pub mod decoder;

pub use audio_buffer::AudioBuffer;
