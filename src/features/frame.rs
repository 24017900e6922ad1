//! Frame segmentation
//!
//! Maps a global frame index to a half-open sample range of the growing
//! microphone buffer. One frame is consumed per agent tick, so a frame spans
//! `floor(sample_rate * action_interval)` samples.
//!
//! The final frame is clamped to the buffer length without error, and a
//! frame that starts at or past the end of the buffer is empty. Callers
//! treat an empty frame as "no more audio yet".

use serde::{Deserialize, Serialize};

use crate::config::samples_per_frame;
use crate::error::FeatureError;

/// Half-open sample range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    /// First sample index (inclusive)
    pub start: usize,
    /// Last sample index (exclusive)
    pub end: usize,
}

impl Frame {
    /// Number of samples in the frame
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for the terminal end-of-stream frame
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Sample range usable for slicing
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Compute the sample range of frame `frame_index`
///
/// # Arguments
///
/// * `num_samples` - Samples currently in the buffer
/// * `frame_index` - Zero-based frame (tick) counter
/// * `sample_rate` - Sample rate in Hz
/// * `action_interval` - Seconds per frame
///
/// # Errors
///
/// `InvalidConfiguration` if the rate/interval pair gives a frame of zero
/// samples (see [`samples_per_frame`]).
///
/// # Example
///
/// ```
/// use mimic_dsp::features::frame::segment;
///
/// let frame = segment(1000, 2, 8000, 0.05)?;
/// assert_eq!((frame.start, frame.end), (800, 1000));
/// # Ok::<(), mimic_dsp::FeatureError>(())
/// ```
pub fn segment(
    num_samples: usize,
    frame_index: usize,
    sample_rate: u32,
    action_interval: f64,
) -> Result<Frame, FeatureError> {
    let frame_size = samples_per_frame(sample_rate, action_interval)?;
    Ok(segment_with_size(num_samples, frame_index, frame_size))
}

/// Same as [`segment`] with an already-derived frame size (>= 1)
pub fn segment_with_size(num_samples: usize, frame_index: usize, frame_size: usize) -> Frame {
    let nominal_start = frame_index.saturating_mul(frame_size);
    let start = nominal_start.min(num_samples);
    let end = nominal_start.saturating_add(frame_size).min(num_samples);

    if end - start < frame_size && start < num_samples {
        log::debug!(
            "Frame {} clamped to {} of {} samples",
            frame_index,
            end - start,
            frame_size
        );
    }

    Frame { start, end }
}

/// Number of non-empty frames covering `num_samples`: `ceil(N / frame_size)`
pub fn frame_count(num_samples: usize, frame_size: usize) -> usize {
    if frame_size == 0 {
        return 0;
    }
    num_samples.div_ceil(frame_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_basic() {
        // 8000 Hz * 0.05 s = 400 samples per frame
        let frame = segment(2000, 0, 8000, 0.05).unwrap();
        assert_eq!(frame, Frame { start: 0, end: 400 });

        let frame = segment(2000, 3, 8000, 0.05).unwrap();
        assert_eq!(frame, Frame { start: 1200, end: 1600 });
        assert_eq!(frame.len(), 400);
    }

    #[test]
    fn test_segment_clamps_last_frame() {
        let frame = segment(1000, 2, 8000, 0.05).unwrap();
        assert_eq!(frame, Frame { start: 800, end: 1000 });
        assert_eq!(frame.len(), 200);
    }

    #[test]
    fn test_segment_past_end_is_empty() {
        let frame = segment(1000, 3, 8000, 0.05).unwrap();
        assert!(frame.is_empty());
        assert_eq!(frame, Frame { start: 1000, end: 1000 });

        let frame = segment(0, 0, 8000, 0.05).unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_segment_huge_index_does_not_overflow() {
        let frame = segment(1000, usize::MAX, 8000, 0.05).unwrap();
        assert!(frame.is_empty());
        assert!(frame.end <= 1000);
    }

    #[test]
    fn test_segment_invalid_config() {
        assert!(segment(1000, 0, 0, 0.1).is_err());
        assert!(segment(1000, 0, 8000, 0.0).is_err());
        assert!(matches!(
            segment(1000, 0, 100, 0.001),
            Err(FeatureError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_segment_range_invariant() {
        for num_samples in [0usize, 1, 7, 399, 400, 401, 1234] {
            for frame_index in 0..8 {
                for (rate, interval) in [(8000u32, 0.05f64), (1000, 0.003), (44100, 0.1)] {
                    let a = segment(num_samples, frame_index, rate, interval).unwrap();
                    let b = segment(num_samples, frame_index, rate, interval).unwrap();
                    assert_eq!(a, b, "segmentation must be deterministic");
                    assert!(a.start <= a.end && a.end <= num_samples, "{:?}", a);
                }
            }
        }
    }

    #[test]
    fn test_consecutive_frames_tile_buffer() {
        let frame_size = 7;
        for num_samples in [0usize, 1, 6, 7, 8, 50, 63] {
            let expected = frame_count(num_samples, frame_size);
            let mut next_start = 0;
            let mut non_empty = 0;

            for frame_index in 0..(expected + 3) {
                let frame = segment_with_size(num_samples, frame_index, frame_size);
                if frame.is_empty() {
                    assert!(frame_index >= expected);
                    continue;
                }
                assert_eq!(frame.start, next_start, "gap or overlap at frame {}", frame_index);
                next_start = frame.end;
                non_empty += 1;
            }

            assert_eq!(next_start, num_samples);
            assert_eq!(non_empty, expected);
        }
    }

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(0, 400), 0);
        assert_eq!(frame_count(1, 400), 1);
        assert_eq!(frame_count(400, 400), 1);
        assert_eq!(frame_count(401, 400), 2);
        assert_eq!(frame_count(10, 0), 0);
    }
}
