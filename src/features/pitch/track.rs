//! Offline pitch tracking over a whole recording
//!
//! Runs the per-frame estimator on every non-empty frame in parallel. This
//! is for analysing finished recordings; the live tick path stays
//! single-threaded.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::estimate_pitch_with;
use crate::config::FeatureConfig;
use crate::error::FeatureError;
use crate::features::frame::{frame_count, segment_with_size};

/// Pitch of one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchFrame {
    /// Frame (tick) index
    pub frame_index: usize,
    /// First sample of the frame
    pub start: usize,
    /// One past the last sample of the frame
    pub end: usize,
    /// Estimated pitch in Hz; `None` when the frame is too short
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_hz: Option<f32>,
}

/// Estimate the pitch of every frame of `samples`
///
/// Returns one row per non-empty frame, in frame order.
///
/// # Errors
///
/// `InvalidConfiguration` if `config` does not validate, or the first
/// non-recoverable error from a frame. Frames too short for an estimate are
/// reported with `pitch_hz: None` instead.
pub fn track_pitch(samples: &[f32], config: &FeatureConfig) -> Result<Vec<PitchFrame>, FeatureError> {
    config.validate()?;
    let frame_size = config.samples_per_frame()?;
    let num_frames = frame_count(samples.len(), frame_size);

    log::debug!(
        "Tracking pitch over {} samples: {} frames of {} samples",
        samples.len(),
        num_frames,
        frame_size
    );

    let rows = (0..num_frames)
        .into_par_iter()
        .map(|frame_index| pitch_row(samples, frame_index, frame_size, config))
        .collect::<Result<Vec<_>, FeatureError>>()?;

    Ok(rows)
}

/// Pitch row of one frame; only `InsufficientSamples` becomes an unvoiced row
fn pitch_row(
    samples: &[f32],
    frame_index: usize,
    frame_size: usize,
    config: &FeatureConfig,
) -> Result<PitchFrame, FeatureError> {
    let frame = segment_with_size(samples.len(), frame_index, frame_size);
    let window = &samples[frame.range()];

    let pitch_hz = match estimate_pitch_with(window, config.sample_rate, config.autocorrelation) {
        Ok(pitch) => Some(pitch),
        Err(err) if err.is_recoverable() => {
            log::warn!("Frame {} skipped: {}", frame_index, err);
            None
        }
        Err(err) => return Err(err),
    };

    Ok(PitchFrame {
        frame_index,
        start: frame.start,
        end: frame.end,
        pitch_hz,
    })
}
