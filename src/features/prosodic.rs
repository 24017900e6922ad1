//! Prosodic features: loudness and voicing cues
//!
//! Three slots per frame:
//! 0. RMS level
//! 1. Zero-crossing rate (sign changes per adjacent sample pair)
//! 2. Absolute peak

use super::extractor::FeatureExtractor;
use crate::error::FeatureError;

/// RMS, zero-crossing rate and peak of each frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProsodyExtractor;

impl ProsodyExtractor {
    /// Number of slots written per frame
    pub const NUM_FEATURES: usize = 3;
}

impl FeatureExtractor for ProsodyExtractor {
    fn name(&self) -> &str {
        "prosody"
    }

    fn num_features(&self) -> usize {
        Self::NUM_FEATURES
    }

    fn extract(&self, window: &[f32], _sample_rate: u32, out: &mut [f32]) -> Result<(), FeatureError> {
        if window.is_empty() {
            out.fill(0.0);
            return Ok(());
        }

        let sum_sq: f32 = window.iter().map(|&x| x * x).sum();
        let rms = (sum_sq / window.len() as f32).sqrt();

        let crossings = window
            .windows(2)
            .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
            .count();
        let zcr = if window.len() > 1 {
            crossings as f32 / (window.len() - 1) as f32
        } else {
            0.0
        };

        let peak = window.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));

        out[0] = rms;
        out[1] = zcr;
        out[2] = peak;

        Ok(())
    }
}
