//! Configuration parameters for feature extraction

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;
use crate::features::pitch::AutocorrelationMethod;

/// Tolerance added before flooring `sample_rate * action_interval`, so that
/// products like `10 * 0.3` (2.9999999999999996) still give 3 samples.
const FRAME_SIZE_TOLERANCE: f64 = 1e-9;

/// Feature extraction configuration
///
/// Every field has a default, so a JSON document only needs the fields it
/// overrides:
///
/// ```
/// use mimic_dsp::FeatureConfig;
///
/// let config = FeatureConfig::default();
/// assert_eq!(config.samples_per_frame()?, 4410);
/// # Ok::<(), mimic_dsp::FeatureError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Sample rate of the incoming mono stream in Hz (default: 44100)
    pub sample_rate: u32,

    /// Seconds between agent ticks; one frame is consumed per tick (default: 0.1)
    pub action_interval: f64,

    /// Width of the feature vector expected by the inference model (default: 12)
    pub feature_vector_length: usize,

    /// Number of spectral band slots for the default extractor (default: 8)
    pub spectral_bands: usize,

    /// Largest window the pitch estimator is allowed to see (default: 16384)
    ///
    /// Direct autocorrelation is O(n²), so this bounds per-tick work.
    pub max_window_len: usize,

    /// Autocorrelation method used for the pitch slot (default: Direct)
    pub autocorrelation: AutocorrelationMethod,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            action_interval: 0.1,
            feature_vector_length: 12, // pitch + 8 bands + 3 prosodic
            spectral_bands: 8,
            max_window_len: 16384,
            autocorrelation: AutocorrelationMethod::Direct,
        }
    }
}

impl FeatureConfig {
    /// Check every field and the derived frame size.
    pub fn validate(&self) -> Result<(), FeatureError> {
        let samples_per_frame = self.samples_per_frame()?;

        if self.max_window_len < 2 {
            return Err(FeatureError::InvalidConfiguration(format!(
                "max_window_len must be >= 2, got {}",
                self.max_window_len
            )));
        }

        if samples_per_frame > self.max_window_len {
            return Err(FeatureError::InvalidConfiguration(format!(
                "Frame of {} samples exceeds max_window_len {}",
                samples_per_frame, self.max_window_len
            )));
        }

        Ok(())
    }

    /// Samples consumed per tick: `floor(sample_rate * action_interval)`
    pub fn samples_per_frame(&self) -> Result<usize, FeatureError> {
        samples_per_frame(self.sample_rate, self.action_interval)
    }
}

/// Derive the frame size from a sample rate and a tick interval.
///
/// # Errors
///
/// `InvalidConfiguration` when `sample_rate == 0`, when `action_interval` is
/// not a finite positive number, or when the product floors to zero samples.
pub fn samples_per_frame(sample_rate: u32, action_interval: f64) -> Result<usize, FeatureError> {
    if sample_rate == 0 {
        return Err(FeatureError::InvalidConfiguration(
            "Invalid sample rate: 0".to_string(),
        ));
    }

    if !action_interval.is_finite() || action_interval <= 0.0 {
        return Err(FeatureError::InvalidConfiguration(format!(
            "Invalid action interval: {}",
            action_interval
        )));
    }

    let samples = (sample_rate as f64 * action_interval + FRAME_SIZE_TOLERANCE).floor();
    if samples < 1.0 {
        return Err(FeatureError::InvalidConfiguration(format!(
            "Frame size is zero samples ({} Hz * {} s)",
            sample_rate, action_interval
        )));
    }

    Ok(samples as usize)
}
