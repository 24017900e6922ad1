//! Pitch estimation modules
//!
//! Time-domain fundamental frequency estimation:
//! - Autocorrelation (direct O(n²) and FFT-accelerated)
//! - Peak-lag search
//! - Offline per-frame pitch tracking

pub mod autocorrelation;
pub mod peak_picking;
pub mod track;

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;

pub use autocorrelation::{autocorrelation, autocorrelation_fft};
pub use track::{track_pitch, PitchFrame};

/// How the autocorrelation of a window is computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutocorrelationMethod {
    /// Direct sum over lags, O(n²). Exact; intended for short windows.
    #[default]
    Direct,
    /// `IFFT(|FFT(x)|²)`, O(n log n). Matches `Direct` up to rounding.
    Fft,
}

/// Pitch candidate with confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchCandidate {
    /// Candidate fundamental frequency in Hz
    pub frequency_hz: f32,

    /// Autocorrelation at the candidate lag relative to the zero-lag energy (0.0-1.0)
    pub confidence: f32,

    /// Period in samples
    pub lag: usize,
}

/// Estimate the fundamental frequency of `window` in Hz
///
/// Uses direct-form autocorrelation and returns `sample_rate / period`. The
/// period is the first strong lag after the main lobe around lag 0 (ties go
/// to the smallest lag), refined to a fraction of a sample against the
/// strongest lag. See [`peak_picking::find_pitch_period`].
///
/// # Errors
///
/// - `InsufficientSamples` if the window has fewer than 2 samples
/// - `InvalidConfiguration` if `sample_rate == 0`
///
/// # Example
///
/// ```
/// use mimic_dsp::features::pitch::estimate_pitch;
///
/// let window: Vec<f32> = (0..400)
///     .map(|i| (2.0 * std::f32::consts::PI * 200.0 * i as f32 / 8000.0).sin())
///     .collect();
/// let pitch = estimate_pitch(&window, 8000)?;
/// assert!((pitch - 200.0).abs() < 10.0);
/// # Ok::<(), mimic_dsp::FeatureError>(())
/// ```
pub fn estimate_pitch(window: &[f32], sample_rate: u32) -> Result<f32, FeatureError> {
    estimate_pitch_with(window, sample_rate, AutocorrelationMethod::Direct)
}

/// [`estimate_pitch`] with an explicit autocorrelation method
pub fn estimate_pitch_with(
    window: &[f32],
    sample_rate: u32,
    method: AutocorrelationMethod,
) -> Result<f32, FeatureError> {
    check_window(window, sample_rate)?;

    let acf = match method {
        AutocorrelationMethod::Direct => autocorrelation(window),
        AutocorrelationMethod::Fft => autocorrelation_fft(window),
    };

    let period = peak_picking::find_pitch_period(&acf).ok_or(FeatureError::InsufficientSamples {
        needed: 2,
        available: window.len(),
    })?;

    let pitch = sample_rate as f32 / period;

    log::debug!(
        "Pitch estimate: {} samples at {} Hz ({:?}) -> period {:.2} = {:.2} Hz",
        window.len(),
        sample_rate,
        method,
        period,
        pitch
    );

    Ok(pitch)
}

/// Rank up to `max_candidates` periodic lags of `window` by confidence
///
/// Useful for spotting octave ambiguity: a clean voiced frame has one
/// dominant candidate, a breathy or noisy one several similar ones.
pub fn pitch_candidates(
    window: &[f32],
    sample_rate: u32,
    max_candidates: usize,
) -> Result<Vec<PitchCandidate>, FeatureError> {
    check_window(window, sample_rate)?;

    let acf = autocorrelation(window);
    let energy = acf[0];

    let candidates: Vec<PitchCandidate> = peak_picking::find_lag_peaks(&acf)
        .into_iter()
        .take(max_candidates)
        .map(|(lag, value)| PitchCandidate {
            frequency_hz: sample_rate as f32 / lag as f32,
            confidence: if energy > peak_picking::EPSILON {
                (value / energy).clamp(0.0, 1.0)
            } else {
                0.0
            },
            lag,
        })
        .collect();

    log::debug!("Found {} pitch candidates", candidates.len());

    Ok(candidates)
}

fn check_window(window: &[f32], sample_rate: u32) -> Result<(), FeatureError> {
    if sample_rate == 0 {
        return Err(FeatureError::InvalidConfiguration(
            "Invalid sample rate: 0".to_string(),
        ));
    }

    if window.len() < 2 {
        return Err(FeatureError::InsufficientSamples {
            needed: 2,
            available: window.len(),
        });
    }

    Ok(())
}
