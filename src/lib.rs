//! # Mimic DSP
//!
//! Per-frame feature extraction for voice-imitation agents: a growing
//! microphone buffer is cut into fixed-duration frames, each frame gets a
//! pitch estimate by autocorrelation, and the result is packed into the
//! fixed-length feature vector an inference model consumes.
//!
//! ## Features
//!
//! - **Frame segmentation**: frame index to sample range, clamped to the buffer
//! - **Pitch estimation**: direct or FFT autocorrelation with peak-lag search
//! - **Feature assembly**: pitch, spectral band energies and prosodic slots
//! - **Agent driving**: stateless ticks, caller-owned session state and a
//!   fixed-cadence scheduler
//!
//! ## Quick Start
//!
//! ```no_run
//! use mimic_dsp::{extract_features, FeatureConfig};
//!
//! // Mono f32 microphone samples
//! let samples: Vec<f32> = vec![];
//! let config = FeatureConfig::default();
//!
//! let features = extract_features(&samples, 0, &config)?;
//! println!("Pitch: {:?} Hz", features.pitch());
//! # Ok::<(), mimic_dsp::FeatureError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Microphone bytes → AudioBuffer → Frame Segmenter → Pitch Estimator ┐
//!                                                    Extractors ─────┴→ FeatureVector → Model
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod agent;
pub mod config;
pub mod error;
pub mod features;
pub mod io;

// Re-export main types
pub use agent::{ImitationSession, InferenceModel, TickOutcome, TickReport, TickScheduler};
pub use config::FeatureConfig;
pub use error::FeatureError;
pub use features::assembler::{assemble_features, AssembledFrame, FeatureAssembler, FeatureLayout, FeatureVector};
pub use features::frame::{segment, Frame};
pub use features::pitch::{estimate_pitch, AutocorrelationMethod, PitchCandidate};
pub use io::AudioBuffer;

/// Feature vector of one frame with the default extractors
///
/// Builds a [`FeatureAssembler`] from `config` (band energies + prosody)
/// and fills a vector of `config.feature_vector_length` slots.
///
/// # Arguments
///
/// * `samples` - Mono microphone samples received so far
/// * `frame_index` - Frame (tick) counter
/// * `config` - Feature configuration
///
/// # Errors
///
/// Returns `FeatureError` for an invalid configuration, a layout that does
/// not fit `feature_vector_length`, or a frame too short for pitch.
///
/// # Example
///
/// ```
/// use mimic_dsp::{extract_features, FeatureConfig};
///
/// let config = FeatureConfig { sample_rate: 8000, action_interval: 0.05, ..Default::default() };
/// let samples: Vec<f32> = (0..400)
///     .map(|i| (2.0 * std::f32::consts::PI * 200.0 * i as f32 / 8000.0).sin())
///     .collect();
///
/// let features = extract_features(&samples, 0, &config)?;
/// assert_eq!(features.len(), config.feature_vector_length);
/// # Ok::<(), mimic_dsp::FeatureError>(())
/// ```
pub fn extract_features(
    samples: &[f32],
    frame_index: usize,
    config: &FeatureConfig,
) -> Result<FeatureVector, FeatureError> {
    log::debug!(
        "Extracting features: frame {} of {} samples at {} Hz",
        frame_index,
        samples.len(),
        config.sample_rate
    );

    let assembler = FeatureAssembler::from_config(config.clone())?;
    let mut features = FeatureVector::zeros(config.feature_vector_length);
    assembler.assemble(samples, frame_index, features.as_mut_slice())?;

    Ok(features)
}
