//! Feature vector assembly
//!
//! Slot layout of a feature vector:
//!
//! ```text
//! [ pitch | spectral 0 .. k-1 | prosodic 0 .. m-1 | unused (zeroed) ]
//! ```
//!
//! The assembler computes the frame range, slices the window, fills slot 0
//! with the pitch estimate and gives each extractor its own slot range.
//! The slot count is checked against the destination capacity before any
//! work is done.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::extractor::FeatureExtractor;
use super::frame::{segment, Frame};
use super::pitch::estimate_pitch_with;
use super::prosodic::ProsodyExtractor;
use super::spectral::BandEnergyExtractor;
use crate::config::FeatureConfig;
use crate::error::FeatureError;

/// Fixed-length model input, overwritten in place every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    /// Zero-filled vector of `len` slots
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-slot vector
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pitch slot, if the vector has one
    pub fn pitch(&self) -> Option<f32> {
        self.0.first().copied()
    }

    /// Slots as a slice
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Slots as a mutable slice
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.0
    }
}

/// Slot counts of the feature vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLayout {
    /// Spectral slots following the pitch slot
    pub spectral: usize,
    /// Prosodic slots following the spectral slots
    pub prosodic: usize,
}

impl FeatureLayout {
    /// Index of the pitch slot
    pub const PITCH_SLOT: usize = 0;

    /// Total declared slots: pitch + spectral + prosodic
    ///
    /// `None` if the sum overflows `usize`.
    pub fn declared_slots(&self) -> Option<usize> {
        1usize.checked_add(self.spectral)?.checked_add(self.prosodic)
    }

    /// Slot range of the spectral features
    ///
    /// Only meaningful once [`check_capacity`](Self::check_capacity) passed.
    pub fn spectral_range(&self) -> Range<usize> {
        1..1 + self.spectral
    }

    /// Slot range of the prosodic features
    pub fn prosodic_range(&self) -> Range<usize> {
        let start = 1 + self.spectral;
        start..start + self.prosodic
    }

    /// Fail with `FeatureBufferTooSmall` when the layout exceeds `capacity`
    ///
    /// An exact fit is accepted. Returns the number of declared slots. A slot
    /// count that overflows `usize` is reported with `required: usize::MAX`.
    pub fn check_capacity(&self, capacity: usize) -> Result<usize, FeatureError> {
        let required = self.declared_slots().unwrap_or(usize::MAX);
        if required > capacity {
            return Err(FeatureError::FeatureBufferTooSmall { required, capacity });
        }
        Ok(required)
    }
}

/// Result of assembling one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssembledFrame {
    /// Sample range the features were computed from
    pub frame: Frame,
    /// Value written to the pitch slot
    pub pitch_hz: f32,
    /// Number of slots written (pitch + spectral + prosodic)
    pub slots_written: usize,
}

/// Fill `dest` with the features of frame `frame_index`
///
/// # Arguments
///
/// * `samples` - Microphone samples received so far
/// * `frame_index` - Caller-owned frame counter
/// * `config` - Sample rate, action interval and window cap
/// * `spectral` - Extractor for the spectral slots
/// * `prosodic` - Extractor for the prosodic slots
/// * `dest` - Caller-provided feature buffer
///
/// # Errors
///
/// - `FeatureBufferTooSmall` if the slot layout exceeds `dest.len()`
/// - `InvalidConfiguration` for a bad rate/interval, or a window longer than
///   `config.max_window_len`
/// - `InsufficientSamples` if the frame holds fewer than 2 samples
///   (including the empty frame past the end of the buffer)
/// - any error returned by an extractor
pub fn assemble_features(
    samples: &[f32],
    frame_index: usize,
    config: &FeatureConfig,
    spectral: &dyn FeatureExtractor,
    prosodic: &dyn FeatureExtractor,
    dest: &mut [f32],
) -> Result<AssembledFrame, FeatureError> {
    let layout = FeatureLayout {
        spectral: spectral.num_features(),
        prosodic: prosodic.num_features(),
    };
    let slots_written = layout.check_capacity(dest.len())?;

    let frame = segment(samples.len(), frame_index, config.sample_rate, config.action_interval)?;
    let window = &samples[frame.range()];

    log::debug!(
        "Assembling features for frame {} ({}..{}), {} + {} + {} slots into {}",
        frame_index,
        frame.start,
        frame.end,
        1,
        layout.spectral,
        layout.prosodic,
        dest.len()
    );

    if window.len() > config.max_window_len {
        return Err(FeatureError::InvalidConfiguration(format!(
            "Window of {} samples exceeds max_window_len {}",
            window.len(),
            config.max_window_len
        )));
    }

    let pitch_hz = estimate_pitch_with(window, config.sample_rate, config.autocorrelation)?;
    dest[FeatureLayout::PITCH_SLOT] = pitch_hz;

    spectral.extract(window, config.sample_rate, &mut dest[layout.spectral_range()])?;
    prosodic.extract(window, config.sample_rate, &mut dest[layout.prosodic_range()])?;

    dest[slots_written..].fill(0.0);

    Ok(AssembledFrame {
        frame,
        pitch_hz,
        slots_written,
    })
}

/// Configuration plus extractors, validated once up front
pub struct FeatureAssembler {
    config: FeatureConfig,
    spectral: Box<dyn FeatureExtractor>,
    prosodic: Box<dyn FeatureExtractor>,
}

impl FeatureAssembler {
    /// Create an assembler with custom extractors
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `config` does not validate.
    pub fn new(
        config: FeatureConfig,
        spectral: Box<dyn FeatureExtractor>,
        prosodic: Box<dyn FeatureExtractor>,
    ) -> Result<Self, FeatureError> {
        config.validate()?;
        log::debug!(
            "Feature assembler: spectral={} ({} slots), prosodic={} ({} slots)",
            spectral.name(),
            spectral.num_features(),
            prosodic.name(),
            prosodic.num_features()
        );
        Ok(Self {
            config,
            spectral,
            prosodic,
        })
    }

    /// Band-energy spectral slots and prosody slots, checked against
    /// `config.feature_vector_length`
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for a bad config, `FeatureBufferTooSmall` if
    /// the default layout does not fit `feature_vector_length`.
    pub fn from_config(config: FeatureConfig) -> Result<Self, FeatureError> {
        let bands = config.spectral_bands;
        let assembler = Self::new(
            config,
            Box::new(BandEnergyExtractor::new(bands)),
            Box::new(ProsodyExtractor),
        )?;
        assembler.preflight(assembler.config.feature_vector_length)?;
        Ok(assembler)
    }

    /// The configuration in use
    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Slot layout declared by the extractors
    pub fn layout(&self) -> FeatureLayout {
        FeatureLayout {
            spectral: self.spectral.num_features(),
            prosodic: self.prosodic.num_features(),
        }
    }

    /// Shape check for a destination of `capacity` slots
    pub fn preflight(&self, capacity: usize) -> Result<(), FeatureError> {
        self.layout().check_capacity(capacity).map(|_| ())
    }

    /// Fill `dest` with the features of frame `frame_index`
    ///
    /// See [`assemble_features`].
    pub fn assemble(
        &self,
        samples: &[f32],
        frame_index: usize,
        dest: &mut [f32],
    ) -> Result<AssembledFrame, FeatureError> {
        assemble_features(
            samples,
            frame_index,
            &self.config,
            self.spectral.as_ref(),
            self.prosodic.as_ref(),
            dest,
        )
    }
}

impl std::fmt::Debug for FeatureAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureAssembler")
            .field("config", &self.config)
            .field("spectral", &self.spectral.name())
            .field("prosodic", &self.prosodic.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extractor::NullExtractor;
    use std::f32::consts::PI;

    fn config_8k() -> FeatureConfig {
        FeatureConfig {
            sample_rate: 8000,
            action_interval: 0.05, // 400 samples
            feature_vector_length: 8,
            spectral_bands: 4,
            ..FeatureConfig::default()
        }
    }

    fn sine(freq: f32, sample_rate: u32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    /// Writes its slot offset marker so slot placement is visible
    struct MarkerExtractor {
        slots: usize,
        marker: f32,
    }

    impl FeatureExtractor for MarkerExtractor {
        fn name(&self) -> &str {
            "marker"
        }

        fn num_features(&self) -> usize {
            self.slots
        }

        fn extract(&self, _window: &[f32], _sample_rate: u32, out: &mut [f32]) -> Result<(), FeatureError> {
            assert_eq!(out.len(), self.slots);
            out.fill(self.marker);
            Ok(())
        }
    }

    #[test]
    fn test_layout_ranges() {
        let layout = FeatureLayout { spectral: 4, prosodic: 3 };
        assert_eq!(layout.declared_slots(), Some(8));
        assert_eq!(layout.spectral_range(), 1..5);
        assert_eq!(layout.prosodic_range(), 5..8);
    }

    #[test]
    fn test_capacity_exact_fit_and_overflow() {
        let layout = FeatureLayout { spectral: 4, prosodic: 3 };
        assert!(layout.check_capacity(8).is_ok());
        assert!(layout.check_capacity(9).is_ok());
        assert_eq!(
            layout.check_capacity(7),
            Err(FeatureError::FeatureBufferTooSmall { required: 8, capacity: 7 })
        );
    }

    #[test]
    fn test_capacity_slot_count_overflow() {
        let layout = FeatureLayout { spectral: usize::MAX, prosodic: 3 };
        assert_eq!(layout.declared_slots(), None);
        assert_eq!(
            layout.check_capacity(16),
            Err(FeatureError::FeatureBufferTooSmall { required: usize::MAX, capacity: 16 })
        );

        let samples = sine(200.0, 8000, 400);
        let spectral = MarkerExtractor { slots: usize::MAX - 1, marker: 7.0 };
        let prosodic = MarkerExtractor { slots: 3, marker: 9.0 };
        let mut dest = vec![0.0f32; 16];
        assert_eq!(
            assemble_features(&samples, 0, &config_8k(), &spectral, &prosodic, &mut dest),
            Err(FeatureError::FeatureBufferTooSmall { required: usize::MAX, capacity: 16 })
        );
    }

    #[test]
    fn test_assemble_slot_placement() {
        let samples = sine(200.0, 8000, 800);
        let spectral = MarkerExtractor { slots: 2, marker: 7.0 };
        let prosodic = MarkerExtractor { slots: 3, marker: 9.0 };
        let mut dest = vec![-1.0f32; 8];

        let assembled =
            assemble_features(&samples, 1, &config_8k(), &spectral, &prosodic, &mut dest).unwrap();

        assert_eq!(assembled.frame, Frame { start: 400, end: 800 });
        assert_eq!(assembled.slots_written, 6);
        assert!((dest[0] - 200.0).abs() < 10.0, "pitch slot {}", dest[0]);
        assert_eq!(&dest[1..3], &[7.0, 7.0]);
        assert_eq!(&dest[3..6], &[9.0, 9.0, 9.0]);
        // Unused tail is zeroed
        assert_eq!(&dest[6..], &[0.0, 0.0]);
        assert_eq!(dest[0], assembled.pitch_hz);
    }

    #[test]
    fn test_assemble_rejects_small_buffer_before_work() {
        // Empty sample buffer would fail pitch, but the shape check comes first
        let spectral = NullExtractor::new(4);
        let prosodic = NullExtractor::new(3);
        let mut dest = vec![0.0f32; 7];

        let result = assemble_features(&[], 0, &config_8k(), &spectral, &prosodic, &mut dest);
        assert_eq!(
            result,
            Err(FeatureError::FeatureBufferTooSmall { required: 8, capacity: 7 })
        );
    }

    #[test]
    fn test_assemble_end_of_stream() {
        let samples = sine(200.0, 8000, 400);
        let mut dest = vec![0.0f32; 8];
        let result = assemble_features(
            &samples,
            1,
            &config_8k(),
            &NullExtractor::new(4),
            &ProsodyExtractor,
            &mut dest,
        );
        assert_eq!(
            result,
            Err(FeatureError::InsufficientSamples { needed: 2, available: 0 })
        );
    }

    #[test]
    fn test_assemble_window_cap() {
        let config = FeatureConfig {
            max_window_len: 100,
            ..config_8k()
        };
        let samples = vec![0.1f32; 400];
        let mut dest = vec![0.0f32; 8];
        let result = assemble_features(
            &samples,
            0,
            &config,
            &NullExtractor::new(0),
            &NullExtractor::new(0),
            &mut dest,
        );
        assert!(matches!(result, Err(FeatureError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_assembler_from_config() {
        let assembler = FeatureAssembler::from_config(config_8k()).unwrap();
        assert_eq!(assembler.layout(), FeatureLayout { spectral: 4, prosodic: 3 });

        let samples = sine(200.0, 8000, 400);
        let mut features = FeatureVector::zeros(8);
        let assembled = assembler.assemble(&samples, 0, features.as_mut_slice()).unwrap();

        assert_eq!(assembled.slots_written, 8);
        assert_eq!(features.pitch(), Some(assembled.pitch_hz));
        // RMS of a unit sine
        assert!((features.as_slice()[5] - std::f32::consts::FRAC_1_SQRT_2).abs() < 0.01);
    }

    #[test]
    fn test_assembler_from_config_shape_mismatch() {
        let config = FeatureConfig {
            feature_vector_length: 7,
            ..config_8k()
        };
        assert_eq!(
            FeatureAssembler::from_config(config).unwrap_err(),
            FeatureError::FeatureBufferTooSmall { required: 8, capacity: 7 }
        );
    }

    #[test]
    fn test_assembler_rejects_invalid_config() {
        let config = FeatureConfig {
            action_interval: 0.0,
            ..config_8k()
        };
        assert!(matches!(
            FeatureAssembler::from_config(config),
            Err(FeatureError::InvalidConfiguration(_))
        ));
    }
}
