//! Inference model seam
//!
//! The voice-imitation network is opaque to this crate. It consumes a
//! feature vector, produces output samples, and is updated on the same pair.

use crate::error::FeatureError;

/// Opaque voice-imitation model
pub trait InferenceModel {
    /// Feature slots expected by [`forward`](Self::forward)
    fn input_width(&self) -> usize;

    /// Output samples produced per tick
    fn output_width(&self) -> usize;

    /// Predict output samples from `features`
    ///
    /// `features.len() == input_width()` and
    /// `outputs.len() == output_width()`.
    fn forward(&mut self, features: &[f32], outputs: &mut [f32]) -> Result<(), FeatureError>;

    /// Train on the features and the outputs just produced
    fn update(&mut self, features: &[f32], outputs: &[f32]) -> Result<(), FeatureError>;
}

impl<M: InferenceModel + ?Sized> InferenceModel for Box<M> {
    fn input_width(&self) -> usize {
        (**self).input_width()
    }

    fn output_width(&self) -> usize {
        (**self).output_width()
    }

    fn forward(&mut self, features: &[f32], outputs: &mut [f32]) -> Result<(), FeatureError> {
        (**self).forward(features, outputs)
    }

    fn update(&mut self, features: &[f32], outputs: &[f32]) -> Result<(), FeatureError> {
        (**self).update(features, outputs)
    }
}
