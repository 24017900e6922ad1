//! Error types for frame segmentation, pitch estimation and feature assembly

use std::fmt;

/// Errors that can occur while turning audio frames into feature vectors
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// Bad sample rate, action interval or derived frame size.
    ///
    /// Fatal: the configuration must be fixed before any tick can succeed.
    InvalidConfiguration(String),

    /// Window too short for a pitch search
    InsufficientSamples {
        /// Minimum number of samples required
        needed: usize,
        /// Number of samples actually available
        available: usize,
    },

    /// Destination feature buffer cannot hold the declared slot layout
    FeatureBufferTooSmall {
        /// Slots declared by the layout (pitch + spectral + prosodic)
        required: usize,
        /// Capacity of the destination buffer
        capacity: usize,
    },

    /// Malformed raw sample bytes
    DecodingError(String),

    /// Failure reported by an inference model
    ModelError(String),
}

impl FeatureError {
    /// True when the caller can skip the current tick and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FeatureError::InsufficientSamples { .. })
    }
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            FeatureError::InsufficientSamples { needed, available } => write!(
                f,
                "Insufficient samples: need at least {}, got {}",
                needed, available
            ),
            FeatureError::FeatureBufferTooSmall { required, capacity } => write!(
                f,
                "Feature buffer too small: layout needs {} slots, capacity is {}",
                required, capacity
            ),
            FeatureError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            FeatureError::ModelError(msg) => write!(f, "Model error: {}", msg),
        }
    }
}

impl std::error::Error for FeatureError {}
