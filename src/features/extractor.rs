//! Pluggable feature extractors
//!
//! Spectral and prosodic features are produced by extractors with a fixed,
//! declared slot count. The assembler hands each extractor exactly its own
//! slot range, so an extractor cannot write outside it.

use crate::error::FeatureError;

/// A per-frame feature transform with a fixed number of output slots
pub trait FeatureExtractor: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Number of slots written by [`extract`](Self::extract)
    fn num_features(&self) -> usize;

    /// Compute features for `window`
    ///
    /// `out.len()` is always `self.num_features()`. Every slot must be
    /// written; the buffer holds the previous frame's values.
    fn extract(&self, window: &[f32], sample_rate: u32, out: &mut [f32]) -> Result<(), FeatureError>;
}

/// Extractor that fills its slots with zeros
///
/// Reserves slots for features the model expects but that are not computed
/// yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullExtractor {
    /// Number of zero slots
    pub slots: usize,
}

impl NullExtractor {
    /// Create an extractor reserving `slots` zero slots
    pub fn new(slots: usize) -> Self {
        Self { slots }
    }
}

impl FeatureExtractor for NullExtractor {
    fn name(&self) -> &str {
        "null"
    }

    fn num_features(&self) -> usize {
        self.slots
    }

    fn extract(&self, _window: &[f32], _sample_rate: u32, out: &mut [f32]) -> Result<(), FeatureError> {
        out.fill(0.0);
        Ok(())
    }
}
