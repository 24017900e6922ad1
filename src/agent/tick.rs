//! One agent step
//!
//! A tick assembles the features of one frame, runs the model forward, and
//! updates it on the result. It holds no state: the frame counter is passed
//! in, and the output samples are handed back for the caller to append.

use serde::{Deserialize, Serialize};

use super::model::InferenceModel;
use crate::error::FeatureError;
use crate::features::assembler::{AssembledFrame, FeatureAssembler, FeatureVector};

/// Summary of a completed tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Frame counter the tick ran for
    pub frame_index: usize,
    /// Frame range and pitch
    pub assembled: AssembledFrame,
    /// Output samples written by the model
    pub output_len: usize,
}

/// Check that the feature/output buffers match the model
///
/// # Errors
///
/// `FeatureBufferTooSmall` if the assembler layout does not fit `features`,
/// `InvalidConfiguration` if the model widths differ from the buffers.
pub fn check_shapes(
    assembler: &FeatureAssembler,
    model: &dyn InferenceModel,
    features: &FeatureVector,
    outputs: &[f32],
) -> Result<(), FeatureError> {
    assembler.preflight(features.len())?;

    if model.input_width() != features.len() {
        return Err(FeatureError::InvalidConfiguration(format!(
            "Model expects {} input features, feature vector has {}",
            model.input_width(),
            features.len()
        )));
    }

    if model.output_width() != outputs.len() {
        return Err(FeatureError::InvalidConfiguration(format!(
            "Model produces {} outputs, output buffer has {}",
            model.output_width(),
            outputs.len()
        )));
    }

    Ok(())
}

/// Run one tick for frame `frame_index`
///
/// On success `outputs` holds the model's predicted samples; appending them
/// to the audio buffer is up to the caller.
///
/// # Errors
///
/// Shape errors from [`check_shapes`], assembly errors (notably the
/// recoverable `InsufficientSamples`) and model errors. The model is not
/// touched when assembly fails.
pub fn run_tick(
    samples: &[f32],
    frame_index: usize,
    assembler: &FeatureAssembler,
    model: &mut dyn InferenceModel,
    features: &mut FeatureVector,
    outputs: &mut [f32],
) -> Result<TickReport, FeatureError> {
    check_shapes(assembler, &*model, features, outputs)?;

    let assembled = assembler.assemble(samples, frame_index, features.as_mut_slice())?;

    model.forward(features.as_slice(), outputs)?;
    model.update(features.as_slice(), outputs)?;

    log::debug!(
        "Tick {}: pitch {:.2} Hz, {} output samples",
        frame_index,
        assembled.pitch_hz,
        outputs.len()
    );

    Ok(TickReport {
        frame_index,
        assembled,
        output_len: outputs.len(),
    })
}
