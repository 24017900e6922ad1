//! Caller-side agent state
//!
//! `ImitationSession` owns everything the stateless tick needs between
//! calls: the growing microphone buffer, the frame counter, and the
//! feature/output buffers. Recovery policy lives here too: a frame is only
//! processed once all of its samples have arrived, and a short trailing
//! frame is processed (or skipped) only after [`ImitationSession::finish`].

use super::model::InferenceModel;
use super::tick::{check_shapes, run_tick, TickReport};
use crate::error::FeatureError;
use crate::features::assembler::{FeatureAssembler, FeatureVector};
use crate::io::AudioBuffer;

/// What a call to [`ImitationSession::tick`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Features assembled, model run, outputs appended; counter advanced
    Processed(TickReport),
    /// Frame too short for a pitch estimate; counter advanced
    Skipped {
        /// Frame that was skipped
        frame_index: usize,
    },
    /// Next frame not fully received yet; counter unchanged
    Pending {
        /// Frame still waiting for audio
        frame_index: usize,
    },
}

/// Voice-imitation agent driven one tick at a time
pub struct ImitationSession<M: InferenceModel> {
    assembler: FeatureAssembler,
    model: M,
    buffer: AudioBuffer,
    features: FeatureVector,
    outputs: Vec<f32>,
    next_frame: usize,
    finished: bool,
}

impl<M: InferenceModel> ImitationSession<M> {
    /// Create a session, sizing the buffers from the model
    ///
    /// # Errors
    ///
    /// `FeatureBufferTooSmall` if the model's input width cannot hold the
    /// assembler's slot layout.
    pub fn new(assembler: FeatureAssembler, model: M) -> Result<Self, FeatureError> {
        let features = FeatureVector::zeros(model.input_width());
        let outputs = vec![0.0; model.output_width()];
        check_shapes(&assembler, &model, &features, &outputs)?;

        log::debug!(
            "Imitation session: {} inputs, {} outputs, {} samples per frame",
            features.len(),
            outputs.len(),
            assembler.config().samples_per_frame()?
        );

        Ok(Self {
            assembler,
            model,
            buffer: AudioBuffer::new(),
            features,
            outputs,
            next_frame: 0,
            finished: false,
        })
    }

    /// Append microphone samples
    pub fn push_samples(&mut self, samples: &[f32]) {
        self.buffer.push(samples);
    }

    /// Append raw little-endian `f32` microphone bytes
    pub fn push_bytes(&mut self, bytes: &[u8]) -> usize {
        self.buffer.push_bytes(bytes)
    }

    /// Mark the end of the input stream
    ///
    /// Afterwards a trailing frame shorter than `samples_per_frame` is
    /// processed instead of waited for.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Whether [`finish`](Self::finish) has been called
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Process the next frame once it has fully arrived
    ///
    /// Returns [`TickOutcome::Pending`] while the buffer ends inside the next
    /// frame. After [`finish`](Self::finish), any non-empty remainder counts
    /// as the last frame.
    ///
    /// # Errors
    ///
    /// Fatal errors only (shape, configuration, model). `InsufficientSamples`
    /// is reported as [`TickOutcome::Skipped`] or [`TickOutcome::Pending`].
    pub fn tick(&mut self) -> Result<TickOutcome, FeatureError> {
        let frame_index = self.next_frame;
        let frame_size = self.assembler.config().samples_per_frame()?;

        let frame_start = frame_index.saturating_mul(frame_size);
        let frame_end = frame_start.saturating_add(frame_size);
        let buffered = self.buffer.len();

        let complete = buffered >= frame_end;
        let trailing = self.finished && buffered > frame_start;
        if !complete && !trailing {
            log::debug!(
                "Frame {} pending: {} of {} samples buffered",
                frame_index,
                buffered,
                frame_end
            );
            return Ok(TickOutcome::Pending { frame_index });
        }

        let result = run_tick(
            self.buffer.samples(),
            frame_index,
            &self.assembler,
            &mut self.model,
            &mut self.features,
            &mut self.outputs,
        );

        match result {
            Ok(report) => {
                self.buffer.push(&self.outputs);
                self.next_frame += 1;
                Ok(TickOutcome::Processed(report))
            }
            Err(err) if err.is_recoverable() => {
                log::warn!("Skipping frame {}: {}", frame_index, err);
                self.next_frame += 1;
                Ok(TickOutcome::Skipped { frame_index })
            }
            Err(err) => Err(err),
        }
    }

    /// Frame the next tick will process
    pub fn next_frame(&self) -> usize {
        self.next_frame
    }

    /// Samples received plus samples produced by the model
    pub fn buffer(&self) -> &AudioBuffer {
        &self.buffer
    }

    /// Feature vector from the last processed tick
    pub fn features(&self) -> &FeatureVector {
        &self.features
    }

    /// The model
    pub fn model(&self) -> &M {
        &self.model
    }
}
