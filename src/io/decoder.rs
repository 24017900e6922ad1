//! Raw sample decoding
//!
//! Microphone data arrives as little-endian IEEE-754 `f32` samples, mono,
//! 4 bytes per sample. Model outputs are written back in the same layout.

use crate::error::FeatureError;

/// Bytes per encoded sample
pub const BYTES_PER_SAMPLE: usize = 4;

/// Decode little-endian `f32` samples
///
/// # Errors
///
/// Returns `DecodingError` if `bytes.len()` is not a multiple of 4.
///
/// # Example
///
/// ```
/// use mimic_dsp::io::decoder::{decode_f32_le, encode_f32_le};
///
/// let bytes = encode_f32_le(&[0.5, -1.0]);
/// assert_eq!(decode_f32_le(&bytes)?, vec![0.5, -1.0]);
/// # Ok::<(), mimic_dsp::FeatureError>(())
/// ```
pub fn decode_f32_le(bytes: &[u8]) -> Result<Vec<f32>, FeatureError> {
    if bytes.len() % BYTES_PER_SAMPLE != 0 {
        return Err(FeatureError::DecodingError(format!(
            "Byte length {} is not a multiple of {}",
            bytes.len(),
            BYTES_PER_SAMPLE
        )));
    }

    log::debug!("Decoding {} bytes of f32 LE audio", bytes.len());

    Ok(decode_complete(bytes))
}

/// Encode samples as little-endian `f32` bytes
pub fn encode_f32_le(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * BYTES_PER_SAMPLE);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

/// Decode every complete 4-byte group, ignoring a trailing partial sample.
pub(crate) fn decode_complete(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}
