//! Spectral band energies
//!
//! Algorithm:
//! 1. Apply a Hann window to the frame
//! 2. Zero-pad to the next power of two and take the FFT
//! 3. Split bins `0..=fft_size/2` into contiguous, equal-width bands
//! 4. Each slot is the band's mean power in dB: `10 * log10(mean + 1e-10)`

use std::f32::consts::PI;

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use super::extractor::FeatureExtractor;
use crate::error::FeatureError;

/// Numerical floor for log power
const EPSILON: f32 = 1e-10;

/// Log energy in `bands` linear-frequency bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandEnergyExtractor {
    /// Number of bands (and output slots)
    pub bands: usize,
}

impl BandEnergyExtractor {
    /// Create an extractor with `bands` output slots
    pub fn new(bands: usize) -> Self {
        Self { bands }
    }
}

impl FeatureExtractor for BandEnergyExtractor {
    fn name(&self) -> &str {
        "band_energy"
    }

    fn num_features(&self) -> usize {
        self.bands
    }

    fn extract(&self, window: &[f32], _sample_rate: u32, out: &mut [f32]) -> Result<(), FeatureError> {
        let floor_db = 10.0 * EPSILON.log10();

        if window.is_empty() {
            out.fill(floor_db);
            return Ok(());
        }

        let power = power_spectrum(window);
        let num_bins = power.len();

        for (band, slot) in out.iter_mut().enumerate() {
            let lo = band * num_bins / self.bands;
            let hi = (band + 1) * num_bins / self.bands;
            *slot = if hi > lo {
                let mean = power[lo..hi].iter().sum::<f32>() / (hi - lo) as f32;
                10.0 * (mean + EPSILON).log10()
            } else {
                floor_db
            };
        }

        Ok(())
    }
}

/// One-sided power spectrum (`fft_size / 2 + 1` bins) of a Hann-windowed frame
fn power_spectrum(window: &[f32]) -> Vec<f32> {
    let n = window.len();
    let fft_size = n.next_power_of_two();

    let mut buffer: Vec<Complex<f32>> = window
        .iter()
        .enumerate()
        .map(|(i, &x)| Complex::new(x * hann(i, n), 0.0))
        .collect();
    buffer.resize(fft_size, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut buffer);

    let scale = 1.0 / n as f32;
    buffer[..=fft_size / 2]
        .iter()
        .map(|x| x.norm_sqr() * scale)
        .collect()
}

fn hann(i: usize, n: usize) -> f32 {
    if n < 2 {
        return 1.0;
    }
    0.5 - 0.5 * (2.0 * PI * i as f32 / (n - 1) as f32).cos()
}
