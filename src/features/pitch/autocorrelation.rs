//! Autocorrelation of a sample window
//!
//! `acf[lag] = Σ_{j < n - lag} x[j] · x[j + lag]`, unnormalized, for every
//! lag in `[0, n)`.
//!
//! Two implementations:
//!
//! 1. **Direct**: the sum above, O(n²). Accumulated in `f64`, so
//!    `acf[0] >= acf[lag]` holds exactly enough to test on real input.
//!    Only meant for short windows (tens of milliseconds).
//! 2. **FFT**: `ACF = IFFT(|FFT(x)|²)` with zero padding to at least `2n`
//!    so the circular correlation equals the linear one. O(n log n).
//!
//! # Example
//!
//! ```
//! use mimic_dsp::features::pitch::autocorrelation::autocorrelation;
//!
//! let acf = autocorrelation(&[1.0, 2.0, 3.0]);
//! assert_eq!(acf, vec![14.0, 8.0, 3.0]);
//! ```

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Direct-form autocorrelation, O(n²)
///
/// Returns a vector the same length as `window` (empty for an empty window).
pub fn autocorrelation(window: &[f32]) -> Vec<f32> {
    let n = window.len();

    log::debug!("Computing direct autocorrelation over {} samples", n);

    (0..n)
        .map(|lag| {
            window[..n - lag]
                .iter()
                .zip(&window[lag..])
                .map(|(&a, &b)| a as f64 * b as f64)
                .sum::<f64>() as f32
        })
        .collect()
}

/// FFT-accelerated autocorrelation
///
/// Same output as [`autocorrelation`] up to floating-point rounding. Unlike
/// onset-signal correlation, negative values are kept: they mark the
/// anti-phase lags the peak search relies on.
pub fn autocorrelation_fft(window: &[f32]) -> Vec<f32> {
    let n = window.len();
    if n == 0 {
        return vec![];
    }

    // FFT size: next power of 2 >= 2*n (for zero-padding)
    let fft_size = (2 * n).next_power_of_two();

    log::debug!(
        "Computing FFT autocorrelation over {} samples (fft size {})",
        n,
        fft_size
    );

    let mut buffer: Vec<Complex<f32>> = window.iter().map(|&x| Complex::new(x, 0.0)).collect();
    buffer.resize(fft_size, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut buffer);

    // Power spectrum |X|²
    for x in &mut buffer {
        *x = Complex::new(x.norm_sqr(), 0.0);
    }

    let ifft = planner.plan_fft_inverse(fft_size);
    ifft.process(&mut buffer);

    // rustfft does not normalize the inverse transform
    let scale = 1.0 / (fft_size as f32);
    buffer[..n].iter().map(|x| x.re * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_signal(len: usize) -> Vec<f32> {
        // Deterministic, non-periodic mix
        (0..len)
            .map(|i| {
                let t = i as f32;
                (t * 0.37).sin() * 0.6 + (t * 1.13).cos() * 0.3 + ((i * 7919) % 13) as f32 * 0.01
            })
            .collect()
    }

    #[test]
    fn test_autocorrelation_known_values() {
        let acf = autocorrelation(&[1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        assert_eq!(acf, vec![3.0, 0.0, 2.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_autocorrelation_empty_and_single() {
        assert!(autocorrelation(&[]).is_empty());
        assert_eq!(autocorrelation(&[2.0]), vec![4.0]);
        assert!(autocorrelation_fft(&[]).is_empty());
    }

    #[test]
    fn test_zero_lag_is_maximal() {
        for len in [2usize, 17, 128, 301] {
            let signal = test_signal(len);
            let acf = autocorrelation(&signal);
            assert_eq!(acf.len(), len);
            for (lag, &value) in acf.iter().enumerate().skip(1) {
                assert!(
                    acf[0] >= value,
                    "acf[0]={} < acf[{}]={} for len {}",
                    acf[0],
                    lag,
                    value,
                    len
                );
            }
        }
    }

    #[test]
    fn test_fft_matches_direct() {
        let signal = test_signal(300);
        let direct = autocorrelation(&signal);
        let fft = autocorrelation_fft(&signal);

        assert_eq!(direct.len(), fft.len());
        let tolerance = direct[0].abs() * 1e-4 + 1e-4;
        for (lag, (d, f)) in direct.iter().zip(&fft).enumerate() {
            assert!(
                (d - f).abs() <= tolerance,
                "lag {}: direct {} vs fft {}",
                lag,
                d,
                f
            );
        }
    }

    #[test]
    fn test_fft_keeps_negative_lags() {
        let acf = autocorrelation_fft(&[1.0, -1.0, 1.0, -1.0]);
        assert!(acf[1] < -2.0, "anti-phase lag should be negative, got {}", acf[1]);
    }
}
