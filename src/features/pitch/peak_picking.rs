//! Peak-lag search in autocorrelation functions
//!
//! Lag 0 holds the signal energy and is always the global maximum, and the
//! lags right after it sit on the same main lobe. Both searches here start
//! after that lobe: from lag 1 they skip forward while the autocorrelation is
//! still strictly decreasing.

pub(crate) const EPSILON: f32 = 1e-10;

/// First lag after the main lobe around lag 0
///
/// Returns `acf.len() - 1` when the whole function decreases (no periodicity
/// inside the window). Requires `acf.len() >= 2`.
fn main_lobe_end(acf: &[f32]) -> usize {
    let mut lag = 1;
    while lag + 1 < acf.len() && acf[lag + 1] < acf[lag] {
        lag += 1;
    }
    lag
}

/// Fraction of the strongest post-lobe value a peak needs to count as the period
///
/// Lower than 1.0 so a short lag that misses the true period by half a
/// sample still beats its own multiples.
pub const PEAK_TOLERANCE: f32 = 0.6;

/// Lag of the strongest value after the main lobe, smallest lag on ties
fn strongest_lag(acf: &[f32], start: usize) -> usize {
    let mut best_lag = start;
    let mut best_value = acf[start];
    for (lag, &value) in acf.iter().enumerate().skip(start + 1) {
        // Strict comparison keeps the smallest lag on ties
        if value > best_value {
            best_value = value;
            best_lag = lag;
        }
    }
    best_lag
}

/// Integer lag of the fundamental period in `acf`
///
/// First lag after the main lobe that reaches [`PEAK_TOLERANCE`] of the
/// strongest value there and stops rising. Ties go to the smallest lag, so
/// an all-zero function yields lag 1. `None` when there is no lag to search
/// (`acf.len() < 2`).
///
/// # Example
///
/// ```
/// use mimic_dsp::features::pitch::peak_picking::find_pitch_lag;
///
/// let acf = vec![4.0, 1.0, -2.0, 3.0, 0.5, 3.0];
/// assert_eq!(find_pitch_lag(&acf), Some(3));
///
/// // Lag 6 is the largest, lag 3 is close enough and comes first
/// let acf = vec![8.0, 1.0, -2.0, 5.0, -1.0, 0.0, 6.0, 0.0];
/// assert_eq!(find_pitch_lag(&acf), Some(3));
/// ```
pub fn find_pitch_lag(acf: &[f32]) -> Option<usize> {
    if acf.len() < 2 {
        return None;
    }

    let start = main_lobe_end(acf);
    let max_value = acf[strongest_lag(acf, start)];
    let threshold = if max_value > 0.0 {
        PEAK_TOLERANCE * max_value
    } else {
        max_value
    };

    let lag = (start..acf.len()).find(|&lag| {
        let value = acf[lag];
        value >= threshold && acf.get(lag + 1).map_or(true, |&next| next <= value)
    })?;

    if lag == 0 {
        return None;
    }

    Some(lag)
}

/// Fundamental period of `acf` in (fractional) samples
///
/// Starts from [`find_pitch_lag`] and divides the strongest post-lobe lag by
/// the number of periods it spans. A sine whose period is not a whole number
/// of samples lines up best at a multiple of it, so this recovers the
/// fraction the integer lag loses. Falls back to the integer lag when the
/// two disagree by a sample or more.
///
/// # Example
///
/// ```
/// use mimic_dsp::features::pitch::peak_picking::find_pitch_period;
///
/// let acf = vec![8.0, 1.0, -2.0, 5.0, -1.0, 0.0, 6.0, 0.0, 1.0];
/// assert_eq!(find_pitch_period(&acf), Some(3.0));
/// ```
pub fn find_pitch_period(acf: &[f32]) -> Option<f32> {
    let lag = find_pitch_lag(acf)?;
    let strongest = strongest_lag(acf, main_lobe_end(acf));

    let cycles = (strongest as f32 / lag as f32).round().max(1.0);
    let period = strongest as f32 / cycles;

    if (period - lag as f32).abs() < 1.0 {
        Some(period)
    } else {
        Some(lag as f32)
    }
}

/// Local maxima of `acf` after the main lobe
///
/// Only positive peaks are reported. Returns `(lag, value)` pairs sorted by
/// value (highest first); equal values keep ascending lag order.
///
/// # Example
///
/// ```
/// use mimic_dsp::features::pitch::peak_picking::find_lag_peaks;
///
/// let acf = vec![5.0, 2.0, 0.0, 3.0, 1.0, 4.0, 0.5];
/// let peaks = find_lag_peaks(&acf);
/// assert_eq!(peaks, vec![(5, 4.0), (3, 3.0)]);
/// ```
pub fn find_lag_peaks(acf: &[f32]) -> Vec<(usize, f32)> {
    if acf.len() < 3 {
        // Need at least 3 points for local maximum detection
        return vec![];
    }

    let start = main_lobe_end(acf).max(1);

    let mut peaks = Vec::new();
    for lag in start..(acf.len() - 1) {
        let value = acf[lag];
        if value > EPSILON && value > acf[lag - 1] && value > acf[lag + 1] {
            peaks.push((lag, value));
        }
    }

    // Stable sort: equal peaks stay in lag order
    peaks.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    log::debug!("Found {} autocorrelation peaks", peaks.len());

    peaks
}
