//! Rolling-window transforms over value slices.

/// Trailing rolling mean over `window` index positions.
///
/// The output has the input's length. Positions without a full window of
/// present values are absent (NaN): the first `window - 1` positions, and
/// every position whose window covers an absent input. Windows are counted
/// in index positions, not calendar days.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    if window == 0 || window > n {
        return vec![f64::NAN; n];
    }

    let mut out = vec![f64::NAN; n];
    for i in (window - 1)..n {
        let sum: f64 = values[i + 1 - window..=i].iter().sum();
        out[i] = sum / window as f64;
    }
    out
}
