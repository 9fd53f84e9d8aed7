//! Small descriptive-statistics helpers.

/// Mean and sample standard deviation of a slice of f64 values.
///
/// Values are summed in the order given; callers that need bit-identical
/// results across input orderings sort first.
pub fn compute_mean_stddev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if values.len() == 1 {
        return (mean, 0.0);
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let stddev = if variance.is_finite() && variance >= 0.0 {
        variance.sqrt()
    } else {
        0.0
    };
    (mean, stddev)
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
