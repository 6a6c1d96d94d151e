//! Summary statistics over group totals.

/// Mean of the totals, 0.0 for no groups.
pub fn average_total(totals: &[f64]) -> f64 {
    if totals.is_empty() {
        return 0.0;
    }
    totals.iter().sum::<f64>() / totals.len() as f64
}

/// Population standard deviation of the totals (divides by n).
pub fn standard_deviation(totals: &[f64]) -> f64 {
    if totals.is_empty() {
        return 0.0;
    }
    let mean = average_total(totals);
    let sum_sq: f64 = totals.iter().map(|t| (t - mean).powi(2)).sum();
    (sum_sq / totals.len() as f64).sqrt()
}

/// Heaviest minus lightest total.
pub fn spread(totals: &[f64]) -> f64 {
    let max = totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = totals.iter().copied().fold(f64::INFINITY, f64::min);
    if totals.is_empty() {
        0.0
    } else {
        max - min
    }
}
