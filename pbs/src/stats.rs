//! Order statistics and summaries over latency samples.

/// Sort latencies in ascending order.
pub fn sort(values: &mut [f64]) {
    values.sort_by(f64::total_cmp);
}

/// The `k`-th smallest value of an ascending-sorted slice, 1-indexed.
///
/// A quorum of zero waits for nobody, so `k == 0` yields `0.0`.
/// `k` larger than the slice clamps to the largest value.
pub fn order_statistic(sorted: &[f64], k: usize) -> f64 {
    match k {
        0 => 0.0,
        k => sorted
            .get(k - 1)
            .or_else(|| sorted.last())
            .copied()
            .unwrap_or_default(),
    }
}

/// Arithmetic mean, accumulated in `f64`.
///
/// Returns `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let sum: f64 = values.iter().sum();

    Some(sum / values.len() as f64)
}

/// The value at index `floor(len * percentile)` of the sorted samples.
///
/// Sorts `values` in place. The index is clamped to the last element, so a
/// percentile of `1.0` yields the maximum instead of reading past the end.
/// Returns `None` for an empty slice.
pub fn percentile(values: &mut [f64], percentile: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    sort(values);

    let idx = (values.len() as f64 * percentile).floor() as usize;

    Some(values[idx.min(values.len() - 1)])
}
