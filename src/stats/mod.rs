// Descriptive statistics
// Implements the classic eight-number summary of a numeric column:
// count, mean, std, min, 25%, 50%, 75%, max.
//
// Two conventions matter here, because other choices produce different
// numbers for the same data:
// 1. The standard deviation is the *sample* standard deviation
//    (denominator n - 1), not the population one (denominator n).
// 2. Percentiles interpolate linearly between adjacent order statistics
//    (the "R-7" rule used by R, NumPy and pandas), not nearest-rank.

use serde::Serialize;

/// The statistic names, in output order.
pub const STATISTICS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// The eight-number summary of one numeric column.
///
/// A statistic that is undefined for the input size is `None`:
/// everything but `count` needs at least one value, and `std` needs
/// at least two.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    /// The summary as cells, aligned with [`STATISTICS`].
    /// `count` is widened to a float so all cells format the same way.
    pub fn cells(&self) -> [Option<f64>; 8] {
        [
            Some(self.count as f64),
            self.mean,
            self.std,
            self.min,
            self.p25,
            self.p50,
            self.p75,
            self.max,
        ]
    }
}

/// Compute the full summary of one column.
///
/// The input must contain only finite values; the caller drops NULLs
/// (and rejects NaN/infinity) before calling this.
pub fn describe(values: &[f64]) -> ColumnSummary {
    // Sort once, then min/max and all three quartiles fall out of the
    // sorted order for free.
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    ColumnSummary {
        count: values.len(),
        mean: mean(values),
        std: sample_std(values),
        min: sorted.first().copied(),
        p25: quantile_sorted(&sorted, 0.25),
        p50: quantile_sorted(&sorted, 0.50),
        p75: quantile_sorted(&sorted, 0.75),
        max: sorted.last().copied(),
    }
}

/// Arithmetic mean, or `None` for an empty column.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (denominator n - 1).
///
/// Needs at least two values: with one value the denominator would be
/// zero, and the reference convention reports the statistic as missing.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let m = mean(values)?;
    let squared_deviations: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((squared_deviations / (n - 1) as f64).sqrt())
}

/// The `p`-th quantile of pre-sorted data, by linear interpolation.
///
/// For sorted data of length n and fraction p in [0, 1]:
/// 1. h = (n - 1) * p
/// 2. the result interpolates between the values at floor(h) and
///    floor(h) + 1, weighted by the fractional part of h
///
/// Parameters:
/// - sorted: the column values, sorted ascending
/// - p: the quantile fraction (0.25 for the 25th percentile)
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }

    let h = (n - 1) as f64 * p;
    let lower = h.floor() as usize;
    let weight = h - h.floor();

    if lower + 1 >= n {
        return Some(sorted[n - 1]);
    }
    Some((1.0 - weight) * sorted[lower] + weight * sorted[lower + 1])
}
