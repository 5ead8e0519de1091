//! Descriptive statistics over numeric columns
//!
//! Quantiles use linear interpolation between the two closest ranks.
//! Statistics that are undefined for the sample size are reported as `None`.

use statrs::statistics::Statistics;
use std::collections::BTreeMap;

use crate::models::{DescriptiveStats, TrendSeries};

/// Column name of the trend ratio in the descriptive statistics map
pub const RATIO_COLUMN: &str = "ratio";

/// Summarize a sample
///
/// Non-finite values are ignored. `std` is the sample standard deviation
/// and needs at least two values.
#[must_use]
pub fn describe(values: &[f64]) -> DescriptiveStats {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return DescriptiveStats::default();
    };

    // rounding can push the running mean a hair past an extreme
    let mean = sorted.iter().mean().clamp(min, max);
    let std = (count >= 2).then(|| sorted.iter().std_dev());

    DescriptiveStats {
        count,
        mean: Some(mean),
        std,
        min: Some(min),
        q25: Some(quantile_sorted(&sorted, 0.25)),
        q50: Some(quantile_sorted(&sorted, 0.50)),
        q75: Some(quantile_sorted(&sorted, 0.75)),
        max: Some(max),
    }
}

/// Linear-interpolated quantile of a non-empty ascending sample
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let position = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;

    let (lo, hi) = (sorted[lower], sorted[upper]);
    if lower == upper {
        return lo;
    }

    let fraction = position - lower as f64;
    (lo + (hi - lo) * fraction).clamp(lo, hi)
}

/// Descriptive statistics of a trend series keyed by column
///
/// An empty series yields an empty map.
#[must_use]
pub fn describe_trend(series: &TrendSeries) -> BTreeMap<String, DescriptiveStats> {
    let mut columns = BTreeMap::new();
    if !series.is_empty() {
        columns.insert(RATIO_COLUMN.to_string(), describe(&series.ratios()));
    }
    columns
}
