// Descriptive statistics for per-run metric series
//
// - statrs `Statistics` for mean and sample standard deviation (n - 1)
// - statrs `Median` over `Data` for the median
// - Quartiles for the IQR use the exclusive method, (n + 1) * p positions,
//   which is what most experiment notebooks report for small samples
//
// Everything stays in f64: coverage AUCs are in the thousands with spreads
// well below one, which f32 cannot resolve.

use serde::Serialize;
use statrs::statistics::{Data, Median, Statistics};

/// Summary of one numeric series
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Descriptive {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1); 0 for fewer than 2 points
    pub std: f64,
    /// Q3 - Q1 (exclusive method); 0 for fewer than 2 points
    pub iqr: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Summarize `series`; an empty series yields all zeros
///
/// # Example
/// ```
/// use covcompare::stats::describe;
///
/// let stats = describe(&[5.0]);
/// assert_eq!(stats.mean, 5.0);
/// assert_eq!(stats.std, 0.0);
/// assert_eq!(stats.count, 1);
/// ```
pub fn describe(series: &[f64]) -> Descriptive {
    if series.is_empty() {
        return Descriptive::default();
    }

    let (std, iqr) = if series.len() > 1 {
        (Statistics::std_dev(series), interquartile_range(series))
    } else {
        (0.0, 0.0)
    };

    Descriptive {
        mean: Statistics::mean(series),
        median: Data::new(series.to_vec()).median(),
        std,
        iqr,
        min: Statistics::min(series),
        max: Statistics::max(series),
        count: series.len(),
    }
}

/// Q3 - Q1 using the exclusive quartile method
///
/// Cut point i (of 4) sits at position i * (n + 1) / 4 in the sorted data,
/// linearly interpolated. The lower index is clamped to `1..=n-1`, so very
/// small samples extrapolate slightly past the extremes.
fn interquartile_range(series: &[f64]) -> f64 {
    let mut sorted = series.to_vec();
    sorted.sort_by(f64::total_cmp);
    exclusive_quartile(&sorted, 3) - exclusive_quartile(&sorted, 1)
}

fn exclusive_quartile(sorted: &[f64], i: i64) -> f64 {
    let len = sorted.len() as i64;
    let m = len + 1;
    let j = (i * m / 4).clamp(1, len - 1);
    let delta = (i * m - j * 4) as f64;
    let j = j as usize;
    (sorted[j - 1] * (4.0 - delta) + sorted[j] * delta) / 4.0
}
