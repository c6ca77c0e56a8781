// Statistical comparison of baseline vs enhanced runs
//
// Per-metric pipeline:
// - Descriptive statistics per tool (statrs, all in f64)
// - One-sided Mann-Whitney U test (rank based, no normality assumption:
//   20 runs of a fuzzer rarely give normal distributions)
// - Vargha-Delaney A12 effect size = U / (n1 * n2)
//
// Scientific Foundation:
// [1] Arcuri, A. & Briand, L. (2011). A practical guide for using statistical
//     tests to assess randomized algorithms in software engineering. ICSE.
//     Recommends Mann-Whitney U + A12 for comparing randomized test generators.
// [2] Vargha, A. & Delaney, H. D. (2000). A critique and improvement of the CL
//     common language effect size statistics of McGraw and Wong. JEBS.
//     Source of the 0.56 / 0.64 / 0.71 magnitude thresholds.

mod descriptive;
mod effect;
mod mann_whitney;
mod verdict;

pub use descriptive::{describe, Descriptive};
pub use effect::EffectSize;
pub use mann_whitney::{mann_whitney, Direction, MetricTest, PValueMethod};
pub use verdict::{
    compare_metrics, Advantage, Conclusion, Metric, MetricVerdict, StatisticalAnalysis,
};

use thiserror::Error;

/// Errors from hypothesis testing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Cannot test an empty {side} sample")]
    EmptySample { side: &'static str },

    #[error("Failed to build reference distribution: {0}")]
    Distribution(String),
}

#[cfg(test)]
mod tests;
