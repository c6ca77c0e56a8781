// One-sided Mann-Whitney U test
//
// U counts the (enhanced, baseline) pairs that favor the tested direction,
// ties counting 1/2. Under H0 both samples come from the same distribution
// and U is symmetric around n1 * n2 / 2, so for either direction
//
//     p = P(U' >= U)
//
// - Exact permutation distribution when there are no ties and at least one
//   sample has <= 8 points
// - Otherwise normal approximation with tie-corrected variance and
//   continuity correction (statrs standard normal)

use super::StatsError;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use std::cmp::Ordering;

/// Largest sample size for which the exact distribution is used
const EXACT_MAX_SAMPLE: usize = 8;

/// Alternative hypothesis about the enhanced sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// Enhanced values tend to be larger
    Greater,
    /// Enhanced values tend to be smaller
    Less,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PValueMethod {
    Exact,
    Asymptotic,
}

/// Result of one Mann-Whitney comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTest {
    pub direction: Direction,
    /// Pairs favoring `direction` (ties count 1/2)
    pub u: f64,
    /// One-sided p-value
    pub p_value: f64,
    /// Probability of superiority in `direction`: U / (n1 * n2)
    pub a12: f64,
    /// Enhanced sample size
    pub n1: usize,
    /// Baseline sample size
    pub n2: usize,
    pub method: PValueMethod,
}

/// Test whether `enhanced` is stochastically greater/less than `baseline`
///
/// # Example
/// ```
/// use covcompare::stats::{mann_whitney, Direction};
///
/// let enhanced = [0.9, 0.8, 0.85, 0.95, 0.88];
/// let baseline = [0.5, 0.55, 0.6, 0.52, 0.58];
///
/// let test = mann_whitney(&enhanced, &baseline, Direction::Greater).unwrap();
/// assert_eq!(test.a12, 1.0);
/// assert!(test.p_value < 0.05);
/// ```
pub fn mann_whitney(
    enhanced: &[f64],
    baseline: &[f64],
    direction: Direction,
) -> Result<MetricTest, StatsError> {
    if enhanced.is_empty() {
        return Err(StatsError::EmptySample { side: "enhanced" });
    }
    if baseline.is_empty() {
        return Err(StatsError::EmptySample { side: "baseline" });
    }

    let n1 = enhanced.len();
    let n2 = baseline.len();
    let pairs = (n1 * n2) as f64;

    let u = directional_u(enhanced, baseline, direction);
    let tie_term = tie_term(enhanced, baseline);

    let (p_value, method) = if tie_term == 0.0 && n1.min(n2) <= EXACT_MAX_SAMPLE {
        (exact_p_value(u, n1, n2), PValueMethod::Exact)
    } else {
        (asymptotic_p_value(u, n1, n2, tie_term)?, PValueMethod::Asymptotic)
    };

    Ok(MetricTest {
        direction,
        u,
        p_value,
        a12: u / pairs,
        n1,
        n2,
        method,
    })
}

fn directional_u(enhanced: &[f64], baseline: &[f64], direction: Direction) -> f64 {
    let favored = match direction {
        Direction::Greater => Ordering::Greater,
        Direction::Less => Ordering::Less,
    };

    let mut u = 0.0;
    for e in enhanced {
        for b in baseline {
            match e.total_cmp(b) {
                Ordering::Equal => u += 0.5,
                ord if ord == favored => u += 1.0,
                _ => {}
            }
        }
    }
    u
}

/// Sum of (t^3 - t) over groups of tied values in the pooled sample
fn tie_term(enhanced: &[f64], baseline: &[f64]) -> f64 {
    let mut pooled: Vec<f64> = enhanced.iter().chain(baseline).copied().collect();
    pooled.sort_by(f64::total_cmp);

    let mut term = 0.0;
    for group in pooled.chunk_by(|a, b| a == b) {
        let t = group.len() as f64;
        term += t * t * t - t;
    }
    term
}

/// P(U' >= u) from the permutation distribution of U
fn exact_p_value(u: f64, n1: usize, n2: usize) -> f64 {
    let counts = u_distribution(n1, n2);
    let total: f64 = counts.iter().sum();
    // Without ties U is integral
    let threshold = u.round() as usize;
    let tail: f64 = counts.iter().skip(threshold).sum();
    (tail / total).min(1.0)
}

/// Number of orderings giving each U value for sample sizes (m, n)
///
/// f(m, n, u) = f(m - 1, n, u - n) + f(m, n - 1, u), f(0, n) = f(m, 0) = [1]
fn u_distribution(m: usize, n: usize) -> Vec<f64> {
    // prev[j] holds f(i - 1, j), curr[j] builds f(i, j)
    let mut prev: Vec<Vec<f64>> = (0..=n).map(|_| vec![1.0]).collect();

    for i in 1..=m {
        let mut curr: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
        curr.push(vec![1.0]);
        for j in 1..=n {
            let mut dist = vec![0.0; i * j + 1];
            for (k, &c) in prev[j].iter().enumerate() {
                dist[k + j] += c;
            }
            for (k, &c) in curr[j - 1].iter().enumerate() {
                dist[k] += c;
            }
            curr.push(dist);
        }
        prev = curr;
    }

    prev.swap_remove(n)
}

fn asymptotic_p_value(u: f64, n1: usize, n2: usize, tie_term: f64) -> Result<f64, StatsError> {
    let (a, b) = (n1 as f64, n2 as f64);
    let n = a + b;
    let mean = a * b / 2.0;
    let variance = a * b / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));

    if variance <= 0.0 {
        // Every value identical: no evidence either way
        return Ok(1.0);
    }

    let z = (u - mean - 0.5) / variance.sqrt();
    let normal = Normal::new(0.0, 1.0).map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok(normal.sf(z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u_counts_favoring_pairs() {
        let enhanced = [3.0, 5.0];
        let baseline = [1.0, 3.0, 4.0];

        // greater: 3>1, 3=3 (0.5), 5>1, 5>3, 5>4 -> 4.5
        assert_eq!(directional_u(&enhanced, &baseline, Direction::Greater), 4.5);
        // less: 3=3 (0.5), 3<4 -> 1.5
        assert_eq!(directional_u(&enhanced, &baseline, Direction::Less), 1.5);
    }

    #[test]
    fn test_u_distribution_small() {
        // m = n = 2: U in {0, 1, 2, 2, 3, 4} over the 6 orderings
        assert_eq!(u_distribution(2, 2), vec![1.0, 1.0, 2.0, 1.0, 1.0]);
        assert_eq!(u_distribution(1, 3), vec![1.0, 1.0, 1.0, 1.0]);
        assert_eq!(u_distribution(0, 4), vec![1.0]);
    }

    #[test]
    fn test_u_distribution_sums_to_binomial() {
        let dist = u_distribution(5, 7);
        let total: f64 = dist.iter().sum();
        assert_eq!(total, 792.0); // C(12, 5)
        assert_eq!(dist.len(), 36);
    }

    #[test]
    fn test_exact_complete_separation() {
        let test = mann_whitney(&[4.0, 5.0, 6.0], &[1.0, 2.0, 3.0], Direction::Greater).unwrap();
        assert_eq!(test.method, PValueMethod::Exact);
        assert_eq!(test.u, 9.0);
        assert_eq!(test.a12, 1.0);
        // Only 1 of C(6, 3) = 20 orderings reaches U = 9
        assert!((test.p_value - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_exact_wrong_direction_gives_large_p() {
        let test = mann_whitney(&[4.0, 5.0, 6.0], &[1.0, 2.0, 3.0], Direction::Less).unwrap();
        assert_eq!(test.u, 0.0);
        assert_eq!(test.a12, 0.0);
        assert_eq!(test.p_value, 1.0);
    }

    #[test]
    fn test_ties_use_asymptotic() {
        let test = mann_whitney(&[1.0, 2.0, 2.0], &[2.0, 3.0], Direction::Greater).unwrap();
        assert_eq!(test.method, PValueMethod::Asymptotic);
    }

    #[test]
    fn test_tie_term() {
        // groups: {1}, {2,2,2}, {3} -> 27 - 3 = 24
        assert_eq!(tie_term(&[1.0, 2.0], &[2.0, 2.0, 3.0]), 24.0);
        assert_eq!(tie_term(&[1.0], &[2.0]), 0.0);
    }

    #[test]
    fn test_all_identical_values() {
        let test = mann_whitney(&[7.0; 10], &[7.0; 10], Direction::Greater).unwrap();
        assert_eq!(test.a12, 0.5);
        assert_eq!(test.p_value, 1.0);
    }

    #[test]
    fn test_large_samples_asymptotic_matches_reference() {
        // 1..=10 vs 11..=20, complete separation, n1 = n2 = 10:
        // U = 100, mean 50, sd = sqrt(100 * 21 / 12) = 13.2288
        // z = 49.5 / 13.2288 = 3.7418, sf(z) ~ 9.13e-5
        let enhanced: Vec<f64> = (11..=20).map(f64::from).collect();
        let baseline: Vec<f64> = (1..=10).map(f64::from).collect();
        let test = mann_whitney(&enhanced, &baseline, Direction::Greater).unwrap();

        assert_eq!(test.method, PValueMethod::Asymptotic);
        assert_eq!(test.u, 100.0);
        assert!((test.p_value - 9.13e-5).abs() < 5e-6, "p = {}", test.p_value);
    }

    #[test]
    fn test_empty_samples_rejected() {
        assert_eq!(
            mann_whitney(&[], &[1.0], Direction::Greater),
            Err(StatsError::EmptySample { side: "enhanced" })
        );
        assert_eq!(
            mann_whitney(&[1.0], &[], Direction::Less),
            Err(StatsError::EmptySample { side: "baseline" })
        );
    }
}
