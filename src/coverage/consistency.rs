use super::{BranchKey, ToolCoverage};
use std::collections::BTreeSet;

/// A tool is "more consistent" on a branch when it hits it in at least this
/// many runs...
pub const CONSISTENT_MIN_RUNS: usize = 10;

/// ...while the other tool hits it in fewer than this many runs
pub const INCONSISTENT_MAX_RUNS: usize = 5;

/// A shared branch one tool reaches far more reliably than the other
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConsistentBranch {
    pub key: BranchKey,
    /// Runs hit by the more consistent tool
    pub favored_hits: usize,
    /// Runs hit by the other tool
    pub other_hits: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ConsistencyComparison {
    pub enhanced_more_consistent: Vec<ConsistentBranch>,
    pub baseline_more_consistent: Vec<ConsistentBranch>,
}

/// Classify the shared branches of two tools by hit consistency
///
/// Output vectors are in branch order.
pub fn classify_consistency(
    shared: &BTreeSet<BranchKey>,
    baseline: &ToolCoverage,
    enhanced: &ToolCoverage,
) -> ConsistencyComparison {
    let mut comparison = ConsistencyComparison::default();

    for key in shared {
        let baseline_hits = baseline.hits_in(key);
        let enhanced_hits = enhanced.hits_in(key);

        if enhanced_hits >= CONSISTENT_MIN_RUNS && baseline_hits < INCONSISTENT_MAX_RUNS {
            comparison.enhanced_more_consistent.push(ConsistentBranch {
                key: key.clone(),
                favored_hits: enhanced_hits,
                other_hits: baseline_hits,
            });
        } else if baseline_hits >= CONSISTENT_MIN_RUNS && enhanced_hits < INCONSISTENT_MAX_RUNS {
            comparison.baseline_more_consistent.push(ConsistentBranch {
                key: key.clone(),
                favored_hits: baseline_hits,
                other_hits: enhanced_hits,
            });
        }
    }

    comparison
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{CoverageDocument, CoverageRun};

    /// Tool whose `hits` first runs hit `a.js` branch 0 path 0 and the rest don't
    fn tool_hitting(hits: usize, total: usize) -> ToolCoverage {
        let runs: Vec<CoverageRun> = (0..total)
            .map(|i| {
                let count = if i < hits { 1 } else { 0 };
                CoverageRun {
                    run: i as u32 + 1,
                    document: CoverageDocument::from_json_str(&format!(
                        r#"{{"a.js": {{"b": {{"0": [{}]}}}}}}"#,
                        count
                    ))
                    .unwrap(),
                }
            })
            .collect();
        ToolCoverage::aggregate(&runs)
    }

    fn shared_key() -> BTreeSet<BranchKey> {
        [BranchKey::new("a.js", "0", 0)].into_iter().collect()
    }

    #[test]
    fn test_enhanced_more_consistent_at_threshold() {
        let baseline = tool_hitting(4, 20);
        let enhanced = tool_hitting(10, 20);

        let result = classify_consistency(&shared_key(), &baseline, &enhanced);
        assert_eq!(result.enhanced_more_consistent.len(), 1);
        assert_eq!(result.enhanced_more_consistent[0].favored_hits, 10);
        assert_eq!(result.enhanced_more_consistent[0].other_hits, 4);
        assert!(result.baseline_more_consistent.is_empty());
    }

    #[test]
    fn test_other_tool_at_five_is_not_inconsistent() {
        let baseline = tool_hitting(5, 20);
        let enhanced = tool_hitting(15, 20);

        let result = classify_consistency(&shared_key(), &baseline, &enhanced);
        assert!(result.enhanced_more_consistent.is_empty());
        assert!(result.baseline_more_consistent.is_empty());
    }

    #[test]
    fn test_symmetric_for_baseline() {
        let baseline = tool_hitting(12, 20);
        let enhanced = tool_hitting(1, 20);

        let result = classify_consistency(&shared_key(), &baseline, &enhanced);
        assert!(result.enhanced_more_consistent.is_empty());
        assert_eq!(result.baseline_more_consistent.len(), 1);
        assert_eq!(result.baseline_more_consistent[0].favored_hits, 12);
    }

    #[test]
    fn test_nine_runs_is_not_enough() {
        let baseline = tool_hitting(1, 20);
        let enhanced = tool_hitting(9, 20);

        let result = classify_consistency(&shared_key(), &baseline, &enhanced);
        assert!(result.enhanced_more_consistent.is_empty());
    }
}
