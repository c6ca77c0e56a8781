use super::extract::extract_branches;
use super::BranchKey;
use crate::artifacts::CoverageRun;
use std::collections::{BTreeMap, BTreeSet};

/// Coverage of one tool merged across all of its loaded runs
#[derive(Debug, Clone, Default)]
pub struct ToolCoverage {
    /// Run number at each position of the frequency vectors
    pub run_numbers: Vec<u32>,

    /// Branches with a hit count > 0 in at least one run
    pub hit_union: BTreeSet<BranchKey>,

    /// Per-run hit counts, indexed by position in `run_numbers`
    /// (0 where a run did not list the branch)
    pub frequency: BTreeMap<BranchKey, Vec<u64>>,

    /// Number of runs that hit each known branch
    pub hit_frequency: BTreeMap<BranchKey, usize>,
}

impl ToolCoverage {
    /// Merge the branch maps of `runs`
    pub fn aggregate(runs: &[CoverageRun]) -> Self {
        let run_count = runs.len();
        let mut hit_union = BTreeSet::new();
        let mut frequency: BTreeMap<BranchKey, Vec<u64>> = BTreeMap::new();

        for (position, run) in runs.iter().enumerate() {
            for (key, count) in extract_branches(&run.document) {
                if count > 0 {
                    hit_union.insert(key.clone());
                }
                frequency.entry(key).or_insert_with(|| vec![0; run_count])[position] = count;
            }
        }

        let hit_frequency = frequency
            .iter()
            .map(|(key, counts)| (key.clone(), counts.iter().filter(|&&c| c > 0).count()))
            .collect();

        Self {
            run_numbers: runs.iter().map(|r| r.run).collect(),
            hit_union,
            frequency,
            hit_frequency,
        }
    }

    pub fn run_count(&self) -> usize {
        self.run_numbers.len()
    }

    /// Runs that hit `key`; 0 for branches this tool never saw
    pub fn hits_in(&self, key: &BranchKey) -> usize {
        self.hit_frequency.get(key).copied().unwrap_or(0)
    }

    /// Run numbers whose hit count for `key` is positive, ascending
    pub fn hitting_runs(&self, key: &BranchKey) -> Vec<u32> {
        let Some(counts) = self.frequency.get(key) else {
            return Vec::new();
        };
        counts
            .iter()
            .zip(&self.run_numbers)
            .filter(|(count, _)| **count > 0)
            .map(|(_, &run)| run)
            .collect()
    }
}
