//! Branch coverage extraction and cross-run aggregation
//!
//! A branch is one outcome of a conditional, keyed by
//! `(file, branch id, path index)`. A branch counts as covered by a tool only
//! if some run recorded a hit count above zero for it; instrumented branches
//! that were never taken do not count, even though every run "knows" them.

mod aggregate;
mod consistency;
mod extract;
mod location;

pub use aggregate::ToolCoverage;
pub use consistency::{
    classify_consistency, ConsistencyComparison, ConsistentBranch, CONSISTENT_MIN_RUNS,
    INCONSISTENT_MAX_RUNS,
};
pub use extract::extract_branches;
pub use location::{locate_branch, BranchLocation};

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Identifies one conditional outcome in one source file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BranchKey {
    pub file: String,
    pub branch_id: String,
    pub path_index: usize,
}

impl BranchKey {
    pub fn new(file: impl Into<String>, branch_id: impl Into<String>, path_index: usize) -> Self {
        Self {
            file: file.into(),
            branch_id: branch_id.into(),
            path_index,
        }
    }

    /// Folder-safe name, e.g. `branch3path1_src_models_wallet`
    pub fn inspection_dir_name(&self) -> String {
        let clean_file = self.file.replace('/', "_").replace(".js", "");
        format!(
            "branch{}path{}_{}",
            self.branch_id, self.path_index, clean_file
        )
    }
}

impl fmt::Display for BranchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Branch #{} (path {})",
            self.file, self.branch_id, self.path_index
        )
    }
}

/// Set relations between the covered branches of two tools
#[derive(Debug, Clone, Default)]
pub struct BranchDiscovery {
    pub only_in_enhanced: BTreeSet<BranchKey>,
    pub only_in_baseline: BTreeSet<BranchKey>,
    pub shared: BTreeSet<BranchKey>,
}

impl BranchDiscovery {
    pub fn compare(baseline: &ToolCoverage, enhanced: &ToolCoverage) -> Self {
        Self {
            only_in_enhanced: enhanced
                .hit_union
                .difference(&baseline.hit_union)
                .cloned()
                .collect(),
            only_in_baseline: baseline
                .hit_union
                .difference(&enhanced.hit_union)
                .cloned()
                .collect(),
            shared: baseline
                .hit_union
                .intersection(&enhanced.hit_union)
                .cloned()
                .collect(),
        }
    }
}
