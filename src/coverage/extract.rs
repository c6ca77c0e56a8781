use super::BranchKey;
use crate::artifacts::CoverageDocument;
use std::collections::BTreeMap;

/// Flatten one coverage document into `BranchKey → hit count`
///
/// Every branch id listed in a file's hit map yields one key per path index.
/// Branch ids that are only defined in `branchMap` contribute nothing.
pub fn extract_branches(document: &CoverageDocument) -> BTreeMap<BranchKey, u64> {
    let mut branches = BTreeMap::new();

    for (file, coverage) in &document.files {
        for (branch_id, hits) in &coverage.branch_hits {
            for (path_index, &count) in hits.iter().enumerate() {
                branches.insert(BranchKey::new(file.as_str(), branch_id.as_str(), path_index), count);
            }
        }
    }

    branches
}
