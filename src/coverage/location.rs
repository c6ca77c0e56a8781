use super::BranchKey;
use crate::artifacts::CoverageRun;
use std::fmt;

/// Where a branch path starts in its source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchLocation {
    Known { line: Option<u32>, column: Option<u32> },
    Unknown,
}

impl fmt::Display for BranchLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |v: &Option<u32>| v.map_or_else(|| "?".to_string(), |n| n.to_string());
        match self {
            Self::Known { line, column } => write!(f, "Line {}, Col {}", part(line), part(column)),
            Self::Unknown => f.write_str("Unknown location"),
        }
    }
}

/// Find the source location of `key` in the first document that defines it
///
/// Sources are scanned in order, runs in order within each source.
pub fn locate_branch(key: &BranchKey, sources: &[&[CoverageRun]]) -> BranchLocation {
    sources
        .iter()
        .flat_map(|runs| runs.iter())
        .find_map(|run| {
            run.document
                .branch_location(&key.file, &key.branch_id, key.path_index)
        })
        .map_or(BranchLocation::Unknown, |range| BranchLocation::Known {
            line: range.start.line,
            column: range.start.column,
        })
}
