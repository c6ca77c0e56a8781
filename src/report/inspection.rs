//! Copies the test suites behind enhanced-only branches for manual review
//!
//! ```text
//! <out>/test_files_for_inspection/
//!     branch<id>path<idx>_<file>/run<run>_test.java
//! ```
//!
//! Every failure is recorded and skipped; copying never aborts the analysis.

use crate::analysis::EnhancedOnlyBranch;
use crate::artifacts::ExperimentLayout;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const INSPECTION_DIR: &str = "test_files_for_inspection";

#[derive(Debug, Clone)]
pub struct CopyFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for CopyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "⚠️  Could not copy {}: {}", self.path.display(), self.reason)
    }
}

/// Result of one inspection copy pass
#[derive(Debug, Clone)]
pub struct InspectionCopy {
    pub output_dir: PathBuf,
    pub copied: Vec<PathBuf>,
    pub failures: Vec<CopyFailure>,
}

/// Copy each hitting run's test file into a per-branch folder under
/// `output_root/test_files_for_inspection`
///
/// Runs without a test file are skipped silently.
pub fn copy_relevant_test_files(
    layout: &ExperimentLayout,
    tool: &str,
    branches: &[EnhancedOnlyBranch],
    output_root: &Path,
) -> InspectionCopy {
    let output_dir = output_root.join(INSPECTION_DIR);
    let mut result = InspectionCopy {
        output_dir: output_dir.clone(),
        copied: Vec::new(),
        failures: Vec::new(),
    };

    if let Err(e) = fs::create_dir_all(&output_dir) {
        result.failures.push(CopyFailure {
            path: output_dir,
            reason: e.to_string(),
        });
        return result;
    }

    for branch in branches {
        let branch_dir = output_dir.join(branch.key.inspection_dir_name());
        if let Err(e) = fs::create_dir_all(&branch_dir) {
            result.failures.push(CopyFailure {
                path: branch_dir,
                reason: e.to_string(),
            });
            continue;
        }

        for &run in &branch.hitting_runs {
            let source = layout.test_source_file(tool, run);
            if !source.exists() {
                continue;
            }

            let dest = branch_dir.join(format!("run{}_test.java", run));
            match fs::copy(&source, &dest) {
                Ok(_) => result.copied.push(dest),
                Err(e) => {
                    tracing::warn!("copy {} -> {} failed: {}", source.display(), dest.display(), e);
                    result.failures.push(CopyFailure {
                        path: source,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    result
}
