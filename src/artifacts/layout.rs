//! On-disk experiment layout
//!
//! ```text
//! <base>/dimeshift-<tool>-20-run-cc/<run>/
//!     fault-auc.txt
//!     results-auc.txt
//!     unique_faults.txt
//!     testdimeshiftLLM_0/coverage-final.json
//!     testdimeshiftLLM_0/main/ClassUnderTestApogen_ESTest.java
//! ```

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

const TEST_SUITE_DIR: &str = "testdimeshiftLLM_0";
const COVERAGE_FILE: &str = "coverage-final.json";
const FAULT_AUC_FILE: &str = "fault-auc.txt";
const RESULTS_AUC_FILE: &str = "results-auc.txt";
const UNIQUE_FAULTS_FILE: &str = "unique_faults.txt";
const TEST_SOURCE_FILE: &str = "ClassUnderTestApogen_ESTest.java";

/// Resolves artifact paths for every tool and run of one experiment
#[derive(Debug, Clone)]
pub struct ExperimentLayout {
    base_dir: PathBuf,
    run_count: u32,
}

impl ExperimentLayout {
    pub fn new(base_dir: impl Into<PathBuf>, run_count: u32) -> Self {
        Self {
            base_dir: base_dir.into(),
            run_count,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn run_count(&self) -> u32 {
        self.run_count
    }

    /// Run numbers scanned for every tool (1-based)
    pub fn runs(&self) -> RangeInclusive<u32> {
        1..=self.run_count
    }

    /// Directory name of a tool, relative to the base directory
    pub fn tool_dir_name(tool: &str) -> String {
        format!("dimeshift-{}-20-run-cc", tool)
    }

    pub fn tool_dir(&self, tool: &str) -> PathBuf {
        self.base_dir.join(Self::tool_dir_name(tool))
    }

    pub fn run_dir(&self, tool: &str, run: u32) -> PathBuf {
        self.tool_dir(tool).join(run.to_string())
    }

    /// Generated test-suite directory of a run
    pub fn test_suite_dir(&self, tool: &str, run: u32) -> PathBuf {
        self.run_dir(tool, run).join(TEST_SUITE_DIR)
    }

    pub fn coverage_file(&self, tool: &str, run: u32) -> PathBuf {
        self.test_suite_dir(tool, run).join(COVERAGE_FILE)
    }

    pub fn fault_auc_file(&self, tool: &str, run: u32) -> PathBuf {
        self.run_dir(tool, run).join(FAULT_AUC_FILE)
    }

    pub fn results_auc_file(&self, tool: &str, run: u32) -> PathBuf {
        self.run_dir(tool, run).join(RESULTS_AUC_FILE)
    }

    pub fn unique_faults_file(&self, tool: &str, run: u32) -> PathBuf {
        self.run_dir(tool, run).join(UNIQUE_FAULTS_FILE)
    }

    /// Generated Java test class of a run
    pub fn test_source_file(&self, tool: &str, run: u32) -> PathBuf {
        self.test_suite_dir(tool, run)
            .join("main")
            .join(TEST_SOURCE_FILE)
    }
}
