//! Istanbul `coverage-final.json` documents
//!
//! Only the branch part of the format is modelled; statement and function
//! maps are ignored during deserialization.

use super::layout::ExperimentLayout;
use super::{read_text, ArtifactError, IssueKind, RunIssue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One run's coverage: source file path → per-file record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverageDocument {
    pub files: BTreeMap<String, FileCoverage>,
}

/// Branch data recorded for one source file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileCoverage {
    /// Branch id → definition
    #[serde(rename = "branchMap", default)]
    pub branch_map: BTreeMap<String, BranchMeta>,

    /// Branch id → hit count per path (one entry per outcome of the branch)
    #[serde(rename = "b", default)]
    pub branch_hits: BTreeMap<String, Vec<u64>>,
}

/// Definition of one branch point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchMeta {
    /// Branch kind as reported by the instrumenter (`if`, `cond-expr`, ...)
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub line: Option<u32>,

    /// Source range of each path, indexed like the hit-count list
    #[serde(default)]
    pub locations: Vec<SourceRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: Position,
    #[serde(default)]
    pub end: Option<Position>,
}

/// Istanbul emits `null` columns for some synthesized ranges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub column: Option<u32>,
}

impl CoverageDocument {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a coverage document from disk
    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let contents = read_text(path)?;
        Self::from_json_str(&contents).map_err(|source| ArtifactError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Source location of one path of a branch, if the document defines it
    pub fn branch_location(&self, file: &str, branch_id: &str, path_index: usize) -> Option<&SourceRange> {
        self.files
            .get(file)?
            .branch_map
            .get(branch_id)?
            .locations
            .get(path_index)
    }
}

/// A successfully parsed coverage document of one run
#[derive(Debug, Clone)]
pub struct CoverageRun {
    pub run: u32,
    pub document: CoverageDocument,
}

/// All coverage runs of one tool plus what could not be loaded
#[derive(Debug, Clone, Default)]
pub struct CoverageLoad {
    pub tool: String,
    /// Loaded runs in ascending run order
    pub runs: Vec<CoverageRun>,
    pub issues: Vec<RunIssue>,
}

impl CoverageLoad {
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn run_numbers(&self) -> Vec<u32> {
        self.runs.iter().map(|r| r.run).collect()
    }
}

/// Load every run's coverage document for `tool`
///
/// Missing, unreadable, and malformed documents are recorded as issues and
/// their runs omitted; the result may be empty.
pub fn load_coverage_runs(layout: &ExperimentLayout, tool: &str) -> CoverageLoad {
    let mut load = CoverageLoad {
        tool: tool.to_string(),
        ..CoverageLoad::default()
    };

    let tool_dir = layout.tool_dir(tool);
    if !tool_dir.is_dir() {
        tracing::warn!("tool directory {} not found", tool_dir.display());
        load.issues
            .push(RunIssue::new(tool, None, tool_dir, IssueKind::ToolDirMissing));
        return load;
    }

    for run in layout.runs() {
        let path = layout.coverage_file(tool, run);
        if !path.exists() {
            load.issues
                .push(RunIssue::new(tool, Some(run), path, IssueKind::Missing));
            continue;
        }

        match CoverageDocument::from_file(&path) {
            Ok(document) => {
                tracing::debug!(
                    "loaded {} run {} ({} files)",
                    tool,
                    run,
                    document.files.len()
                );
                load.runs.push(CoverageRun { run, document });
            }
            Err(e) => {
                tracing::warn!("skipping {} run {}: {}", tool, run, e);
                load.issues.push(RunIssue::from_error(tool, run, &e));
            }
        }
    }

    load
}
