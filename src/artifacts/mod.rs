//! Artifact loading for repeated experiment runs
//!
//! Every loader scans the fixed run slots of a tool and never fails as a
//! whole: a missing or corrupt artifact becomes a [`RunIssue`] and the run is
//! left out of that artifact's contribution.

pub mod auc;
pub mod coverage;
pub mod faults;
pub mod layout;
pub mod test_patterns;

pub use auc::{load_auc_series, AucLoad, AucSeries};
pub use coverage::{
    load_coverage_runs, BranchMeta, CoverageDocument, CoverageLoad, CoverageRun, FileCoverage,
    Position, SourceRange,
};
pub use faults::{load_unique_faults, normalize_fault_line, parse_unique_faults, FaultLoad};
pub use layout::ExperimentLayout;
pub use test_patterns::{analyze_test_patterns, TestPatterns};

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading a single artifact
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ArtifactError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Json { path, .. } => path,
        }
    }
}

/// Why an artifact did not contribute to the analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The whole tool directory is absent
    ToolDirMissing,
    /// The artifact file does not exist
    Missing,
    /// The file exists but could not be read
    Unreadable(String),
    /// The file was read but does not have the expected structure
    Malformed(String),
}

/// A diagnosed, skipped artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunIssue {
    pub tool: String,
    /// `None` for tool-level issues
    pub run: Option<u32>,
    pub path: PathBuf,
    pub kind: IssueKind,
}

impl RunIssue {
    pub(crate) fn new(tool: &str, run: Option<u32>, path: PathBuf, kind: IssueKind) -> Self {
        Self {
            tool: tool.to_string(),
            run,
            path,
            kind,
        }
    }

    pub(crate) fn from_error(tool: &str, run: u32, err: &ArtifactError) -> Self {
        let kind = match err {
            ArtifactError::Io { source, .. } => IssueKind::Unreadable(source.to_string()),
            ArtifactError::Json { source, .. } => IssueKind::Malformed(source.to_string()),
        };
        Self::new(tool, Some(run), err.path().to_path_buf(), kind)
    }

    /// Missing files are expected in partial experiments; everything else is an error
    pub fn is_error(&self) -> bool {
        matches!(
            self.kind,
            IssueKind::ToolDirMissing | IssueKind::Unreadable(_) | IssueKind::Malformed(_)
        )
    }
}

impl fmt::Display for RunIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::ToolDirMissing => {
                write!(f, "❌ Directory {} not found", self.path.display())
            }
            IssueKind::Missing => write!(f, "⚠️  Missing: {}", self.path.display()),
            IssueKind::Unreadable(reason) => {
                write!(f, "⚠️  Error loading {}: {}", self.path.display(), reason)
            }
            IssueKind::Malformed(reason) => {
                write!(f, "⚠️  Error parsing {}: {}", self.path.display(), reason)
            }
        }
    }
}

/// Read a text artifact, mapping I/O failures to [`ArtifactError`]
pub(crate) fn read_text(path: &Path) -> Result<String, ArtifactError> {
    std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}
