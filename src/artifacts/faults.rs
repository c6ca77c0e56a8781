//! Unique-fault logs (`unique_faults.txt`)
//!
//! Fault lines often embed a cache-busting query parameter (`?_=1699999999`).
//! Normalization strips it so the same fault seen in two runs yields one
//! signature.

use super::layout::ExperimentLayout;
use super::{read_text, IssueKind, RunIssue};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static VOLATILE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?_=\d+").expect("static pattern"));

/// Lines starting with this marker fence the fault list
const SEPARATOR: &str = "---";

/// Remove every `?_=<digits>` token from a fault line
///
/// Runs to a fixpoint: removing one token can splice a new one together
/// (`?_?_=1=2` → `?_=2`), and the result must be stable under re-normalization.
pub fn normalize_fault_line(line: &str) -> String {
    let mut current = line.to_string();
    while VOLATILE_TOKEN.is_match(&current) {
        current = VOLATILE_TOKEN.replace_all(&current, "").into_owned();
    }
    current
}

/// Distinct normalized fault signatures of one log
pub fn parse_unique_faults(text: &str) -> BTreeSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(SEPARATOR))
        .map(normalize_fault_line)
        .collect()
}

/// Union of fault signatures for one tool
#[derive(Debug, Clone, Default)]
pub struct FaultLoad {
    pub tool: String,
    pub signatures: BTreeSet<String>,
    /// Runs whose log was read
    pub runs_read: usize,
    pub issues: Vec<RunIssue>,
}

pub fn load_unique_faults(layout: &ExperimentLayout, tool: &str) -> FaultLoad {
    let mut load = FaultLoad {
        tool: tool.to_string(),
        ..FaultLoad::default()
    };

    // The coverage loader already reports a missing tool directory
    if !layout.tool_dir(tool).is_dir() {
        return load;
    }

    for run in layout.runs() {
        let path = layout.unique_faults_file(tool, run);
        if !path.exists() {
            load.issues
                .push(RunIssue::new(tool, Some(run), path, IssueKind::Missing));
            continue;
        }

        match read_text(&path) {
            Ok(text) => {
                load.signatures.extend(parse_unique_faults(&text));
                load.runs_read += 1;
            }
            Err(e) => {
                tracing::warn!("skipping unique faults of {} run {}: {}", tool, run, e);
                load.issues.push(RunIssue::from_error(tool, run, &e));
            }
        }
    }

    load
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_timestamp_token() {
        assert_eq!(
            normalize_fault_line("GET /api/wallets?_=1700000000123 -> 500"),
            "GET /api/wallets -> 500"
        );
    }

    #[test]
    fn test_normalize_leaves_other_text_alone() {
        let line = "POST /api/users?id=42 -> 404";
        assert_eq!(normalize_fault_line(line), line);
        assert_eq!(normalize_fault_line("?_=abc"), "?_=abc");
    }

    #[test]
    fn test_normalize_removes_spliced_tokens() {
        let once = normalize_fault_line("x?_?_=1=2y");
        assert_eq!(once, "xy");
        assert_eq!(normalize_fault_line(&once), once);
    }

    #[test]
    fn test_lines_differing_only_in_token_collapse() {
        let a = normalize_fault_line("TypeError at /wallets?_=111 line 3");
        let b = normalize_fault_line("TypeError at /wallets?_=98765 line 3");
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_skips_separators_and_blank_lines() {
        let text = "--- Unique Faults ---\n\
                    \n\
                    GET /a?_=1 -> 500\n\
                      GET /a?_=2 -> 500  \n\
                    GET /b -> 404\n\
                    ---\n";
        let faults = parse_unique_faults(text);

        assert_eq!(faults.len(), 2);
        assert!(faults.contains("GET /a -> 500"));
        assert!(faults.contains("GET /b -> 404"));
    }

    #[test]
    fn test_parse_empty_log() {
        assert!(parse_unique_faults("").is_empty());
        assert!(parse_unique_faults("---\n---\n").is_empty());
    }
}
