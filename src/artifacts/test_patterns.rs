//! Call-pattern summary of generated Java test suites
//!
//! Used to characterize the runs that reached a branch: how long their tests
//! are and which methods and arguments they exercise.

use super::layout::ExperimentLayout;
use super::read_text;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static METHOD_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"classUnderTestApogen0\.(\w+)\(([^)]*)\)").expect("static pattern")
});

/// Aggregated call patterns over a set of test files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestPatterns {
    /// Method name → number of calls
    pub method_calls: BTreeMap<String, usize>,
    /// Trimmed, non-empty argument list → number of calls
    pub parameters: BTreeMap<String, usize>,
    /// Number of calls found in each analyzed file
    pub test_lengths: Vec<usize>,
}

impl TestPatterns {
    /// Add the calls found in one test source
    pub fn record_source(&mut self, source: &str) {
        let mut calls = 0;
        for caps in METHOD_CALL.captures_iter(source) {
            calls += 1;
            *self.method_calls.entry(caps[1].to_string()).or_default() += 1;

            let params = caps[2].trim();
            if !params.is_empty() {
                *self.parameters.entry(params.to_string()).or_default() += 1;
            }
        }
        self.test_lengths.push(calls);
    }

    /// Mean calls per analyzed file, `None` when no file was analyzed
    pub fn average_length(&self) -> Option<f64> {
        if self.test_lengths.is_empty() {
            return None;
        }
        let total: usize = self.test_lengths.iter().sum();
        Some(total as f64 / self.test_lengths.len() as f64)
    }

    pub fn top_methods(&self, limit: usize) -> Vec<(&str, usize)> {
        top_counts(&self.method_calls, limit)
    }

    pub fn top_parameters(&self, limit: usize) -> Vec<(&str, usize)> {
        top_counts(&self.parameters, limit)
    }
}

/// Highest counts first; equal counts keep key order
fn top_counts(counts: &BTreeMap<String, usize>, limit: usize) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(limit);
    entries
}

/// Summarize the test suites of `runs` for `tool`
///
/// Runs without a readable test file are skipped.
pub fn analyze_test_patterns(layout: &ExperimentLayout, tool: &str, runs: &[u32]) -> TestPatterns {
    let mut patterns = TestPatterns::default();

    for &run in runs {
        let path = layout.test_source_file(tool, run);
        if !path.exists() {
            continue;
        }
        match read_text(&path) {
            Ok(source) => patterns.record_source(&source),
            Err(e) => tracing::warn!("could not analyze test file for run {}: {}", run, e),
        }
    }

    patterns
}
