//! Per-run AUC summaries (`fault-auc.txt`, `results-auc.txt`)
//!
//! Both files are free-form text written by the experiment harness. Each
//! metric is scraped independently, so a run can contribute to one series and
//! not to another.

use super::layout::ExperimentLayout;
use super::{read_text, RunIssue};
use regex::Regex;
use std::sync::LazyLock;

static DISCOVERY_SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Your Test Suite's Discovery Score:\s*([0-9.]+)").expect("static pattern")
});

// Greedy `.+` so the value after the last `=` wins
static FINAL_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Final Score = .+ = ([0-9.]+)").expect("static pattern"));

static FINAL_BRANCH_COVERAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Final Branch Coverage:\s*([0-9.]+)%").expect("static pattern"));

static COVERAGE_AUC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"AUC \(Branch Coverage vs\. Time\):\s*([0-9.]+)").expect("static pattern")
});

fn capture_f64(pattern: &Regex, text: &str) -> Option<f64> {
    pattern.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Extract the fault discovery score from a `fault-auc.txt` body
///
/// Prefers the explicit score line and falls back to the last term of the
/// `Final Score = ... = <value>` calculation line.
pub fn parse_fault_score(text: &str) -> Option<f64> {
    if DISCOVERY_SCORE.is_match(text) {
        return capture_f64(&DISCOVERY_SCORE, text);
    }
    capture_f64(&FINAL_SCORE, text)
}

/// Values scraped from a `results-auc.txt` body
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResultsAuc {
    /// Final branch coverage in percent
    pub final_coverage: Option<f64>,
    /// Area under the branch-coverage-vs-time curve
    pub coverage_auc: Option<f64>,
}

pub fn parse_results_auc(text: &str) -> ResultsAuc {
    ResultsAuc {
        final_coverage: capture_f64(&FINAL_BRANCH_COVERAGE, text),
        coverage_auc: capture_f64(&COVERAGE_AUC, text),
    }
}

/// The three per-run metric series of one tool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AucSeries {
    pub fault_scores: Vec<f64>,
    /// Run number of each entry in `fault_scores`
    pub fault_score_runs: Vec<u32>,
    pub coverage_auc: Vec<f64>,
    pub coverage_final: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct AucLoad {
    pub tool: String,
    pub series: AucSeries,
    pub issues: Vec<RunIssue>,
}

/// Collect the AUC series of `tool` across all run slots
///
/// Absent files are silently skipped (partial experiments are normal);
/// unreadable files are reported.
pub fn load_auc_series(layout: &ExperimentLayout, tool: &str) -> AucLoad {
    let mut load = AucLoad {
        tool: tool.to_string(),
        ..AucLoad::default()
    };

    for run in layout.runs() {
        let fault_file = layout.fault_auc_file(tool, run);
        if fault_file.exists() {
            match read_text(&fault_file) {
                Ok(text) => {
                    if let Some(score) = parse_fault_score(&text) {
                        load.series.fault_scores.push(score);
                        load.series.fault_score_runs.push(run);
                    } else {
                        tracing::debug!("no fault score in {}", fault_file.display());
                    }
                }
                Err(e) => load.issues.push(RunIssue::from_error(tool, run, &e)),
            }
        }

        let results_file = layout.results_auc_file(tool, run);
        if results_file.exists() {
            match read_text(&results_file) {
                Ok(text) => {
                    let results = parse_results_auc(&text);
                    if let Some(final_coverage) = results.final_coverage {
                        load.series.coverage_final.push(final_coverage);
                    }
                    if let Some(auc) = results.coverage_auc {
                        load.series.coverage_auc.push(auc);
                    }
                }
                Err(e) => load.issues.push(RunIssue::from_error(tool, run, &e)),
            }
        }
    }

    tracing::debug!(
        "{}: {} fault scores, {} coverage AUCs, {} final coverages",
        tool,
        load.series.fault_scores.len(),
        load.series.coverage_auc.len(),
        load.series.coverage_final.len()
    );
    load
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_score_line() {
        let text = "Faults found: 7\nYour Test Suite's Discovery Score: 0.8125\n";
        assert_eq!(parse_fault_score(text), Some(0.8125));
    }

    #[test]
    fn test_final_score_fallback_takes_last_term() {
        let text = "Final Score = 13 / 16 = 0.8125\n";
        assert_eq!(parse_fault_score(text), Some(0.8125));
    }

    #[test]
    fn test_discovery_score_preferred_over_fallback() {
        let text = "Final Score = 1 / 2 = 0.5\nYour Test Suite's Discovery Score: 0.75\n";
        assert_eq!(parse_fault_score(text), Some(0.75));
    }

    #[test]
    fn test_unparseable_score_yields_none() {
        assert_eq!(parse_fault_score("nothing useful here"), None);
        assert_eq!(parse_fault_score("Your Test Suite's Discovery Score: 1.2.3"), None);
    }

    #[test]
    fn test_results_auc_both_values() {
        let text = "Final Branch Coverage: 62.5%\nAUC (Branch Coverage vs. Time): 1834.27\n";
        let parsed = parse_results_auc(text);
        assert_eq!(parsed.final_coverage, Some(62.5));
        assert_eq!(parsed.coverage_auc, Some(1834.27));
    }

    #[test]
    fn test_results_auc_partial() {
        let parsed = parse_results_auc("AUC (Branch Coverage vs. Time): 10.0\n");
        assert_eq!(parsed.final_coverage, None);
        assert_eq!(parsed.coverage_auc, Some(10.0));

        // Missing percent sign means the coverage line does not match
        let parsed = parse_results_auc("Final Branch Coverage: 62.5\n");
        assert_eq!(parsed.final_coverage, None);
    }
}
