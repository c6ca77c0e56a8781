//! End-to-end comparison pipeline
//!
//! Loader → extractor/aggregator → statistics → report, once per invocation.
//! Nothing is persisted between invocations.

use crate::artifacts::{
    analyze_test_patterns, load_auc_series, load_coverage_runs, load_unique_faults, AucLoad,
    CoverageLoad, ExperimentLayout, FaultLoad, RunIssue, TestPatterns,
};
use crate::config::AnalysisConfig;
use crate::coverage::{
    classify_consistency, BranchDiscovery, BranchKey, ConsistencyComparison, ToolCoverage,
};
use crate::report::{self, InspectionCopy};
use crate::stats::{compare_metrics, describe, Descriptive, Metric, StatisticalAnalysis};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop the analysis before a report is written
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Could not load coverage files for tool '{tool}'. Please check directory structure.")]
    NoCoverage { tool: String },
}

/// Everything loaded for one tool
#[derive(Debug, Clone)]
pub struct ToolData {
    pub name: String,
    pub coverage_runs: CoverageLoad,
    pub coverage: ToolCoverage,
    pub auc: AucLoad,
    pub faults: FaultLoad,
}

impl ToolData {
    /// Load and aggregate every artifact of `tool`
    pub fn load(layout: &ExperimentLayout, tool: &str) -> Self {
        let coverage_runs = load_coverage_runs(layout, tool);
        let coverage = ToolCoverage::aggregate(&coverage_runs.runs);
        Self {
            name: tool.to_string(),
            auc: load_auc_series(layout, tool),
            faults: load_unique_faults(layout, tool),
            coverage,
            coverage_runs,
        }
    }

    /// Diagnostics from every loader, coverage first
    pub fn issues(&self) -> impl Iterator<Item = &RunIssue> {
        self.coverage_runs
            .issues
            .iter()
            .chain(&self.auc.issues)
            .chain(&self.faults.issues)
    }
}

/// Fault signatures split by which tool found them
#[derive(Debug, Clone, Default)]
pub struct FaultDiscovery {
    pub only_in_enhanced: BTreeSet<String>,
    pub only_in_baseline: BTreeSet<String>,
    pub shared: BTreeSet<String>,
}

impl FaultDiscovery {
    pub fn compare(baseline: &BTreeSet<String>, enhanced: &BTreeSet<String>) -> Self {
        Self {
            only_in_enhanced: enhanced.difference(baseline).cloned().collect(),
            only_in_baseline: baseline.difference(enhanced).cloned().collect(),
            shared: baseline.intersection(enhanced).cloned().collect(),
        }
    }
}

/// Descriptive statistics of one metric for both tools
#[derive(Debug, Clone, Copy)]
pub struct MetricSummary {
    pub metric: Metric,
    pub baseline: Descriptive,
    pub enhanced: Descriptive,
}

impl MetricSummary {
    /// Enhanced mean minus baseline mean
    pub fn mean_diff(&self) -> f64 {
        self.enhanced.mean - self.baseline.mean
    }
}

/// Detail gathered for a branch only the enhanced tool reached
#[derive(Debug, Clone)]
pub struct EnhancedOnlyBranch {
    pub key: BranchKey,
    pub hitting_runs: Vec<u32>,
    pub patterns: TestPatterns,
}

/// The complete comparison between the two tools
#[derive(Debug, Clone)]
pub struct Comparison {
    pub baseline: ToolData,
    pub enhanced: ToolData,
    pub branches: BranchDiscovery,
    pub consistency: ConsistencyComparison,
    pub faults: FaultDiscovery,
    pub summaries: Vec<MetricSummary>,
    pub significance: StatisticalAnalysis,
    /// Denominator for "hit in k/N runs"
    pub run_slots: u32,
}

impl Comparison {
    /// Compare two loaded tools; pure, performs no I/O
    pub fn build(
        baseline: ToolData,
        enhanced: ToolData,
        significance_level: f64,
        run_slots: u32,
    ) -> Self {
        let branches = BranchDiscovery::compare(&baseline.coverage, &enhanced.coverage);
        let consistency =
            classify_consistency(&branches.shared, &baseline.coverage, &enhanced.coverage);
        let faults = FaultDiscovery::compare(&baseline.faults.signatures, &enhanced.faults.signatures);

        let summaries = Metric::ALL
            .iter()
            .map(|&metric| MetricSummary {
                metric,
                baseline: describe(metric.series(&baseline.auc.series)),
                enhanced: describe(metric.series(&enhanced.auc.series)),
            })
            .collect();

        let significance =
            compare_metrics(&baseline.auc.series, &enhanced.auc.series, significance_level);

        Self {
            baseline,
            enhanced,
            branches,
            consistency,
            faults,
            summaries,
            significance,
            run_slots,
        }
    }

    pub fn summary(&self, metric: Metric) -> Option<&MetricSummary> {
        self.summaries.iter().find(|s| s.metric == metric)
    }

    /// Hitting runs and test patterns for every enhanced-only branch
    pub fn enhanced_only_details(&self, layout: &ExperimentLayout) -> Vec<EnhancedOnlyBranch> {
        self.branches
            .only_in_enhanced
            .iter()
            .map(|key| {
                let hitting_runs = self.enhanced.coverage.hitting_runs(key);
                let patterns = analyze_test_patterns(layout, &self.enhanced.name, &hitting_runs);
                EnhancedOnlyBranch {
                    key: key.clone(),
                    hitting_runs,
                    patterns,
                }
            })
            .collect()
    }
}

/// Files produced by a successful analysis
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub report_path: PathBuf,
    pub inspection: Option<InspectionCopy>,
    pub comparison: Comparison,
}

/// Print a loader diagnostic: errors to stderr, absences to stdout
fn print_issue(issue: &RunIssue) {
    if issue.is_error() {
        eprintln!("{}", issue);
    } else {
        println!("{}", issue);
    }
}

fn load_tool_verbose(layout: &ExperimentLayout, tool: &str) -> ToolData {
    let data = ToolData::load(layout, tool);

    for run in &data.coverage_runs.runs {
        println!("✅ Loaded {} run {}", tool, run.run);
    }
    for issue in data.issues() {
        print_issue(issue);
    }

    println!(
        "📊 {} AUC data: {} fault scores, {} coverage AUCs",
        report::capitalize(tool),
        data.auc.series.fault_scores.len(),
        data.auc.series.coverage_auc.len()
    );
    println!(
        "🐞 {} unique faults: Found {} unique fault types across all runs.",
        report::capitalize(tool),
        data.faults.signatures.len()
    );

    data
}

/// Run the whole comparison and write the report
///
/// Returns [`AnalysisError::NoCoverage`] without writing anything when either
/// tool has no loadable coverage run.
pub fn run(config: &AnalysisConfig) -> Result<AnalysisOutcome> {
    config.validate().map_err(AnalysisError::InvalidConfig)?;

    let layout = ExperimentLayout::new(&config.base_dir, config.run_count);

    println!("🔍 Loading experiment artifacts...");
    println!("{}", "=".repeat(80));
    let baseline = load_tool_verbose(&layout, &config.baseline_tool);
    let enhanced = load_tool_verbose(&layout, &config.enhanced_tool);
    println!("{}", "=".repeat(80));

    for tool in [&baseline, &enhanced] {
        if tool.coverage_runs.is_empty() {
            return Err(AnalysisError::NoCoverage {
                tool: tool.name.clone(),
            }
            .into());
        }
    }

    println!(
        "\n📊 Loaded {} baseline runs and {} enhanced runs",
        baseline.coverage.run_count(),
        enhanced.coverage.run_count()
    );

    println!("\n🔄 Aggregating coverage data...");
    let comparison = Comparison::build(baseline, enhanced, config.significance_level, config.run_count);
    let details = comparison.enhanced_only_details(&layout);

    let inspection = if config.copy_test_files {
        let copy = report::copy_relevant_test_files(
            &layout,
            &comparison.enhanced.name,
            &details,
            &config.output_dir,
        );
        for failure in &copy.failures {
            eprintln!("{}", failure);
        }
        println!(
            "✅ Copied {} test files to {}/",
            copy.copied.len(),
            copy.output_dir.display()
        );
        Some(copy)
    } else {
        None
    };

    let now = chrono::Local::now();
    let report_path = config.output_dir.join(format!(
        "dimeshift_coverage_comparison_report_{}.md",
        now.format("%Y%m%d_%H%M%S")
    ));
    println!("\n📝 Generating detailed report: {}", report_path.display());

    let markdown = report::render_markdown(&report::ReportInput {
        comparison: &comparison,
        details: &details,
        inspection: inspection.as_ref(),
        generated_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
    });
    std::fs::write(&report_path, markdown)
        .with_context(|| format!("Failed to write report {}", report_path.display()))?;

    print!("{}", report::render_console_summary(&comparison, &report_path));

    Ok(AnalysisOutcome {
        report_path,
        inspection,
        comparison,
    })
}
