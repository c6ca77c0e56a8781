//! Markdown comparison report

use super::inspection::InspectionCopy;
use crate::analysis::{Comparison, EnhancedOnlyBranch};
use crate::artifacts::{ExperimentLayout, TestPatterns};
use crate::coverage::{locate_branch, BranchKey, ConsistentBranch};
use crate::stats::{Descriptive, Metric};
use std::collections::BTreeSet;

/// Everything the markdown report is rendered from
#[derive(Debug)]
pub struct ReportInput<'a> {
    pub comparison: &'a Comparison,
    pub details: &'a [EnhancedOnlyBranch],
    pub inspection: Option<&'a InspectionCopy>,
    /// Human-readable generation time
    pub generated_at: String,
}

/// How a metric's table is labelled and formatted
struct TableStyle {
    title: &'static str,
    noun: &'static str,
    precision: usize,
    suffix: &'static str,
}

fn table_style(metric: Metric) -> TableStyle {
    match metric {
        Metric::FaultDiscovery => TableStyle {
            title: "### 🎯 Fault Discovery Performance",
            noun: "Score",
            precision: 4,
            suffix: "",
        },
        Metric::CoverageGrowth => TableStyle {
            title: "### 📈 Branch Coverage Growth (AUC)",
            noun: "AUC",
            precision: 2,
            suffix: "",
        },
        Metric::FinalCoverage => TableStyle {
            title: "### 🎯 Final Branch Coverage",
            noun: "Coverage",
            precision: 2,
            suffix: "%",
        },
    }
}

fn metric_table(style: &TableStyle, baseline: &Descriptive, enhanced: &Descriptive) -> String {
    let p = style.precision;
    let s = style.suffix;
    let rows = [
        (format!("Average {}", style.noun), baseline.mean, enhanced.mean),
        (format!("Median {}", style.noun), baseline.median, enhanced.median),
        ("Std Deviation".to_string(), baseline.std, enhanced.std),
        ("IQR".to_string(), baseline.iqr, enhanced.iqr),
        (format!("Min {}", style.noun), baseline.min, enhanced.min),
        (format!("Max {}", style.noun), baseline.max, enhanced.max),
    ];

    let mut table = format!("{}\n\n", style.title);
    table.push_str("| Metric | Baseline | Enhanced | Difference |\n");
    table.push_str("|--------|----------|----------|------------|\n");
    for (label, b, e) in rows {
        table.push_str(&format!(
            "| {} | {:.*}{} | {:.*}{} | {:+.*}{} |\n",
            label,
            p,
            b,
            s,
            p,
            e,
            s,
            p,
            e - b,
            s
        ));
    }
    table.push_str(&format!(
        "| Data Points | {} | {} | - |\n\n",
        baseline.count, enhanced.count
    ));
    table
}

fn branch_line(comparison: &Comparison, key: &BranchKey) -> String {
    let location = locate_branch(
        key,
        &[
            comparison.baseline.coverage_runs.runs.as_slice(),
            comparison.enhanced.coverage_runs.runs.as_slice(),
        ],
    );
    format!("📂 {} at {}", key, location)
}

fn fault_list(report: &mut String, heading: &str, faults: &BTreeSet<String>) {
    report.push_str(&format!("### {}\n\n", heading));
    if faults.is_empty() {
        report.push_str("*None found.*\n");
    } else {
        for fault in faults {
            report.push_str(&format!("- `{}`\n", fault));
        }
    }
    report.push('\n');
}

fn counted(entries: &[(&str, usize)]) -> String {
    entries
        .iter()
        .map(|(name, count)| format!("{}({})", name, count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn pattern_summary(patterns: &TestPatterns) -> String {
    let average = patterns
        .average_length()
        .map_or_else(|| "n/a".to_string(), |avg| format!("{:.1}", avg));

    let mut out = String::from("**Pattern Analysis for this branch:**\n");
    out.push_str(&format!("- Average test length: {} method calls\n", average));
    out.push_str(&format!(
        "- Most frequent methods: {}\n",
        counted(&patterns.top_methods(3))
    ));
    out.push_str(&format!(
        "- Common parameters: {}\n\n",
        counted(&patterns.top_parameters(3))
    ));
    out
}

fn consistency_list(
    report: &mut String,
    comparison: &Comparison,
    favored: &str,
    other: &str,
    branches: &[ConsistentBranch],
) {
    let slots = comparison.run_slots;
    report.push_str(&format!(
        "### Branches {} hits more consistently (≥10 runs vs <5 runs)\n",
        favored
    ));
    report.push_str(&format!("**Count:** {}\n\n", branches.len()));

    if branches.is_empty() {
        report.push_str("*None found*\n");
        return;
    }
    for branch in branches {
        report.push_str(&format!("- {}\n", branch_line(comparison, &branch.key)));
        report.push_str(&format!(
            "  - {}: {}/{} runs, {}: {}/{} runs\n",
            favored, branch.favored_hits, slots, other, branch.other_hits, slots
        ));
    }
}

/// Render the full comparison report
pub fn render_markdown(input: &ReportInput<'_>) -> String {
    let comparison = input.comparison;
    let slots = comparison.run_slots;
    let mut report = String::from("# Dimeshift Coverage Comparison Report\n\n");

    report.push_str(&format!("**Generated:** {}\n\n", input.generated_at));
    report.push_str(&format!(
        "**Baseline runs:** {}\n",
        comparison.baseline.coverage.run_count()
    ));
    report.push_str(&format!(
        "**Enhanced runs:** {}\n\n",
        comparison.enhanced.coverage.run_count()
    ));

    // AUC tables
    report.push_str("## 🚀 AUC Performance Analysis\n\n");
    for summary in &comparison.summaries {
        report.push_str(&metric_table(
            &table_style(summary.metric),
            &summary.baseline,
            &summary.enhanced,
        ));
    }

    report.push_str(&comparison.significance.to_markdown());
    report.push('\n');

    // Unique faults
    let faults = &comparison.faults;
    report.push_str("## 🐞 Unique Fault Discovery Analysis\n\n");
    report.push_str(&format!(
        "- **Total unique fault types (Baseline):** {}\n",
        comparison.baseline.faults.signatures.len()
    ));
    report.push_str(&format!(
        "- **Total unique fault types (Enhanced):** {}\n",
        comparison.enhanced.faults.signatures.len()
    ));
    report.push_str(&format!(
        "- **Shared fault types found by both:** {}\n",
        faults.shared.len()
    ));
    report.push_str(&format!(
        "- **Fault types found ONLY by Enhanced:** {}\n",
        faults.only_in_enhanced.len()
    ));
    report.push_str(&format!(
        "- **Fault types found ONLY by Baseline:** {}\n\n",
        faults.only_in_baseline.len()
    ));
    fault_list(
        &mut report,
        "Fault Types Found ONLY by Enhanced Tool",
        &faults.only_in_enhanced,
    );
    fault_list(
        &mut report,
        "Fault Types Found ONLY by Baseline Tool",
        &faults.only_in_baseline,
    );

    // Branch summary
    let branches = &comparison.branches;
    report.push_str("## 📊 Branch Discovery Summary\n\n");
    report.push_str(&format!(
        "- **Total unique branches (Baseline):** {}\n",
        comparison.baseline.coverage.hit_union.len()
    ));
    report.push_str(&format!(
        "- **Total unique branches (Enhanced):** {}\n",
        comparison.enhanced.coverage.hit_union.len()
    ));
    report.push_str(&format!("- **Shared branches:** {}\n", branches.shared.len()));
    report.push_str(&format!(
        "- **Only in Enhanced:** {}\n",
        branches.only_in_enhanced.len()
    ));
    report.push_str(&format!(
        "- **Only in Baseline:** {}\n\n",
        branches.only_in_baseline.len()
    ));

    // Discovery advantage
    report.push_str("## 🎯 Discovery Advantage\n\n");
    report.push_str("### Branches found ONLY by Enhanced tool\n");
    report.push_str(&format!(
        "**Count:** {}\n\n",
        branches.only_in_enhanced.len()
    ));

    if input.details.is_empty() {
        report.push_str("*None found*\n");
    } else {
        for detail in input.details {
            report.push_str(&format!(
                "- {} (hit in {}/{} runs)\n",
                branch_line(comparison, &detail.key),
                comparison.enhanced.coverage.hits_in(&detail.key),
                slots
            ));
        }

        report.push_str("\n#### Detailed Run Analysis for Enhanced-Only Branches\n\n");
        let tool_dir = ExperimentLayout::tool_dir_name(&comparison.enhanced.name);
        for detail in input.details {
            report.push_str(&format!("**{}**\n", branch_line(comparison, &detail.key)));
            report.push_str(&format!("- Hit in runs: {:?}\n", detail.hitting_runs));
            let suites: Vec<String> = detail
                .hitting_runs
                .iter()
                .map(|run| format!("`{}/{}/testdimeshiftLLM_0/`", tool_dir, run))
                .collect();
            report.push_str(&format!(
                "- Test suites to examine: {}\n\n",
                suites.join(", ")
            ));

            if detail.hitting_runs.is_empty() {
                report.push_str("*None found*\n");
            } else {
                report.push_str(&pattern_summary(&detail.patterns));
            }
        }
    }

    report.push_str("\n### Branches found ONLY by Baseline tool\n");
    report.push_str(&format!(
        "**Count:** {}\n\n",
        branches.only_in_baseline.len()
    ));
    if branches.only_in_baseline.is_empty() {
        report.push_str("*None found*\n");
    } else {
        for key in &branches.only_in_baseline {
            report.push_str(&format!(
                "- {} (hit in {}/{} runs)\n",
                branch_line(comparison, key),
                comparison.baseline.coverage.hits_in(key),
                slots
            ));
        }
    }

    // Consistency
    report.push_str("\n## 📊 Consistency Advantage\n\n");
    consistency_list(
        &mut report,
        comparison,
        "Enhanced",
        "Baseline",
        &comparison.consistency.enhanced_more_consistent,
    );
    report.push('\n');
    consistency_list(
        &mut report,
        comparison,
        "Baseline",
        "Enhanced",
        &comparison.consistency.baseline_more_consistent,
    );

    match input.inspection {
        Some(copy) => report.push_str(&format!(
            "\n📁 **Test files copied to:** `{}/` for manual inspection\n\n",
            copy.output_dir.display()
        )),
        None => report.push_str("\n📁 *Test file copying was disabled for this run.*\n\n"),
    }

    report
}
