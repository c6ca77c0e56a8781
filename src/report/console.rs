//! End-of-run console digest

use crate::analysis::Comparison;
use crate::stats::Metric;
use std::path::Path;

/// Mean difference above which a fault discovery score gap is reported
const FAULT_DIFF_THRESHOLD: f64 = 0.01;
/// Same for the coverage growth AUC
const AUC_DIFF_THRESHOLD: f64 = 5.0;
/// Same for final coverage, in percentage points
const FINAL_DIFF_THRESHOLD: f64 = 1.0;

fn mean_diff(comparison: &Comparison, metric: Metric) -> f64 {
    comparison.summary(metric).map_or(0.0, |s| s.mean_diff())
}

fn means(comparison: &Comparison, metric: Metric) -> (f64, f64) {
    comparison
        .summary(metric)
        .map_or((0.0, 0.0), |s| (s.baseline.mean, s.enhanced.mean))
}

/// Key insights, one line each
///
/// A lower coverage growth AUC means coverage was reached sooner, so the
/// AUC insight favors the tool with the smaller mean.
fn key_insights(comparison: &Comparison) -> Vec<String> {
    let mut insights = Vec::new();

    let fault_diff = mean_diff(comparison, Metric::FaultDiscovery);
    let auc_diff = mean_diff(comparison, Metric::CoverageGrowth);
    let final_diff = mean_diff(comparison, Metric::FinalCoverage);

    if fault_diff > FAULT_DIFF_THRESHOLD {
        insights.push(format!(
            "✅ Enhanced has {:.3} better fault discovery score on average",
            fault_diff
        ));
    } else if fault_diff < -FAULT_DIFF_THRESHOLD {
        insights.push(format!(
            "⚠️  Baseline has {:.3} better fault discovery score on average",
            fault_diff.abs()
        ));
    }

    if auc_diff < -AUC_DIFF_THRESHOLD {
        insights.push(format!(
            "✅ Enhanced reaches coverage faster (growth AUC {:.1} lower on average)",
            auc_diff.abs()
        ));
    } else if auc_diff > AUC_DIFF_THRESHOLD {
        insights.push(format!(
            "⚠️  Baseline reaches coverage faster (growth AUC {:.1} lower on average)",
            auc_diff
        ));
    }

    if final_diff > FINAL_DIFF_THRESHOLD {
        insights.push(format!(
            "✅ Enhanced achieves {:.1}% higher final coverage on average",
            final_diff
        ));
    } else if final_diff < -FINAL_DIFF_THRESHOLD {
        insights.push(format!(
            "⚠️  Baseline achieves {:.1}% higher final coverage on average",
            final_diff.abs()
        ));
    }

    let only_enhanced = comparison.branches.only_in_enhanced.len();
    if only_enhanced > 0 {
        insights.push(format!(
            "✅ Enhanced discovers {} unique branches never found by baseline",
            only_enhanced
        ));
    }
    let more_consistent = comparison.consistency.enhanced_more_consistent.len();
    if more_consistent > 0 {
        insights.push(format!(
            "✅ Enhanced shows better consistency on {} branches",
            more_consistent
        ));
    }
    let faults_only_enhanced = comparison.faults.only_in_enhanced.len();
    if faults_only_enhanced > 0 {
        insights.push(format!(
            "✅ Enhanced discovers {} unique fault types never found by baseline",
            faults_only_enhanced
        ));
    }

    let no_advantage = only_enhanced == 0
        && more_consistent == 0
        && faults_only_enhanced == 0
        && fault_diff <= FAULT_DIFF_THRESHOLD
        && auc_diff >= -AUC_DIFF_THRESHOLD
        && final_diff <= FINAL_DIFF_THRESHOLD;

    if no_advantage {
        insights.push("⚠️  Enhanced shows limited advantages in this analysis".to_string());
        insights.push(
            "💭 Consider: Are there other metrics to explore? Different thresholds?".to_string(),
        );
    } else {
        insights.push("🎉 Enhanced tool shows measurable improvements in multiple metrics!".to_string());
    }

    insights
}

/// Render the digest printed after the report is written
pub fn render_console_summary(comparison: &Comparison, report_path: &Path) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);

    out.push_str(&format!("\n{}\n", rule));
    out.push_str("📈 COMPREHENSIVE COMPARISON SUMMARY\n");
    out.push_str(&format!("{}\n", rule));

    let (fault_b, fault_e) = means(comparison, Metric::FaultDiscovery);
    let (auc_b, auc_e) = means(comparison, Metric::CoverageGrowth);
    let (final_b, final_e) = means(comparison, Metric::FinalCoverage);
    out.push_str("🚀 AUC Performance:\n");
    out.push_str(&format!(
        "   Fault Discovery (avg): Baseline {:.4} vs Enhanced {:.4}\n",
        fault_b, fault_e
    ));
    out.push_str(&format!(
        "   Coverage Growth (avg): Baseline {:.2} vs Enhanced {:.2}\n",
        auc_b, auc_e
    ));
    out.push_str(&format!(
        "   Final Coverage (avg): Baseline {:.2}% vs Enhanced {:.2}%\n",
        final_b, final_e
    ));

    let faults = &comparison.faults;
    out.push_str("\n🐞 Unique Fault Discovery:\n");
    out.push_str(&format!(
        "   Baseline: {} unique fault types\n",
        comparison.baseline.faults.signatures.len()
    ));
    out.push_str(&format!(
        "   Enhanced: {} unique fault types\n",
        comparison.enhanced.faults.signatures.len()
    ));
    out.push_str(&format!("   Shared: {} fault types\n", faults.shared.len()));
    out.push_str(&format!(
        "   Fault types ONLY Enhanced finds: {}\n",
        faults.only_in_enhanced.len()
    ));
    out.push_str(&format!(
        "   Fault types ONLY Baseline finds: {}\n",
        faults.only_in_baseline.len()
    ));

    let branches = &comparison.branches;
    out.push_str("\n🔢 Branch Discovery:\n");
    out.push_str(&format!(
        "   Baseline: {} unique branches\n",
        comparison.baseline.coverage.hit_union.len()
    ));
    out.push_str(&format!(
        "   Enhanced: {} unique branches\n",
        comparison.enhanced.coverage.hit_union.len()
    ));
    out.push_str(&format!("   Shared: {} branches\n", branches.shared.len()));

    out.push_str("\n🎯 Discovery results:\n");
    out.push_str(&format!(
        "   Branches ONLY Enhanced finds: {}\n",
        branches.only_in_enhanced.len()
    ));
    out.push_str(&format!(
        "   Branches ONLY Baseline finds: {}\n",
        branches.only_in_baseline.len()
    ));

    out.push_str("\n📊 Consistency results:\n");
    out.push_str(&format!(
        "   Enhanced more consistent: {}\n",
        comparison.consistency.enhanced_more_consistent.len()
    ));
    out.push_str(&format!(
        "   Baseline more consistent: {}\n",
        comparison.consistency.baseline_more_consistent.len()
    ));

    out.push_str(&format!(
        "\n📝 Detailed report saved to: {}\n",
        report_path.display()
    ));

    out.push_str("\n💡 Key insights:\n");
    for insight in key_insights(comparison) {
        out.push_str(&format!("   {}\n", insight));
    }

    out
}
