// Scenario tests for the baseline vs enhanced statistical comparison
//
// Series shaped like real 20-run experiments: fault scores in [0, 1],
// coverage AUCs in the thousands, final coverage in percent.

use super::*;
use crate::artifacts::AucSeries;

fn series(fault: &[f64], auc: &[f64], final_cov: &[f64]) -> AucSeries {
    AucSeries {
        fault_scores: fault.to_vec(),
        fault_score_runs: (1..=fault.len() as u32).collect(),
        coverage_auc: auc.to_vec(),
        coverage_final: final_cov.to_vec(),
    }
}

/// Scenario: enhanced finds more faults, grows coverage faster, ends higher
/// Expected: all three metrics significant in favor of Enhanced
#[test]
fn test_enhanced_dominates_every_metric() {
    let baseline = series(
        &[0.50, 0.52, 0.48, 0.55, 0.51, 0.49, 0.53, 0.50, 0.47, 0.54],
        &[2100.0, 2080.0, 2150.0, 2120.0, 2090.0, 2110.0, 2130.0, 2140.0, 2070.0, 2160.0],
        &[55.0, 54.5, 56.0, 55.5, 54.0, 56.5, 55.2, 54.8, 55.9, 56.1],
    );
    let enhanced = series(
        &[0.70, 0.72, 0.68, 0.75, 0.71, 0.69, 0.73, 0.74, 0.76, 0.77],
        &[1800.0, 1820.0, 1790.0, 1810.0, 1830.0, 1805.0, 1815.0, 1795.0, 1825.0, 1785.0],
        &[62.0, 63.5, 61.0, 62.5, 64.0, 63.0, 62.2, 61.8, 63.3, 62.9],
    );

    let analysis = compare_metrics(&baseline, &enhanced, 0.05);
    assert_eq!(analysis.verdicts.len(), 3);

    for verdict in &analysis.verdicts {
        let test = verdict.test.as_ref().unwrap();
        assert_eq!(test.a12, 1.0, "{} should separate completely", verdict.metric.name());
        assert!(test.p_value < 0.001);
        assert_eq!(
            verdict.conclusion,
            Conclusion::Significant {
                effect: EffectSize::Large,
                advantage: Advantage::Enhanced
            }
        );
    }
}

/// Scenario: coverage AUC is HIGHER for enhanced (slower growth)
/// Expected: tested in the "less" direction, A12 = 0, no significance for
/// enhanced, and the report does not claim an enhanced advantage
#[test]
fn test_coverage_auc_direction_is_lower_is_better() {
    let baseline = series(&[0.5], &[100.0, 110.0, 105.0, 102.0], &[50.0]);
    let enhanced = series(&[0.5], &[200.0, 210.0, 205.0, 202.0], &[50.0]);

    let analysis = compare_metrics(&baseline, &enhanced, 0.05);
    let auc = analysis.verdict(Metric::CoverageGrowth).unwrap();
    let test = auc.test.as_ref().unwrap();

    assert_eq!(test.direction, Direction::Less);
    assert_eq!(test.a12, 0.0);
    assert_eq!(test.p_value, 1.0);
    assert_eq!(
        auc.conclusion,
        Conclusion::Trend {
            effect: EffectSize::Large
        }
    );
}

/// Scenario: overlapping distributions from natural run-to-run variance
/// Expected: no significant difference
#[test]
fn test_no_false_positive_on_overlapping_runs() {
    let baseline = series(&[0.61, 0.58, 0.64, 0.60, 0.59, 0.63], &[], &[]);
    let enhanced = series(&[0.60, 0.62, 0.59, 0.63, 0.61, 0.58], &[], &[]);

    let analysis = compare_metrics(&baseline, &enhanced, 0.05);
    let fault = analysis.verdict(Metric::FaultDiscovery).unwrap();

    assert!(!fault.conclusion.is_significant());
    assert!(fault.test.as_ref().unwrap().p_value >= 0.05);
}

/// Scenario: one tool produced no results-auc.txt at all
/// Expected: coverage metrics report missing data, fault metric still tested
#[test]
fn test_missing_series_reported_per_metric() {
    let baseline = series(&[0.5, 0.6, 0.55], &[], &[]);
    let enhanced = series(&[0.7, 0.8, 0.75], &[1000.0, 1100.0], &[60.0, 61.0]);

    let analysis = compare_metrics(&baseline, &enhanced, 0.05);
    assert!(!analysis.all_missing());

    let auc = analysis.verdict(Metric::CoverageGrowth).unwrap();
    assert!(auc.test.is_none());
    assert_eq!(
        auc.conclusion,
        Conclusion::DataMissing {
            reason: "no baseline values".to_string()
        }
    );

    let markdown = analysis.to_markdown();
    assert!(markdown.contains("| **Branch Coverage Growth (AUC)** | - | - | Data missing (no baseline values) |"));
    assert!(markdown.contains("| **Fault Discovery Score** |"));
}

/// Scenario: no AUC artifacts anywhere
/// Expected: single "data missing" fragment, no table
#[test]
fn test_all_metrics_missing() {
    let analysis = compare_metrics(&AucSeries::default(), &AucSeries::default(), 0.05);
    assert!(analysis.all_missing());

    let markdown = analysis.to_markdown();
    assert!(markdown.contains("- Data missing for statistical analysis."));
    assert!(!markdown.contains("| Metric |"));
}

/// A12 uses each metric's own sample sizes, not the fault series sizes
#[test]
fn test_a12_uses_per_metric_sample_sizes() {
    let baseline = series(&[0.1, 0.2, 0.3, 0.4, 0.5], &[], &[40.0, 41.0]);
    let enhanced = series(&[0.6], &[], &[50.0, 51.0, 52.0]);

    let analysis = compare_metrics(&baseline, &enhanced, 0.05);
    let final_cov = analysis.verdict(Metric::FinalCoverage).unwrap();
    let test = final_cov.test.as_ref().unwrap();

    assert_eq!(test.n1, 3);
    assert_eq!(test.n2, 2);
    assert_eq!(test.a12, 1.0);
}

/// Significant p-values are bolded in the table
#[test]
fn test_markdown_bolds_significant_p() {
    let baseline = series(&[0.1, 0.2, 0.3, 0.4], &[], &[]);
    let enhanced = series(&[0.6, 0.7, 0.8, 0.9], &[], &[]);

    let markdown = compare_metrics(&baseline, &enhanced, 0.05).to_markdown();
    // exact p = 1 / C(8, 4) = 0.014
    assert!(markdown.contains("| **Fault Discovery Score** | **0.014** | 1.000 |"));
}

#[test]
fn test_describe_matches_series_shape() {
    let stats = describe(&[0.5, 0.7]);
    assert_eq!(stats.count, 2);
    assert!((stats.mean - 0.6).abs() < 1e-12);
    assert!((stats.median - 0.6).abs() < 1e-12);
    assert!((stats.std - 0.2 / 2f64.sqrt()).abs() < 1e-12);
}

/// Scenario: coverage AUCs in the thousands with sub-unit run-to-run spread
/// Expected: std, mean and IQR resolved to well below the 2 rendered decimals
#[test]
fn test_describe_coverage_auc_magnitudes() {
    let auc = [1834.27, 1834.29, 1834.31, 1834.25, 1834.33];
    let stats = describe(&auc);

    assert!((stats.mean - 1834.29).abs() < 1e-9, "mean = {}", stats.mean);
    assert!((stats.median - 1834.29).abs() < 1e-9);
    // deviations -0.02, 0, 0.02, -0.04, 0.04: sum of squares 0.004, / 4
    assert!((stats.std - 0.001f64.sqrt()).abs() < 1e-9, "std = {}", stats.std);
    // exclusive quartiles at positions 1.5 and 4.5: 1834.26 and 1834.32
    assert!((stats.iqr - 0.06).abs() < 1e-9, "iqr = {}", stats.iqr);
    assert_eq!(stats.min, 1834.25);
    assert_eq!(stats.max, 1834.33);
}
