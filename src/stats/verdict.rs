// Per-metric verdicts for the baseline vs enhanced comparison
//
// Three metrics are tested, each in the direction that means "enhanced is
// better":
// - Fault discovery score: higher is better (Greater)
// - Branch coverage growth AUC: lower is better (Less)
// - Final branch coverage: higher is better (Greater)

use super::effect::EffectSize;
use super::mann_whitney::{mann_whitney, Direction, MetricTest};
use super::StatsError;
use crate::artifacts::AucSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    FaultDiscovery,
    CoverageGrowth,
    FinalCoverage,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::FaultDiscovery,
        Metric::CoverageGrowth,
        Metric::FinalCoverage,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::FaultDiscovery => "Fault Discovery Score",
            Self::CoverageGrowth => "Branch Coverage Growth (AUC)",
            Self::FinalCoverage => "Final Branch Coverage",
        }
    }

    pub fn interpretation(self) -> &'static str {
        match self {
            Self::FaultDiscovery | Self::FinalCoverage => "Higher is better",
            Self::CoverageGrowth => "Lower is better (faster)",
        }
    }

    /// Direction in which the enhanced tool is tested
    pub fn direction(self) -> Direction {
        match self {
            Self::FaultDiscovery | Self::FinalCoverage => Direction::Greater,
            Self::CoverageGrowth => Direction::Less,
        }
    }

    pub fn series(self, auc: &AucSeries) -> &[f64] {
        match self {
            Self::FaultDiscovery => &auc.fault_scores,
            Self::CoverageGrowth => &auc.coverage_auc,
            Self::FinalCoverage => &auc.coverage_final,
        }
    }
}

/// Which tool a significant result favors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advantage {
    Enhanced,
    Baseline,
}

impl Advantage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enhanced => "Enhanced",
            Self::Baseline => "Baseline",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Conclusion {
    /// p below the significance level
    Significant {
        effect: EffectSize,
        advantage: Advantage,
    },
    /// Not significant, but the effect size is not negligible
    Trend { effect: EffectSize },
    NotSignificant,
    /// One of the series is empty
    DataMissing { reason: String },
}

impl Conclusion {
    pub fn from_test(test: &MetricTest, significance_level: f64) -> Self {
        let effect = EffectSize::from_a12(test.a12);
        if test.p_value < significance_level {
            let advantage = if test.a12 > 0.5 {
                Advantage::Enhanced
            } else {
                Advantage::Baseline
            };
            Self::Significant { effect, advantage }
        } else if !effect.is_negligible() {
            Self::Trend { effect }
        } else {
            Self::NotSignificant
        }
    }

    pub fn is_significant(&self) -> bool {
        matches!(self, Self::Significant { .. })
    }

    /// Markdown sentence for the significance table
    pub fn to_markdown(&self) -> String {
        match self {
            Self::Significant { effect, advantage } => format!(
                "**Significant**, with a **{}** effect size in favor of **{}**.",
                effect,
                advantage.as_str()
            ),
            Self::Trend { effect } => format!(
                "Not significant, but a **{} effect size** trend was observed.",
                effect
            ),
            Self::NotSignificant => "Not Statistically Significant".to_string(),
            Self::DataMissing { reason } => format!("Data missing ({})", reason),
        }
    }
}

/// Outcome for one metric
#[derive(Debug, Clone, PartialEq)]
pub struct MetricVerdict {
    pub metric: Metric,
    /// `None` when the test could not run
    pub test: Option<MetricTest>,
    pub conclusion: Conclusion,
}

/// Verdicts for all three metrics
#[derive(Debug, Clone)]
pub struct StatisticalAnalysis {
    pub verdicts: Vec<MetricVerdict>,
    pub significance_level: f64,
}

impl StatisticalAnalysis {
    /// True when no metric could be tested
    pub fn all_missing(&self) -> bool {
        self.verdicts.iter().all(|v| v.test.is_none())
    }

    pub fn verdict(&self, metric: Metric) -> Option<&MetricVerdict> {
        self.verdicts.iter().find(|v| v.metric == metric)
    }

    /// Markdown "Statistical Significance Analysis" section
    pub fn to_markdown(&self) -> String {
        let mut report = String::from("## 🔬 Statistical Significance Analysis\n\n");

        if self.all_missing() {
            report.push_str("- Data missing for statistical analysis.\n");
            return report;
        }

        report.push_str("| Metric | p-value | A₁₂ (Enhanced vs. Baseline) | Conclusion |\n");
        report.push_str("|:---|:---:|:---:|:---|\n");

        for verdict in &self.verdicts {
            match &verdict.test {
                Some(test) => {
                    let p = if test.p_value < self.significance_level {
                        format!("**{:.3}**", test.p_value)
                    } else {
                        format!("{:.3}", test.p_value)
                    };
                    report.push_str(&format!(
                        "| **{}** | {} | {:.3} | {} |\n",
                        verdict.metric.name(),
                        p,
                        test.a12,
                        verdict.conclusion.to_markdown()
                    ));
                }
                None => {
                    report.push_str(&format!(
                        "| **{}** | - | - | {} |\n",
                        verdict.metric.name(),
                        verdict.conclusion.to_markdown()
                    ));
                }
            }
        }

        report.push_str(&format!(
            "\n*The **p-value** indicates statistical significance (p < {} is significant).*\n",
            self.significance_level
        ));
        report.push_str(
            "*The **A₁₂ effect size** measures the probability that a random run from 'Enhanced' \
             will outperform a random run from 'Baseline'. 0.5 is no difference, >0.5 favors Enhanced.*\n",
        );

        report
    }
}

/// Run the Mann-Whitney test for every metric
///
/// A metric with an empty series on either side gets a `DataMissing`
/// verdict instead of failing the whole analysis.
pub fn compare_metrics(
    baseline: &AucSeries,
    enhanced: &AucSeries,
    significance_level: f64,
) -> StatisticalAnalysis {
    let verdicts = Metric::ALL
        .iter()
        .map(|&metric| {
            let result = mann_whitney(
                metric.series(enhanced),
                metric.series(baseline),
                metric.direction(),
            );
            match result {
                Ok(test) => MetricVerdict {
                    metric,
                    conclusion: Conclusion::from_test(&test, significance_level),
                    test: Some(test),
                },
                Err(e) => {
                    tracing::debug!("{} not tested: {}", metric.name(), e);
                    MetricVerdict {
                        metric,
                        test: None,
                        conclusion: Conclusion::DataMissing {
                            reason: missing_reason(&e),
                        },
                    }
                }
            }
        })
        .collect();

    StatisticalAnalysis {
        verdicts,
        significance_level,
    }
}

fn missing_reason(err: &StatsError) -> String {
    match err {
        StatsError::EmptySample { side } => format!("no {} values", side),
        other => other.to_string(),
    }
}
