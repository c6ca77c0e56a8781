// Configuration for a baseline-vs-enhanced comparison
//
// Every value has a default matching the experiment layout the artifacts are
// produced with (20 runs per tool, alpha = 0.05). The CLI only overrides them.

use std::path::PathBuf;

/// Runs per tool in the standard experiment layout
pub const DEFAULT_RUN_COUNT: u32 = 20;

/// Configuration for one comparison invocation
///
/// # Example
/// ```
/// use covcompare::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.run_count, 20);
/// assert_eq!(config.significance_level, 0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Directory containing the `dimeshift-<tool>-20-run-cc` folders
    pub base_dir: PathBuf,

    /// Directory receiving the markdown report and the inspection folder
    pub output_dir: PathBuf,

    /// Tool name of the reference variant
    pub baseline_tool: String,

    /// Tool name of the variant under evaluation
    pub enhanced_tool: String,

    /// Runs `1..=run_count` are scanned for each tool
    ///
    /// Also used as the denominator in "hit in k/N runs" report lines.
    pub run_count: u32,

    /// Statistical significance level (alpha) for the Mann-Whitney tests
    ///
    /// - 0.05 (default): a metric is significant when p < 0.05
    pub significance_level: f64,

    /// Copy test suites that reached enhanced-only branches into
    /// `test_files_for_inspection/`
    pub copy_test_files: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            baseline_tool: "baseline".to_string(),
            enhanced_tool: "enhanced".to_string(),
            run_count: DEFAULT_RUN_COUNT,
            significance_level: 0.05,
            copy_test_files: true,
        }
    }
}

impl AnalysisConfig {
    /// Default configuration rooted at `base_dir`
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            ));
        }

        if self.run_count == 0 {
            return Err("run_count must be >= 1".to_string());
        }

        if self.baseline_tool.is_empty() || self.enhanced_tool.is_empty() {
            return Err("tool names must not be empty".to_string());
        }

        if self.baseline_tool == self.enhanced_tool {
            return Err(format!(
                "baseline and enhanced tool names must differ, both are '{}'",
                self.baseline_tool
            ));
        }

        Ok(())
    }
}
