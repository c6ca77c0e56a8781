//! CLI argument parsing for covcompare

use crate::config::{AnalysisConfig, DEFAULT_RUN_COUNT};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "covcompare")]
#[command(version)]
#[command(
    about = "Compare coverage, AUC and fault artifacts of a baseline and an enhanced test generator",
    long_about = None
)]
pub struct Cli {
    /// Directory containing the dimeshift-<tool>-20-run-cc folders
    #[arg(value_name = "BASE_DIR", default_value = ".")]
    pub base_dir: PathBuf,

    /// Where the markdown report and the inspection folder are written
    #[arg(short = 'o', long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Significance level (alpha) for the Mann-Whitney tests
    #[arg(long = "significance", value_name = "ALPHA", default_value = "0.05")]
    pub significance: f64,

    /// Number of runs scanned per tool
    #[arg(long = "runs", value_name = "N", default_value_t = DEFAULT_RUN_COUNT)]
    pub runs: u32,

    /// Tool name of the reference variant
    #[arg(long = "baseline-tool", value_name = "NAME", default_value = "baseline")]
    pub baseline_tool: String,

    /// Tool name of the variant under evaluation
    #[arg(long = "enhanced-tool", value_name = "NAME", default_value = "enhanced")]
    pub enhanced_tool: String,

    /// Do not copy test suites of enhanced-only branches for inspection
    #[arg(long = "no-copy")]
    pub no_copy: bool,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Build the analysis configuration from parsed flags
    pub fn into_config(self) -> AnalysisConfig {
        AnalysisConfig {
            base_dir: self.base_dir,
            output_dir: self.output_dir,
            baseline_tool: self.baseline_tool,
            enhanced_tool: self.enhanced_tool,
            run_count: self.runs,
            significance_level: self.significance,
            copy_test_files: !self.no_copy,
        }
    }
}
