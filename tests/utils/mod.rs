// Experiment fixture builder for integration tests
//
// Lays out `dimeshift-<tool>-20-run-cc/<run>/...` artifacts in a temp dir the
// same way the experiment harness does.

#![allow(dead_code)]

use covcompare::artifacts::ExperimentLayout;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub struct ExperimentFixture {
    dir: TempDir,
    layout: ExperimentLayout,
}

impl ExperimentFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let layout = ExperimentLayout::new(dir.path(), 20);
        Self { dir, layout }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn layout(&self) -> &ExperimentLayout {
        &self.layout
    }

    fn write(path: &Path, body: &str) {
        fs::create_dir_all(path.parent().expect("artifact has parent")).expect("create run dir");
        fs::write(path, body).expect("write artifact");
    }

    /// Coverage document hitting the given `(file, branch id, hits)` entries
    pub fn coverage(&self, tool: &str, run: u32, branches: &[(&str, &str, &[u64])]) {
        Self::write(&self.layout.coverage_file(tool, run), &coverage_json(branches));
    }

    pub fn raw_coverage(&self, tool: &str, run: u32, body: &str) {
        Self::write(&self.layout.coverage_file(tool, run), body);
    }

    pub fn fault_score(&self, tool: &str, run: u32, score: f64) {
        Self::write(
            &self.layout.fault_auc_file(tool, run),
            &format!(
                "Faults detected: see log\nYour Test Suite's Discovery Score: {}\n",
                score
            ),
        );
    }

    pub fn results_auc(&self, tool: &str, run: u32, final_coverage: f64, auc: f64) {
        Self::write(
            &self.layout.results_auc_file(tool, run),
            &format!(
                "Final Branch Coverage: {}%\nAUC (Branch Coverage vs. Time): {}\n",
                final_coverage, auc
            ),
        );
    }

    pub fn unique_faults(&self, tool: &str, run: u32, lines: &[&str]) {
        Self::write(&self.layout.unique_faults_file(tool, run), &lines.join("\n"));
    }

    pub fn test_source(&self, tool: &str, run: u32, body: &str) {
        Self::write(&self.layout.test_source_file(tool, run), body);
    }
}

/// Istanbul-style JSON with only the `b` hit map
pub fn coverage_json(branches: &[(&str, &str, &[u64])]) -> String {
    let mut files: serde_json::Map<String, serde_json::Value> = serde_json::Map::new();
    for (file, id, hits) in branches {
        let entry = files
            .entry(file.to_string())
            .or_insert_with(|| serde_json::json!({ "b": {} }));
        entry["b"][*id] = serde_json::json!(hits);
    }
    serde_json::Value::Object(files).to_string()
}

/// Write the same artifacts for `runs` of `tool`
pub fn populate_runs(
    fixture: &ExperimentFixture,
    tool: &str,
    runs: impl IntoIterator<Item = u32>,
    branches: &[(&str, &str, &[u64])],
) {
    for run in runs {
        fixture.coverage(tool, run, branches);
    }
}
