//! Report generation: markdown file, console digest, inspection copies

mod console;
mod inspection;
mod markdown;

pub use console::render_console_summary;
pub use inspection::{copy_relevant_test_files, CopyFailure, InspectionCopy, INSPECTION_DIR};
pub use markdown::{render_markdown, ReportInput};

/// `baseline` → `Baseline`
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
