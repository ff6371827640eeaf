use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::path::Path;

/// Render a colored unified-style diff between original and patched content.
///
/// Only changed lines plus `context` lines around them are included.
pub fn render_diff(file: &Path, original: &str, patched: &str, context: usize) -> String {
    let mut out = String::new();
    let diff = TextDiff::from_lines(original, patched);

    out.push_str(&format!(
        "{}\n{}\n",
        format!("--- {} (original)", file.display()).dimmed(),
        format!("+++ {} (patched)", file.display()).dimmed()
    ));

    for group in diff.grouped_ops(context) {
        for op in group {
            for change in diff.iter_changes(&op) {
                let line = match change.tag() {
                    ChangeTag::Delete => format!("-{}", change).red(),
                    ChangeTag::Insert => format!("+{}", change).green(),
                    ChangeTag::Equal => format!(" {}", change).normal(),
                };
                out.push_str(&line.to_string());
                if change.missing_newline() {
                    out.push('\n');
                }
            }
        }
    }

    out
}
