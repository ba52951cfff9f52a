//! Textual report surface.
//!
//! The detailed report always goes to the client's log (the output panel
//! in most editors); the transient summary popup is requested only for
//! interactive scans.

use chrono::{DateTime, Local};

use crate::scanner::Finding;

/// How a scan should surface its result to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Triggered by focus events: log only, no popups.
    Silent,
    /// Explicit user command: log plus summary notification.
    Interactive,
}

pub const NO_ISSUES: &str = "No consecutive dollar signs found";

/// Formats the multi-line detail report for a non-empty finding set.
pub fn format_report(file: &str, findings: &[Finding], at: DateTime<Local>) -> String {
    let mut out = String::new();

    out.push_str("=== PHP consecutive dollar sign check ===\n");
    out.push_str(&format!("File: {file}\n"));
    out.push_str(&format!("Checked at: {}\n", at.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!(
        "Found {} consecutive dollar sign run(s):\n\n",
        findings.len()
    ));

    for finding in findings {
        out.push_str(&format!("line {}: {}\n", finding.line, finding.line_text));
        out.push_str(&format!(
            "  column {}, symbols: {}\n",
            finding.column + 1,
            finding.symbols
        ));
    }

    out.push_str("\n=== Check complete ===\n");
    out
}

/// One-line-per-finding summary for the interactive popup.
pub fn format_summary(file: &str, findings: &[Finding]) -> String {
    let details: Vec<String> = findings
        .iter()
        .map(|f| format!("line {}: {}", f.line, f.symbols))
        .collect();

    format!(
        "Found {} consecutive dollar sign run(s) in {}:\n{}",
        findings.len(),
        file,
        details.join("\n")
    )
}
