//! Per-document diagnostic state.

use dashmap::DashMap;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range, Url};

use crate::scanner::Finding;

pub fn finding_to_diagnostic(finding: &Finding) -> Diagnostic {
    let line = finding.line - 1;
    let len = finding.symbols.chars().count() as u32;

    Diagnostic {
        range: Range {
            start: Position::new(line, finding.column),
            end: Position::new(line, finding.column + len),
        },
        severity: Some(DiagnosticSeverity::WARNING),
        source: Some("phpdd-lsp".to_string()),
        message: format!(
            "Consecutive dollar signs ({}), check whether this variable reference is intentional",
            finding.symbols
        ),
        ..Default::default()
    }
}

/// Owns the diagnostics known per document.
///
/// Every mutation is a full replace or a removal, so no stale or duplicated
/// records can survive a scan. Absence of an entry means "no known issues".
#[derive(Debug, Default)]
pub struct DiagnosticsManager {
    records: DashMap<Url, Vec<Diagnostic>>,
}

impl DiagnosticsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the document's diagnostic set with one record per finding.
    ///
    /// An empty finding set behaves exactly like [`Self::clear`]. Returns
    /// the stored set so the caller can publish it to the client.
    pub fn update(&self, url: &Url, findings: &[Finding]) -> Vec<Diagnostic> {
        if findings.is_empty() {
            self.clear(url);
            return Vec::new();
        }

        let diagnostics: Vec<Diagnostic> =
            findings.iter().map(finding_to_diagnostic).collect();
        self.records.insert(url.clone(), diagnostics.clone());
        diagnostics
    }

    /// Removes the document's entry entirely. Idempotent.
    pub fn clear(&self, url: &Url) {
        self.records.remove(url);
    }

    pub fn get(&self, url: &Url) -> Option<Vec<Diagnostic>> {
        self.records.get(url).map(|r| r.value().clone())
    }
}
