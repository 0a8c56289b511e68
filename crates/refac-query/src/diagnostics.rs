//! Diagnostics (spec §4.7): compiler/analyzer diagnostics for one document,
//! optionally filtered by minimum severity.

use serde::Serialize;

use refac_error::Result;
use refac_operation::CancellationToken;
use refac_semantic::{DocumentId, SemanticModel, Severity};
use refac_workspace::Solution;

use crate::support::document;
use crate::QueryOperation;

/// A single diagnostic, serializable at the tool-call boundary.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticEntry {
    /// Severity label (`"Error"`, `"Warning"`, `"Info"`, `"Hint"`).
    pub severity: String,
    /// Stable diagnostic code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Start byte offset of the affected span.
    pub start: u32,
    /// End byte offset of the affected span.
    pub end: u32,
}

/// Diagnostics for one document, filtered and counted by severity.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilteredDiagnostics {
    /// Matching diagnostics, in the order the collaborator reported them.
    pub diagnostics: Vec<DiagnosticEntry>,
    /// Count of `Error`-severity diagnostics before filtering.
    pub error_count: usize,
    /// Count of `Warning`-severity diagnostics before filtering.
    pub warning_count: usize,
}

/// Report diagnostics for a document, dropping anything below `min_severity`.
pub struct DiagnosticsQuery {
    /// Document to inspect.
    pub document: DocumentId,
    /// Lowest severity to include (`Hint` by default — nothing is dropped).
    pub min_severity: Severity,
}

impl Default for DiagnosticsQuery {
    fn default() -> Self {
        Self { document: DocumentId(0), min_severity: Severity::Hint }
    }
}

fn rank(severity: Severity) -> u8 {
    match severity {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
        Severity::Hint => 3,
    }
}

impl QueryOperation for DiagnosticsQuery {
    type Output = FilteredDiagnostics;

    fn run(&self, base: &Solution, _cancel: &CancellationToken) -> Result<Self::Output> {
        document(base, self.document)?;
        let model = base.semantic_model();
        let all = model.diagnostics(self.document);

        let error_count = all.iter().filter(|d| d.severity == Severity::Error).count();
        let warning_count = all.iter().filter(|d| d.severity == Severity::Warning).count();
        let threshold = rank(self.min_severity);

        let diagnostics = all
            .into_iter()
            .filter(|d| rank(d.severity) <= threshold)
            .map(|d| DiagnosticEntry {
                severity: format!("{:?}", d.severity),
                code: d.code,
                message: d.message,
                start: d.span.start,
                end: d.span.end,
            })
            .collect();

        Ok(FilteredDiagnostics { diagnostics, error_count, warning_count })
    }
}
