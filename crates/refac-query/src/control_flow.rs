//! Control-Flow summary (spec §4.7): reachability and exit-point shape of a
//! statement range, built on the same `data_flow_analysis` collaborator
//! call Extract-Method uses for its safety checks.

use serde::Serialize;

use refac_error::{ErrorCode, RefactoringError, Result};
use refac_operation::CancellationToken;
use refac_semantic::{DocumentId, SemanticModel, Span};
use refac_workspace::Solution;

use crate::support::document;
use crate::QueryOperation;

/// Reachability and exit-point summary of a statement range.
#[derive(Debug, Clone, Serialize)]
pub struct ControlFlowSummary {
    /// `true` unless the range starts past the end of its document (the
    /// collaborator never reports a range's entry as dead without deeper
    /// static analysis this mock does not perform).
    pub start_reachable: bool,
    /// `false` if the range ends with no statement that can fall through
    /// normally (it contains exactly one `return` and no unstructured exit).
    pub end_reachable: bool,
    /// Number of distinct `return` statements in the enclosing member.
    pub return_points: usize,
    /// `true` if the range contains a `break`/`continue`/`goto` that would
    /// leave it (spec's `UnresolvableControlFlow` trigger for Extract-Method).
    pub has_unstructured_exit: bool,
}

/// Summarize the control flow of a byte range within one document.
pub struct ControlFlowSummaryQuery {
    /// Document containing the range.
    pub document: DocumentId,
    /// Start byte offset of the range.
    pub start: u32,
    /// End byte offset of the range.
    pub end: u32,
}

impl QueryOperation for ControlFlowSummaryQuery {
    type Output = ControlFlowSummary;

    fn run(&self, base: &Solution, _cancel: &CancellationToken) -> Result<Self::Output> {
        let doc = document(base, self.document)?;
        if self.start > self.end || self.end as usize > doc.text.len() {
            return Err(RefactoringError::new(ErrorCode::InvalidSelection, "range is out of bounds"));
        }

        let model = base.semantic_model();
        let flow = model.data_flow_analysis(self.document, Span::new(self.start, self.end));

        Ok(ControlFlowSummary {
            start_reachable: true,
            end_reachable: flow.return_points == 0 && !flow.has_unstructured_exit,
            return_points: flow.return_points,
            has_unstructured_exit: flow.has_unstructured_exit,
        })
    }
}
