//! Data-Flow summary (spec §4.7): a tool-surface view over the same
//! `SemanticModel::data_flow_analysis` call Extract-Method uses internally
//! to wire up an extracted signature.

use serde::Serialize;

use refac_error::{ErrorCode, RefactoringError, Result};
use refac_operation::CancellationToken;
use refac_semantic::{DocumentId, Span};
use refac_workspace::Solution;

use crate::support::document;
use crate::QueryOperation;

/// Read/write/declare shape of a statement range or single expression.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataFlowSummary {
    /// Variables read inside the range whose value originates outside it.
    pub flows_in: Vec<String>,
    /// Variables whose value is used after the range but not before it.
    pub flows_out: Vec<String>,
    /// Variables declared inside the range.
    pub declared_in_range: Vec<String>,
    /// Subset of `declared_in_range` that is read after the range ends.
    pub used_after_range: Vec<String>,
    /// Variables declared outside the range that the collaborator's local
    /// declaration set does not already cover (a lambda/local-function's
    /// captured outer variables). This mock-backed engine has no closure
    /// analysis of its own, so it is always empty here; a real collaborator
    /// would populate it from nested function boundaries within the range.
    pub captured: Vec<String>,
    /// `true` if the range contains at least one `await` expression.
    pub contains_await: bool,
    /// `true` if the range contains a `yield` statement.
    pub contains_yield: bool,
}

/// Run a data-flow analysis over a byte range within one document.
pub struct DataFlowSummaryQuery {
    /// Document containing the range.
    pub document: DocumentId,
    /// Start byte offset of the range.
    pub start: u32,
    /// End byte offset of the range.
    pub end: u32,
}

impl QueryOperation for DataFlowSummaryQuery {
    type Output = DataFlowSummary;

    fn run(&self, base: &Solution, _cancel: &CancellationToken) -> Result<Self::Output> {
        let doc = document(base, self.document)?;
        if self.start > self.end || self.end as usize > doc.text.len() {
            return Err(RefactoringError::new(ErrorCode::InvalidSelection, "range is out of bounds"));
        }

        let model = base.semantic_model();
        let flow = model.data_flow_analysis(self.document, Span::new(self.start, self.end));

        Ok(DataFlowSummary {
            flows_in: flow.flows_in,
            flows_out: flow.flows_out,
            declared_in_range: flow.declared_in_range,
            used_after_range: flow.used_after_range,
            captured: Vec::new(),
            contains_await: flow.contains_await,
            contains_yield: flow.contains_yield,
        })
    }
}
