//! Code Metrics (spec §4.7): coarse size figures for a type declaration —
//! member count, line span, and a cyclomatic-complexity approximation from
//! branch/loop node counts.

use serde::Serialize;

use refac_error::Result;
use refac_operation::CancellationToken;
use refac_semantic::{DocumentId, SemanticModel};
use refac_workspace::Solution;

use crate::support::document;
use crate::QueryOperation;

/// Size figures for one resolved type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CodeMetrics {
    /// Fully qualified name of the measured type.
    pub symbol: String,
    /// Direct member count (methods, properties, fields, events, ...).
    pub member_count: usize,
    /// Source line span the declaration occupies.
    pub line_count: u32,
    /// Cyclomatic complexity approximation: one plus the number of branch
    /// and loop statements found anywhere within the declaration span. Not a
    /// substitute for a real control-flow-graph count, but stable and cheap
    /// enough for a mock collaborator to produce.
    pub approximate_complexity: u32,
}

/// Compute size metrics for a type resolved from a coarse locator.
pub struct CodeMetricsQuery {
    /// Document to resolve the locator against.
    pub document: DocumentId,
    /// Simple or qualified name of the type.
    pub type_name: String,
    /// 1-based line, paired with `column`, to disambiguate.
    pub line: Option<u32>,
    /// 1-based column, paired with `line`.
    pub column: Option<u32>,
}

const BRANCH_KEYWORDS: [&str; 6] = ["if ", "if(", "else if", "for ", "foreach ", "while "];

impl QueryOperation for CodeMetricsQuery {
    type Output = CodeMetrics;

    fn run(&self, base: &Solution, _cancel: &CancellationToken) -> Result<Self::Output> {
        let doc = document(base, self.document)?;
        let model = base.semantic_model();
        let symbol =
            refac_resolve::resolve_in_file(&doc, base.language().as_ref(), model.as_ref(), &self.type_name, self.line, self.column)?;

        let member_count = model.members(&symbol.key).len();

        let mut line_count = 0u32;
        let mut approximate_complexity = 1u32;
        if let Some(decl) = symbol.declarations.first() {
            if let Some(text) = doc.text.get(decl.span.start as usize..decl.span.end as usize) {
                line_count = text.lines().count() as u32;
                for keyword in BRANCH_KEYWORDS {
                    approximate_complexity += text.matches(keyword).count() as u32;
                }
                approximate_complexity += text.matches("case ").count() as u32;
                approximate_complexity += text.matches("&&").count() as u32;
                approximate_complexity += text.matches("||").count() as u32;
            }
        }

        Ok(CodeMetrics { symbol: symbol.fully_qualified_name, member_count, line_count, approximate_complexity })
    }
}
