//! Find-References (spec §4.7): the read-only tool-surface wrapper around
//! `refac_refs::find_all`, adding symbol resolution from a coarse locator.

use serde::Serialize;

use refac_error::Result;
use refac_operation::CancellationToken;
use refac_semantic::DocumentId;
use refac_workspace::Solution;

use crate::support::document;
use crate::QueryOperation;

/// One reference site, serializable at the tool-call boundary. Mirrors
/// `refac_semantic::ReferenceSite`, which (like every collaborator type)
/// carries no `serde` dependency of its own.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceMatch {
    /// Document the reference occurs in.
    pub document: u32,
    /// Start byte offset of the reference's span.
    pub start: u32,
    /// End byte offset of the reference's span.
    pub end: u32,
    /// `true` if this site also writes the symbol (an assignment target).
    pub is_write: bool,
}

/// Every reference to one symbol, grouped by document in source order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReferenceMatches {
    /// References, in document-id then span order.
    pub matches: Vec<ReferenceMatch>,
    /// Total reference count.
    pub total: usize,
}

/// Enumerate every reference to a symbol resolved from a coarse locator.
pub struct FindReferences {
    /// Document containing the declaration (or a use of it).
    pub document: DocumentId,
    /// Simple or qualified name to resolve.
    pub symbol_name: String,
    /// 1-based line, paired with `column`, to disambiguate.
    pub line: Option<u32>,
    /// 1-based column, paired with `line`.
    pub column: Option<u32>,
}

impl QueryOperation for FindReferences {
    type Output = ReferenceMatches;

    fn run(&self, base: &Solution, _cancel: &CancellationToken) -> Result<Self::Output> {
        let doc = document(base, self.document)?;
        let model = base.semantic_model();
        let symbol =
            refac_resolve::resolve_in_file(&doc, base.language().as_ref(), model.as_ref(), &self.symbol_name, self.line, self.column)?;
        let found = refac_refs::find_all(base, model.as_ref(), &symbol.key);
        let matches = found
            .flatten()
            .into_iter()
            .map(|site| ReferenceMatch { document: site.document.0, start: site.span.start, end: site.span.end, is_write: site.is_write })
            .collect();
        Ok(ReferenceMatches { matches, total: found.total })
    }
}
