//! The Reference Tracker (spec §4.3, component C5).

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

use std::collections::BTreeMap;

use refac_semantic::{DocumentId, ReferenceSite, SemanticModel, SymbolKey};
use refac_workspace::Solution;
use tracing::debug;

/// Every syntactic reference to one symbol, grouped by document.
#[derive(Debug, Clone, Default)]
pub struct ReferencesResult {
    /// References grouped by the document that contains them, each list in
    /// source-span order.
    pub by_document: BTreeMap<DocumentId, Vec<ReferenceSite>>,
    /// Total reference count across every document.
    pub total: usize,
}

impl ReferencesResult {
    /// Flatten into one ordered list (document id ascending, span ascending).
    pub fn flatten(&self) -> Vec<&ReferenceSite> {
        self.by_document.values().flatten().collect()
    }
}

/// Enumerate every reference to `symbol` reachable from `solution`.
///
/// Guarantees completeness (every site the collaborator reports, provided
/// its document is part of the loaded solution) and no duplicates (sites
/// are keyed by `(document, span)`).
pub fn find_all(solution: &Solution, model: &dyn SemanticModel, symbol: &SymbolKey) -> ReferencesResult {
    let mut sites = model.find_references(symbol);
    sites.retain(|site| solution.document(site.document).is_some());
    sites.sort_by_key(|site| (site.document, site.span.start, site.span.end));
    sites.dedup_by_key(|site| (site.document, site.span.start, site.span.end));

    let mut by_document: BTreeMap<DocumentId, Vec<ReferenceSite>> = BTreeMap::new();
    for site in sites {
        by_document.entry(site.document).or_default().push(site);
    }
    let total = by_document.values().map(Vec::len).sum();
    debug!(symbol = %symbol.0, total, documents = by_document.len(), "found references");
    ReferencesResult { by_document, total }
}
