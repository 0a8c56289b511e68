//! Search Symbols (spec §4.7): substring search for declarations across
//! every document in the loaded solution, independent of resolution.

use regex::RegexBuilder;
use serde::Serialize;
use tracing::debug;

use refac_error::{ErrorCode, RefactoringError, Result};
use refac_operation::CancellationToken;
use refac_workspace::Solution;

use crate::outline::{MEMBER_KINDS, TYPE_KINDS};
use crate::QueryOperation;

/// One matching declaration.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolMatch {
    /// Declared (unqualified) name.
    pub name: String,
    /// Structural kind, as its `Debug` label.
    pub kind: String,
    /// Document the declaration lives in.
    pub document: u32,
    /// Start byte offset of the declaration.
    pub start: u32,
    /// End byte offset of the declaration.
    pub end: u32,
}

/// The flat set of matches for a query, sorted by name then document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchSymbols {
    /// Matching declarations.
    pub matches: Vec<SymbolMatch>,
}

/// Search for declared symbols whose name contains `query` (case-insensitive).
pub struct SearchSymbolsQuery {
    /// Substring to match against each declared name.
    pub query: String,
    /// Hard cap on the number of matches returned; `0` means unlimited.
    pub limit: usize,
}

impl QueryOperation for SearchSymbolsQuery {
    type Output = SearchSymbols;

    fn run(&self, base: &Solution, cancel: &CancellationToken) -> Result<Self::Output> {
        let pattern = RegexBuilder::new(&regex::escape(&self.query))
            .case_insensitive(true)
            .build()
            .map_err(|err| RefactoringError::new(ErrorCode::InvalidSelection, format!("bad search query: {err}")))?;
        let mut matches = Vec::new();

        for doc in base.documents() {
            if cancel.is_cancelled() {
                break;
            }
            let tree = doc.syntax_tree(base.language().as_ref());
            for &kind in TYPE_KINDS.iter().chain(MEMBER_KINDS.iter()) {
                for node in tree.descendants_of_kind(kind) {
                    let Some(name) = tree.simple_name(node) else { continue };
                    if !pattern.is_match(name) {
                        continue;
                    }
                    let Some(span) = tree.node_span(node) else { continue };
                    matches.push(SymbolMatch {
                        name: name.to_string(),
                        kind: format!("{kind:?}"),
                        document: doc.id.0,
                        start: span.start,
                        end: span.end,
                    });
                }
            }
        }

        matches.sort_by(|a, b| a.name.cmp(&b.name).then(a.document.cmp(&b.document)).then(a.start.cmp(&b.start)));
        if self.limit > 0 {
            matches.truncate(self.limit);
        }

        debug!(query = %self.query, matches = matches.len(), "searched symbols");
        Ok(SearchSymbols { matches })
    }
}
