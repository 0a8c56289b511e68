//! Type-Hierarchy (spec §4.7): ancestors and descendants of a resolved type.

use std::collections::BTreeSet;

use serde::Serialize;

use refac_error::{ErrorCode, RefactoringError, Result};
use refac_operation::CancellationToken;
use refac_semantic::{DocumentId, SemanticModel, SymbolKey};
use refac_workspace::Solution;

use crate::support::document;
use crate::QueryOperation;

/// Ancestors (base types and implemented interfaces, transitively) and
/// descendants (direct and indirect subtypes known within the loaded
/// solution) of a resolved type.
#[derive(Debug, Clone, Serialize)]
pub struct TypeHierarchy {
    /// The resolved type's fully qualified name.
    pub symbol: String,
    /// Ancestors, nearest first, in breadth-first order. A diamond base
    /// (an interface implemented through two different paths) appears once.
    pub ancestors: Vec<String>,
    /// Descendants, in breadth-first order, deduplicated the same way.
    pub descendants: Vec<String>,
}

/// Walk the base/derived graph of a type resolved from a coarse locator.
pub struct TypeHierarchyQuery {
    /// Document to resolve the locator against.
    pub document: DocumentId,
    /// Simple or qualified name of the type.
    pub type_name: String,
    /// 1-based line, paired with `column`, to disambiguate.
    pub line: Option<u32>,
    /// 1-based column, paired with `line`.
    pub column: Option<u32>,
    /// Hard cap on BFS depth, guarding against a cyclic hierarchy in
    /// malformed input (spec §7 `CIRCULAR_HIERARCHY`, `HIERARCHY_DEPTH_EXCEEDED`).
    pub max_depth: u32,
}

impl Default for TypeHierarchyQuery {
    fn default() -> Self {
        Self { document: DocumentId(0), type_name: String::new(), line: None, column: None, max_depth: 64 }
    }
}

impl QueryOperation for TypeHierarchyQuery {
    type Output = TypeHierarchy;

    fn run(&self, base: &Solution, cancel: &CancellationToken) -> Result<Self::Output> {
        let doc = document(base, self.document)?;
        let model = base.semantic_model();
        let symbol =
            refac_resolve::resolve_in_file(&doc, base.language().as_ref(), model.as_ref(), &self.type_name, self.line, self.column)?;
        if !symbol.is_moveable_type() {
            return Err(RefactoringError::new(ErrorCode::TypeNotFound, format!("'{}' is not a type declaration", self.type_name)));
        }

        let mut ancestors = Vec::new();
        let mut seen_ancestors: BTreeSet<String> = BTreeSet::new();
        let mut frontier = vec![symbol.key.clone()];
        for _ in 0..self.max_depth {
            if cancel.is_cancelled() || frontier.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for key in &frontier {
                for base_sym in model.base_types(key) {
                    if seen_ancestors.insert(base_sym.fully_qualified_name.clone()) {
                        ancestors.push(base_sym.fully_qualified_name.clone());
                        next.push(base_sym.key);
                    }
                }
            }
            frontier = next;
        }
        if !frontier.is_empty() {
            return Err(RefactoringError::new(
                ErrorCode::HierarchyDepthExceeded,
                format!("ancestor chain of '{}' exceeds {} levels", self.type_name, self.max_depth),
            ));
        }

        let mut descendants = Vec::new();
        let mut seen_descendants: BTreeSet<String> = BTreeSet::new();
        let mut frontier: Vec<SymbolKey> = vec![symbol.key.clone()];
        for _ in 0..self.max_depth {
            if cancel.is_cancelled() || frontier.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for key in &frontier {
                for derived in model.derived_types(key) {
                    if seen_descendants.insert(derived.fully_qualified_name.clone()) {
                        descendants.push(derived.fully_qualified_name.clone());
                        next.push(derived.key);
                    }
                }
            }
            frontier = next;
        }
        if !frontier.is_empty() {
            return Err(RefactoringError::new(
                ErrorCode::HierarchyDepthExceeded,
                format!("descendant chain of '{}' exceeds {} levels", self.type_name, self.max_depth),
            ));
        }

        Ok(TypeHierarchy { symbol: symbol.fully_qualified_name, ancestors, descendants })
    }
}
