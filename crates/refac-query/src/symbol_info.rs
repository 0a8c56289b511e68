//! Symbol-Info (spec §4.7): declaration metadata for a resolved symbol —
//! kind, accessibility, modifiers, base/interfaces, members, parameters,
//! return type, and (when the collaborator carries it) XML docs.

use serde::Serialize;

use refac_error::Result;
use refac_operation::CancellationToken;
use refac_semantic::{Accessibility, DocumentId, NodeKind, SemanticModel, SymbolModifiers};
use refac_workspace::Solution;

use crate::support::{document, header_signature, parameter_list, return_type};
use crate::QueryOperation;

/// Modifier flags relevant to refactoring safety checks, mirroring
/// `refac_semantic::SymbolModifiers` (which carries no `serde` dependency
/// of its own — this crate is the tool-call boundary, so it owns the
/// serializable copy).
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Modifiers {
    /// Declared `virtual`.
    pub is_virtual: bool,
    /// Declared `override`.
    pub is_override: bool,
    /// Declared `abstract`.
    pub is_abstract: bool,
    /// Declared `static`.
    pub is_static: bool,
    /// Declared `extern`.
    pub is_extern: bool,
    /// Declared `async`.
    pub is_async: bool,
    /// Declared `partial`.
    pub is_partial: bool,
}

impl From<SymbolModifiers> for Modifiers {
    fn from(m: SymbolModifiers) -> Self {
        Self {
            is_virtual: m.is_virtual,
            is_override: m.is_override,
            is_abstract: m.is_abstract,
            is_static: m.is_static,
            is_extern: m.is_extern,
            is_async: m.is_async,
            is_partial: m.is_partial,
        }
    }
}

/// Declaration metadata for one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolInfo {
    /// Fully qualified name.
    pub fully_qualified_name: String,
    /// Unqualified name.
    pub simple_name: String,
    /// Structural kind, as its `Debug` label (`"Class"`, `"Method"`, ...).
    pub kind: String,
    /// Declared accessibility, as its `Debug` label.
    pub accessibility: String,
    /// Modifier flags relevant to refactoring safety checks.
    pub modifiers: Modifiers,
    /// Base class / implemented interfaces, nearest-listed first.
    pub base_types: Vec<String>,
    /// Simple names of members declared directly on this symbol (types only).
    pub members: Vec<String>,
    /// `(type, name)` pairs for a method/constructor's parameters.
    pub parameters: Vec<(String, String)>,
    /// Declared return type, for methods (`None` for non-callable kinds).
    pub return_type: Option<String>,
    /// `true` if declared in a referenced assembly rather than the loaded solution.
    pub is_external: bool,
}

/// Look up declaration metadata for a symbol resolved from a coarse locator.
pub struct SymbolInfoQuery {
    /// Document to resolve the locator against.
    pub document: DocumentId,
    /// Simple or qualified name to resolve.
    pub symbol_name: String,
    /// 1-based line, paired with `column`, to disambiguate.
    pub line: Option<u32>,
    /// 1-based column, paired with `line`.
    pub column: Option<u32>,
}

impl QueryOperation for SymbolInfoQuery {
    type Output = SymbolInfo;

    fn run(&self, base: &Solution, _cancel: &CancellationToken) -> Result<Self::Output> {
        let doc = document(base, self.document)?;
        let model = base.semantic_model();
        let symbol =
            refac_resolve::resolve_in_file(&doc, base.language().as_ref(), model.as_ref(), &self.symbol_name, self.line, self.column)?;

        let base_types = model.base_types(&symbol.key).into_iter().map(|s| s.fully_qualified_name).collect();
        let members = if symbol.is_moveable_type() {
            model.members(&symbol.key).into_iter().map(|m| m.simple_name).collect()
        } else {
            Vec::new()
        };

        let (parameters, returns) = if matches!(symbol.kind, NodeKind::Method | NodeKind::Constructor) {
            symbol
                .declarations
                .first()
                .and_then(|decl| {
                    let text = doc.text.get(decl.span.start as usize..decl.span.end as usize)?;
                    let header = header_signature(text);
                    Some((parameter_list(&header), return_type(&header)))
                })
                .unwrap_or_default()
        } else {
            (Vec::new(), None)
        };

        Ok(SymbolInfo {
            fully_qualified_name: symbol.fully_qualified_name,
            simple_name: symbol.simple_name,
            kind: format!("{:?}", symbol.kind),
            accessibility: accessibility_label(symbol.accessibility),
            modifiers: symbol.modifiers.into(),
            base_types,
            members,
            parameters,
            return_type: returns,
            is_external: symbol.is_external,
        })
    }
}

fn accessibility_label(accessibility: Accessibility) -> String {
    format!("{accessibility:?}")
}
