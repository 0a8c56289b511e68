//! Go-to-Definition (spec §4.7): resolve a locator to its declaration sites.

use serde::Serialize;

use refac_error::Result;
use refac_operation::CancellationToken;
use refac_semantic::{DeclarationLocation, DocumentId};
use refac_workspace::Solution;

use crate::support::document;
use crate::QueryOperation;

/// A symbol's declaration sites, as a flat list ordered by document then span.
#[derive(Debug, Clone, Serialize)]
pub struct Definitions {
    /// Fully qualified name of the resolved symbol.
    pub symbol: String,
    /// Every declaration site (more than one only for partial types).
    pub locations: Vec<DefinitionLocation>,
}

/// One declaration site, serializable at the tool-call boundary.
#[derive(Debug, Clone, Serialize)]
pub struct DefinitionLocation {
    /// The document id the declaration lives in.
    pub document: u32,
    /// Start byte offset of the declaration's name token.
    pub start: u32,
    /// End byte offset of the declaration's name token.
    pub end: u32,
}

impl From<&DeclarationLocation> for DefinitionLocation {
    fn from(decl: &DeclarationLocation) -> Self {
        Self { document: decl.document.0, start: decl.span.start, end: decl.span.end }
    }
}

/// Resolve `symbol_name` from a coarse locator and report its declaration sites.
pub struct GoToDefinition {
    /// Document to resolve the locator against.
    pub document: DocumentId,
    /// Simple or qualified name to resolve.
    pub symbol_name: String,
    /// 1-based line, paired with `column`, to disambiguate.
    pub line: Option<u32>,
    /// 1-based column, paired with `line`.
    pub column: Option<u32>,
}

impl QueryOperation for GoToDefinition {
    type Output = Definitions;

    fn run(&self, base: &Solution, _cancel: &CancellationToken) -> Result<Self::Output> {
        let doc = document(base, self.document)?;
        let model = base.semantic_model();
        let symbol =
            refac_resolve::resolve_in_file(&doc, base.language().as_ref(), model.as_ref(), &self.symbol_name, self.line, self.column)?;
        Ok(Definitions {
            symbol: symbol.fully_qualified_name,
            locations: symbol.declarations.iter().map(DefinitionLocation::from).collect(),
        })
    }
}
