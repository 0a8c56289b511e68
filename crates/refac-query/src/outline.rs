//! Document Outline (spec §4.7): the type/member tree of a single document,
//! independent of symbol resolution (an outline is valid even over a
//! document with unresolvable references).

use serde::Serialize;

use refac_error::Result;
use refac_operation::CancellationToken;
use refac_semantic::{DocumentId, NodeId, NodeKind, SyntaxTree};
use refac_workspace::Solution;

use crate::support::document;
use crate::QueryOperation;

pub(crate) const TYPE_KINDS: &[NodeKind] =
    &[NodeKind::Class, NodeKind::Struct, NodeKind::Interface, NodeKind::Enum, NodeKind::Record, NodeKind::Delegate];

pub(crate) const MEMBER_KINDS: &[NodeKind] = &[
    NodeKind::Method,
    NodeKind::Constructor,
    NodeKind::Destructor,
    NodeKind::Operator,
    NodeKind::Indexer,
    NodeKind::Property,
    NodeKind::Field,
    NodeKind::Event,
    NodeKind::Constant,
];

/// One declaration in an outline, with its direct members nested.
#[derive(Debug, Clone, Serialize)]
pub struct OutlineSymbol {
    /// Declared (unqualified) name.
    pub name: String,
    /// Structural kind, as its `Debug` label.
    pub kind: String,
    /// Start byte offset of the declaration.
    pub start: u32,
    /// End byte offset of the declaration.
    pub end: u32,
    /// Direct members, in source order. Always empty for a non-type symbol.
    pub members: Vec<OutlineSymbol>,
}

/// The type/member tree of a document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentOutline {
    /// Top-level type declarations, in source order.
    pub symbols: Vec<OutlineSymbol>,
}

/// Build the outline of one document.
pub struct DocumentOutlineQuery {
    /// Document to outline.
    pub document: DocumentId,
}

impl QueryOperation for DocumentOutlineQuery {
    type Output = DocumentOutline;

    fn run(&self, base: &Solution, _cancel: &CancellationToken) -> Result<Self::Output> {
        let doc = document(base, self.document)?;
        let tree = doc.syntax_tree(base.language().as_ref());

        let mut symbols = Vec::new();
        for &kind in TYPE_KINDS {
            for node in tree.descendants_of_kind(kind) {
                let Some(name) = tree.simple_name(node) else { continue };
                let Some(span) = tree.node_span(node) else { continue };
                symbols.push(OutlineSymbol {
                    name: name.to_string(),
                    kind: format!("{kind:?}"),
                    start: span.start,
                    end: span.end,
                    members: members_of(tree.as_ref(), node, kind),
                });
            }
        }
        symbols.sort_by_key(|s| s.start);

        Ok(DocumentOutline { symbols })
    }
}

fn members_of(tree: &dyn SyntaxTree, type_node: NodeId, type_kind: NodeKind) -> Vec<OutlineSymbol> {
    let mut members = Vec::new();
    for &kind in MEMBER_KINDS {
        for node in tree.descendants_of_kind(kind) {
            if tree.enclosing(node, type_kind) != Some(type_node) {
                continue;
            }
            let Some(name) = tree.simple_name(node) else { continue };
            let Some(span) = tree.node_span(node) else { continue };
            members.push(OutlineSymbol {
                name: name.to_string(),
                kind: format!("{kind:?}"),
                start: span.start,
                end: span.end,
                members: Vec::new(),
            });
        }
    }
    members.sort_by_key(|m| m.start);
    members
}
