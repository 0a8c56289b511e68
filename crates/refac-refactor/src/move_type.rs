//! Move-Type-to-File and Move-Type-to-Namespace (spec §4.6.1, §4.6.2).

use std::collections::BTreeSet;
use std::path::PathBuf;

use std::sync::Arc;

use refac_error::{ErrorCode, RefactoringError, Result};
use refac_ident::{is_valid_absolute_path, is_valid_identifier, is_valid_namespace};
use refac_operation::{CancellationToken, RefactoringOperation};
use refac_semantic::{DocumentId, Language, NodeKind, SemanticModel, Span, Symbol, SyntaxTree};
use refac_workspace::{Document, DocumentChange, EditSet, Solution, TextEdit};
use tracing::{debug, info, instrument};

use crate::support::{count_top_level_types, document, indent, namespace_wrap, span_with_leading_blank_line};

/// The namespaces a document's own `using` directives already name.
fn existing_using_targets(doc: &Document, tree: &dyn refac_semantic::SyntaxTree) -> BTreeSet<String> {
    tree.descendants_of_kind(NodeKind::UsingDirective)
        .into_iter()
        .filter_map(|node| tree.simple_name(node))
        .map(|name| name.strip_prefix("static ").map(str::to_string).unwrap_or(name))
        .map(|name| name.split_once(" = ").map_or_else(|| name.clone(), |(_, rest)| rest.to_string()))
        .collect()
}

/// `true` if `doc` already has unqualified access to `target_namespace`,
/// either via an existing `using` or because one of its own declarations is
/// already nested inside that namespace.
fn namespace_already_reachable(doc: &Arc<Document>, language: &dyn refac_semantic::Language, model: &dyn refac_semantic::SemanticModel, target_namespace: &str) -> bool {
    let tree = doc.syntax_tree(language);
    if existing_using_targets(doc, tree.as_ref()).contains(target_namespace) {
        return true;
    }
    tree.descendants_of_kind(NodeKind::Class)
        .into_iter()
        .chain(tree.descendants_of_kind(NodeKind::Struct))
        .chain(tree.descendants_of_kind(NodeKind::Interface))
        .filter_map(|node| model.declared_symbol_at(doc.id, node))
        .any(|symbol| symbol.containing_namespace.as_deref() == Some(target_namespace))
}

/// A `using target_namespace;` insertion at the top of `doc`, ahead of its
/// first existing `using` (or the top of the file if it has none).
fn using_insertion(doc: &Arc<Document>, language: &dyn refac_semantic::Language, target_namespace: &str) -> DocumentChange {
    let tree = doc.syntax_tree(language);
    let insert_at = tree
        .descendants_of_kind(NodeKind::UsingDirective)
        .into_iter()
        .filter_map(|node| tree.node_span(node))
        .map(|span| span.start)
        .min()
        .unwrap_or(0);
    let span = Span::new(insert_at, insert_at);
    DocumentChange::Modify { document: doc.id, edits: vec![TextEdit::new(span, format!("using {target_namespace};\n"))] }
}

fn declaration_in(symbol: &Symbol, doc: DocumentId) -> Result<Span> {
    symbol
        .declarations
        .iter()
        .find(|d| d.document == doc)
        .map(|d| d.span)
        .ok_or_else(|| RefactoringError::new(ErrorCode::SymbolNotFound, format!("'{}' is not declared in this document", symbol.fully_qualified_name)))
}

fn resolve_moveable_type(base: &Solution, doc_id: DocumentId, type_name: &str) -> Result<(Arc<Document>, Symbol, Span)> {
    let doc = document(base, doc_id)?;
    let model = base.semantic_model();
    let symbol = refac_resolve::resolve_in_file(&doc, base.language().as_ref(), model.as_ref(), type_name, None, None)?;
    if !symbol.is_moveable_type() {
        return Err(RefactoringError::new(ErrorCode::SymbolNotMoveable, format!("'{type_name}' is not a moveable top-level declaration")));
    }
    if symbol.containing_type.is_some() {
        return Err(RefactoringError::new(ErrorCode::SymbolIsNested, format!("'{type_name}' is a nested type and cannot be moved on its own")));
    }
    let span = declaration_in(&symbol, doc_id)?;
    Ok((doc, symbol, span))
}

/// Relocate a top-level type declaration to a new source file, preserving
/// its namespace.
pub struct MoveTypeToFile {
    /// Document the type is currently declared in.
    pub document: DocumentId,
    /// Simple or qualified name of the type to move.
    pub type_name: String,
    /// Absolute path of the file to create.
    pub target_path: PathBuf,
}

impl RefactoringOperation for MoveTypeToFile {
    fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.type_name) {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, format!("'{}' is not a valid identifier", self.type_name)));
        }
        let target = self.target_path.to_string_lossy();
        if !is_valid_absolute_path(&target) {
            return Err(RefactoringError::new(ErrorCode::InvalidTargetPath, format!("{target} is not a valid absolute path")));
        }
        Ok(())
    }

    #[instrument(skip(self, base, _cancel), fields(type_name = %self.type_name, target = %self.target_path.display()))]
    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let (doc, symbol, span) = resolve_moveable_type(base, self.document, &self.type_name)?;

        let extension = base.language().file_extension();
        if !refac_ident::has_extension(&self.target_path.to_string_lossy(), &[extension]) {
            return Err(RefactoringError::new(
                ErrorCode::InvalidTargetPath,
                format!("{} must end in .{extension}", self.target_path.display()),
            ));
        }
        if doc.path == self.target_path {
            return Err(RefactoringError::new(ErrorCode::SameLocation, "target path is the same as the current file"));
        }
        if base.document_by_path(&self.target_path).is_some() {
            return Err(RefactoringError::new(
                ErrorCode::NameCollision,
                format!("{} already exists in the loaded solution", self.target_path.display()),
            ));
        }

        let removal_span = span_with_leading_blank_line(&doc.text, span);
        let decl_text = doc.text[span.start as usize..span.end as usize].to_string();
        let new_text = namespace_wrap(symbol.containing_namespace.as_deref(), &decl_text);

        info!(from = %doc.path.display(), to = %self.target_path.display(), "moved type to a new file");
        let mut edits = EditSet::new();
        edits.push(DocumentChange::Modify { document: self.document, edits: vec![TextEdit::new(removal_span, "")] });
        edits.push(DocumentChange::Create { path: self.target_path.clone(), text: new_text, based_on: Some(self.document) });
        Ok(edits)
    }
}

/// Move a top-level type declaration into a different namespace, in place.
///
/// Referencing documents in the same solution have a `using target_namespace`
/// directive added (spec §4.6.2 step 4) rather than failing outright; a
/// referencing project with no path to the containing project at all is a
/// separate, still-unresolved case (open question, decided in
/// `DESIGN.md`): that one fails with `CompilationError`.
pub struct MoveTypeToNamespace {
    /// Document the type is currently declared in.
    pub document: DocumentId,
    /// Simple or qualified name of the type to move.
    pub type_name: String,
    /// Destination namespace.
    pub target_namespace: String,
}

impl RefactoringOperation for MoveTypeToNamespace {
    fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.type_name) {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, format!("'{}' is not a valid identifier", self.type_name)));
        }
        if !is_valid_namespace(&self.target_namespace) {
            return Err(RefactoringError::new(ErrorCode::InvalidNamespace, format!("'{}' is not a valid namespace", self.target_namespace)));
        }
        Ok(())
    }

    #[instrument(skip(self, base, _cancel), fields(type_name = %self.type_name, target_namespace = %self.target_namespace))]
    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let (doc, symbol, span) = resolve_moveable_type(base, self.document, &self.type_name)?;

        if symbol.containing_namespace.as_deref() == Some(self.target_namespace.as_str()) {
            return Err(RefactoringError::new(ErrorCode::SameNamespace, format!("'{}' is already in '{}'", self.type_name, self.target_namespace)));
        }

        let model = base.semantic_model();
        let collides = base
            .documents()
            .any(|d| model.declarations_named(d.id, &self.type_name).iter().any(|s| s.containing_namespace.as_deref() == Some(self.target_namespace.as_str())));
        if collides {
            return Err(RefactoringError::new(
                ErrorCode::NameCollision,
                format!("'{}' already exists in '{}'", self.type_name, self.target_namespace),
            ));
        }

        if count_top_level_types(&doc, base.language().as_ref()) > 1 {
            return Err(RefactoringError::new(
                ErrorCode::SplitFileRequired,
                format!("{} declares more than one top-level type; split it before moving '{}'", doc.path.display(), self.type_name),
            )
            .with_suggestion("move the other declarations out of this file first, then retry"));
        }

        let refs = refac_refs::find_all(base, model.as_ref(), &symbol.key);
        let external_docs: Vec<DocumentId> = refs.by_document.keys().copied().filter(|d| *d != self.document).collect();

        let containing_project = base.project_of(self.document);
        let mut unreachable_paths = Vec::new();
        let mut using_edits = Vec::new();
        for external_id in &external_docs {
            let Some(external_doc) = base.document(*external_id) else { continue };
            let reachable = match (containing_project, base.project_of(*external_id)) {
                (Some(containing), Some(referencing)) => {
                    referencing.path == containing.path || referencing.project_references.contains(&containing.path)
                }
                _ => true,
            };
            if !reachable {
                unreachable_paths.push(external_doc.path.display().to_string());
                continue;
            }
            if namespace_already_reachable(external_doc, base.language().as_ref(), model.as_ref(), &self.target_namespace) {
                continue;
            }
            debug!(document = %external_doc.path.display(), "adding using for moved namespace");
            using_edits.push(using_insertion(external_doc, base.language().as_ref(), &self.target_namespace));
        }
        if !unreachable_paths.is_empty() {
            return Err(RefactoringError::new(
                ErrorCode::CompilationError,
                format!("moving '{}' would leave {} referencing file(s) without a project reference to the new namespace", self.type_name, unreachable_paths.len()),
            )
            .with_detail("affectedFiles", unreachable_paths.join(";"))
            .with_suggestion("add a project reference to the containing project and retry"));
        }

        let removal_span = span_with_leading_blank_line(&doc.text, span);
        let decl_text = doc.text[span.start as usize..span.end as usize].to_string();
        let wrapped = format!(
            "\nnamespace {}\n{{\n{}\n}}\n",
            self.target_namespace,
            indent(decl_text.trim_end(), "    ")
        );

        let eof = Span::new(doc.text.len() as u32, doc.text.len() as u32);
        let mut edits = vec![TextEdit::new(removal_span, "")];
        edits.push(TextEdit::new(eof, wrapped));

        info!(type_name = %self.type_name, target_namespace = %self.target_namespace, using_edits = using_edits.len(), "moved type to namespace");
        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify { document: self.document, edits });
        for change in using_edits {
            edit_set.push(change);
        }
        Ok(edit_set)
    }
}
