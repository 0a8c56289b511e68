//! Rename-Symbol (spec §4.6.3).

use std::collections::BTreeMap;
use std::path::PathBuf;

use refac_error::{ErrorCode, RefactoringError, Result};
use refac_ident::is_valid_identifier;
use refac_operation::{CancellationToken, RefactoringOperation};
use refac_semantic::{DocumentId, NodeKind, SemanticModel, Symbol, SymbolKey};
use refac_workspace::{apply_text_edits, DocumentChange, EditSet, Solution, TextEdit};
use tracing::{debug, info, instrument};

use crate::support::document;

/// Reserved words no C#-like identifier may use, independent of what any
/// particular `Language` collaborator happens to recognize.
const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class", "const", "continue", "decimal",
    "default", "delegate", "do", "double", "else", "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock", "long", "namespace", "new", "null",
    "object", "operator", "out", "override", "params", "private", "protected", "public", "readonly", "ref", "return", "sbyte",
    "sealed", "short", "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true", "try", "typeof",
    "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

/// Rename a declared symbol and every reference to it within the loaded
/// solution.
pub struct RenameSymbol {
    /// Document the symbol's declaration (or a use of it) appears in.
    pub document: DocumentId,
    /// Current name, optionally qualified.
    pub old_name: String,
    /// Requested new name (unqualified).
    pub new_name: String,
    /// 1-based line, paired with `column`, to disambiguate multiple
    /// declarations named `old_name`.
    pub line: Option<u32>,
    /// 1-based column, paired with `line`.
    pub column: Option<u32>,
    /// Rename every overload of the symbol, not just the resolved one.
    pub rename_overloads: bool,
    /// Rename interface/override implementations reachable from the
    /// symbol's override chain.
    pub rename_implementations: bool,
    /// If the symbol is a type whose file stem matches `old_name`, also
    /// rename the file (spec §4.6.3 step 5).
    pub rename_file: bool,
}

/// Walk `seed`'s override chain to a fixed point: every symbol it overrides
/// (transitively) and, if `include_implementations`, every symbol that
/// overrides or implements it (transitively).
fn override_chain(model: &dyn refac_semantic::SemanticModel, seed: &Symbol, include_implementations: bool) -> Vec<Symbol> {
    let mut seen: BTreeMap<SymbolKey, Symbol> = BTreeMap::new();
    seen.insert(seed.key.clone(), seed.clone());
    let mut frontier = vec![seed.clone()];
    while let Some(current) = frontier.pop() {
        let mut next: Vec<Symbol> = model.overridden_symbols(&current.key);
        if include_implementations {
            next.extend(model.overriding_symbols(&current.key));
        }
        for candidate in next {
            if !seen.contains_key(&candidate.key) {
                seen.insert(candidate.key.clone(), candidate.clone());
                frontier.push(candidate);
            }
        }
    }
    seen.into_values().collect()
}

/// Every other symbol in the solution sharing `seed`'s simple name and
/// enclosing scope (overload set), excluding `seed` itself.
fn overload_siblings(base: &Solution, model: &dyn refac_semantic::SemanticModel, seed: &Symbol) -> Vec<Symbol> {
    base.documents()
        .flat_map(|doc| model.declarations_named(doc.id, &seed.simple_name))
        .filter(|candidate| {
            candidate.key != seed.key
                && candidate.containing_type == seed.containing_type
                && candidate.containing_namespace == seed.containing_namespace
        })
        .collect()
}

/// Destination path for renaming `path`'s file stem to `new_stem`, keeping
/// its directory and extension.
fn sibling_path(path: &std::path::Path, new_stem: &str) -> PathBuf {
    let mut name = new_stem.to_string();
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}

impl RefactoringOperation for RenameSymbol {
    fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.old_name) {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, format!("'{}' is not a valid identifier", self.old_name)));
        }
        if !is_valid_identifier(&self.new_name) || self.new_name.contains('.') {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, format!("'{}' is not a valid simple identifier", self.new_name)));
        }
        if RESERVED_WORDS.contains(&self.new_name.as_str()) {
            return Err(RefactoringError::new(ErrorCode::ReservedKeyword, format!("'{}' is a reserved word", self.new_name)));
        }
        Ok(())
    }

    #[instrument(skip(self, base, _cancel), fields(old = %self.old_name, new = %self.new_name))]
    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let doc = document(base, self.document)?;
        let model = base.semantic_model();
        let symbol = refac_resolve::resolve_in_file(&doc, base.language().as_ref(), model.as_ref(), &self.old_name, self.line, self.column)?;

        if symbol.is_external {
            return Err(RefactoringError::new(ErrorCode::CannotRenameExternal, format!("'{}' is declared outside the loaded solution", self.old_name)));
        }
        if symbol.is_synthesized {
            return Err(RefactoringError::new(ErrorCode::CannotRenameSynthesized, format!("'{}' is compiler-synthesized", self.old_name)));
        }
        match symbol.kind {
            NodeKind::Constructor => {
                return Err(RefactoringError::new(
                    ErrorCode::CannotRenameConstructorDirectly,
                    "rename the containing type to rename its constructors",
                ));
            }
            NodeKind::Destructor => return Err(RefactoringError::new(ErrorCode::CannotRenameDestructor, "destructors cannot be renamed")),
            NodeKind::Operator => return Err(RefactoringError::new(ErrorCode::CannotRenameOperator, "operator overloads cannot be renamed")),
            NodeKind::Indexer => return Err(RefactoringError::new(ErrorCode::CannotRenameIndexer, "indexers cannot be renamed")),
            _ => {}
        }

        if self.new_name == self.old_name {
            return Err(RefactoringError::new(ErrorCode::SameLocation, format!("'{}' is already named '{}'", self.old_name, self.new_name)));
        }

        let same_scope = model.declarations_named(self.document, &self.new_name).into_iter().any(|candidate| {
            candidate.containing_type == symbol.containing_type && candidate.containing_namespace == symbol.containing_namespace
        });
        if same_scope {
            return Err(RefactoringError::new(
                ErrorCode::NameConflictScope,
                format!("'{}' already declares a member named '{}'", symbol.containing_type.as_deref().unwrap_or("this scope"), self.new_name),
            ));
        }

        let mut targets = override_chain(model.as_ref(), &symbol, self.rename_implementations);
        if self.rename_overloads {
            targets.extend(overload_siblings(base, model.as_ref(), &symbol));
        }
        debug!(targets = targets.len(), "resolved rename target set");

        let mut edits_by_document: BTreeMap<DocumentId, Vec<TextEdit>> = BTreeMap::new();
        let mut total = 0usize;
        for target in &targets {
            let refs = refac_refs::find_all(base, model.as_ref(), &target.key);
            total += refs.total;
            for (document_id, sites) in refs.by_document {
                let entry = edits_by_document.entry(document_id).or_default();
                entry.extend(sites.into_iter().map(|site| TextEdit::new(site.span, self.new_name.clone())));
            }
        }
        if total == 0 {
            return Err(RefactoringError::new(ErrorCode::SymbolNotFound, format!("no occurrences of '{}' were found to rename", self.old_name)));
        }

        let rename_this_file = self.rename_file
            && symbol.is_moveable_type()
            && doc.path.file_stem().is_some_and(|stem| stem == self.old_name.as_str());

        let mut edit_set = EditSet::new();
        for (document_id, edits) in edits_by_document {
            if rename_this_file && document_id == self.document {
                let new_text = apply_text_edits(&doc.text, &edits)?;
                let new_path = sibling_path(&doc.path, &self.new_name);
                info!(from = %doc.path.display(), to = %new_path.display(), "renaming file alongside its declaring type");
                edit_set.push(DocumentChange::Delete { document: document_id });
                edit_set.push(DocumentChange::Create { path: new_path, text: new_text, based_on: Some(document_id) });
            } else {
                edit_set.push(DocumentChange::Modify { document: document_id, edits });
            }
        }
        Ok(edit_set)
    }
}
