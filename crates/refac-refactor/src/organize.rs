//! Organize-Usings: Sort, Remove-Unused, and Add-Missing (spec §4.6.8).

use std::collections::BTreeSet;
use std::sync::Arc;

use refac_error::Result;
use refac_operation::{CancellationToken, RefactoringOperation};
use refac_semantic::{DocumentId, Language, NodeKind, SemanticModel, Span, SyntaxTree};
use refac_workspace::{Document, DocumentChange, EditSet, Solution, TextEdit};

use crate::support::document;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum UsingGroup {
    Regular,
    Static,
    Alias,
}

struct UsingLine {
    span: Span,
    text: String,
    group: UsingGroup,
    target: String,
}

/// Extension-method names whose presence is treated as evidence that some
/// LINQ-shaped namespace is in use, since this crate's mock collaborator
/// does not bind extension-method call sites to their declaring namespace.
const LINQ_EXTENSION_METHODS: &[&str] = &[
    "Where", "Select", "OrderBy", "OrderByDescending", "First", "FirstOrDefault", "Single", "SingleOrDefault", "Any", "All", "Sum",
    "Count", "GroupBy", "Aggregate", "ToList", "ToArray", "Skip", "Take", "Distinct", "Concat", "Reverse",
];

/// A small built-in table of common framework types, used by
/// [`AddMissingUsings`] when the solution itself does not declare a
/// matching type.
const WELL_KNOWN_TYPES: &[(&str, &str)] = &[
    ("List", "System.Collections.Generic"),
    ("Dictionary", "System.Collections.Generic"),
    ("IEnumerable", "System.Collections.Generic"),
    ("Console", "System"),
    ("Task", "System.Threading.Tasks"),
    ("StringBuilder", "System.Text"),
    ("Regex", "System.Text.RegularExpressions"),
    ("DateTime", "System"),
    ("Guid", "System"),
];

fn using_lines(doc: &Document, tree: &dyn refac_semantic::SyntaxTree) -> Vec<UsingLine> {
    tree.descendants_of_kind(NodeKind::UsingDirective)
        .into_iter()
        .filter_map(|node| {
            let span = tree.node_span(node)?;
            let name = tree.simple_name(node)?;
            let text = doc.text[span.start as usize..span.end as usize].to_string();
            let (group, target) = if let Some(rest) = name.strip_prefix("static ") {
                (UsingGroup::Static, rest.to_string())
            } else if let Some((alias, rest)) = name.split_once(" = ") {
                (UsingGroup::Alias, format!("{alias} = {rest}"))
            } else {
                (UsingGroup::Regular, name.to_string())
            };
            Some(UsingLine { span, text, group, target })
        })
        .collect()
}

fn sort_key(target: &str) -> (u8, &str) {
    let priority = if target.starts_with("System") { 0 } else { 1 };
    (priority, target)
}

fn rebuild_sorted(lines: &[UsingLine]) -> String {
    let mut by_group: Vec<&UsingLine> = lines.iter().collect();
    by_group.sort_by(|a, b| {
        (a.group.clone(), sort_key(&a.target).0, sort_key(&a.target).1).cmp(&(b.group.clone(), sort_key(&b.target).0, sort_key(&b.target).1))
    });
    by_group.iter().map(|l| l.text.trim_end().to_string()).collect::<Vec<_>>().join("\n") + "\n"
}

/// Rewrite all `using` directives in a document into `Sort`'s canonical
/// order: partition into regular/static/alias groups, each ordered by
/// (system-prefix-first, ordinal string compare).
fn sort_one(doc: &Arc<Document>, language: &dyn refac_semantic::Language) -> Option<DocumentChange> {
    let tree = doc.syntax_tree(language);
    let lines = using_lines(doc, tree.as_ref());
    if lines.len() < 2 {
        return None;
    }
    let span = Span::new(lines.iter().map(|l| l.span.start).min()?, lines.iter().map(|l| l.span.end).max()?);
    let current: Vec<String> = lines.iter().map(|l| l.text.trim_end().to_string()).collect();
    let rebuilt = rebuild_sorted(&lines);
    if rebuilt.trim_end() == current.join("\n") {
        return None;
    }
    Some(DocumentChange::Modify { document: doc.id, edits: vec![TextEdit::new(span, rebuilt)] })
}

fn is_used(target: &str, body_text: &str) -> bool {
    if body_text.contains(target) {
        return true;
    }
    let last_segment = target.rsplit('.').next().unwrap_or(target);
    let word_used = body_text.split(|c: char| !c.is_alphanumeric() && c != '_').any(|w| w == last_segment);
    if word_used {
        return true;
    }
    if last_segment == "Linq" && LINQ_EXTENSION_METHODS.iter().any(|m| body_text.contains(&format!(".{m}("))) {
        return true;
    }
    false
}

fn remove_unused_one(doc: &Arc<Document>, language: &dyn refac_semantic::Language) -> Option<DocumentChange> {
    let tree = doc.syntax_tree(language);
    let lines = using_lines(doc, tree.as_ref());
    if lines.is_empty() {
        return None;
    }
    let using_spans: BTreeSet<(u32, u32)> = lines.iter().map(|l| (l.span.start, l.span.end)).collect();
    let body: String = doc
        .text
        .char_indices()
        .filter(|(idx, _)| !using_spans.iter().any(|&(s, e)| (*idx as u32) >= s && (*idx as u32) < e))
        .map(|(_, c)| c)
        .collect();

    let kept: Vec<&UsingLine> = lines.iter().filter(|l| is_used(&l.target, &body)).collect();
    if kept.len() == lines.len() {
        return None;
    }

    let span = Span::new(lines.iter().map(|l| l.span.start).min()?, lines.iter().map(|l| l.span.end).max()?);
    let rebuilt = if kept.is_empty() {
        String::new()
    } else {
        let owned: Vec<UsingLine> =
            kept.iter().map(|l| UsingLine { span: l.span, text: l.text.clone(), group: l.group.clone(), target: l.target.clone() }).collect();
        rebuild_sorted(&owned)
    };
    Some(DocumentChange::Modify { document: doc.id, edits: vec![TextEdit::new(span, rebuilt)] })
}

fn identifiers(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|w| !w.is_empty() && w.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_'))
        .map(str::to_string)
        .collect()
}

fn add_missing_one(base: &Solution, doc: &Arc<Document>) -> Option<DocumentChange> {
    let tree = doc.syntax_tree(base.language().as_ref());
    let lines = using_lines(doc, tree.as_ref());
    let existing_targets: BTreeSet<String> = lines.iter().map(|l| l.target.clone()).collect();
    let model = base.semantic_model();

    let mut missing = BTreeSet::new();
    for word in identifiers(&doc.text) {
        if existing_targets.iter().any(|t| t.rsplit('.').next() == Some(word.as_str())) {
            continue;
        }
        if !model.declarations_named(doc.id, &word).is_empty() {
            continue;
        }
        let mut namespace_candidates: BTreeSet<String> = base
            .documents()
            .flat_map(|other| model.declarations_named(other.id, &word))
            .filter_map(|sym| sym.containing_namespace)
            .collect();
        if namespace_candidates.is_empty() {
            if let Some((_, ns)) = WELL_KNOWN_TYPES.iter().find(|(name, _)| *name == word) {
                namespace_candidates.insert((*ns).to_string());
            }
        }
        if namespace_candidates.is_empty() {
            continue;
        }
        let Some(chosen) = namespace_candidates.iter().min_by_key(|ns| (if ns.starts_with("System") { 0 } else { 1 }, ns.as_str())) else {
            continue;
        };
        if !existing_targets.contains(chosen) {
            missing.insert(chosen.clone());
        }
    }
    if missing.is_empty() {
        return None;
    }

    let span = if lines.is_empty() {
        Span::new(0, 0)
    } else {
        Span::new(lines.iter().map(|l| l.span.start).min().unwrap_or(0), lines.iter().map(|l| l.span.end).max().unwrap_or(0))
    };

    let mut all: Vec<UsingLine> = lines;
    for target in missing {
        all.push(UsingLine { span, text: format!("using {target};"), group: UsingGroup::Regular, target });
    }
    let rebuilt = rebuild_sorted(&all);
    Some(DocumentChange::Modify { document: doc.id, edits: vec![TextEdit::new(span, rebuilt)] })
}

fn target_documents(base: &Solution, document_id: Option<DocumentId>) -> Result<Vec<Arc<Document>>> {
    match document_id {
        Some(id) => Ok(vec![document(base, id)?]),
        None => Ok(base.documents().cloned().collect()),
    }
}

/// Sort every document's `using` directives into the canonical
/// regular/static/alias partition order.
pub struct SortUsings {
    /// `Some` for single-file mode; `None` to sort every document.
    pub document: Option<DocumentId>,
}

impl RefactoringOperation for SortUsings {
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let mut edit_set = EditSet::new();
        for doc in target_documents(base, self.document)? {
            if let Some(change) = sort_one(&doc, base.language().as_ref()) {
                edit_set.push(change);
            }
        }
        Ok(edit_set)
    }
}

/// Remove `using` directives whose namespace is never referenced, then
/// re-sort the remainder.
pub struct RemoveUnusedUsings {
    /// `Some` for single-file mode; `None` to scan every document.
    pub document: Option<DocumentId>,
}

impl RefactoringOperation for RemoveUnusedUsings {
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let mut edit_set = EditSet::new();
        for doc in target_documents(base, self.document)? {
            if let Some(change) = remove_unused_one(&doc, base.language().as_ref()) {
                edit_set.push(change);
            }
        }
        Ok(edit_set)
    }
}

/// Add `using` directives for simple names that resolve to exactly one
/// namespace elsewhere in the solution (or a well-known framework type),
/// then re-sort.
pub struct AddMissingUsings {
    /// `Some` for single-file mode; `None` to scan every document.
    pub document: Option<DocumentId>,
}

impl RefactoringOperation for AddMissingUsings {
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let mut edit_set = EditSet::new();
        for doc in target_documents(base, self.document)? {
            if let Some(change) = add_missing_one(base, &doc) {
                edit_set.push(change);
            }
        }
        Ok(edit_set)
    }
}
