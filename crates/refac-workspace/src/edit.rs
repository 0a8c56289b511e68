//! The `EditSet`: ordered document-level changes an operation produces and
//! the Commit Layer (`refac-commit`) or preview path consumes.

use std::path::PathBuf;

use refac_error::{ErrorCode, RefactoringError, Result};
use refac_semantic::{DocumentId, Span};

/// Discriminates the kind of change a `DocumentChange` makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// A new document is created.
    Create,
    /// An existing document's text changes.
    Modify,
    /// An existing document is removed.
    Delete,
}

/// A single non-overlapping text replacement within one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Byte span replaced, relative to the document's *original* text.
    pub span: Span,
    /// Replacement text (may be empty, for a deletion).
    pub new_text: String,
}

impl TextEdit {
    /// Construct a text edit.
    pub fn new(span: Span, new_text: impl Into<String>) -> Self {
        Self { span, new_text: new_text.into() }
    }
}

/// One document-level change within an `EditSet`.
#[derive(Debug, Clone)]
pub enum DocumentChange {
    /// Create a new document at `path`.
    Create {
        /// Destination path.
        path: PathBuf,
        /// Full content of the new document.
        text: String,
        /// Existing document whose project the new one should join. `None`
        /// falls back to the first project in the solution (see
        /// `Workspace::compute_new_solution`).
        based_on: Option<DocumentId>,
    },
    /// Modify an existing document by splicing in non-overlapping edits.
    Modify {
        /// The document to modify.
        document: DocumentId,
        /// Edits, in any order (applied right-to-left internally so earlier
        /// offsets stay valid).
        edits: Vec<TextEdit>,
    },
    /// Delete an existing document.
    Delete {
        /// The document to delete.
        document: DocumentId,
    },
}

impl DocumentChange {
    /// This change's `ChangeKind`.
    pub fn kind(&self) -> ChangeKind {
        match self {
            DocumentChange::Create { .. } => ChangeKind::Create,
            DocumentChange::Modify { .. } => ChangeKind::Modify,
            DocumentChange::Delete { .. } => ChangeKind::Delete,
        }
    }
}

/// An ordered list of document changes produced by one operation.
#[derive(Debug, Clone, Default)]
pub struct EditSet {
    /// The changes, in the order they were recorded.
    pub changes: Vec<DocumentChange>,
}

impl EditSet {
    /// An empty edit set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a change.
    pub fn push(&mut self, change: DocumentChange) {
        self.changes.push(change);
    }

    /// `true` if this edit set has no changes (a no-op computation).
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Splice non-overlapping `edits` into `text`, applying them right-to-left
/// (highest span start first) so earlier offsets are never invalidated by a
/// later splice — the ordering guarantee in spec §5.
///
/// # Errors
///
/// `InvalidSelection` if two edits overlap, or if any span runs past the end
/// of `text`.
pub fn apply_text_edits(text: &str, edits: &[TextEdit]) -> Result<String> {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by(|a, b| b.span.start.cmp(&a.span.start).then(b.span.end.cmp(&a.span.end)));

    let mut result = text.to_string();
    let mut last_start: Option<u32> = None;
    for edit in sorted {
        if edit.span.end as usize > result.len().max(text.len()) || edit.span.start > edit.span.end {
            return Err(RefactoringError::new(ErrorCode::InvalidSelection, "text edit span out of range"));
        }
        if let Some(last) = last_start {
            if edit.span.end > last {
                return Err(RefactoringError::new(ErrorCode::InvalidSelection, "text edits overlap"));
            }
        }
        let start = edit.span.start as usize;
        let end = edit.span.end as usize;
        if end > text.len() || start > end {
            return Err(RefactoringError::new(ErrorCode::InvalidSelection, "text edit span out of range"));
        }
        result.replace_range(start..end, &edit.new_text);
        last_start = Some(edit.span.start);
    }
    Ok(result)
}
