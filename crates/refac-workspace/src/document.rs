//! A single immutable document within a `Solution` snapshot.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use refac_error::{ErrorCode, RefactoringError, Result};
use refac_semantic::{DocumentId, Language, SyntaxTree};

/// One source file, lazily parsed on first access.
///
/// `tree` is filled in by `syntax_tree` the first time an operation needs
/// it; the spec's Document is described as carrying a "lazily computed"
/// syntax tree, and re-parsing on every access would make the resolver and
/// reference tracker quadratic in passes over the same document.
pub struct Document {
    /// Stable id within the owning `Solution`. Carried forward unchanged
    /// across a `Modify`; a fresh id is only minted for a `Create`.
    pub id: DocumentId,
    /// Absolute filesystem path.
    pub path: PathBuf,
    /// Full source text.
    pub text: Arc<str>,
    tree: OnceLock<Arc<dyn SyntaxTree>>,
}

impl Document {
    /// Construct a document with no syntax tree computed yet.
    pub fn new(id: DocumentId, path: PathBuf, text: impl Into<Arc<str>>) -> Self {
        Self { id, path, text: text.into(), tree: OnceLock::new() }
    }

    /// Return this document's parsed syntax tree, parsing it on first call.
    pub fn syntax_tree(&self, language: &dyn Language) -> Arc<dyn SyntaxTree> {
        self.tree.get_or_init(|| language.parse(&self.text)).clone()
    }

    /// Byte offsets of the start of each line (0-indexed), used to convert
    /// 1-based line/column locators into byte offsets.
    pub fn line_starts(&self) -> Vec<u32> {
        let mut starts = vec![0u32];
        for (idx, byte) in self.text.bytes().enumerate() {
            if byte == b'\n' {
                starts.push((idx + 1) as u32);
            }
        }
        starts
    }

    /// Convert a 1-based, inclusive `(line, column)` locator into an
    /// absolute byte offset into `text`.
    ///
    /// # Errors
    ///
    /// `InvalidLineNumber` if `line` is out of range; `InvalidColumnNumber`
    /// if `column` is out of range for that line.
    pub fn offset_for_line_column(&self, line: u32, column: u32) -> Result<u32> {
        if line == 0 {
            return Err(RefactoringError::new(ErrorCode::InvalidLineNumber, "line numbers are 1-based"));
        }
        let starts = self.line_starts();
        let line_idx = (line - 1) as usize;
        let Some(&line_start) = starts.get(line_idx) else {
            return Err(RefactoringError::new(
                ErrorCode::InvalidLineNumber,
                format!("{} has {} lines, requested line {line}", self.path.display(), starts.len()),
            )
            .with_detail("path", self.path.display().to_string())
            .with_detail("lineCount", starts.len().to_string()));
        };
        let line_end = starts.get(line_idx + 1).copied().unwrap_or(self.text.len() as u32);
        if column == 0 {
            return Err(RefactoringError::new(ErrorCode::InvalidColumnNumber, "column numbers are 1-based"));
        }
        let offset = line_start + (column - 1);
        if offset > line_end {
            return Err(RefactoringError::new(
                ErrorCode::InvalidColumnNumber,
                format!("line {line} of {} does not have column {column}", self.path.display()),
            )
            .with_detail("path", self.path.display().to_string()));
        }
        Ok(offset)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").field("id", &self.id).field("path", &self.path).finish_non_exhaustive()
    }
}
