//! Helpers shared by every query in this crate: resolving a `Document` out
//! of a snapshot and turning a declaration span's raw text into a bare
//! signature (type, parameter list) without re-parsing it.

use std::sync::Arc;

use refac_error::{ErrorCode, RefactoringError, Result};
use refac_semantic::DocumentId;
use refac_workspace::{Document, Solution};

/// Look up `id` in `base`, or `SourceNotInWorkspace` if it is not part of
/// this snapshot.
pub(crate) fn document(base: &Solution, id: DocumentId) -> Result<Arc<Document>> {
    base.document(id).cloned().ok_or_else(|| {
        RefactoringError::new(ErrorCode::SourceNotInWorkspace, format!("document {id:?} is not part of the loaded solution"))
    })
}

/// Reduce a declaration's full span text down to a bare signature, dropping
/// its body/trailing `;` and access/modifier keywords. Mirrors
/// `refac_refactor`'s private helper of the same name; duplicated here
/// because query results never touch an `EditSet` and have no business
/// depending on the operations crate.
pub(crate) fn header_signature(decl_text: &str) -> String {
    let header = decl_text.split(['{', ';']).next().unwrap_or(decl_text).trim();
    let cleaned: Vec<&str> = header
        .split_whitespace()
        .filter(|w| !matches!(*w, "public" | "private" | "protected" | "internal" | "virtual" | "override" | "abstract" | "static" | "sealed"))
        .collect();
    cleaned.join(" ")
}

/// Parameter `(type, name)` pairs declared between the parens of a header
/// signature like `"void Process(int x, string? y)"`. Best-effort top-level
/// comma split, sufficient for the declarations this mock-backed engine
/// exercises.
pub(crate) fn parameter_list(header: &str) -> Vec<(String, String)> {
    let Some(open) = header.find('(') else { return Vec::new() };
    let Some(close) = header.rfind(')') else { return Vec::new() };
    if close <= open {
        return Vec::new();
    }
    let inner = &header[open + 1..close];
    let mut params = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    let bytes = inner.as_bytes();
    let mut push = |chunk: &str, params: &mut Vec<(String, String)>| {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            return;
        }
        let mut words: Vec<&str> = chunk.split_whitespace().collect();
        if let Some(name) = words.pop() {
            let ty = words.join(" ");
            if !ty.is_empty() {
                params.push((ty, name.trim_start_matches('@').to_string()));
            }
        }
    };
    for (idx, &b) in bytes.iter().enumerate() {
        match b {
            b'<' | b'[' | b'(' => depth += 1,
            b'>' | b']' | b')' => depth -= 1,
            b',' if depth == 0 => {
                push(&inner[start..idx], &mut params);
                start = idx + 1;
            }
            _ => {}
        }
    }
    push(&inner[start..], &mut params);
    params
}

/// Return type from a header signature, i.e. everything before the method
/// name and its parameter list. `None` for signatures with no parens
/// (fields/properties), whose "return type" is just their declared type.
pub(crate) fn return_type(header: &str) -> Option<String> {
    let open = header.find('(')?;
    let before = header[..open].trim();
    let mut words: Vec<&str> = before.split_whitespace().collect();
    words.pop()?;
    Some(words.join(" "))
}
