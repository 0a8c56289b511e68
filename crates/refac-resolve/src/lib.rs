//! The Symbol Resolver (spec §4.2, component C4).

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

use refac_error::{ErrorCode, RefactoringError, Result};
use refac_ident::split_qualified_name;
use refac_semantic::{Language, SemanticModel, Symbol, SyntaxTree};
use refac_workspace::Document;
use tracing::debug;

/// Resolve `name` (optionally qualified, optionally positioned) within
/// `document`.
///
/// # Errors
///
/// - `InvalidLineNumber`/`InvalidColumnNumber` if `line`/`column` is given
///   but out of range, or if exactly one of the pair is given.
/// - `SymbolNotFound` if no declaration matches.
/// - `Ambiguous` if more than one declaration matches an unpositioned name,
///   with candidate line numbers in `details.candidateLines`.
pub fn resolve_in_file(
    document: &Document,
    language: &dyn Language,
    model: &dyn SemanticModel,
    name: &str,
    line: Option<u32>,
    column: Option<u32>,
) -> Result<Symbol> {
    let (namespace_part, simple) = split_qualified_name(name);

    match (line, column) {
        (Some(line), Some(column)) => resolve_at_position(document, language, model, name, simple, namespace_part, line, column),
        (None, None) => resolve_by_name(document, model, name, simple, namespace_part),
        (Some(_), None) => Err(RefactoringError::new(ErrorCode::InvalidColumnNumber, "column is required when line is given")),
        (None, Some(_)) => Err(RefactoringError::new(ErrorCode::InvalidLineNumber, "line is required when column is given")),
    }
}

fn resolve_at_position(
    document: &Document,
    language: &dyn Language,
    model: &dyn SemanticModel,
    name: &str,
    simple: &str,
    namespace_part: Option<&str>,
    line: u32,
    column: u32,
) -> Result<Symbol> {
    let offset = document.offset_for_line_column(line, column)?;
    let tree = document.syntax_tree(language);

    let mut current = tree.node_at_offset(offset);
    while let Some(node) = current {
        if let Some(symbol) = model.declared_symbol_at(document.id, node) {
            if symbol.simple_name == simple && matches_namespace(&symbol, namespace_part, name) {
                debug!(symbol = %symbol.fully_qualified_name, "resolved by position");
                return Ok(symbol);
            }
        }
        current = tree.parent(node);
    }

    Err(RefactoringError::new(
        ErrorCode::SymbolNotFound,
        format!("no declaration named '{name}' found at {}:{line}:{column}", document.path.display()),
    )
    .with_detail("path", document.path.display().to_string()))
}

fn resolve_by_name(document: &Document, model: &dyn SemanticModel, name: &str, simple: &str, namespace_part: Option<&str>) -> Result<Symbol> {
    let mut candidates: Vec<Symbol> =
        model.declarations_named(document.id, simple).into_iter().filter(|s| matches_namespace(s, namespace_part, name)).collect();

    match candidates.len() {
        0 => Err(RefactoringError::new(ErrorCode::SymbolNotFound, format!("no declaration named '{name}' found in {}", document.path.display()))
            .with_detail("path", document.path.display().to_string())
            .with_suggestion("pass a line/column to disambiguate")),
        1 => candidates.pop().ok_or_else(|| RefactoringError::new(ErrorCode::SymbolNotFound, format!("no declaration named '{name}' found"))),
        _ => {
            let line_starts = document.line_starts();
            let mut lines: Vec<u32> = candidates
                .iter()
                .flat_map(|s| s.declarations.iter())
                .map(|decl| line_starts.partition_point(|&start| start <= decl.span.start) as u32)
                .collect();
            lines.sort_unstable();
            lines.dedup();
            let candidate_lines: Vec<String> = lines.into_iter().map(|l| l.to_string()).collect();
            Err(RefactoringError::new(ErrorCode::Ambiguous, format!("'{name}' is ambiguous in {}", document.path.display()))
                .with_detail("path", document.path.display().to_string())
                .with_detail("candidateLines", candidate_lines.join(","))
                .with_suggestion("pass a line/column to disambiguate"))
        }
    }
}

/// `true` if `symbol` is a plausible match for `name`: an unqualified query
/// accepts anything with the right simple name, a qualified query requires
/// the symbol's fully qualified name to end in the queried suffix (spec
/// §4.2 step 4).
fn matches_namespace(symbol: &Symbol, namespace_part: Option<&str>, name: &str) -> bool {
    match namespace_part {
        None => true,
        Some(_) => symbol.fully_qualified_name.ends_with(name),
    }
}
