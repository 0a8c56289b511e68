//! Helpers shared by every operation in this crate: resolving a `Document`
//! out of a base snapshot, picking a symbol's primary declaration span, and
//! the small text-shaping routines (`indent`, `namespace_wrap`) the
//! move/extract/generate operations all need.

use std::sync::Arc;

use refac_error::{ErrorCode, RefactoringError, Result};
use refac_semantic::{DocumentId, Language, NodeKind, Span, Symbol, SyntaxTree};
use refac_workspace::{Document, Solution};

/// Declaration kinds that count as a "type" for the purposes of the
/// one-type-per-file rule move-to-namespace enforces (spec §4.6.2 step 3).
const TYPE_KINDS: &[NodeKind] =
    &[NodeKind::Class, NodeKind::Struct, NodeKind::Interface, NodeKind::Enum, NodeKind::Record, NodeKind::Delegate];

/// Number of top-level type declarations in `doc` (nested types, e.g. a
/// class declared inside another class, do not count).
pub(crate) fn count_top_level_types(doc: &Document, language: &dyn Language) -> usize {
    let tree = doc.syntax_tree(language);
    TYPE_KINDS
        .iter()
        .flat_map(|&kind| tree.descendants_of_kind(kind))
        .filter(|&node| !TYPE_KINDS.iter().any(|&k| tree.enclosing(node, k).is_some()))
        .count()
}

/// Look up `id` in `base`, or `SourceNotInWorkspace` if it is not part of
/// this snapshot.
pub(crate) fn document(base: &Solution, id: DocumentId) -> Result<Arc<Document>> {
    base.document(id).cloned().ok_or_else(|| {
        RefactoringError::new(ErrorCode::SourceNotInWorkspace, format!("document {id:?} is not part of the loaded solution"))
    })
}

/// A symbol's first declaration span, or `SymbolNotFound` if it has none
/// (true only of external/synthesized symbols, which operations reject
/// earlier in `validate`).
pub(crate) fn first_declaration_span(symbol: &Symbol) -> Result<Span> {
    symbol
        .declarations
        .first()
        .map(|d| d.span)
        .ok_or_else(|| RefactoringError::new(ErrorCode::SymbolNotFound, format!("'{}' has no declaration site", symbol.fully_qualified_name)))
}

/// Indent every non-empty line of `text` by `pad`.
pub(crate) fn indent(text: &str, pad: &str) -> String {
    text.lines().map(|line| if line.is_empty() { String::new() } else { format!("{pad}{line}") }).collect::<Vec<_>>().join("\n")
}

/// Wrap `body` in a `namespace { ... }` block, or return it unwrapped if
/// `namespace` is `None`.
pub(crate) fn namespace_wrap(namespace: Option<&str>, body: &str) -> String {
    match namespace {
        Some(ns) => format!("namespace {ns}\n{{\n{}\n}}\n", indent(body.trim_end(), "    ")),
        None => format!("{}\n", body.trim_end()),
    }
}

/// Grow `text`'s span to cover one leading blank line, so removing a
/// declaration does not leave behind a run of blank lines.
pub(crate) fn span_with_leading_blank_line(text: &str, span: Span) -> Span {
    let start = span.start as usize;
    let before = &text[..start.min(text.len())];
    let trimmed = before.trim_end_matches(|c: char| c == ' ' || c == '\t');
    if let Some(stripped) = trimmed.strip_suffix('\n') {
        let new_start = stripped.len() as u32;
        return Span::new(new_start, span.end);
    }
    span
}

/// Reduce a declaration's full span text down to a bare signature, dropping
/// its body/trailing `;` and access/modifier keywords.
pub(crate) fn header_signature(decl_text: &str) -> String {
    let header = decl_text.split(['{', ';']).next().unwrap_or(decl_text).trim();
    let cleaned: Vec<&str> = header
        .split_whitespace()
        .filter(|w| !matches!(*w, "public" | "private" | "protected" | "internal" | "virtual" | "override" | "abstract" | "static" | "sealed"))
        .collect();
    format!("{};", cleaned.join(" "))
}

/// Where and what to splice into a type's base-list clause (`: Base, IFace`),
/// given its full declaration text and whether it already has one.
pub(crate) fn insert_base_list_entry(decl_text: &str, has_existing_base: bool, entry: &str) -> Option<(usize, String)> {
    let brace = decl_text.find('{')?;
    let header = &decl_text[..brace];
    let insert_offset = header.trim_end().len();
    let text = if has_existing_base { format!(", {entry}") } else { format!(" : {entry}") };
    Some((insert_offset, text))
}

/// Byte offset of the start of the line containing `offset`.
pub(crate) fn line_start(text: &str, offset: u32) -> u32 {
    text[..offset as usize].rfind('\n').map(|idx| idx as u32 + 1).unwrap_or(0)
}

/// Leading whitespace of the line containing `offset`.
pub(crate) fn leading_whitespace(text: &str, offset: u32) -> String {
    let start = line_start(text, offset) as usize;
    text[start..offset as usize].chars().take_while(|c| c.is_whitespace()).collect()
}

/// The span of the whole line (including its trailing newline) containing `offset`.
pub(crate) fn full_line_span(text: &str, offset: u32) -> Span {
    let start = line_start(text, offset);
    let rest = &text[start as usize..];
    let end = rest.find('\n').map(|i| start as usize + i + 1).unwrap_or(text.len());
    Span::new(start, end as u32)
}

/// Byte offset, relative to `decl_text`, of the end of the last non-blank
/// content before its closing brace — where a new member should be inserted
/// to land at the end of a type's body.
pub(crate) fn insert_before_closing_brace(decl_text: &str) -> Option<usize> {
    let trimmed = decl_text.trim_end();
    let close = trimmed.rfind('}')?;
    Some(trimmed[..close].trim_end().len())
}

/// Split a field/property declaration's cleaned signature (as produced by
/// [`header_signature`]) into its type and name, e.g. `"string Name;"` ->
/// `("string", "Name")`.
pub(crate) fn split_type_and_name(signature: &str) -> Option<(String, String)> {
    let trimmed = signature.trim_end_matches(';').trim();
    let mut parts: Vec<&str> = trimmed.split_whitespace().collect();
    let name = parts.pop()?;
    if parts.is_empty() {
        return None;
    }
    Some((parts.join(" "), name.to_string()))
}

/// `true` if `type_name` looks like a value type (or already-nullable
/// reference) whose parameters do not need a null guard. Best-effort: this
/// crate has no access to the collaborator's actual nullability annotations.
pub(crate) fn is_non_nullable_reference_type(type_name: &str) -> bool {
    const VALUE_TYPES: &[&str] = &[
        "bool", "byte", "sbyte", "short", "ushort", "int", "uint", "long", "ulong", "float", "double", "decimal", "char", "void",
        "DateTime", "TimeSpan", "Guid",
    ];
    let bare = type_name.trim_end_matches('?').trim();
    !type_name.trim_end().ends_with('?') && !VALUE_TYPES.contains(&bare) && bare.chars().next().is_some_and(char::is_uppercase)
}

/// Parameter names declared between the parens of a header signature like
/// `"void Process(int x, string? y)"`. Best-effort top-level comma split;
/// good enough for the shapes this mock-backed engine's tests exercise.
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
