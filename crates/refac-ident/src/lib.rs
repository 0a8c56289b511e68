//! Path and identifier validation for the refactoring engine.
//!
//! Every operation input arrives as a coarse locator: an absolute source
//! path, a simple or qualified identifier, and sometimes a namespace name.
//! This crate is the single place that decides whether those strings are
//! well-formed before anything touches the workspace.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

use std::path::Path;

use url::Url;

/// Returns `true` if `path` is absolute and has a non-empty file name.
///
/// The engine never accepts relative locators: every `sourceFile`/
/// `targetFile` input is validated with this before a `Document` lookup is
/// attempted, matching the `InvalidSourcePath`/`InvalidTargetPath` error
/// codes in the 1000-1099 range.
pub fn is_valid_absolute_path(path: &str) -> bool {
    let p = Path::new(path);
    p.is_absolute() && p.file_name().is_some()
}

/// Returns `true` if `path` ends in one of the given extensions (dotless,
/// case-sensitive), e.g. `has_extension("Foo.cs", &["cs"])`.
pub fn has_extension(path: &str, extensions: &[&str]) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|ext| *ext == e))
        .unwrap_or(false)
}

/// Validates a simple or qualified target-language identifier.
///
/// A valid identifier starts with a letter or underscore and continues with
/// letters, digits, or underscores; a qualified name is `.`-separated
/// identifiers (`Outer.Inner`). Empty segments are rejected.
pub fn is_valid_identifier(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    name.split('.').all(is_valid_identifier_segment)
}

fn is_valid_identifier_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Validates a namespace name of the form `identifier(.identifier)*`.
///
/// Used by `move_type_to_namespace` (spec §4.6.2) to reject malformed
/// `targetNamespace` inputs before any symbol resolution is attempted.
pub fn is_valid_namespace(name: &str) -> bool {
    !name.is_empty() && is_valid_identifier(name)
}

/// Splits a qualified name into its namespace and simple-name parts.
///
/// `split_qualified_name("App.Models.UserDto")` returns
/// `(Some("App.Models"), "UserDto")`; an unqualified name returns `(None, name)`.
pub fn split_qualified_name(name: &str) -> (Option<&str>, &str) {
    match name.rfind('.') {
        Some(idx) => (Some(&name[..idx]), &name[idx + 1..]),
        None => (None, name),
    }
}

/// Convert a `file://` URI to a filesystem path.
///
/// Returns `None` if the URI is not a valid `file://` URI. Exists for the
/// tool-call transport boundary (spec §6); the transport itself is out of
/// scope, but its `sourceFile`/`targetFile` fields may arrive as URIs.
pub fn uri_to_fs_path(uri: &str) -> Option<std::path::PathBuf> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

/// Convert a filesystem path to a `file://` URI.
///
/// # Errors
///
/// Returns an error string if the path cannot be made absolute or the
/// resulting URL cannot be constructed.
pub fn fs_path_to_uri<P: AsRef<Path>>(path: P) -> Result<String, String> {
    let path = path.as_ref();
    let abs_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| format!("failed to get current directory: {e}"))?
            .join(path)
    };
    Url::from_file_path(&abs_path)
        .map(|url| url.to_string())
        .map_err(|_| format!("failed to convert path to URI: {}", abs_path.display()))
}
