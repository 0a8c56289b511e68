//! Tool-call boundary result shapes (spec §6): `{success: true, ...}` on a
//! commit or preview, `{success: false, error: {...}}` on failure. Every
//! type here carries a `serde::Serialize` impl; nothing upstream of this
//! crate (`refac-workspace`, `refac-commit`, `refac-operation`) depends on
//! `serde` of its own, matching how `perl-lsp-protocol::jsonrpc` is the one
//! place JSON shapes live in the teacher's tree.

use serde::Serialize;

use refac_commit::CommitStats;
use refac_error::RefactoringError;
use refac_semantic::Symbol;
use refac_workspace::{DocumentChange, EditSet, Solution};

/// Files touched by a committed operation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangesSummary {
    /// Paths whose content changed.
    pub files_modified: Vec<String>,
    /// Paths newly created.
    pub files_created: Vec<String>,
    /// Paths removed.
    pub files_deleted: Vec<String>,
}

impl From<&CommitStats> for ChangesSummary {
    fn from(stats: &CommitStats) -> Self {
        Self {
            files_modified: stats.files_modified.iter().map(|p| p.display().to_string()).collect(),
            files_created: stats.files_created.iter().map(|p| p.display().to_string()).collect(),
            files_deleted: stats.files_deleted.iter().map(|p| p.display().to_string()).collect(),
        }
    }
}

/// One document-level change in a preview response, with a human-readable
/// description and a before/after snippet (spec §3 Result: "an ordered
/// list of pending changes with human-readable description and before/after
/// snippets").
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingChange {
    /// `"create"`, `"modify"`, or `"delete"`.
    pub kind: &'static str,
    /// The affected path.
    pub path: String,
    /// A one-line human-readable description of the change.
    pub description: String,
    /// The document's content before this change (`None` for a `Create`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// The document's content after this change (`None` for a `Delete`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// Render an `EditSet` against the snapshot it was computed from into the
/// preview path's pending-change list, without touching disk or the
/// workspace snapshot pointer (spec §8 property 2).
pub fn render_pending_changes(base: &Solution, edit_set: &EditSet) -> Vec<PendingChange> {
    edit_set
        .changes
        .iter()
        .map(|change| match change {
            DocumentChange::Create { path, text, .. } => PendingChange {
                kind: "create",
                path: path.display().to_string(),
                description: format!("create {}", path.display()),
                before: None,
                after: Some(text.clone()),
            },
            DocumentChange::Modify { document, edits } => {
                let doc = base.document(*document);
                let before = doc.as_ref().map(|d| d.text.to_string());
                let after = doc.as_ref().and_then(|d| refac_workspace::apply_text_edits(&d.text, edits).ok());
                let path = doc.as_ref().map(|d| d.path.display().to_string()).unwrap_or_default();
                PendingChange { kind: "modify", description: format!("modify {path}"), path, before, after }
            }
            DocumentChange::Delete { document } => {
                let doc = base.document(*document);
                let before = doc.as_ref().map(|d| d.text.to_string());
                let path = doc.as_ref().map(|d| d.path.display().to_string()).unwrap_or_default();
                PendingChange { kind: "delete", description: format!("delete {path}"), path, before, after: None }
            }
        })
        .collect()
}

/// Symbol metadata carried on a successful refactoring response (spec §8
/// scenario 1: `symbol.kind="Class"`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolSummary {
    /// Unqualified name.
    pub name: String,
    /// Fully qualified name.
    pub fully_qualified_name: String,
    /// Structural kind, as its `Debug` label (`"Class"`, `"Method"`, ...).
    pub kind: String,
}

impl From<&Symbol> for SymbolSummary {
    fn from(symbol: &Symbol) -> Self {
        Self {
            name: symbol.simple_name.clone(),
            fully_qualified_name: symbol.fully_qualified_name.clone(),
            kind: format!("{:?}", symbol.kind),
        }
    }
}

/// The tool-call boundary's error payload (spec §6: `{code, message,
/// details, suggestions}`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    /// `SCREAMING_SNAKE_CASE` machine-readable code.
    pub code: String,
    /// Numeric code in its documented range.
    pub numeric_code: u32,
    /// One-line human-readable message.
    pub message: String,
    /// Structured detail payload.
    pub details: std::collections::BTreeMap<String, String>,
    /// Suggested next actions.
    pub suggestions: Vec<String>,
}

impl From<&RefactoringError> for ErrorPayload {
    fn from(err: &RefactoringError) -> Self {
        Self {
            code: err.code.as_str().to_string(),
            numeric_code: err.code.numeric(),
            message: err.message.clone(),
            details: err.details.clone(),
            suggestions: err.suggestions.clone(),
        }
    }
}

/// One call's full response: either branch of spec §6's `{success: true,
/// ...}` / `{success: false, error: {...}}` envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    /// `true` unless `error` is set.
    pub success: bool,
    /// Freshly generated per call (spec §3: "Refactoring Operation ...
    /// identity (freshly generated per call)").
    pub operation_id: String,
    /// Set on a successful commit; absent on preview or query calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<ChangesSummary>,
    /// Set on a successful preview call; absent otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_changes: Option<Vec<PendingChange>>,
    /// Set when the operation resolved a single symbol as its subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolSummary>,
    /// Arbitrary query output, serialized as-is (find-references matches,
    /// symbol info, type hierarchy, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Reference sites rewritten by a commit (0 for a query or a move that
    /// touched no external references).
    pub references_updated: usize,
    /// Wall-clock duration of the call.
    pub execution_time_ms: u64,
    /// Set only when `success` is `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl ToolResponse {
    /// Build a failure response from a `RefactoringError`.
    pub fn failure(operation_id: String, elapsed_ms: u64, err: &RefactoringError) -> Self {
        Self {
            success: false,
            operation_id,
            changes: None,
            pending_changes: None,
            symbol: None,
            result: None,
            references_updated: 0,
            execution_time_ms: elapsed_ms,
            error: Some(ErrorPayload::from(err)),
        }
    }
}
