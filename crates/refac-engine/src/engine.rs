//! `Engine`: the facade spec §2's data-flow paragraph describes — "client
//! → C7 runner → validate inputs → fetch document & semantic model →
//! resolve symbol → find references → compute a new `Solution` → if
//! preview, serialize pending changes; else commit; always return a
//! structured result" — collapsed into one type callers construct once per
//! loaded solution.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use refac_commit::CommitLayer;
use refac_error::{ErrorCode, RefactoringError, Result};
use refac_operation::{CancellationToken, OperationKind, OperationRunner, QueryOperation, RefactoringOperation, RunOutcome, TimeoutPolicy};
use refac_semantic::{DocumentId, Language, Severity, Symbol};
use refac_workspace::{DocumentChange, EditSet, Workspace, WorkspaceState};

use crate::request::*;
use crate::response::{render_pending_changes, ChangesSummary, ErrorPayload, SymbolSummary, ToolResponse};

/// Owns one `Workspace` and dispatches every refactoring/query operation
/// against it.
pub struct Engine {
    workspace: Arc<Workspace>,
    commit: Arc<CommitLayer>,
    next_operation_id: AtomicU64,
}

impl Engine {
    /// Construct an `Engine` over an unloaded `Workspace` for `language`.
    pub fn new(language: Arc<dyn Language>) -> Self {
        Self { workspace: Arc::new(Workspace::new(language)), commit: Arc::new(CommitLayer::new()), next_operation_id: AtomicU64::new(0) }
    }

    /// Load a solution from `path` (spec §4.1 `load`).
    ///
    /// # Errors
    ///
    /// `SolutionLoadFailed` carrying the collaborator's load diagnostics.
    pub fn load(&self, path: &Path) -> Result<()> {
        self.workspace.load(path)
    }

    /// The workspace's current lifecycle state, for diagnostics.
    pub fn lifecycle(&self) -> WorkspaceState {
        self.workspace.lifecycle()
    }

    /// Dispose of this engine's workspace, waiting up to `timeout` for any
    /// in-flight mutating operation.
    pub fn dispose(&self, timeout: Duration) {
        self.workspace.dispose(timeout);
    }

    fn document_id(&self, path: &Path) -> Result<DocumentId> {
        if !refac_ident::is_valid_absolute_path(&path.to_string_lossy()) {
            return Err(RefactoringError::new(ErrorCode::InvalidSourcePath, format!("{} is not a valid absolute path", path.display())));
        }
        self.workspace.document_for(path).map(|d| d.id)
    }

    fn next_id(&self) -> String {
        format!("op-{}", self.next_operation_id.fetch_add(1, Ordering::Relaxed))
    }

    fn symbol_summary(&self, document: DocumentId, name: &str, line: Option<u32>, column: Option<u32>) -> Option<SymbolSummary> {
        let base = self.workspace.current_solution().ok()?;
        let doc = base.document(document)?;
        let model = base.semantic_model();
        let symbol: Symbol = refac_resolve::resolve_in_file(doc, base.language().as_ref(), model.as_ref(), name, line, column).ok()?;
        Some(SymbolSummary::from(&symbol))
    }

    /// Run `op` through the C7 state machine and shape the outcome into a
    /// `ToolResponse`. `symbol` is attached to a successful response when
    /// the caller already resolved one (most refactoring operations name a
    /// single subject symbol).
    fn execute(&self, kind: OperationKind, preview: bool, symbol: Option<SymbolSummary>, op: &dyn RefactoringOperation) -> ToolResponse {
        let operation_id = self.next_id();
        let started = Instant::now();
        let runner = OperationRunner::new(TimeoutPolicy::for_kind(kind), self.commit.clone());
        let cancel = CancellationToken::new();

        match runner.run(&self.workspace, op, preview, None, &cancel) {
            Ok(RunOutcome::Previewed { edit_set }) => {
                let references_updated = count_modified_edits(&edit_set);
                let pending = match self.workspace.current_solution() {
                    Ok(base) => render_pending_changes(&base, &edit_set),
                    Err(err) => return ToolResponse::failure(operation_id, elapsed_ms(started), &err),
                };
                ToolResponse {
                    success: true,
                    operation_id,
                    changes: None,
                    pending_changes: Some(pending),
                    symbol,
                    result: None,
                    references_updated,
                    execution_time_ms: elapsed_ms(started),
                    error: None,
                }
            }
            Ok(RunOutcome::Committed { stats }) => ToolResponse {
                success: true,
                operation_id,
                changes: Some(ChangesSummary::from(&stats)),
                pending_changes: None,
                symbol,
                result: None,
                references_updated: 0,
                execution_time_ms: elapsed_ms(started),
                error: None,
            },
            Ok(RunOutcome::Cancelled) => ToolResponse {
                success: false,
                operation_id,
                changes: None,
                pending_changes: None,
                symbol: None,
                result: None,
                references_updated: 0,
                execution_time_ms: elapsed_ms(started),
                error: Some(ErrorPayload {
                    code: "CANCELLED".to_string(),
                    numeric_code: 0,
                    message: "the call was cancelled before reaching a non-cancellable stage".to_string(),
                    details: Default::default(),
                    suggestions: vec!["retry without cancelling, or request a longer timeout".to_string()],
                }),
            },
            Err(err) => ToolResponse::failure(operation_id, elapsed_ms(started), &err),
        }
    }

    /// Run a read-only query and shape its output into a `ToolResponse`
    /// with `result` set to the serialized query output. Query operations
    /// never transition the Workspace (spec §4.7); there is no commit/preview
    /// branch.
    fn execute_query<Q: QueryOperation>(&self, kind: OperationKind, query: &Q) -> ToolResponse
    where
        Q::Output: serde::Serialize,
    {
        let operation_id = self.next_id();
        let started = Instant::now();
        let _ = kind; // query timeouts are the caller's responsibility at the transport layer
        let cancel = CancellationToken::new();

        let base = match self.workspace.current_solution() {
            Ok(base) => base,
            Err(err) => return ToolResponse::failure(operation_id, elapsed_ms(started), &err),
        };
        match query.run(&base, &cancel) {
            Ok(output) => ToolResponse {
                success: true,
                operation_id,
                changes: None,
                pending_changes: None,
                symbol: None,
                result: serde_json::to_value(output).ok(),
                references_updated: 0,
                execution_time_ms: elapsed_ms(started),
                error: None,
            },
            Err(err) => ToolResponse::failure(operation_id, elapsed_ms(started), &err),
        }
    }

    // ---------------------------------------------------------------
    // C8 Refactoring Operations (spec §4.6)
    // ---------------------------------------------------------------

    /// `move_type_to_file` (spec §4.6.1).
    pub fn move_type_to_file(&self, req: &MoveTypeToFileRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let symbol = self.symbol_summary(document, &req.symbol_name, req.locator.line, req.locator.column);
        let op = refac_refactor::MoveTypeToFile { document, type_name: req.symbol_name.clone(), target_path: req.target_file.clone() };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, symbol, &op)
    }

    /// `move_type_to_namespace` (spec §4.6.2).
    pub fn move_type_to_namespace(&self, req: &MoveTypeToNamespaceRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let symbol = self.symbol_summary(document, &req.symbol_name, req.locator.line, req.locator.column);
        let op = refac_refactor::MoveTypeToNamespace {
            document,
            type_name: req.symbol_name.clone(),
            target_namespace: req.target_namespace.clone(),
        };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, symbol, &op)
    }

    /// `rename_symbol` (spec §4.6.3).
    pub fn rename_symbol(&self, req: &RenameSymbolRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let symbol = self.symbol_summary(document, &req.symbol_name, req.locator.line, req.locator.column);
        let op = refac_refactor::RenameSymbol {
            document,
            old_name: req.symbol_name.clone(),
            new_name: req.new_name.clone(),
            line: req.locator.line,
            column: req.locator.column,
            rename_overloads: req.rename_overloads,
            rename_implementations: req.rename_implementations,
            rename_file: req.rename_file,
        };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, symbol, &op)
    }

    /// `extract_method` (spec §4.6.4).
    pub fn extract_method(&self, req: &ExtractMethodRequest) -> ToolResponse {
        let document = match self.document_id(&req.selection.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::ExtractMethod {
            document,
            start: req.selection.start,
            end: req.selection.end,
            method_name: req.method_name.clone(),
            visibility: req.visibility.clone(),
            force_static: req.force_static,
        };
        self.execute(OperationKind::MoveRenameExtract, req.selection.preview, None, &op)
    }

    /// `extract_variable` (spec §4.6.5).
    pub fn extract_variable(&self, req: &ExtractVariableRequest) -> ToolResponse {
        let document = match self.document_id(&req.selection.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op =
            refac_refactor::ExtractVariable { document, start: req.selection.start, end: req.selection.end, variable_name: req.variable_name.clone() };
        self.execute(OperationKind::MoveRenameExtract, req.selection.preview, None, &op)
    }

    /// `extract_constant` (spec §4.6.5).
    pub fn extract_constant(&self, req: &ExtractConstantRequest) -> ToolResponse {
        let document = match self.document_id(&req.selection.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op =
            refac_refactor::ExtractConstant { document, start: req.selection.start, end: req.selection.end, constant_name: req.constant_name.clone() };
        self.execute(OperationKind::MoveRenameExtract, req.selection.preview, None, &op)
    }

    /// `extract_interface` (spec §4.6.5).
    pub fn extract_interface(&self, req: &ExtractInterfaceRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let symbol = self.symbol_summary(document, &req.type_name, req.locator.line, req.locator.column);
        let op = refac_refactor::ExtractInterface {
            document,
            type_name: req.type_name.clone(),
            interface_name: req.interface_name.clone(),
            target_path: req.target_file.clone(),
        };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, symbol, &op)
    }

    /// `extract_base_class` (spec §4.6.5).
    pub fn extract_base_class(&self, req: &ExtractBaseClassRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let symbol = self.symbol_summary(document, &req.type_name, req.locator.line, req.locator.column);
        let op = refac_refactor::ExtractBaseClass {
            document,
            type_name: req.type_name.clone(),
            member_names: req.member_names.clone(),
            base_class_name: req.base_class_name.clone(),
            target_path: req.target_file.clone(),
        };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, symbol, &op)
    }

    /// `inline_variable` (spec §4.6.6).
    pub fn inline_variable(&self, req: &InlineVariableRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::InlineVariable {
            document,
            variable_name: req.variable_name.clone(),
            line: req.locator.line,
            column: req.locator.column,
        };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, None, &op)
    }

    /// `inline_method` (spec §4.6.6).
    pub fn inline_method(&self, req: &InlineMethodRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op =
            refac_refactor::InlineMethod { document, method_name: req.method_name.clone(), line: req.locator.line, column: req.locator.column };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, None, &op)
    }

    /// `inline_constant` (spec §4.6.6).
    pub fn inline_constant(&self, req: &InlineConstantRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::InlineConstant {
            document,
            constant_name: req.constant_name.clone(),
            line: req.locator.line,
            column: req.locator.column,
        };
        self.execute(OperationKind::InlineConstant, req.locator.preview, None, &op)
    }

    /// `generate_constructor` (spec §4.6.7).
    pub fn generate_constructor(&self, req: &GenerateConstructorRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let symbol = self.symbol_summary(document, &req.type_name, req.locator.line, req.locator.column);
        let op = refac_refactor::GenerateConstructor {
            document,
            type_name: req.type_name.clone(),
            field_names: req.field_names.clone(),
            with_null_checks: req.with_null_checks,
            visibility: req.visibility.clone(),
        };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, symbol, &op)
    }

    /// `generate_overrides` (spec §4.6.7).
    pub fn generate_overrides(&self, req: &GenerateOverridesRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let symbol = self.symbol_summary(document, &req.type_name, req.locator.line, req.locator.column);
        let op = refac_refactor::GenerateOverrides {
            document,
            type_name: req.type_name.clone(),
            member_names: req.member_names.clone(),
            call_base: req.call_base,
        };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, symbol, &op)
    }

    /// `implement_interface` (spec §4.6.7).
    pub fn implement_interface(&self, req: &ImplementInterfaceRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let interface_document = match self.document_id(&req.interface_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let symbol = self.symbol_summary(document, &req.type_name, req.locator.line, req.locator.column);
        let op = refac_refactor::ImplementInterface {
            document,
            type_name: req.type_name.clone(),
            interface_document,
            interface_name: req.interface_name.clone(),
            explicit: req.explicit,
        };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, symbol, &op)
    }

    /// `generate_null_checks` (spec §4.6.7).
    pub fn generate_null_checks(&self, req: &GenerateNullChecksRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::GenerateNullChecks {
            document,
            method_name: req.method_name.clone(),
            line: req.locator.line,
            column: req.locator.column,
        };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, None, &op)
    }

    /// `generate_equals_hash_code` (spec §4.6.7).
    pub fn generate_equals_hash_code(&self, req: &GenerateEqualsHashCodeRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let symbol = self.symbol_summary(document, &req.type_name, req.locator.line, req.locator.column);
        let op = refac_refactor::GenerateEqualsHashCode { document, type_name: req.type_name.clone(), member_names: req.member_names.clone() };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, symbol, &op)
    }

    /// `generate_to_string` (spec §4.6.7).
    pub fn generate_to_string(&self, req: &GenerateToStringRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let symbol = self.symbol_summary(document, &req.type_name, req.locator.line, req.locator.column);
        let op = refac_refactor::GenerateToString { document, type_name: req.type_name.clone(), member_names: req.member_names.clone() };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, symbol, &op)
    }

    /// `sort_usings` (spec §4.6.8). All-files mode when `all_files` is set
    /// or `source_file` is absent.
    pub fn sort_usings(&self, req: &OrganizeUsingsRequest) -> ToolResponse {
        let (document, kind) = match self.organize_target(req) {
            Ok(pair) => pair,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::SortUsings { document };
        self.execute(kind, req.preview, None, &op)
    }

    /// `remove_unused_usings` (spec §4.6.8).
    pub fn remove_unused_usings(&self, req: &OrganizeUsingsRequest) -> ToolResponse {
        let (document, kind) = match self.organize_target(req) {
            Ok(pair) => pair,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::RemoveUnusedUsings { document };
        self.execute(kind, req.preview, None, &op)
    }

    /// `add_missing_usings` (spec §4.6.8).
    pub fn add_missing_usings(&self, req: &OrganizeUsingsRequest) -> ToolResponse {
        let (document, kind) = match self.organize_target(req) {
            Ok(pair) => pair,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::AddMissingUsings { document };
        self.execute(kind, req.preview, None, &op)
    }

    fn organize_target(&self, req: &OrganizeUsingsRequest) -> Result<(Option<DocumentId>, OperationKind)> {
        if req.all_files {
            return Ok((None, OperationKind::OrganizeAllFiles));
        }
        let path = req
            .source_file
            .as_ref()
            .ok_or_else(|| RefactoringError::new(ErrorCode::InvalidSourcePath, "sourceFile is required unless allFiles is set"))?;
        Ok((Some(self.document_id(path)?), OperationKind::OrganizeSingleFile))
    }

    /// `convert_to_async` (spec §4.6.9).
    pub fn convert_to_async(&self, req: &ConvertByNameRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::ConvertToAsync { document, method_name: req.member_name.clone(), line: req.locator.line, column: req.locator.column };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, None, &op)
    }

    /// `to_expression_body` (spec §4.6.9).
    pub fn to_expression_body(&self, req: &ConvertByNameRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::ToExpressionBody { document, method_name: req.member_name.clone(), line: req.locator.line, column: req.locator.column };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, None, &op)
    }

    /// `convert_auto_property_to_full_property` (spec §4.6.9).
    pub fn convert_auto_property_to_full_property(&self, req: &ConvertByNameRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::ConvertAutoPropertyToFullProperty {
            document,
            property_name: req.member_name.clone(),
            line: req.locator.line,
            column: req.locator.column,
        };
        self.execute(OperationKind::MoveRenameExtract, req.locator.preview, None, &op)
    }

    /// `block_to_expression_body` (spec §4.6.9).
    pub fn block_to_expression_body(&self, req: &ConvertByRangeRequest) -> ToolResponse {
        let document = match self.document_id(&req.selection.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::BlockToExpressionBody { document, start: req.selection.start, end: req.selection.end };
        self.execute(OperationKind::MoveRenameExtract, req.selection.preview, None, &op)
    }

    /// `convert_full_property_to_auto_property` (spec §4.6.9).
    pub fn convert_full_property_to_auto_property(&self, req: &ConvertByRangeRequest) -> ToolResponse {
        let document = match self.document_id(&req.selection.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::ConvertFullPropertyToAutoProperty { document, start: req.selection.start, end: req.selection.end };
        self.execute(OperationKind::MoveRenameExtract, req.selection.preview, None, &op)
    }

    /// `convert_foreach_to_linq` (spec §4.6.9).
    pub fn convert_foreach_to_linq(&self, req: &ConvertByRangeRequest) -> ToolResponse {
        let document = match self.document_id(&req.selection.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::ConvertForeachToLinq { document, start: req.selection.start, end: req.selection.end };
        self.execute(OperationKind::MoveRenameExtract, req.selection.preview, None, &op)
    }

    /// `convert_if_chain_to_switch_expression` (spec §4.6.9).
    pub fn convert_if_chain_to_switch_expression(&self, req: &ConvertByRangeRequest) -> ToolResponse {
        let document = match self.document_id(&req.selection.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::ConvertIfChainToSwitchExpression { document, start: req.selection.start, end: req.selection.end };
        self.execute(OperationKind::MoveRenameExtract, req.selection.preview, None, &op)
    }

    /// `convert_string_to_interpolated` (spec §4.6.9).
    pub fn convert_string_to_interpolated(&self, req: &ConvertByRangeRequest) -> ToolResponse {
        let document = match self.document_id(&req.selection.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let op = refac_refactor::ConvertStringToInterpolated { document, start: req.selection.start, end: req.selection.end };
        self.execute(OperationKind::MoveRenameExtract, req.selection.preview, None, &op)
    }

    // ---------------------------------------------------------------
    // C9 Query Operations (spec §4.7)
    // ---------------------------------------------------------------

    /// `find_references` (spec §4.7).
    pub fn find_references(&self, req: &FindReferencesRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let query = refac_query::FindReferences {
            document,
            symbol_name: req.symbol_name.clone(),
            line: req.locator.line,
            column: req.locator.column,
        };
        self.execute_query(OperationKind::Diagnose, &query)
    }

    /// `go_to_definition` (spec §4.7).
    pub fn go_to_definition(&self, req: &GoToDefinitionRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let query = refac_query::GoToDefinition {
            document,
            symbol_name: req.symbol_name.clone(),
            line: req.locator.line,
            column: req.locator.column,
        };
        self.execute_query(OperationKind::Diagnose, &query)
    }

    /// `symbol_info` (spec §4.7).
    pub fn symbol_info(&self, req: &SymbolInfoRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let query = refac_query::SymbolInfoQuery {
            document,
            symbol_name: req.symbol_name.clone(),
            line: req.locator.line,
            column: req.locator.column,
        };
        self.execute_query(OperationKind::Diagnose, &query)
    }

    /// `search_symbols` (spec §4.7).
    pub fn search_symbols(&self, req: &SearchSymbolsRequest) -> ToolResponse {
        let query = refac_query::SearchSymbolsQuery { query: req.query.clone(), limit: req.limit };
        self.execute_query(OperationKind::Diagnose, &query)
    }

    /// `type_hierarchy` (spec §4.7).
    pub fn type_hierarchy(&self, req: &TypeHierarchyRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let query = refac_query::TypeHierarchyQuery {
            document,
            type_name: req.type_name.clone(),
            line: req.locator.line,
            column: req.locator.column,
            max_depth: req.max_depth,
        };
        self.execute_query(OperationKind::Diagnose, &query)
    }

    /// `control_flow_summary` (spec §4.7).
    pub fn control_flow_summary(&self, req: &RangeQueryRequest) -> ToolResponse {
        let document = match self.document_id(&req.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let query = refac_query::ControlFlowSummaryQuery { document, start: req.start, end: req.end };
        self.execute_query(OperationKind::Diagnose, &query)
    }

    /// `data_flow_summary` (spec §4.7).
    pub fn data_flow_summary(&self, req: &RangeQueryRequest) -> ToolResponse {
        let document = match self.document_id(&req.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let query = refac_query::DataFlowSummaryQuery { document, start: req.start, end: req.end };
        self.execute_query(OperationKind::Diagnose, &query)
    }

    /// `code_metrics` (spec §4.7).
    pub fn code_metrics(&self, req: &CodeMetricsRequest) -> ToolResponse {
        let document = match self.document_id(&req.locator.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let query = refac_query::CodeMetricsQuery {
            document,
            type_name: req.type_name.clone(),
            line: req.locator.line,
            column: req.locator.column,
        };
        self.execute_query(OperationKind::Diagnose, &query)
    }

    /// `diagnose` (spec §4.7).
    pub fn diagnose(&self, req: &DiagnosticsRequest) -> ToolResponse {
        let document = match self.document_id(&req.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let min_severity = parse_severity(req.min_severity.as_deref()).unwrap_or(Severity::Hint);
        let query = refac_query::DiagnosticsQuery { document, min_severity };
        self.execute_query(OperationKind::Diagnose, &query)
    }

    /// `document_outline` (spec §4.7).
    pub fn document_outline(&self, req: &DocumentOutlineRequest) -> ToolResponse {
        let document = match self.document_id(&req.source_file) {
            Ok(id) => id,
            Err(err) => return ToolResponse::failure(self.next_id(), 0, &err),
        };
        let query = refac_query::DocumentOutlineQuery { document };
        self.execute_query(OperationKind::Diagnose, &query)
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

/// Number of individual text edits across every `Modify` change in an edit
/// set: a proxy for "reference sites rewritten" (spec §8 invariant 4 ties
/// the two together for rename).
fn count_modified_edits(edit_set: &EditSet) -> usize {
    edit_set
        .changes
        .iter()
        .map(|change| match change {
            DocumentChange::Modify { edits, .. } => edits.len(),
            _ => 0,
        })
        .sum()
}

fn parse_severity(s: Option<&str>) -> Option<Severity> {
    match s?.to_ascii_lowercase().as_str() {
        "error" => Some(Severity::Error),
        "warning" => Some(Severity::Warning),
        "info" => Some(Severity::Info),
        "hint" => Some(Severity::Hint),
        _ => None,
    }
}
