//! Tool-call boundary request shapes (spec §6): one struct per operation,
//! `camelCase` JSON, `sourceFile` an absolute path, 1-based `line`/`column`,
//! `preview` defaulting to `false`.

use std::path::PathBuf;

use serde::Deserialize;

/// Fields every request carries (spec §6: "Each operation accepts a JSON
/// object with, at minimum: `sourceFile` ... `preview`").
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locator {
    /// Absolute path ending in the target language's extension.
    pub source_file: PathBuf,
    /// 1-based line, paired with `column`, to disambiguate.
    #[serde(default)]
    pub line: Option<u32>,
    /// 1-based column, paired with `line`.
    #[serde(default)]
    pub column: Option<u32>,
    /// `false` unless the caller wants edits computed without committing.
    #[serde(default)]
    pub preview: bool,
}

fn default_false() -> bool {
    false
}

/// `move_type_to_file` (spec §4.6.1).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTypeToFileRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub symbol_name: String,
    pub target_file: PathBuf,
    #[serde(default)]
    pub create_target_file: bool,
}

/// `move_type_to_namespace` (spec §4.6.2).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTypeToNamespaceRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub symbol_name: String,
    pub target_namespace: String,
    #[serde(default)]
    pub also_move_file: bool,
}

/// `rename_symbol` (spec §4.6.3).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameSymbolRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub symbol_name: String,
    pub new_name: String,
    /// Rename every overload of the resolved symbol too.
    #[serde(default)]
    pub rename_overloads: bool,
    /// Rename interface/override implementations reachable from the
    /// resolved symbol's override chain. Defaults to `true`.
    #[serde(default = "default_true")]
    pub rename_implementations: bool,
    /// Also rename the declaring file when its stem matches the old name.
    #[serde(default)]
    pub rename_file: bool,
}

fn default_true() -> bool {
    true
}

/// A selection expressed as a byte range. The tool surface's line/column
/// pair is converted to a byte range by the caller-facing `Document`
/// helper before an `Engine` method sees it, mirroring how `refac-refactor`
/// operations already take `start`/`end` byte offsets directly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    pub source_file: PathBuf,
    pub start: u32,
    pub end: u32,
    #[serde(default)]
    pub preview: bool,
}

/// `extract_method` (spec §4.6.4).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractMethodRequest {
    #[serde(flatten)]
    pub selection: SelectionRequest,
    pub method_name: String,
    /// Access modifier for the new method. Defaults to `"private"`.
    #[serde(default = "default_private")]
    pub visibility: String,
    /// Mark the new method `static` regardless of the enclosing member.
    #[serde(default)]
    pub force_static: bool,
}

fn default_private() -> String {
    "private".to_string()
}

/// `extract_variable` (spec §4.6.5).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractVariableRequest {
    #[serde(flatten)]
    pub selection: SelectionRequest,
    pub variable_name: String,
}

/// `extract_constant` (spec §4.6.5).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractConstantRequest {
    #[serde(flatten)]
    pub selection: SelectionRequest,
    pub constant_name: String,
}

/// `extract_interface` (spec §4.6.5).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractInterfaceRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub type_name: String,
    pub interface_name: String,
    pub target_file: PathBuf,
}

/// `extract_base_class` (spec §4.6.5).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractBaseClassRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub type_name: String,
    pub member_names: Vec<String>,
    pub base_class_name: String,
    pub target_file: PathBuf,
}

/// `inline_variable` (spec §4.6.6).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineVariableRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub variable_name: String,
}

/// `inline_method` (spec §4.6.6).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineMethodRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub method_name: String,
}

/// `inline_constant` (spec §4.6.6).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineConstantRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub constant_name: String,
}

/// `generate_constructor` (spec §4.6.7).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateConstructorRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub type_name: String,
    pub field_names: Vec<String>,
    #[serde(default = "default_false")]
    pub with_null_checks: bool,
    #[serde(default = "default_public")]
    pub visibility: String,
}

fn default_public() -> String {
    "public".to_string()
}

/// `generate_overrides` (spec §4.6.7).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOverridesRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub type_name: String,
    pub member_names: Vec<String>,
    #[serde(default)]
    pub call_base: bool,
}

/// `implement_interface` (spec §4.6.7).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementInterfaceRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub type_name: String,
    pub interface_file: PathBuf,
    pub interface_name: String,
    #[serde(default)]
    pub explicit: bool,
}

/// `generate_null_checks` (spec §4.6.7).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateNullChecksRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub method_name: String,
}

/// `generate_equals_hash_code` (spec §4.6.7).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEqualsHashCodeRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub type_name: String,
    pub member_names: Vec<String>,
}

/// `generate_to_string` (spec §4.6.7).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateToStringRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub type_name: String,
    pub member_names: Vec<String>,
}

/// `sort_usings`/`remove_unused_usings`/`add_missing_usings` (spec
/// §4.6.8). `source_file` is ignored when `all_files` is `true`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizeUsingsRequest {
    #[serde(default)]
    pub source_file: Option<PathBuf>,
    #[serde(default)]
    pub all_files: bool,
    #[serde(default)]
    pub preview: bool,
}

/// `convert_to_async`, `to_expression_body`, `convert_auto_property_to_full_property`:
/// resolved by name + optional line/column.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertByNameRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub member_name: String,
}

/// `block_to_expression_body`, `convert_full_property_to_auto_property`,
/// `convert_foreach_to_linq`, `convert_if_chain_to_switch_expression`,
/// `convert_string_to_interpolated`: resolved by byte range.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertByRangeRequest {
    #[serde(flatten)]
    pub selection: SelectionRequest,
}

/// `find_references` (spec §4.7).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindReferencesRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub symbol_name: String,
}

/// `go_to_definition` (spec §4.7).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoToDefinitionRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub symbol_name: String,
}

/// `symbol_info` (spec §4.7).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfoRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub symbol_name: String,
}

/// `search_symbols` (spec §4.7): not tied to any one document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSymbolsRequest {
    pub query: String,
    #[serde(default)]
    pub limit: usize,
}

/// `type_hierarchy` (spec §4.7).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeHierarchyRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub type_name: String,
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

fn default_max_depth() -> u32 {
    64
}

/// `control_flow_summary`/`data_flow_summary` (spec §4.7): a byte range,
/// not a resolved symbol.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQueryRequest {
    pub source_file: PathBuf,
    pub start: u32,
    pub end: u32,
}

/// `code_metrics` (spec §4.7).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeMetricsRequest {
    #[serde(flatten)]
    pub locator: Locator,
    pub type_name: String,
}

/// `diagnose` (spec §4.7): diagnostics for one document, filtered by
/// minimum severity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsRequest {
    pub source_file: PathBuf,
    #[serde(default)]
    pub min_severity: Option<String>,
}

/// `document_outline` (spec §4.7).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOutlineRequest {
    pub source_file: PathBuf,
}
