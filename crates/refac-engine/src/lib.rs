//! The facade crate (spec §2, §6): `Engine` owns one loaded `Workspace`
//! and turns a tool-call-boundary request into a run through `refac-operation`
//! or `refac-query`, then a `ToolResponse`. This crate holds no refactoring
//! logic of its own — every `validate`/`compute`/`run` body lives upstream
//! in `refac-refactor`/`refac-query`.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

mod engine;
mod request;
mod response;

pub use engine::Engine;
pub use request::{
    CodeMetricsRequest, ConvertByNameRequest, ConvertByRangeRequest, DiagnosticsRequest, DocumentOutlineRequest, ExtractBaseClassRequest,
    ExtractConstantRequest, ExtractInterfaceRequest, ExtractMethodRequest, ExtractVariableRequest, FindReferencesRequest,
    GenerateConstructorRequest, GenerateEqualsHashCodeRequest, GenerateNullChecksRequest, GenerateOverridesRequest, GenerateToStringRequest,
    GoToDefinitionRequest, ImplementInterfaceRequest, InlineConstantRequest, InlineMethodRequest, InlineVariableRequest, Locator,
    MoveTypeToFileRequest, MoveTypeToNamespaceRequest, OrganizeUsingsRequest, RangeQueryRequest, RenameSymbolRequest, SearchSymbolsRequest,
    SelectionRequest, SymbolInfoRequest, TypeHierarchyRequest,
};
pub use response::{ChangesSummary, ErrorPayload, PendingChange, SymbolSummary, ToolResponse};
