//! The Query Operations catalog (spec §4.7, component C9): read-only
//! operations that never transition the Workspace and never emit an
//! `EditSet`. Each returns a structured, serializable result instead.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

mod control_flow;
mod data_flow;
mod definition;
mod diagnostics;
mod hierarchy;
mod metrics;
mod outline;
mod references;
mod search;
mod symbol_info;
mod support;

pub use control_flow::{ControlFlowSummary, ControlFlowSummaryQuery};
pub use data_flow::{DataFlowSummary, DataFlowSummaryQuery};
pub use definition::{DefinitionLocation, Definitions, GoToDefinition};
pub use diagnostics::{DiagnosticEntry, DiagnosticsQuery, FilteredDiagnostics};
pub use hierarchy::{TypeHierarchy, TypeHierarchyQuery};
pub use metrics::{CodeMetrics, CodeMetricsQuery};
pub use outline::{DocumentOutline, DocumentOutlineQuery, OutlineSymbol};
pub use references::{FindReferences, ReferenceMatch, ReferenceMatches};
pub use search::{SearchSymbols, SearchSymbolsQuery, SymbolMatch};
pub use symbol_info::{Modifiers, SymbolInfo, SymbolInfoQuery};

use refac_error::Result;
use refac_operation::CancellationToken;
use refac_workspace::Solution;

/// A read-only query against a `Solution` snapshot.
///
/// Unlike [`refac_operation::RefactoringOperation`], a `QueryOperation`
/// never produces an `EditSet` and the runner never carries it past
/// `Computing` into `Applying`/`Committing` (spec §4.7: "never transition
/// the Workspace state").
pub trait QueryOperation {
    /// The structured result this query produces.
    type Output;

    /// Run the query against `base`, observing `cancel` at per-document
    /// boundaries for queries that walk the whole solution.
    ///
    /// # Errors
    ///
    /// `2xxx` resolution codes when an input identifier does not resolve.
    fn run(&self, base: &Solution, cancel: &CancellationToken) -> Result<Self::Output>;
}
