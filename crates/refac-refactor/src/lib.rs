//! The Refactoring Operations catalog (spec §4.6, component C8): every
//! operation that edits source text, grouped one module per spec
//! subsection. Query operations (spec §4.7) live in `refac-query`; this
//! crate only ever produces an `EditSet`, never a read-only report.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

mod convert;
mod extract;
mod generate;
mod inline;
mod move_type;
mod organize;
mod rename;
mod support;

pub use convert::{
    BlockToExpressionBody, ConvertAutoPropertyToFullProperty, ConvertForeachToLinq, ConvertFullPropertyToAutoProperty,
    ConvertIfChainToSwitchExpression, ConvertStringToInterpolated, ConvertToAsync, ToExpressionBody,
};
pub use extract::{ExtractBaseClass, ExtractConstant, ExtractInterface, ExtractMethod, ExtractVariable};
pub use generate::{GenerateConstructor, GenerateEqualsHashCode, GenerateNullChecks, GenerateOverrides, GenerateToString, ImplementInterface};
pub use inline::{InlineConstant, InlineMethod, InlineVariable};
pub use move_type::{MoveTypeToFile, MoveTypeToNamespace};
pub use organize::{AddMissingUsings, RemoveUnusedUsings, SortUsings};
pub use rename::RenameSymbol;
