//! The Operation Framework (spec §4.5, component C7): the generic state
//! machine, cancellation, and timeout policy every refactoring and query
//! operation runs through.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

mod cancel;
mod runner;
mod state;
mod timeout;

pub use cancel::CancellationToken;
pub use runner::{OperationRunner, RefactoringOperation, RunOutcome};
pub use state::OperationState;
pub use timeout::{OperationKind, TimeoutPolicy};
