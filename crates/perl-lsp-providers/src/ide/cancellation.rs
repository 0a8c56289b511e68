//! LSP cancellation infrastructure (deprecated).
//!
//! **DEPRECATED**: This module has moved to the `perl-lsp` crate.
//!
//! For backwards compatibility during the migration period, this module
//! is kept as an empty stub. Migrate to `perl_lsp::cancellation`.
//!
//! # Migration
//!
//! ```ignore
//! // Old:
//! use perl_parser::cancellation::PerlLspCancellationToken;
//!
//! // New:
//! use perl_lsp::cancellation::PerlLspCancellationToken;
//! ```
