//! LSP diagnostics catalog (deprecated).
//!
//! **DEPRECATED**: This module has moved to the `perl-lsp` crate.
//!
//! For backwards compatibility during the migration period, this module
//! is kept as an empty stub. Migrate to `perl_lsp::diagnostics_catalog`.
//!
//! # Migration
//!
//! ```ignore
//! // Old:
//! use perl_parser::diagnostics_catalog::parse_error;
//!
//! // New:
//! use perl_lsp::diagnostics_catalog::parse_error;
//! ```
