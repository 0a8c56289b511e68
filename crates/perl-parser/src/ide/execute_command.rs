//! LSP executeCommand support (deprecated).
//!
//! **DEPRECATED**: This module has moved to the `perl-lsp` crate.
//!
//! For backwards compatibility during the migration period, this module
//! is kept as an empty stub. Migrate to `perl_lsp::execute_command`.
//!
//! # Migration
//!
//! ```ignore
//! // Old:
//! use perl_parser::execute_command::ExecuteCommandProvider;
//!
//! // New:
//! use perl_lsp::execute_command::ExecuteCommandProvider;
//! ```
