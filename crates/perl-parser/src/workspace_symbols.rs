//! LSP feature module (deprecated)
//!
//! **DEPRECATED**: This module has moved to the `perl-lsp` crate.
//!
//! For backwards compatibility during the migration period, this module
//! is kept as an empty stub. Migrate to `perl_lsp::features::workspace_symbols`.
//!
//! # Migration
//!
//! ```ignore
//! // Old:
//! use perl_parser::workspace_symbols;
//!
//! // New:
//! use perl_lsp::features::workspace_symbols;
//! ```
