//! LSP error types module (deprecated)
//!
//! **DEPRECATED**: This module has moved to the `perl-lsp` crate.
//!
//! For backwards compatibility during the migration period, this module
//! is kept as an empty stub. Migrate to `perl_lsp::protocol::errors`.
//!
//! # Migration
//!
//! ```ignore
//! // Old:
//! use perl_parser::lsp_errors;
//!
//! // New:
//! use perl_lsp::protocol::errors;
//! ```

// This module intentionally has no contents.
// All functionality has moved to the perl-lsp crate.
