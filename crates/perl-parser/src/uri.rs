//! LSP module (deprecated)
//!
//! **DEPRECATED**: This module has moved to the `perl-lsp` crate.
//!
//! For backwards compatibility during the migration period, this module
//! is kept as an empty stub. Migrate to `perl_lsp::utils::uri`.
//!
//! # Migration
//!
//! ```ignore
//! // Old:
//! use perl_parser::uri;
//!
//! // New:
//! use perl_lsp::utils::uri;
//! ```

// This module intentionally has no contents.
// All functionality has moved to the perl-lsp crate.
// Direct re-export is not possible due to circular dependency.
