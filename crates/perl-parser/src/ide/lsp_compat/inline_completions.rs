//! LSP feature module (deprecated)
//!
//! **DEPRECATED**: This module has moved to the `perl-lsp` crate.
//!
//! For backwards compatibility during the migration period, this module
//! is kept as an empty stub. Migrate to `perl_lsp::features::inline_completions`.
//!
//! # Migration
//!
//! ```ignore
//! // Old:
//! use perl_parser::inline_completions;
//!
//! // New:
//! use perl_lsp::features::inline_completions;
//! ```
