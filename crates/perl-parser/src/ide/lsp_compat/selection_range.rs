//! LSP feature module (deprecated)
//!
//! **DEPRECATED**: This module has moved to the `perl-lsp` crate.
//!
//! For backwards compatibility during the migration period, this module
//! is kept as an empty stub. Migrate to `perl_lsp::features::selection_range`.
//!
//! # Migration
//!
//! ```ignore
//! // Old:
//! use perl_parser::selection_range;
//!
//! // New:
//! use perl_lsp::features::selection_range;
//! ```
