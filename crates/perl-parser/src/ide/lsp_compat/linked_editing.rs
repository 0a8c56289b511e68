//! LSP feature module (deprecated)
//!
//! **DEPRECATED**: This module has moved to the `perl-lsp` crate.
//!
//! For backwards compatibility during the migration period, this module
//! is kept as an empty stub. Migrate to `perl_lsp::features::linked_editing`.
//!
//! # Migration
//!
//! ```ignore
//! // Old:
//! use perl_parser::linked_editing;
//!
//! // New:
//! use perl_lsp::features::linked_editing;
//! ```
