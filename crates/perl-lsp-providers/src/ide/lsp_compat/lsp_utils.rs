//! LSP module (deprecated)
//!
//! **DEPRECATED**: This module has moved to the `perl-lsp` crate.
//!
//! For backwards compatibility during the migration period, this module
//! is kept as an empty stub. Migrate to `perl_lsp::utils`.
//!
//! # Migration
//!
//! ```ignore
//! // Old:
//! use perl_parser::lsp_utils;
//!
//! // New:
//! use perl_lsp::utils;
//! ```
