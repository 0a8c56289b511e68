//! Type definition support for Perl LSP (deprecated).
//!
//! **DEPRECATED**: This module has moved to the `perl-lsp` crate.
//!
//! For backwards compatibility during the migration period, this module
//! is kept as an empty stub. Migrate to `perl_lsp::features::type_definition`.
//!
//! # Migration
//!
//! ```ignore
//! // Old:
//! use perl_parser::type_definition::TypeDefinitionProvider;
//!
//! // New:
//! use perl_lsp::features::type_definition::TypeDefinitionProvider;
//! ```
