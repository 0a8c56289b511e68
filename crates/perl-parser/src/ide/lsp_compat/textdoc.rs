//! Rope-based text document handling for LSP (deprecated).
//!
//! **DEPRECATED**: This module has moved to the `perl-lsp` crate.
//!
//! For backwards compatibility during the migration period, this module
//! is kept as an empty stub. Migrate to `perl_lsp::textdoc`.
//!
//! # Migration
//!
//! ```ignore
//! // Old:
//! use perl_parser::textdoc::{Doc, PosEnc, apply_changes};
//!
//! // New:
//! use perl_lsp::textdoc::{Doc, PosEnc, apply_changes};
//! ```
