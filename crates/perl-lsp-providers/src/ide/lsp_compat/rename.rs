//! Deprecated rename compatibility module.
//!
//! This module preserves legacy imports through
//! `perl_lsp_providers::ide::lsp_compat::rename`.
//! Prefer `perl_lsp_providers::rename` for new code.

pub use perl_lsp_rename::*;
