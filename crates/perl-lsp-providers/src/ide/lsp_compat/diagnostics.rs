//! Deprecated diagnostics compatibility module.
//!
//! This module preserves legacy imports through
//! `perl_lsp_providers::ide::lsp_compat::diagnostics`.
//! Prefer `perl_lsp_providers::diagnostics` for new code.

pub use perl_lsp_diagnostics::*;
