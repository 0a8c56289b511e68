//! Deprecated inlay hints compatibility module.
//!
//! This module preserves legacy imports through
//! `perl_lsp_providers::ide::lsp_compat::inlay_hints`.
//! Prefer `perl_lsp_providers::inlay_hints` for new code.

pub use perl_lsp_inlay_hints::*;
