//! Lint checks for Perl code analysis
//!
//! This module provides various linting checks for detecting deprecated syntax,
//! strict/warnings issues, and common mistakes in Perl code.

pub mod common_mistakes;
pub mod deprecated;
pub mod strict_warnings;
