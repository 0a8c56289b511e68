//! Parser compatibility re-exports.
//!
//! New code should use `perl_parser::engine::parser`.

/// Re-export the parser API from `engine::parser`.
pub use crate::engine::parser::*;
