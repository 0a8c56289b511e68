//! Position module compatibility re-exports.
//!
//! New code should use `perl_parser::engine::position`.

/// Re-export position tracking types and utilities from `engine::position`.
pub use crate::engine::position::*;
