//! Linting checks for Perl code
//!
//! This module provides various lint checks for common mistakes,
//! deprecated features, and strict warnings.

/// Check for common mistakes in Perl code
pub fn check_common_mistakes(_source: &str) -> Vec<String> {
    Vec::new()
}

/// Check for deprecated features
pub fn check_deprecated_features(_source: &str) -> Vec<String> {
    Vec::new()
}

/// Check for strict warnings
pub fn check_strict_warnings(_source: &str) -> Vec<String> {
    Vec::new()
}
