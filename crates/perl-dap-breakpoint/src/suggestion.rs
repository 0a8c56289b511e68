//! Nearest valid line suggestion
//!
//! This module provides functionality to find the nearest valid line
//! when a breakpoint is placed on an invalid location (comment, blank, etc.)

use crate::validator::{AstBreakpointValidator, BreakpointValidator};

/// Direction to search for a valid line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    /// Search forward (towards end of file)
    Forward,
    /// Search backward (towards start of file)
    Backward,
    /// Search in both directions, returning the nearest
    Both,
}

/// Find the nearest valid line to the given line number
///
/// # Arguments
///
/// * `validator` - The breakpoint validator to use
/// * `line` - The 1-based line number to start from
/// * `direction` - The direction to search
/// * `max_distance` - Maximum number of lines to search (None for unlimited)
///
/// # Returns
///
/// The nearest valid line number, or None if no valid line is found within the search range.
pub fn find_nearest_valid_line(
    validator: &AstBreakpointValidator,
    line: i64,
    direction: SearchDirection,
    max_distance: Option<usize>,
) -> Option<i64> {
    let max_dist = max_distance.unwrap_or(usize::MAX);

    match direction {
        SearchDirection::Forward => find_forward(validator, line, max_dist),
        SearchDirection::Backward => find_backward(validator, line, max_dist),
        SearchDirection::Both => {
            let forward = find_forward(validator, line, max_dist);
            let backward = find_backward(validator, line, max_dist);

            match (forward, backward) {
                (Some(f), Some(b)) => {
                    let f_dist = (f - line).unsigned_abs();
                    let b_dist = (line - b).unsigned_abs();
                    if f_dist <= b_dist { Some(f) } else { Some(b) }
                }
                (Some(f), None) => Some(f),
                (None, Some(b)) => Some(b),
                (None, None) => None,
            }
        }
    }
}

fn find_forward(
    validator: &AstBreakpointValidator,
    start_line: i64,
    max_distance: usize,
) -> Option<i64> {
    for offset in 1..=max_distance {
        let line = start_line + offset as i64;
        if validator.is_executable_line(line) {
            return Some(line);
        }
        // Stop if we've gone past end of file
        let result = validator.validate(line);
        if result.reason == Some(crate::validator::ValidationReason::LineOutOfRange) {
            break;
        }
    }
    None
}

fn find_backward(
    validator: &AstBreakpointValidator,
    start_line: i64,
    max_distance: usize,
) -> Option<i64> {
    for offset in 1..=max_distance {
        let line = start_line - offset as i64;
        if line < 1 {
            break;
        }
        if validator.is_executable_line(line) {
            return Some(line);
        }
    }
    None
}
