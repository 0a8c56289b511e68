//! LSP wire types for Position and Range.
//!
//! These types represent positions and ranges as they appear on the LSP wire protocol.
//! They are 0-based and use UTF-16 code units for character offsets.
//!
//! # Conversion Guarantees
//!
//! - `WirePosition` and `WireRange` use 0-based line numbers
//! - `character` field is in UTF-16 code units (not bytes, not chars)
//! - All conversions go through byte offsets for correctness
//!
//! # Usage
//!
//! ```ignore
//! use perl_lsp::convert::{WirePosition, WireRange};
//!
//! // Convert from engine position (requires source text for UTF-16 calculation)
//! let wire = WirePosition::from_engine(&engine_pos, source_text);
//!
//! // Convert to lsp_types for protocol responses
//! let lsp_pos: lsp_types::Position = wire.into();
//! ```

use serde::{Deserialize, Serialize};

/// LSP wire position - 0-based line and UTF-16 character offset.
///
/// This is the canonical type for positions in LSP JSON responses.
/// Use this instead of `perl_parser::position::Position` when serializing to JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WirePosition {
    /// 0-based line number
    pub line: u32,
    /// 0-based UTF-16 code unit offset within the line
    pub character: u32,
}

impl WirePosition {
    /// Create a new wire position.
    pub fn new(line: u32, character: u32) -> Self {
        WirePosition { line, character }
    }

    /// Convert from engine position using byte offset and source text.
    ///
    /// The engine position's byte offset is used to compute the correct
    /// 0-based line and UTF-16 character offset.
    pub fn from_engine(pos: &perl_parser::position::Position, source: &str) -> Self {
        let (line, character) =
            perl_parser::position::offset_to_utf16_line_col(source, pos.byte);
        WirePosition { line, character }
    }

    /// Convert this wire position to a byte offset in the source text.
    pub fn to_byte_offset(&self, source: &str) -> usize {
        perl_parser::position::utf16_line_col_to_offset(source, self.line, self.character)
    }
}

/// LSP wire range - start and end wire positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WireRange {
    /// Start position (inclusive)
    pub start: WirePosition,
    /// End position (exclusive)
    pub end: WirePosition,
}

impl WireRange {
    /// Create a new wire range.
    pub fn new(start: WirePosition, end: WirePosition) -> Self {
        WireRange { start, end }
    }

    /// Convert from engine range using source text.
    pub fn from_engine(range: &perl_parser::position::Range, source: &str) -> Self {
        WireRange {
            start: WirePosition::from_engine(&range.start, source),
            end: WirePosition::from_engine(&range.end, source),
        }
    }

    /// Create a zero-width range at a position.
    pub fn empty(pos: WirePosition) -> Self {
        WireRange {
            start: pos,
            end: pos,
        }
    }
}

/// LSP wire location - URI and range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireLocation {
    /// Document URI
    pub uri: String,
    /// Range within the document
    pub range: WireRange,
}

impl WireLocation {
    /// Create a new wire location.
    pub fn new(uri: String, range: WireRange) -> Self {
        WireLocation { uri, range }
    }
}

// =============================================================================
// Conversions to/from lsp_types
// =============================================================================

impl From<WirePosition> for lsp_types::Position {
    fn from(p: WirePosition) -> Self {
        lsp_types::Position {
            line: p.line,
            character: p.character,
        }
    }
}

impl From<lsp_types::Position> for WirePosition {
    fn from(p: lsp_types::Position) -> Self {
        WirePosition {
            line: p.line,
            character: p.character,
        }
    }
}

impl From<WireRange> for lsp_types::Range {
    fn from(r: WireRange) -> Self {
        lsp_types::Range {
            start: r.start.into(),
            end: r.end.into(),
        }
    }
}

impl From<lsp_types::Range> for WireRange {
    fn from(r: lsp_types::Range) -> Self {
        WireRange {
            start: r.start.into(),
            end: r.end.into(),
        }
    }
}

impl From<WireLocation> for lsp_types::Location {
    fn from(l: WireLocation) -> Self {
        lsp_types::Location {
            uri: l.uri.parse().unwrap_or_else(|_| {
                "file:///unknown".parse().expect("valid fallback URL")
            }),
            range: l.range.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
