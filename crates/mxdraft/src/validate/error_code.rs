//! Error codes for document validation.
//!
//! - `E2xx` - Structural errors
//! - `W3xx` - Presentation warnings

use std::fmt;

/// Codes for categorizing validation diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Structural Errors (E2xx)
    // =========================================================================
    /// Dangling edge source.
    ///
    /// The source of an edge names no cell of the edge's page.
    E200,

    /// Dangling edge target.
    ///
    /// The target of an edge names no cell of the edge's page.
    E201,

    /// Unresolved parent.
    ///
    /// A cell names a parent that is not constructed before it on the
    /// same page.
    E202,

    /// Parent is not a container.
    E203,

    /// Invalid geometry.
    ///
    /// A vertex position or size is not finite, or is negative.
    E204,

    /// Edge connected to an edge.
    ///
    /// Edge endpoints must be vertices, containers, or a reserved cell.
    E205,

    /// Duplicate identifier.
    ///
    /// Two cells of the document share an identifier.
    E206,

    // =========================================================================
    // Presentation Warnings (W3xx)
    // =========================================================================
    /// Unparsable colour value in a style string.
    W300,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E200").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E206 => "E206",
            ErrorCode::W300 => "W300",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E200 => "dangling edge source",
            ErrorCode::E201 => "dangling edge target",
            ErrorCode::E202 => "unresolved parent",
            ErrorCode::E203 => "parent is not a container",
            ErrorCode::E204 => "invalid geometry",
            ErrorCode::E205 => "edge connected to an edge",
            ErrorCode::E206 => "duplicate identifier",
            ErrorCode::W300 => "invalid colour",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
