//! Error codes for model diagnostics.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Line reader errors
//! - `E2xx` - Entity store errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Reader Errors (E1xx)
    // =========================================================================
    /// Unknown keyword.
    ///
    /// The key left of `=` does not name an entity kind.
    E100,

    /// Missing fields.
    ///
    /// The definition has fewer `|`-separated fields than its kind requires.
    E101,

    /// Extra fields.
    ///
    /// The definition has more `|`-separated fields than its kind uses.
    /// The leading fields are still used.
    E102,

    // =========================================================================
    // Entity Store Errors (E2xx)
    // =========================================================================
    /// Duplicate definition.
    ///
    /// An entity of the same kind with this name has already been defined.
    E200,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unknown keyword",
            ErrorCode::E101 => "missing fields",
            ErrorCode::E102 => "extra fields",
            ErrorCode::E200 => "duplicate definition",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
