//! Diagnostics collected while building a [`Model`](crate::model::Model).
//!
//! Definition problems such as duplicate names or malformed field counts never
//! halt a parse. They are recorded as [`Diagnostic`] values on the model and
//! handed to the presentation layer for display.
//!
//! # Example
//!
//! ```
//! # use blueprint_core::diagnostic::{Diagnostic, ErrorCode, Location};
//! let diag = Diagnostic::error("System is already defined: Billing")
//!     .with_code(ErrorCode::E200)
//!     .with_location(Location::new("model/systems.txt", 12));
//!
//! assert_eq!(
//!     diag.to_string(),
//!     "model/systems.txt:12: error[E200]: System is already defined: Billing"
//! );
//! ```

mod error_code;
mod severity;

pub use error_code::ErrorCode;
pub use severity::Severity;

use std::{
    fmt,
    path::{Path, PathBuf},
};

/// A position in a project file: the file path and a 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    file: PathBuf,
    line: usize,
}

impl Location {
    /// Create a new location.
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// The file the location points into.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// A single error or warning attached to a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    location: Option<Location>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the location the diagnostic refers to, if any.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            location: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "file:line: error[E200]: message"
        if let Some(location) = &self.location {
            write!(f, "{location}: ")?;
        }
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
