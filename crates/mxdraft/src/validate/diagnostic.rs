//! The diagnostic type reported by document validation.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! code, the page and cell it is about, and help text.

use std::fmt;

use mxdraft_core::identifier::CellId;

use crate::validate::{ErrorCode, Severity};

/// A validation finding about one cell of a page.
///
/// # Example
///
/// ```text
/// error[E201]: edge `7` targets `42`, which is not on this page
///   --> page `01 - Demo`, cell `7`
///    = help: add the target cell before rendering or fix the identifier
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    page: Option<String>,
    cell: Option<CellId>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use mxdraft::validate::{Diagnostic, ErrorCode};
    /// let diag = Diagnostic::error("edge `7` targets `42`, which is not on this page")
    ///     .with_code(ErrorCode::E201)
    ///     .with_page("01 - Demo")
    ///     .with_help("fix the target identifier");
    /// assert_eq!(diag.page(), Some("01 - Demo"));
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Display name of the page the diagnostic is about.
    pub fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    /// Identifier of the offending cell.
    pub fn cell(&self) -> Option<CellId> {
        self.cell
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the page the diagnostic is about.
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Set the offending cell.
    pub fn with_cell(mut self, cell: CellId) -> Self {
        self.cell = Some(cell);
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            page: None,
            cell: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E200]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
