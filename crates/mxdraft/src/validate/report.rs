//! Accumulated result of a validation pass.
//!
//! Validation reports every problem of a document instead of stopping at
//! the first one.

use log::warn;

use crate::validate::{Diagnostic, ValidationError};

/// All diagnostics found in one document.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this report.
    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Diagnostics in the order they were found.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterates over the warning diagnostics only.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity().is_warning())
    }

    /// Converts the report into a result.
    ///
    /// - If there are errors, returns `Err(ValidationError)` with all
    ///   diagnostics.
    /// - Otherwise returns the warnings, which are also logged.
    pub fn into_result(self) -> Result<Vec<Diagnostic>, ValidationError> {
        if self.has_errors {
            return Err(ValidationError::new(self.diagnostics));
        }
        for diagnostic in &self.diagnostics {
            warn!(page = diagnostic.page().unwrap_or_default(); "{diagnostic}");
        }
        Ok(self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_ok() {
        let report = ValidationReport::new();

        assert!(report.is_clean());
        assert!(!report.has_errors());
        assert_eq!(report.into_result().unwrap(), vec![]);
    }

    #[test]
    fn test_error_makes_result_err() {
        let mut report = ValidationReport::new();

        report.emit(Diagnostic::warning("warning 1"));
        report.emit(Diagnostic::error("error 1"));

        assert!(report.has_errors());
        assert_eq!(report.warnings().count(), 1);
        let err = report.into_result().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
    }

    #[test]
    fn test_warnings_only() {
        let mut report = ValidationReport::new();

        report.emit(Diagnostic::warning("warning 1"));
        report.emit(Diagnostic::warning("warning 2"));

        let warnings = report.into_result().unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[1].message(), "warning 2");
    }
}
