//! The error returned when a document fails validation.

use std::fmt;

use crate::validate::Diagnostic;

/// Error type for a document with at least one error diagnostic.
///
/// Carries every diagnostic that was found, warnings included.
#[derive(Debug, Clone)]
pub struct ValidationError {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Iterates over the error diagnostics only.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity().is_error())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.errors().next() {
            write!(f, "{}", first)?;
            let others = self.diagnostics.len() - 1;
            if others > 0 {
                write!(f, " (+{} more)", others)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<Diagnostic> for ValidationError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ErrorCode;

    #[test]
    fn test_display_single() {
        let err: ValidationError = Diagnostic::error("dangling source")
            .with_code(ErrorCode::E200)
            .into();

        assert_eq!(err.to_string(), "error[E200]: dangling source");
    }

    #[test]
    fn test_display_leads_with_first_error() {
        let err = ValidationError::new(vec![
            Diagnostic::warning("odd colour"),
            Diagnostic::error("first error"),
            Diagnostic::error("second error"),
        ]);

        assert_eq!(err.to_string(), "error: first error (+2 more)");
        assert_eq!(err.errors().count(), 2);
        assert_eq!(err.diagnostics().len(), 3);
    }
}
