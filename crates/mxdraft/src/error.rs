//! Error types for mxdraft operations.
//!
//! This module provides the main error type [`MxdraftError`] which wraps
//! the error conditions that can occur while building and writing documents.

use std::io;

use thiserror::Error;

use mxdraft_core::style::StyleError;

use crate::{document::DocumentError, validate::ValidationError};

/// The main error type for mxdraft operations.
///
/// # Validation Variant
///
/// The `Validation` variant carries every diagnostic of a document rejected
/// in strict mode, so callers can report all of them at once.
#[derive(Debug, Error)]
pub enum MxdraftError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for MxdraftError {
    fn from(error: crate::export::Error) -> Self {
        match error {
            crate::export::Error::Io(err) => Self::Io(err),
            error => Self::Export(Box::new(error)),
        }
    }
}
