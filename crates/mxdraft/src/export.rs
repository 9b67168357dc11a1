//! Document exporters.
//!
//! An [`Exporter`] turns an assembled [`Document`] into the text of an
//! output file. The only format is the draw.io XML of [`xml`].

pub mod xml;

use std::{fs, path::Path};

use log::{error, info};

use crate::document::Document;

pub trait Exporter {
    /// Renders the document to the exporter's text format.
    fn render(&self, document: &Document) -> Result<String, Error>;

    /// Renders the document and writes it to `path` in one write.
    ///
    /// A failed write is reported as is; nothing is retried or cleaned up.
    fn export(&self, document: &Document, path: &Path) -> Result<(), Error> {
        let content = self.render(document)?;

        info!(path:? = path, bytes = content.len(); "Writing document");
        if let Err(err) = fs::write(path, content) {
            error!(path:? = path, err:err; "Failed to write document");
            return Err(Error::Io(err));
        }

        Ok(())
    }
}

#[derive(Debug)]
pub enum Error {
    Render(String),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
