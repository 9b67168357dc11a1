//! mxdraft - Build multi-page draw.io diagram documents.
//!
//! Pages, shapes, containers, and connections are assembled in a
//! [`Document`] and written as the mxGraph XML read by draw.io and
//! diagrams.net. Identifiers are allocated by the document, styles come from
//! a per-category registry, and output is byte-for-byte deterministic.

pub mod config;
pub mod document;
pub mod export;
pub mod figures;
pub mod validate;

mod error;

pub use mxdraft_core::{cell, geometry, identifier, style};

pub use document::{Document, DocumentError, Page, PageHandle};
pub use error::MxdraftError;

use std::path::{Path, PathBuf};

use log::{debug, info};

use mxdraft_core::style::StyleRegistry;

use config::AppConfig;
use export::{Exporter, xml::DrawioExporter};

/// Renders and writes documents according to an [`AppConfig`].
///
/// # Examples
///
/// ```rust,no_run
/// use mxdraft::{DocumentWriter, config::AppConfig, geometry::Bounds, style::ShapeCategory};
///
/// let writer = DocumentWriter::new(AppConfig::default());
/// let mut doc = writer.new_document();
/// let styles = doc.styles().clone();
///
/// let page = doc.add_page("Demo");
/// let start = doc
///     .add_vertex(page, Bounds::new(0.0, 0.0, 30.0, 30.0), "", styles.get(ShapeCategory::Start))
///     .expect("Failed to add vertex");
/// let step = doc
///     .add_vertex(page, Bounds::new(100.0, 0.0, 180.0, 50.0), "Step", styles.get(ShapeCategory::Action))
///     .expect("Failed to add vertex");
/// doc.add_edge(page, start, step, "", None)
///     .expect("Failed to add edge");
///
/// writer.save(&doc, "demo.drawio").expect("Failed to save");
/// ```
#[derive(Debug, Default)]
pub struct DocumentWriter {
    config: AppConfig,
}

impl DocumentWriter {
    /// Create a new writer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Create an empty document whose style registry includes the
    /// configured overrides.
    pub fn new_document(&self) -> Document {
        Document::with_styles(StyleRegistry::with_overrides(self.config.styles()))
    }

    /// Render a document to draw.io XML text.
    ///
    /// In strict mode the document is validated first.
    ///
    /// # Errors
    ///
    /// Returns [`MxdraftError::Validation`] for a document with structural
    /// errors in strict mode, and [`MxdraftError::Export`] when the
    /// configuration cannot be rendered.
    pub fn render(&self, document: &Document) -> Result<String, MxdraftError> {
        self.check(document)?;
        Ok(self.exporter().render(document)?)
    }

    /// Render a document and write it to `path`.
    ///
    /// The file is written in one go; a failure leaves whatever the
    /// operating system left behind.
    ///
    /// # Errors
    ///
    /// Same as [`DocumentWriter::render`], plus [`MxdraftError::Io`] when the
    /// file cannot be written.
    pub fn save(
        &self,
        document: &Document,
        path: impl AsRef<Path>,
    ) -> Result<PathBuf, MxdraftError> {
        let path = path.as_ref();
        self.check(document)?;
        self.exporter().export(document, path)?;

        info!(path:? = path; "Document saved");
        Ok(path.to_path_buf())
    }

    fn check(&self, document: &Document) -> Result<(), MxdraftError> {
        if !self.config.validation().strict() {
            return Ok(());
        }

        info!("Validating document");
        let warnings = validate::validate(document).into_result()?;
        debug!(warnings = warnings.len(); "Document is valid");
        Ok(())
    }

    fn exporter(&self) -> DrawioExporter {
        DrawioExporter::new()
            .with_file_config(self.config.file())
            .with_model_config(self.config.model())
    }
}
