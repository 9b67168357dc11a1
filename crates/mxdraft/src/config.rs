//! Configuration types for mxdraft documents.
//!
//! This module provides configuration structures that control the file
//! metadata, the graph-model display parameters, the style registry, and
//! validation. All types implement [`serde::Deserialize`] for loading from
//! external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`FileConfig`] - Attributes of the `mxfile` element.
//! - [`ModelConfig`] - Display parameters of every `mxGraphModel`.
//! - [`ValidationConfig`] - Whether documents are validated before writing.
//!
//! Style overrides are a plain map from [`ShapeCategory`] to a presentation
//! string.
//!
//! # Example
//!
//! ```
//! # use mxdraft::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.file().host(), "app.diagrams.net");
//! assert_eq!(config.model().page_width(), 1600);
//! assert!(config.model().background().is_ok());
//! assert!(!config.validation().strict());
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use mxdraft_core::style::{ShapeCategory, Style, is_valid_color};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// `mxfile` attributes.
    #[serde(default)]
    file: FileConfig,

    /// `mxGraphModel` display parameters.
    #[serde(default)]
    model: ModelConfig,

    /// Presentation overrides per shape category.
    #[serde(default)]
    styles: IndexMap<ShapeCategory, Style>,

    /// Validation settings.
    #[serde(default)]
    validation: ValidationConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        file: FileConfig,
        model: ModelConfig,
        styles: IndexMap<ShapeCategory, Style>,
        validation: ValidationConfig,
    ) -> Self {
        Self {
            file,
            model,
            styles,
            validation,
        }
    }

    pub fn file(&self) -> &FileConfig {
        &self.file
    }

    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    /// Returns the configured style overrides.
    pub fn styles(&self) -> &IndexMap<ShapeCategory, Style> {
        &self.styles
    }

    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }

    /// Returns a copy with strict validation switched on or off.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.validation.strict = strict;
        self
    }
}

/// Attributes of the top-level `mxfile` element.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    host: String,
}

impl FileConfig {
    /// Creates a new [`FileConfig`] naming the host application.
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// Host application recorded in the file.
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new("app.diagrams.net")
    }
}

/// Display parameters written on every page's `mxGraphModel`.
///
/// These only affect how the consuming tool shows the canvas.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    dx: u32,
    dy: u32,
    grid: bool,
    grid_size: u32,
    page: bool,
    page_width: u32,
    page_height: u32,
    math: bool,
    background: String,
}

impl ModelConfig {
    /// Returns a copy with a different background colour.
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    pub fn dx(&self) -> u32 {
        self.dx
    }

    pub fn dy(&self) -> u32 {
        self.dy
    }

    pub fn grid(&self) -> bool {
        self.grid
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn page(&self) -> bool {
        self.page
    }

    pub fn page_width(&self) -> u32 {
        self.page_width
    }

    pub fn page_height(&self) -> u32 {
        self.page_height
    }

    pub fn math(&self) -> bool {
        self.math
    }

    /// Returns the background colour.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured value is not a colour.
    pub fn background(&self) -> Result<&str, String> {
        if is_valid_color(&self.background) {
            Ok(&self.background)
        } else {
            Err(format!(
                "Invalid background color in config: `{}`",
                self.background
            ))
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            dx: 1600,
            dy: 900,
            grid: true,
            grid_size: 10,
            page: true,
            page_width: 1600,
            page_height: 900,
            math: false,
            background: "#ffffff".to_string(),
        }
    }
}

/// Validation settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Refuse to write documents with structural errors.
    strict: bool,
}

impl ValidationConfig {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn strict(&self) -> bool {
        self.strict
    }
}
