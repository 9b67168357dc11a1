//! Figure extraction from a source document.
//!
//! Finding the page that carries a figure caption and rendering that page to
//! an image are collaborator services: [`PageLocator`] and [`PageRenderer`].
//! [`collect_figures`] composes them and never fails; any missing piece
//! degrades to "figure absent", which [`NotesTemplate`] renders as a
//! placeholder.
//!
//! [`TextPageLocator`] searches page texts that were extracted beforehand.
//! [`PopplerLocator`] and [`PopplerRenderer`] drive the poppler tools.
//! [`Unavailable`] stands in for a service that is not installed.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//!
//! use mxdraft::figures::{self, FigurePatterns, Unavailable};
//!
//! let mut patterns = FigurePatterns::new();
//! patterns.insert("Figure 9.1".to_string(), r"Figure\s*9\.?1".to_string());
//!
//! let images = figures::collect_figures(
//!     Path::new("missing.pdf"),
//!     &patterns,
//!     &Unavailable,
//!     &Unavailable,
//!     Path::new("figures"),
//! );
//! assert_eq!(images.get("Figure 9.1"), Some(&None));
//! ```

mod notes;
mod poppler;

use std::{
    io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{debug, info, warn};
use regex::RegexBuilder;
use thiserror::Error;

pub use notes::{NotesTemplate, Section};
pub use poppler::{DEFAULT_DPI, PopplerLocator, PopplerRenderer};

/// Figure key (e.g. `"Figure 9.1"`) to caption regex.
pub type FigurePatterns = IndexMap<String, String>;

/// Figure key to zero-based page index, `None` when not found.
pub type FigurePages = IndexMap<String, Option<usize>>;

/// Figure key to rendered image path, `None` when not rendered.
pub type FigureImages = IndexMap<String, Option<PathBuf>>;

/// Errors raised by figure collaborators.
#[derive(Debug, Error)]
pub enum FigureError {
    #[error("source document `{0}` not found")]
    MissingDocument(PathBuf),

    #[error("invalid pattern for `{figure}`: {source}")]
    InvalidPattern {
        figure: String,
        #[source]
        source: regex::Error,
    },

    #[error("{0} is not available")]
    Unavailable(&'static str),

    #[error("`{program}` failed: {message}")]
    Tool {
        program: &'static str,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Finds the page on which each figure's caption appears.
pub trait PageLocator {
    /// Returns, for every key of `patterns`, the first page whose text
    /// matches the pattern.
    fn locate(&self, document: &Path, patterns: &FigurePatterns)
    -> Result<FigurePages, FigureError>;
}

/// Renders located pages to image files.
pub trait PageRenderer {
    /// Renders each located page into `out_dir`.
    ///
    /// Figures whose page is `None` or out of range map to `None`.
    fn render(
        &self,
        document: &Path,
        pages: &FigurePages,
        out_dir: &Path,
    ) -> Result<FigureImages, FigureError>;
}

/// File name of the image rendered for `figure`.
///
/// The key is lowercased with spaces and dots replaced by `_`:
/// `"Figure 9.10"` becomes `figure_9_10.png`.
pub fn image_file_name(figure: &str) -> String {
    let stem: String = figure
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '.' { '_' } else { c })
        .collect();
    format!("{stem}.png")
}

/// Locates figures in page texts extracted ahead of time.
///
/// Patterns are matched case-insensitively; the first matching page wins.
#[derive(Debug, Clone, Default)]
pub struct TextPageLocator {
    pages: Vec<String>,
}

impl TextPageLocator {
    /// Creates a locator over one text per page, in page order.
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Creates a locator from text whose pages are separated by form feeds,
    /// as produced by common PDF text extractors.
    pub fn from_form_feed(text: &str) -> Self {
        Self::new(text.split('\u{c}').map(str::to_string).collect())
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl PageLocator for TextPageLocator {
    fn locate(
        &self,
        _document: &Path,
        patterns: &FigurePatterns,
    ) -> Result<FigurePages, FigureError> {
        let mut found = FigurePages::new();

        for (figure, pattern) in patterns {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| FigureError::InvalidPattern {
                    figure: figure.clone(),
                    source,
                })?;

            let page = self.pages.iter().position(|text| regex.is_match(text));
            debug!(figure, page:?; "Located figure");
            found.insert(figure.clone(), page);
        }

        Ok(found)
    }
}

/// Collaborator that is not installed.
///
/// Both operations fail with [`FigureError::Unavailable`], which
/// [`collect_figures`] turns into absent figures.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl PageLocator for Unavailable {
    fn locate(&self, _: &Path, _: &FigurePatterns) -> Result<FigurePages, FigureError> {
        Err(FigureError::Unavailable("page locator"))
    }
}

impl PageRenderer for Unavailable {
    fn render(&self, _: &Path, _: &FigurePages, _: &Path) -> Result<FigureImages, FigureError> {
        Err(FigureError::Unavailable("page renderer"))
    }
}

fn all_absent(patterns: &FigurePatterns) -> FigureImages {
    patterns.keys().map(|figure| (figure.clone(), None)).collect()
}

/// Locates and renders every figure of `patterns`.
///
/// Never fails: a missing document or a failing collaborator is logged and
/// yields `None` for every figure. The result always has one entry per
/// pattern, in pattern order.
pub fn collect_figures(
    document: &Path,
    patterns: &FigurePatterns,
    locator: &dyn PageLocator,
    renderer: &dyn PageRenderer,
    out_dir: &Path,
) -> FigureImages {
    if !document.exists() {
        let err = FigureError::MissingDocument(document.to_path_buf());
        warn!(err:err; "Figures will not be extracted");
        return all_absent(patterns);
    }

    let pages = match locator.locate(document, patterns) {
        Ok(pages) => pages,
        Err(err) => {
            warn!(err:err; "Failed to locate figures");
            return all_absent(patterns);
        }
    };

    let images = match renderer.render(document, &pages, out_dir) {
        Ok(images) => images,
        Err(err) => {
            warn!(err:err; "Failed to render figures");
            return all_absent(patterns);
        }
    };

    let collected: FigureImages = patterns
        .keys()
        .map(|figure| (figure.clone(), images.get(figure).cloned().flatten()))
        .collect();
    info!(
        figures = collected.len(),
        rendered = collected.values().filter(|image| image.is_some()).count();
        "Figures collected"
    );
    collected
}
