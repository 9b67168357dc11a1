//! Figure collaborators backed by the poppler command-line tools.
//!
//! [`PopplerLocator`] extracts page texts with `pdftotext`, whose output
//! separates pages with form feeds, and searches them like
//! [`TextPageLocator`]. [`PopplerRenderer`] rasterizes single pages with
//! `pdftoppm`. A missing executable maps to [`FigureError::Unavailable`].

use std::{
    fs, io,
    path::Path,
    process::{Command, Output, Stdio},
};

use log::{debug, warn};

use crate::figures::{
    FigureError, FigureImages, FigurePages, FigurePatterns, PageLocator, PageRenderer,
    TextPageLocator, image_file_name,
};

/// Resolution used when rendering pages.
pub const DEFAULT_DPI: u32 = 144;

fn run(program: &'static str, command: &mut Command) -> Result<Output, FigureError> {
    let output = command
        .stdin(Stdio::null())
        .output()
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => FigureError::Unavailable(program),
            _ => FigureError::Io(err),
        })?;

    if !output.status.success() {
        return Err(FigureError::Tool {
            program,
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}

/// Locates figure captions in the text layer of a PDF.
#[derive(Debug, Clone)]
pub struct PopplerLocator {
    program: String,
}

impl PopplerLocator {
    pub fn new() -> Self {
        Self::with_program("pdftotext")
    }

    /// Uses `program` in place of `pdftotext`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PopplerLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl PageLocator for PopplerLocator {
    fn locate(
        &self,
        document: &Path,
        patterns: &FigurePatterns,
    ) -> Result<FigurePages, FigureError> {
        let output = run(
            "pdftotext",
            Command::new(&self.program).arg(document).arg("-"),
        )?;
        let text = String::from_utf8_lossy(&output.stdout);

        let locator = TextPageLocator::from_form_feed(&text);
        debug!(pages = locator.page_count(); "Extracted page texts");
        locator.locate(document, patterns)
    }
}

/// Renders located pages to PNG files.
#[derive(Debug, Clone)]
pub struct PopplerRenderer {
    program: String,
    dpi: u32,
}

impl PopplerRenderer {
    pub fn new() -> Self {
        Self {
            program: "pdftoppm".to_string(),
            dpi: DEFAULT_DPI,
        }
    }

    /// Uses `program` in place of `pdftoppm`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }
}

impl Default for PopplerRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer for PopplerRenderer {
    fn render(
        &self,
        document: &Path,
        pages: &FigurePages,
        out_dir: &Path,
    ) -> Result<FigureImages, FigureError> {
        fs::create_dir_all(out_dir)?;
        let mut images = FigureImages::new();

        for (figure, page) in pages {
            let Some(index) = page else {
                images.insert(figure.clone(), None);
                continue;
            };

            // pdftoppm numbers pages from 1 and appends the extension itself.
            let number = (index + 1).to_string();
            let path = out_dir.join(image_file_name(figure));
            let prefix = path.with_extension("");

            let result = run(
                "pdftoppm",
                Command::new(&self.program)
                    .args(["-png", "-singlefile", "-r"])
                    .arg(self.dpi.to_string())
                    .args(["-f", number.as_str(), "-l", number.as_str()])
                    .arg(document)
                    .arg(&prefix),
            );

            let image = match result {
                Ok(_) if path.exists() => Some(path),
                Ok(_) => None,
                // Pages past the end fail individually; keep the others.
                Err(FigureError::Tool { message, .. }) => {
                    warn!(figure, page = index, message; "Failed to render page");
                    None
                }
                Err(err) => return Err(err),
            };
            images.insert(figure.clone(), image);
        }

        Ok(images)
    }
}
