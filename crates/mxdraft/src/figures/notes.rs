//! Markdown notes illustrated with collected figures.

use crate::figures::FigureImages;

/// One titled section illustrated by a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    figure: String,
    title: String,
    summary: String,
}

impl Section {
    pub fn new(
        figure: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            figure: figure.into(),
            title: title.into(),
            summary: summary.into(),
        }
    }

    /// Key of the illustrating figure, e.g. `"Figure 9.1"`.
    pub fn figure(&self) -> &str {
        &self.figure
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }
}

/// A markdown document with a fixed text and one image slot per section.
///
/// Preamble and closing lines are written verbatim. Each section renders as
/// a level-two heading, the figure image (or a placeholder quote when the
/// figure is absent), and the summary paragraph.
///
/// # Example
///
/// ```
/// use mxdraft::figures::{FigureImages, NotesTemplate, Section};
///
/// let notes = NotesTemplate::new("Notes")
///     .with_section(Section::new("Figure 1", "First", "About the first figure."));
///
/// let text = notes.render(&FigureImages::new());
/// assert!(text.contains("> Illustration: Figure 1 (non extraite)."));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NotesTemplate {
    title: String,
    preamble: Vec<String>,
    sections: Vec<Section>,
    closing: Vec<String>,
}

impl NotesTemplate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Appends lines written after the title, before the sections.
    pub fn with_preamble<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preamble.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Appends lines written after the sections.
    pub fn with_closing<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.closing.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Renders the markdown text.
    ///
    /// A section's figure is shown when `images` maps its key to a path;
    /// otherwise the placeholder is written.
    pub fn render(&self, images: &FigureImages) -> String {
        let mut lines = vec![format!("# {}\n", self.title)];
        lines.extend(self.preamble.iter().cloned());

        for section in &self.sections {
            lines.push(format!("## {}", section.title));
            match images.get(&section.figure).and_then(Option::as_ref) {
                Some(path) => {
                    let path = path.to_string_lossy().replace('\\', "/");
                    lines.push(format!("![{}]({path})", section.figure));
                }
                None => lines.push(format!("> Illustration: {} (non extraite).", section.figure)),
            }
            lines.push(String::new());
            lines.push(section.summary.clone());
            lines.push(String::new());
        }

        lines.extend(self.closing.iter().cloned());
        lines.join("\n")
    }
}
