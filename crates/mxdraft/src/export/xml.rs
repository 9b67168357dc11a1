//! draw.io (mxGraph) XML output.
//!
//! [`DrawioExporter::serialize`] turns a [`Document`] into an [`Element`] tree and
//! [`pretty_print`] writes that tree as text. [`DrawioExporter`] ties both
//! to the [`Exporter`] trait.
//!
//! The tree has this shape, with one `diagram` per page:
//!
//! ```text
//! mxfile host
//! └── diagram name
//!     └── mxGraphModel dx dy grid ... background
//!         └── root
//!             ├── mxCell id="0"
//!             ├── mxCell id="1" parent="0"
//!             └── mxCell ...   (every constructed cell, flat)
//!                 └── mxGeometry
//! ```

mod element;
mod pretty;

use log::{debug, info};

use mxdraft_core::{
    cell::Cell,
    geometry::Geometry,
    identifier::CellId,
};

use crate::{
    config::{FileConfig, ModelConfig},
    document::{Document, Page},
    export::{self, Exporter},
};

pub use element::Element;
pub use pretty::pretty_print;

/// Formats a number the way it appears in attributes.
///
/// Whole numbers are written without a fractional part (`80`, not `80.0`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Renders documents as draw.io files.
#[derive(Debug, Clone, Default)]
pub struct DrawioExporter {
    file: FileConfig,
    model: ModelConfig,
}

impl DrawioExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `mxfile` attributes.
    pub fn with_file_config(mut self, file: &FileConfig) -> Self {
        self.file = file.clone();
        self
    }

    /// Sets the `mxGraphModel` display parameters.
    pub fn with_model_config(mut self, model: &ModelConfig) -> Self {
        self.model = model.clone();
        self
    }

    /// Builds the element tree of `document`.
    ///
    /// Cells are emitted in insertion order after the reserved pair. Edge
    /// endpoints are written as given, without cross-checking.
    ///
    /// # Errors
    ///
    /// Fails when the configured background is not a colour.
    pub fn serialize(&self, document: &Document) -> Result<Element, export::Error> {
        let background = self.model.background().map_err(export::Error::Render)?;

        let diagrams = document
            .pages()
            .iter()
            .map(|page| self.serialize_page(page, background));

        Ok(Element::new("mxfile")
            .attr("host", self.file.host())
            .children(diagrams))
    }

    fn serialize_page(&self, page: &Page, background: &str) -> Element {
        debug!(page = page.name(), cells = page.cells().len(); "Serializing page");
        let model = &self.model;

        let root = Element::new("root")
            .child(Element::new("mxCell").attr("id", CellId::root().to_string()))
            .child(
                Element::new("mxCell")
                    .attr("id", CellId::default_layer().to_string())
                    .attr("parent", CellId::root().to_string()),
            )
            .children(page.cells().iter().map(serialize_cell));

        let graph_model = Element::new("mxGraphModel")
            .attr("dx", model.dx().to_string())
            .attr("dy", model.dy().to_string())
            .attr("grid", flag(model.grid()))
            .attr("gridSize", model.grid_size().to_string())
            .attr("page", flag(model.page()))
            .attr("pageWidth", model.page_width().to_string())
            .attr("pageHeight", model.page_height().to_string())
            .attr("math", flag(model.math()))
            .attr("background", background)
            .child(root);

        Element::new("diagram")
            .attr("name", page.name())
            .child(graph_model)
    }
}

fn serialize_cell(cell: &Cell) -> Element {
    let mut element = Element::new("mxCell")
        .attr("id", cell.id().to_string())
        .attr("value", cell.label())
        .attr("style", cell.style().as_str());

    element = match cell.endpoints() {
        Some((source, target)) => element
            .attr("edge", "1")
            .attr("parent", cell.parent().to_string())
            .attr("source", source.to_string())
            .attr("target", target.to_string()),
        None => element
            .attr("vertex", "1")
            .attr("parent", cell.parent().to_string()),
    };

    let geometry = match cell.geometry() {
        Geometry::Absolute(bounds) => Element::new("mxGeometry")
            .attr("x", format_number(bounds.x()))
            .attr("y", format_number(bounds.y()))
            .attr("width", format_number(bounds.width()))
            .attr("height", format_number(bounds.height())),
        Geometry::Relative => Element::new("mxGeometry").attr("relative", "1"),
    };

    element.child(geometry.attr("as", "geometry"))
}

impl Exporter for DrawioExporter {
    fn render(&self, document: &Document) -> Result<String, export::Error> {
        let tree = self.serialize(document)?;
        let text = pretty_print(&tree)?;

        info!(pages = document.pages().len(), cells = document.cell_count(); "Document rendered");
        Ok(text)
    }
}
