//! The cell model: vertices, containers, and edges.
//!
//! Every element of a diagram page is a [`Cell`]. Cells share an identifier,
//! a label, a style, and a parent reference; the [`CellKind`] adds what is
//! specific to each kind. Containment is expressed only through the parent
//! reference, never by nesting cells inside each other.

use crate::{
    geometry::{Bounds, Geometry},
    identifier::CellId,
    style::Style,
};

/// What a cell is, with the data specific to that kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CellKind {
    /// A shape with absolute geometry.
    Vertex { bounds: Bounds },
    /// A shape other cells may declare as their parent.
    Container { bounds: Bounds },
    /// A directed connection between two cells.
    Edge { source: CellId, target: CellId },
}

/// A single element of a diagram page.
///
/// Cells are created once by the document assembler and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    id: CellId,
    parent: CellId,
    label: String,
    style: Style,
    kind: CellKind,
}

impl Cell {
    /// Creates a vertex cell.
    pub fn vertex(
        id: CellId,
        parent: CellId,
        bounds: Bounds,
        label: impl Into<String>,
        style: Style,
    ) -> Self {
        Self::new(id, parent, label, style, CellKind::Vertex { bounds })
    }

    /// Creates a container cell.
    pub fn container(
        id: CellId,
        parent: CellId,
        bounds: Bounds,
        label: impl Into<String>,
        style: Style,
    ) -> Self {
        Self::new(id, parent, label, style, CellKind::Container { bounds })
    }

    /// Creates an edge cell from `source` to `target`.
    pub fn edge(
        id: CellId,
        parent: CellId,
        source: CellId,
        target: CellId,
        label: impl Into<String>,
        style: Style,
    ) -> Self {
        Self::new(id, parent, label, style, CellKind::Edge { source, target })
    }

    fn new(
        id: CellId,
        parent: CellId,
        label: impl Into<String>,
        style: Style,
        kind: CellKind,
    ) -> Self {
        Self {
            id,
            parent,
            label: label.into(),
            style,
            kind,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn parent(&self) -> CellId {
        self.parent
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn kind(&self) -> &CellKind {
        &self.kind
    }

    /// Returns `true` for vertices and containers.
    pub fn is_vertex(&self) -> bool {
        !self.is_edge()
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, CellKind::Container { .. })
    }

    pub fn is_edge(&self) -> bool {
        matches!(self.kind, CellKind::Edge { .. })
    }

    /// Returns the `(source, target)` pair of an edge.
    pub fn endpoints(&self) -> Option<(CellId, CellId)> {
        match self.kind {
            CellKind::Edge { source, target } => Some((source, target)),
            CellKind::Vertex { .. } | CellKind::Container { .. } => None,
        }
    }

    /// Returns the geometry rendered for this cell.
    pub fn geometry(&self) -> Geometry {
        match self.kind {
            CellKind::Vertex { bounds } | CellKind::Container { bounds } => {
                Geometry::Absolute(bounds)
            }
            CellKind::Edge { .. } => Geometry::Relative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(100.0, 0.0, 180.0, 50.0)
    }

    #[test]
    fn test_vertex_cell() {
        let cell = Cell::vertex(
            CellId::new("3"),
            CellId::default_layer(),
            bounds(),
            "Step",
            Style::new("shape=rect;"),
        );

        assert_eq!(cell.id(), "3");
        assert_eq!(cell.parent(), CellId::default_layer());
        assert_eq!(cell.label(), "Step");
        assert_eq!(cell.style().as_str(), "shape=rect;");
        assert!(cell.is_vertex());
        assert!(!cell.is_container());
        assert!(!cell.is_edge());
        assert_eq!(cell.endpoints(), None);
        assert_eq!(cell.geometry(), Geometry::Absolute(bounds()));
    }

    #[test]
    fn test_container_is_a_vertex() {
        let cell = Cell::container(
            CellId::new("AttentePIN"),
            CellId::default_layer(),
            bounds(),
            "AttentePIN",
            Style::default(),
        );

        assert!(cell.is_vertex());
        assert!(cell.is_container());
        assert_eq!(cell.geometry().bounds(), Some(&bounds()));
    }

    #[test]
    fn test_edge_cell() {
        let source = CellId::new("3");
        let target = CellId::new("4");
        let cell = Cell::edge(
            CellId::new("5"),
            CellId::default_layer(),
            source,
            target,
            "",
            Style::default(),
        );

        assert!(cell.is_edge());
        assert!(!cell.is_vertex());
        assert_eq!(cell.endpoints(), Some((source, target)));
        assert_eq!(cell.geometry(), Geometry::Relative);
        assert_eq!(
            cell.kind(),
            &CellKind::Edge {
                source,
                target
            }
        );
    }
}
