//! Structural validation of assembled documents.
//!
//! The assembler accepts edges with any endpoints, so a document can
//! reference cells that do not exist. [`validate`] walks every page and
//! reports such problems as [`Diagnostic`]s before the document is written.
//!
//! # Example
//!
//! ```
//! use mxdraft::{
//!     Document,
//!     geometry::Bounds,
//!     identifier::CellId,
//!     validate::{self, ErrorCode},
//! };
//!
//! let mut doc = Document::new();
//! let page = doc.add_page("Demo");
//! let a = doc.add_vertex(page, Bounds::new(0.0, 0.0, 30.0, 30.0), "", "").unwrap();
//! doc.add_edge(page, a, CellId::new("42"), "", None).unwrap();
//!
//! let report = validate::validate(&doc);
//! assert!(report.has_errors());
//! assert_eq!(report.diagnostics()[0].code(), Some(ErrorCode::E201));
//! ```

mod diagnostic;
mod error_code;
mod report;
mod severity;
mod validation_error;

use std::collections::{HashMap, HashSet};

use log::debug;

use mxdraft_core::{
    cell::Cell,
    identifier::CellId,
    style::{COLOR_KEYS, is_valid_color},
};

use crate::document::Document;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use report::ValidationReport;
pub use severity::Severity;
pub use validation_error::ValidationError;

/// Validates every page of `document`.
pub fn validate(document: &Document) -> ValidationReport {
    let mut report = ValidationReport::new();
    let mut seen = HashSet::new();

    for page in document.pages() {
        check_page(page.name(), page.cells(), &mut seen, &mut report);
    }

    debug!(
        pages = document.pages().len(),
        diagnostics = report.diagnostics().len();
        "Validated document"
    );
    report
}

/// Checks the cells of one page in insertion order.
///
/// `seen` carries identifiers across pages so duplicates are caught
/// document-wide.
fn check_page(
    page: &str,
    cells: &[Cell],
    seen: &mut HashSet<CellId>,
    report: &mut ValidationReport,
) {
    let mut constructed: HashMap<CellId, &Cell> = HashMap::new();

    for cell in cells {
        let id = cell.id();

        if id.is_reserved() || !seen.insert(id) {
            report.emit(
                Diagnostic::error(format!("identifier `{id}` is used more than once"))
                    .with_code(ErrorCode::E206)
                    .with_page(page)
                    .with_cell(id),
            );
        }

        check_parent(page, cell, &constructed, report);

        if let Some((source, target)) = cell.endpoints() {
            check_endpoint(page, id, source, ErrorCode::E200, &constructed, report);
            check_endpoint(page, id, target, ErrorCode::E201, &constructed, report);
        }

        let geometry = cell.geometry();
        let bad_bounds = geometry
            .bounds()
            .filter(|bounds| !(bounds.is_finite() && bounds.is_non_negative()));
        if let Some(bounds) = bad_bounds {
            report.emit(
                Diagnostic::error(format!(
                    "cell `{id}` has invalid geometry ({}, {}, {}, {})",
                    bounds.x(),
                    bounds.y(),
                    bounds.width(),
                    bounds.height()
                ))
                .with_code(ErrorCode::E204)
                .with_page(page)
                .with_cell(id)
                .with_help("positions and sizes must be finite and not negative"),
            );
        }

        check_colors(page, cell, report);

        constructed.insert(id, cell);
    }
}

fn check_parent(
    page: &str,
    cell: &Cell,
    constructed: &HashMap<CellId, &Cell>,
    report: &mut ValidationReport,
) {
    let parent = cell.parent();
    if parent.is_reserved() {
        return;
    }

    match constructed.get(&parent) {
        Some(container) if container.is_container() => {}
        Some(_) => report.emit(
            Diagnostic::error(format!(
                "cell `{}` names `{parent}` as parent, which is not a container",
                cell.id()
            ))
            .with_code(ErrorCode::E203)
            .with_page(page)
            .with_cell(cell.id()),
        ),
        None => report.emit(
            Diagnostic::error(format!(
                "cell `{}` names `{parent}` as parent, which is not constructed before it",
                cell.id()
            ))
            .with_code(ErrorCode::E202)
            .with_page(page)
            .with_cell(cell.id())
            .with_help("add the container before its children"),
        ),
    }
}

fn check_endpoint(
    page: &str,
    edge: CellId,
    endpoint: CellId,
    code: ErrorCode,
    constructed: &HashMap<CellId, &Cell>,
    report: &mut ValidationReport,
) {
    if endpoint.is_reserved() {
        return;
    }

    let role = if code == ErrorCode::E200 {
        "source"
    } else {
        "target"
    };

    match constructed.get(&endpoint) {
        Some(cell) if cell.is_edge() => report.emit(
            Diagnostic::error(format!("edge `{edge}` has edge `{endpoint}` as its {role}"))
                .with_code(ErrorCode::E205)
                .with_page(page)
                .with_cell(edge),
        ),
        Some(_) => {}
        None => report.emit(
            Diagnostic::error(format!(
                "edge `{edge}` has {role} `{endpoint}`, which is not on this page before it"
            ))
            .with_code(code)
            .with_page(page)
            .with_cell(edge)
            .with_help(format!("add the {role} cell before the edge or fix the identifier")),
        ),
    }
}

fn check_colors(page: &str, cell: &Cell, report: &mut ValidationReport) {
    for (key, value) in cell.style().entries() {
        let Some(value) = value else { continue };
        if COLOR_KEYS.contains(&key) && !is_valid_color(value) {
            report.emit(
                Diagnostic::warning(format!(
                    "cell `{}` has invalid colour `{value}` for `{key}`",
                    cell.id()
                ))
                .with_code(ErrorCode::W300)
                .with_page(page)
                .with_cell(cell.id()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use mxdraft_core::{geometry::Bounds, style::Style};

    use super::*;

    fn square() -> Bounds {
        Bounds::new(0.0, 0.0, 30.0, 30.0)
    }

    fn codes(cells: &[Cell]) -> Vec<ErrorCode> {
        let mut report = ValidationReport::new();
        check_page("01 - Test", cells, &mut HashSet::new(), &mut report);
        report
            .diagnostics()
            .iter()
            .filter_map(Diagnostic::code)
            .collect()
    }

    fn vertex(id: &str) -> Cell {
        Cell::vertex(
            CellId::new(id),
            CellId::default_layer(),
            square(),
            "",
            Style::default(),
        )
    }

    fn edge(id: &str, source: &str, target: &str) -> Cell {
        Cell::edge(
            CellId::new(id),
            CellId::default_layer(),
            CellId::new(source),
            CellId::new(target),
            "",
            Style::default(),
        )
    }

    #[test]
    fn test_valid_page_has_no_diagnostics() {
        let cells = [vertex("3"), vertex("4"), edge("5", "3", "4")];
        assert!(codes(&cells).is_empty());
    }

    #[test]
    fn test_endpoints_must_precede_the_edge() {
        let cells = [edge("5", "3", "4"), vertex("3"), vertex("4")];
        assert_eq!(codes(&cells), vec![ErrorCode::E200, ErrorCode::E201]);
    }

    #[test]
    fn test_dangling_endpoints() {
        let cells = [vertex("3"), edge("5", "404", "3"), edge("6", "3", "405")];
        assert_eq!(codes(&cells), vec![ErrorCode::E200, ErrorCode::E201]);
    }

    #[test]
    fn test_self_loop_edge_is_unresolved() {
        let cells = [vertex("3"), edge("4", "3", "4")];
        assert_eq!(codes(&cells), vec![ErrorCode::E201]);
    }

    #[test]
    fn test_edge_to_edge() {
        let cells = [vertex("3"), vertex("4"), edge("5", "3", "4"), edge("6", "3", "5")];
        assert_eq!(codes(&cells), vec![ErrorCode::E205]);
    }

    #[test]
    fn test_reserved_endpoints_are_accepted() {
        let cells = [edge("5", "0", "1")];
        assert!(codes(&cells).is_empty());
    }

    #[test]
    fn test_parent_must_be_constructed_container() {
        let container = Cell::container(
            CellId::new("3"),
            CellId::default_layer(),
            square(),
            "",
            Style::default(),
        );
        let child = Cell::vertex(CellId::new("4"), CellId::new("3"), square(), "", Style::default());
        let orphan = Cell::vertex(CellId::new("5"), CellId::new("9"), square(), "", Style::default());
        let under_vertex =
            Cell::vertex(CellId::new("6"), CellId::new("4"), square(), "", Style::default());

        assert_eq!(
            codes(&[container, child, orphan, under_vertex]),
            vec![ErrorCode::E202, ErrorCode::E203]
        );
    }

    #[test]
    fn test_self_parent_is_unresolved() {
        let cell = Cell::container(
            CellId::new("3"),
            CellId::new("3"),
            square(),
            "",
            Style::default(),
        );
        assert_eq!(codes(&[cell]), vec![ErrorCode::E202]);
    }

    #[test]
    fn test_invalid_geometry() {
        let nan = Cell::vertex(
            CellId::new("3"),
            CellId::default_layer(),
            Bounds::new(f64::NAN, 0.0, 10.0, 10.0),
            "",
            Style::default(),
        );
        let negative = Cell::vertex(
            CellId::new("4"),
            CellId::default_layer(),
            Bounds::new(0.0, 0.0, -10.0, 10.0),
            "",
            Style::default(),
        );
        assert_eq!(codes(&[nan, negative]), vec![ErrorCode::E204, ErrorCode::E204]);
    }

    #[test]
    fn test_duplicate_and_reserved_ids() {
        let cells = [vertex("3"), vertex("3"), vertex("1")];
        assert_eq!(codes(&cells), vec![ErrorCode::E206, ErrorCode::E206]);
    }

    #[test]
    fn test_duplicates_across_pages() {
        let mut report = ValidationReport::new();
        let mut seen = HashSet::new();
        check_page("01 - A", &[vertex("3")], &mut seen, &mut report);
        check_page("02 - B", &[vertex("3")], &mut seen, &mut report);

        let diagnostic = &report.diagnostics()[0];
        assert_eq!(diagnostic.code(), Some(ErrorCode::E206));
        assert_eq!(diagnostic.page(), Some("02 - B"));
    }

    #[test]
    fn test_bad_colour_is_a_warning() {
        let cell = Cell::vertex(
            CellId::new("3"),
            CellId::default_layer(),
            square(),
            "",
            Style::new("rounded=1;fillColor=#zzzzzz;strokeColor=none;fontColor=#212121;"),
        );

        let mut report = ValidationReport::new();
        check_page("01 - Test", &[cell], &mut HashSet::new(), &mut report);
        assert!(!report.has_errors());
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.diagnostics()[0].code(), Some(ErrorCode::W300));
    }

    #[test]
    fn test_validate_document() {
        let mut doc = Document::new();
        let page = doc.add_page("Demo");
        let a = doc.add_vertex(page, square(), "", "").unwrap();
        let b = doc.add_vertex(page, square(), "", "").unwrap();
        doc.add_edge(page, a, b, "", None).unwrap();

        let other = doc.add_page("Other");
        doc.add_edge(other, a, b, "", None).unwrap();

        let report = validate(&doc);
        let found: Vec<_> = report
            .diagnostics()
            .iter()
            .map(|diagnostic| (diagnostic.code(), diagnostic.page()))
            .collect();
        assert_eq!(
            found,
            vec![
                (Some(ErrorCode::E200), Some("02 - Other")),
                (Some(ErrorCode::E201), Some("02 - Other")),
            ]
        );
    }
}
