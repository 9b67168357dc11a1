//! Property tests over randomly assembled documents.

use std::collections::HashSet;

use proptest::prelude::*;
use regex::Regex;

use mxdraft::{
    Document, DocumentWriter, PageHandle,
    cell::CellKind,
    geometry::Bounds,
    identifier::CellId,
    validate,
};

/// One construction call against the current page.
#[derive(Debug, Clone)]
enum Op {
    Page(String),
    Vertex(Bounds, String),
    Container(Bounds),
    Child(usize, Bounds),
    Edge(usize, usize),
}

fn bounds() -> impl Strategy<Value = Bounds> {
    (0u16..2000, 0u16..2000, 1u16..400, 1u16..400).prop_map(|(x, y, w, h)| {
        Bounds::new(f64::from(x), f64::from(y), f64::from(w) / 2.0, f64::from(h))
    })
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => "[A-Za-zÉé ]{1,12}".prop_map(Op::Page),
        4 => (bounds(), "[a-z<>&\" ]{0,8}").prop_map(|(b, label)| Op::Vertex(b, label)),
        2 => bounds().prop_map(Op::Container),
        2 => (any::<usize>(), bounds()).prop_map(|(parent, b)| Op::Child(parent, b)),
        4 => (any::<usize>(), any::<usize>()).prop_map(|(s, t)| Op::Edge(s, t)),
    ]
}

/// Replays `ops`; edges and children only pick cells of the current page.
fn build(ops: &[Op]) -> Document {
    let mut doc = Document::new();
    let mut page: PageHandle = doc.add_page("Start");
    let mut shapes: Vec<CellId> = Vec::new();
    let mut containers: Vec<CellId> = Vec::new();

    for op in ops {
        match op {
            Op::Page(title) => {
                page = doc.add_page(title);
                shapes.clear();
                containers.clear();
            }
            Op::Vertex(b, label) => {
                shapes.push(doc.add_vertex(page, *b, label, "rounded=1;").unwrap());
            }
            Op::Container(b) => {
                let id = doc.add_container(page, *b, "", "container=1;").unwrap();
                shapes.push(id);
                containers.push(id);
            }
            Op::Child(parent, b) => {
                if containers.is_empty() {
                    continue;
                }
                let parent = containers[parent % containers.len()];
                shapes.push(doc.add_child_vertex(page, parent, *b, "", "").unwrap());
            }
            Op::Edge(s, t) => {
                if shapes.is_empty() {
                    continue;
                }
                let source = shapes[s % shapes.len()];
                let target = shapes[t % shapes.len()];
                doc.add_edge(page, source, target, "", None).unwrap();
            }
        }
    }
    doc
}

proptest! {
    #[test]
    fn ids_are_unique_and_never_reserved(ops in prop::collection::vec(op(), 0..60)) {
        let doc = build(&ops);
        let mut seen = HashSet::new();

        for cell in doc.cells() {
            prop_assert!(!cell.id().is_reserved());
            prop_assert!(seen.insert(cell.id()));
        }
    }

    #[test]
    fn built_documents_validate_clean(ops in prop::collection::vec(op(), 0..60)) {
        let doc = build(&ops);
        let report = validate::validate(&doc);
        prop_assert!(!report.has_errors(), "{:?}", report.diagnostics());
    }

    #[test]
    fn parents_are_earlier_containers(ops in prop::collection::vec(op(), 0..60)) {
        let doc = build(&ops);

        for page in doc.pages() {
            let mut containers = HashSet::new();
            for cell in page.cells() {
                let parent = cell.parent();
                prop_assert!(parent.is_reserved() || containers.contains(&parent));
                if let CellKind::Container { .. } = cell.kind() {
                    containers.insert(cell.id());
                }
            }
        }
    }

    #[test]
    fn rendering_is_deterministic(ops in prop::collection::vec(op(), 0..60)) {
        let writer = DocumentWriter::default();
        let first = writer.render(&build(&ops)).unwrap();
        let second = writer.render(&build(&ops)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn geometry_is_complete(ops in prop::collection::vec(op(), 0..60)) {
        let doc = build(&ops);
        let text = DocumentWriter::default().render(&doc).unwrap();

        let vertex_geometry = Regex::new(
            r#"^\s*<mxGeometry x="[0-9.]+" y="[0-9.]+" width="[0-9.]+" height="[0-9.]+" as="geometry"/>$"#,
        ).unwrap();
        let edge_geometry = Regex::new(r#"^\s*<mxGeometry relative="1" as="geometry"/>$"#).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        let mut vertices = 0;
        let mut edges = 0;
        for (index, line) in lines.iter().enumerate() {
            if line.contains(r#"vertex="1""#) {
                vertices += 1;
                prop_assert!(vertex_geometry.is_match(lines[index + 1]), "{}", lines[index + 1]);
            } else if line.contains(r#"edge="1""#) {
                edges += 1;
                prop_assert!(edge_geometry.is_match(lines[index + 1]), "{}", lines[index + 1]);
            }
        }

        let expected_edges = doc.cells().filter(|cell| cell.is_edge()).count();
        prop_assert_eq!(edges, expected_edges);
        prop_assert_eq!(vertices, doc.cell_count() - expected_edges);
    }
}
