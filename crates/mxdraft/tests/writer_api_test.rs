//! Integration tests for the DocumentWriter API
//!
//! These tests build documents through the public API and check the text
//! written for them.

use indexmap::IndexMap;
use mxdraft::{
    DocumentWriter, MxdraftError,
    config::{AppConfig, FileConfig, ModelConfig, ValidationConfig},
    geometry::Bounds,
    identifier::CellId,
    style::{ShapeCategory, Style},
    validate::ErrorCode,
};

const DEMO: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<mxfile host="app.diagrams.net">
  <diagram name="01 - Demo">
    <mxGraphModel dx="1600" dy="900" grid="1" gridSize="10" page="1" pageWidth="1600" pageHeight="900" math="0" background="#ffffff">
      <root>
        <mxCell id="0"/>
        <mxCell id="1" parent="0"/>
        <mxCell id="3" value="" style="ellipse;" vertex="1" parent="1">
          <mxGeometry x="0" y="0" width="30" height="30" as="geometry"/>
        </mxCell>
        <mxCell id="4" value="Step" style="rounded=1;" vertex="1" parent="1">
          <mxGeometry x="100" y="0" width="180" height="50" as="geometry"/>
        </mxCell>
        <mxCell id="5" value="" style="edgeStyle=orthogonalEdgeStyle;rounded=0;endArrow=block;endFill=1;" edge="1" parent="1" source="3" target="4">
          <mxGeometry relative="1" as="geometry"/>
        </mxCell>
      </root>
    </mxGraphModel>
  </diagram>
</mxfile>
"##;

fn strict_writer() -> DocumentWriter {
    DocumentWriter::new(AppConfig::default().with_strict(true))
}

#[test]
fn test_demo_scenario_output() {
    let writer = DocumentWriter::default();
    let mut doc = writer.new_document();

    let page = doc.add_page("Demo");
    let v1 = doc
        .add_vertex(page, Bounds::new(0.0, 0.0, 30.0, 30.0), "", "ellipse;")
        .expect("Failed to add start");
    let v2 = doc
        .add_vertex(page, Bounds::new(100.0, 0.0, 180.0, 50.0), "Step", "rounded=1;")
        .expect("Failed to add step");
    doc.add_edge(page, v1, v2, "", None)
        .expect("Failed to add edge");

    let text = writer.render(&doc).expect("Failed to render");
    assert_eq!(text, DEMO);
}

#[test]
fn test_demo_scenario_with_registry_styles() {
    let writer = DocumentWriter::default();
    let mut doc = writer.new_document();
    let styles = doc.styles().clone();

    let page = doc.add_page("Demo");
    let v1 = doc
        .add_vertex(page, Bounds::new(0.0, 0.0, 30.0, 30.0), "", styles.get(ShapeCategory::Start))
        .unwrap();
    let v2 = doc
        .add_vertex(
            page,
            Bounds::new(100.0, 0.0, 180.0, 50.0),
            "Step",
            styles.get(ShapeCategory::Action),
        )
        .unwrap();
    let edge = doc.add_edge(page, v1, v2, "", None).unwrap();

    let text = writer.render(&doc).unwrap();
    assert!(text.contains(r#"<diagram name="01 - Demo">"#));
    assert_eq!(text.matches(r#"vertex="1""#).count(), 2);
    assert_eq!(text.matches(r#"edge="1""#).count(), 1);
    assert!(text.contains(&format!(r#"id="{edge}""#)));
    assert!(text.contains(&format!(r#"source="{v1}" target="{v2}""#)));
}

#[test]
fn test_strict_mode_rejects_dangling_edge() {
    let writer = strict_writer();
    let mut doc = writer.new_document();
    let page = doc.add_page("Demo");
    let v1 = doc
        .add_vertex(page, Bounds::new(0.0, 0.0, 30.0, 30.0), "", "")
        .unwrap();
    doc.add_edge(page, v1, CellId::new("999"), "", None)
        .expect("Dangling edges are accepted at construction");

    match writer.render(&doc) {
        Err(MxdraftError::Validation(err)) => {
            let codes: Vec<_> = err.errors().filter_map(|d| d.code()).collect();
            assert_eq!(codes, vec![ErrorCode::E201]);
        }
        other => panic!("Expected a validation error, got {other:?}"),
    }
}

#[test]
fn test_strict_mode_rejects_edge_built_before_its_target() {
    let writer = strict_writer();
    let mut doc = writer.new_document();
    let page = doc.add_page("Demo");
    let v1 = doc
        .add_vertex(page, Bounds::new(0.0, 0.0, 30.0, 30.0), "", "")
        .unwrap();
    let edge = doc.add_edge(page, v1, CellId::new("5"), "", None).unwrap();
    let v2 = doc
        .add_vertex(page, Bounds::new(100.0, 0.0, 30.0, 30.0), "", "")
        .unwrap();
    assert_eq!(edge, "4");
    assert_eq!(v2, "5");

    match writer.render(&doc) {
        Err(MxdraftError::Validation(err)) => {
            let codes: Vec<_> = err.errors().filter_map(|d| d.code()).collect();
            assert_eq!(codes, vec![ErrorCode::E201]);
        }
        other => panic!("Expected a validation error, got {other:?}"),
    }
}

#[test]
fn test_strict_mode_blocks_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invalid.drawio");

    let writer = strict_writer();
    let mut doc = writer.new_document();
    let page = doc.add_page("Demo");
    doc.add_edge(page, CellId::new("998"), CellId::new("999"), "", None)
        .unwrap();

    let result = writer.save(&doc, &path);
    assert!(matches!(result, Err(MxdraftError::Validation(_))));
    assert!(!path.exists(), "Nothing is written for a rejected document");
}

#[test]
fn test_permissive_mode_writes_dangling_edge() {
    let writer = DocumentWriter::default();
    let mut doc = writer.new_document();
    let page = doc.add_page("Demo");
    let v1 = doc
        .add_vertex(page, Bounds::new(0.0, 0.0, 30.0, 30.0), "", "")
        .unwrap();
    doc.add_edge(page, v1, CellId::new("999"), "", None).unwrap();

    let text = writer.render(&doc).expect("Permissive mode does not validate");
    assert!(text.contains(r#"target="999""#));
}

#[test]
fn test_nested_container_cells_are_flat_siblings() {
    let writer = strict_writer();
    let mut doc = writer.new_document();
    let styles = doc.styles().clone();
    let page = doc.add_page("États");

    let container = doc
        .add_container(
            page,
            Bounds::new(560.0, 30.0, 340.0, 200.0),
            "AttentePIN",
            styles.get(ShapeCategory::CompositeState),
        )
        .unwrap();
    let child = doc
        .add_child_vertex(
            page,
            container,
            Bounds::new(50.0, 10.0, 120.0, 50.0),
            "Saisie",
            styles.get(ShapeCategory::State),
        )
        .unwrap();

    let text = writer.render(&doc).expect("Valid document");
    let lines: Vec<&str> = text.lines().collect();

    let container_line = lines
        .iter()
        .position(|line| line.contains(&format!(r#"<mxCell id="{container}""#)))
        .expect("Container element");
    let child_line = lines
        .iter()
        .position(|line| line.contains(&format!(r#"<mxCell id="{child}""#)))
        .expect("Child element");

    // Container element is closed before the child starts, at the same depth.
    assert_eq!(lines[container_line + 2].trim(), "</mxCell>");
    assert!(child_line > container_line + 2);
    let indent = |line: &str| line.len() - line.trim_start().len();
    assert_eq!(indent(lines[container_line]), indent(lines[child_line]));
    assert!(lines[child_line].contains(&format!(r#"parent="{container}""#)));
}

#[test]
fn test_render_is_deterministic() {
    let build = || {
        let writer = DocumentWriter::default();
        let mut doc = writer.new_document();
        for title in ["Un", "Deux"] {
            let page = doc.add_page(title);
            let a = doc
                .add_vertex(page, Bounds::new(10.0, 20.0, 30.5, 40.0), "a & b", "")
                .unwrap();
            let b = doc
                .add_vertex(page, Bounds::new(50.0, 60.0, 70.0, 80.0), "<b>", "")
                .unwrap();
            doc.add_edge(page, a, b, "[ok]", None).unwrap();
        }
        writer.render(&doc).unwrap()
    };

    let first = build();
    assert_eq!(first, build());
    assert!(first.contains(r#"width="30.5""#));
    assert!(first.contains(r#"value="a &amp; b""#));
    assert!(first.contains(r#"value="&lt;b&gt;""#));
}

#[test]
fn test_pages_share_id_space() {
    let writer = DocumentWriter::default();
    let mut doc = writer.new_document();

    let first = doc.add_page("Un");
    doc.add_vertex(first, Bounds::default(), "", "").unwrap();
    let second = doc.add_page("Deux");
    let id = doc.add_vertex(second, Bounds::default(), "", "").unwrap();

    assert_eq!(id, "4");
    let text = writer.render(&doc).unwrap();
    assert_eq!(text.matches(r#"<mxCell id="0"/>"#).count(), 2);
    assert_eq!(text.matches(r#"<mxCell id="1" parent="0"/>"#).count(), 2);
    assert!(text.contains(r#"<diagram name="02 - Deux">"#));
}

#[test]
fn test_save_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.drawio");

    let writer = DocumentWriter::default();
    let mut doc = writer.new_document();
    doc.add_page("Demo");

    let written = writer.save(&doc, &path).expect("Failed to save");
    assert_eq!(written, path);

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, writer.render(&doc).unwrap());
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("demo.drawio");

    let writer = DocumentWriter::default();
    let doc = writer.new_document();

    let result = writer.save(&doc, &path);
    assert!(matches!(result, Err(MxdraftError::Io(_))));
}

#[test]
fn test_config_overrides() {
    let mut styles = IndexMap::new();
    styles.insert(ShapeCategory::Connector, Style::new("endArrow=open;"));
    let config = AppConfig::new(
        FileConfig::new("mxdraft"),
        ModelConfig::default().with_background("none"),
        styles,
        ValidationConfig::new(false),
    );

    let writer = DocumentWriter::new(config);
    let mut doc = writer.new_document();
    let page = doc.add_page("Demo");
    let a = doc.add_vertex(page, Bounds::default(), "", "").unwrap();
    doc.add_edge(page, a, a, "", None).unwrap();

    let text = writer.render(&doc).unwrap();
    assert!(text.contains(r#"<mxfile host="mxdraft">"#));
    assert!(text.contains(r#"background="none""#));
    assert!(text.contains(r#"style="endArrow=open;" edge="1""#));
}

#[test]
fn test_invalid_background_is_an_export_error() {
    let config = AppConfig::new(
        FileConfig::default(),
        ModelConfig::default().with_background("nope"),
        IndexMap::new(),
        ValidationConfig::default(),
    );

    let writer = DocumentWriter::new(config);
    let result = writer.render(&writer.new_document());
    assert!(matches!(result, Err(MxdraftError::Export(_))));
}
