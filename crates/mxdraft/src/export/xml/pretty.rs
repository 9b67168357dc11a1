//! Deterministic, indented text output of an element tree.

use std::{borrow::Cow, fmt::Display};

use quick_xml::{
    Writer,
    escape::escape,
    events::{BytesDecl, BytesEnd, BytesStart, Event, attributes::Attribute},
    name::QName,
};

use crate::export::{self, xml::Element};

const INDENT: usize = 2;

fn xml_error(err: impl Display) -> export::Error {
    export::Error::Render(format!("XML write failed: {err}"))
}

/// Writes `root` as an XML document.
///
/// The output starts with a UTF-8 declaration, indents nested elements by
/// two spaces, self-closes childless elements, and ends with a newline.
/// Attribute values are escaped; attribute order is kept.
pub fn pretty_print(root: &Element) -> Result<String, export::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    write_element(&mut writer, root)?;

    let mut text = String::from_utf8(writer.into_inner()).map_err(xml_error)?;
    text.push('\n');
    Ok(text)
}

/// Escapes an attribute value, keeping line breaks as character references.
///
/// C0 control characters other than tab, line feed, and carriage return
/// cannot appear in XML 1.0, even as references, and are dropped.
fn escape_attribute(value: &str) -> String {
    let value: Cow<'_, str> = if value.chars().any(is_forbidden_control) {
        Cow::Owned(value.chars().filter(|c| !is_forbidden_control(*c)).collect())
    } else {
        Cow::Borrowed(value)
    };

    escape(value.as_ref())
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

fn is_forbidden_control(c: char) -> bool {
    matches!(c, '\0'..='\u{1f}') && !matches!(c, '\t' | '\n' | '\r')
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), export::Error> {
    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Owned(escape_attribute(value).into_bytes()),
        });
    }

    if element.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(xml_error);
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    for child in element.child_elements() {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name())))
        .map_err(xml_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_and_indent() {
        let root = Element::new("root")
            .child(Element::new("mxCell").attr("id", "0"))
            .child(
                Element::new("mxCell")
                    .attr("id", "1")
                    .attr("parent", "0"),
            );

        let text = pretty_print(&root).unwrap();
        assert_eq!(
            text,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <root>\n  \
             <mxCell id=\"0\"/>\n  \
             <mxCell id=\"1\" parent=\"0\"/>\n\
             </root>\n"
        );
    }

    #[test]
    fn test_nested_indent() {
        let root = Element::new("a").child(Element::new("b").child(Element::new("c")));

        let text = pretty_print(&root).unwrap();
        assert!(text.contains("\n  <b>\n    <c/>\n  </b>\n</a>\n"));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let root = Element::new("mxCell").attr("value", "[solde < montant] & \"ok\"");

        let text = pretty_print(&root).unwrap();
        assert!(text.contains("value=\"[solde &lt; montant] &amp; &quot;ok&quot;\""));
    }

    #[test]
    fn test_line_breaks_survive_in_attributes() {
        let root = Element::new("mxCell").attr("value", "«receiveSignal»\nSignal: ModeMaintenance");

        let text = pretty_print(&root).unwrap();
        assert!(text.contains("value=\"«receiveSignal»&#10;Signal: ModeMaintenance\""));
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let root = Element::new("mxCell").attr("value", "a\u{c}b\u{1}\tc");

        let text = pretty_print(&root).unwrap();
        assert!(text.contains("value=\"ab&#9;c\""));
        assert!(!text.chars().any(|c| c == '\u{c}' || c == '\u{1}'));
    }

    #[test]
    fn test_output_is_deterministic() {
        let root = Element::new("mxfile")
            .attr("host", "app.diagrams.net")
            .child(Element::new("diagram").attr("name", "01 - Demo"));

        assert_eq!(pretty_print(&root).unwrap(), pretty_print(&root).unwrap());
    }
}
