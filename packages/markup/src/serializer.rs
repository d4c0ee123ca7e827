//! HTML writer for [`DomNode`] trees.

use crate::dom::{DomElement, DomNode};
use crate::entities::{escape_attribute, escape_text};

struct Context {
    buffer: String,
}

impl Context {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize nodes to compact HTML
pub fn serialize(nodes: &[DomNode]) -> String {
    let mut ctx = Context::new();
    for node in nodes {
        write_node(node, &mut ctx);
    }
    ctx.get_output()
}

impl DomElement {
    pub fn to_html(&self) -> String {
        let mut ctx = Context::new();
        write_element(self, &mut ctx);
        ctx.get_output()
    }
}

fn write_node(node: &DomNode, ctx: &mut Context) {
    match node {
        DomNode::Element(element) => write_element(element, ctx),
        DomNode::Text { content } => ctx.add(&escape_text(content)),
    }
}

fn write_element(element: &DomElement, ctx: &mut Context) {
    ctx.add("<");
    ctx.add(&element.tag);

    for (name, value) in &element.attributes {
        ctx.add(" ");
        ctx.add(name);
        ctx.add("=\"");
        ctx.add(&escape_attribute(value));
        ctx.add("\"");
    }

    ctx.add(">");

    if element.is_void() {
        return;
    }

    for child in &element.children {
        write_node(child, ctx);
    }

    ctx.add("</");
    ctx.add(&element.tag);
    ctx.add(">");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_serialize_element_with_attributes() {
        let video = DomElement::new("video")
            .with_attribute("data-lexical-Video", "https://x/y.mp4")
            .with_attribute("src", "https://x/y.mp4");

        assert_eq!(
            video.to_html(),
            r#"<video data-lexical-Video="https://x/y.mp4" src="https://x/y.mp4"></video>"#
        );
    }

    #[test]
    fn test_serialize_escapes_text_and_attributes() {
        let p = DomElement::new("p")
            .with_attribute("title", "\"quoted\"")
            .with_child(DomNode::text("a < b & c"));

        assert_eq!(
            serialize(&[DomNode::from(p)]),
            r#"<p title="&quot;quoted&quot;">a &lt; b &amp; c</p>"#
        );
    }

    #[test]
    fn test_void_elements_have_no_close_tag() {
        let p = DomElement::new("p")
            .with_child(DomNode::text("line"))
            .with_child(DomElement::new("br"));

        assert_eq!(p.to_html(), "<p>line<br></p>");
    }

    #[test]
    fn test_parse_reads_back_serialized_tree() {
        let tree = vec![
            DomNode::Element(
                DomElement::new("p")
                    .with_child(DomNode::text("Tom & Jerry"))
                    .with_child(DomElement::new("br")),
            ),
            DomNode::Element(DomElement::new("video").with_attribute("src", "a?b=1&c=2")),
        ];

        let reparsed = parse(&serialize(&tree)).unwrap();
        assert_eq!(reparsed, tree);
    }
}
