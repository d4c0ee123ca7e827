use crate::conversion::{DomConversion, DomConversionMap, DomConversionOutput};
use crate::format::ElementFormat;
use crate::key::NodeKey;
use crate::node::{DocumentNode, Node, NodeType};
use crate::serialized::{SerializedNode, SerializedParagraphNode};
use vellum_markup::{DomElement, DomNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphNode {
    key: NodeKey,
    pub(crate) format: ElementFormat,
    indent: u32,
}

impl ParagraphNode {
    pub fn new() -> Self {
        Self {
            key: NodeKey::generate(),
            format: ElementFormat::None,
            indent: 0,
        }
    }

    pub fn with_format(mut self, format: ElementFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format(&self) -> ElementFormat {
        self.format
    }

    pub fn indent(&self) -> u32 {
        self.indent
    }

    pub fn import_json(record: &SerializedParagraphNode) -> Self {
        Self {
            key: NodeKey::generate(),
            format: record.format,
            indent: record.indent,
        }
    }
}

impl Default for ParagraphNode {
    fn default() -> Self {
        Self::new()
    }
}

/// Alignment from `style="text-align: …"`, falling back to the legacy `align` attribute
fn alignment_of(element: &DomElement) -> ElementFormat {
    let from_style = element.get_attribute("style").and_then(|style| {
        style.split(';').find_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            if property.trim().eq_ignore_ascii_case("text-align") {
                value.parse::<ElementFormat>().ok()
            } else {
                None
            }
        })
    });

    from_style
        .or_else(|| element.get_attribute("align").and_then(|a| a.parse().ok()))
        .unwrap_or_default()
}

fn convert_paragraph_element(element: &DomElement) -> Option<DomConversionOutput> {
    let paragraph = ParagraphNode::new().with_format(alignment_of(element));
    Some(DomConversionOutput {
        node: Some(Node::Paragraph(paragraph)),
    })
}

fn match_paragraph(_: &DomElement) -> Option<DomConversion> {
    Some(DomConversion {
        conversion: convert_paragraph_element,
        priority: 0,
    })
}

impl DocumentNode for ParagraphNode {
    fn key(&self) -> &NodeKey {
        &self.key
    }

    fn node_type(&self) -> NodeType {
        NodeType::Paragraph
    }

    fn text_content(&self) -> String {
        String::new()
    }

    fn export_json(&self) -> SerializedNode {
        SerializedNode::Paragraph(SerializedParagraphNode {
            children: Vec::new(),
            direction: None,
            format: self.format,
            indent: self.indent,
            version: 1,
        })
    }

    fn export_dom(&self) -> DomNode {
        let mut element = DomElement::new("p");
        if !self.format.is_none() {
            element.set_attribute("style", format!("text-align: {};", self.format));
        }
        DomNode::Element(element)
    }

    fn import_dom() -> DomConversionMap {
        DomConversionMap::new().with("p", match_paragraph)
    }

    fn update_dom(&self, _previous: &Self) -> bool {
        true
    }

    fn can_have_children(&self) -> bool {
        true
    }
}
