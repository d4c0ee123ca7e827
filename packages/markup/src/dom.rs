use serde::{Deserialize, Serialize};

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// A node in a parsed or generated markup tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DomNode {
    Element(DomElement),
    Text { content: String },
}

impl DomNode {
    pub fn text(content: impl Into<String>) -> Self {
        DomNode::Text {
            content: content.into(),
        }
    }

    pub fn as_element(&self) -> Option<&DomElement> {
        match self {
            DomNode::Element(element) => Some(element),
            DomNode::Text { .. } => None,
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            DomNode::Text { content } => content.clone(),
            DomNode::Element(element) => element.text_content(),
        }
    }
}

impl From<DomElement> for DomNode {
    fn from(element: DomElement) -> Self {
        DomNode::Element(element)
    }
}

/// An HTML element.
///
/// Tag names are stored lower-cased. Attributes keep insertion order so the
/// serialized form is stable; lookups ignore ASCII case, as HTML does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<DomNode>,
}

impl DomElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<DomNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = DomNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set an attribute, replacing any existing value under the same name
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self
            .attributes
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self
            .attributes
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))?;
        Some(self.attributes.remove(index).1)
    }

    pub fn is_void(&self) -> bool {
        is_void_element(&self.tag)
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(DomNode::text_content).collect()
    }
}
