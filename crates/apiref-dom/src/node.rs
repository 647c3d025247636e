//! Tree nodes
//!
//! Three node flavours: elements, plain text (escaped on serialization)
//! and raw HTML (backend-provided markup such as descriptions and demo
//! links, inserted verbatim).

use crate::NodeId;

/// One node in the arena.
#[derive(Debug)]
pub struct Node {
    /// Parent node (`NONE` for the root).
    pub parent: NodeId,
    /// Child nodes in document order.
    pub children: Vec<NodeId>,
    /// Node-specific data.
    pub data: NodeData,
}

impl Node {
    pub fn element(tag: &str) -> Self {
        Self {
            parent: NodeId::NONE,
            children: Vec::new(),
            data: NodeData::Element(ElementData::new(tag)),
        }
    }

    pub fn text(content: String) -> Self {
        Self {
            parent: NodeId::NONE,
            children: Vec::new(),
            data: NodeData::Text(content),
        }
    }

    pub fn raw_html(markup: String) -> Self {
        Self {
            parent: NodeId::NONE,
            children: Vec::new(),
            data: NodeData::RawHtml(markup),
        }
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(content) => Some(content),
            _ => None,
        }
    }
}

/// Node-specific data.
#[derive(Debug)]
pub enum NodeData {
    Element(ElementData),
    /// Text content, HTML-escaped when serialized.
    Text(String),
    /// Markup inserted verbatim when serialized.
    RawHtml(String),
}

/// Element-specific data.
#[derive(Debug)]
pub struct ElementData {
    /// Tag name.
    pub tag: String,
    /// The id attribute. Unique globally for structural elements, unique
    /// per section for member fragments.
    pub id: Option<String>,
    /// Class list.
    pub classes: Vec<String>,
    /// Other attributes in insertion order.
    pub attrs: Vec<(String, String)>,
    /// Display toggle; hidden elements serialize with `display:none`.
    pub hidden: bool,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            hidden: false,
        }
    }

    /// Get an attribute value.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        for (key, existing) in self.attrs.iter_mut() {
            if key == name {
                *existing = value.to_string();
                return;
            }
        }
        self.attrs.push((name.to_string(), value.to_string()));
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_replacement() {
        let mut element = ElementData::new("a");
        element.set_attr("href", "/highcharts/chart");
        element.set_attr("href", "/highcharts/chart.type");
        assert_eq!(element.get_attr("href"), Some("/highcharts/chart.type"));
        assert_eq!(element.attrs.len(), 1);
    }

    #[test]
    fn test_class_list() {
        let mut element = ElementData::new("div");
        element.add_class("menuitem");
        element.add_class("collapsed");
        element.add_class("collapsed");
        assert_eq!(element.classes.len(), 2);

        element.remove_class("collapsed");
        assert!(!element.has_class("collapsed"));
        assert!(element.has_class("menuitem"));
    }
}
