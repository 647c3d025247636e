//! Element tree (arena-based allocation)

use crate::{ElementData, Node, NodeData, NodeId};

/// Arena-based element tree.
///
/// Created with a single root element; every other node is attached with
/// [`DomTree::append_child`]. Lookups on stale or foreign ids return
/// `None` rather than panicking.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the root element.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::element("root")],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached element carrying an id attribute.
    pub fn create_element_with_id(&mut self, tag: &str, id: &str) -> NodeId {
        let node = self.create_element(tag);
        self.set_id(node, id);
        node
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached node holding verbatim markup.
    pub fn create_raw_html(&mut self, markup: &str) -> NodeId {
        self.push(Node::raw_html(markup.to_string()))
    }

    /// Attach `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() {
            tracing::warn!(?parent, ?child, "append_child on missing node");
            return;
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Drop every child of `parent` from the tree structure.
    ///
    /// Arena slots are not reclaimed; the nodes just become unreachable.
    pub fn clear_children(&mut self, parent: NodeId) {
        if let Some(node) = self.get_mut(parent) {
            node.children.clear();
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id)?.parent;
        parent.is_valid().then_some(parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        if let Some(element) = self.element_mut(node) {
            element.id = Some(id.to_string());
        }
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.set_attr(name, value);
        }
    }

    pub fn attr<'a>(&'a self, node: NodeId, name: &str) -> Option<&'a str> {
        self.element(node)?.get_attr(name)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            element.add_class(class);
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            element.remove_class(class);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|element| element.has_class(class))
    }

    pub fn hide(&mut self, node: NodeId) {
        if let Some(element) = self.element_mut(node) {
            element.hidden = true;
        }
    }

    pub fn show(&mut self, node: NodeId) {
        if let Some(element) = self.element_mut(node) {
            element.hidden = false;
        }
    }

    /// Hidden flag of the node itself.
    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|element| element.hidden)
    }

    /// True when neither the node nor any ancestor is hidden.
    pub fn is_effectively_visible(&self, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if self.is_hidden(id) {
                return false;
            }
            cursor = self.parent(id);
        }
        true
    }

    /// Find an element by id anywhere in the tree.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.element_by_id_in(self.root(), id)
    }

    /// Find an element by id within the subtree rooted at `scope`
    /// (inclusive). Member fragments reuse local names per section, so
    /// callers scope those lookups to the owning section.
    pub fn element_by_id_in(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.find(scope, &mut |element| element.id.as_deref() == Some(id))
    }

    /// Find the first element carrying `class` within `scope` (inclusive).
    pub fn element_by_class_in(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.find(scope, &mut |element| element.has_class(class))
    }

    /// Find the first element within `scope` whose attribute `name`
    /// equals `value`.
    pub fn element_by_attr_in(&self, scope: NodeId, name: &str, value: &str) -> Option<NodeId> {
        self.find(scope, &mut |element| element.get_attr(name) == Some(value))
    }

    fn find(
        &self,
        scope: NodeId,
        matches: &mut dyn FnMut(&ElementData) -> bool,
    ) -> Option<NodeId> {
        if self.element(scope).is_some_and(|element| matches(element)) {
            return Some(scope);
        }
        for &child in self.children(scope) {
            if let Some(found) = self.find(child, matches) {
                return Some(found);
            }
        }
        None
    }

    /// Concatenated text content of the subtree, raw HTML excluded.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        if let Some(text) = self.get(node).and_then(Node::as_text) {
            out.push_str(text);
        }
        for &child in self.children(node) {
            self.collect_text(child, out);
        }
    }

    /// Serialize the subtree rooted at `node` to HTML.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Text(content) => out.push_str(&escape_text(content)),
            NodeData::RawHtml(markup) => out.push_str(markup),
            NodeData::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                if let Some(dom_id) = &element.id {
                    out.push_str(&format!(" id=\"{}\"", escape_attr(dom_id)));
                }
                if !element.classes.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", escape_attr(&element.classes.join(" "))));
                }
                for (name, value) in &element.attrs {
                    out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
                }
                if element.hidden {
                    out.push_str(" style=\"display:none\"");
                }
                if node.children.is_empty() && is_void_tag(&element.tag) {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for &child in &node.children {
                    self.write_html(child, out);
                }
                out.push_str(&format!("</{}>", element.tag));
            }
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

fn is_void_tag(tag: &str) -> bool {
    matches!(tag, "br" | "hr" | "img" | "input" | "meta" | "link")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
