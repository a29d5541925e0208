//! Owned, mutable SVG element tree.
//!
//! The document parser rewrites the tree in place (`<use>` inlining, viewport wrappers), so
//! nodes live in an arena addressed by [`NodeId`]. Detached nodes stay in the arena but are
//! unreachable from the root.

use crate::foundation::error::SvgMotionResult;

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Arena index of a document node.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub usize);

#[derive(Clone, Debug)]
struct NodeData {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// An element-only SVG document tree.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

/// Borrowed view of one element.
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    doc: &'a Document,
    id: NodeId,
}

/// Strip an `svg:` prefix, if any.
pub fn local_tag(tag: &str) -> &str {
    tag.strip_prefix("svg:").unwrap_or(tag)
}

impl Document {
    /// Create a document holding only a root element.
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            nodes: vec![NodeData::new(root_tag)],
            root: NodeId(0),
        }
    }

    /// Parse SVG markup with `roxmltree` and import the element tree.
    pub fn parse_str(xml: &str) -> SvgMotionResult<Self> {
        let doc = roxmltree::Document::parse(xml)?;
        Ok(Self::from_roxmltree(&doc))
    }

    /// Import an already parsed XML tree. Comments and processing instructions are dropped;
    /// text is kept on the enclosing element.
    pub fn from_roxmltree(doc: &roxmltree::Document<'_>) -> Self {
        let root_el = doc.root_element();
        let mut out = Self::new(root_el.tag_name().name());
        let root = out.root;
        out.import_node(root, root_el);
        out
    }

    fn import_node(&mut self, id: NodeId, node: roxmltree::Node<'_, '_>) {
        for attr in node.attributes() {
            let name = match attr.namespace() {
                Some(XLINK_NS) => format!("xlink:{}", attr.name()),
                Some(XML_NS) => format!("xml:{}", attr.name()),
                _ => attr.name().to_owned(),
            };
            self.nodes[id.0].attributes.push((name, attr.value().to_owned()));
        }
        for child in node.children() {
            if child.is_element() {
                let child_id = self.create_element(child.tag_name().name());
                self.append_child(id, child_id);
                self.import_node(child_id, child);
            } else if let Some(text) = child.text().filter(|_| child.is_text()) {
                self.nodes[id.0].text.push_str(text);
            }
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn element(&self, id: NodeId) -> Element<'_> {
        Element { doc: self, id }
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        &self.nodes[id.0].attributes
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0]
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace an attribute, keeping the position of an existing one.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let value = value.into();
        let attrs = &mut self.nodes[id.0].attributes;
        match attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => attrs.push((name.to_owned(), value)),
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        self.nodes[id.0].attributes.retain(|(k, _)| k != name);
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.nodes.push(NodeData::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    /// Append `child` to `parent`, detaching it from its previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Put `new` where `old` is and detach `old`. No-op when `old` has no parent.
    pub fn replace_child(&mut self, old: NodeId, new: NodeId) {
        let Some(parent) = self.nodes[old.0].parent else {
            return;
        };
        self.detach(new);
        let children = &mut self.nodes[parent.0].children;
        if let Some(slot) = children.iter_mut().find(|c| **c == old) {
            *slot = new;
        }
        self.nodes[new.0].parent = Some(parent);
        self.nodes[old.0].parent = None;
    }

    /// Remove `id` from its parent's child list.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    /// Move every child of `id` under a new element `tag`, which becomes `id`'s only child.
    pub fn wrap_children(&mut self, id: NodeId, tag: &str) -> NodeId {
        let wrapper = self.create_element(tag);
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for c in &children {
            self.nodes[c.0].parent = Some(wrapper);
        }
        self.nodes[wrapper.0].children = children;
        self.nodes[wrapper.0].parent = Some(id);
        self.nodes[id.0].children.push(wrapper);
        wrapper
    }

    /// Deep copy the subtree at `id`; the copy is detached.
    pub fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let mut data = self.nodes[id.0].clone();
        let children = std::mem::take(&mut data.children);
        data.parent = None;
        self.nodes.push(data);
        let copy = NodeId(self.nodes.len() - 1);
        for child in children {
            let child_copy = self.deep_clone(child);
            self.nodes[child_copy.0].parent = Some(copy);
            self.nodes[copy.0].children.push(child_copy);
        }
        copy
    }

    /// Pre-order descendants of `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |n| self.parent(*n))
    }

    /// First attached element (document order, root included) with the given `id` attribute.
    pub fn get_element_by_id(&self, value: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|n| self.attribute(*n, "id") == Some(value))
    }

    /// Attached elements with the given local tag name, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|n| local_tag(self.tag(*n)) == tag)
            .collect()
    }
}

impl<'a> Element<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Local tag name (`svg:` prefix stripped).
    pub fn tag(&self) -> &'a str {
        local_tag(self.doc.tag(self.id))
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.doc.attribute(self.id, name)
    }

    /// Attribute value, ignoring empty strings.
    pub fn non_empty_attribute(&self, name: &str) -> Option<&'a str> {
        self.attribute(name).filter(|v| !v.trim().is_empty())
    }

    pub fn text(&self) -> &'a str {
        self.doc.text(self.id)
    }

    pub fn parent(&self) -> Option<Element<'a>> {
        self.doc.parent(self.id).map(|p| self.doc.element(p))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parser/dom.rs"]
mod tests;
