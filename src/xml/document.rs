//! Owned XML document built with a quick-xml pull reader.
//!
//! ## Design
//!
//! All nodes live in one flat arena indexed by [`NodeId`]. A [`Node`] is a
//! `Copy` handle pairing the arena with an index, so traversals hand out
//! handles instead of references into the tree.
//!
//! ```text
//! Document
//! ├── nodes: Vec<NodeData>   (document order, parents before children)
//! └── root: Option<NodeId>
//! ```

use std::fmt;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::XmiError;

// ============================================================================
// IDS
// ============================================================================

/// Index of an element node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

// ============================================================================
// DOCUMENT
// ============================================================================

/// A parsed XML document holding element nodes only.
///
/// Text and CDATA directly inside an element are concatenated into that
/// element's text; comments and processing instructions are dropped.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
}

impl Document {
    /// Parse a document from a string.
    pub fn parse_str(input: &str) -> Result<Self, XmiError> {
        Self::parse_bytes(input.as_bytes())
    }

    /// Parse a document from raw bytes.
    ///
    /// Non-well-formed input is fatal and reported with the reader position.
    pub fn parse_bytes(input: &[u8]) -> Result<Self, XmiError> {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(true);

        let mut doc = Document::default();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let id = doc.push_element(e, stack.last().copied())?;
                    stack.push(id);
                }
                Ok(Event::Empty(ref e)) => {
                    doc.push_element(e, stack.last().copied())?;
                }
                Ok(Event::End(_)) => {
                    stack.pop();
                }
                Ok(Event::Text(e)) => {
                    if let Some(&current) = stack.last() {
                        let text = e.unescape().map_err(|e| {
                            XmiError::xml(format!(
                                "Text error at position {}: {e}",
                                reader.buffer_position()
                            ))
                        })?;
                        doc.append_text(current, &text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(&current) = stack.last() {
                        doc.append_text(current, &String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(XmiError::xml(format!(
                        "XML parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        if let Some(&open) = stack.last() {
            return Err(XmiError::xml(format!(
                "Unclosed element <{}> at end of input",
                doc.nodes[open.index()].tag
            )));
        }

        tracing::trace!(nodes = doc.nodes.len(), "parsed XML document");
        Ok(doc)
    }

    fn push_element(
        &mut self,
        e: &BytesStart<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, XmiError> {
        let tag = std::str::from_utf8(e.name().as_ref())
            .map_err(|e| XmiError::xml(format!("Invalid tag name: {e}")))?
            .to_string();

        let mut attributes = Vec::new();
        for attr_result in e.attributes() {
            let attr =
                attr_result.map_err(|e| XmiError::xml(format!("Attribute error: {e}")))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| XmiError::xml(format!("Attribute key error: {e}")))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| XmiError::xml(format!("Attribute value error: {e}")))?
                .to_string();
            attributes.push((key, value));
        }

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            tag,
            attributes,
            text: None,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p.index()].children.push(id),
            None => {
                if self.root.is_none() {
                    self.root = Some(id);
                }
            }
        }
        Ok(id)
    }

    fn append_text(&mut self, id: NodeId, text: &str) {
        let slot = &mut self.nodes[id.index()].text;
        match slot {
            Some(existing) => existing.push_str(text),
            None => *slot = Some(text.to_string()),
        }
    }

    /// The document element, if any.
    pub fn root(&self) -> Option<Node<'_>> {
        self.root.map(|id| Node { doc: self, id })
    }

    /// Handle for a node id taken from this document.
    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node { doc: self, id }
    }

    /// Number of element nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First element with the given tag anywhere in the document,
    /// the document element included.
    pub fn find_first(&self, tag: &str) -> Option<Node<'_>> {
        self.nodes
            .iter()
            .position(|n| n.tag == tag)
            .map(|i| self.node(NodeId(i as u32)))
    }
}

// ============================================================================
// NODE HANDLE
// ============================================================================

/// A borrowed handle to one element of a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'d> {
    doc: &'d Document,
    id: NodeId,
}

impl<'d> Node<'d> {
    fn data(&self) -> &'d NodeData {
        &self.doc.nodes[self.id.index()]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'d Document {
        self.doc
    }

    /// The qualified tag name, prefix included (`UML:Class`).
    pub fn tag(&self) -> &'d str {
        &self.data().tag
    }

    /// True if the tag is one of `tags`.
    pub fn is(&self, tags: &[&str]) -> bool {
        tags.contains(&self.tag())
    }

    /// Attribute value, untrimmed.
    pub fn attr(&self, name: &str) -> Option<&'d str> {
        self.data()
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Text directly inside this element.
    pub fn text(&self) -> Option<&'d str> {
        self.data().text.as_deref()
    }

    pub fn parent(&self) -> Option<Node<'d>> {
        self.data().parent.map(|id| self.doc.node(id))
    }

    /// Element children in document order.
    pub fn children(&self) -> impl Iterator<Item = Node<'d>> + 'd {
        let doc = self.doc;
        self.data().children.iter().map(move |&id| doc.node(id))
    }

    /// All element descendants in document order, excluding this node.
    pub fn descendants(&self) -> Descendants<'d> {
        let mut stack: Vec<NodeId> = self.data().children.clone();
        stack.reverse();
        Descendants {
            doc: self.doc,
            stack,
        }
    }

    /// Short description used in diagnostics: the tag plus `xmi.id` when present.
    pub fn describe(&self) -> String {
        match self.attr("xmi.id") {
            Some(id) if !id.trim().is_empty() => format!("{}#{}", self.tag(), id.trim()),
            _ => self.tag().to_string(),
        }
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({}@{})", self.describe(), self.id.0)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct Descendants<'d> {
    doc: &'d Document,
    stack: Vec<NodeId>,
}

impl<'d> Iterator for Descendants<'d> {
    type Item = Node<'d>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let data = &self.doc.nodes[id.index()];
        self.stack.extend(data.children.iter().rev().copied());
        Some(self.doc.node(id))
    }
}
