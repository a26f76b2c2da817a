//! Per-parse registries.
//!
//! A [`ParseContext`] is created by every parse call and dropped when the
//! graph is handed out. It holds the source-node registries filled before
//! construction starts (datatypes, stereotypes, tag definitions), the
//! element index filled by the builder, and the links the builder defers to
//! the second pass.
//!
//! Keys of profile documents carry the profile key and `#` in front of the
//! document's own id, so the primary and every profile share one key space.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::dialect::{Dialect, joined};
use crate::error::XmiError;
use crate::model::{ElementId, ElementRef};
use crate::xml::{Node, Scope};

// ============================================================================
// DEFERRED LINKS
// ============================================================================

/// A state whose incoming/outgoing transition references wait for pass 2.
#[derive(Debug, Clone)]
pub(crate) struct PendingVertex {
    pub state: ElementRef,
    pub outgoing: Vec<String>,
    pub incoming: Vec<String>,
}

/// A state machine waiting for its classes and its placement.
#[derive(Debug, Clone)]
pub(crate) struct PendingMachine {
    pub machine: ElementRef,
    /// Classifier references from an explicit context, if one was declared.
    pub context: Option<Vec<String>>,
    /// The element the machine was found under.
    pub container: ElementRef,
}

/// A diagram waiting for the element it depicts.
#[derive(Debug, Clone)]
pub(crate) struct PendingDiagram {
    pub diagram: ElementRef,
    pub model: ElementRef,
    pub element: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Deferred {
    pub vertices: Vec<PendingVertex>,
    pub machines: Vec<PendingMachine>,
    pub diagrams: Vec<PendingDiagram>,
}

// ============================================================================
// CONTEXT
// ============================================================================

/// Registries for one parse invocation.
#[derive(Debug, Default)]
pub struct ParseContext<'d> {
    datatypes: IndexMap<String, Node<'d>>,
    stereotypes: IndexMap<String, Node<'d>>,
    tag_definitions: IndexMap<String, Node<'d>>,
    /// Element key -> names of the stereotypes that list it (1.0 and 1.1).
    extended_by: FxHashMap<String, Vec<String>>,
    elements: IndexMap<ElementId, ElementRef>,
    pub(crate) deferred: Deferred,
}

impl<'d> ParseContext<'d> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the datatype, stereotype and tag definition nodes of one document.
    pub fn collect_document(
        &mut self,
        xmi: Node<'d>,
        dialect: Dialect,
        prefix: &str,
        fold: bool,
    ) -> Result<(), XmiError> {
        let vocab = dialect.vocabulary();

        let datatype_tags = joined(&[vocab.datatype, vocab.class, vocab.interface, vocab.actor]);
        for node in xmi.find_all(&datatype_tags, Scope::Descendants) {
            if let Some(id) = Dialect::qualified_id(node, prefix) {
                self.datatypes.insert(id, node);
            }
        }

        for node in xmi.find_all(vocab.stereotype, Scope::Descendants) {
            let Some(id) = Dialect::qualified_id(node, prefix) else {
                continue;
            };
            if matches!(dialect, Dialect::Xmi10 | Dialect::Xmi11) {
                let name = dialect.name(node, fold)?.to_string();
                if !name.is_empty() {
                    for extended in
                        node.find_all(vocab.stereotype_extended_element, Scope::Descendants)
                    {
                        if let Some(idref) = Dialect::idref(extended) {
                            self.extended_by
                                .entry(format!("{prefix}{idref}"))
                                .or_default()
                                .push(name.clone());
                        }
                    }
                }
            }
            self.stereotypes.insert(id, node);
        }

        self.collect_tag_definitions(xmi, dialect, prefix);

        tracing::debug!(
            dialect = %dialect,
            prefix,
            datatypes = self.datatypes.len(),
            stereotypes = self.stereotypes.len(),
            tag_definitions = self.tag_definitions.len(),
            "collected document definitions"
        );
        Ok(())
    }

    /// Index named `TagDefinition` nodes. 1.0 documents have none.
    pub fn collect_tag_definitions(&mut self, xmi: Node<'d>, dialect: Dialect, prefix: &str) {
        if dialect == Dialect::Xmi10 {
            return;
        }
        for node in xmi.find_all(dialect.vocabulary().tag_definition, Scope::Descendants) {
            if !node.has_attr("name") {
                continue;
            }
            if let Some(id) = Dialect::qualified_id(node, prefix) {
                self.tag_definitions.insert(id, node);
            }
        }
    }

    // ── Source registries ──────────────────────────────────────────────

    pub fn datatype(&self, id: &str) -> Option<Node<'d>> {
        self.datatypes.get(id).copied()
    }

    /// The datatype node for `id`; a miss is an [`XmiError::UnresolvedType`].
    pub fn require_datatype(&self, id: &str, element: &str) -> Result<Node<'d>, XmiError> {
        self.datatype(id).ok_or_else(|| XmiError::UnresolvedType {
            element: element.to_string(),
            type_id: id.to_string(),
        })
    }

    pub fn stereotype(&self, id: &str) -> Option<Node<'d>> {
        self.stereotypes.get(id).copied()
    }

    pub fn tag_definition(&self, id: &str) -> Option<Node<'d>> {
        self.tag_definitions.get(id).copied()
    }

    /// Names of the stereotypes whose extended-element list names `id`.
    pub fn extended_by(&self, id: &str) -> &[String] {
        self.extended_by.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn datatype_count(&self) -> usize {
        self.datatypes.len()
    }

    // ── Element registry ───────────────────────────────────────────────

    /// Register a built element under its id.
    ///
    /// Ids are unique across the primary and every profile document; a second
    /// registration is an [`XmiError::DuplicateId`].
    pub fn register(&mut self, id: ElementId, element: ElementRef) -> Result<(), XmiError> {
        if self.elements.contains_key(&id) {
            return Err(XmiError::DuplicateId(id.to_string()));
        }
        self.elements.insert(id, element);
        Ok(())
    }

    pub fn lookup(&self, id: &str) -> Option<ElementRef> {
        self.elements.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn into_index(self) -> IndexMap<ElementId, ElementRef> {
        self.elements
    }
}
