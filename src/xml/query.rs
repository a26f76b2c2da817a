//! Tag-based lookups over [`Node`] handles.
//!
//! XMI dialects name one concept with one or more alternative tags, so every
//! lookup here takes a tag list. Recursive multi-tag searches return matches
//! grouped by tag in list order, each group in document order.

use super::Node;
use crate::error::XmiError;

/// How far below a node a lookup searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Direct element children only.
    Children,
    /// Every element below the node.
    Descendants,
}

impl<'d> Node<'d> {
    /// Direct children whose tag is in `tags`, in document order.
    pub fn children_named<'t>(&self, tags: &'t [&'t str]) -> impl Iterator<Item = Node<'d>> + 't
    where
        'd: 't,
    {
        self.children().filter(move |n| n.is(tags))
    }

    /// Every matching element in `scope`.
    ///
    /// Children come back in document order; descendants are grouped by tag.
    pub fn find_all(&self, tags: &[&str], scope: Scope) -> Vec<Node<'d>> {
        match scope {
            Scope::Children => self.children().filter(|n| n.is(tags)).collect(),
            Scope::Descendants => {
                let mut found = Vec::new();
                for tag in tags {
                    found.extend(self.descendants().filter(|n| n.tag() == *tag));
                }
                found
            }
        }
    }

    /// The single matching element in `scope`.
    ///
    /// More than one match is an [`XmiError::AmbiguousTag`].
    pub fn find_unique(&self, tags: &[&str], scope: Scope) -> Result<Option<Node<'d>>, XmiError> {
        let mut found = self.find_all(tags, scope);
        if found.len() > 1 {
            return Err(XmiError::ambiguous(tags.join("|"), self.describe()));
        }
        Ok(found.pop())
    }

    /// The first matching element in `scope`, ignoring any further matches.
    pub fn find_first(&self, tags: &[&str], scope: Scope) -> Option<Node<'d>> {
        match scope {
            Scope::Children => self.children().find(|n| n.is(tags)),
            Scope::Descendants => tags
                .iter()
                .find_map(|tag| self.descendants().find(|n| n.tag() == *tag)),
        }
    }

    /// The single element child of this node (the referenced element inside
    /// a reference wrapper such as `UML:Generalization.parent`).
    pub fn sub_element(&self) -> Result<Option<Node<'d>>, XmiError> {
        let mut children = self.children();
        let first = children.next();
        if children.next().is_some() {
            return Err(XmiError::ambiguous("<any element>", self.describe()));
        }
        Ok(first)
    }

    /// The first element child, tolerating several.
    pub fn first_sub_element(&self) -> Option<Node<'d>> {
        self.children().next()
    }

    /// The value carried by a value node: its `xmi.value` attribute, else its text.
    pub fn value(&self) -> Option<&'d str> {
        self.attr("xmi.value").or_else(|| self.text())
    }

    /// Value of the single matching element in `scope`.
    pub fn value_of(&self, tags: &[&str], scope: Scope) -> Result<Option<&'d str>, XmiError> {
        Ok(self.find_unique(tags, scope)?.and_then(|n| n.value()))
    }
}
