//! Generalization edges.

use crate::builder::ModelBuilder;
use crate::dialect::Dialect;
use crate::error::XmiError;
use crate::model::ElementRef;
use crate::xml::{Node, Scope};

use super::push_unique;

impl<'a, 'd> ModelBuilder<'a, 'd> {
    /// Link parent and child of every generalization declared below
    /// `scope`. Returns how many edges were linked.
    pub(crate) fn resolve_generalizations(&mut self, scope: Node<'d>) -> Result<usize, XmiError> {
        let vocab = self.dialect.vocabulary();
        let mut linked = 0;

        for node in scope.find_all(vocab.generalization, Scope::Descendants) {
            if Dialect::id(node).is_none() {
                continue;
            }
            let parent = self.generalization_end(node, vocab.generalization_parent)?;
            let child = self.generalization_end(node, vocab.generalization_child)?;
            let (Some(parent), Some(child)) = (parent, child) else {
                tracing::warn!(generalization = %node.describe(), "generalization parent or child not found");
                continue;
            };

            if let Some(class) = self.arena.get_mut(parent).as_class_mut() {
                push_unique(&mut class.gen_children, child);
            }
            if let Some(class) = self.arena.get_mut(child).as_class_mut() {
                push_unique(&mut class.gen_parents, parent);
            }
            linked += 1;
        }
        Ok(linked)
    }

    fn generalization_end(
        &self,
        node: Node<'d>,
        tags: &[&str],
    ) -> Result<Option<ElementRef>, XmiError> {
        let Some(wrapper) = node.find_unique(tags, Scope::Descendants)? else {
            return Ok(None);
        };
        Ok(self.classifier(wrapper.sub_element()?))
    }
}
