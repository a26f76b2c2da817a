//! Associations, association classes and their ends.

use crate::base::{Multiplicity, to_boolean};
use crate::builder::{ClassifierKind, ModelBuilder};
use crate::dialect::{Dialect, joined};
use crate::error::XmiError;
use crate::model::{AssociationData, AssociationEndData, ElementData, ElementRef};
use crate::xml::{Node, Scope};

use super::push_unique;

impl<'a, 'd> ModelBuilder<'a, 'd> {
    /// Resolve every two-ended association below `scope`. Returns how many
    /// were linked into both end classes.
    pub(crate) fn resolve_associations(&mut self, scope: Node<'d>) -> Result<usize, XmiError> {
        let vocab = self.dialect.vocabulary();
        let tags = joined(&[vocab.association, vocab.association_class]);
        let mut linked = 0;

        for node in scope.find_all(&tags, Scope::Descendants) {
            if Dialect::is_reference(node) {
                continue;
            }
            let ends: Vec<Node<'d>> = node
                .find_all(vocab.association_end, Scope::Descendants)
                .into_iter()
                .filter(|end| !Dialect::is_reference(*end))
                .collect();
            let [from_node, to_node] = ends[..] else {
                tracing::debug!(association = %node.describe(), ends = ends.len(), "skipping association without two ends");
                continue;
            };

            let Some(association) = self.association(node)? else {
                continue;
            };
            let from_end = self.association_end(from_node, association)?;
            let to_end = self.association_end(to_node, association)?;
            if let Some(data) = self.arena.get_mut(association).as_association_mut() {
                data.from_end = Some(from_end);
                data.to_end = Some(to_end);
            }
            for end in [from_end, to_end] {
                push_unique(&mut self.arena.get_mut(association).children, end);
            }

            self.link_subtype(from_node, from_end, to_node, to_end);

            match (self.end_target(from_end), self.end_target(to_end)) {
                (Some(from), Some(to)) => {
                    if let Some(class) = self.arena.get_mut(from).as_class_mut() {
                        push_unique(&mut class.associations_from, association);
                    }
                    if let Some(class) = self.arena.get_mut(to).as_class_mut() {
                        push_unique(&mut class.associations_to, association);
                    }
                    linked += 1;
                }
                _ => {
                    tracing::warn!(association = %node.describe(), "association end classes not found");
                }
            }
        }
        Ok(linked)
    }

    /// Existing association or association class for `node`, else a new one.
    fn association(&mut self, node: Node<'d>) -> Result<Option<ElementRef>, XmiError> {
        if let Some(existing) = self.existing(node) {
            if self.arena.get(existing).as_association().is_some() {
                return Ok(Some(existing));
            }
            tracing::warn!(association = %node.describe(), "id already names a non-association element");
            return Ok(None);
        }

        let vocab = self.dialect.vocabulary();
        let data = if node.is(vocab.association_class) {
            ElementData::Class(self.classifier_data(node, None, ClassifierKind::AssociationClass)?)
        } else {
            ElementData::Association(AssociationData::default())
        };
        Ok(Some(self.init_element(node, data, None)?))
    }

    /// Existing end for `node` with its data recomputed, else a new one.
    fn association_end(
        &mut self,
        node: Node<'d>,
        association: ElementRef,
    ) -> Result<ElementRef, XmiError> {
        let participant = self.dialect.association_end_participant(node, self.prefix)?;
        let target = match participant {
            Some(key) => {
                let target = self
                    .ctx
                    .lookup(&key)
                    .filter(|&r| self.arena.get(r).kind().is_classifier());
                if target.is_none() {
                    tracing::warn!(end = %node.describe(), participant = %key, "association end class not found");
                }
                target
            }
            None => None,
        };
        let data = AssociationEndData {
            association: Some(association),
            target,
            multiplicity: self.dialect.multiplicity(node, Multiplicity::MANY)?,
            aggregation: self.dialect.aggregation_kind(node),
            is_navigable: is_navigable(node)?,
        };

        match self.existing(node) {
            Some(end) => {
                let element = self.arena.get_mut(end);
                element.data = ElementData::AssociationEnd(data);
                element.parent = Some(association);
                Ok(end)
            }
            None => self.init_element(node, ElementData::AssociationEnd(data), Some(association)),
        }
    }

    fn end_target(&self, end: ElementRef) -> Option<ElementRef> {
        match &self.arena.get(end).data {
            ElementData::AssociationEnd(data) => data.target,
            _ => None,
        }
    }

    /// Record master -> detail when one end aggregates. The second end wins
    /// when both do.
    fn link_subtype(
        &mut self,
        from_node: Node<'d>,
        from_end: ElementRef,
        to_node: Node<'d>,
        to_end: ElementRef,
    ) {
        let aggregates = |node: Node<'d>, end: ElementRef| {
            let stereotypes = &self.arena.get(end).stereotypes;
            self.dialect
                .is_aggregation_end(node, stereotypes.iter().map(String::as_str))
        };
        let (master, detail) = if aggregates(to_node, to_end) {
            (to_end, from_end)
        } else if aggregates(from_node, from_end) {
            (from_end, to_end)
        } else {
            return;
        };

        match (self.end_target(master), self.end_target(detail)) {
            (Some(master), Some(detail)) => {
                push_unique(&mut self.arena.get_mut(master).subtypes, detail);
            }
            _ => {
                tracing::warn!(
                    end = %self.arena.get(master).id,
                    "aggregation end classes not found"
                );
            }
        }
    }
}

/// `isNavigable` attribute, else the `<end tag>.isNavigable` value child.
fn is_navigable(end: Node<'_>) -> Result<bool, XmiError> {
    if let Some(raw) = end.attr("isNavigable").filter(|raw| !raw.trim().is_empty()) {
        return Ok(to_boolean(raw));
    }
    let tag = format!("{}.isNavigable", end.tag());
    Ok(end
        .value_of(&[tag.as_str()], Scope::Children)?
        .is_some_and(to_boolean))
}
