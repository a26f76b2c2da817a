//! Second pass: relationship edges between built classifiers.
//!
//! Runs over one document after every model tree of the parse exists, so
//! any reference can name an element of any document. Four sub-passes, in
//! any order:
//!
//! - [`associations`]: association ends, master/detail subtype edges and
//!   the from/to association lists of both end classes
//! - [`generalizations`]: parent/child edges
//! - [`dependencies`]: realization and adaptation edges from stereotyped
//!   abstractions, and client dependencies
//!
//! A reference that names nothing in the registry is logged and its edge
//! dropped. Only structural errors (ambiguous wrappers, bad multiplicities)
//! abort the parse.

mod associations;
mod dependencies;
mod generalizations;

use crate::builder::ModelBuilder;
use crate::dialect::Dialect;
use crate::error::XmiError;
use crate::model::ElementRef;
use crate::xml::Node;

impl<'a, 'd> ModelBuilder<'a, 'd> {
    /// Resolve every relationship declared below `scope`.
    pub(crate) fn resolve_relationships(&mut self, scope: Node<'d>) -> Result<(), XmiError> {
        let associations = self.resolve_associations(scope)?;
        let generalizations = self.resolve_generalizations(scope)?;
        let abstractions = self.resolve_abstractions(scope)?;
        let dependencies = self.resolve_dependencies(scope)?;
        tracing::debug!(
            dialect = %self.dialect,
            associations,
            generalizations,
            abstractions,
            dependencies,
            "resolved relationships"
        );
        Ok(())
    }

    /// The classifier a reference node names, if it was built.
    pub(crate) fn classifier(&self, reference: Option<Node<'d>>) -> Option<ElementRef> {
        let key = Dialect::reference(reference?, self.prefix)?;
        self.ctx
            .lookup(&key)
            .filter(|&r| self.arena.get(r).kind().is_classifier())
    }
}

/// Append `item` unless already present.
pub(crate) fn push_unique(list: &mut Vec<ElementRef>, item: ElementRef) {
    if !list.contains(&item) {
        list.push(item);
    }
}
