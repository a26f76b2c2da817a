//! Diagrams and the model element each one depicts.

use crate::builder::ModelBuilder;
use crate::context::PendingDiagram;
use crate::dialect::Dialect;
use crate::error::XmiError;
use crate::model::{DiagramData, ElementData, ElementRef};
use crate::xml::{Node, Scope};

impl<'a, 'd> ModelBuilder<'a, 'd> {
    /// Build the diagrams listed directly in `XMI.content`.
    pub(crate) fn build_diagrams(
        &mut self,
        content: Node<'d>,
        model: ElementRef,
    ) -> Result<(), XmiError> {
        let vocab = self.dialect.vocabulary();
        for node in content.children_named(vocab.diagram) {
            let element = self.diagram_subject(node)?;
            let diagram =
                self.init_element(node, ElementData::Diagram(DiagramData::default()), Some(model))?;
            let id = self.arena.get(diagram).id.clone();
            if !id.is_empty()
                && let ElementData::Model(data) = &mut self.arena.get_mut(model).data
            {
                data.diagrams.insert(id, diagram);
            }
            self.ctx.deferred.diagrams.push(PendingDiagram {
                diagram,
                model,
                element,
            });
        }
        Ok(())
    }

    /// Registry key of the element behind the diagram's semantic bridge.
    fn diagram_subject(&self, node: Node<'d>) -> Result<Option<String>, XmiError> {
        let vocab = self.dialect.vocabulary();
        let Some(owner) = node.find_unique(vocab.diagram_owner, Scope::Children)? else {
            return Ok(None);
        };
        let Some(bridge) = owner.find_unique(vocab.semantic_bridge_element, Scope::Descendants)?
        else {
            return Ok(None);
        };
        Ok(bridge
            .sub_element()?
            .and_then(|element| Dialect::reference(element, self.prefix)))
    }
}
