//! State machines and diagrams.
//!
//! Machines are discovered through [`StateMachineContainer`], a capability
//! the builder's Model, Package and Class sources implement over one shared
//! search ([`find_owned_state_machines`]). Building a machine records its
//! transitions, states, actions and guards in pass 1; everything that needs
//! the whole graph is deferred to [`link_state_machines`]:
//!
//! - state outgoing/incoming references -> transition source/target
//! - explicit context (or the container) -> machine owners
//! - diagram bridges -> depicted element, with name recovery for unnamed machines
//! - placement of named machines on their product package
//! - `use_workflow` tagged values naming a machine

mod diagram;
mod link;
mod machine;

pub(crate) use link::link_state_machines;

use crate::builder::ModelBuilder;
use crate::dialect::{Dialect, Vocabulary, joined};
use crate::error::XmiError;
use crate::model::ElementRef;
use crate::xml::{Node, Scope};

/// Something state machines can be found under.
pub trait StateMachineContainer<'d> {
    /// The source node searched.
    fn node(&self) -> Node<'d>;

    /// The element discovered machines are built under.
    fn element(&self) -> ElementRef;

    fn find_state_machines(&self, vocab: &Vocabulary) -> Result<Vec<Node<'d>>, XmiError> {
        find_owned_state_machines(self.node(), vocab)
    }
}

/// Machine nodes owned by `node`.
///
/// The search root is the single owned-element or owned-behavior child;
/// when both exist, a unique owned-behavior anywhere below, then the
/// owned-element child; without either, the node itself.
pub fn find_owned_state_machines<'d>(
    node: Node<'d>,
    vocab: &Vocabulary,
) -> Result<Vec<Node<'d>>, XmiError> {
    let owners = joined(&[vocab.owned_element, vocab.owned_behavior]);
    let owner = match node.find_unique(&owners, Scope::Children) {
        Ok(owner) => owner,
        Err(_) => match node.find_unique(vocab.owned_behavior, Scope::Descendants) {
            Ok(owner) => owner,
            Err(_) => node.find_unique(vocab.owned_element, Scope::Children)?,
        },
    };
    let root = owner.unwrap_or(node);
    Ok(root.find_all(vocab.state_machine, Scope::Children))
}

/// The document's Model. Machines may also sit directly in `XMI.content`.
#[derive(Debug, Clone, Copy)]
pub struct ModelSource<'d> {
    pub content: Node<'d>,
    pub node: Node<'d>,
    pub element: ElementRef,
}

impl<'d> StateMachineContainer<'d> for ModelSource<'d> {
    fn node(&self) -> Node<'d> {
        self.node
    }

    fn element(&self) -> ElementRef {
        self.element
    }

    fn find_state_machines(&self, vocab: &Vocabulary) -> Result<Vec<Node<'d>>, XmiError> {
        let mut found = self.content.find_all(vocab.state_machine, Scope::Children);
        found.extend(self.node.find_all(vocab.state_machine, Scope::Children));
        if let Some(owned) = self.node.find_unique(vocab.owned_element, Scope::Children)? {
            found.extend(owned.find_all(vocab.state_machine, Scope::Children));
        }
        Ok(found)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PackageSource<'d> {
    pub node: Node<'d>,
    pub element: ElementRef,
}

impl<'d> StateMachineContainer<'d> for PackageSource<'d> {
    fn node(&self) -> Node<'d> {
        self.node
    }

    fn element(&self) -> ElementRef {
        self.element
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClassSource<'d> {
    pub node: Node<'d>,
    pub element: ElementRef,
}

impl<'d> StateMachineContainer<'d> for ClassSource<'d> {
    fn node(&self) -> Node<'d> {
        self.node
    }

    fn element(&self) -> ElementRef {
        self.element
    }
}

impl<'a, 'd> ModelBuilder<'a, 'd> {
    /// Build every machine the container owns that was not built already.
    pub(crate) fn build_state_machines(
        &mut self,
        container: &impl StateMachineContainer<'d>,
    ) -> Result<Vec<ElementRef>, XmiError> {
        let mut built = Vec::new();
        for node in container.find_state_machines(self.dialect.vocabulary())? {
            if Dialect::is_reference(node) {
                continue;
            }
            if !self.built_machines.insert(node.id()) {
                tracing::debug!(machine = %node.describe(), "state machine already built");
                continue;
            }
            built.push(self.build_state_machine(node, container.element())?);
        }
        Ok(built)
    }
}
