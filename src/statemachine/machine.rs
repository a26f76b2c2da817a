//! Pass 1 of a state machine: transitions, then states.

use crate::builder::ModelBuilder;
use crate::context::{PendingMachine, PendingVertex};
use crate::dialect::Dialect;
use crate::error::XmiError;
use crate::model::{
    ElementData, ElementRef, ExpressionData, StateData, StateKind, StateMachineData,
    TransitionData,
};
use crate::xml::{Node, Scope};

impl<'a, 'd> ModelBuilder<'a, 'd> {
    pub(crate) fn build_state_machine(
        &mut self,
        node: Node<'d>,
        container: ElementRef,
    ) -> Result<ElementRef, XmiError> {
        let vocab = self.dialect.vocabulary();
        let data = StateMachineData {
            container: Some(container),
            ..Default::default()
        };
        let machine = self.init_element(node, ElementData::StateMachine(data), Some(container))?;

        let mut transitions = Vec::new();
        for transition in node.find_all(vocab.transition, Scope::Descendants) {
            if !Dialect::is_reference(transition) {
                transitions.push(self.build_transition(transition, machine)?);
            }
        }

        let mut states = Vec::new();
        for (tags, kind) in [
            (vocab.simple_state, StateKind::Simple),
            (vocab.pseudostate, StateKind::Pseudo),
            (vocab.final_state, StateKind::Final),
        ] {
            for state in node.find_all(tags, Scope::Descendants) {
                if !Dialect::is_reference(state) {
                    states.push(self.build_state(state, kind, machine)?);
                }
            }
        }

        let context = node
            .find_unique(vocab.state_machine_context, Scope::Children)?
            .map(|wrapper| {
                wrapper
                    .children()
                    .filter_map(|n| Dialect::reference(n, self.prefix))
                    .collect()
            });

        if let Some(data) = self.arena.get_mut(machine).as_state_machine_mut() {
            data.transitions = transitions;
            data.states = states;
        }
        self.ctx.deferred.machines.push(PendingMachine {
            machine,
            context,
            container,
        });
        tracing::trace!(machine = %node.describe(), "built state machine");
        Ok(machine)
    }

    /// Build a transition with its effect action and guard.
    fn build_transition(
        &mut self,
        node: Node<'d>,
        machine: ElementRef,
    ) -> Result<ElementRef, XmiError> {
        let vocab = self.dialect.vocabulary();
        let transition =
            self.init_element(node, ElementData::Transition(TransitionData::default()), Some(machine))?;

        let action = match node.find_unique(vocab.transition_effect, Scope::Children)? {
            Some(effect) => match effect.sub_element()? {
                Some(action) => {
                    let expression = self
                        .dialect
                        .expression_body(action, vocab.action_expression)?;
                    Some(self.init_element(
                        action,
                        ElementData::Action(ExpressionData { expression }),
                        Some(transition),
                    )?)
                }
                None => None,
            },
            None => None,
        };

        let guard = match node.find_unique(vocab.transition_guard, Scope::Children)? {
            Some(wrapper) => match wrapper.sub_element()? {
                Some(guard) => {
                    let expression = self
                        .dialect
                        .expression_body(guard, vocab.boolean_expression)?;
                    Some(self.init_element(
                        guard,
                        ElementData::Guard(ExpressionData { expression }),
                        Some(transition),
                    )?)
                }
                None => None,
            },
            None => None,
        };

        if let ElementData::Transition(data) = &mut self.arena.get_mut(transition).data {
            data.action = action;
            data.guard = guard;
        }
        Ok(transition)
    }

    /// Build a state and defer its transition references.
    fn build_state(
        &mut self,
        node: Node<'d>,
        kind: StateKind,
        machine: ElementRef,
    ) -> Result<ElementRef, XmiError> {
        let vocab = self.dialect.vocabulary();
        let is_initial =
            kind == StateKind::Pseudo && self.dialect.pseudostate_kind(node)? == Some("initial");
        let outgoing = self.references(node, vocab.vertex_outgoing)?;
        let incoming = self.references(node, vocab.vertex_incoming)?;

        let data = StateData {
            kind,
            is_initial,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        };
        let state = self.init_element(node, ElementData::State(data), Some(machine))?;
        self.ctx.deferred.vertices.push(PendingVertex {
            state,
            outgoing,
            incoming,
        });
        Ok(state)
    }
}
