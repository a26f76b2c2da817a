//! Pass 2 of the state machine subsystem.

use indexmap::IndexMap;

use crate::context::{Deferred, ParseContext};
use crate::model::{ElementArena, ElementData, ElementRef};

/// Tagged value on a class naming the machine that governs it.
const USE_WORKFLOW: &str = "use_workflow";

/// Resolve everything the builder deferred, in this order: transition
/// links, machine classes, diagram subjects (recovering machine names),
/// placement of named machines, `use_workflow` claims.
pub(crate) fn link_state_machines(
    arena: &mut ElementArena,
    ctx: &ParseContext<'_>,
    deferred: &Deferred,
) {
    link_vertices(arena, ctx, deferred);
    link_machine_classes(arena, ctx, deferred);
    link_diagrams(arena, ctx, deferred);
    place_machines(arena, deferred);
    claim_workflow_classes(arena, deferred);
}

fn is_transition(arena: &ElementArena, r: ElementRef) -> bool {
    matches!(arena.get(r).data, ElementData::Transition(_))
}

fn link_vertices(arena: &mut ElementArena, ctx: &ParseContext<'_>, deferred: &Deferred) {
    for vertex in &deferred.vertices {
        for id in &vertex.outgoing {
            let Some(transition) = ctx.lookup(id).filter(|&t| is_transition(arena, t)) else {
                tracing::warn!(state = %arena.get(vertex.state).id, transition = %id, "outgoing transition not found");
                continue;
            };
            if let ElementData::State(state) = &mut arena.get_mut(vertex.state).data {
                state.outgoing.push(transition);
            }
            if let ElementData::Transition(data) = &mut arena.get_mut(transition).data {
                data.source = Some(vertex.state);
            }
        }
        for id in &vertex.incoming {
            let Some(transition) = ctx.lookup(id).filter(|&t| is_transition(arena, t)) else {
                tracing::warn!(state = %arena.get(vertex.state).id, transition = %id, "incoming transition not found");
                continue;
            };
            if let ElementData::State(state) = &mut arena.get_mut(vertex.state).data {
                state.incoming.push(transition);
            }
            if let ElementData::Transition(data) = &mut arena.get_mut(transition).data {
                data.target = Some(vertex.state);
            }
        }
    }
}

/// Make `class` governed by `machine`.
/// Records `owner` on the machine. Classes also get the machine back.
fn attach_class(arena: &mut ElementArena, machine: ElementRef, owner: ElementRef) {
    if let Some(data) = arena.get_mut(machine).as_state_machine_mut()
        && !data.classes.contains(&owner)
    {
        data.classes.push(owner);
    }
    if let Some(data) = arena.get_mut(owner).as_class_mut() {
        data.state_machine = Some(machine);
    }
}

fn link_machine_classes(arena: &mut ElementArena, ctx: &ParseContext<'_>, deferred: &Deferred) {
    for pending in &deferred.machines {
        let classes: Vec<ElementRef> = match &pending.context {
            Some(ids) => ids
                .iter()
                .filter_map(|id| match ctx.lookup(id) {
                    Some(r) if arena.get(r).as_class().is_some() => Some(r),
                    Some(_) => {
                        tracing::debug!(context = %id, "state machine context is not a class");
                        None
                    }
                    None => {
                        tracing::warn!(
                            machine = %arena.get(pending.machine).id,
                            context = %id,
                            "state machine context not found"
                        );
                        None
                    }
                })
                .collect(),
            None => vec![pending.container],
        };
        for class in classes {
            attach_class(arena, pending.machine, class);
        }
    }
}

fn link_diagrams(arena: &mut ElementArena, ctx: &ParseContext<'_>, deferred: &Deferred) {
    for pending in &deferred.diagrams {
        let Some(id) = &pending.element else {
            continue;
        };
        let Some(target) = ctx.lookup(id) else {
            tracing::warn!(diagram = %arena.get(pending.diagram).id, element = %id, "diagram element not found");
            continue;
        };

        if let ElementData::Diagram(data) = &mut arena.get_mut(pending.diagram).data {
            data.model_element = Some(target);
        }
        let target_id = arena.get(target).id.clone();
        if let ElementData::Model(data) = &mut arena.get_mut(pending.model).data {
            data.diagrams_by_element.insert(target_id, pending.diagram);
        }

        let diagram_name = arena.get(pending.diagram).name.clone();
        let element = arena.get_mut(target);
        if matches!(element.data, ElementData::StateMachine(_))
            && element.name.is_empty()
            && !diagram_name.is_empty()
        {
            tracing::debug!(machine = %element.id, name = %diagram_name, "naming state machine after its diagram");
            element.set_name(diagram_name);
        }
    }
}

/// The nearest enclosing root package of `package`, itself included.
fn product_of(arena: &ElementArena, package: ElementRef) -> ElementRef {
    let mut current = package;
    loop {
        let element = arena.get(current);
        if element.as_package().is_some_and(|p| p.is_root) {
            return current;
        }
        match element.parent {
            Some(parent) if arena.get(parent).as_package().is_some() => current = parent,
            _ => return current,
        }
    }
}

/// Place `machine` on `target`, and on the product above it.
fn add_state_machine(arena: &mut ElementArena, target: ElementRef, machine: ElementRef) {
    let element = arena.get(target);
    let product = if element.as_package().is_some() {
        product_of(arena, target)
    } else if let Some(class) = element.as_class() {
        match class.package {
            Some(package) => product_of(arena, package),
            None => target,
        }
    } else {
        return;
    };

    for r in [target, product] {
        let list = match &mut arena.get_mut(r).data {
            ElementData::Class(class) => &mut class.state_machines,
            ElementData::Model(model) => &mut model.package.state_machines,
            ElementData::Package(package) => &mut package.state_machines,
            _ => continue,
        };
        if !list.contains(&machine) {
            list.push(machine);
        }
    }
}

fn place_machines(arena: &mut ElementArena, deferred: &Deferred) {
    for pending in &deferred.machines {
        let element = arena.get(pending.machine);
        if element.name.is_empty() {
            tracing::debug!(machine = %element.id, "unnamed state machine is not placed");
            continue;
        }
        let first_class_package = match &element.data {
            ElementData::StateMachine(data) => data
                .classes
                .first()
                .and_then(|&c| arena.get(c).as_class())
                .and_then(|c| c.package),
            _ => None,
        };
        let target = first_class_package
            .map(|p| product_of(arena, p))
            .unwrap_or(pending.container);
        add_state_machine(arena, target, pending.machine);
    }
}

fn claim_workflow_classes(arena: &mut ElementArena, deferred: &Deferred) {
    let mut by_name: IndexMap<String, ElementRef> = IndexMap::new();
    for pending in &deferred.machines {
        let name = &arena.get(pending.machine).name;
        if !name.is_empty() {
            by_name.insert(name.to_string(), pending.machine);
        }
    }

    let claims: Vec<(ElementRef, String)> = arena
        .refs()
        .filter(|&r| arena.get(r).as_class().is_some())
        .filter_map(|r| {
            arena
                .get(r)
                .tagged_value(USE_WORKFLOW)
                .map(|name| (r, name.to_string()))
        })
        .collect();
    for (class, name) in claims {
        match by_name.get(&name) {
            Some(&machine) => attach_class(arena, machine, class),
            None => {
                tracing::warn!(class = %arena.get(class).id, workflow = %name, "use_workflow names no state machine");
            }
        }
    }
}
