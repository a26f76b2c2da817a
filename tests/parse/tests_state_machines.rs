//! State machine and diagram tests.
//!
//! These tests verify that transitions are linked to their states, that
//! machines are attached to the classes they govern, and that diagrams name
//! and locate the machines they depict.

use crate::helpers::fixtures::*;
use crate::helpers::graph_helpers::*;
use umlxmi::model::{StateKind, TriggerType};

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

// =============================================================================
// STATES AND TRANSITIONS
// =============================================================================

#[test]
fn test_states_in_build_order() {
    let graph = parse_fixture(WORKFLOW_1_2);
    let machine = state_machine(&graph, "sm1");

    assert_eq!(machine.state_names(false), vec!["draft", "submitted"]);
    let kinds: Vec<StateKind> = machine.states(false).iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, vec![StateKind::Simple, StateKind::Simple, StateKind::Pseudo]);
}

#[test]
fn test_transition_endpoints() {
    let graph = parse_fixture(WORKFLOW_1_2);
    let machine = state_machine(&graph, "sm1");

    assert_eq!(machine.transition_names(false), vec!["submit", "retract"]);
    let submit = graph.get("t1").and_then(|e| e.as_transition()).unwrap();
    assert_eq!(submit.source_name().as_deref(), Some("draft"));
    assert_eq!(submit.target_name().as_deref(), Some("submitted"));

    let retract = graph.get("t2").and_then(|e| e.as_transition()).unwrap();
    assert_eq!(retract.source_name().as_deref(), Some("submitted"));
    assert_eq!(retract.target_name().as_deref(), Some("draft"));

    let draft = graph.get("s1").and_then(|e| e.as_state()).unwrap();
    assert_eq!(draft.outgoing().len(), 1);
    assert_eq!(draft.incoming().len(), 2);
}

#[test]
fn test_initial_state() {
    let graph = parse_fixture(WORKFLOW_1_2);

    let initial = state_machine(&graph, "sm1").initial_state().unwrap();
    assert_eq!(initial.element().id().as_str(), "s0");
    assert!(initial.is_initial());

    // Without a pseudostate or tag, the first state built.
    let fallback = state_machine(&graph, "sm2").initial_state().unwrap();
    assert_eq!(fallback.name().to_string(), "first");
}

// =============================================================================
// ACTIONS, GUARDS, TRIGGERS
// =============================================================================

#[test]
fn test_action_names_split() {
    let graph = parse_fixture(WORKFLOW_1_2);

    let submit = graph.get("t1").and_then(|e| e.as_transition()).unwrap();
    assert_eq!(submit.before_action_name().as_deref(), Some("validate"));
    assert_eq!(submit.after_action_name().as_deref(), Some("notify"));

    let retract = graph.get("t2").and_then(|e| e.as_transition()).unwrap();
    assert_eq!(retract.before_action_name().as_deref(), Some(""));
    assert_eq!(retract.after_action_name().as_deref(), Some("only"));

    let machine = state_machine(&graph, "sm1");
    assert_eq!(
        machine.all_transition_action_names(true, true),
        vec!["validate", "notify", "only"]
    );
    assert_eq!(machine.all_transition_action_names(true, false), vec!["validate"]);
    assert!(machine.transition_action_by_name("notify").is_some());
    assert!(machine.transition_action_by_name("missing").is_none());
}

#[test]
fn test_guard_clauses() {
    let graph = parse_fixture(WORKFLOW_1_2);
    let submit = graph.get("t1").and_then(|e| e.as_transition()).unwrap();

    assert_eq!(submit.guard_roles(), "Owner;Manager");
    assert_eq!(submit.guard_permissions(), "Modify");
    assert_eq!(submit.guard_expr(), "python:ok");

    let props = submit.props();
    assert_eq!(props.len(), 3);
    assert_eq!(props.get("guard_roles").map(String::as_str), Some("Owner;Manager"));

    let retract = graph.get("t2").and_then(|e| e.as_transition()).unwrap();
    assert!(retract.guard().is_none());
    assert_eq!(retract.guard_roles(), "");
    assert!(retract.props().is_empty());
}

#[test]
fn test_trigger_types() {
    let graph = parse_fixture(WORKFLOW_1_2);

    let submit = graph.get("t1").and_then(|e| e.as_transition()).unwrap();
    let retract = graph.get("t2").and_then(|e| e.as_transition()).unwrap();
    assert_eq!(submit.trigger_type(), TriggerType::User);
    assert_eq!(retract.trigger_type(), TriggerType::Automatic);
    assert_eq!(retract.trigger_type().as_str(), "AUTOMATIC");
}

// =============================================================================
// CLASSES AND PLACEMENT
// =============================================================================

#[test]
fn test_machine_classes_from_context_and_use_workflow() {
    let graph = parse_fixture(WORKFLOW_1_2);
    let machine = state_machine(&graph, "sm1");

    assert_eq!(sorted(machine.class_names()), vec!["Invoice", "Order"]);
    for id in ["c1", "c2"] {
        let governed = class(&graph, id).state_machine().unwrap();
        assert_eq!(governed.id().as_str(), "sm1");
    }
    assert!(state_machine(&graph, "sm2").classes().is_empty());
}

#[test]
fn test_machine_without_context_lists_its_container() {
    let graph = parse_fixture(WORKFLOW_1_2);

    let owner_ids = |id: &str| -> Vec<String> {
        state_machine(&graph, id)
            .owners()
            .iter()
            .map(|o| o.id().to_string())
            .collect()
    };
    assert_eq!(owner_ids("sm2"), vec!["p1"]);
    assert_eq!(owner_ids("sm3"), vec!["m"]);
    assert!(state_machine(&graph, "sm2").class_names().is_empty());
    assert_eq!(sorted(owner_ids("sm1")), vec!["c1", "c2"]);
}

#[test]
fn test_named_machines_placed_on_product() {
    let graph = parse_fixture(WORKFLOW_1_2);
    let shop = graph.model().packages(false)[0];

    assert!(shop.is_product());
    let placed: Vec<String> = shop.state_machines().iter().map(|m| m.name().to_string()).collect();
    assert_eq!(placed, vec!["order_workflow", "plain_workflow"]);
}

// =============================================================================
// DIAGRAMS
// =============================================================================

#[test]
fn test_diagram_names_unnamed_machine() {
    let graph = parse_fixture(WORKFLOW_1_2);
    let model = graph.model();

    let machine = state_machine(&graph, "sm3");
    assert_eq!(machine.name().to_string(), "ticket_flow");

    let diagram = model.diagram_for_element("sm3").unwrap();
    assert_eq!(diagram.name().to_string(), "ticket_flow");
    assert_eq!(diagram.model_element().unwrap().id().as_str(), "sm3");
    assert!(model.diagram("dg1").is_some());

    let on_model: Vec<String> = model
        .package()
        .state_machines()
        .iter()
        .map(|m| m.id().to_string())
        .collect();
    assert_eq!(on_model, vec!["sm3"]);
    assert_eq!(model.all_state_machines().len(), 3);
}
