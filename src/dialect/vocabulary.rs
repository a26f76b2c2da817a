//! Tag vocabularies of the three XMI generations.
//!
//! XMI 1.0 spells every UML concept with the fully qualified metamodel path
//! (`Foundation.Core.Class`); 1.1 switched to the `UML:` namespace and added
//! a few UML2 spellings emitted by Poseidon; 1.2 only renamed the tagged
//! value payload. The 1.1 and 1.2 tables are written as deltas of their
//! predecessor.

/// One or more alternative tag names for a concept.
pub type Tags = &'static [&'static str];

/// The concrete tag names one dialect uses for each concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    pub content: Tags,
    pub owned_element: Tags,
    pub owned_behavior: Tags,
    pub name: Tags,
    pub model: Tags,
    pub package: Tags,
    pub class: Tags,
    pub interface: Tags,
    pub datatype: Tags,
    pub actor: Tags,
    pub classifier: Tags,

    // ── Associations ────────────────────────────────────────────────
    pub association: Tags,
    pub association_class: Tags,
    pub association_end: Tags,
    pub aggregation: Tags,
    pub association_end_type: Tags,
    pub association_end_participant: Tags,
    pub multiplicity_range: Tags,
    pub multiplicity_lower: Tags,
    pub multiplicity_upper: Tags,

    // ── Features ────────────────────────────────────────────────────
    pub attribute: Tags,
    pub structural_feature_type: Tags,
    pub typed_element_type: Tags,
    pub attribute_initial_value: Tags,
    pub operation: Tags,
    pub parameter: Tags,
    pub parameter_type: Tags,
    pub parameter_default: Tags,
    pub expression: Tags,
    pub expression_body: Tags,

    // ── Relationships ───────────────────────────────────────────────
    pub generalization: Tags,
    pub generalization_child: Tags,
    pub generalization_parent: Tags,
    pub abstraction: Tags,
    pub dependency: Tags,
    pub dependency_client: Tags,
    pub dependency_supplier: Tags,

    // ── Extension mechanisms ────────────────────────────────────────
    pub tag_definition: Tags,
    pub tagged_value_container: Tags,
    pub tagged_value: Tags,
    pub tagged_value_tag: Tags,
    pub tagged_value_value: Tags,
    pub stereotype: Tags,
    /// Reference wrapper inside a stereotype naming an extended element.
    pub stereotype_extended_element: Tags,
    /// Reference container on an element naming its stereotypes.
    pub element_stereotype: Tags,
    pub is_abstract: Tags,

    // ── State machines ──────────────────────────────────────────────
    pub boolean_expression: Tags,
    pub action_expression: Tags,
    pub state_machine: Tags,
    pub state_machine_context: Tags,
    pub simple_state: Tags,
    pub pseudostate: Tags,
    pub pseudostate_kind: Tags,
    pub final_state: Tags,
    pub vertex_outgoing: Tags,
    pub vertex_incoming: Tags,
    pub transition: Tags,
    pub transition_effect: Tags,
    pub transition_guard: Tags,

    // ── Diagrams ────────────────────────────────────────────────────
    pub diagram: Tags,
    pub diagram_owner: Tags,
    pub semantic_bridge_element: Tags,
}

pub const XMI_1_0: Vocabulary = Vocabulary {
    content: &["XMI.content"],
    owned_element: &["Foundation.Core.Namespace.ownedElement"],
    owned_behavior: &[],
    name: &["Foundation.Core.ModelElement.name"],
    model: &["Model_Management.Model"],
    package: &["Model_Management.Package"],
    class: &["Foundation.Core.Class"],
    interface: &["Foundation.Core.Interface"],
    datatype: &["Foundation.Core.DataType"],
    actor: &["Behavioral_Elements.Use_Cases.Actor"],
    classifier: &["Foundation.Core.Classifier"],

    association: &["Foundation.Core.Association"],
    association_class: &["Foundation.Core.AssociationClass"],
    association_end: &["Foundation.Core.AssociationEnd"],
    aggregation: &["Foundation.Core.AssociationEnd.aggregation"],
    association_end_type: &["Foundation.Core.AssociationEnd.type"],
    association_end_participant: &["Foundation.Core.AssociationEnd.participant"],
    multiplicity_range: &["Foundation.Data_Types.MultiplicityRange"],
    multiplicity_lower: &["Foundation.Data_Types.MultiplicityRange.lower"],
    multiplicity_upper: &["Foundation.Data_Types.MultiplicityRange.upper"],

    attribute: &["Foundation.Core.Attribute"],
    structural_feature_type: &["Foundation.Core.StructuralFeature.type"],
    typed_element_type: &[],
    attribute_initial_value: &["Foundation.Core.Attribute.initialValue"],
    operation: &["Foundation.Core.Operation"],
    parameter: &["Foundation.Core.Parameter"],
    parameter_type: &["Foundation.Core.Parameter.type"],
    parameter_default: &["Foundation.Core.Parameter.defaultValue"],
    expression: &["Foundation.Data_Types.Expression"],
    expression_body: &["Foundation.Data_Types.Expression.body"],

    generalization: &["Foundation.Core.Generalization"],
    generalization_child: &["Foundation.Core.Generalization.child"],
    generalization_parent: &["Foundation.Core.Generalization.parent"],
    abstraction: &["Foundation.Core.Abstraction"],
    dependency: &["Foundation.Core.Dependency"],
    dependency_client: &["Foundation.Core.Dependency.client"],
    dependency_supplier: &["Foundation.Core.Dependency.supplier"],

    tag_definition: &[],
    tagged_value_container: &["Foundation.Core.ModelElement.taggedValue"],
    tagged_value: &["Foundation.Extension_Mechanisms.TaggedValue"],
    tagged_value_tag: &["Foundation.Extension_Mechanisms.TaggedValue.tag"],
    tagged_value_value: &["Foundation.Extension_Mechanisms.TaggedValue.value"],
    stereotype: &["Foundation.Extension_Mechanisms.Stereotype"],
    stereotype_extended_element: &["Foundation.Core.ModelElement"],
    element_stereotype: &[],
    is_abstract: &["Foundation.Core.GeneralizableElement.isAbstract"],

    boolean_expression: &["Foundation.Data_Types.BooleanExpression"],
    action_expression: &["Foundation.Data_Types.ActionExpression"],
    state_machine: &["Behavioral_Elements.State_Machines.StateMachine"],
    state_machine_context: &["Behavioral_Elements.State_Machines.StateMachine.context"],
    simple_state: &["Behavioral_Elements.State_Machines.State"],
    pseudostate: &["Behavioral_Elements.State_Machines.Pseudostate"],
    pseudostate_kind: &["Behavioral_Elements.State_Machines.Pseudostate.kind"],
    final_state: &["Behavioral_Elements.State_Machines.Finalstate"],
    vertex_outgoing: &["Behavioral_Elements.State_Machines.StateVertex.outgoing"],
    vertex_incoming: &["Behavioral_Elements.State_Machines.StateVertex.incoming"],
    transition: &["Behavioral_Elements.State_Machines.Transition"],
    transition_effect: &["Behavioral_Elements.State_Machines.Transition.effect"],
    transition_guard: &["Behavioral_Elements.State_Machines.Transition.guard"],

    diagram: &["UML:Diagram"],
    diagram_owner: &["UML:Diagram.owner"],
    semantic_bridge_element: &["UML:Uml1SemanticModelBridge.element"],
};

pub const XMI_1_1: Vocabulary = Vocabulary {
    owned_element: &["UML:Namespace.ownedElement"],
    owned_behavior: &["UML2:BehavioredClassifier.ownedBehavior"],
    name: &["UML:ModelElement.name"],
    model: &["UML:Model"],
    package: &["UML:Package"],
    class: &["UML:Class"],
    interface: &["UML:Interface"],
    datatype: &["UML:DataType"],
    actor: &["UML:Actor"],
    classifier: &["UML:Classifier"],

    association: &["UML:Association"],
    association_class: &["UML:AssociationClass"],
    association_end: &["UML:AssociationEnd"],
    aggregation: &["UML:AssociationEnd.aggregation"],
    association_end_type: &["UML:AssociationEnd.type"],
    association_end_participant: &["UML:AssociationEnd.participant"],
    multiplicity_range: &["UML:MultiplicityRange"],
    multiplicity_lower: &["UML:MultiplicityRange.lower"],
    multiplicity_upper: &["UML:MultiplicityRange.upper"],

    attribute: &["UML:Attribute"],
    structural_feature_type: &["UML:StructuralFeature.type"],
    typed_element_type: &["UML2:TypedElement.type"],
    attribute_initial_value: &["UML:Attribute.initialValue"],
    operation: &["UML:Operation"],
    parameter: &["UML:Parameter"],
    parameter_type: &["UML:Parameter.type", "UML2:TypedElement.type"],
    parameter_default: &["UML:Parameter.defaultValue"],
    expression: &["UML:Expression", "UML2:OpaqueExpression"],

    generalization: &["UML:Generalization"],
    generalization_child: &["UML:Generalization.child"],
    generalization_parent: &["UML:Generalization.parent"],
    abstraction: &["UML:Abstraction"],
    dependency: &["UML:Dependency"],
    dependency_client: &["UML:Dependency.client"],
    dependency_supplier: &["UML:Dependency.supplier"],

    tag_definition: &["UML:TagDefinition"],
    tagged_value_container: &["UML:ModelElement.taggedValue"],
    tagged_value: &["UML:TaggedValue"],
    tagged_value_tag: &["UML:TaggedValue.tag"],
    tagged_value_value: &["UML:TaggedValue.value"],
    stereotype: &["UML:Stereotype"],
    stereotype_extended_element: &["UML:ModelElement"],
    element_stereotype: &["UML:ModelElement.stereotype"],
    is_abstract: &["UML:GeneralizableElement.isAbstract"],

    boolean_expression: &["UML:BooleanExpression", "UML2:OpaqueExpression"],
    action_expression: &["UML:ActionExpression"],
    state_machine: &["UML:StateMachine", "UML2:StateMachine"],
    state_machine_context: &["UML:StateMachine.context"],
    simple_state: &["UML:SimpleState", "UML2:State"],
    pseudostate: &["UML:Pseudostate", "UML2:PseudoState", "UML2:Pseudostate"],
    pseudostate_kind: &["kind"],
    final_state: &["UML:FinalState", "UML2:FinalState"],
    vertex_outgoing: &["UML:StateVertex.outgoing", "UML2:Vertex.outgoing"],
    vertex_incoming: &["UML:StateVertex.incoming", "UML2:Vertex.incoming"],
    transition: &["UML:Transition", "UML2:Transition"],
    transition_effect: &["UML:Transition.effect", "UML2:Transition.effect"],
    transition_guard: &["UML:Transition.guard", "UML2:Transition.guard"],
    ..XMI_1_0
};

pub const XMI_1_2: Vocabulary = Vocabulary {
    tagged_value_value: &["UML:TaggedValue.dataValue"],
    ..XMI_1_1
};

/// Concatenate several tag lists into one search list.
pub fn joined(lists: &[Tags]) -> Vec<&'static str> {
    lists.iter().flat_map(|l| l.iter().copied()).collect()
}
