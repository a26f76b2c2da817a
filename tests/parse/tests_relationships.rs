//! Relationship resolution tests.
//!
//! These tests verify that generalizations, associations, dependencies and
//! internal-class elision produce the expected edges on the finished graph.

use crate::helpers::fixtures::*;
use crate::helpers::graph_helpers::*;
use umlxmi::base::UNBOUNDED;
use umlxmi::model::AggregationKind;

// =============================================================================
// GENERALIZATION
// =============================================================================

#[test]
fn test_generalization_links_parent_and_child() {
    let graph = parse_fixture(SHOP_1_1);

    let item = class(&graph, "c3");
    let line = class(&graph, "c2");
    assert_eq!(names(&item.gen_children(false)), vec!["Line"]);
    assert_eq!(names(&line.gen_parents(false)), vec!["Item"]);
    assert!(class(&graph, "c1").gen_parents(false).is_empty());
}

#[test]
fn test_generalization_recursive() {
    let source = r#"<XMI xmi.version="1.2"><XMI.content>
      <UML:Model xmi.id="m" name="zoo">
        <UML:Namespace.ownedElement>
          <UML:Class xmi.id="c1" name="Animal"/>
          <UML:Class xmi.id="c2" name="Bird"/>
          <UML:Class xmi.id="c3" name="Parrot"/>
          <UML:Generalization xmi.id="g1">
            <UML:Generalization.child><UML:Class xmi.idref="c2"/></UML:Generalization.child>
            <UML:Generalization.parent><UML:Class xmi.idref="c1"/></UML:Generalization.parent>
          </UML:Generalization>
          <UML:Generalization xmi.id="g2">
            <UML:Generalization.child><UML:Class xmi.idref="c3"/></UML:Generalization.child>
            <UML:Generalization.parent><UML:Class xmi.idref="c2"/></UML:Generalization.parent>
          </UML:Generalization>
        </UML:Namespace.ownedElement>
      </UML:Model>
    </XMI.content></XMI>"#;
    let graph = parse_fixture(source);

    let animal = class(&graph, "c1");
    assert_eq!(names(&animal.gen_children(false)), vec!["Bird"]);
    assert_eq!(names(&animal.gen_children(true)), vec!["Bird", "Parrot"]);
    assert_eq!(names(&class(&graph, "c3").gen_parents(true)), vec!["Bird", "Animal"]);
}

// =============================================================================
// ASSOCIATIONS
// =============================================================================

#[test]
fn test_composite_association_edges() {
    let graph = parse_fixture(SHOP_1_1);
    let order = class(&graph, "c1");
    let line = class(&graph, "c2");

    let from: Vec<String> = order.associations_from().iter().map(|a| a.id().to_string()).collect();
    let to: Vec<String> = line.associations_to().iter().map(|a| a.id().to_string()).collect();
    assert_eq!(from, vec!["as1"]);
    assert_eq!(to, vec!["as1"]);

    // The aggregating end is the master; the other end's class is its detail.
    assert_eq!(order.subtype_names(false), vec!["Line"]);
    assert!(line.aggregated_classes(false).is_empty());
}

#[test]
fn test_association_ends() {
    let graph = parse_fixture(SHOP_1_1);
    let association = graph.get("as1").and_then(|e| e.as_association()).unwrap();

    let from_end = association.from_end().unwrap();
    assert_eq!(from_end.aggregation(), AggregationKind::Composite);
    assert!(!from_end.is_navigable());
    assert_eq!(from_end.target().unwrap().name().to_string(), "Order");

    let to_end = association.to_end().unwrap();
    assert_eq!(to_end.aggregation(), AggregationKind::None);
    assert!(to_end.is_navigable());
    assert_eq!(to_end.lower_bound(), 1);
    assert_eq!(to_end.upper_bound(), UNBOUNDED);
    assert!(to_end.multiplicity().is_unbounded());
    assert_eq!(to_end.target().unwrap().name().to_string(), "Line");
}

#[test]
fn test_association_names() {
    let graph = parse_fixture(SHOP_1_1);
    let association = graph.get("as1").and_then(|e| e.as_association()).unwrap();

    assert_eq!(association.name(), "order_lines");
    assert_eq!(association.inverse_name(), "lines_order");
}

#[test]
fn test_filtered_associations_and_dependence() {
    let graph = parse_fixture(SHOP_1_1);
    let order = class(&graph, "c1");
    let line = class(&graph, "c2");

    let composite = order.associations_from_filtered(&[AggregationKind::Composite], &[AggregationKind::None]);
    assert_eq!(composite.len(), 1);
    assert!(order
        .associations_from_filtered(&[AggregationKind::Aggregate], &[AggregationKind::None])
        .is_empty());

    assert!(line.is_dependent());
    assert!(!order.is_dependent());
}

#[test]
fn test_association_end_with_two_ranges_uses_first() {
    let source = r#"<XMI xmi.version="1.2"><XMI.content>
      <UML:Model xmi.id="m" name="shop">
        <UML:Namespace.ownedElement>
          <UML:Class xmi.id="c1" name="Order"/>
          <UML:Class xmi.id="c2" name="Line"/>
          <UML:Association xmi.id="as1">
            <UML:Association.connection>
              <UML:AssociationEnd xmi.id="e1" aggregation="composite">
                <UML:AssociationEnd.participant><UML:Class xmi.idref="c1"/></UML:AssociationEnd.participant>
              </UML:AssociationEnd>
              <UML:AssociationEnd xmi.id="e2" aggregation="none">
                <UML:AssociationEnd.multiplicity>
                  <UML:Multiplicity><UML:Multiplicity.range>
                    <UML:MultiplicityRange lower="0" upper="1"/>
                    <UML:MultiplicityRange lower="3" upper="5"/>
                  </UML:Multiplicity.range></UML:Multiplicity>
                </UML:AssociationEnd.multiplicity>
                <UML:AssociationEnd.participant><UML:Class xmi.idref="c2"/></UML:AssociationEnd.participant>
              </UML:AssociationEnd>
            </UML:Association.connection>
          </UML:Association>
        </UML:Namespace.ownedElement>
      </UML:Model>
    </XMI.content></XMI>"#;
    let graph = parse_fixture(source);

    let association = graph.get("as1").and_then(|e| e.as_association()).unwrap();
    let to_end = association.to_end().unwrap();
    assert_eq!(to_end.lower_bound(), 0);
    assert_eq!(to_end.upper_bound(), 1);
    assert_eq!(class(&graph, "c1").subtype_names(false), vec!["Line"]);
}

#[test]
fn test_package_associations_listed_once() {
    let graph = parse_fixture(SHOP_1_1);
    let associations = graph.model().package().associations(true);
    assert_eq!(associations.len(), 1);
    assert_eq!(associations[0].id().as_str(), "as1");
}

// =============================================================================
// DEPENDENCIES
// =============================================================================

#[test]
fn test_dependency_on_client() {
    let graph = parse_fixture(SHOP_1_1);
    let order = class(&graph, "c1");

    let dependencies = order.client_dependencies();
    assert_eq!(dependencies.len(), 1);
    assert!(!dependencies[0].is_abstraction());
    assert_eq!(names(&order.client_dependency_classes()), vec!["Item"]);
    assert!(class(&graph, "c3").client_dependencies().is_empty());
}

#[test]
fn test_realization_links_both_sides() {
    let source = r#"<XMI xmi.version="1.2"><XMI.content>
      <UML:Model xmi.id="m" name="shop">
        <UML:Namespace.ownedElement>
          <UML:Interface xmi.id="i1" name="Priced"/>
          <UML:Class xmi.id="c1" name="Order"/>
          <UML:Abstraction xmi.id="ab1">
            <UML:ModelElement.stereotype><UML:Stereotype xmi.idref="st-realize"/></UML:ModelElement.stereotype>
            <UML:Dependency.client><UML:Class xmi.idref="c1"/></UML:Dependency.client>
            <UML:Dependency.supplier><UML:Interface xmi.idref="i1"/></UML:Dependency.supplier>
          </UML:Abstraction>
          <UML:Stereotype xmi.id="st-realize" name="realize"/>
        </UML:Namespace.ownedElement>
      </UML:Model>
    </XMI.content></XMI>"#;
    let graph = parse_fixture(source);

    let order = class(&graph, "c1");
    let priced = class(&graph, "i1");
    assert_eq!(names(&order.realization_parents()), vec!["Priced"]);
    assert_eq!(names(&priced.realization_children(false)), vec!["Order"]);

    let abstraction = graph.get("ab1").and_then(|e| e.as_dependency()).unwrap();
    assert!(abstraction.is_realization());
    assert_eq!(abstraction.element().parent().unwrap().id().as_str(), "c1");
}

// =============================================================================
// INTERNAL CLASSES
// =============================================================================

#[test]
fn test_empty_reserved_class_is_internal() {
    let graph = parse_fixture(PRIMITIVES_1_2);
    let model = graph.model();

    let listed: Vec<String> = names(&model.classes(true));
    assert!(!listed.contains(&"string".to_string()));
    assert!(listed.contains(&"int".to_string()));
    assert!(listed.contains(&"Person".to_string()));

    let all = names(&model.classes_with_internal(true));
    assert!(all.contains(&"string".to_string()));
    assert!(class(&graph, "c-string").is_internal());
    assert!(!class(&graph, "c-int").is_internal());
}
