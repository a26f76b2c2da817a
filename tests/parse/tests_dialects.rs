//! Dialect detection and cross-dialect equivalence tests.

use crate::helpers::fixtures::*;
use crate::helpers::graph_helpers::*;
use rstest::rstest;
use umlxmi::{Dialect, Document};

// =============================================================================
// DETECTION
// =============================================================================

#[rstest]
#[case("1.0", Dialect::Xmi10)]
#[case("0.9", Dialect::Xmi10)]
#[case("1.1", Dialect::Xmi11)]
#[case("1.2", Dialect::Xmi12)]
#[case(" 1.2 ", Dialect::Xmi12)]
#[case("1.3", Dialect::Xmi12)]
#[case("2.0", Dialect::Xmi12)]
fn test_dialect_from_version(#[case] version: &str, #[case] expected: Dialect) {
    assert_eq!(Dialect::from_version(version), expected);
}

#[test]
fn test_version_compares_as_text() {
    // "1.10" sorts below "1.2", so it reads as XMI 1.1.
    assert_eq!(Dialect::from_version("1.10"), Dialect::Xmi11);

    let source = SHOP_1_1.replace(r#"xmi.version="1.1""#, r#"xmi.version="1.10""#);
    let doc = Document::parse_str(&source).unwrap();
    assert_eq!(Dialect::detect(doc.find_first("XMI").unwrap()), Dialect::Xmi11);

    let graph = parse_fixture(&source);
    assert_eq!(graph_signature(&graph), graph_signature(&parse_fixture(SHOP_1_1)));
}

#[test]
fn test_missing_version_reads_as_1_0() {
    let doc = Document::parse_str("<XMI><XMI.content/></XMI>").unwrap();
    assert_eq!(Dialect::detect(doc.root().unwrap()), Dialect::Xmi10);
}

// =============================================================================
// EQUIVALENCE
// =============================================================================

#[test]
fn test_same_model_in_two_dialects() {
    let v10 = parse_fixture(SHOP_1_0);
    let v11 = parse_fixture(SHOP_1_1);

    assert_eq!(graph_signature(&v10), graph_signature(&v11));
    assert_eq!(v10.len(), v11.len());
}

#[rstest]
#[case::xmi_1_0(SHOP_1_0)]
#[case::xmi_1_1(SHOP_1_1)]
fn test_shop_model_contents(#[case] source: &str) {
    let graph = parse_fixture(source);
    let model = graph.model();

    assert_eq!(model.name().to_string(), "shop");
    let packages: Vec<String> = model.packages(true).iter().map(|p| p.name().to_string()).collect();
    assert_eq!(packages, vec!["orders"]);
    assert_eq!(names(&model.classes(true)), vec!["Order", "Line", "Item"]);

    let order = class(&graph, "c1");
    assert_eq!(order.attribute_names(), vec!["total"]);
    let total = order.attributes()[0];
    assert_eq!(total.type_name().as_deref(), Some("int"));
    assert_eq!(total.owner().unwrap().id().as_str(), "c1");
    assert_eq!(order.package().unwrap().name().to_string(), "orders");
}

#[test]
fn test_parse_is_deterministic() {
    let first = parse_fixture(SHOP_1_1);
    let second = parse_fixture(SHOP_1_1);
    assert_eq!(graph_signature(&first), graph_signature(&second));
}

// =============================================================================
// TAGGED VALUES
// =============================================================================

#[test]
fn test_blank_tag_is_skipped() {
    let source = r#"<XMI xmi.version="1.1"><XMI.content>
      <UML:Model xmi.id="m" name="shop">
        <UML:Namespace.ownedElement>
          <UML:Class xmi.id="c1" name="Order">
            <UML:ModelElement.taggedValue>
              <UML:TaggedValue>
                <UML:TaggedValue.tag>  </UML:TaggedValue.tag>
                <UML:TaggedValue.value>x</UML:TaggedValue.value>
              </UML:TaggedValue>
              <UML:TaggedValue>
                <UML:TaggedValue.tag>doc</UML:TaggedValue.tag>
                <UML:TaggedValue.value>y</UML:TaggedValue.value>
              </UML:TaggedValue>
            </UML:ModelElement.taggedValue>
          </UML:Class>
        </UML:Namespace.ownedElement>
      </UML:Model>
    </XMI.content></XMI>"#;
    let graph = parse_fixture(source);

    let order = class(&graph, "c1");
    assert_eq!(order.element().tagged_value("doc"), Some("y"));
    assert_eq!(order.element().tagged_values().len(), 1);
}
