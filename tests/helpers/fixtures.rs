//! XMI documents shared by the integration tests.

// =============================================================================
// ONE MODEL, TWO DIALECTS
// =============================================================================

/// Order/Line/Item with a typed attribute, a generalization, a composite
/// association and a dependency, written as XMI 1.0.
pub const SHOP_1_0: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<XMI xmi.version="1.0">
  <XMI.header/>
  <XMI.content>
    <Foundation.Core.DataType xmi.id="dt1">
      <Foundation.Core.ModelElement.name>int</Foundation.Core.ModelElement.name>
    </Foundation.Core.DataType>
    <Model_Management.Model xmi.id="m">
      <Foundation.Core.ModelElement.name>shop</Foundation.Core.ModelElement.name>
      <Foundation.Core.Namespace.ownedElement>
        <Model_Management.Package xmi.id="p1">
          <Foundation.Core.ModelElement.name>orders</Foundation.Core.ModelElement.name>
          <Foundation.Core.Namespace.ownedElement>
            <Foundation.Core.Class xmi.id="c1">
              <Foundation.Core.ModelElement.name>Order</Foundation.Core.ModelElement.name>
              <Foundation.Core.Classifier.feature>
                <Foundation.Core.Attribute xmi.id="a1">
                  <Foundation.Core.ModelElement.name>total</Foundation.Core.ModelElement.name>
                  <Foundation.Core.StructuralFeature.type>
                    <Foundation.Core.Classifier xmi.idref="dt1"/>
                  </Foundation.Core.StructuralFeature.type>
                </Foundation.Core.Attribute>
              </Foundation.Core.Classifier.feature>
            </Foundation.Core.Class>
            <Foundation.Core.Class xmi.id="c2">
              <Foundation.Core.ModelElement.name>Line</Foundation.Core.ModelElement.name>
            </Foundation.Core.Class>
            <Foundation.Core.Class xmi.id="c3">
              <Foundation.Core.ModelElement.name>Item</Foundation.Core.ModelElement.name>
            </Foundation.Core.Class>
            <Foundation.Core.Generalization xmi.id="g1">
              <Foundation.Core.Generalization.child>
                <Foundation.Core.Class xmi.idref="c2"/>
              </Foundation.Core.Generalization.child>
              <Foundation.Core.Generalization.parent>
                <Foundation.Core.Class xmi.idref="c3"/>
              </Foundation.Core.Generalization.parent>
            </Foundation.Core.Generalization>
            <Foundation.Core.Association xmi.id="as1">
              <Foundation.Core.Association.connection>
                <Foundation.Core.AssociationEnd xmi.id="e1">
                  <Foundation.Core.AssociationEnd.isNavigable xmi.value="false"/>
                  <Foundation.Core.AssociationEnd.aggregation xmi.value="composite"/>
                  <Foundation.Core.AssociationEnd.type>
                    <Foundation.Core.Class xmi.idref="c1"/>
                  </Foundation.Core.AssociationEnd.type>
                </Foundation.Core.AssociationEnd>
                <Foundation.Core.AssociationEnd xmi.id="e2">
                  <Foundation.Core.ModelElement.name>lines</Foundation.Core.ModelElement.name>
                  <Foundation.Core.AssociationEnd.isNavigable xmi.value="true"/>
                  <Foundation.Core.AssociationEnd.aggregation xmi.value="none"/>
                  <Foundation.Core.AssociationEnd.multiplicity>
                    <Foundation.Data_Types.Multiplicity>
                      <Foundation.Data_Types.Multiplicity.range>
                        <Foundation.Data_Types.MultiplicityRange>
                          <Foundation.Data_Types.MultiplicityRange.lower>1</Foundation.Data_Types.MultiplicityRange.lower>
                          <Foundation.Data_Types.MultiplicityRange.upper>-1</Foundation.Data_Types.MultiplicityRange.upper>
                        </Foundation.Data_Types.MultiplicityRange>
                      </Foundation.Data_Types.Multiplicity.range>
                    </Foundation.Data_Types.Multiplicity>
                  </Foundation.Core.AssociationEnd.multiplicity>
                  <Foundation.Core.AssociationEnd.type>
                    <Foundation.Core.Class xmi.idref="c2"/>
                  </Foundation.Core.AssociationEnd.type>
                </Foundation.Core.AssociationEnd>
              </Foundation.Core.Association.connection>
            </Foundation.Core.Association>
            <Foundation.Core.Dependency xmi.id="d1">
              <Foundation.Core.Dependency.client>
                <Foundation.Core.Class xmi.idref="c1"/>
              </Foundation.Core.Dependency.client>
              <Foundation.Core.Dependency.supplier>
                <Foundation.Core.Class xmi.idref="c3"/>
              </Foundation.Core.Dependency.supplier>
            </Foundation.Core.Dependency>
          </Foundation.Core.Namespace.ownedElement>
        </Model_Management.Package>
      </Foundation.Core.Namespace.ownedElement>
    </Model_Management.Model>
  </XMI.content>
</XMI>
"#;

/// [`SHOP_1_0`] written as XMI 1.1.
pub const SHOP_1_1: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<XMI xmi.version="1.1" xmlns:UML="org.omg.xmi.namespace.UML">
  <XMI.header/>
  <XMI.content>
    <UML:DataType xmi.id="dt1" name="int"/>
    <UML:Model xmi.id="m" name="shop">
      <UML:Namespace.ownedElement>
        <UML:Package xmi.id="p1" name="orders">
          <UML:Namespace.ownedElement>
            <UML:Class xmi.id="c1" name="Order">
              <UML:Classifier.feature>
                <UML:Attribute xmi.id="a1" name="total">
                  <UML:StructuralFeature.type>
                    <UML:DataType xmi.idref="dt1"/>
                  </UML:StructuralFeature.type>
                </UML:Attribute>
              </UML:Classifier.feature>
            </UML:Class>
            <UML:Class xmi.id="c2" name="Line">
              <UML:GeneralizableElement.generalization>
                <UML:Generalization xmi.idref="g1"/>
              </UML:GeneralizableElement.generalization>
            </UML:Class>
            <UML:Class xmi.id="c3" name="Item"/>
            <UML:Generalization xmi.id="g1">
              <UML:Generalization.child><UML:Class xmi.idref="c2"/></UML:Generalization.child>
              <UML:Generalization.parent><UML:Class xmi.idref="c3"/></UML:Generalization.parent>
            </UML:Generalization>
            <UML:Association xmi.id="as1">
              <UML:Association.connection>
                <UML:AssociationEnd xmi.id="e1" isNavigable="false">
                  <UML:AssociationEnd.aggregation xmi.value="composite"/>
                  <UML:AssociationEnd.participant><UML:Class xmi.idref="c1"/></UML:AssociationEnd.participant>
                </UML:AssociationEnd>
                <UML:AssociationEnd xmi.id="e2" name="lines" isNavigable="true">
                  <UML:AssociationEnd.aggregation xmi.value="none"/>
                  <UML:AssociationEnd.multiplicity>
                    <UML:Multiplicity>
                      <UML:Multiplicity.range>
                        <UML:MultiplicityRange>
                          <UML:MultiplicityRange.lower>1</UML:MultiplicityRange.lower>
                          <UML:MultiplicityRange.upper>-1</UML:MultiplicityRange.upper>
                        </UML:MultiplicityRange>
                      </UML:Multiplicity.range>
                    </UML:Multiplicity>
                  </UML:AssociationEnd.multiplicity>
                  <UML:AssociationEnd.participant><UML:Class xmi.idref="c2"/></UML:AssociationEnd.participant>
                </UML:AssociationEnd>
              </UML:Association.connection>
            </UML:Association>
            <UML:Dependency xmi.id="d1">
              <UML:Dependency.client><UML:Class xmi.idref="c1"/></UML:Dependency.client>
              <UML:Dependency.supplier><UML:Class xmi.idref="c3"/></UML:Dependency.supplier>
            </UML:Dependency>
          </UML:Namespace.ownedElement>
        </UML:Package>
      </UML:Namespace.ownedElement>
    </UML:Model>
  </XMI.content>
</XMI>
"#;

// =============================================================================
// INTERNAL CLASSES
// =============================================================================

pub const PRIMITIVES_1_2: &str = r#"<XMI xmi.version="1.2">
  <XMI.content>
    <UML:Model xmi.id="m" name="types">
      <UML:Namespace.ownedElement>
        <UML:Class xmi.id="c-string" name="string"/>
        <UML:Class xmi.id="c-int" name="int">
          <UML:Classifier.feature>
            <UML:Attribute xmi.id="a1" name="value"/>
          </UML:Classifier.feature>
        </UML:Class>
        <UML:Class xmi.id="c-person" name="Person"/>
      </UML:Namespace.ownedElement>
    </UML:Model>
  </XMI.content>
</XMI>
"#;

// =============================================================================
// STATE MACHINES AND DIAGRAMS
// =============================================================================

/// A product package with two machines: `order_workflow` governs Order
/// through its context and Invoice through `use_workflow`;
/// `plain_workflow` has neither a pseudostate nor an `initial_state` tag.
/// An unnamed machine on the model is named by its diagram.
pub const WORKFLOW_1_2: &str = r#"<XMI xmi.version="1.2">
  <XMI.content>
    <UML:Model xmi.id="m" name="workflows">
      <UML:Namespace.ownedElement>
        <UML:Package xmi.id="p1" name="shop">
          <UML:ModelElement.stereotype><UML:Stereotype xmi.idref="st-product"/></UML:ModelElement.stereotype>
          <UML:Namespace.ownedElement>
            <UML:Class xmi.id="c1" name="Order"/>
            <UML:Class xmi.id="c2" name="Invoice">
              <UML:ModelElement.taggedValue>
                <UML:TaggedValue xmi.id="tv1">
                  <UML:TaggedValue.dataValue>order_workflow</UML:TaggedValue.dataValue>
                  <UML:TaggedValue.type><UML:TagDefinition xmi.idref="td-wf"/></UML:TaggedValue.type>
                </UML:TaggedValue>
              </UML:ModelElement.taggedValue>
            </UML:Class>
            <UML:StateMachine xmi.id="sm1" name="order_workflow">
              <UML:StateMachine.context><UML:Class xmi.idref="c1"/></UML:StateMachine.context>
              <UML:StateMachine.top>
                <UML:CompositeState xmi.id="top1">
                  <UML:CompositeState.subvertex>
                    <UML:SimpleState xmi.id="s1" name="draft">
                      <UML:StateVertex.outgoing><UML:Transition xmi.idref="t1"/></UML:StateVertex.outgoing>
                      <UML:StateVertex.incoming>
                        <UML:Transition xmi.idref="t0"/>
                        <UML:Transition xmi.idref="t2"/>
                      </UML:StateVertex.incoming>
                    </UML:SimpleState>
                    <UML:Pseudostate xmi.id="s0" kind="initial">
                      <UML:StateVertex.outgoing><UML:Transition xmi.idref="t0"/></UML:StateVertex.outgoing>
                    </UML:Pseudostate>
                    <UML:SimpleState xmi.id="s2" name="submitted">
                      <UML:StateVertex.outgoing><UML:Transition xmi.idref="t2"/></UML:StateVertex.outgoing>
                      <UML:StateVertex.incoming><UML:Transition xmi.idref="t1"/></UML:StateVertex.incoming>
                    </UML:SimpleState>
                  </UML:CompositeState.subvertex>
                </UML:CompositeState>
              </UML:StateMachine.top>
              <UML:StateMachine.transitions>
                <UML:Transition xmi.id="t0"/>
                <UML:Transition xmi.id="t1" name="submit">
                  <UML:Transition.effect>
                    <UML:CallAction xmi.id="ac1" name="validate;notify"/>
                  </UML:Transition.effect>
                  <UML:Transition.guard>
                    <UML:Guard xmi.id="gd1">
                      <UML:Guard.expression>
                        <UML:BooleanExpression body="guard_roles:Owner,Manager|guard_permissions:Modify|guard_expr:python:ok|unknown:x"/>
                      </UML:Guard.expression>
                    </UML:Guard>
                  </UML:Transition.guard>
                </UML:Transition>
                <UML:Transition xmi.id="t2" name="retract">
                  <UML:ModelElement.taggedValue>
                    <UML:TaggedValue xmi.id="tv2">
                      <UML:TaggedValue.dataValue>automatic</UML:TaggedValue.dataValue>
                      <UML:TaggedValue.type><UML:TagDefinition xmi.idref="td-tt"/></UML:TaggedValue.type>
                    </UML:TaggedValue>
                  </UML:ModelElement.taggedValue>
                  <UML:Transition.effect>
                    <UML:CallAction xmi.id="ac2" name="only"/>
                  </UML:Transition.effect>
                </UML:Transition>
              </UML:StateMachine.transitions>
            </UML:StateMachine>
            <UML:StateMachine xmi.id="sm2" name="plain_workflow">
              <UML:StateMachine.top>
                <UML:CompositeState xmi.id="top2">
                  <UML:CompositeState.subvertex>
                    <UML:SimpleState xmi.id="s10" name="first"/>
                    <UML:SimpleState xmi.id="s11" name="second"/>
                  </UML:CompositeState.subvertex>
                </UML:CompositeState>
              </UML:StateMachine.top>
            </UML:StateMachine>
          </UML:Namespace.ownedElement>
        </UML:Package>
        <UML:StateMachine xmi.id="sm3">
          <UML:StateMachine.top>
            <UML:CompositeState xmi.id="top3">
              <UML:CompositeState.subvertex>
                <UML:SimpleState xmi.id="s20" name="open"/>
              </UML:CompositeState.subvertex>
            </UML:CompositeState>
          </UML:StateMachine.top>
        </UML:StateMachine>
        <UML:Stereotype xmi.id="st-product" name="product"/>
        <UML:TagDefinition xmi.id="td-wf" name="use_workflow"/>
        <UML:TagDefinition xmi.id="td-tt" name="trigger_type"/>
      </UML:Namespace.ownedElement>
    </UML:Model>
    <UML:Diagram xmi.id="dg1" name="ticket_flow">
      <UML:Diagram.owner>
        <UML:Uml1SemanticModelBridge xmi.id="br1">
          <UML:Uml1SemanticModelBridge.element>
            <UML:StateMachine xmi.idref="sm3"/>
          </UML:Uml1SemanticModelBridge.element>
        </UML:Uml1SemanticModelBridge>
      </UML:Diagram.owner>
    </UML:Diagram>
  </XMI.content>
</XMI>
"#;

// =============================================================================
// PROFILES
// =============================================================================

pub const PROFILE_KEY: &str = "default-uml14.xmi";

pub const PROFILE_1_2: &str = r#"<XMI xmi.version="1.2">
  <XMI.content>
    <UML:Model xmi.id="pm" name="Default UML profile">
      <UML:Namespace.ownedElement>
        <UML:DataType xmi.id="dt-string" name="String"/>
        <UML:Stereotype xmi.id="st-entity" name="entity"/>
        <UML:Class xmi.id="c1" name="Base"/>
      </UML:Namespace.ownedElement>
    </UML:Model>
  </XMI.content>
</XMI>
"#;

/// Uses the profile's datatype, stereotype and class through hrefs. The
/// primary's `c1` shares its raw id with the profile's `Base`.
pub const PROFILED_1_2: &str = r#"<XMI xmi.version="1.2">
  <XMI.content>
    <UML:Model xmi.id="m" name="crm">
      <UML:Namespace.ownedElement>
        <UML:Class xmi.id="c1" name="Customer">
          <UML:ModelElement.stereotype>
            <UML:Stereotype href="http://argouml.org/profiles/uml14/default-uml14.xmi#st-entity"/>
          </UML:ModelElement.stereotype>
          <UML:Classifier.feature>
            <UML:Attribute xmi.id="a1" name="email">
              <UML:StructuralFeature.type>
                <UML:DataType href="http://argouml.org/profiles/uml14/default-uml14.xmi#dt-string"/>
              </UML:StructuralFeature.type>
            </UML:Attribute>
          </UML:Classifier.feature>
        </UML:Class>
        <UML:Generalization xmi.id="g1">
          <UML:Generalization.child><UML:Class xmi.idref="c1"/></UML:Generalization.child>
          <UML:Generalization.parent>
            <UML:Class href="http://argouml.org/profiles/uml14/default-uml14.xmi#c1"/>
          </UML:Generalization.parent>
        </UML:Generalization>
      </UML:Namespace.ownedElement>
    </UML:Model>
  </XMI.content>
</XMI>
"#;

/// Listing stored as the `.profile` entry of an ArgoUML archive.
pub const PROFILE_LISTING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<profiles>
  <userDefined>
    <filename>default-uml14.xmi</filename>
  </userDefined>
</profiles>
"#;
