//! The cross-referenced UML object graph.
//!
//! ## Design
//!
//! Every element lives in one flat, append-only arena and is addressed by an
//! [`ElementRef`] index. Relationship edges are lists of indices filled in
//! after construction, so forward references never need pointers.
//!
//! ```text
//! ModelGraph
//! ├── elements: Vec<Element>                  (creation order)
//! ├── index: IndexMap<ElementId, ElementRef>  (every element with a source id)
//! ├── root: ElementRef                        (the primary document's Model)
//! └── profiles: IndexMap<String, ElementRef>  (one Model per profile document)
//! ```

mod kinds;
pub mod views;

use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::base::{Multiplicity, NormalizedValue, clean_name};

pub use kinds::{AggregationKind, OwnerScope, StateKind, TriggerType, Visibility};
pub use views::{
    ActionView, AssociationEndView, AssociationView, ClassView, DependencyView, DiagramView,
    ElementView, GuardView, MethodView, ModelView, PackageView, ParameterView, StateMachineView,
    StateView, TransitionView,
};

// ============================================================================
// IDS
// ============================================================================

/// Document-unique identifier of an element (`xmi.id`), prefixed with
/// `profile#` for elements read from a profile document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub Arc<str>);

impl ElementId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::borrow::Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Index of an element inside its [`ModelGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef(u32);

impl ElementRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ============================================================================
// ELEMENT KINDS
// ============================================================================

/// The UML metatype of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Model,
    Package,
    Class,
    Interface,
    AssociationClass,
    Attribute,
    Method,
    Parameter,
    AssociationEnd,
    Association,
    Dependency,
    Abstraction,
    StateMachine,
    State,
    Transition,
    Action,
    Guard,
    Diagram,
}

impl ElementKind {
    /// Model, Package.
    pub fn is_package(&self) -> bool {
        matches!(self, Self::Model | Self::Package)
    }

    /// Class, Interface, AssociationClass.
    pub fn is_classifier(&self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::AssociationClass)
    }

    /// Association, AssociationClass.
    pub fn is_association(&self) -> bool {
        matches!(self, Self::Association | Self::AssociationClass)
    }
}

// ============================================================================
// ELEMENT PAYLOADS
// ============================================================================

/// Owned contents shared by Model and Package.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackageData {
    pub packages: Vec<ElementRef>,
    pub classes: Vec<ElementRef>,
    pub interfaces: Vec<ElementRef>,
    pub state_machines: Vec<ElementRef>,
    /// True for a Model and for packages carrying a product stereotype.
    pub is_root: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelData {
    pub package: PackageData,
    /// Diagrams by diagram id.
    pub diagrams: IndexMap<ElementId, ElementRef>,
    /// Diagrams by the id of the element they depict.
    pub diagrams_by_element: IndexMap<ElementId, ElementRef>,
    /// Profile key for models built from a profile document.
    pub profile: Option<String>,
}

/// Class and Interface payload. An AssociationClass is a class that also
/// carries an [`AssociationData`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassData {
    pub is_interface: bool,
    pub is_abstract: Option<bool>,
    pub visibility: Option<Visibility>,
    pub owner_scope: Option<OwnerScope>,
    pub is_internal: bool,
    pub package: Option<ElementRef>,
    pub attributes: Vec<ElementRef>,
    pub methods: Vec<ElementRef>,
    pub gen_parents: Vec<ElementRef>,
    pub gen_children: Vec<ElementRef>,
    pub realization_parents: Vec<ElementRef>,
    pub realization_children: Vec<ElementRef>,
    pub adaptation_parents: Vec<ElementRef>,
    pub adaptation_children: Vec<ElementRef>,
    pub associations_from: Vec<ElementRef>,
    pub associations_to: Vec<ElementRef>,
    /// The machine governing this class.
    pub state_machine: Option<ElementRef>,
    /// Machines placed on this class as a container.
    pub state_machines: Vec<ElementRef>,
    pub association: Option<AssociationData>,
}

impl ClassData {
    /// No members and no relationship edges.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
            && self.methods.is_empty()
            && self.gen_parents.is_empty()
            && self.gen_children.is_empty()
            && self.realization_parents.is_empty()
            && self.realization_children.is_empty()
            && self.adaptation_parents.is_empty()
            && self.adaptation_children.is_empty()
            && self.associations_from.is_empty()
            && self.associations_to.is_empty()
    }
}

/// The type an attribute or parameter is bound to.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeRef {
    /// Registry id of the type's declaration.
    pub id: ElementId,
    /// Name of the declaration as read from its node.
    pub name: NormalizedValue,
}

/// Attribute and Parameter payload.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureData {
    pub type_ref: Option<TypeRef>,
    pub multiplicity: Multiplicity,
    /// Default-value expression body.
    pub default: Option<String>,
    pub visibility: Option<Visibility>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MethodData {
    pub parameters: Vec<ElementRef>,
    pub visibility: Option<Visibility>,
    pub owner_scope: Option<OwnerScope>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssociationEndData {
    pub association: Option<ElementRef>,
    pub target: Option<ElementRef>,
    pub multiplicity: Multiplicity,
    pub aggregation: AggregationKind,
    pub is_navigable: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssociationData {
    pub from_end: Option<ElementRef>,
    pub to_end: Option<ElementRef>,
}

/// Dependency and Abstraction payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DependencyData {
    pub client: Option<ElementRef>,
    pub supplier: Option<ElementRef>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateMachineData {
    pub states: Vec<ElementRef>,
    pub transitions: Vec<ElementRef>,
    /// Context classes and `use_workflow` claimants. A machine without a
    /// context also lists its container here, whatever its kind.
    pub classes: Vec<ElementRef>,
    /// The package, model, or class the machine was found in.
    pub container: Option<ElementRef>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StateData {
    pub kind: StateKind,
    pub is_initial: bool,
    pub incoming: Vec<ElementRef>,
    pub outgoing: Vec<ElementRef>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionData {
    pub source: Option<ElementRef>,
    pub target: Option<ElementRef>,
    pub action: Option<ElementRef>,
    pub guard: Option<ElementRef>,
}

/// Action and Guard payload: the expression body, if any.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpressionData {
    pub expression: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiagramData {
    pub model_element: Option<ElementRef>,
}

/// Kind-specific payload of an [`Element`].
#[derive(Clone, Debug, PartialEq)]
pub enum ElementData {
    Model(ModelData),
    Package(PackageData),
    Class(ClassData),
    Attribute(FeatureData),
    Method(MethodData),
    Parameter(FeatureData),
    AssociationEnd(AssociationEndData),
    Association(AssociationData),
    Dependency(DependencyData),
    Abstraction(DependencyData),
    StateMachine(StateMachineData),
    State(StateData),
    Transition(TransitionData),
    Action(ExpressionData),
    Guard(ExpressionData),
    Diagram(DiagramData),
}

// ============================================================================
// ELEMENT
// ============================================================================

/// A model element: the shape common to every UML metatype plus its payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub name: NormalizedValue,
    /// Identifier-safe form of [`Element::display_name`].
    pub clean_name: String,
    /// Insertion-ordered; repeated tags are joined with newlines.
    pub tagged_values: IndexMap<String, String>,
    pub stereotypes: IndexSet<String>,
    /// Every owned child, in build order.
    pub children: Vec<ElementRef>,
    pub parent: Option<ElementRef>,
    /// Detail classes of aggregations this element is the master of.
    pub subtypes: Vec<ElementRef>,
    pub client_dependencies: Vec<ElementRef>,
    pub data: ElementData,
}

impl Element {
    pub fn new(id: impl Into<ElementId>, data: ElementData) -> Self {
        let id = id.into();
        let clean_name = clean_name(id.as_str());
        Self {
            id,
            name: NormalizedValue::empty(),
            clean_name,
            tagged_values: IndexMap::new(),
            stereotypes: IndexSet::new(),
            children: Vec::new(),
            parent: None,
            subtypes: Vec::new(),
            client_dependencies: Vec::new(),
            data,
        }
    }

    pub fn with_name(mut self, name: NormalizedValue) -> Self {
        self.set_name(name);
        self
    }

    /// Replace the name and recompute the clean name.
    pub fn set_name(&mut self, name: NormalizedValue) {
        self.name = name;
        self.clean_name = clean_name(&self.display_name());
    }

    /// The name, or the id when the name is empty.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            self.id.to_string()
        } else {
            self.name.to_string()
        }
    }

    pub fn kind(&self) -> ElementKind {
        match &self.data {
            ElementData::Model(_) => ElementKind::Model,
            ElementData::Package(_) => ElementKind::Package,
            ElementData::Class(c) if c.association.is_some() => ElementKind::AssociationClass,
            ElementData::Class(c) if c.is_interface => ElementKind::Interface,
            ElementData::Class(_) => ElementKind::Class,
            ElementData::Attribute(_) => ElementKind::Attribute,
            ElementData::Method(_) => ElementKind::Method,
            ElementData::Parameter(_) => ElementKind::Parameter,
            ElementData::AssociationEnd(_) => ElementKind::AssociationEnd,
            ElementData::Association(_) => ElementKind::Association,
            ElementData::Dependency(_) => ElementKind::Dependency,
            ElementData::Abstraction(_) => ElementKind::Abstraction,
            ElementData::StateMachine(_) => ElementKind::StateMachine,
            ElementData::State(_) => ElementKind::State,
            ElementData::Transition(_) => ElementKind::Transition,
            ElementData::Action(_) => ElementKind::Action,
            ElementData::Guard(_) => ElementKind::Guard,
            ElementData::Diagram(_) => ElementKind::Diagram,
        }
    }

    pub fn tagged_value(&self, tag: &str) -> Option<&str> {
        self.tagged_values.get(tag).map(String::as_str)
    }

    /// True if any of `names` is among the stereotypes.
    pub fn has_stereotype(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.stereotypes.contains(*n))
    }

    /// Add a tagged value, joining repeated tags with a newline.
    pub fn merge_tagged_value(&mut self, tag: String, value: String) {
        match self.tagged_values.get_mut(&tag) {
            Some(existing) => {
                existing.push('\n');
                existing.push_str(&value);
            }
            None => {
                self.tagged_values.insert(tag, value);
            }
        }
    }

    pub fn as_package(&self) -> Option<&PackageData> {
        match &self.data {
            ElementData::Model(m) => Some(&m.package),
            ElementData::Package(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_package_mut(&mut self) -> Option<&mut PackageData> {
        match &mut self.data {
            ElementData::Model(m) => Some(&mut m.package),
            ElementData::Package(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassData> {
        match &self.data {
            ElementData::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassData> {
        match &mut self.data {
            ElementData::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Association payload of an Association or AssociationClass.
    pub fn as_association(&self) -> Option<&AssociationData> {
        match &self.data {
            ElementData::Association(a) => Some(a),
            ElementData::Class(c) => c.association.as_ref(),
            _ => None,
        }
    }

    pub fn as_association_mut(&mut self) -> Option<&mut AssociationData> {
        match &mut self.data {
            ElementData::Association(a) => Some(a),
            ElementData::Class(c) => c.association.as_mut(),
            _ => None,
        }
    }

    pub fn as_state_machine_mut(&mut self) -> Option<&mut StateMachineData> {
        match &mut self.data {
            ElementData::StateMachine(m) => Some(m),
            _ => None,
        }
    }
}

// ============================================================================
// ARENA
// ============================================================================

/// Append-only element store used while the graph is being built.
#[derive(Debug, Default)]
pub(crate) struct ElementArena {
    elements: Vec<Element>,
}

impl ElementArena {
    pub(crate) fn alloc(&mut self, element: Element) -> ElementRef {
        let r = ElementRef(self.elements.len() as u32);
        self.elements.push(element);
        r
    }

    pub(crate) fn get(&self, r: ElementRef) -> &Element {
        &self.elements[r.index()]
    }

    pub(crate) fn get_mut(&mut self, r: ElementRef) -> &mut Element {
        &mut self.elements[r.index()]
    }

    pub(crate) fn refs(&self) -> impl Iterator<Item = ElementRef> + use<> {
        (0..self.elements.len() as u32).map(ElementRef)
    }

    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }
}

// ============================================================================
// GRAPH
// ============================================================================

/// The finished, immutable object graph returned by a parse.
#[derive(Debug, Clone)]
pub struct ModelGraph {
    elements: Vec<Element>,
    index: IndexMap<ElementId, ElementRef>,
    root: ElementRef,
    profiles: IndexMap<String, ElementRef>,
}

impl ModelGraph {
    pub(crate) fn new(
        arena: ElementArena,
        index: IndexMap<ElementId, ElementRef>,
        root: ElementRef,
        profiles: IndexMap<String, ElementRef>,
    ) -> Self {
        Self {
            elements: arena.elements,
            index,
            root,
            profiles,
        }
    }

    /// The primary document's Model.
    pub fn model(&self) -> ModelView<'_> {
        ModelView::new(self.root, self)
    }

    /// The Model built from the profile document with this key.
    pub fn profile(&self, key: &str) -> Option<ModelView<'_>> {
        self.profiles.get(key).map(|&r| ModelView::new(r, self))
    }

    pub fn profile_keys(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn element(&self, r: ElementRef) -> &Element {
        &self.elements[r.index()]
    }

    /// View of the element registered under `id`.
    pub fn get(&self, id: &str) -> Option<ElementView<'_>> {
        self.lookup(id).map(|r| ElementView::new(r, self))
    }

    pub fn lookup(&self, id: &str) -> Option<ElementRef> {
        self.index.get(id).copied()
    }

    pub fn view(&self, r: ElementRef) -> ElementView<'_> {
        ElementView::new(r, self)
    }

    /// Every element in creation order.
    pub fn iter(&self) -> impl Iterator<Item = ElementView<'_>> {
        (0..self.elements.len() as u32).map(move |i| ElementView::new(ElementRef(i), self))
    }

    /// Every registered id with its element, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = (&ElementId, ElementRef)> {
        self.index.iter().map(|(id, r)| (id, *r))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
