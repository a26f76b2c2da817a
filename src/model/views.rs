//! Typed metaclass views over [`ModelGraph`].
//!
//! Zero-copy borrowed views that resolve the graph's index edges into
//! further views. Each view type corresponds to a UML metaclass and exposes
//! its features as methods.
//!
//! ## Usage
//!
//! ```ignore
//! use umlxmi::parse_str;
//!
//! let graph = parse_str(xmi, &Default::default())?;
//! for class in graph.model().classes(true) {
//!     println!("{} <- {:?}", class.display_name(), class.gen_parents(false));
//! }
//! ```

use indexmap::{IndexMap, IndexSet};

use super::{
    AggregationKind, Element, ElementData, ElementId, ElementKind, ElementRef, ExpressionData,
    ModelGraph, OwnerScope, StateKind, TriggerType, TypeRef, Visibility,
};
use crate::base::{Multiplicity, NormalizedValue};

// ============================================================================
// CORE VIEW
// ============================================================================

/// A borrowed view over any element of the graph.
#[derive(Clone, Copy)]
pub struct ElementView<'g> {
    pub element: &'g Element,
    pub graph: &'g ModelGraph,
    r: ElementRef,
}

impl<'g> ElementView<'g> {
    pub fn new(r: ElementRef, graph: &'g ModelGraph) -> Self {
        Self {
            element: graph.element(r),
            graph,
            r,
        }
    }

    fn views(&self, refs: &[ElementRef]) -> Vec<ElementView<'g>> {
        refs.iter().map(|&r| ElementView::new(r, self.graph)).collect()
    }

    fn view(&self, r: ElementRef) -> ElementView<'g> {
        ElementView::new(r, self.graph)
    }

    // ── Identity ────────────────────────────────────────────────────

    /// Arena index of this element.
    pub fn element_ref(&self) -> ElementRef {
        self.r
    }

    pub fn id(&self) -> &'g ElementId {
        &self.element.id
    }

    pub fn name(&self) -> &'g NormalizedValue {
        &self.element.name
    }

    /// The name, or the id for unnamed elements.
    pub fn display_name(&self) -> String {
        self.element.display_name()
    }

    pub fn clean_name(&self) -> &'g str {
        &self.element.clean_name
    }

    pub fn kind(&self) -> ElementKind {
        self.element.kind()
    }

    // ── Ownership ───────────────────────────────────────────────────

    pub fn parent(&self) -> Option<ElementView<'g>> {
        self.element.parent.map(|r| self.view(r))
    }

    pub fn children(&self) -> Vec<ElementView<'g>> {
        self.views(&self.element.children)
    }

    /// Detail classes of aggregations this element is the master of.
    pub fn subtypes(&self) -> Vec<ElementView<'g>> {
        self.views(&self.element.subtypes)
    }

    pub fn client_dependencies(&self) -> Vec<DependencyView<'g>> {
        self.element
            .client_dependencies
            .iter()
            .filter_map(|&r| self.view(r).as_dependency())
            .collect()
    }

    // ── Tagged values and stereotypes ───────────────────────────────

    pub fn tagged_values(&self) -> &'g IndexMap<String, String> {
        &self.element.tagged_values
    }

    pub fn tagged_value(&self, tag: &str) -> Option<&'g str> {
        self.element.tagged_values.get(tag).map(String::as_str)
    }

    pub fn tagged_value_or(&self, tag: &str, default: &'g str) -> &'g str {
        self.tagged_value(tag).unwrap_or(default)
    }

    pub fn has_tagged_value(&self, tag: &str) -> bool {
        self.element.tagged_values.contains_key(tag)
    }

    pub fn stereotypes(&self) -> &'g IndexSet<String> {
        &self.element.stereotypes
    }

    /// The first stereotype in declaration order.
    pub fn stereotype(&self) -> Option<&'g str> {
        self.element.stereotypes.first().map(String::as_str)
    }

    pub fn has_stereotype(&self, names: &[&str]) -> bool {
        self.element.has_stereotype(names)
    }

    // ── Downcast to typed views ─────────────────────────────────────

    pub fn as_model(&self) -> Option<ModelView<'g>> {
        match self.element.data {
            ElementData::Model(_) => Some(ModelView { inner: *self }),
            _ => None,
        }
    }

    /// Model or Package.
    pub fn as_package(&self) -> Option<PackageView<'g>> {
        self.element
            .as_package()
            .map(|_| PackageView { inner: *self })
    }

    /// Class, Interface or AssociationClass.
    pub fn as_class(&self) -> Option<ClassView<'g>> {
        self.element.as_class().map(|_| ClassView { inner: *self })
    }

    pub fn as_attribute(&self) -> Option<AttributeView<'g>> {
        match self.element.data {
            ElementData::Attribute(_) => Some(AttributeView { inner: *self }),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<MethodView<'g>> {
        match self.element.data {
            ElementData::Method(_) => Some(MethodView { inner: *self }),
            _ => None,
        }
    }

    pub fn as_parameter(&self) -> Option<ParameterView<'g>> {
        match self.element.data {
            ElementData::Parameter(_) => Some(ParameterView { inner: *self }),
            _ => None,
        }
    }

    /// Association or AssociationClass.
    pub fn as_association(&self) -> Option<AssociationView<'g>> {
        self.element
            .as_association()
            .map(|_| AssociationView { inner: *self })
    }

    pub fn as_association_end(&self) -> Option<AssociationEndView<'g>> {
        match self.element.data {
            ElementData::AssociationEnd(_) => Some(AssociationEndView { inner: *self }),
            _ => None,
        }
    }

    /// Dependency or Abstraction.
    pub fn as_dependency(&self) -> Option<DependencyView<'g>> {
        match self.element.data {
            ElementData::Dependency(_) | ElementData::Abstraction(_) => {
                Some(DependencyView { inner: *self })
            }
            _ => None,
        }
    }

    pub fn as_state_machine(&self) -> Option<StateMachineView<'g>> {
        match self.element.data {
            ElementData::StateMachine(_) => Some(StateMachineView { inner: *self }),
            _ => None,
        }
    }

    pub fn as_state(&self) -> Option<StateView<'g>> {
        match self.element.data {
            ElementData::State(_) => Some(StateView { inner: *self }),
            _ => None,
        }
    }

    pub fn as_transition(&self) -> Option<TransitionView<'g>> {
        match self.element.data {
            ElementData::Transition(_) => Some(TransitionView { inner: *self }),
            _ => None,
        }
    }

    pub fn as_action(&self) -> Option<ActionView<'g>> {
        match self.element.data {
            ElementData::Action(_) => Some(ActionView { inner: *self }),
            _ => None,
        }
    }

    pub fn as_guard(&self) -> Option<GuardView<'g>> {
        match self.element.data {
            ElementData::Guard(_) => Some(GuardView { inner: *self }),
            _ => None,
        }
    }

    pub fn as_diagram(&self) -> Option<DiagramView<'g>> {
        match self.element.data {
            ElementData::Diagram(_) => Some(DiagramView { inner: *self }),
            _ => None,
        }
    }
}

impl PartialEq for ElementView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.r == other.r
    }
}

impl std::fmt::Debug for ElementView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementView")
            .field("id", &self.element.id.as_str())
            .field("name", &self.element.name)
            .field("kind", &self.kind())
            .finish()
    }
}

/// Collect `start` and everything reachable through `next`, without repeats.
fn transitive<'g, F>(start: Vec<ClassView<'g>>, next: F) -> Vec<ClassView<'g>>
where
    F: Fn(&ClassView<'g>) -> Vec<ClassView<'g>>,
{
    let mut seen: IndexSet<ElementRef> = IndexSet::new();
    let mut out = Vec::new();
    let mut queue = start;
    while !queue.is_empty() {
        let mut following = Vec::new();
        for class in queue {
            if seen.insert(class.inner.r) {
                following.extend(next(&class));
                out.push(class);
            }
        }
        queue = following;
    }
    out
}

// Typed views are only built by the kind-checked `as_*` downcasts.
macro_rules! element_access {
    ($($view:ident),* $(,)?) => {
        $(
            impl<'g> $view<'g> {
                /// The untyped view of the same element.
                pub fn element(&self) -> ElementView<'g> {
                    self.inner
                }
            }
        )*
    };
}

element_access!(
    PackageView,
    ModelView,
    ClassView,
    AttributeView,
    MethodView,
    ParameterView,
    AssociationEndView,
    AssociationView,
    DependencyView,
    StateMachineView,
    StateView,
    TransitionView,
    ActionView,
    GuardView,
    DiagramView,
);

// ============================================================================
// PACKAGE VIEW
// ============================================================================

/// View over a Package, or the package side of a Model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackageView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> PackageView<'g> {
    fn data(&self) -> &'g super::PackageData {
        match &self.inner.element.data {
            ElementData::Model(m) => &m.package,
            ElementData::Package(p) => p,
            _ => unreachable!("PackageView over a non-package element"),
        }
    }

    pub fn name(&self) -> &'g NormalizedValue {
        self.inner.name()
    }

    pub fn display_name(&self) -> String {
        self.inner.display_name()
    }

    /// True for the Model and for packages carrying a product stereotype.
    pub fn is_root(&self) -> bool {
        self.data().is_root
    }

    pub fn is_product(&self) -> bool {
        self.is_root()
    }

    /// The enclosing package, `None` for a Model.
    pub fn parent_package(&self) -> Option<PackageView<'g>> {
        self.inner.parent().and_then(|p| p.as_package())
    }

    /// The nearest enclosing root package, this one included.
    pub fn product(&self) -> PackageView<'g> {
        let mut current = *self;
        while !current.is_root() {
            match current.parent_package() {
                Some(p) => current = p,
                None => break,
            }
        }
        current
    }

    pub fn packages(&self, recursive: bool) -> Vec<PackageView<'g>> {
        let mut out = Vec::new();
        for p in self.data().packages.iter().filter_map(|&r| self.inner.view(r).as_package()) {
            out.push(p);
            if recursive {
                out.extend(p.packages(true));
            }
        }
        out
    }

    /// Classes, internal ones left out.
    pub fn classes(&self, recursive: bool) -> Vec<ClassView<'g>> {
        self.collect_classes(recursive, false)
    }

    /// Classes, internal ones included.
    pub fn classes_with_internal(&self, recursive: bool) -> Vec<ClassView<'g>> {
        self.collect_classes(recursive, true)
    }

    fn collect_classes(&self, recursive: bool, internal: bool) -> Vec<ClassView<'g>> {
        let mut out: Vec<ClassView<'g>> = self
            .data()
            .classes
            .iter()
            .filter_map(|&r| self.inner.view(r).as_class())
            .filter(|c| internal || !c.is_internal())
            .collect();
        if recursive {
            for p in self.packages(false) {
                out.extend(p.collect_classes(true, internal));
            }
        }
        out
    }

    pub fn interfaces(&self, recursive: bool) -> Vec<ClassView<'g>> {
        let mut out: Vec<ClassView<'g>> = self
            .data()
            .interfaces
            .iter()
            .filter_map(|&r| self.inner.view(r).as_class())
            .collect();
        if recursive {
            for p in self.packages(false) {
                out.extend(p.interfaces(true));
            }
        }
        out
    }

    pub fn classes_and_interfaces(&self, recursive: bool) -> Vec<ClassView<'g>> {
        let mut out = self.classes(recursive);
        out.extend(self.interfaces(recursive));
        out
    }

    /// Associations leaving any class or interface, each listed once.
    pub fn associations(&self, recursive: bool) -> Vec<AssociationView<'g>> {
        let mut seen: IndexSet<ElementRef> = IndexSet::new();
        let mut out = Vec::new();
        for class in self.classes_and_interfaces(recursive) {
            for assoc in class.associations_from() {
                if seen.insert(assoc.inner.r) {
                    out.push(assoc);
                }
            }
        }
        out
    }

    /// Machines placed directly on this package.
    pub fn state_machines(&self) -> Vec<StateMachineView<'g>> {
        self.data()
            .state_machines
            .iter()
            .filter_map(|&r| self.inner.view(r).as_state_machine())
            .collect()
    }
}

// ============================================================================
// MODEL VIEW
// ============================================================================

/// View over the root Model of a document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> ModelView<'g> {
    pub(crate) fn new(r: ElementRef, graph: &'g ModelGraph) -> Self {
        Self {
            inner: ElementView::new(r, graph),
        }
    }

    fn data(&self) -> &'g super::ModelData {
        match &self.inner.element.data {
            ElementData::Model(m) => m,
            _ => unreachable!("ModelView over a non-model element"),
        }
    }

    pub fn name(&self) -> &'g NormalizedValue {
        self.inner.name()
    }

    /// The Model seen as its root package.
    pub fn package(&self) -> PackageView<'g> {
        PackageView { inner: self.inner }
    }

    /// Key of the profile document this model was built from.
    pub fn profile_key(&self) -> Option<&'g str> {
        self.data().profile.as_deref()
    }

    pub fn packages(&self, recursive: bool) -> Vec<PackageView<'g>> {
        self.package().packages(recursive)
    }

    pub fn classes(&self, recursive: bool) -> Vec<ClassView<'g>> {
        self.package().classes(recursive)
    }

    pub fn classes_with_internal(&self, recursive: bool) -> Vec<ClassView<'g>> {
        self.package().classes_with_internal(recursive)
    }

    pub fn interfaces(&self, recursive: bool) -> Vec<ClassView<'g>> {
        self.package().interfaces(recursive)
    }

    /// Find a class or interface anywhere in the model by name.
    pub fn class_named(&self, name: &str) -> Option<ClassView<'g>> {
        self.package()
            .classes_with_internal(true)
            .into_iter()
            .chain(self.interfaces(true))
            .find(|c| c.name().matches(name))
    }

    /// Machines on the model and on every package below it.
    pub fn all_state_machines(&self) -> Vec<StateMachineView<'g>> {
        let mut seen: IndexSet<ElementRef> = IndexSet::new();
        let mut out = Vec::new();
        let packages = std::iter::once(self.package()).chain(self.packages(true));
        for sm in packages.flat_map(|p| p.state_machines()) {
            if seen.insert(sm.inner.r) {
                out.push(sm);
            }
        }
        out
    }

    pub fn diagrams(&self) -> Vec<DiagramView<'g>> {
        self.data()
            .diagrams
            .values()
            .filter_map(|&r| self.inner.view(r).as_diagram())
            .collect()
    }

    /// Diagram by its own id.
    pub fn diagram(&self, id: &str) -> Option<DiagramView<'g>> {
        self.data()
            .diagrams
            .get(id)
            .and_then(|&r| self.inner.view(r).as_diagram())
    }

    /// Diagram by the id of the element it depicts.
    pub fn diagram_for_element(&self, id: &str) -> Option<DiagramView<'g>> {
        self.data()
            .diagrams_by_element
            .get(id)
            .and_then(|&r| self.inner.view(r).as_diagram())
    }
}

// ============================================================================
// CLASS VIEW
// ============================================================================

/// View over a Class, Interface or AssociationClass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> ClassView<'g> {
    fn data(&self) -> &'g super::ClassData {
        match &self.inner.element.data {
            ElementData::Class(c) => c,
            _ => unreachable!("ClassView over a non-class element"),
        }
    }

    fn classes(&self, refs: &[ElementRef]) -> Vec<ClassView<'g>> {
        refs.iter()
            .filter_map(|&r| self.inner.view(r).as_class())
            .collect()
    }

    fn associations(&self, refs: &[ElementRef]) -> Vec<AssociationView<'g>> {
        refs.iter()
            .filter_map(|&r| self.inner.view(r).as_association())
            .collect()
    }

    pub fn id(&self) -> &'g ElementId {
        self.inner.id()
    }

    pub fn name(&self) -> &'g NormalizedValue {
        self.inner.name()
    }

    pub fn display_name(&self) -> String {
        self.inner.display_name()
    }

    pub fn kind(&self) -> ElementKind {
        self.inner.kind()
    }

    /// Interface node, or a class stereotyped `interface`.
    pub fn is_interface(&self) -> bool {
        self.data().is_interface || self.inner.has_stereotype(&["interface"])
    }

    /// `None` when the dialect does not record abstractness.
    pub fn is_abstract(&self) -> Option<bool> {
        self.data().is_abstract
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.data().visibility
    }

    pub fn owner_scope(&self) -> Option<OwnerScope> {
        self.data().owner_scope
    }

    pub fn is_internal(&self) -> bool {
        self.data().is_internal
    }

    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    /// The association side of an AssociationClass.
    pub fn as_association(&self) -> Option<AssociationView<'g>> {
        self.inner.as_association()
    }

    pub fn package(&self) -> Option<PackageView<'g>> {
        self.data()
            .package
            .and_then(|r| self.inner.view(r).as_package())
    }

    pub fn product(&self) -> Option<PackageView<'g>> {
        self.package().map(|p| p.product())
    }

    // ── Members ─────────────────────────────────────────────────────

    pub fn attributes(&self) -> Vec<AttributeView<'g>> {
        self.data()
            .attributes
            .iter()
            .filter_map(|&r| self.inner.view(r).as_attribute())
            .collect()
    }

    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes().iter().map(|a| a.name().to_string()).collect()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes().iter().any(|a| a.name().matches(name))
    }

    pub fn methods(&self) -> Vec<MethodView<'g>> {
        self.data()
            .methods
            .iter()
            .filter_map(|&r| self.inner.view(r).as_method())
            .collect()
    }

    // ── Generalization, realization, adaptation ─────────────────────

    pub fn gen_parents(&self, recursive: bool) -> Vec<ClassView<'g>> {
        let direct = self.classes(&self.data().gen_parents);
        if recursive {
            transitive(direct, |c| c.gen_parents(false))
        } else {
            direct
        }
    }

    pub fn gen_children(&self, recursive: bool) -> Vec<ClassView<'g>> {
        let direct = self.classes(&self.data().gen_children);
        if recursive {
            transitive(direct, |c| c.gen_children(false))
        } else {
            direct
        }
    }

    pub fn realization_parents(&self) -> Vec<ClassView<'g>> {
        self.classes(&self.data().realization_parents)
    }

    /// Realizing classes; with `recursive`, their generalization
    /// descendants as well.
    pub fn realization_children(&self, recursive: bool) -> Vec<ClassView<'g>> {
        let direct = self.classes(&self.data().realization_children);
        if recursive {
            with_descendants(direct)
        } else {
            direct
        }
    }

    /// Adapted classes; with `recursive`, their generalization
    /// descendants as well.
    pub fn adaptation_parents(&self, recursive: bool) -> Vec<ClassView<'g>> {
        let direct = self.classes(&self.data().adaptation_parents);
        if recursive {
            with_descendants(direct)
        } else {
            direct
        }
    }

    pub fn adaptation_children(&self) -> Vec<ClassView<'g>> {
        self.classes(&self.data().adaptation_children)
    }

    // ── Associations ────────────────────────────────────────────────

    /// Every association starting at this class.
    pub fn associations_from(&self) -> Vec<AssociationView<'g>> {
        self.associations(&self.data().associations_from)
    }

    /// Every association ending at this class.
    pub fn associations_to(&self) -> Vec<AssociationView<'g>> {
        self.associations(&self.data().associations_to)
    }

    /// Associations starting here whose from-end and to-end aggregation
    /// kinds are among the given ones.
    pub fn associations_from_filtered(
        &self,
        from_kinds: &[AggregationKind],
        to_kinds: &[AggregationKind],
    ) -> Vec<AssociationView<'g>> {
        self.associations_from()
            .into_iter()
            .filter(|a| a.has_aggregation(from_kinds, to_kinds))
            .collect()
    }

    /// Associations ending here whose from-end and to-end aggregation
    /// kinds are among the given ones.
    pub fn associations_to_filtered(
        &self,
        from_kinds: &[AggregationKind],
        to_kinds: &[AggregationKind],
    ) -> Vec<AssociationView<'g>> {
        self.associations_to()
            .into_iter()
            .filter(|a| a.has_aggregation(from_kinds, to_kinds))
            .collect()
    }

    /// True if the class is only reachable through composition, directly
    /// or through a generalization parent.
    pub fn is_dependent(&self) -> bool {
        self.is_dependent_inner(&mut IndexSet::new())
    }

    fn is_dependent_inner(&self, visiting: &mut IndexSet<ElementRef>) -> bool {
        use AggregationKind::{Aggregate, Composite, None as Plain};

        if !visiting.insert(self.inner.r) {
            return false;
        }
        let contained_by = |kind: AggregationKind| {
            !self.associations_to_filtered(&[kind], &[Plain]).is_empty()
                || !self.associations_from_filtered(&[Plain], &[kind]).is_empty()
        };
        let dependent = contained_by(Composite) && !contained_by(Aggregate);
        let parent_dependent = self
            .gen_parents(false)
            .iter()
            .any(|p| p.is_dependent_inner(visiting));
        dependent || parent_dependent
    }

    /// Non-abstract classifiers this class aggregates; with `recursive`,
    /// the generalization descendants of every aggregated class as well.
    pub fn aggregated_classes(&self, recursive: bool) -> Vec<ClassView<'g>> {
        let subtypes = self.classes(&self.inner.element.subtypes);
        let mut out: Vec<ClassView<'g>> = subtypes
            .iter()
            .copied()
            .filter(|c| c.is_abstract() != Some(true))
            .collect();
        if recursive {
            for sub in &subtypes {
                out.extend(sub.gen_children(true));
            }
        }
        out
    }

    pub fn subtype_names(&self, recursive: bool) -> Vec<String> {
        self.aggregated_classes(recursive)
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    // ── Behavior ────────────────────────────────────────────────────

    /// The machine governing this class.
    pub fn state_machine(&self) -> Option<StateMachineView<'g>> {
        self.data()
            .state_machine
            .and_then(|r| self.inner.view(r).as_state_machine())
    }

    /// Machines found inside this class.
    pub fn state_machines(&self) -> Vec<StateMachineView<'g>> {
        self.data()
            .state_machines
            .iter()
            .filter_map(|&r| self.inner.view(r).as_state_machine())
            .collect()
    }

    pub fn client_dependencies(&self) -> Vec<DependencyView<'g>> {
        self.inner.client_dependencies()
    }

    /// Suppliers of this class's dependencies that are classes or interfaces.
    pub fn client_dependency_classes(&self) -> Vec<ClassView<'g>> {
        self.client_dependencies()
            .iter()
            .filter_map(|d| d.supplier())
            .filter_map(|s| s.as_class())
            .collect()
    }
}

fn with_descendants(direct: Vec<ClassView<'_>>) -> Vec<ClassView<'_>> {
    let mut out = direct.clone();
    for class in &direct {
        out.extend(class.gen_children(true));
    }
    out
}

// ============================================================================
// FEATURE VIEWS
// ============================================================================

fn feature_data<'g>(inner: &ElementView<'g>) -> &'g super::FeatureData {
    match &inner.element.data {
        ElementData::Attribute(f) | ElementData::Parameter(f) => f,
        _ => unreachable!("feature view over a non-feature element"),
    }
}

/// View over a class Attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttributeView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> AttributeView<'g> {
    pub fn name(&self) -> &'g NormalizedValue {
        self.inner.name()
    }

    pub fn type_ref(&self) -> Option<&'g TypeRef> {
        feature_data(&self.inner).type_ref.as_ref()
    }

    /// The declared type's name.
    pub fn type_name(&self) -> Option<String> {
        self.type_ref().map(|t| t.name.to_string())
    }

    /// The built element for the type, when the type is a modelled classifier.
    pub fn type_element(&self) -> Option<ElementView<'g>> {
        self.type_ref()
            .and_then(|t| self.inner.graph.get(t.id.as_str()))
    }

    pub fn multiplicity(&self) -> Multiplicity {
        feature_data(&self.inner).multiplicity
    }

    pub fn lower_bound(&self) -> i64 {
        self.multiplicity().lower
    }

    pub fn upper_bound(&self) -> i64 {
        self.multiplicity().upper
    }

    pub fn default(&self) -> Option<&'g str> {
        feature_data(&self.inner).default.as_deref()
    }

    pub fn has_default(&self) -> bool {
        self.default().is_some()
    }

    pub fn visibility(&self) -> Option<Visibility> {
        feature_data(&self.inner).visibility
    }

    pub fn owner(&self) -> Option<ClassView<'g>> {
        self.inner.parent().and_then(|p| p.as_class())
    }
}

/// View over a Method.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MethodView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> MethodView<'g> {
    fn data(&self) -> &'g super::MethodData {
        match &self.inner.element.data {
            ElementData::Method(m) => m,
            _ => unreachable!("MethodView over a non-method element"),
        }
    }

    pub fn name(&self) -> &'g NormalizedValue {
        self.inner.name()
    }

    pub fn parameters(&self) -> Vec<ParameterView<'g>> {
        self.data()
            .parameters
            .iter()
            .filter_map(|&r| self.inner.view(r).as_parameter())
            .collect()
    }

    pub fn param_names(&self) -> Vec<String> {
        self.parameters().iter().map(|p| p.name().to_string()).collect()
    }

    /// `name` or `name=default` for each parameter.
    pub fn param_expressions(&self) -> Vec<String> {
        self.parameters().iter().map(|p| p.expression()).collect()
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.data().visibility
    }

    pub fn owner_scope(&self) -> Option<OwnerScope> {
        self.data().owner_scope
    }

    pub fn is_static(&self) -> bool {
        self.data().owner_scope == Some(OwnerScope::Classifier)
    }
}

/// View over a method Parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> ParameterView<'g> {
    pub fn name(&self) -> &'g NormalizedValue {
        self.inner.name()
    }

    pub fn type_ref(&self) -> Option<&'g TypeRef> {
        feature_data(&self.inner).type_ref.as_ref()
    }

    pub fn multiplicity(&self) -> Multiplicity {
        feature_data(&self.inner).multiplicity
    }

    pub fn default(&self) -> Option<&'g str> {
        feature_data(&self.inner).default.as_deref()
    }

    pub fn has_default(&self) -> bool {
        self.default().is_some()
    }

    pub fn expression(&self) -> String {
        match self.default() {
            Some(default) => format!("{}={default}", self.name()),
            None => self.name().to_string(),
        }
    }
}

// ============================================================================
// ASSOCIATION VIEWS
// ============================================================================

/// View over one end of an Association.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AssociationEndView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> AssociationEndView<'g> {
    fn data(&self) -> &'g super::AssociationEndData {
        match &self.inner.element.data {
            ElementData::AssociationEnd(e) => e,
            _ => unreachable!("AssociationEndView over a non-end element"),
        }
    }

    pub fn id(&self) -> &'g ElementId {
        self.inner.id()
    }

    pub fn name(&self) -> &'g NormalizedValue {
        self.inner.name()
    }

    pub fn association(&self) -> Option<AssociationView<'g>> {
        self.data()
            .association
            .and_then(|r| self.inner.view(r).as_association())
    }

    /// The participating classifier.
    pub fn target(&self) -> Option<ClassView<'g>> {
        self.data()
            .target
            .and_then(|r| self.inner.view(r).as_class())
    }

    pub fn multiplicity(&self) -> Multiplicity {
        self.data().multiplicity
    }

    pub fn lower_bound(&self) -> i64 {
        self.multiplicity().lower
    }

    pub fn upper_bound(&self) -> i64 {
        self.multiplicity().upper
    }

    pub fn aggregation(&self) -> AggregationKind {
        self.data().aggregation
    }

    pub fn is_navigable(&self) -> bool {
        self.data().is_navigable
    }

    /// The declared name, else the lower-cased target name (pluralized with
    /// `s` unless the upper bound is 1 or `ignore_cardinality` is set), else
    /// the id.
    pub fn end_name(&self, ignore_cardinality: bool) -> String {
        if !self.name().is_empty() {
            return self.name().to_string();
        }
        match self.target() {
            Some(target) => {
                let mut name = target.name().to_string().to_lowercase();
                if self.upper_bound() != 1 && !ignore_cardinality {
                    name.push('s');
                }
                name
            }
            None => self.id().to_string(),
        }
    }
}

/// View over an Association or the association side of an AssociationClass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AssociationView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> AssociationView<'g> {
    fn data(&self) -> &'g super::AssociationData {
        match self.inner.element.as_association() {
            Some(a) => a,
            None => unreachable!("AssociationView over a non-association element"),
        }
    }

    pub fn id(&self) -> &'g ElementId {
        self.inner.id()
    }

    pub fn from_end(&self) -> Option<AssociationEndView<'g>> {
        self.data()
            .from_end
            .and_then(|r| self.inner.view(r).as_association_end())
    }

    pub fn to_end(&self) -> Option<AssociationEndView<'g>> {
        self.data()
            .to_end
            .and_then(|r| self.inner.view(r).as_association_end())
    }

    /// The class side of an AssociationClass.
    pub fn as_class(&self) -> Option<ClassView<'g>> {
        self.inner.as_class()
    }

    fn end_names(&self) -> (String, String) {
        let id = self.id().to_string();
        let from = self.from_end().map_or_else(|| id.clone(), |e| e.end_name(true));
        let to = self.to_end().map_or(id, |e| e.end_name(true));
        (from, to)
    }

    /// The declared name, else `<from>_<to>` lower-cased.
    pub fn name(&self) -> String {
        if !self.inner.name().is_empty() {
            return self.inner.name().to_string();
        }
        let (from, to) = self.end_names();
        format!("{from}_{to}").trim().to_lowercase()
    }

    /// The `inverse_relation_name` tagged value, else `<to>_<from>` lower-cased.
    pub fn inverse_name(&self) -> String {
        if let Some(name) = self.inner.tagged_value("inverse_relation_name") {
            return name.to_string();
        }
        let (from, to) = self.end_names();
        format!("{to}_{from}").trim().to_lowercase()
    }

    fn has_aggregation(&self, from_kinds: &[AggregationKind], to_kinds: &[AggregationKind]) -> bool {
        match (self.from_end(), self.to_end()) {
            (Some(from), Some(to)) => {
                from_kinds.contains(&from.aggregation()) && to_kinds.contains(&to.aggregation())
            }
            _ => false,
        }
    }
}

/// View over a Dependency or an Abstraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DependencyView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> DependencyView<'g> {
    fn data(&self) -> &'g super::DependencyData {
        match &self.inner.element.data {
            ElementData::Dependency(d) | ElementData::Abstraction(d) => d,
            _ => unreachable!("DependencyView over a non-dependency element"),
        }
    }

    pub fn client(&self) -> Option<ElementView<'g>> {
        self.data().client.map(|r| self.inner.view(r))
    }

    pub fn supplier(&self) -> Option<ElementView<'g>> {
        self.data().supplier.map(|r| self.inner.view(r))
    }

    pub fn is_abstraction(&self) -> bool {
        self.inner.kind() == ElementKind::Abstraction
    }

    pub fn is_realization(&self) -> bool {
        self.is_abstraction() && self.inner.has_stereotype(&["realize"])
    }

    pub fn is_adaptation(&self) -> bool {
        self.is_abstraction() && self.inner.has_stereotype(&["adapts"])
    }
}

// ============================================================================
// STATE MACHINE VIEWS
// ============================================================================

/// View over a StateMachine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateMachineView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> StateMachineView<'g> {
    fn data(&self) -> &'g super::StateMachineData {
        match &self.inner.element.data {
            ElementData::StateMachine(m) => m,
            _ => unreachable!("StateMachineView over a non-machine element"),
        }
    }

    pub fn id(&self) -> &'g ElementId {
        self.inner.id()
    }

    pub fn name(&self) -> &'g NormalizedValue {
        self.inner.name()
    }

    /// The package, model or class the machine was found in.
    pub fn container(&self) -> Option<ElementView<'g>> {
        self.data().container.map(|r| self.inner.view(r))
    }

    /// States in build order; with `no_duplicates`, the first state per name.
    pub fn states(&self, no_duplicates: bool) -> Vec<StateView<'g>> {
        let all = self
            .data()
            .states
            .iter()
            .filter_map(|&r| self.inner.view(r).as_state());
        if !no_duplicates {
            return all.collect();
        }
        let mut seen: IndexSet<String> = IndexSet::new();
        all.filter(|s| seen.insert(s.name().to_string())).collect()
    }

    pub fn state_names(&self, no_duplicates: bool) -> Vec<String> {
        self.states(no_duplicates)
            .iter()
            .filter(|s| !s.name().is_empty())
            .map(|s| s.name().to_string())
            .collect()
    }

    pub fn clean_state_names(&self, no_duplicates: bool) -> Vec<String> {
        self.states(no_duplicates)
            .iter()
            .filter(|s| !s.name().is_empty())
            .map(|s| s.inner.clean_name().to_string())
            .collect()
    }

    /// Transitions in build order.
    ///
    /// With `no_duplicates`, one transition per clean name: the first one
    /// seen, replaced by any later one stereotyped `primary`.
    pub fn transitions(&self, no_duplicates: bool) -> Vec<TransitionView<'g>> {
        let all = self
            .data()
            .transitions
            .iter()
            .filter_map(|&r| self.inner.view(r).as_transition());
        if !no_duplicates {
            return all.collect();
        }
        let mut by_name: IndexMap<&'g str, TransitionView<'g>> = IndexMap::new();
        for t in all {
            let key = t.inner.clean_name();
            if key.is_empty() {
                continue;
            }
            match by_name.get_mut(key) {
                None => {
                    by_name.insert(key, t);
                }
                Some(slot) => {
                    if t.inner.has_stereotype(&["primary"]) {
                        *slot = t;
                    }
                }
            }
        }
        by_name.into_values().collect()
    }

    pub fn transition_names(&self, no_duplicates: bool) -> Vec<String> {
        self.transitions(no_duplicates)
            .iter()
            .filter(|t| !t.name().is_empty())
            .map(|t| t.name().to_string())
            .collect()
    }

    pub fn classes(&self) -> Vec<ClassView<'g>> {
        self.data()
            .classes
            .iter()
            .filter_map(|&r| self.inner.view(r).as_class())
            .collect()
    }

    pub fn class_names(&self) -> Vec<String> {
        self.classes().iter().map(|c| c.name().to_string()).collect()
    }

    /// Every element the machine is attached to, including a non-class
    /// container of a machine without a context.
    pub fn owners(&self) -> Vec<ElementView<'g>> {
        self.inner.views(&self.data().classes)
    }

    /// The initial pseudostate, else the first state tagged `initial_state`,
    /// else the first state built.
    pub fn initial_state(&self) -> Option<StateView<'g>> {
        let states = self.states(false);
        states
            .iter()
            .find(|s| s.is_initial())
            .or_else(|| states.iter().find(|s| s.inner.has_tagged_value("initial_state")))
            .or_else(|| states.first())
            .copied()
    }

    pub fn all_transition_actions(&self) -> Vec<ActionView<'g>> {
        self.transitions(false)
            .iter()
            .filter_map(|t| t.action())
            .collect()
    }

    /// The first action whose before or after name is `name`.
    pub fn transition_action_by_name(&self, name: &str) -> Option<ActionView<'g>> {
        self.all_transition_actions()
            .into_iter()
            .find(|a| a.before_action_name() == name || a.after_action_name() == name)
    }

    /// Distinct non-empty action names, in first-use order.
    pub fn all_transition_action_names(&self, before: bool, after: bool) -> Vec<String> {
        let mut names: IndexSet<String> = IndexSet::new();
        for action in self.all_transition_actions() {
            let (b, a) = action.split_name();
            if before && !b.is_empty() {
                names.insert(b);
            }
            if after && !a.is_empty() {
                names.insert(a);
            }
        }
        names.into_iter().collect()
    }
}

/// View over a State.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> StateView<'g> {
    fn data(&self) -> &'g super::StateData {
        match &self.inner.element.data {
            ElementData::State(s) => s,
            _ => unreachable!("StateView over a non-state element"),
        }
    }

    fn transitions(&self, refs: &[ElementRef]) -> Vec<TransitionView<'g>> {
        refs.iter()
            .filter_map(|&r| self.inner.view(r).as_transition())
            .collect()
    }

    pub fn name(&self) -> &'g NormalizedValue {
        self.inner.name()
    }

    pub fn kind(&self) -> StateKind {
        self.data().kind
    }

    pub fn is_initial(&self) -> bool {
        self.data().is_initial
    }

    pub fn incoming(&self) -> Vec<TransitionView<'g>> {
        self.transitions(&self.data().incoming)
    }

    pub fn outgoing(&self) -> Vec<TransitionView<'g>> {
        self.transitions(&self.data().outgoing)
    }

    /// The `description` tagged value, empty when absent.
    pub fn description(&self) -> &'g str {
        self.inner.tagged_value_or("description", "")
    }

    /// The `label` tagged value, else the name.
    pub fn title(&self) -> String {
        match self.inner.tagged_value("label") {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => self.name().to_string(),
        }
    }
}

/// View over a Transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> TransitionView<'g> {
    fn data(&self) -> &'g super::TransitionData {
        match &self.inner.element.data {
            ElementData::Transition(t) => t,
            _ => unreachable!("TransitionView over a non-transition element"),
        }
    }

    pub fn name(&self) -> &'g NormalizedValue {
        self.inner.name()
    }

    pub fn source(&self) -> Option<StateView<'g>> {
        self.data()
            .source
            .and_then(|r| self.inner.view(r).as_state())
    }

    pub fn target(&self) -> Option<StateView<'g>> {
        self.data()
            .target
            .and_then(|r| self.inner.view(r).as_state())
    }

    pub fn source_name(&self) -> Option<String> {
        self.source().map(|s| s.name().to_string())
    }

    pub fn target_name(&self) -> Option<String> {
        self.target().map(|s| s.name().to_string())
    }

    pub fn action(&self) -> Option<ActionView<'g>> {
        self.data()
            .action
            .and_then(|r| self.inner.view(r).as_action())
    }

    pub fn guard(&self) -> Option<GuardView<'g>> {
        self.data()
            .guard
            .and_then(|r| self.inner.view(r).as_guard())
    }

    pub fn before_action_name(&self) -> Option<String> {
        self.action().map(|a| a.before_action_name())
    }

    pub fn after_action_name(&self) -> Option<String> {
        self.action().map(|a| a.after_action_name())
    }

    pub fn action_expression(&self) -> Option<&'g str> {
        self.action().and_then(|a| a.expression())
    }

    /// `guard_roles:` clause with commas turned into semicolons.
    pub fn guard_roles(&self) -> String {
        self.guard_clause("guard_roles:").replace(',', ";")
    }

    pub fn guard_permissions(&self) -> String {
        self.guard_clause("guard_permissions:")
    }

    pub fn guard_expr(&self) -> String {
        self.guard_clause("guard_expr:")
    }

    fn guard_clause(&self, prefix: &str) -> String {
        self.guard()
            .and_then(|g| g.clause(prefix))
            .unwrap_or_default()
    }

    /// The non-empty guard clauses keyed by clause name.
    pub fn props(&self) -> IndexMap<&'static str, String> {
        let mut props = IndexMap::new();
        for (key, value) in [
            ("guard_permissions", self.guard_permissions()),
            ("guard_roles", self.guard_roles()),
            ("guard_expr", self.guard_expr()),
        ] {
            let value = value.trim();
            if !value.is_empty() {
                props.insert(key, value.to_string());
            }
        }
        props
    }

    pub fn trigger_type(&self) -> TriggerType {
        TriggerType::from_tagged_value(self.inner.tagged_value("trigger_type"))
    }
}

fn expression_data<'g>(inner: &ElementView<'g>) -> &'g ExpressionData {
    match &inner.element.data {
        ElementData::Action(e) | ElementData::Guard(e) => e,
        _ => unreachable!("expression view over a non-expression element"),
    }
}

/// View over a transition Action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> ActionView<'g> {
    pub fn name(&self) -> &'g NormalizedValue {
        self.inner.name()
    }

    pub fn expression(&self) -> Option<&'g str> {
        expression_data(&self.inner).expression.as_deref()
    }

    /// The name split on `;` into before and after parts. A name without a
    /// `;` is an after-only action.
    pub fn split_name(&self) -> (String, String) {
        let name = self.name().to_string();
        let mut parts = name.split(';');
        let first = parts.next().unwrap_or_default().to_string();
        match parts.next() {
            Some(second) => (first, second.to_string()),
            None => (String::new(), first),
        }
    }

    pub fn before_action_name(&self) -> String {
        self.split_name().0
    }

    pub fn after_action_name(&self) -> String {
        self.split_name().1
    }

    /// The non-empty before and after names.
    pub fn used_action_names(&self) -> Vec<String> {
        let (before, after) = self.split_name();
        [before, after].into_iter().filter(|n| !n.is_empty()).collect()
    }
}

/// View over a transition Guard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuardView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> GuardView<'g> {
    pub fn expression(&self) -> Option<&'g str> {
        expression_data(&self.inner).expression.as_deref()
    }

    /// Trimmed `|`-separated clauses of the expression.
    pub fn clauses(&self) -> Vec<&'g str> {
        self.expression()
            .map(|e| e.split('|').map(str::trim).collect())
            .unwrap_or_default()
    }

    /// Text after `prefix` in the first clause starting with it.
    pub fn clause(&self, prefix: &str) -> Option<String> {
        self.clauses()
            .into_iter()
            .find_map(|c| c.strip_prefix(prefix))
            .map(str::to_string)
    }
}

/// View over a Diagram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiagramView<'g> {
    pub(crate) inner: ElementView<'g>,
}

impl<'g> DiagramView<'g> {
    pub fn name(&self) -> &'g NormalizedValue {
        self.inner.name()
    }

    /// The element the diagram depicts.
    pub fn model_element(&self) -> Option<ElementView<'g>> {
        match &self.inner.element.data {
            ElementData::Diagram(d) => d.model_element.map(|r| self.inner.view(r)),
            _ => None,
        }
    }
}
