//! First pass: build the element tree of one document.
//!
//! ## Traversal
//!
//! ```text
//! Model
//! ├── Packages (depth-first, skipped names left out)
//! ├── Interfaces of every package
//! ├── Classes of every package
//! │   ├── Attributes
//! │   ├── Methods -> Parameters
//! │   └── state machines owned by the class
//! ├── state machines owned by the model and each package
//! └── Diagrams
//! ```
//!
//! Every element is registered in the [`ParseContext`] as soon as it is
//! allocated, before any of its children are built. Cross references that
//! need the whole tree (relationship ends, transition links, machine
//! placement) are left to [`crate::resolve`] and [`crate::statemachine`].

mod class;
mod package;

pub(crate) use package::ClassifierKind;

use rustc_hash::FxHashSet;

use crate::base::RESERVED_PRIMITIVES;
use crate::context::ParseContext;
use crate::dialect::Dialect;
use crate::error::XmiError;
use crate::model::{
    Element, ElementArena, ElementData, ElementId, ElementRef, ModelData, PackageData,
};
use crate::options::ParseOptions;
use crate::statemachine::{ModelSource, PackageSource};
use crate::xml::{Node, NodeId, Scope};

/// One input document with the dialect and key prefix it is read under.
#[derive(Debug, Clone)]
pub struct SourceDocument<'d> {
    /// The `XMI` element.
    pub xmi: Node<'d>,
    pub dialect: Dialect,
    /// `""` for the primary document, `"<key>#"` for a profile.
    pub prefix: String,
    pub profile: Option<String>,
}

impl<'d> SourceDocument<'d> {
    pub fn primary(xmi: Node<'d>) -> Self {
        Self {
            xmi,
            dialect: Dialect::detect(xmi),
            prefix: String::new(),
            profile: None,
        }
    }

    pub fn profile(key: &str, xmi: Node<'d>) -> Self {
        Self {
            xmi,
            dialect: Dialect::detect(xmi),
            prefix: format!("{key}#"),
            profile: Some(key.to_string()),
        }
    }

    /// The `XMI.content` element.
    pub fn content(&self) -> Result<Option<Node<'d>>, XmiError> {
        self.xmi
            .find_unique(self.dialect.vocabulary().content, Scope::Descendants)
    }
}

/// Builds elements of one document into the shared arena and registry.
pub(crate) struct ModelBuilder<'a, 'd> {
    pub(crate) ctx: &'a mut ParseContext<'d>,
    pub(crate) arena: &'a mut ElementArena,
    pub(crate) options: &'a ParseOptions,
    pub(crate) dialect: Dialect,
    pub(crate) prefix: &'a str,
    pub(crate) built_machines: FxHashSet<NodeId>,
}

impl<'a, 'd> ModelBuilder<'a, 'd> {
    pub(crate) fn new(
        ctx: &'a mut ParseContext<'d>,
        arena: &'a mut ElementArena,
        options: &'a ParseOptions,
        source: &'a SourceDocument<'d>,
    ) -> Self {
        Self {
            ctx,
            arena,
            options,
            dialect: source.dialect,
            prefix: &source.prefix,
            built_machines: FxHashSet::default(),
        }
    }

    /// Build the document's Model and everything below it.
    ///
    /// Returns `Ok(None)` when the document has no `XMI.content` or no
    /// Model; the caller decides whether that is fatal.
    pub(crate) fn build_model(
        &mut self,
        source: &SourceDocument<'d>,
    ) -> Result<Option<ElementRef>, XmiError> {
        let vocab = self.dialect.vocabulary();
        let Some(content) = source.content()? else {
            return Ok(None);
        };
        let Some(model_node) = content.find_unique(vocab.model, Scope::Children)? else {
            return Ok(None);
        };

        let data = ModelData {
            package: PackageData {
                is_root: true,
                ..Default::default()
            },
            profile: source.profile.clone(),
            ..Default::default()
        };
        let model = self.init_element(model_node, ElementData::Model(data), None)?;

        let mut packages = vec![(model_node, model)];
        self.build_packages(model_node, model, &mut packages)?;
        for &(node, package) in &packages {
            self.build_interfaces(node, package)?;
        }
        for &(node, package) in &packages {
            self.build_classes(node, package)?;
        }

        self.build_state_machines(&ModelSource {
            content,
            node: model_node,
            element: model,
        })?;
        for &(node, package) in packages.iter().skip(1) {
            self.build_state_machines(&PackageSource {
                node,
                element: package,
            })?;
        }

        self.build_diagrams(content, model)?;

        tracing::debug!(
            model = %self.arena.get(model).display_name(),
            packages = packages.len(),
            elements = self.arena.len(),
            "built model tree"
        );
        Ok(Some(model))
    }

    // ========================================================================
    // ELEMENT INITIALIZATION
    // ========================================================================

    /// Allocate and register one element.
    ///
    /// Reads the id, the normalized name, the tagged values of the single
    /// tagged-value container child and the stereotypes, then links the new
    /// element into `parent`'s children.
    pub(crate) fn init_element(
        &mut self,
        node: Node<'d>,
        data: ElementData,
        parent: Option<ElementRef>,
    ) -> Result<ElementRef, XmiError> {
        let vocab = self.dialect.vocabulary();
        let fold = self.options.fold_accents;

        let id = ElementId::from(Dialect::qualified_id(node, self.prefix).unwrap_or_default());
        let name = self.dialect.name(node, fold)?;
        let mut element = Element::new(id.clone(), data).with_name(name);
        element.parent = parent;

        if let Some(container) = node.find_unique(vocab.tagged_value_container, Scope::Children)? {
            for tagged in container.children_named(vocab.tagged_value) {
                match self.dialect.tagged_value(tagged, self.ctx, self.prefix, fold) {
                    Ok(Some((tag, value))) => element.merge_tagged_value(tag, value),
                    Ok(None) => {}
                    Err(err) if err.is_recoverable() => {
                        tracing::warn!(element = %node.describe(), error = %err, "skipping tagged value");
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        element
            .stereotypes
            .extend(self.dialect.stereotypes(node, self.ctx, self.prefix, fold)?);

        let r = self.arena.alloc(element);
        if !id.is_empty() {
            self.ctx.register(id, r)?;
        }
        if let Some(parent) = parent {
            self.arena.get_mut(parent).children.push(r);
        }
        tracing::trace!(element = %node.describe(), "initialized element");
        Ok(r)
    }

    /// Existing element for `node`'s id, if it was already built.
    pub(crate) fn existing(&self, node: Node<'d>) -> Option<ElementRef> {
        Dialect::qualified_id(node, self.prefix).and_then(|id| self.ctx.lookup(&id))
    }

    pub(crate) fn is_named(&self, r: ElementRef) -> bool {
        !self.arena.get(r).name.is_empty()
    }

    /// Registry keys of the references inside the unique `tags` child.
    pub(crate) fn references(&self, node: Node<'d>, tags: &[&str]) -> Result<Vec<String>, XmiError> {
        Ok(node
            .find_unique(tags, Scope::Children)?
            .map(|wrapper| {
                wrapper
                    .children()
                    .filter_map(|n| Dialect::reference(n, self.prefix))
                    .collect()
            })
            .unwrap_or_default())
    }
}

// ============================================================================
// INTERNAL CLASSES
// ============================================================================

/// Flag reserved-name classes that carry nothing as internal.
///
/// Runs once after relationship resolution, so edges count as content. A
/// generated-datatype stereotype keeps a class visible.
pub(crate) fn elide_internal_classes(arena: &mut ElementArena, options: &ParseOptions) {
    for r in arena.refs() {
        let element = arena.get(r);
        let Some(class) = element.as_class() else {
            continue;
        };
        let reserved = RESERVED_PRIMITIVES.iter().any(|p| element.name.matches(p));
        let generated = options
            .generated_datatype_stereotypes
            .iter()
            .any(|s| element.stereotypes.contains(s.as_str()));
        if reserved && class.is_empty() && !generated {
            tracing::trace!(class = %element.display_name(), "marking class internal");
            if let Some(class) = arena.get_mut(r).as_class_mut() {
                class.is_internal = true;
            }
        }
    }
}
