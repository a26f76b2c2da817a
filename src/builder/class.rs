//! Classifiers and their features.

use super::ModelBuilder;
use super::package::ClassifierKind;
use crate::base::{Multiplicity, RETURN_PARAMETER};
use crate::dialect::{Dialect, Tags, joined};
use crate::error::XmiError;
use crate::model::{ElementData, ElementRef, FeatureData, MethodData};
use crate::statemachine::ClassSource;
use crate::xml::{Node, Scope};

impl<'a, 'd> ModelBuilder<'a, 'd> {
    /// Build a class or interface with its attributes, methods and owned
    /// state machines.
    ///
    /// Every classifier is registered; only named ones are listed in the
    /// package.
    pub(crate) fn build_class(
        &mut self,
        node: Node<'d>,
        package: ElementRef,
        kind: ClassifierKind,
    ) -> Result<ElementRef, XmiError> {
        let data = self.classifier_data(node, Some(package), kind)?;
        let class = self.init_element(node, ElementData::Class(data), Some(package))?;

        for attribute in self.features(node, self.dialect.vocabulary().attribute) {
            self.build_attribute(attribute, class)?;
        }
        for operation in self.features(node, self.dialect.vocabulary().operation) {
            self.build_method(operation, class)?;
        }

        self.list_in_package(package, class, kind);
        self.build_state_machines(&ClassSource {
            node,
            element: class,
        })?;
        Ok(class)
    }

    /// Feature nodes below a classifier in document order.
    ///
    /// The walk does not enter nested classifiers, and reference stubs are
    /// left out.
    pub(crate) fn features(&self, node: Node<'d>, tags: Tags) -> Vec<Node<'d>> {
        let vocab = self.dialect.vocabulary();
        let nested = joined(&[vocab.class, vocab.interface, vocab.association_class]);

        let mut found = Vec::new();
        let mut stack: Vec<Node<'d>> = node.children().collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            if current.is(tags) {
                if !Dialect::is_reference(current) {
                    found.push(current);
                }
                continue;
            }
            if current.is(&nested) {
                continue;
            }
            let mut children: Vec<Node<'d>> = current.children().collect();
            children.reverse();
            stack.extend(children);
        }
        found
    }

    fn build_attribute(&mut self, node: Node<'d>, class: ElementRef) -> Result<ElementRef, XmiError> {
        let vocab = self.dialect.vocabulary();
        let type_tags = self.dialect.attribute_type_tags();
        let data = FeatureData {
            type_ref: self.dialect.datatype_of(
                node,
                &type_tags,
                self.ctx,
                self.prefix,
                self.options.fold_accents,
            )?,
            multiplicity: self.dialect.multiplicity(node, Multiplicity::ONE)?,
            default: self.default_expression(node, vocab.attribute_initial_value)?,
            visibility: self.dialect.visibility(node),
        };
        let attribute = self.init_element(node, ElementData::Attribute(data), Some(class))?;
        if let Some(class) = self.arena.get_mut(class).as_class_mut() {
            class.attributes.push(attribute);
        }
        Ok(attribute)
    }

    /// Build an operation and its parameters. Unnamed operations are built
    /// and registered but not listed on the class.
    fn build_method(&mut self, node: Node<'d>, class: ElementRef) -> Result<ElementRef, XmiError> {
        let vocab = self.dialect.vocabulary();
        let data = MethodData {
            visibility: self.dialect.visibility(node),
            owner_scope: self.dialect.owner_scope(node),
            ..Default::default()
        };
        let method = self.init_element(node, ElementData::Method(data), Some(class))?;

        for parameter in node.find_all(vocab.parameter, Scope::Descendants) {
            if Dialect::is_reference(parameter) {
                continue;
            }
            self.build_parameter(parameter, method)?;
        }

        if self.is_named(method)
            && let Some(class) = self.arena.get_mut(class).as_class_mut()
        {
            class.methods.push(method);
        }
        Ok(method)
    }

    /// Build a parameter; the return parameter is built but not listed.
    ///
    /// A parameter type missing from the registry is logged and left unset.
    fn build_parameter(&mut self, node: Node<'d>, method: ElementRef) -> Result<ElementRef, XmiError> {
        let vocab = self.dialect.vocabulary();
        let type_ref = match self.dialect.datatype_of(
            node,
            vocab.parameter_type,
            self.ctx,
            self.prefix,
            self.options.fold_accents,
        ) {
            Ok(type_ref) => type_ref,
            Err(XmiError::UnresolvedType { element, type_id }) => {
                tracing::warn!(%element, %type_id, "parameter type not found");
                None
            }
            Err(err) => return Err(err),
        };
        let data = FeatureData {
            type_ref,
            multiplicity: self.dialect.multiplicity(node, Multiplicity::MANY)?,
            default: self.default_expression(node, vocab.parameter_default)?,
            visibility: None,
        };
        let parameter = self.init_element(node, ElementData::Parameter(data), Some(method))?;

        let is_return = self.arena.get(parameter).name.matches(RETURN_PARAMETER);
        if !is_return
            && let ElementData::Method(method) = &mut self.arena.get_mut(method).data
        {
            method.parameters.push(parameter);
        }
        Ok(parameter)
    }

    /// Non-empty expression body inside the unique `tags` child.
    fn default_expression(&self, node: Node<'d>, tags: Tags) -> Result<Option<String>, XmiError> {
        let Some(wrapper) = node.find_unique(tags, Scope::Children)? else {
            return Ok(None);
        };
        Ok(self
            .dialect
            .expression_body(wrapper, self.dialect.vocabulary().expression)?
            .filter(|body| !body.trim().is_empty()))
    }
}
