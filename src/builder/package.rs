//! Packages and the classifiers they own.

use super::ModelBuilder;
use crate::error::XmiError;
use crate::model::{AssociationData, ClassData, ElementData, ElementRef, PackageData};
use crate::xml::{Node, Scope};

/// Which classifier metatype a node is built as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClassifierKind {
    Class,
    Interface,
    AssociationClass,
}

impl<'a, 'd> ModelBuilder<'a, 'd> {
    /// Build the packages below `node` depth-first, appending each
    /// `(node, element)` pair to `out` in build order.
    pub(crate) fn build_packages(
        &mut self,
        node: Node<'d>,
        parent: ElementRef,
        out: &mut Vec<(Node<'d>, ElementRef)>,
    ) -> Result<(), XmiError> {
        let vocab = self.dialect.vocabulary();
        let options = self.options;
        let Some(owned) = node.find_unique(vocab.owned_element, Scope::Children)? else {
            return Ok(());
        };
        for child in owned.children_named(vocab.package) {
            let name = self.dialect.name(child, options.fold_accents)?;
            if options.is_skipped_package(&name.to_string()) {
                tracing::debug!(package = %name, "skipping package");
                continue;
            }
            let package =
                self.init_element(child, ElementData::Package(PackageData::default()), Some(parent))?;

            let is_root = {
                let element = self.arena.get(package);
                options
                    .product_stereotypes
                    .iter()
                    .any(|s| element.stereotypes.contains(s.as_str()))
            };
            if let Some(data) = self.arena.get_mut(package).as_package_mut() {
                data.is_root = is_root;
            }
            if let Some(data) = self.arena.get_mut(parent).as_package_mut() {
                data.packages.push(package);
            }

            out.push((child, package));
            self.build_packages(child, package, out)?;
        }
        Ok(())
    }

    pub(crate) fn build_interfaces(
        &mut self,
        node: Node<'d>,
        package: ElementRef,
    ) -> Result<(), XmiError> {
        let vocab = self.dialect.vocabulary();
        let Some(owned) = node.find_unique(vocab.owned_element, Scope::Children)? else {
            return Ok(());
        };
        for child in owned.children_named(vocab.interface) {
            self.build_class(child, package, ClassifierKind::Interface)?;
        }
        Ok(())
    }

    /// Build the classes, then the association classes, owned by a package.
    ///
    /// An association class whose id is already registered is reused and
    /// only listed in this package.
    pub(crate) fn build_classes(
        &mut self,
        node: Node<'d>,
        package: ElementRef,
    ) -> Result<(), XmiError> {
        let vocab = self.dialect.vocabulary();
        let Some(owned) = node.find_unique(vocab.owned_element, Scope::Children)? else {
            tracing::debug!(package = %node.describe(), "package owns no elements");
            return Ok(());
        };
        for child in owned.children_named(vocab.class) {
            self.build_class(child, package, ClassifierKind::Class)?;
        }
        for child in owned.children_named(vocab.association_class) {
            match self.existing(child) {
                Some(existing) => {
                    tracing::debug!(class = %child.describe(), "reusing association class");
                    if let Some(class) = self.arena.get_mut(existing).as_class_mut() {
                        class.package.get_or_insert(package);
                    }
                    self.list_in_package(package, existing, ClassifierKind::AssociationClass);
                }
                None => {
                    self.build_class(child, package, ClassifierKind::AssociationClass)?;
                }
            }
        }
        Ok(())
    }

    /// Add a named classifier to its package's class or interface list.
    pub(crate) fn list_in_package(
        &mut self,
        package: ElementRef,
        class: ElementRef,
        kind: ClassifierKind,
    ) {
        if !self.is_named(class) {
            return;
        }
        if let Some(data) = self.arena.get_mut(package).as_package_mut() {
            let list = match kind {
                ClassifierKind::Interface => &mut data.interfaces,
                ClassifierKind::Class | ClassifierKind::AssociationClass => &mut data.classes,
            };
            if !list.contains(&class) {
                list.push(class);
            }
        }
    }

    pub(crate) fn classifier_data(
        &self,
        node: Node<'d>,
        package: Option<ElementRef>,
        kind: ClassifierKind,
    ) -> Result<ClassData, XmiError> {
        Ok(ClassData {
            is_interface: kind == ClassifierKind::Interface,
            is_abstract: self.dialect.is_abstract(node)?,
            visibility: self.dialect.visibility(node),
            owner_scope: self.dialect.owner_scope(node),
            package,
            association: (kind == ClassifierKind::AssociationClass)
                .then(AssociationData::default),
            ..Default::default()
        })
    }
}
