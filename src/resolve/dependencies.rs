//! Realizations, adaptations and plain dependencies.

use crate::builder::ModelBuilder;
use crate::dialect::Dialect;
use crate::error::XmiError;
use crate::model::{DependencyData, ElementData, ElementRef};
use crate::xml::{Node, Scope};

use super::push_unique;

const REALIZE: &str = "realize";
const ADAPTS: &str = "adapts";

impl<'a, 'd> ModelBuilder<'a, 'd> {
    /// Build the abstractions stereotyped `realize` or `adapts` and link
    /// their edges. Returns how many were linked.
    pub(crate) fn resolve_abstractions(&mut self, scope: Node<'d>) -> Result<usize, XmiError> {
        let vocab = self.dialect.vocabulary();
        let fold = self.options.fold_accents;
        let mut linked = 0;

        for node in scope.find_all(vocab.abstraction, Scope::Descendants) {
            if Dialect::id(node).is_none() {
                continue;
            }
            let stereotypes = self.dialect.stereotypes(node, self.ctx, self.prefix, fold)?;
            let realize = stereotypes.iter().any(|s| s == REALIZE);
            let adapts = stereotypes.iter().any(|s| s == ADAPTS);
            if !realize && !adapts {
                tracing::debug!(abstraction = %node.describe(), ?stereotypes, "skipping abstraction");
                continue;
            }

            let Some(supplier) = self.abstraction_end(node, vocab.dependency_supplier)? else {
                tracing::warn!(abstraction = %node.describe(), "abstraction supplier not found");
                continue;
            };
            let Some(client) = self.abstraction_end(node, vocab.dependency_client)? else {
                tracing::warn!(
                    abstraction = %node.describe(),
                    supplier = %self.arena.get(supplier).display_name(),
                    "abstraction client not found"
                );
                continue;
            };

            let data = DependencyData {
                client: Some(client),
                supplier: Some(supplier),
            };
            let abstraction = match self.existing(node) {
                Some(existing) => existing,
                None => self.init_element(node, ElementData::Abstraction(data), None)?,
            };
            self.arena.get_mut(abstraction).parent = Some(client);

            if let Some(class) = self.arena.get_mut(supplier).as_class_mut() {
                if realize {
                    push_unique(&mut class.realization_children, client);
                }
                if adapts {
                    push_unique(&mut class.adaptation_children, client);
                }
            }
            if let Some(class) = self.arena.get_mut(client).as_class_mut() {
                if realize {
                    push_unique(&mut class.realization_parents, supplier);
                }
                if adapts {
                    push_unique(&mut class.adaptation_parents, supplier);
                }
            }
            linked += 1;
        }
        Ok(linked)
    }

    /// First referenced classifier inside the recursive `tags` wrapper.
    fn abstraction_end(&self, node: Node<'d>, tags: &[&str]) -> Result<Option<ElementRef>, XmiError> {
        let Some(wrapper) = node.find_unique(tags, Scope::Descendants)? else {
            return Ok(None);
        };
        Ok(self.classifier(wrapper.first_sub_element()))
    }

    /// Build every dependency below `scope` and list it on its client.
    /// Returns how many were built.
    pub(crate) fn resolve_dependencies(&mut self, scope: Node<'d>) -> Result<usize, XmiError> {
        let vocab = self.dialect.vocabulary();
        let mut built = 0;

        for node in scope.find_all(vocab.dependency, Scope::Descendants) {
            if Dialect::id(node).is_none() {
                continue;
            }
            let client = self.dependency_end(node, vocab.dependency_client)?;
            let supplier = self.dependency_end(node, vocab.dependency_supplier)?;
            let (Some(client), Some(supplier)) = (client, supplier) else {
                tracing::warn!(dependency = %node.describe(), "dependency client or supplier not found");
                continue;
            };

            let dependency = match self.existing(node) {
                Some(existing) => existing,
                None => {
                    let data = DependencyData {
                        client: Some(client),
                        supplier: Some(supplier),
                    };
                    self.init_element(node, ElementData::Dependency(data), None)?
                }
            };
            self.arena.get_mut(dependency).parent = Some(client);
            push_unique(&mut self.arena.get_mut(client).client_dependencies, dependency);
            built += 1;
        }
        Ok(built)
    }

    fn dependency_end(&self, node: Node<'d>, tags: &[&str]) -> Result<Option<ElementRef>, XmiError> {
        let Some(wrapper) = node.find_unique(tags, Scope::Children)? else {
            return Ok(None);
        };
        let Some(target) = wrapper.sub_element()? else {
            return Ok(None);
        };
        Ok(Dialect::reference(target, self.prefix).and_then(|key| self.ctx.lookup(&key)))
    }
}
