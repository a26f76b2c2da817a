//! XMI dialect handling.
//!
//! A [`Dialect`] is picked once per document from its `xmi.version`
//! attribute. It owns the tag [`Vocabulary`] of that generation and every
//! extraction rule that differs between generations: names, tagged values,
//! stereotypes, multiplicity, aggregation, abstractness, feature types and
//! expression bodies. Callers never branch on the version themselves.
//!
//! ```text
//! xmi.version >= "1.2"  -> Xmi12
//! xmi.version >= "1.1"  -> Xmi11
//! otherwise / missing   -> Xmi10
//! ```
//!
//! The comparison is a plain string comparison, so `"1.10"` reads as 1.1.

pub mod vocabulary;

use std::fmt;

use crate::base::{Multiplicity, NormalizedValue, normalize};
use crate::context::ParseContext;
use crate::error::XmiError;
use crate::model::{AggregationKind, ElementId, OwnerScope, TypeRef, Visibility};
use crate::xml::{Node, Scope};

pub use vocabulary::{Tags, Vocabulary, XMI_1_0, XMI_1_1, XMI_1_2, joined};

/// Stereotype that keeps an aggregating association end from counting as the whole.
const FLAVOR_STEREOTYPE: &str = "flavor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dialect {
    Xmi10,
    Xmi11,
    Xmi12,
}

impl Dialect {
    /// Select a dialect from a version string.
    pub fn from_version(version: &str) -> Self {
        let version = version.trim();
        if version >= "1.2" {
            Self::Xmi12
        } else if version >= "1.1" {
            Self::Xmi11
        } else {
            Self::Xmi10
        }
    }

    /// Select the dialect of a document from its `XMI` element.
    pub fn detect(xmi: Node<'_>) -> Self {
        match xmi.attr("xmi.version").map(str::trim) {
            Some(version) if !version.is_empty() => {
                let dialect = Self::from_version(version);
                tracing::debug!(version, dialect = %dialect, "detected XMI dialect");
                dialect
            }
            _ => {
                tracing::warn!("document has no xmi.version, reading it as XMI 1.0");
                Self::Xmi10
            }
        }
    }

    pub fn vocabulary(&self) -> &'static Vocabulary {
        match self {
            Self::Xmi10 => &XMI_1_0,
            Self::Xmi11 => &XMI_1_1,
            Self::Xmi12 => &XMI_1_2,
        }
    }

    pub fn version(&self) -> &'static str {
        match self {
            Self::Xmi10 => "1.0",
            Self::Xmi11 => "1.1",
            Self::Xmi12 => "1.2",
        }
    }

    // ========================================================================
    // IDS AND REFERENCES
    // ========================================================================

    /// The element's own `xmi.id`, trimmed; blank ids read as absent.
    pub fn id<'d>(node: Node<'d>) -> Option<&'d str> {
        node.attr("xmi.id").map(str::trim).filter(|id| !id.is_empty())
    }

    /// The `xmi.idref` of a reference node.
    pub fn idref<'d>(node: Node<'d>) -> Option<&'d str> {
        node.attr("xmi.idref").map(str::trim).filter(|id| !id.is_empty())
    }

    /// The id part of an `href`: everything after the last `/`.
    pub fn href_id<'d>(node: Node<'d>) -> Option<&'d str> {
        let href = node.attr("href")?.trim();
        let id = href.rsplit('/').next().unwrap_or(href);
        (!id.is_empty()).then_some(id)
    }

    /// True for a reference stub (`xmi.idref` or `href`) rather than a definition.
    pub fn is_reference(node: Node<'_>) -> bool {
        node.has_attr("xmi.idref") || node.has_attr("href")
    }

    /// Qualified id of an element defined in a document read under `prefix`.
    pub fn qualified_id(node: Node<'_>, prefix: &str) -> Option<String> {
        Self::id(node).map(|id| format!("{prefix}{id}"))
    }

    /// Resolve a reference node to a registry key.
    ///
    /// Same-document `xmi.idref`s get the document prefix; an `href` already
    /// names its target document and is used as written.
    pub fn reference(node: Node<'_>, prefix: &str) -> Option<String> {
        if let Some(idref) = Self::idref(node) {
            return Some(format!("{prefix}{idref}"));
        }
        Self::href_id(node).map(str::to_string)
    }

    // ========================================================================
    // NAMES AND FLAGS
    // ========================================================================

    /// The element's normalized name; elements without one get empty text.
    pub fn name(&self, node: Node<'_>, fold: bool) -> Result<NormalizedValue, XmiError> {
        let raw = match self {
            Self::Xmi10 => node.value_of(self.vocabulary().name, Scope::Children)?,
            Self::Xmi11 | Self::Xmi12 => node.attr("name"),
        };
        Ok(raw.map(|r| normalize(r, fold)).unwrap_or_default())
    }

    /// `isAbstract`, or `None` when the document does not say.
    pub fn is_abstract(&self, node: Node<'_>) -> Result<Option<bool>, XmiError> {
        match self {
            Self::Xmi10 | Self::Xmi11 => Ok(node
                .find_unique(self.vocabulary().is_abstract, Scope::Children)?
                .map(|flag| flag.value().map(str::trim) == Some("true"))),
            Self::Xmi12 => Ok(node.attr("isAbstract").map(|v| v.trim() == "true")),
        }
    }

    /// Declared visibility. Only 1.2 documents carry it.
    pub fn visibility(&self, node: Node<'_>) -> Option<Visibility> {
        match self {
            Self::Xmi12 => node.attr("visibility").and_then(Visibility::parse),
            _ => None,
        }
    }

    /// Declared owner scope. Only 1.2 documents carry it.
    pub fn owner_scope(&self, node: Node<'_>) -> Option<OwnerScope> {
        match self {
            Self::Xmi12 => node.attr("ownerScope").and_then(OwnerScope::parse),
            _ => None,
        }
    }

    // ========================================================================
    // TAGGED VALUES AND STEREOTYPES
    // ========================================================================

    /// Read one tagged value node as a `(tag, value)` pair.
    ///
    /// Returns `Ok(None)` for a 1.2 tagged value whose tag definition is
    /// missing or unresolved, and [`XmiError::EmptyTag`] for a blank tag.
    pub fn tagged_value(
        &self,
        tagged: Node<'_>,
        ctx: &ParseContext<'_>,
        prefix: &str,
        fold: bool,
    ) -> Result<Option<(String, String)>, XmiError> {
        let vocab = self.vocabulary();
        let tag = match self {
            Self::Xmi10 | Self::Xmi11 => tagged
                .value_of(vocab.tagged_value_tag, Scope::Children)?
                .unwrap_or_default(),
            Self::Xmi12 => {
                let Some(definition) = tagged.find_unique(vocab.tag_definition, Scope::Descendants)?
                else {
                    tracing::warn!(element = %tagged.describe(), "tagged value has no tag definition");
                    return Ok(None);
                };
                let resolved = Self::reference(definition, prefix)
                    .and_then(|id| ctx.tag_definition(&id));
                match resolved {
                    Some(definition) => definition.attr("name").unwrap_or_default(),
                    None => {
                        tracing::warn!(
                            element = %tagged.describe(),
                            "tag definition of tagged value not found"
                        );
                        return Ok(None);
                    }
                }
            }
        };
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(XmiError::EmptyTag {
                element: tagged.describe(),
            });
        }
        let value = tagged
            .value_of(vocab.tagged_value_value, Scope::Children)?
            .unwrap_or_default();
        Ok(Some((tag.to_string(), fold_text(value, fold))))
    }

    /// Names of the stereotypes applied to an element, in discovery order.
    ///
    /// 1.0 and 1.1 documents list extended elements on the stereotype, so the
    /// lookup goes through the reverse index built while collecting
    /// definitions. 1.2 elements reference their stereotypes directly.
    pub fn stereotypes(
        &self,
        node: Node<'_>,
        ctx: &ParseContext<'_>,
        prefix: &str,
        fold: bool,
    ) -> Result<Vec<String>, XmiError> {
        match self {
            Self::Xmi10 | Self::Xmi11 => Ok(Self::qualified_id(node, prefix)
                .map(|id| ctx.extended_by(&id).to_vec())
                .unwrap_or_default()),
            Self::Xmi12 => {
                let mut names = Vec::new();
                for container in node.children_named(self.vocabulary().element_stereotype) {
                    for reference in container.children() {
                        let Some(id) = Self::reference(reference, prefix) else {
                            tracing::warn!(element = %node.describe(), "stereotype reference without id");
                            continue;
                        };
                        match ctx.stereotype(&id) {
                            Some(stereotype) => {
                                let name = self.name(stereotype, fold)?;
                                if !name.is_empty() {
                                    names.push(name.to_string());
                                }
                            }
                            None => {
                                tracing::warn!(element = %node.describe(), stereotype = %id, "stereotype not found");
                            }
                        }
                    }
                }
                Ok(names)
            }
        }
    }

    // ========================================================================
    // FEATURES
    // ========================================================================

    /// Multiplicity of an attribute, parameter or association end.
    ///
    /// Only the first range counts when several are given. Missing bounds
    /// fall back to `default`; a bound that is present but not an integer
    /// is an [`XmiError::InvalidMultiplicity`].
    pub fn multiplicity(
        &self,
        node: Node<'_>,
        default: Multiplicity,
    ) -> Result<Multiplicity, XmiError> {
        let vocab = self.vocabulary();
        let (lower, upper) = match self {
            Self::Xmi10 | Self::Xmi11 => (
                node.find_first(vocab.multiplicity_lower, Scope::Descendants)
                    .and_then(|n| n.value()),
                node.find_first(vocab.multiplicity_upper, Scope::Descendants)
                    .and_then(|n| n.value()),
            ),
            Self::Xmi12 => match node.find_first(vocab.multiplicity_range, Scope::Descendants) {
                Some(range) => (range.attr("lower"), range.attr("upper")),
                None => (None, None),
            },
        };
        let lower = parse_bound(node, lower)?.unwrap_or(default.lower);
        let upper = parse_bound(node, upper)?.unwrap_or(default.upper);
        Ok(Multiplicity::new(lower, upper))
    }

    /// Aggregation kind of an association end.
    pub fn aggregation_kind(&self, end: Node<'_>) -> AggregationKind {
        let raw = match self {
            Self::Xmi10 | Self::Xmi11 => end
                .find_first(self.vocabulary().aggregation, Scope::Descendants)
                .and_then(|n| n.value()),
            Self::Xmi12 => end.attr("aggregation"),
        };
        raw.map(AggregationKind::parse).unwrap_or_default()
    }

    /// True if the end aggregates and is not stereotyped as a flavor.
    pub fn is_aggregation_end<'s>(
        &self,
        end: Node<'_>,
        mut stereotypes: impl Iterator<Item = &'s str>,
    ) -> bool {
        self.aggregation_kind(end).is_aggregating()
            && !stereotypes.any(|s| s == FLAVOR_STEREOTYPE)
    }

    /// Registry key of the class at the far side of an association end.
    pub fn association_end_participant(
        &self,
        end: Node<'_>,
        prefix: &str,
    ) -> Result<Option<String>, XmiError> {
        let vocab = self.vocabulary();
        let wrapper = match end.find_unique(vocab.association_end_participant, Scope::Children)? {
            Some(wrapper) => Some(wrapper),
            None => end.find_unique(vocab.association_end_type, Scope::Children)?,
        };
        let Some(wrapper) = wrapper else {
            return Ok(None);
        };
        Ok(wrapper
            .sub_element()?
            .and_then(|target| Self::reference(target, prefix)))
    }

    /// Resolve the declared type of a typed feature against the datatype registry.
    ///
    /// `type_tags` names the wrapper holding the type reference. A reference
    /// absent from the registry is an [`XmiError::UnresolvedType`].
    pub fn datatype_of(
        &self,
        node: Node<'_>,
        type_tags: &[&str],
        ctx: &ParseContext<'_>,
        prefix: &str,
        fold: bool,
    ) -> Result<Option<TypeRef>, XmiError> {
        let Some(wrapper) = node.find_first(type_tags, Scope::Descendants) else {
            return Ok(None);
        };
        let target = match self {
            Self::Xmi10 => wrapper.find_first(self.vocabulary().classifier, Scope::Descendants),
            Self::Xmi11 | Self::Xmi12 => wrapper.first_sub_element(),
        };
        let Some(id) = target.and_then(|t| Self::reference(t, prefix)) else {
            return Ok(None);
        };
        match ctx.datatype(&id) {
            Some(datatype) => Ok(Some(TypeRef {
                name: self.name(datatype, fold)?,
                id: ElementId::from(id),
            })),
            None => Err(XmiError::UnresolvedType {
                element: node.describe(),
                type_id: id,
            }),
        }
    }

    /// Tags holding the declared type of an attribute.
    pub fn attribute_type_tags(&self) -> Vec<&'static str> {
        let vocab = self.vocabulary();
        joined(&[vocab.structural_feature_type, vocab.typed_element_type])
    }

    // ========================================================================
    // EXPRESSIONS
    // ========================================================================

    /// Body text of the expression below `node`.
    ///
    /// 1.0 documents always nest an `Expression.body` element; later
    /// dialects put the body in the `body` attribute of one of `tags`.
    pub fn expression_body(&self, node: Node<'_>, tags: &[&str]) -> Result<Option<String>, XmiError> {
        let body = match self {
            Self::Xmi10 => node
                .find_unique(self.vocabulary().expression_body, Scope::Descendants)?
                .and_then(|b| b.text()),
            Self::Xmi11 | Self::Xmi12 => node
                .find_unique(tags, Scope::Descendants)?
                .and_then(|e| e.attr("body")),
        };
        Ok(body.map(str::to_string))
    }

    /// The kind of a pseudostate (`initial`, `choice`, ...), from a `kind`
    /// child value or the `kind` attribute.
    pub fn pseudostate_kind<'d>(&self, node: Node<'d>) -> Result<Option<&'d str>, XmiError> {
        let from_child = node.value_of(self.vocabulary().pseudostate_kind, Scope::Children)?;
        Ok(from_child.or_else(|| node.attr("kind")).map(str::trim))
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XMI {}", self.version())
    }
}

fn fold_text(raw: &str, fold: bool) -> String {
    let trimmed = raw.trim();
    if fold {
        crate::base::fold_accents(trimmed)
    } else {
        trimmed.to_string()
    }
}

fn parse_bound(node: Node<'_>, raw: Option<&str>) -> Result<Option<i64>, XmiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| XmiError::InvalidMultiplicity {
                element: node.describe(),
                value: value.to_string(),
            }),
    }
}
