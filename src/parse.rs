//! Top-level parse: documents in, [`ModelGraph`] out.
//!
//! ```text
//! collect    datatypes, stereotypes, tag definitions (profiles, then primary)
//! build      one model tree per document (profiles, then primary)
//! resolve    relationships per document, within `root_package` if set
//! link       transitions, machine classes, diagrams, machine placement
//! elide      reserved-name empty classes marked internal
//! ```

use indexmap::IndexMap;

use crate::builder::{ModelBuilder, SourceDocument, elide_internal_classes};
use crate::context::ParseContext;
use crate::error::XmiError;
use crate::model::{ElementArena, ModelGraph};
use crate::options::ParseOptions;
use crate::statemachine::link_state_machines;
use crate::xml::{Document, Node, Scope};

/// Root element every XMI document carries.
const XMI_ROOT: &str = "XMI";

/// Parses XMI documents into a [`ModelGraph`].
///
/// Each call to [`XmiParser::parse`] uses a fresh [`ParseContext`], so one
/// parser can be reused and shared across threads.
#[derive(Debug, Clone, Default)]
pub struct XmiParser {
    options: ParseOptions,
}

impl XmiParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a primary document together with profile documents keyed by
    /// profile name (typically the profile's file name).
    pub fn parse(
        &self,
        primary: &Document,
        profiles: &IndexMap<String, Document>,
    ) -> Result<ModelGraph, XmiError> {
        let fold = self.options.fold_accents;

        let mut profile_sources = Vec::with_capacity(profiles.len());
        for (key, doc) in profiles {
            let xmi = doc.find_first(XMI_ROOT).ok_or(XmiError::MissingRoot)?;
            profile_sources.push(SourceDocument::profile(key, xmi));
        }
        let primary = SourceDocument::primary(primary.find_first(XMI_ROOT).ok_or(XmiError::MissingRoot)?);
        tracing::debug!(dialect = %primary.dialect, profiles = profile_sources.len(), "parsing XMI");

        let mut ctx = ParseContext::new();
        for source in profile_sources.iter().chain(std::iter::once(&primary)) {
            ctx.collect_document(source.xmi, source.dialect, &source.prefix, fold)?;
        }

        let mut arena = ElementArena::default();
        let mut profile_models = IndexMap::new();
        for source in &profile_sources {
            let mut builder = ModelBuilder::new(&mut ctx, &mut arena, &self.options, source);
            match builder.build_model(source)? {
                Some(model) => {
                    if let Some(key) = &source.profile {
                        profile_models.insert(key.clone(), model);
                    }
                }
                None => {
                    tracing::debug!(profile = ?source.profile, "profile has no model");
                }
            }
        }
        let root = {
            let mut builder = ModelBuilder::new(&mut ctx, &mut arena, &self.options, &primary);
            builder.build_model(&primary)?.ok_or_else(|| {
                XmiError::missing_element(
                    primary.dialect.vocabulary().model.join("|"),
                    primary.xmi.describe(),
                )
            })?
        };

        for source in profile_sources.iter().chain(std::iter::once(&primary)) {
            let scope = self.resolution_scope(source)?;
            let mut builder = ModelBuilder::new(&mut ctx, &mut arena, &self.options, source);
            builder.resolve_relationships(scope)?;
        }

        let deferred = std::mem::take(&mut ctx.deferred);
        link_state_machines(&mut arena, &ctx, &deferred);
        elide_internal_classes(&mut arena, &self.options);

        tracing::debug!(
            elements = arena.len(),
            registered = ctx.element_count(),
            "parsed model"
        );
        Ok(ModelGraph::new(arena, ctx.into_index(), root, profile_models))
    }

    /// Parse XMI text without profiles.
    pub fn parse_str(&self, input: &str) -> Result<ModelGraph, XmiError> {
        let doc = Document::parse_str(input)?;
        self.parse(&doc, &IndexMap::new())
    }

    /// The first package named `root_package`, else the whole document.
    fn resolution_scope<'d>(&self, source: &SourceDocument<'d>) -> Result<Node<'d>, XmiError> {
        let Some(wanted) = &self.options.root_package else {
            return Ok(source.xmi);
        };
        let vocab = source.dialect.vocabulary();
        for package in source.xmi.find_all(vocab.package, Scope::Descendants) {
            if source
                .dialect
                .name(package, self.options.fold_accents)?
                .matches(wanted)
            {
                return Ok(package);
            }
        }
        tracing::debug!(package = %wanted, "root package not found, resolving whole document");
        Ok(source.xmi)
    }
}

/// Parse with default options.
pub fn parse(primary: &Document, profiles: &IndexMap<String, Document>) -> Result<ModelGraph, XmiError> {
    XmiParser::default().parse(primary, profiles)
}

/// Parse XMI text with default options and no profiles.
pub fn parse_str(input: &str) -> Result<ModelGraph, XmiError> {
    XmiParser::default().parse_str(input)
}
