//! Caller-supplied parse configuration.

/// Options controlling name normalization and a few model heuristics.
///
/// ```ignore
/// use umlxmi::ParseOptions;
///
/// let options = ParseOptions::default()
///     .with_fold_accents(true)
///     .with_skipped_package("vendor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    /// Fold umlauts and sharp s to ASCII in names and tagged values.
    pub fold_accents: bool,
    /// Packages with these names are never built.
    pub skipped_packages: Vec<String>,
    /// Stereotypes that keep a reserved-name class out of internal elision.
    pub generated_datatype_stereotypes: Vec<String>,
    /// Stereotypes that mark a package as a product root.
    pub product_stereotypes: Vec<String>,
    /// Restrict relationship resolution to the first package with this name.
    pub root_package: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            fold_accents: false,
            skipped_packages: vec!["java".to_string()],
            generated_datatype_stereotypes: vec![
                "field".to_string(),
                "compound_field".to_string(),
            ],
            product_stereotypes: ["product", "zopeproduct", "Product", "ZopeProduct"]
                .into_iter()
                .map(String::from)
                .collect(),
            root_package: None,
        }
    }
}

impl ParseOptions {
    pub fn with_fold_accents(mut self, fold: bool) -> Self {
        self.fold_accents = fold;
        self
    }

    pub fn with_skipped_package(mut self, name: impl Into<String>) -> Self {
        self.skipped_packages.push(name.into());
        self
    }

    pub fn with_generated_datatype_stereotype(mut self, name: impl Into<String>) -> Self {
        self.generated_datatype_stereotypes.push(name.into());
        self
    }

    pub fn with_product_stereotype(mut self, name: impl Into<String>) -> Self {
        self.product_stereotypes.push(name.into());
        self
    }

    pub fn with_root_package(mut self, name: impl Into<String>) -> Self {
        self.root_package = Some(name.into());
        self
    }

    pub(crate) fn is_skipped_package(&self, name: &str) -> bool {
        self.skipped_packages.iter().any(|p| p == name)
    }
}
