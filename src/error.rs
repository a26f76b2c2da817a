//! Error types for XMI model parsing.

use thiserror::Error;

/// Errors that abort a parse.
///
/// Recoverable conditions (unresolved relationship ends, blank tagged-value
/// names, malformed associations) are logged where they occur and never
/// surface here, with the exception of [`XmiError::EmptyTag`], which the
/// dialect layer returns and the builder downgrades to a warning.
#[derive(Debug, Error)]
pub enum XmiError {
    /// XML parsing error (input is not well-formed).
    #[error("XML error: {0}")]
    Xml(String),

    /// The document has no `XMI` element.
    #[error("Document has no XMI root element")]
    MissingRoot,

    /// A structurally required element is absent.
    #[error("Missing required element {tag} in {context}")]
    MissingElement { tag: String, context: String },

    /// An attribute's type references an id absent from the datatype registry.
    #[error("Unresolved type '{type_id}' for {element}")]
    UnresolvedType { element: String, type_id: String },

    /// A lookup that requires a unique match found several.
    #[error("More than one <{tag}> found in {parent}")]
    AmbiguousTag { tag: String, parent: String },

    /// Two elements claim the same id.
    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    /// A tagged value without a tag name.
    #[error("Element {element} has an empty tagged value")]
    EmptyTag { element: String },

    /// A multiplicity bound that is not an integer.
    #[error("Invalid multiplicity '{value}' in {element}")]
    InvalidMultiplicity { element: String, value: String },

    /// ZIP archive error (for .zargo/.zuml/.zip input).
    #[error("Archive error: {0}")]
    Archive(String),

    /// IO error while loading input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unsupported input or feature.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl XmiError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create an archive error.
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive(message.into())
    }

    /// Create an ambiguous tag error.
    pub fn ambiguous(tag: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::AmbiguousTag {
            tag: tag.into(),
            parent: parent.into(),
        }
    }

    /// Create a missing element error.
    pub fn missing_element(tag: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingElement {
            tag: tag.into(),
            context: context.into(),
        }
    }

    /// True for the conditions a caller may log and continue past.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyTag { .. })
    }
}
