//! Small UML enumerations carried by model elements.

use std::fmt;

/// Whole-part strength of an association end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum AggregationKind {
    #[default]
    None,
    Aggregate,
    Composite,
}

impl AggregationKind {
    /// Parse the dialect's aggregation text; unknown text reads as `None`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "aggregate" => Self::Aggregate,
            "composite" => Self::Composite,
            _ => Self::None,
        }
    }

    /// True for aggregate and composite.
    pub fn is_aggregating(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Aggregate => "aggregate",
            Self::Composite => "composite",
        }
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
    Package,
}

impl Visibility {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            "package" => Some(Self::Package),
            _ => None,
        }
    }
}

/// Whether a feature belongs to instances or to the classifier itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerScope {
    Instance,
    Classifier,
}

impl OwnerScope {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "instance" => Some(Self::Instance),
            "classifier" => Some(Self::Classifier),
            _ => None,
        }
    }
}

/// Which state tag a state was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Simple,
    Pseudo,
    Final,
}

/// How a workflow transition fires.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TriggerType {
    Automatic,
    User,
    WorkflowMethod,
    /// Tagged value text that names none of the known kinds, kept verbatim.
    Other(String),
}

impl TriggerType {
    /// Map the `trigger_type` tagged value; absent means user action.
    pub fn from_tagged_value(value: Option<&str>) -> Self {
        match value.unwrap_or("user action") {
            "automatic" => Self::Automatic,
            "user action" => Self::User,
            "workflow method" => Self::WorkflowMethod,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Automatic => "AUTOMATIC",
            Self::User => "USER",
            Self::WorkflowMethod => "WORKFLOWMETHOD",
            Self::Other(s) => s,
        }
    }
}
