//! Name normalization.
//!
//! Every name read from a document goes through [`normalize`]: text that
//! parses as an integer or float becomes a number, everything else is
//! trimmed (and optionally folded to ASCII). Consumers that need an
//! identifier use [`clean_name`].

use std::fmt;

/// A name or value after normalization.
///
/// Numeric-looking names are coerced, so a class literally named `"123"`
/// carries `Int(123)` rather than text.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NormalizedValue {
    /// The empty text value.
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// True for empty text. Numbers are never empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// The text, if this value was not coerced to a number.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// True if the textual form equals `other`.
    pub fn matches(&self, other: &str) -> bool {
        match self {
            Self::Text(s) => s == other,
            _ => self.to_string() == other,
        }
    }
}

impl Default for NormalizedValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for NormalizedValue {
    fn from(s: &str) -> Self {
        normalize(s, false)
    }
}

/// Normalize raw document text.
///
/// Tries an integer parse, then a float parse; otherwise trims the text and,
/// when `fold` is set, replaces German umlauts and sharp s with ASCII pairs.
pub fn normalize(raw: &str, fold: bool) -> NormalizedValue {
    let trimmed = raw.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return NormalizedValue::Int(i);
    }
    if !trimmed.is_empty()
        && let Ok(x) = trimmed.parse::<f64>()
    {
        return NormalizedValue::Float(x);
    }
    if fold {
        NormalizedValue::Text(fold_accents(trimmed))
    } else {
        NormalizedValue::Text(trimmed.to_string())
    }
}

/// Replace the accented characters the generators cannot emit.
pub fn fold_accents(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'ä' => out.push_str("ae"),
            'Ö' => out.push_str("Oe"),
            'Ü' => out.push_str("Ue"),
            'Ä' => out.push_str("Ae"),
            'ß' => out.push_str("ss"),
            other => out.push(other),
        }
    }
    out
}

/// Identifier-safe form of a name: namespace separators, dashes, dots,
/// spaces, slashes and dollars all become underscores.
pub fn clean_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ':' | '-' | '.' | ' ' | '/' | '$' => '_',
            other => other,
        })
        .collect()
}

/// Lenient boolean parse used for navigability and similar flags.
///
/// `"0"`, `"false"` and empty text are false, anything else non-empty is true.
pub fn to_boolean(raw: &str) -> bool {
    let v = raw.trim().to_lowercase();
    !(v.is_empty() || v == "0" || v == "false")
}
