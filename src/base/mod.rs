//! Foundation types for the XMI reader.
//!
//! This module provides the small value types shared by every layer:
//! - [`NormalizedValue`] - a name or value after numeric coercion
//! - [`normalize`], [`clean_name`], [`to_boolean`] - the name normalization contract
//! - [`Multiplicity`] - lower/upper bounds with the unbounded sentinel
//! - Domain constants (reserved primitive names, sentinel values)
//!
//! This module has NO dependencies on other umlxmi modules.

mod multiplicity;
mod name;

pub use multiplicity::Multiplicity;
pub use name::{NormalizedValue, clean_name, fold_accents, normalize, to_boolean};

/// Upper bound used when the source declares `-1` (unbounded).
pub const UNBOUNDED: i64 = 99_999;

/// Class names that are elided from default enumeration when structurally empty.
pub const RESERVED_PRIMITIVES: &[&str] = &["int", "void", "string"];

/// Parameter name that is never added to a method's parameter list.
pub const RETURN_PARAMETER: &str = "return";
