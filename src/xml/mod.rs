//! XML input layer.
//!
//! The dialect and builder layers never see quick-xml types; they work on
//! the owned [`Document`] and its [`Node`] handles.

mod document;
mod query;

pub use document::{Descendants, Document, Node, NodeId};
pub use query::Scope;
