//! # umlxmi-base
//!
//! Core library for reading XMI 1.0/1.1/1.2 UML models into a
//! cross-referenced object graph.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parse / loader  → XmiParser entry points, file and archive loading
//!   ↓
//! resolve         → pass 2: associations, generalizations, dependencies
//! statemachine    → machines, transitions, states, diagrams
//!   ↓
//! builder         → pass 1: model tree from one document
//!   ↓
//! context         → per-parse registries (datatypes, stereotypes, elements)
//! dialect         → XMI 1.0/1.1/1.2 vocabulary and extraction rules
//!   ↓
//! model           → element arena, ModelGraph and typed views
//! xml             → owned DOM over quick-xml
//!   ↓
//! base            → names, multiplicities, constants
//! ```
//!
//! ```ignore
//! let graph = umlxmi::parse_str(xmi_text)?;
//! for class in graph.model().classes(true) {
//!     println!("{} <- {:?}", class.name(), class.gen_parents(false));
//! }
//! ```

// ============================================================================
// MODULES (dependency order: base → xml/model → dialect/context → builder → resolve → parse)
// ============================================================================

/// Foundation types: normalized names, multiplicities
pub mod base;

/// Owned XML document and node queries
pub mod xml;

/// Error type shared by every layer
pub mod error;

/// Caller-supplied parse configuration
pub mod options;

/// UML element arena and the finished graph
pub mod model;

/// XMI dialect detection and per-dialect extraction
pub mod dialect;

/// Per-parse registries
pub mod context;

/// Pass 1: building the model tree
pub mod builder;

/// Pass 2: relationship edges
mod resolve;

/// State machines and diagrams
pub mod statemachine;

/// Parser entry points
pub mod parse;

/// File and archive loading
pub mod loader;

pub use context::ParseContext;
pub use dialect::Dialect;
pub use error::XmiError;
pub use loader::{LoadedDocuments, Loader, load_path};
pub use model::{ElementId, ElementKind, ElementRef, ModelGraph};
pub use options::ParseOptions;
pub use parse::{XmiParser, parse, parse_str};
pub use xml::Document;
