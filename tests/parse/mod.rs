//! End-to-end parse tests
//!
//! Whole documents through `XmiParser`:
//! - Relationship resolution
//! - Dialect independence and repeatability
//! - State machines and diagrams
//! - Profile documents
//! - File and archive loading

pub mod tests_dialects;
pub mod tests_loader;
pub mod tests_relationships;
pub mod tests_state_machines;
