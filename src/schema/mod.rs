//! Schema inspection subsystem
//!
//! A schema document is an opaque JSON object with three relevant top-level
//! maps: `properties`, `definitions`, and schema metadata (`$schema` and
//! friends). The inspector parses a document once and answers repeated
//! lookups without re-parsing.
//!
//! # Design principles
//!
//! - String inputs are size-capped before parsing (resource exhaustion is a
//!   hard failure, not an invalid document)
//! - Absent `properties`/`definitions` behave as empty maps, never as errors
//! - Meta-schema validity is a boolean question; `is_valid` never panics

mod inspector;
mod types;

pub use inspector::{SchemaInspector, MAX_JSON_INPUT_SIZE};
pub use types::ScalarType;
