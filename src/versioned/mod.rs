//! Versioned schema storage
//!
//! Schema documents are identified by `(name, version)` and immutable once
//! registered, except for explicit document replacement. Versions follow
//! semantic-version ordering, so `1.10.0` sorts after `1.2.0`.

mod catalog;
mod schema;

pub use catalog::SchemaCatalog;
pub use schema::VersionedSchema;
