//! structured_store - Schema-driven attribute materialization
//!
//! Records expose a runtime-defined set of typed fields derived from a
//! stored JSON Schema document: the inspector reads the document, the
//! resolver registry dispatches each property's reference string to a
//! resolver, and resolvers install get/set accessors backed by a single
//! key-value blob. Versioned schemas and validation-error mapping round
//! out the engine.

pub mod converters;
pub mod error;
pub mod observability;
pub mod resolvers;
pub mod schema;
pub mod store;
pub mod validation;
pub mod versioned;
