//! Validation-error mapping
//!
//! The engine does not validate values itself; an external JSON Schema
//! validator produces [`Violation`] records and the mapper translates them
//! into field-indexed [`FieldError`]s with stable codes. Validation errors
//! are data, never `Err`: a failing document yields a non-empty error list,
//! not a propagated `StoreError`.

mod document;
mod mapper;
mod violation;

pub use document::DocumentValidator;
pub use mapper::{field_for_pointer, map_violation, map_violations};
pub use violation::{FieldError, FieldErrorKind, Violation};
