//! Record-side materialization surface
//!
//! A record's dynamic state lives in one underlying key-value blob (the
//! store map). Materialization reads the record's schema, resolves each
//! declared property to a resolver, and installs a get/set accessor pair
//! per property into the record's attribute set. Attributes are first-class
//! runtime values, not language-level fields.

mod accessor;
mod record;

pub use accessor::{Accessor, AttributeSet, Getter, Setter, StoreMap};
pub use record::{Attachment, StructuredRecord};
