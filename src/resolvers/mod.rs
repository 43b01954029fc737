//! Reference resolvers
//!
//! Each declared property carries a reference string: empty (resolve by
//! direct type), `#/definitions/<name>` (local definition), or an external
//! scheme URI. The registry pattern-matches that string to a resolver
//! implementation; the resolver materializes the property's accessor and
//! enumerates its selectable options.
//!
//! Third parties extend the engine by registering their own factory for a
//! new external scheme; nothing in the engine changes.

mod blank;
mod date_range;
mod definitions;
mod lookup;
mod registry;
mod types;

use std::sync::Arc;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::StoreResult;
use crate::schema::{ScalarType, SchemaInspector};
use crate::store::{Accessor, Attachment, StoreMap};

pub use blank::{BlankResolver, BlankResolverFactory};
pub use date_range::{DateRangeResolver, DateRangeResolverFactory};
pub use definitions::{DefinitionsResolver, DefinitionsResolverFactory};
pub use lookup::{LookupResolver, LookupResolverFactory};
pub use registry::{global_registry, ResolverRegistry};
pub use types::{LookupEntry, LookupSource, ResolverContext, SelectOption};

/// Strategy object for one reference-string pattern.
///
/// Resolvers are ephemeral: constructed per (schema, property) pair at
/// materialization time and stateless with respect to record instances.
pub trait RefResolver {
    /// Returns a function that installs the property's get/set accessor
    /// pair on a record instance. Applying it twice overwrites.
    fn define_attribute(&self, registry: &ResolverRegistry) -> StoreResult<Attachment>;

    /// Enumerates selectable `(value, label)` options, in order. Empty when
    /// the property has no enumerable domain.
    fn options_array(&self, registry: &ResolverRegistry) -> StoreResult<Vec<SelectOption>>;

    /// Reports the underlying scalar type, used when the property appears
    /// as an array item. Non-scalar resolvers fail here.
    fn scalar_type(&self) -> StoreResult<ScalarType>;
}

impl std::fmt::Debug for dyn RefResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn RefResolver")
    }
}

/// Constructs resolvers for reference strings matching its pattern.
pub trait ResolverFactory: Send + Sync {
    /// Stable identifier used to unregister the factory.
    fn id(&self) -> &'static str;

    /// Anchored pattern over reference strings.
    fn pattern(&self) -> Regex;

    /// Builds a resolver for one (schema, property) pair.
    fn build(
        &self,
        inspector: Arc<SchemaInspector>,
        property: String,
        property_schema: Map<String, Value>,
        ref_string: String,
        context: ResolverContext,
    ) -> Box<dyn RefResolver>;
}

/// Builds the typed-coercion accessor shared by every scalar resolver.
pub(crate) fn scalar_accessor(property: &str, scalar: ScalarType) -> Accessor {
    let get_name = property.to_string();
    let set_name = property.to_string();
    Accessor::new(
        Box::new(move |store: &StoreMap| {
            Ok(match store.get(&get_name) {
                None | Some(Value::Null) => None,
                Some(value) => Some(scalar.coerce(value)),
            })
        }),
        Box::new(move |store: &mut StoreMap, value: Value| {
            let coerced = match value {
                Value::Null => Value::Null,
                other => scalar.coerce(&other),
            };
            store.insert(set_name.clone(), coerced);
            Ok(())
        }),
    )
}

/// Builds the ordered-list accessor for array-of-scalar properties.
pub(crate) fn array_accessor(property: &str, item: ScalarType) -> Accessor {
    let get_name = property.to_string();
    let set_name = property.to_string();
    Accessor::new(
        Box::new(move |store: &StoreMap| {
            Ok(match store.get(&get_name) {
                Some(Value::Array(items)) => Some(Value::Array(
                    items.iter().map(|value| item.coerce(value)).collect(),
                )),
                _ => None,
            })
        }),
        Box::new(move |store: &mut StoreMap, value: Value| {
            let coerced = match value {
                Value::Array(items) => Value::Array(
                    items.iter().map(|value| item.coerce(value)).collect(),
                ),
                _ => Value::Null,
            };
            store.insert(set_name.clone(), coerced);
            Ok(())
        }),
    )
}

/// Maps a schema fragment's `enum` list to `(value, label)` pairs, each
/// value duplicated as its own label.
pub(crate) fn enum_options(fragment: &Map<String, Value>) -> Vec<SelectOption> {
    fragment
        .get("enum")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .map(|value| SelectOption::new(value.clone(), option_label(value)))
                .collect()
        })
        .unwrap_or_default()
}

fn option_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
