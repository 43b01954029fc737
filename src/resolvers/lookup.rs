//! Resolver for `external://custom_lookup/<source>` references
//!
//! The property itself is a plain scalar; the external source only supplies
//! the selectable option list. Sources are registered on the record (or the
//! resolver context directly) under the name that tails the reference.

use std::sync::Arc;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};
use crate::schema::{ScalarType, SchemaInspector};
use crate::store::Attachment;

use super::{
    scalar_accessor, RefResolver, ResolverContext, ResolverFactory, ResolverRegistry, SelectOption,
};

const PREFIX: &str = "external://custom_lookup/";

/// Resolves scalar properties whose option list lives outside the schema.
pub struct LookupResolver {
    property: String,
    schema: Map<String, Value>,
    ref_string: String,
    context: ResolverContext,
}

impl LookupResolver {
    fn source_name(&self) -> &str {
        self.ref_string
            .strip_prefix(PREFIX)
            .unwrap_or(&self.ref_string)
    }
}

impl RefResolver for LookupResolver {
    fn define_attribute(&self, _registry: &ResolverRegistry) -> StoreResult<Attachment> {
        let scalar = self.scalar_type()?;
        let property = self.property.clone();
        Ok(Attachment::new(move |record| {
            record.install_accessor(property.clone(), scalar_accessor(&property, scalar));
            Ok(())
        }))
    }

    fn options_array(&self, _registry: &ResolverRegistry) -> StoreResult<Vec<SelectOption>> {
        let name = self.source_name();
        let source = self
            .context
            .lookup(name)
            .ok_or_else(|| StoreError::unknown_lookup_source(name))?;

        Ok(source
            .current_entries()
            .into_iter()
            .map(|entry| SelectOption::new(entry.id, entry.label))
            .collect())
    }

    fn scalar_type(&self) -> StoreResult<ScalarType> {
        let name = self
            .schema
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("none");

        ScalarType::from_json_name(name)
            .ok_or_else(|| StoreError::unsupported_attribute_type(&self.property, name))
    }
}

/// Factory for external lookup references.
pub struct LookupResolverFactory;

impl ResolverFactory for LookupResolverFactory {
    fn id(&self) -> &'static str {
        "custom_lookup"
    }

    fn pattern(&self) -> Regex {
        Regex::new(r"^external://custom_lookup/").expect("lookup pattern is valid")
    }

    fn build(
        &self,
        _inspector: Arc<SchemaInspector>,
        property: String,
        property_schema: Map<String, Value>,
        ref_string: String,
        context: ResolverContext,
    ) -> Box<dyn RefResolver> {
        Box::new(LookupResolver {
            property,
            schema: property_schema,
            ref_string,
            context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreErrorCode;
    use crate::resolvers::{LookupEntry, LookupSource};
    use crate::store::StructuredRecord;
    use serde_json::json;

    struct Colours;

    impl LookupSource for Colours {
        fn current_entries(&self) -> Vec<LookupEntry> {
            vec![
                LookupEntry::new(1, "Red"),
                LookupEntry::new(2, "Green"),
                LookupEntry::new(3, "Blue"),
            ]
        }
    }

    fn schema() -> Arc<SchemaInspector> {
        Arc::new(
            SchemaInspector::from_value(json!({
                "properties": {
                    "colour": {
                        "type": "integer",
                        "$ref": "external://custom_lookup/colours"
                    }
                }
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_attribute_is_a_plain_scalar() {
        let registry = ResolverRegistry::with_defaults();
        let mut record = StructuredRecord::new(Some(schema()));
        record.materialize(&registry).unwrap();

        record.set("colour", json!(2)).unwrap();
        assert_eq!(record.get("colour").unwrap(), Some(json!(2)));
    }

    #[test]
    fn test_options_come_from_registered_source() {
        let registry = ResolverRegistry::with_defaults();
        let schema = schema();

        let mut context = ResolverContext::new();
        context.register_lookup("colours", Arc::new(Colours));

        let resolver = registry.resolve(&schema, "colour", context).unwrap();
        let options = resolver.options_array(&registry).unwrap();

        assert_eq!(options.len(), 3);
        assert_eq!(options[1].value, json!(2));
        assert_eq!(options[1].label, "Green");
    }

    #[test]
    fn test_unregistered_source() {
        let registry = ResolverRegistry::with_defaults();
        let resolver = registry
            .resolve(&schema(), "colour", ResolverContext::new())
            .unwrap();

        let err = resolver.options_array(&registry).unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::UnknownLookupSource);
        assert!(err.message().contains("colours"));
    }

    #[test]
    fn test_record_lookup_flows_through_context() {
        let registry = ResolverRegistry::with_defaults();
        let schema = schema();

        let mut record = StructuredRecord::new(Some(Arc::clone(&schema)));
        record.register_lookup("colours", Arc::new(Colours));

        let resolver = registry
            .resolve(&schema, "colour", record.resolver_context())
            .unwrap();
        assert_eq!(resolver.options_array(&registry).unwrap().len(), 3);
    }
}
