//! Resolver for properties with no reference
//!
//! Dispatches on the property's direct `type`: boolean/integer/string
//! materialize a typed scalar accessor; `array` delegates its `items`
//! fragment back through the registry to discover the item's scalar type,
//! so items may themselves be plain scalars or local-definition references.

use std::sync::Arc;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreErrorCode, StoreResult};
use crate::schema::{ScalarType, SchemaInspector};
use crate::store::Attachment;

use super::{
    array_accessor, enum_options, scalar_accessor, RefResolver, ResolverContext, ResolverFactory,
    ResolverRegistry, SelectOption,
};

/// Resolves properties whose reference string is empty.
pub struct BlankResolver {
    inspector: Arc<SchemaInspector>,
    property: String,
    schema: Map<String, Value>,
    context: ResolverContext,
}

impl BlankResolver {
    fn type_name(&self) -> &str {
        self.schema
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("none")
    }

    fn is_array(&self) -> bool {
        self.type_name() == "array"
    }

    fn items_fragment(&self) -> Map<String, Value> {
        self.schema
            .get("items")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }

    /// Resolves the `items` sub-schema through the shared dispatch table
    /// and asks the resulting resolver for its scalar type.
    fn item_scalar_type(&self, registry: &ResolverRegistry) -> StoreResult<ScalarType> {
        let items = self.items_fragment();
        let item_resolver =
            registry.resolve_fragment(&self.inspector, &self.property, &items, self.context.clone())?;

        item_resolver.scalar_type().map_err(|err| {
            if err.code() == StoreErrorCode::UnsupportedAttributeType {
                let found = items.get("type").and_then(Value::as_str).unwrap_or("none");
                StoreError::unsupported_array_item_type(&self.property, found)
            } else {
                err
            }
        })
    }
}

impl RefResolver for BlankResolver {
    fn define_attribute(&self, registry: &ResolverRegistry) -> StoreResult<Attachment> {
        if self.is_array() {
            let item = self.item_scalar_type(registry)?;
            let property = self.property.clone();
            return Ok(Attachment::new(move |record| {
                record.install_accessor(property.clone(), array_accessor(&property, item));
                Ok(())
            }));
        }

        let scalar = self.scalar_type()?;
        let property = self.property.clone();
        Ok(Attachment::new(move |record| {
            record.install_accessor(property.clone(), scalar_accessor(&property, scalar));
            Ok(())
        }))
    }

    fn options_array(&self, registry: &ResolverRegistry) -> StoreResult<Vec<SelectOption>> {
        if self.is_array() {
            // Enumerable item domains come from the items resolver, whether
            // the enum is declared inline or behind a local definition.
            let items = self.items_fragment();
            let item_resolver = registry.resolve_fragment(
                &self.inspector,
                &self.property,
                &items,
                self.context.clone(),
            )?;
            return item_resolver.options_array(registry);
        }

        Ok(enum_options(&self.schema))
    }

    fn scalar_type(&self) -> StoreResult<ScalarType> {
        let name = self.type_name();
        ScalarType::from_json_name(name)
            .ok_or_else(|| StoreError::unsupported_attribute_type(&self.property, name))
    }
}

/// Factory for the blank resolver; matches exactly the empty reference.
pub struct BlankResolverFactory;

impl ResolverFactory for BlankResolverFactory {
    fn id(&self) -> &'static str {
        "blank"
    }

    fn pattern(&self) -> Regex {
        Regex::new(r"^$").expect("blank pattern is valid")
    }

    fn build(
        &self,
        inspector: Arc<SchemaInspector>,
        property: String,
        property_schema: Map<String, Value>,
        _ref_string: String,
        context: ResolverContext,
    ) -> Box<dyn RefResolver> {
        Box::new(BlankResolver {
            inspector,
            property,
            schema: property_schema,
            context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StructuredRecord;
    use serde_json::json;

    fn inspector(value: Value) -> Arc<SchemaInspector> {
        Arc::new(SchemaInspector::from_value(value).unwrap())
    }

    fn resolve(
        registry: &ResolverRegistry,
        schema: &Arc<SchemaInspector>,
        property: &str,
    ) -> Box<dyn RefResolver> {
        registry
            .resolve(schema, property, ResolverContext::new())
            .unwrap()
    }

    #[test]
    fn test_scalar_round_trip() {
        let registry = ResolverRegistry::with_defaults();
        let schema = inspector(json!({
            "properties": {
                "count": { "type": "integer" },
                "label": { "type": "string" },
                "flag": { "type": "boolean" }
            }
        }));

        let mut record = StructuredRecord::new(Some(Arc::clone(&schema)));
        for name in ["count", "label", "flag"] {
            let resolver = resolve(&registry, &schema, name);
            resolver
                .define_attribute(&registry)
                .unwrap()
                .apply(&mut record)
                .unwrap();
        }

        record.set("count", json!(7)).unwrap();
        record.set("label", json!("seven")).unwrap();
        record.set("flag", json!(true)).unwrap();

        assert_eq!(record.get("count").unwrap(), Some(json!(7)));
        assert_eq!(record.get("label").unwrap(), Some(json!("seven")));
        assert_eq!(record.get("flag").unwrap(), Some(json!(true)));
    }

    #[test]
    fn test_unsupported_scalar_type() {
        let registry = ResolverRegistry::with_defaults();
        let schema = inspector(json!({
            "properties": { "ratio": { "type": "number" } }
        }));

        let resolver = resolve(&registry, &schema, "ratio");
        let err = resolver.define_attribute(&registry).unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::UnsupportedAttributeType);
        assert_eq!(err.property(), Some("ratio"));
    }

    #[test]
    fn test_array_of_integers_preserves_order() {
        let registry = ResolverRegistry::with_defaults();
        let schema = inspector(json!({
            "properties": {
                "scores": { "type": "array", "items": { "type": "integer" } }
            }
        }));

        let resolver = resolve(&registry, &schema, "scores");
        let mut record = StructuredRecord::new(Some(Arc::clone(&schema)));
        resolver
            .define_attribute(&registry)
            .unwrap()
            .apply(&mut record)
            .unwrap();

        record.set("scores", json!([1, 2, 3])).unwrap();
        assert_eq!(record.get("scores").unwrap(), Some(json!([1, 2, 3])));
    }

    #[test]
    fn test_array_items_via_local_definition() {
        let registry = ResolverRegistry::with_defaults();
        let schema = inspector(json!({
            "definitions": {
                "colour": { "type": "string", "enum": ["red", "green"] }
            },
            "properties": {
                "colours": {
                    "type": "array",
                    "items": { "$ref": "#/definitions/colour" }
                }
            }
        }));

        let resolver = resolve(&registry, &schema, "colours");
        let mut record = StructuredRecord::new(Some(Arc::clone(&schema)));
        resolver
            .define_attribute(&registry)
            .unwrap()
            .apply(&mut record)
            .unwrap();

        record.set("colours", json!(["red", "green"])).unwrap();
        assert_eq!(record.get("colours").unwrap(), Some(json!(["red", "green"])));

        // Options come through the items resolver's definition enum
        let options = resolver.options_array(&registry).unwrap();
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["red", "green"]);
    }

    #[test]
    fn test_array_of_objects_is_unsupported() {
        let registry = ResolverRegistry::with_defaults();
        let schema = inspector(json!({
            "properties": {
                "records": { "type": "array", "items": { "type": "object" } }
            }
        }));

        let resolver = resolve(&registry, &schema, "records");
        let err = resolver.define_attribute(&registry).unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::UnsupportedArrayItemType);
        assert!(err.message().contains("object"));
        assert!(err.message().contains("records"));
    }

    #[test]
    fn test_nested_arrays_are_unsupported() {
        let registry = ResolverRegistry::with_defaults();
        let schema = inspector(json!({
            "properties": {
                "grid": {
                    "type": "array",
                    "items": { "type": "array", "items": { "type": "integer" } }
                }
            }
        }));

        let resolver = resolve(&registry, &schema, "grid");
        let err = resolver.define_attribute(&registry).unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::UnsupportedArrayItemType);
    }

    #[test]
    fn test_enum_options_duplicate_value_as_label() {
        let registry = ResolverRegistry::with_defaults();
        let schema = inspector(json!({
            "properties": {
                "size": { "type": "string", "enum": ["small", "large"] }
            }
        }));

        let resolver = resolve(&registry, &schema, "size");
        let options = resolver.options_array(&registry).unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, json!("small"));
        assert_eq!(options[0].label, "small");
    }

    #[test]
    fn test_no_enum_means_no_options() {
        let registry = ResolverRegistry::with_defaults();
        let schema = inspector(json!({
            "properties": { "free_text": { "type": "string" } }
        }));

        let resolver = resolve(&registry, &schema, "free_text");
        assert!(resolver.options_array(&registry).unwrap().is_empty());
    }
}
