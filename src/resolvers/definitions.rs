//! Resolver for local `#/definitions/<name>` references
//!
//! The property's type and enum live on the referenced definition, not on
//! the property fragment itself; everything here reads through to it.

use std::sync::Arc;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};
use crate::schema::{ScalarType, SchemaInspector};
use crate::store::Attachment;

use super::{
    enum_options, scalar_accessor, RefResolver, ResolverContext, ResolverFactory, ResolverRegistry,
    SelectOption,
};

const PREFIX: &str = "#/definitions/";

/// Resolves properties referencing a definition in the same document.
pub struct DefinitionsResolver {
    inspector: Arc<SchemaInspector>,
    property: String,
    ref_string: String,
}

impl DefinitionsResolver {
    fn local_definition(&self) -> StoreResult<&Map<String, Value>> {
        let name = self
            .ref_string
            .strip_prefix(PREFIX)
            .unwrap_or(&self.ref_string);

        self.inspector
            .definition_schema(name)
            .ok_or_else(|| StoreError::undefined_local_reference(&self.ref_string))
    }
}

impl RefResolver for DefinitionsResolver {
    fn define_attribute(&self, _registry: &ResolverRegistry) -> StoreResult<Attachment> {
        let scalar = self.scalar_type()?;
        let property = self.property.clone();
        Ok(Attachment::new(move |record| {
            record.install_accessor(property.clone(), scalar_accessor(&property, scalar));
            Ok(())
        }))
    }

    fn options_array(&self, _registry: &ResolverRegistry) -> StoreResult<Vec<SelectOption>> {
        Ok(enum_options(self.local_definition()?))
    }

    fn scalar_type(&self) -> StoreResult<ScalarType> {
        let definition = self.local_definition()?;
        let name = definition
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("none");

        ScalarType::from_json_name(name)
            .ok_or_else(|| StoreError::unsupported_attribute_type(&self.property, name))
    }
}

/// Factory for local definition references.
pub struct DefinitionsResolverFactory;

impl ResolverFactory for DefinitionsResolverFactory {
    fn id(&self) -> &'static str {
        "definitions"
    }

    fn pattern(&self) -> Regex {
        Regex::new(r"^#/definitions/").expect("definitions pattern is valid")
    }

    fn build(
        &self,
        inspector: Arc<SchemaInspector>,
        property: String,
        _property_schema: Map<String, Value>,
        ref_string: String,
        _context: ResolverContext,
    ) -> Box<dyn RefResolver> {
        Box::new(DefinitionsResolver {
            inspector,
            property,
            ref_string,
        })
    }
}
