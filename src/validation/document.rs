//! Adapter from the external JSON Schema validator to `Violation` records

use jsonschema::error::ValidationErrorKind;
use serde_json::{json, Map, Value};

use crate::error::{StoreError, StoreResult};

use super::Violation;

/// Compiled validator for one schema document, producing [`Violation`]s.
pub struct DocumentValidator {
    schema: Value,
    validator: jsonschema::Validator,
}

impl DocumentValidator {
    /// Compiles the schema.
    ///
    /// # Errors
    ///
    /// `STORE_INVALID_SCHEMA_DOCUMENT` when the schema does not compile.
    pub fn new(schema: Value) -> StoreResult<Self> {
        let validator =
            jsonschema::validator_for(&schema).map_err(StoreError::invalid_schema_document)?;

        Ok(Self { schema, validator })
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Validates an instance. An empty list means the instance conforms.
    pub fn validate(&self, instance: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(instance)
            .map(|error| self.violation_for(&error))
            .collect()
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    fn violation_for(&self, error: &jsonschema::ValidationError<'_>) -> Violation {
        let keyword_path = error.schema_path.to_string();
        let segments: Vec<&str> = keyword_path.split('/').filter(|s| !s.is_empty()).collect();
        let kind = segments.last().copied().unwrap_or("unknown").to_string();

        // The violated fragment is the sub-schema holding the keyword, one
        // level above the keyword itself.
        let fragment = resolve_fragment(&self.schema, &segments[..segments.len().saturating_sub(1)]);

        let mut details = Map::new();
        details.insert("value".into(), error.instance.as_ref().clone());
        // Missing keys come from the structured error kind, not the display
        // message; the wording is not a stable contract.
        if let ValidationErrorKind::Required { property } = &error.kind {
            let keys = match property.as_str() {
                Some(name) => json!([name]),
                None => json!([property]),
            };
            details.insert("missing_keys".into(), keys);
        }

        Violation::new(kind, error.instance_path.to_string(), fragment)
            .with_details(Value::Object(details))
    }
}

impl std::fmt::Debug for DocumentValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentValidator")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

fn resolve_fragment(schema: &Value, segments: &[&str]) -> Value {
    let mut current = schema;
    for segment in segments {
        current = match current {
            Value::Object(map) => match map.get(*segment) {
                Some(next) => next,
                None => return schema.clone(),
            },
            Value::Array(items) => match segment.parse::<usize>().ok().and_then(|i| items.get(i)) {
                Some(next) => next,
                None => return schema.clone(),
            },
            _ => return schema.clone(),
        };
    }
    current.clone()
}
