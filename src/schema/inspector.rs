//! Safe, repeated querying of one schema document
//!
//! The inspector abstracts away where the document came from (structured
//! value or JSON-encoded string) and how validity is checked, exposing only
//! property and definition lookup.

use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};

/// Maximum accepted size of a JSON-encoded schema input, in bytes.
///
/// Oversized input is a resource-exhaustion risk and fails hard before any
/// parsing or meta-schema validation is attempted.
pub const MAX_JSON_INPUT_SIZE: usize = 1_048_576;

/// Inspects a parsed JSON Schema document.
#[derive(Debug)]
pub struct SchemaInspector {
    document: Map<String, Value>,
}

impl SchemaInspector {
    /// Builds an inspector from a structured JSON value.
    ///
    /// # Errors
    ///
    /// Returns `STORE_UNSUPPORTED_SCHEMA_INPUT` if the value is not an
    /// object.
    pub fn from_value(value: Value) -> StoreResult<Self> {
        match value {
            Value::Object(document) => Ok(Self { document }),
            other => Err(StoreError::unsupported_schema_input(json_type_name(&other))),
        }
    }

    /// Builds an inspector from a JSON-encoded string.
    ///
    /// # Errors
    ///
    /// - `STORE_SCHEMA_TOO_LARGE` if the input exceeds [`MAX_JSON_INPUT_SIZE`]
    /// - `STORE_INVALID_SCHEMA_ENCODING` if the input is not valid JSON
    /// - `STORE_UNSUPPORTED_SCHEMA_INPUT` if the input is not a JSON object
    pub fn from_json(input: &str) -> StoreResult<Self> {
        if input.len() > MAX_JSON_INPUT_SIZE {
            return Err(StoreError::schema_too_large(input.len(), MAX_JSON_INPUT_SIZE));
        }

        let value: Value =
            serde_json::from_str(input).map_err(StoreError::invalid_schema_encoding)?;

        Self::from_value(value)
    }

    /// Returns the raw `properties` value, if present.
    ///
    /// Callers use this to distinguish "absent" from "present but not a
    /// map" when deciding whether materialization can proceed.
    pub fn properties_value(&self) -> Option<&Value> {
        self.document.get("properties")
    }

    /// Looks up the sub-schema for a named property.
    pub fn property_schema(&self, name: &str) -> Option<&Map<String, Value>> {
        self.properties_value()?.as_object()?.get(name)?.as_object()
    }

    /// Looks up a reusable schema fragment in `definitions`.
    pub fn definition_schema(&self, name: &str) -> Option<&Map<String, Value>> {
        self.document
            .get("definitions")?
            .as_object()?
            .get(name)?
            .as_object()
    }

    /// Returns the declared property names.
    ///
    /// An absent or non-object `properties` behaves as empty.
    pub fn property_names(&self) -> Vec<&str> {
        self.properties_value()
            .and_then(Value::as_object)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Checks the document against its JSON-Schema meta-schema.
    ///
    /// Any violation yields `false`; this never errors or panics.
    pub fn is_valid(&self) -> bool {
        let value = Value::Object(self.document.clone());
        jsonschema::meta::validate(&value).is_ok()
    }

    /// Returns the whole document.
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }
}

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreErrorCode;
    use serde_json::json;

    fn sample_schema() -> Value {
        json!({
            "$schema": "https://json-schema.org/draft/2019-09/schema",
            "type": "object",
            "definitions": {
                "yes_no": {
                    "type": "string",
                    "enum": ["yes", "no"]
                }
            },
            "properties": {
                "age": { "type": "integer" },
                "answer": { "$ref": "#/definitions/yes_no" }
            }
        })
    }

    #[test]
    fn test_property_lookup() {
        let inspector = SchemaInspector::from_value(sample_schema()).unwrap();

        let age = inspector.property_schema("age").unwrap();
        assert_eq!(age.get("type"), Some(&json!("integer")));

        assert!(inspector.property_schema("missing").is_none());
    }

    #[test]
    fn test_definition_lookup() {
        let inspector = SchemaInspector::from_value(sample_schema()).unwrap();

        let def = inspector.definition_schema("yes_no").unwrap();
        assert_eq!(def.get("enum"), Some(&json!(["yes", "no"])));

        assert!(inspector.definition_schema("missing").is_none());
    }

    #[test]
    fn test_absent_maps_behave_as_empty() {
        let inspector = SchemaInspector::from_value(json!({"type": "object"})).unwrap();

        assert!(inspector.property_schema("anything").is_none());
        assert!(inspector.definition_schema("anything").is_none());
        assert!(inspector.property_names().is_empty());
    }

    #[test]
    fn test_from_json_string() {
        let input = serde_json::to_string(&sample_schema()).unwrap();
        let inspector = SchemaInspector::from_json(&input).unwrap();
        assert_eq!(inspector.property_names(), vec!["age", "answer"]);
    }

    #[test]
    fn test_oversized_input_fails_before_parsing() {
        let padding = "x".repeat(MAX_JSON_INPUT_SIZE + 1);
        let err = SchemaInspector::from_json(&padding).unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::SchemaTooLarge);
    }

    #[test]
    fn test_malformed_json_is_an_encoding_error() {
        let err = SchemaInspector::from_json("{not json").unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::InvalidSchemaEncoding);
    }

    #[test]
    fn test_non_object_input_is_unsupported() {
        let err = SchemaInspector::from_json("[1, 2, 3]").unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::UnsupportedSchemaInput);

        let err = SchemaInspector::from_value(json!(42)).unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::UnsupportedSchemaInput);
    }

    #[test]
    fn test_meta_schema_validity() {
        let inspector = SchemaInspector::from_value(sample_schema()).unwrap();
        assert!(inspector.is_valid());

        // "type" must be a string or array of strings per the meta-schema
        let invalid = json!({
            "$schema": "https://json-schema.org/draft/2019-09/schema",
            "type": 42
        });
        let inspector = SchemaInspector::from_value(invalid).unwrap();
        assert!(!inspector.is_valid());
    }
}
