//! One named, versioned schema document

use semver::Version;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::schema::SchemaInspector;

/// A schema document pinned to a name and semantic version.
///
/// The document is optional; a record bound to a version with no document
/// simply skips materialization.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedSchema {
    name: String,
    version: Version,
    document: Option<Value>,
}

impl VersionedSchema {
    /// Validates and constructs a versioned schema.
    ///
    /// # Errors
    ///
    /// - `STORE_BLANK_SCHEMA_NAME` for an empty or whitespace-only name
    /// - `STORE_INVALID_SCHEMA_VERSION` for a non-semver version string
    /// - `STORE_INVALID_SCHEMA_DOCUMENT` when the document fails the JSON
    ///   Schema meta-schema
    pub fn new(
        name: impl Into<String>,
        version: &str,
        document: Option<Value>,
    ) -> StoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StoreError::blank_schema_name());
        }

        let version = Version::parse(version)
            .map_err(|err| StoreError::invalid_schema_version(version, err))?;

        if let Some(document) = &document {
            validate_document(document)?;
        }

        Ok(Self {
            name,
            version,
            document,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// Replaces the document, re-validating against the meta-schema.
    pub fn set_document(&mut self, document: Option<Value>) -> StoreResult<()> {
        if let Some(document) = &document {
            validate_document(document)?;
        }
        self.document = document;
        Ok(())
    }

    /// Pretty-prints the document for display, `None` when absent.
    pub fn formatted_document(&self) -> Option<String> {
        self.document
            .as_ref()
            .map(|document| serde_json::to_string_pretty(document).unwrap_or_default())
    }

    /// Builds an inspector over the document, `None` when absent.
    pub fn inspector(&self) -> StoreResult<Option<SchemaInspector>> {
        match &self.document {
            Some(document) => Ok(Some(SchemaInspector::from_value(document.clone())?)),
            None => Ok(None),
        }
    }
}

fn validate_document(document: &Value) -> StoreResult<()> {
    jsonschema::meta::validate(document).map_err(StoreError::invalid_schema_document)
}
