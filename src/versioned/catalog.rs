//! In-memory catalog of versioned schemas

use std::collections::HashMap;

use semver::Version;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::schema::SchemaInspector;

use super::VersionedSchema;

/// Registry of schemas keyed by `(name, version)`.
///
/// Registration is append-only; the only mutation of a registered schema is
/// an explicit document replacement.
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    entries: HashMap<(String, String), VersionedSchema>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema.
    ///
    /// # Errors
    ///
    /// `STORE_DUPLICATE_SCHEMA_VERSION` when the `(name, version)` pair is
    /// already present.
    pub fn register(&mut self, schema: VersionedSchema) -> StoreResult<()> {
        let key = (schema.name().to_string(), schema.version().to_string());
        if self.entries.contains_key(&key) {
            return Err(StoreError::duplicate_schema_version(&key.0, &key.1));
        }

        self.entries.insert(key, schema);
        Ok(())
    }

    /// Fetches one exact `(name, version)` entry.
    pub fn get(&self, name: &str, version: &str) -> Option<&VersionedSchema> {
        self.entries.get(&(name.to_string(), version.to_string()))
    }

    /// Fetches the highest registered version of a name, by semantic-version
    /// precedence. `None` when the name has no versions.
    pub fn latest(&self, name: &str) -> Option<&VersionedSchema> {
        self.entries
            .values()
            .filter(|schema| schema.name() == name)
            .max_by(|a, b| Version::cmp_precedence(a.version(), b.version()))
    }

    /// Builds an inspector over one registered schema's document.
    ///
    /// `None` when the pair is not registered; `Ok(Some(None))` collapses to
    /// `Ok(None)` when the version exists but carries no document.
    pub fn inspector_for(
        &self,
        name: &str,
        version: &str,
    ) -> StoreResult<Option<SchemaInspector>> {
        match self.get(name, version) {
            Some(schema) => schema.inspector(),
            None => Ok(None),
        }
    }

    /// Replaces the document of a registered schema.
    ///
    /// # Errors
    ///
    /// - `STORE_UNKNOWN_SCHEMA_VERSION` when the pair is not registered
    /// - `STORE_INVALID_SCHEMA_DOCUMENT` when the new document fails the
    ///   meta-schema; the existing document is kept
    pub fn replace_document(
        &mut self,
        name: &str,
        version: &str,
        document: Option<Value>,
    ) -> StoreResult<()> {
        let schema = self
            .entries
            .get_mut(&(name.to_string(), version.to_string()))
            .ok_or_else(|| StoreError::unknown_schema_version(name, version))?;

        schema.set_document(document)
    }

    /// Returns the distinct registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .values()
            .map(VersionedSchema::name)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreErrorCode;
    use serde_json::json;

    fn schema(name: &str, version: &str) -> VersionedSchema {
        VersionedSchema::new(name, version, Some(json!({ "type": "object" }))).unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = SchemaCatalog::new();
        catalog.register(schema("survey", "1.0.0")).unwrap();

        assert!(catalog.get("survey", "1.0.0").is_some());
        assert!(catalog.get("survey", "2.0.0").is_none());
        assert!(catalog.get("census", "1.0.0").is_none());
    }

    #[test]
    fn test_duplicate_version_is_rejected() {
        let mut catalog = SchemaCatalog::new();
        catalog.register(schema("survey", "1.0.0")).unwrap();

        let err = catalog.register(schema("survey", "1.0.0")).unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::DuplicateSchemaVersion);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_latest_uses_semantic_ordering() {
        let mut catalog = SchemaCatalog::new();
        catalog.register(schema("survey", "1.0.0")).unwrap();
        catalog.register(schema("survey", "1.10.0")).unwrap();
        catalog.register(schema("survey", "1.2.0")).unwrap();

        let latest = catalog.latest("survey").unwrap();
        assert_eq!(latest.version().to_string(), "1.10.0");
    }

    #[test]
    fn test_latest_sorts_prereleases_below_release() {
        let mut catalog = SchemaCatalog::new();
        catalog.register(schema("survey", "1.0.0-alpha.2")).unwrap();
        catalog.register(schema("survey", "1.0.0-beta")).unwrap();
        catalog.register(schema("survey", "1.0.0")).unwrap();

        let latest = catalog.latest("survey").unwrap();
        assert_eq!(latest.version().to_string(), "1.0.0");
    }

    #[test]
    fn test_latest_among_prereleases_only() {
        // With no release present, pre-release precedence decides:
        // alpha.2 < beta per semver rules.
        let mut catalog = SchemaCatalog::new();
        catalog.register(schema("survey", "1.0.0-alpha.2")).unwrap();
        catalog.register(schema("survey", "1.0.0-beta")).unwrap();

        let latest = catalog.latest("survey").unwrap();
        assert_eq!(latest.version().to_string(), "1.0.0-beta");
    }

    #[test]
    fn test_latest_is_scoped_by_name() {
        let mut catalog = SchemaCatalog::new();
        catalog.register(schema("survey", "1.0.0")).unwrap();
        catalog.register(schema("census", "9.0.0")).unwrap();

        assert_eq!(catalog.latest("survey").unwrap().version().to_string(), "1.0.0");
        assert!(catalog.latest("missing").is_none());
    }

    #[test]
    fn test_inspector_for() {
        let mut catalog = SchemaCatalog::new();
        catalog
            .register(
                VersionedSchema::new(
                    "survey",
                    "1.0.0",
                    Some(json!({ "type": "object", "properties": { "q1": { "type": "string" } } })),
                )
                .unwrap(),
            )
            .unwrap();
        catalog
            .register(VersionedSchema::new("empty", "1.0.0", None).unwrap())
            .unwrap();

        let inspector = catalog.inspector_for("survey", "1.0.0").unwrap().unwrap();
        assert_eq!(inspector.property_names(), vec!["q1"]);

        assert!(catalog.inspector_for("empty", "1.0.0").unwrap().is_none());
        assert!(catalog.inspector_for("ghost", "1.0.0").unwrap().is_none());
    }

    #[test]
    fn test_replace_document() {
        let mut catalog = SchemaCatalog::new();
        catalog.register(schema("survey", "1.0.0")).unwrap();

        catalog
            .replace_document(
                "survey",
                "1.0.0",
                Some(json!({ "type": "object", "properties": { "q1": { "type": "string" } } })),
            )
            .unwrap();

        let document = catalog.get("survey", "1.0.0").unwrap().document().unwrap();
        assert!(document.get("properties").is_some());
    }

    #[test]
    fn test_replace_document_on_unknown_version() {
        let mut catalog = SchemaCatalog::new();
        let err = catalog
            .replace_document("survey", "1.0.0", None)
            .unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::UnknownSchemaVersion);
    }

    #[test]
    fn test_replace_with_invalid_document_keeps_existing() {
        let mut catalog = SchemaCatalog::new();
        catalog.register(schema("survey", "1.0.0")).unwrap();

        let err = catalog
            .replace_document("survey", "1.0.0", Some(json!({ "type": 42 })))
            .unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::InvalidSchemaDocument);
        assert!(catalog.get("survey", "1.0.0").unwrap().document().is_some());
    }

    #[test]
    fn test_names_are_distinct_and_sorted() {
        let mut catalog = SchemaCatalog::new();
        catalog.register(schema("survey", "1.0.0")).unwrap();
        catalog.register(schema("survey", "2.0.0")).unwrap();
        catalog.register(schema("census", "1.0.0")).unwrap();

        assert_eq!(catalog.names(), vec!["census", "survey"]);
    }
}
