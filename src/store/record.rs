//! Host record with a schema-driven attribute set
//!
//! The record owns the store blob, the attribute set, and the collaborators
//! resolvers may need at attachment time (date-range converter, lookup
//! sources). Persistence of the blob is the host application's concern; the
//! record here is the in-memory materialization target.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::converters::{DateRangeConverter, NaturalDateRangeConverter};
use crate::error::StoreResult;
use crate::observability;
use crate::resolvers::{LookupSource, ResolverContext, ResolverRegistry};
use crate::schema::SchemaInspector;

use super::accessor::{Accessor, AttributeSet, StoreMap};

/// A deferred accessor installation produced by a resolver.
///
/// Applying the same attachment to the same record twice overwrites the
/// accessor rather than duplicating it.
pub struct Attachment(Box<dyn Fn(&mut StructuredRecord) -> StoreResult<()> + Send + Sync>);

impl Attachment {
    pub fn new(
        install: impl Fn(&mut StructuredRecord) -> StoreResult<()> + Send + Sync + 'static,
    ) -> Self {
        Self(Box::new(install))
    }

    pub fn apply(&self, record: &mut StructuredRecord) -> StoreResult<()> {
        (self.0)(record)
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment").finish_non_exhaustive()
    }
}

/// A record instance whose typed fields are derived from its schema.
pub struct StructuredRecord {
    schema: Option<Arc<SchemaInspector>>,
    store: StoreMap,
    attributes: AttributeSet,
    converter: Arc<dyn DateRangeConverter>,
    lookups: HashMap<String, Arc<dyn LookupSource>>,
}

impl StructuredRecord {
    /// Creates a record bound to the given schema (or none yet).
    pub fn new(schema: Option<Arc<SchemaInspector>>) -> Self {
        Self {
            schema,
            store: StoreMap::new(),
            attributes: AttributeSet::new(),
            converter: Arc::new(NaturalDateRangeConverter),
            lookups: HashMap::new(),
        }
    }

    /// Replaces the record's date-range converter.
    pub fn with_converter(mut self, converter: Arc<dyn DateRangeConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Registers an external lookup source under a name resolvable from
    /// `external://custom_lookup/<name>` references.
    pub fn register_lookup(&mut self, name: impl Into<String>, source: Arc<dyn LookupSource>) {
        self.lookups.insert(name.into(), source);
    }

    /// Materializes accessors for every property declared in the schema.
    ///
    /// Soft conditions skip materialization with a diagnostic and leave the
    /// record usable: an absent schema, an absent `properties` map, or a
    /// `properties` value that is not a map. Configuration errors (unknown
    /// reference schemes, unsupported types, missing definitions) propagate.
    ///
    /// Safe to call repeatedly; accessors are overwritten, not duplicated.
    pub fn materialize(&mut self, registry: &ResolverRegistry) -> StoreResult<()> {
        let inspector = match &self.schema {
            Some(inspector) => Arc::clone(inspector),
            None => {
                observability::info("MATERIALIZE_SKIPPED", &[("reason", "no schema document")]);
                return Ok(());
            }
        };

        match inspector.properties_value() {
            None => {
                observability::info(
                    "MATERIALIZE_SKIPPED",
                    &[("reason", "schema declares no properties")],
                );
                return Ok(());
            }
            Some(value) if !value.is_object() => {
                let found = value.to_string();
                observability::warn(
                    "MATERIALIZE_SKIPPED",
                    &[
                        ("reason", "properties is not a map"),
                        ("found", found.as_str()),
                    ],
                );
                return Ok(());
            }
            Some(_) => {}
        }

        let names: Vec<String> = inspector
            .property_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut attachments = Vec::with_capacity(names.len());
        for name in &names {
            let resolver = registry.resolve(&inspector, name, self.resolver_context())?;
            attachments.push(resolver.define_attribute(registry)?);
        }

        for attachment in &attachments {
            attachment.apply(self)?;
        }

        Ok(())
    }

    /// Reads a materialized attribute.
    pub fn get(&self, name: &str) -> StoreResult<Option<Value>> {
        self.attributes.get(name, &self.store)
    }

    /// Writes a materialized attribute. Other store keys are untouched.
    pub fn set(&mut self, name: &str, value: Value) -> StoreResult<()> {
        self.attributes.set(name, &mut self.store, value)
    }

    /// Installs an accessor directly. Used by attachments.
    pub fn install_accessor(&mut self, name: impl Into<String>, accessor: Accessor) {
        self.attributes.install(name, accessor);
    }

    /// Builds the resolver context carrying this record's collaborators.
    pub fn resolver_context(&self) -> ResolverContext {
        ResolverContext::with_lookups(self.lookups.clone())
    }

    pub fn schema(&self) -> Option<&Arc<SchemaInspector>> {
        self.schema.as_ref()
    }

    pub fn store(&self) -> &StoreMap {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut StoreMap {
        &mut self.store
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn date_range_converter(&self) -> Arc<dyn DateRangeConverter> {
        Arc::clone(&self.converter)
    }
}

impl std::fmt::Debug for StructuredRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructuredRecord")
            .field("store", &self.store)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}
