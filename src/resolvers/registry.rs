//! Resolver registry
//!
//! An ordered list of `(pattern, factory)` pairs; the first registered
//! factory whose pattern matches a property's reference string wins. The
//! process-wide instance is configuration-time state: mutate it at startup
//! (or under test setup), dispatch freely afterwards.

use std::sync::{Arc, OnceLock, RwLock};

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};
use crate::schema::SchemaInspector;

use super::{
    BlankResolverFactory, DateRangeResolverFactory, DefinitionsResolverFactory,
    LookupResolverFactory, RefResolver, ResolverContext, ResolverFactory,
};

struct Registration {
    id: &'static str,
    pattern: Regex,
    factory: Arc<dyn ResolverFactory>,
}

/// Ordered, mutable mapping from reference-string pattern to resolver
/// factory.
#[derive(Default)]
pub struct ResolverRegistry {
    entries: Vec<Registration>,
}

impl ResolverRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in resolver family installed.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.install_defaults();
        registry
    }

    /// Registers the built-in family: blank (exact empty string), local
    /// definitions, date range, and external lookup.
    pub fn install_defaults(&mut self) {
        self.register(Arc::new(BlankResolverFactory));
        self.register(Arc::new(DefinitionsResolverFactory));
        self.register(Arc::new(DateRangeResolverFactory));
        self.register(Arc::new(LookupResolverFactory));
    }

    /// Registers a factory.
    ///
    /// Re-registering an already-present id replaces it in place, keeping
    /// its position in the match order; a new id is appended, so earlier
    /// registrations win ties.
    pub fn register(&mut self, factory: Arc<dyn ResolverFactory>) {
        let registration = Registration {
            id: factory.id(),
            pattern: factory.pattern(),
            factory,
        };

        match self.entries.iter_mut().find(|e| e.id == registration.id) {
            Some(existing) => *existing = registration,
            None => self.entries.push(registration),
        }
    }

    /// Removes a factory by id. Returns whether anything was removed.
    pub fn unregister(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Removes every registration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Resolves a named property on a schema to a resolver instance.
    ///
    /// An absent `$ref` is treated as the empty reference string.
    ///
    /// # Errors
    ///
    /// - `STORE_UNKNOWN_PROPERTY` if the schema declares no such property
    /// - `STORE_UNRESOLVED_REFERENCE` if no registered pattern matches
    pub fn resolve(
        &self,
        inspector: &Arc<SchemaInspector>,
        property: &str,
        context: ResolverContext,
    ) -> StoreResult<Box<dyn RefResolver>> {
        let fragment = inspector
            .property_schema(property)
            .ok_or_else(|| StoreError::unknown_property(property))?
            .clone();

        self.build(inspector, property, fragment, context)
    }

    /// Resolves a raw property-schema fragment through the same dispatch
    /// table. Array item schemas recurse through here, so items may use
    /// any registered reference form without being named properties.
    pub fn resolve_fragment(
        &self,
        inspector: &Arc<SchemaInspector>,
        property: &str,
        fragment: &Map<String, Value>,
        context: ResolverContext,
    ) -> StoreResult<Box<dyn RefResolver>> {
        self.build(inspector, property, fragment.clone(), context)
    }

    fn build(
        &self,
        inspector: &Arc<SchemaInspector>,
        property: &str,
        fragment: Map<String, Value>,
        context: ResolverContext,
    ) -> StoreResult<Box<dyn RefResolver>> {
        let ref_string = fragment
            .get("$ref")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        let entry = self
            .entries
            .iter()
            .find(|entry| entry.pattern.is_match(&ref_string))
            .ok_or_else(|| StoreError::unresolved_reference(ref_string.clone()))?;

        Ok(entry.factory.build(
            Arc::clone(inspector),
            property.to_string(),
            fragment,
            ref_string,
            context,
        ))
    }
}

static GLOBAL: OnceLock<RwLock<ResolverRegistry>> = OnceLock::new();

/// Returns the process-wide registry, initialized with the built-in
/// family on first use.
///
/// Mutation (register/unregister/clear) is a configuration-time operation
/// and must not race with dispatch; the lock enforces that, but callers
/// should still mutate only at startup or in test setup.
pub fn global_registry() -> &'static RwLock<ResolverRegistry> {
    GLOBAL.get_or_init(|| RwLock::new(ResolverRegistry::with_defaults()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreErrorCode;
    use serde_json::json;

    fn inspector(value: Value) -> Arc<SchemaInspector> {
        Arc::new(SchemaInspector::from_value(value).unwrap())
    }

    struct PotatoFactory;

    impl ResolverFactory for PotatoFactory {
        fn id(&self) -> &'static str {
            "potato"
        }

        fn pattern(&self) -> Regex {
            Regex::new(r"^#/potato/").unwrap()
        }

        fn build(
            &self,
            inspector: Arc<SchemaInspector>,
            property: String,
            property_schema: Map<String, Value>,
            ref_string: String,
            context: ResolverContext,
        ) -> Box<dyn RefResolver> {
            // Reuses the blank resolver body; only the pattern differs.
            BlankResolverFactory.build(inspector, property, property_schema, ref_string, context)
        }
    }

    #[test]
    fn test_register_and_unregister() {
        let mut registry = ResolverRegistry::with_defaults();
        assert!(!registry.is_registered("potato"));

        registry.register(Arc::new(PotatoFactory));
        assert!(registry.is_registered("potato"));

        assert!(registry.unregister("potato"));
        assert!(!registry.is_registered("potato"));
        assert!(!registry.unregister("potato"));
    }

    #[test]
    fn test_defaults_are_registered() {
        let registry = ResolverRegistry::with_defaults();
        assert!(registry.is_registered("blank"));
        assert!(registry.is_registered("definitions"));
        assert!(registry.is_registered("json_date_range"));
        assert!(registry.is_registered("custom_lookup"));
    }

    #[test]
    fn test_empty_ref_resolves_to_blank() {
        let registry = ResolverRegistry::with_defaults();
        let schema = inspector(json!({
            "properties": { "foo": { "type": "string" } }
        }));

        let resolver = registry
            .resolve(&schema, "foo", ResolverContext::new())
            .unwrap();
        assert!(resolver.scalar_type().is_ok());
    }

    #[test]
    fn test_unknown_scheme_is_unresolved() {
        let registry = ResolverRegistry::with_defaults();
        let schema = inspector(json!({
            "properties": { "foo": { "$ref": "#/unknown/ref" } }
        }));

        let err = registry
            .resolve(&schema, "foo", ResolverContext::new())
            .unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::UnresolvedReference);
        assert_eq!(err.reference(), Some("#/unknown/ref"));
        assert!(err
            .message()
            .contains("No matching $ref resolver pattern for \"#/unknown/ref\""));
    }

    #[test]
    fn test_unknown_property() {
        let registry = ResolverRegistry::with_defaults();
        let schema = inspector(json!({ "properties": {} }));

        let err = registry
            .resolve(&schema, "ghost", ResolverContext::new())
            .unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::UnknownProperty);
    }

    #[test]
    fn test_first_registered_match_wins() {
        // A narrow scheme registered before a broad one takes precedence
        // for strings both would match.
        struct Broad;
        impl ResolverFactory for Broad {
            fn id(&self) -> &'static str {
                "broad"
            }
            fn pattern(&self) -> Regex {
                Regex::new(r"^#/potato/").unwrap()
            }
            fn build(
                &self,
                inspector: Arc<SchemaInspector>,
                property: String,
                property_schema: Map<String, Value>,
                ref_string: String,
                context: ResolverContext,
            ) -> Box<dyn RefResolver> {
                BlankResolverFactory.build(
                    inspector,
                    property,
                    property_schema,
                    ref_string,
                    context,
                )
            }
        }

        let mut registry = ResolverRegistry::new();
        registry.register(Arc::new(PotatoFactory));
        registry.register(Arc::new(Broad));

        // Both patterns match; re-registering "potato" must keep its slot.
        registry.register(Arc::new(PotatoFactory));
        assert_eq!(registry.len(), 2);
        assert!(registry.is_registered("potato"));
    }

    #[test]
    fn test_blank_pattern_matches_only_empty() {
        let pattern = BlankResolverFactory.pattern();
        assert!(pattern.is_match(""));
        assert!(!pattern.is_match("#/definitions/foo"));
        assert!(!pattern.is_match("external://custom_lookup/x"));
    }

    #[test]
    fn test_global_registry_has_defaults() {
        let registry = global_registry().read().unwrap();
        assert!(registry.is_registered("blank"));
    }
}
