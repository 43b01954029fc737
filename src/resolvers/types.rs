//! Resolver collaborator types

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

/// One selectable `(value, label)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: Value, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// One entry from an external enumeration source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupEntry {
    pub id: Value,
    pub label: String,
}

impl LookupEntry {
    pub fn new(id: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Named external enumeration source.
///
/// Entries are returned in display order; the resolver does not sort.
pub trait LookupSource: Send + Sync {
    fn current_entries(&self) -> Vec<LookupEntry>;
}

/// Caller-supplied extension data handed to a resolver at construction.
///
/// Carries an open-ended value map plus the lookup sources reachable from
/// `external://custom_lookup/<name>` references.
#[derive(Clone, Default)]
pub struct ResolverContext {
    values: Map<String, Value>,
    lookups: HashMap<String, Arc<dyn LookupSource>>,
}

impl ResolverContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lookups(lookups: HashMap<String, Arc<dyn LookupSource>>) -> Self {
        Self {
            values: Map::new(),
            lookups,
        }
    }

    /// Adds one extension value, builder style.
    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn register_lookup(&mut self, name: impl Into<String>, source: Arc<dyn LookupSource>) {
        self.lookups.insert(name.into(), source);
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn LookupSource>> {
        self.lookups.get(name).map(Arc::clone)
    }
}

impl std::fmt::Debug for ResolverContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverContext")
            .field("values", &self.values)
            .field("lookups", &self.lookups.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedSource;

    impl LookupSource for FixedSource {
        fn current_entries(&self) -> Vec<LookupEntry> {
            vec![LookupEntry::new(1, "One")]
        }
    }

    #[test]
    fn test_context_values() {
        let context = ResolverContext::new().with_value("source", json!("colours"));
        assert_eq!(context.value("source"), Some(&json!("colours")));
        assert_eq!(context.value("missing"), None);
    }

    #[test]
    fn test_context_lookups() {
        let mut context = ResolverContext::new();
        context.register_lookup("fixed", Arc::new(FixedSource));

        let source = context.lookup("fixed").unwrap();
        assert_eq!(source.current_entries().len(), 1);
        assert!(context.lookup("other").is_none());
    }
}
