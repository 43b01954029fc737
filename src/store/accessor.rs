//! Per-instance accessor table
//!
//! An accessor is a `{get, set}` closure pair over the record's store map.
//! The table owns one accessor per materialized property; re-installing
//! under the same name overwrites, so re-materialization is idempotent.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};

/// The record's underlying key-value blob.
pub type StoreMap = Map<String, Value>;

/// Reads one property out of the store map.
pub type Getter = Box<dyn Fn(&StoreMap) -> StoreResult<Option<Value>> + Send + Sync>;

/// Writes one property into the store map.
///
/// Setting one key must not disturb others.
pub type Setter = Box<dyn Fn(&mut StoreMap, Value) -> StoreResult<()> + Send + Sync>;

/// A materialized get/set pair for one property.
pub struct Accessor {
    getter: Getter,
    setter: Setter,
}

impl Accessor {
    pub fn new(getter: Getter, setter: Setter) -> Self {
        Self { getter, setter }
    }

    pub fn get(&self, store: &StoreMap) -> StoreResult<Option<Value>> {
        (self.getter)(store)
    }

    pub fn set(&self, store: &mut StoreMap, value: Value) -> StoreResult<()> {
        (self.setter)(store, value)
    }
}

impl std::fmt::Debug for Accessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accessor").finish_non_exhaustive()
    }
}

/// The per-instance table of materialized attributes.
#[derive(Debug, Default)]
pub struct AttributeSet {
    accessors: HashMap<String, Accessor>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs an accessor under the given name, overwriting any previous
    /// accessor for that name.
    pub fn install(&mut self, name: impl Into<String>, accessor: Accessor) {
        self.accessors.insert(name.into(), accessor);
    }

    /// Reads the named attribute from the given store map.
    ///
    /// # Errors
    ///
    /// `STORE_UNKNOWN_ATTRIBUTE` if no accessor was materialized under the
    /// name.
    pub fn get(&self, name: &str, store: &StoreMap) -> StoreResult<Option<Value>> {
        self.accessor(name)?.get(store)
    }

    /// Writes the named attribute into the given store map.
    pub fn set(&self, name: &str, store: &mut StoreMap, value: Value) -> StoreResult<()> {
        self.accessor(name)?.set(store, value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.accessors.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.accessors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }

    /// Drops all installed accessors.
    pub fn clear(&mut self) {
        self.accessors.clear();
    }

    fn accessor(&self, name: &str) -> StoreResult<&Accessor> {
        self.accessors
            .get(name)
            .ok_or_else(|| StoreError::unknown_attribute(name))
    }
}
