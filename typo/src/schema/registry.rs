//! Deduplicating store of registered aggregate schemas
//!
//! A registry belongs to one generation run. It is populated by the resolver,
//! read by the converter and the flattener, and cleared or dropped afterwards.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::warn;

use super::SchemaObject;
use crate::descriptor::TypeKey;

/// Named schema bodies keyed by the instantiation they were resolved from
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    /// Registered bodies in registration order
    schemas: IndexMap<String, SchemaObject>,
    /// Instantiation key to registered name
    names:   HashMap<TypeKey, String>,
    /// Registered name to the instantiation whose complete body it holds
    owners:  HashMap<String, TypeKey>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `schema` under `name` for the instantiation `key`
    ///
    /// Registering a name that already belongs to a different instantiation
    /// logs a warning and replaces the earlier body.
    pub fn register(&mut self, name: impl Into<String>, schema: SchemaObject, key: TypeKey) {
        let name = name.into();
        if self.owners.get(&name).is_some_and(|owner| owner != &key) {
            warn!(
                schema_name = %name,
                type_key = %key,
                "Schema name already registered for a different type - replacing earlier body"
            );
        }
        self.schemas.insert(name.clone(), schema);
        self.owners.insert(name.clone(), key.clone());
        self.names.insert(key, name);
    }

    /// Store `schema` under `name` without recording it for any instantiation
    ///
    /// References to `name` resolve, but [`name_for`](Self::name_for) keeps
    /// returning `None`, so the next resolution of the type builds the body
    /// again and [`register`](Self::register) replaces this one.
    pub fn register_provisional(&mut self, name: impl Into<String>, schema: SchemaObject) {
        let name = name.into();
        if self.owners.contains_key(&name) {
            warn!(
                schema_name = %name,
                "Schema name already registered for a complete body - replacing it"
            );
        }
        self.schemas.insert(name, schema);
    }

    /// Registered body for `name`
    pub fn get(&self, name: &str) -> Option<&SchemaObject> {
        self.schemas.get(name)
    }

    /// Registered name for an instantiation key
    pub fn name_for(&self, key: &TypeKey) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    /// Reference node pointing at `name`
    pub fn reference_for(name: &str) -> SchemaObject {
        SchemaObject::reference(name)
    }

    /// Follow `schema` to its registered body if it is a reference
    ///
    /// Returns `schema` itself when it is inline or the target is missing.
    pub fn dereference<'a>(&'a self, schema: &'a SchemaObject) -> &'a SchemaObject {
        schema
            .reference_target()
            .and_then(|target| self.schemas.get(target))
            .unwrap_or(schema)
    }

    /// Replace the body of an existing entry
    ///
    /// This is the only way to change a registered body. Returns `false` and
    /// leaves the registry unchanged if `name` was never registered.
    pub fn replace(&mut self, name: &str, schema: SchemaObject) -> bool {
        match self.schemas.get_mut(name) {
            Some(existing) => {
                *existing = schema;
                true
            }
            None => false,
        }
    }

    /// All entries in registration order
    pub const fn entries(&self) -> &IndexMap<String, SchemaObject> {
        &self.schemas
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.schemas.clear();
        self.names.clear();
        self.owners.clear();
    }
}
